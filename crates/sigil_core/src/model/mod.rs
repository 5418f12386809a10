//! Domain model for sigils and their reference data.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Hold static reference catalogs (chakras, timeline nodes, laws, stages).
//!
//! # Invariants
//! - Every sigil is identified by a stable `SigilId` and owned by one user.
//! - Derived values (scores, stages) are not part of the model.

pub mod chakra;
pub mod journal;
pub mod law;
pub mod sigil;
pub mod stage;
pub mod timeline;

use std::time::{SystemTime, UNIX_EPOCH};

/// Current wall clock in Unix epoch milliseconds.
///
/// Returns `0` if the system clock is before the epoch.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}
