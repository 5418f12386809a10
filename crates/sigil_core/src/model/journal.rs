//! Journal event log records.
//!
//! Journal entries are append-only and never read back by core.

use crate::model::sigil::{OwnerId, SigilId};
use serde::{Deserialize, Serialize};

/// Mutation kinds recorded in the journal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JournalEvent {
    SigilCreated,
    SigilEvolved,
    SigilAligned,
}

impl JournalEvent {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SigilCreated => "sigil_created",
            Self::SigilEvolved => "sigil_evolved",
            Self::SigilAligned => "sigil_aligned",
        }
    }
}

/// One append-only journal record. The service assigns the timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub owner_id: OwnerId,
    pub event: JournalEvent,
    pub sigil_id: Option<SigilId>,
    /// Metadata-only `key=value` detail; never carries intention text.
    pub detail: String,
}

impl JournalEntry {
    pub fn new(
        owner_id: OwnerId,
        event: JournalEvent,
        sigil_id: Option<SigilId>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            owner_id,
            event,
            sigil_id,
            detail: detail.into(),
        }
    }
}
