//! Repository layer: the persistence-service contract and its SQLite backend.
//!
//! # Responsibility
//! - Define the remote persistence contract core depends on.
//! - Isolate SQLite query details from session orchestration.
//!
//! # Invariants
//! - Every call is all-or-nothing; partial writes are not modeled.
//! - Repository APIs return semantic errors (`NotFound`, `InvalidData`) in
//!   addition to DB transport errors.

pub mod alignment_repo;
pub mod journal_repo;
pub mod sigil_repo;

use alignment_repo::AlignmentRepository;
use journal_repo::JournalRepository;
use sigil_repo::SigilRepository;

/// Full persistence-service surface required by a sigil session.
pub trait SigilBackend: SigilRepository + AlignmentRepository + JournalRepository {}

impl<T> SigilBackend for T where T: SigilRepository + AlignmentRepository + JournalRepository {}
