//! Journal repository contract and SQLite implementation.
//!
//! Append-only; core never reads entries back.

use crate::model::journal::JournalEntry;
use crate::repo::sigil_repo::{RepoResult, SqliteSigilRepository};
use rusqlite::params;

/// Persistence-service contract for the journal event log.
pub trait JournalRepository {
    fn append_journal_entry(&self, entry: &JournalEntry) -> RepoResult<()>;
}

impl JournalRepository for SqliteSigilRepository<'_> {
    fn append_journal_entry(&self, entry: &JournalEntry) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO journal_entries (owner_id, event, sigil_id, detail)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                entry.owner_id.to_string(),
                entry.event.as_str(),
                entry.sigil_id.map(|id| id.to_string()),
                entry.detail.as_str(),
            ],
        )?;
        Ok(())
    }
}
