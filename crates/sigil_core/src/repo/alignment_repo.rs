//! Sigil alignment repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist the sigil → timeline node relation per owner.
//!
//! # Invariants
//! - At most one alignment row exists per `(owner_id, sigil_id)`.
//! - Re-aligning overwrites the node id; rows are never accumulated.

use crate::model::sigil::{OwnerId, SigilId};
use crate::model::timeline::SigilAlignment;
use crate::repo::sigil_repo::{parse_uuid, RepoResult, SqliteSigilRepository};
use rusqlite::params;

/// Persistence-service contract for alignments.
pub trait AlignmentRepository {
    /// Writes the alignment with upsert semantics keyed by `(owner, sigil)`.
    fn upsert_alignment(&self, owner_id: OwnerId, sigil_id: SigilId, node_id: &str)
        -> RepoResult<()>;
    /// Lists all alignments of one owner.
    fn list_alignments(&self, owner_id: OwnerId) -> RepoResult<Vec<SigilAlignment>>;
}

impl AlignmentRepository for SqliteSigilRepository<'_> {
    fn upsert_alignment(
        &self,
        owner_id: OwnerId,
        sigil_id: SigilId,
        node_id: &str,
    ) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO sigil_alignments (owner_id, sigil_id, node_id)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(owner_id, sigil_id) DO UPDATE SET
                node_id = excluded.node_id,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![owner_id.to_string(), sigil_id.to_string(), node_id],
        )?;
        Ok(())
    }

    fn list_alignments(&self, owner_id: OwnerId) -> RepoResult<Vec<SigilAlignment>> {
        let mut stmt = self.conn.prepare(
            "SELECT sigil_id, node_id
             FROM sigil_alignments
             WHERE owner_id = ?1
             ORDER BY sigil_id ASC;",
        )?;
        let mut rows = stmt.query([owner_id.to_string()])?;
        let mut alignments = Vec::new();
        while let Some(row) = rows.next()? {
            let sigil_text: String = row.get("sigil_id")?;
            alignments.push(SigilAlignment {
                sigil_id: parse_uuid(&sigil_text, "sigil_alignments.sigil_id")?,
                node_id: row.get("node_id")?,
            });
        }
        Ok(alignments)
    }
}
