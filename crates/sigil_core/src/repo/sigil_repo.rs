//! Sigil repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Define the persistence-service contract for sigils.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths call `NewSigil::validate()` before SQL mutations.
//! - The service assigns `id` and `created_at` on insert.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::migrations::{latest_version, schema_tables};
use crate::db::DbError;
use crate::model::chakra::ChakraType;
use crate::model::sigil::{
    EvolutionParent, NewSigil, NumerologyProfile, OwnerId, Sigil, SigilId, SigilValidationError,
    SigilVisual,
};
use crate::model::stage::EvolutionStage;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const SIGIL_SELECT_SQL: &str = "SELECT
    id,
    owner_id,
    chakra,
    frequency_hz,
    intention,
    numerology_numbers,
    numerology_archetype,
    numerology_vibration,
    visual,
    evolved_from_id,
    evolved_from_stage,
    created_at
FROM sigils";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for sigil, alignment and journal persistence.
#[derive(Debug)]
pub enum RepoError {
    Validation(SigilValidationError),
    Db(DbError),
    NotFound(SigilId),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "sigil not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted sigil data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table missing: {table}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SigilValidationError> for RepoError {
    fn from(value: SigilValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Persistence-service contract for sigil records.
pub trait SigilRepository {
    /// Persists a new sigil, assigning its id and creation timestamp.
    fn insert_sigil(&self, sigil: &NewSigil) -> RepoResult<Sigil>;
    /// Lists all sigils of one owner, oldest first.
    fn list_sigils(&self, owner_id: OwnerId) -> RepoResult<Vec<Sigil>>;
    /// Gets one sigil by id.
    fn get_sigil(&self, id: SigilId) -> RepoResult<Option<Sigil>>;
}

/// SQLite-backed persistence service for sigils, alignments and journal.
pub struct SqliteSigilRepository<'conn> {
    pub(crate) conn: &'conn Connection,
}

impl<'conn> SqliteSigilRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations were not applied.
    /// - `MissingRequiredTable` when a core table is absent.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl SigilRepository for SqliteSigilRepository<'_> {
    fn insert_sigil(&self, sigil: &NewSigil) -> RepoResult<Sigil> {
        sigil.validate()?;

        let id = Uuid::new_v4();
        let (parent_id, parent_stage) = match sigil.evolved_from {
            Some(parent) => (
                Some(parent.parent_id.to_string()),
                Some(parent.parent_stage.as_str()),
            ),
            None => (None, None),
        };

        self.conn.execute(
            "INSERT INTO sigils (
                id,
                owner_id,
                chakra,
                frequency_hz,
                intention,
                numerology_numbers,
                numerology_archetype,
                numerology_vibration,
                visual,
                evolved_from_id,
                evolved_from_stage
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11);",
            params![
                id.to_string(),
                sigil.owner_id.to_string(),
                sigil.chakra.as_str(),
                sigil.frequency_hz,
                sigil.intention.as_str(),
                numbers_to_db(&sigil.numerology.numbers),
                sigil.numerology.archetype.as_str(),
                sigil.numerology.vibration.as_str(),
                sigil.visual.as_str(),
                parent_id,
                parent_stage,
            ],
        )?;

        self.get_sigil(id)?.ok_or(RepoError::NotFound(id))
    }

    fn list_sigils(&self, owner_id: OwnerId) -> RepoResult<Vec<Sigil>> {
        let mut stmt = self.conn.prepare(&format!(
            "{SIGIL_SELECT_SQL}
             WHERE owner_id = ?1
             ORDER BY created_at ASC, id ASC;"
        ))?;
        let mut rows = stmt.query([owner_id.to_string()])?;
        let mut sigils = Vec::new();
        while let Some(row) = rows.next()? {
            sigils.push(parse_sigil_row(row)?);
        }
        Ok(sigils)
    }

    fn get_sigil(&self, id: SigilId) -> RepoResult<Option<Sigil>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SIGIL_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_sigil_row(row)?));
        }
        Ok(None)
    }
}

fn parse_sigil_row(row: &Row<'_>) -> RepoResult<Sigil> {
    let id = parse_uuid(&row.get::<_, String>("id")?, "sigils.id")?;
    let owner_id = parse_uuid(&row.get::<_, String>("owner_id")?, "sigils.owner_id")?;

    let chakra_text: String = row.get("chakra")?;
    let chakra = ChakraType::parse(&chakra_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid chakra `{chakra_text}` in sigils.chakra"))
    })?;

    let numbers_text: String = row.get("numerology_numbers")?;
    let numbers = parse_numbers(&numbers_text)?;

    let parent_id = row.get::<_, Option<String>>("evolved_from_id")?;
    let parent_stage = row.get::<_, Option<String>>("evolved_from_stage")?;
    let evolved_from = match (parent_id, parent_stage) {
        (Some(parent_id), Some(stage_text)) => Some(EvolutionParent {
            parent_id: parse_uuid(&parent_id, "sigils.evolved_from_id")?,
            parent_stage: EvolutionStage::parse(&stage_text).ok_or_else(|| {
                RepoError::InvalidData(format!(
                    "invalid stage `{stage_text}` in sigils.evolved_from_stage"
                ))
            })?,
        }),
        (None, None) => None,
        _ => {
            return Err(RepoError::InvalidData(
                "evolved_from_id and evolved_from_stage must be set together".to_string(),
            ));
        }
    };

    let sigil = Sigil {
        id,
        owner_id,
        chakra,
        frequency_hz: row.get("frequency_hz")?,
        intention: row.get("intention")?,
        numerology: NumerologyProfile {
            numbers,
            archetype: row.get("numerology_archetype")?,
            vibration: row.get("numerology_vibration")?,
        },
        visual: SigilVisual(row.get("visual")?),
        created_at_ms: row.get("created_at")?,
        evolved_from,
    };
    sigil.validate()?;
    Ok(sigil)
}

pub(crate) fn parse_uuid(value: &str, column: &str) -> RepoResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid `{value}` in {column}")))
}

fn numbers_to_db(numbers: &[u8]) -> String {
    numbers
        .iter()
        .map(|value| value.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

fn parse_numbers(value: &str) -> RepoResult<Vec<u8>> {
    if value.trim().is_empty() {
        return Ok(Vec::new());
    }
    value
        .split(',')
        .map(|part| {
            part.trim().parse::<u8>().map_err(|_| {
                RepoError::InvalidData(format!(
                    "invalid numerology number `{part}` in sigils.numerology_numbers"
                ))
            })
        })
        .collect()
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for table in schema_tables() {
        if !table_exists(conn, table)? {
            return Err(RepoError::MissingRequiredTable(table));
        }
    }
    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

#[cfg(test)]
mod tests {
    use super::{numbers_to_db, parse_numbers};

    #[test]
    fn numbers_encode_as_comma_list() {
        assert_eq!(numbers_to_db(&[7, 11, 3]), "7,11,3");
        assert_eq!(numbers_to_db(&[]), "");
    }

    #[test]
    fn parse_numbers_rejects_garbage() {
        assert_eq!(parse_numbers("7, 11,3").unwrap(), vec![7, 11, 3]);
        assert!(parse_numbers("").unwrap().is_empty());
        assert!(parse_numbers("7,x").is_err());
    }
}
