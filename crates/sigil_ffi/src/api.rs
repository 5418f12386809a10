//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level sigil functions to Dart via FRB.
//! - Translate core `bool`/`Option` results into simple envelopes.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Every call loads a fresh session for the owner, so two callers never
//!   share in-memory state.

use sigil_core::db::open_db;
use sigil_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    AmbientState, ChakraType, CreateSigilRequest, EvolveSigilRequest, SigilSession, SigilVisual,
    SqliteSigilRepository,
};
use log::warn;
use std::path::PathBuf;
use std::sync::OnceLock;
use uuid::Uuid;

const SIGIL_DB_FILE_NAME: &str = "sigil.sqlite3";
static SIGIL_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Returns an empty string on success and an error message on failure.
/// Safe to call repeatedly with the same `level + log_dir`.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Generic action response envelope for sigil mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigilActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Created or affected sigil ID.
    pub sigil_id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl SigilActionResponse {
    fn success(message: impl Into<String>, sigil_id: String) -> Self {
        Self {
            ok: true,
            sigil_id: Some(sigil_id),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            sigil_id: None,
            message: message.into(),
        }
    }
}

/// One dashboard row per sigil.
#[derive(Debug, Clone, PartialEq)]
pub struct SigilDashboardItem {
    pub sigil_id: String,
    pub chakra: String,
    pub frequency_hz: f64,
    pub aligned_node_id: Option<String>,
    pub overall: f64,
    pub chakra_harmony: f64,
    pub frequency_alignment: f64,
    pub timeline_alignment: f64,
    pub law_compliance: f64,
    /// Stage label (`seed|sprout|bloom|mature|transcendent`).
    pub stage: String,
    pub stage_level: u8,
    pub stage_progress: f64,
    pub evolved_from: Option<String>,
}

/// Derived dashboard envelope for one owner.
#[derive(Debug, Clone, PartialEq)]
pub struct SigilDashboardResponse {
    pub ok: bool,
    pub items: Vec<SigilDashboardItem>,
    /// Quantum field aggregate percentage.
    pub field_percentage: f64,
    pub message: String,
}

/// Generates a sigil for an owner.
///
/// `frequency_hz = None` uses the chakra's canonical tone.
#[flutter_rust_bridge::frb(sync)]
pub fn sigil_create(
    owner_id: String,
    chakra: String,
    frequency_hz: Option<f64>,
    intention: String,
    visual: String,
) -> SigilActionResponse {
    let Some(chakra) = ChakraType::parse(&chakra) else {
        return SigilActionResponse::failure(format!("sigil_create failed: unknown chakra `{chakra}`"));
    };
    let request = CreateSigilRequest {
        chakra,
        frequency_hz,
        intention,
        visual: SigilVisual(visual),
    };
    let result = with_session(&owner_id, |session| {
        session
            .create_sigil(request)
            .map(|sigil| sigil.id.to_string())
            .ok_or_else(|| "sigil could not be created".to_string())
    });
    match result {
        Ok(sigil_id) => SigilActionResponse::success("Sigil created.", sigil_id),
        Err(err) => SigilActionResponse::failure(format!("sigil_create failed: {err}")),
    }
}

/// Evolves an existing sigil into a new child sigil.
#[flutter_rust_bridge::frb(sync)]
pub fn sigil_evolve(
    owner_id: String,
    parent_id: String,
    intention: Option<String>,
) -> SigilActionResponse {
    let Ok(parent_id) = Uuid::parse_str(parent_id.trim()) else {
        return SigilActionResponse::failure("sigil_evolve failed: invalid parent_id");
    };
    let request = EvolveSigilRequest {
        parent_id,
        intention,
        visual: None,
    };
    let result = with_session(&owner_id, |session| {
        session
            .evolve_sigil(request)
            .map(|sigil| sigil.id.to_string())
            .ok_or_else(|| format!("parent sigil {parent_id} could not be evolved"))
    });
    match result {
        Ok(sigil_id) => SigilActionResponse::success("Sigil evolved.", sigil_id),
        Err(err) => SigilActionResponse::failure(format!("sigil_evolve failed: {err}")),
    }
}

/// Aligns a sigil to a timeline node, replacing any previous alignment.
#[flutter_rust_bridge::frb(sync)]
pub fn sigil_align(owner_id: String, sigil_id: String, node_id: String) -> SigilActionResponse {
    let Ok(sigil_id) = Uuid::parse_str(sigil_id.trim()) else {
        return SigilActionResponse::failure("sigil_align failed: invalid sigil_id");
    };
    let result = with_session(&owner_id, |session| {
        if session.align(sigil_id, &node_id) {
            Ok(sigil_id.to_string())
        } else {
            Err(format!("sigil {sigil_id} could not be aligned to `{}`", node_id.trim()))
        }
    });
    match result {
        Ok(sigil_id) => SigilActionResponse::success("Sigil aligned.", sigil_id),
        Err(err) => SigilActionResponse::failure(format!("sigil_align failed: {err}")),
    }
}

/// Returns derived scores, stages and the field aggregate for an owner.
#[flutter_rust_bridge::frb(sync)]
pub fn sigil_dashboard(owner_id: String, ambient_chakra: String) -> SigilDashboardResponse {
    let Some(ambient) = ChakraType::parse(&ambient_chakra) else {
        return dashboard_failure(format!("unknown ambient chakra `{ambient_chakra}`"));
    };
    let result = with_session(&owner_id, |session| {
        session.set_ambient(AmbientState::from_chakra(ambient));
        let items = session
            .sigils()
            .iter()
            .filter_map(|sigil| {
                let score = session.score(sigil.id)?;
                let stage = session.stage(sigil.id)?;
                Some(SigilDashboardItem {
                    sigil_id: sigil.id.to_string(),
                    chakra: sigil.chakra.as_str().to_string(),
                    frequency_hz: sigil.frequency_hz,
                    aligned_node_id: session.get_alignment(sigil.id).map(|node| node.id.clone()),
                    overall: score.overall,
                    chakra_harmony: score.chakra_harmony,
                    frequency_alignment: score.frequency_alignment,
                    timeline_alignment: score.timeline_alignment,
                    law_compliance: score.law_compliance,
                    stage: stage.as_str().to_string(),
                    stage_level: stage.level(),
                    stage_progress: session.stage_progress(sigil.id).unwrap_or(0.0),
                    evolved_from: sigil.evolved_from.map(|parent| parent.parent_id.to_string()),
                })
            })
            .collect::<Vec<_>>();
        Ok((items, session.field_aggregate()))
    });
    match result {
        Ok((items, field_percentage)) => SigilDashboardResponse {
            ok: true,
            message: format!("Loaded {} sigil(s).", items.len()),
            items,
            field_percentage,
        },
        Err(err) => dashboard_failure(err),
    }
}

fn dashboard_failure(err: impl std::fmt::Display) -> SigilDashboardResponse {
    SigilDashboardResponse {
        ok: false,
        items: Vec::new(),
        field_percentage: 0.0,
        message: format!("sigil_dashboard failed: {err}"),
    }
}

fn resolve_db_path() -> PathBuf {
    SIGIL_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("SIGIL_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(SIGIL_DB_FILE_NAME)
        })
        .clone()
}

fn with_session<T>(
    owner_id: &str,
    f: impl FnOnce(&mut SigilSession<SqliteSigilRepository<'_>>) -> Result<T, String>,
) -> Result<T, String> {
    let owner_id =
        Uuid::parse_str(owner_id.trim()).map_err(|_| "invalid owner_id".to_string())?;
    if owner_id.is_nil() {
        return Err("owner_id must not be nil".to_string());
    }
    let conn = open_db(resolve_db_path()).map_err(|err| format!("DB open failed: {err}"))?;
    let repo =
        SqliteSigilRepository::try_new(&conn).map_err(|err| format!("repo init failed: {err}"))?;
    let mut session = SigilSession::new(owner_id, repo);
    if !session.load() {
        return Err("sigil state could not be loaded".to_string());
    }
    f(&mut session).map_err(|err| {
        warn!("event=ffi_call module=ffi status=error owner_id={owner_id} error={err}");
        err
    })
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, init_logging, ping, sigil_align, sigil_create, sigil_dashboard,
        sigil_evolve,
    };
    use uuid::Uuid;

    fn owner() -> String {
        Uuid::new_v4().to_string()
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn create_align_and_dashboard_flow() {
        let owner = owner();
        let created = sigil_create(
            owner.clone(),
            "heart".to_string(),
            Some(639.0),
            "Find my center and my voice".to_string(),
            String::new(),
        );
        assert!(created.ok, "{}", created.message);
        let sigil_id = created.sigil_id.expect("create should return sigil_id");

        let aligned = sigil_align(owner.clone(), sigil_id.clone(), "heart_gate".to_string());
        assert!(aligned.ok, "{}", aligned.message);

        let dashboard = sigil_dashboard(owner, "heart".to_string());
        assert!(dashboard.ok, "{}", dashboard.message);
        assert_eq!(dashboard.items.len(), 1);
        let item = &dashboard.items[0];
        assert_eq!(item.sigil_id, sigil_id);
        assert_eq!(item.overall, 95.0);
        assert_eq!(item.aligned_node_id.as_deref(), Some("heart_gate"));
        assert_eq!(item.stage, "seed");
        // 95 + 5 alignment + 3 diversity, capped
        assert_eq!(dashboard.field_percentage, 100.0);
    }

    #[test]
    fn create_keeps_intention_text_verbatim() {
        let owner = owner();
        // 27 chars plus trailing spaces crosses the 30-char length bonus
        let created = sigil_create(
            owner.clone(),
            "heart".to_string(),
            Some(639.0),
            "Find my center and my voice    ".to_string(),
            String::new(),
        );
        assert!(created.ok, "{}", created.message);

        let dashboard = sigil_dashboard(owner, "heart".to_string());
        assert_eq!(dashboard.items.len(), 1);
        // 50 base + 10 sacred digit + 5 long intention
        assert_eq!(dashboard.items[0].overall, 65.0);
    }

    #[test]
    fn evolve_creates_child_referencing_parent() {
        let owner = owner();
        let parent = sigil_create(
            owner.clone(),
            "crown".to_string(),
            None,
            "Open to guidance".to_string(),
            String::new(),
        );
        let parent_id = parent.sigil_id.expect("parent should be created");

        let child = sigil_evolve(owner.clone(), parent_id.clone(), None);
        assert!(child.ok, "{}", child.message);

        let dashboard = sigil_dashboard(owner, "crown".to_string());
        assert_eq!(dashboard.items.len(), 2);
        assert!(dashboard
            .items
            .iter()
            .any(|item| item.evolved_from.as_deref() == Some(parent_id.as_str())));
    }

    #[test]
    fn invalid_inputs_fail_without_panicking() {
        let bad_chakra = sigil_create(
            owner(),
            "spleen".to_string(),
            None,
            "x".to_string(),
            String::new(),
        );
        assert!(!bad_chakra.ok);

        let bad_owner = sigil_dashboard("not-a-uuid".to_string(), "heart".to_string());
        assert!(!bad_owner.ok);

        let unknown = sigil_align(owner(), Uuid::new_v4().to_string(), "origin".to_string());
        assert!(!unknown.ok);
    }
}
