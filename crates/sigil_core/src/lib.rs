//! Core domain logic for sigil resonance tracking.
//! This crate is the single source of truth for scoring rules and invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod resonance;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::chakra::ChakraType;
pub use model::journal::{JournalEntry, JournalEvent};
pub use model::law::UniversalLaw;
pub use model::now_epoch_ms;
pub use model::sigil::{
    EvolutionParent, NewSigil, NumerologyProfile, OwnerId, Sigil, SigilId, SigilValidationError,
    SigilVisual,
};
pub use model::stage::EvolutionStage;
pub use model::timeline::{SigilAlignment, TimelineCatalog, TimelineNode, TimelineNodeId};
pub use repo::alignment_repo::AlignmentRepository;
pub use repo::journal_repo::JournalRepository;
pub use repo::sigil_repo::{RepoError, RepoResult, SigilRepository, SqliteSigilRepository};
pub use repo::SigilBackend;
pub use resonance::compliance::{check_compliance, LawPadding, NoPadding, RandomPadding};
pub use resonance::evolution::classify;
pub use resonance::field::aggregate;
pub use resonance::pipeline::{recompute, DerivedState};
pub use resonance::scorer::{score, AmbientState, ResonanceScore};
pub use service::numerology::derive_numerology;
pub use service::session::{CreateSigilRequest, EvolveSigilRequest, SigilSession};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
