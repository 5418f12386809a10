//! Recomputation pipeline.
//!
//! # Responsibility
//! - Derive scores and stages for a whole collection in one explicit pass:
//!   `(sigils, alignments, ambient, now) -> (scores, stages)`.
//!
//! # Invariants
//! - Derived maps contain exactly the ids present in `sigils`.
//! - Alignments pointing at nodes missing from the catalog score as
//!   unaligned.

use crate::model::sigil::{Sigil, SigilId};
use crate::model::stage::EvolutionStage;
use crate::model::timeline::{TimelineCatalog, TimelineNodeId};
use crate::resonance::evolution::classify;
use crate::resonance::scorer::{score, AmbientState, ResonanceScore};
use std::collections::BTreeMap;

/// Derived per-sigil values produced by one recomputation pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DerivedState {
    pub scores: BTreeMap<SigilId, ResonanceScore>,
    pub stages: BTreeMap<SigilId, EvolutionStage>,
}

impl DerivedState {
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

/// Recomputes every score and stage from scratch.
pub fn recompute(
    sigils: &[Sigil],
    alignments: &BTreeMap<SigilId, TimelineNodeId>,
    catalog: &TimelineCatalog,
    ambient: &AmbientState,
    now_ms: i64,
) -> DerivedState {
    let mut derived = DerivedState::default();
    for sigil in sigils {
        let node = alignments
            .get(&sigil.id)
            .and_then(|node_id| catalog.get(node_id));
        let sigil_score = score(sigil, node, ambient);
        let stage = classify(sigil.created_at_ms, sigil_score.overall, now_ms);
        derived.scores.insert(sigil.id, sigil_score);
        derived.stages.insert(sigil.id, stage);
    }
    derived
}

#[cfg(test)]
mod tests {
    use super::recompute;
    use crate::model::chakra::ChakraType;
    use crate::model::sigil::{NewSigil, NumerologyProfile, Sigil, SigilVisual};
    use crate::model::stage::EvolutionStage;
    use crate::model::timeline::TimelineCatalog;
    use crate::resonance::scorer::AmbientState;
    use std::collections::BTreeMap;
    use uuid::Uuid;

    const DAY: i64 = 86_400_000;

    fn sigil(created_at_ms: i64) -> Sigil {
        NewSigil {
            owner_id: Uuid::new_v4(),
            chakra: ChakraType::Heart,
            frequency_hz: 639.0,
            intention: "Find my center and my voice".to_string(),
            numerology: NumerologyProfile::default(),
            visual: SigilVisual::default(),
            evolved_from: None,
        }
        .into_sigil(Uuid::new_v4(), created_at_ms)
    }

    #[test]
    fn derived_maps_cover_exactly_the_store() {
        let sigils = vec![sigil(0), sigil(0)];
        let stray = Uuid::new_v4();
        let alignments = BTreeMap::from([(stray, "heart_gate".to_string())]);
        let derived = recompute(
            &sigils,
            &alignments,
            &TimelineCatalog::default(),
            &AmbientState::default(),
            0,
        );
        assert_eq!(derived.scores.len(), 2);
        assert_eq!(derived.stages.len(), 2);
        assert!(!derived.scores.contains_key(&stray));
    }

    #[test]
    fn alignment_to_unknown_node_scores_as_unaligned() {
        let only = sigil(0);
        let alignments = BTreeMap::from([(only.id, "nowhere".to_string())]);
        let derived = recompute(
            &[only.clone()],
            &alignments,
            &TimelineCatalog::default(),
            &AmbientState::default(),
            0,
        );
        assert_eq!(derived.scores[&only.id].timeline_alignment, 0.0);
    }

    #[test]
    fn aged_aligned_sigil_reaches_transcendent() {
        let old = sigil(0);
        let alignments = BTreeMap::from([(old.id, "heart_gate".to_string())]);
        let derived = recompute(
            &[old.clone()],
            &alignments,
            &TimelineCatalog::default(),
            &AmbientState::default(),
            30 * DAY,
        );
        assert_eq!(derived.scores[&old.id].overall, 95.0);
        assert_eq!(derived.stages[&old.id], EvolutionStage::Transcendent);
    }
}
