//! Quantum field aggregator.
//!
//! Summarizes one user's whole collection into a single percentage.

use crate::model::chakra::ChakraType;
use crate::model::sigil::{Sigil, SigilId};
use crate::model::timeline::TimelineNodeId;
use crate::resonance::scorer::ResonanceScore;
use std::collections::{BTreeMap, BTreeSet};

const ALIGNMENT_BONUS: f64 = 5.0;
const DIVERSITY_BONUS: f64 = 3.0;

/// `min(100, avg(overall) + 5 * aligned + 3 * distinct chakras)`.
///
/// Returns `0` for an empty collection. Scores and alignments keyed by ids
/// absent from `sigils` are ignored; a sigil without a score counts as `0`.
pub fn aggregate(
    scores: &BTreeMap<SigilId, ResonanceScore>,
    alignments: &BTreeMap<SigilId, TimelineNodeId>,
    sigils: &[Sigil],
) -> f64 {
    if sigils.is_empty() {
        return 0.0;
    }

    let total: f64 = sigils
        .iter()
        .map(|sigil| scores.get(&sigil.id).map_or(0.0, |score| score.overall))
        .sum();
    let base = total / sigils.len() as f64;

    let aligned = sigils
        .iter()
        .filter(|sigil| alignments.contains_key(&sigil.id))
        .count();
    let distinct: BTreeSet<ChakraType> = sigils.iter().map(|sigil| sigil.chakra).collect();

    let result =
        base + ALIGNMENT_BONUS * aligned as f64 + DIVERSITY_BONUS * distinct.len() as f64;
    result.min(100.0)
}

#[cfg(test)]
mod tests {
    use super::aggregate;
    use crate::model::chakra::ChakraType;
    use crate::model::sigil::{NewSigil, NumerologyProfile, Sigil, SigilVisual};
    use crate::resonance::scorer::ResonanceScore;
    use std::collections::BTreeMap;
    use uuid::Uuid;

    fn sigil(chakra: ChakraType) -> Sigil {
        NewSigil {
            owner_id: Uuid::new_v4(),
            chakra,
            frequency_hz: 100.0,
            intention: "quiet".to_string(),
            numerology: NumerologyProfile::default(),
            visual: SigilVisual::default(),
            evolved_from: None,
        }
        .into_sigil(Uuid::new_v4(), 0)
    }

    fn overall(value: f64) -> ResonanceScore {
        ResonanceScore {
            overall: value,
            chakra_harmony: 100.0,
            frequency_alignment: 100.0,
            timeline_alignment: 0.0,
            law_compliance: 3.0,
        }
    }

    #[test]
    fn empty_collection_is_zero() {
        assert_eq!(aggregate(&BTreeMap::new(), &BTreeMap::new(), &[]), 0.0);
    }

    #[test]
    fn combines_average_alignment_and_diversity() {
        let first = sigil(ChakraType::Heart);
        let second = sigil(ChakraType::Throat);
        let scores = BTreeMap::from([(first.id, overall(60.0)), (second.id, overall(95.0))]);
        let alignments = BTreeMap::from([(second.id, "heart_gate".to_string())]);

        let result = aggregate(&scores, &alignments, &[first, second]);
        assert_eq!(result, 88.5);
    }

    #[test]
    fn result_is_capped_at_100() {
        let sigils: Vec<Sigil> = ChakraType::ALL.into_iter().map(sigil).collect();
        let scores: BTreeMap<_, _> = sigils.iter().map(|s| (s.id, overall(90.0))).collect();
        let result = aggregate(&scores, &BTreeMap::new(), &sigils);
        assert_eq!(result, 100.0);
    }

    #[test]
    fn ignores_alignments_for_unknown_sigils() {
        let only = sigil(ChakraType::Root);
        let scores = BTreeMap::from([(only.id, overall(50.0))]);
        let alignments = BTreeMap::from([(Uuid::new_v4(), "origin".to_string())]);
        assert_eq!(aggregate(&scores, &alignments, &[only]), 53.0);
    }
}
