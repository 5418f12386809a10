//! Evolution stage classifier.
//!
//! # Responsibility
//! - Map `(sigil age, overall resonance)` to one of five ordered stages.
//! - Report progress toward the next stage.
//!
//! # Invariants
//! - Total function: every `(age, score)` pair yields exactly one stage.
//! - Within one age bracket the stage never decreases as score increases.
//! - Stages are recomputed from scratch on every pass and may regress when
//!   the score drops; they are never stored as current state.

use crate::model::stage::EvolutionStage;

const DAY_MS: f64 = 86_400_000.0;

/// Classifies a sigil created at `created_at_ms` as observed at `now_ms`.
///
/// Future creation timestamps are treated as age zero.
pub fn classify(created_at_ms: i64, overall: f64, now_ms: i64) -> EvolutionStage {
    let age_days = age_in_days(created_at_ms, now_ms);

    if age_days < 1.0 {
        EvolutionStage::Seed
    } else if age_days < 3.0 {
        pick(overall, &[(70.0, EvolutionStage::Sprout)])
    } else if age_days < 7.0 {
        pick(
            overall,
            &[(80.0, EvolutionStage::Bloom), (60.0, EvolutionStage::Sprout)],
        )
    } else if age_days < 14.0 {
        pick(
            overall,
            &[
                (85.0, EvolutionStage::Mature),
                (70.0, EvolutionStage::Bloom),
                (50.0, EvolutionStage::Sprout),
            ],
        )
    } else {
        pick(
            overall,
            &[
                (90.0, EvolutionStage::Transcendent),
                (80.0, EvolutionStage::Mature),
                (65.0, EvolutionStage::Bloom),
                (40.0, EvolutionStage::Sprout),
            ],
        )
    }
}

/// Percentage progress from `stage` toward its successor.
///
/// Interpolates between the current and next stage thresholds and clamps to
/// `0..=100`. `Transcendent` always reports `100`.
pub fn progress(stage: EvolutionStage, overall: f64) -> f64 {
    let Some(next) = stage.next() else {
        return 100.0;
    };
    let floor = stage.required_resonance();
    let ceiling = next.required_resonance();
    let ratio = (overall - floor) / (ceiling - floor) * 100.0;
    if ratio.is_nan() {
        return 0.0;
    }
    ratio.clamp(0.0, 100.0)
}

/// Fractional age in days, never negative.
pub fn age_in_days(created_at_ms: i64, now_ms: i64) -> f64 {
    let elapsed = now_ms.saturating_sub(created_at_ms).max(0);
    elapsed as f64 / DAY_MS
}

fn pick(overall: f64, thresholds: &[(f64, EvolutionStage)]) -> EvolutionStage {
    thresholds
        .iter()
        .find(|(threshold, _)| overall > *threshold)
        .map_or(EvolutionStage::Seed, |(_, stage)| *stage)
}

#[cfg(test)]
mod tests {
    use super::{age_in_days, classify, progress};
    use crate::model::stage::EvolutionStage;

    const DAY: i64 = 86_400_000;

    #[test]
    fn brand_new_sigil_is_seed_regardless_of_score() {
        assert_eq!(classify(0, 100.0, 0), EvolutionStage::Seed);
        assert_eq!(classify(0, 100.0, DAY - 1), EvolutionStage::Seed);
    }

    #[test]
    fn brackets_apply_strict_thresholds() {
        assert_eq!(classify(0, 71.0, DAY), EvolutionStage::Sprout);
        assert_eq!(classify(0, 70.0, DAY), EvolutionStage::Seed);
        assert_eq!(classify(0, 81.0, 3 * DAY), EvolutionStage::Bloom);
        assert_eq!(classify(0, 61.0, 3 * DAY), EvolutionStage::Sprout);
        assert_eq!(classify(0, 86.0, 7 * DAY), EvolutionStage::Mature);
        assert_eq!(classify(0, 51.0, 7 * DAY), EvolutionStage::Sprout);
        assert_eq!(classify(0, 50.0, 7 * DAY), EvolutionStage::Seed);
        assert_eq!(classify(0, 91.0, 14 * DAY), EvolutionStage::Transcendent);
        assert_eq!(classify(0, 90.0, 14 * DAY), EvolutionStage::Mature);
        assert_eq!(classify(0, 66.0, 14 * DAY), EvolutionStage::Bloom);
        assert_eq!(classify(0, 41.0, 14 * DAY), EvolutionStage::Sprout);
        assert_eq!(classify(0, 40.0, 14 * DAY), EvolutionStage::Seed);
    }

    #[test]
    fn stage_level_is_monotonic_in_score_within_each_bracket() {
        for age in [0, DAY, 3 * DAY, 7 * DAY, 14 * DAY, 400 * DAY] {
            let mut previous = 0;
            for score in 0..=100 {
                let level = classify(0, f64::from(score), age).level();
                assert!(level >= previous, "age={age} score={score}");
                previous = level;
            }
        }
    }

    #[test]
    fn future_timestamp_counts_as_zero_age() {
        assert_eq!(age_in_days(10 * DAY, 0), 0.0);
        assert_eq!(classify(10 * DAY, 100.0, 0), EvolutionStage::Seed);
    }

    #[test]
    fn stage_regresses_when_score_drops() {
        let now = 20 * DAY;
        assert_eq!(classify(0, 95.0, now), EvolutionStage::Transcendent);
        assert_eq!(classify(0, 60.0, now), EvolutionStage::Sprout);
    }

    #[test]
    fn progress_interpolates_between_thresholds() {
        assert_eq!(progress(EvolutionStage::Seed, 50.0), 50.0);
        assert_eq!(progress(EvolutionStage::Seed, 10.0), 0.0);
        assert_eq!(progress(EvolutionStage::Mature, 100.0), 100.0);
        assert_eq!(progress(EvolutionStage::Transcendent, 0.0), 100.0);
    }
}
