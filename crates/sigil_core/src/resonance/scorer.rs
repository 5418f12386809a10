//! Resonance scorer.
//!
//! # Responsibility
//! - Compute the multi-factor `ResonanceScore` of one sigil against its
//!   alignment and the current ambient state.
//!
//! # Invariants
//! - Pure and total: never panics, no side effects.
//! - Every score field is clamped to `0..=100`.
//! - Absent alignment skips every alignment-related bonus.

use crate::model::chakra::ChakraType;
use crate::model::sigil::Sigil;
use crate::model::timeline::TimelineNode;
use crate::resonance::compliance::{compliance_count, has_sacred_digit};
use serde::{Deserialize, Serialize};

const BASE_SCORE: f64 = 50.0;
const ALIGNED_BONUS: f64 = 20.0;
const AFFINITY_BONUS: f64 = 15.0;
const SACRED_DIGIT_BONUS: f64 = 10.0;
const LONG_INTENTION_BONUS: f64 = 5.0;
const LONG_INTENTION_CHARS: usize = 30;
const HARMONY_STEP_PENALTY: f64 = 12.0;
const FREQUENCY_DIVISOR: f64 = 10.0;

/// Ambient chakra state the user is currently attuned to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmbientState {
    pub chakra: ChakraType,
    /// Ambient frequency in Hz.
    pub frequency_hz: f64,
}

impl AmbientState {
    /// Ambient state tuned to the chakra's canonical tone.
    pub fn from_chakra(chakra: ChakraType) -> Self {
        Self {
            chakra,
            frequency_hz: chakra.canonical_frequency(),
        }
    }
}

impl Default for AmbientState {
    fn default() -> Self {
        Self::from_chakra(ChakraType::Heart)
    }
}

/// Derived multi-factor score. Not persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResonanceScore {
    pub overall: f64,
    pub chakra_harmony: f64,
    pub frequency_alignment: f64,
    pub timeline_alignment: f64,
    /// Number of compliant universal laws for this sigil.
    pub law_compliance: f64,
}

/// Scores one sigil.
///
/// `aligned_node` is the node the sigil is aligned to, if any.
pub fn score(
    sigil: &Sigil,
    aligned_node: Option<&TimelineNode>,
    ambient: &AmbientState,
) -> ResonanceScore {
    let mut base = BASE_SCORE;
    if let Some(node) = aligned_node {
        base += ALIGNED_BONUS;
        if node.chakra_affinity == sigil.chakra {
            base += AFFINITY_BONUS;
        }
    }
    if has_sacred_digit(sigil) {
        base += SACRED_DIGIT_BONUS;
    }
    if sigil.intention.chars().count() > LONG_INTENTION_CHARS {
        base += LONG_INTENTION_BONUS;
    }

    let is_aligned = aligned_node.is_some();
    ResonanceScore {
        overall: clamp_score(base),
        chakra_harmony: clamp_score(chakra_harmony(sigil.chakra, ambient.chakra)),
        frequency_alignment: clamp_score(frequency_alignment(
            sigil.frequency_hz,
            ambient.frequency_hz,
        )),
        timeline_alignment: if is_aligned { 100.0 } else { 0.0 },
        law_compliance: clamp_score(compliance_count(sigil, is_aligned) as f64),
    }
}

/// `100 - 12 * ordinal distance`; `100` for identical chakras.
///
/// Seven chakras bound the distance to 6, so the minimum is 28.
pub fn chakra_harmony(sigil_chakra: ChakraType, ambient_chakra: ChakraType) -> f64 {
    if sigil_chakra == ambient_chakra {
        return 100.0;
    }
    let distance = (i16::from(sigil_chakra.index()) - i16::from(ambient_chakra.index())).abs();
    100.0 - HARMONY_STEP_PENALTY * f64::from(distance)
}

pub fn frequency_alignment(sigil_frequency: f64, ambient_frequency: f64) -> f64 {
    let drift = (sigil_frequency - ambient_frequency).abs() / FREQUENCY_DIVISOR;
    100.0 - drift.min(100.0)
}

fn clamp_score(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 100.0)
}
