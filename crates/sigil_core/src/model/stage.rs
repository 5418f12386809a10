//! Evolution stage reference data.
//!
//! Stages are derived, never persisted as current state. The only stored
//! stage is the parent's stage captured when a sigil is evolved.

use serde::{Deserialize, Serialize};

/// Ordered maturity classification of a sigil.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvolutionStage {
    Seed,
    Sprout,
    Bloom,
    Mature,
    Transcendent,
}

impl EvolutionStage {
    /// All stages in ascending order.
    pub const ALL: [EvolutionStage; 5] = [
        EvolutionStage::Seed,
        EvolutionStage::Sprout,
        EvolutionStage::Bloom,
        EvolutionStage::Mature,
        EvolutionStage::Transcendent,
    ];

    /// Numeric level, `1..=5`.
    pub fn level(self) -> u8 {
        match self {
            Self::Seed => 1,
            Self::Sprout => 2,
            Self::Bloom => 3,
            Self::Mature => 4,
            Self::Transcendent => 5,
        }
    }

    /// Resonance required to advance from this stage.
    pub fn required_resonance(self) -> f64 {
        match self {
            Self::Seed => 40.0,
            Self::Sprout => 60.0,
            Self::Bloom => 75.0,
            Self::Mature => 85.0,
            Self::Transcendent => 100.0,
        }
    }

    /// Successor stage. `Transcendent` has none.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Seed => Some(Self::Sprout),
            Self::Sprout => Some(Self::Bloom),
            Self::Bloom => Some(Self::Mature),
            Self::Mature => Some(Self::Transcendent),
            Self::Transcendent => None,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Seed => "Seed",
            Self::Sprout => "Sprout",
            Self::Bloom => "Bloom",
            Self::Mature => "Mature",
            Self::Transcendent => "Transcendent",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Seed => "Newly planted intention gathering energy.",
            Self::Sprout => "Intention breaking through and taking shape.",
            Self::Bloom => "Resonance opening outward into form.",
            Self::Mature => "Stable pattern anchored in the field.",
            Self::Transcendent => "Pattern fully integrated beyond its origin.",
        }
    }

    /// Stable storage/wire label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Seed => "seed",
            Self::Sprout => "sprout",
            Self::Bloom => "bloom",
            Self::Mature => "mature",
            Self::Transcendent => "transcendent",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|stage| stage.as_str() == value)
    }
}
