//! Universal law catalog.
//!
//! Static reference data: 9 named laws in fixed catalog order.

use serde::{Deserialize, Serialize};

/// One of the 9 fixed universal laws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UniversalLaw {
    Vibration,
    Correspondence,
    Polarity,
    Rhythm,
    CauseAndEffect,
    Mentalism,
    Gender,
    Attraction,
    DivineOneness,
}

impl UniversalLaw {
    /// Full catalog in fixed order.
    pub const ALL: [UniversalLaw; 9] = [
        UniversalLaw::Vibration,
        UniversalLaw::Correspondence,
        UniversalLaw::Polarity,
        UniversalLaw::Rhythm,
        UniversalLaw::CauseAndEffect,
        UniversalLaw::Mentalism,
        UniversalLaw::Gender,
        UniversalLaw::Attraction,
        UniversalLaw::DivineOneness,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Vibration => "Vibration",
            Self::Correspondence => "Correspondence",
            Self::Polarity => "Polarity",
            Self::Rhythm => "Rhythm",
            Self::CauseAndEffect => "Cause & Effect",
            Self::Mentalism => "Mentalism",
            Self::Gender => "Gender",
            Self::Attraction => "Attraction",
            Self::DivineOneness => "Divine Oneness",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Vibration => "Everything moves and vibrates at its own frequency.",
            Self::Correspondence => "As above, so below; as within, so without.",
            Self::Polarity => "Everything has an opposite that defines it.",
            Self::Rhythm => "Everything flows in cycles and tides.",
            Self::CauseAndEffect => "Every action sets an effect in motion.",
            Self::Mentalism => "The universe is mental; thought shapes form.",
            Self::Gender => "Masculine and feminine energies exist in all things.",
            Self::Attraction => "Like energy draws like energy.",
            Self::DivineOneness => "Everything is connected to everything else.",
        }
    }
}
