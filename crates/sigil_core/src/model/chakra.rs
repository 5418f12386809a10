//! Chakra tag reference data.
//!
//! # Responsibility
//! - Define the 7 fixed chakra tags in canonical order.
//! - Map each tag to its ordinal, canonical tone and stable storage label.
//!
//! # Invariants
//! - `index()` is 1-based and follows `ChakraType::ALL` order.
//! - Storage labels are stable and never reused.

use serde::{Deserialize, Serialize};

/// Categorical chakra tag attached to sigils, timeline nodes and ambient state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChakraType {
    Root,
    Sacral,
    SolarPlexus,
    Heart,
    Throat,
    ThirdEye,
    Crown,
}

impl ChakraType {
    /// All tags in canonical order.
    pub const ALL: [ChakraType; 7] = [
        ChakraType::Root,
        ChakraType::Sacral,
        ChakraType::SolarPlexus,
        ChakraType::Heart,
        ChakraType::Throat,
        ChakraType::ThirdEye,
        ChakraType::Crown,
    ];

    /// Ordinal position in canonical order, `1..=7`.
    pub fn index(self) -> u8 {
        match self {
            Self::Root => 1,
            Self::Sacral => 2,
            Self::SolarPlexus => 3,
            Self::Heart => 4,
            Self::Throat => 5,
            Self::ThirdEye => 6,
            Self::Crown => 7,
        }
    }

    /// Canonical tone in Hz used when no explicit frequency is given.
    pub fn canonical_frequency(self) -> f64 {
        match self {
            Self::Root => 396.0,
            Self::Sacral => 417.0,
            Self::SolarPlexus => 528.0,
            Self::Heart => 639.0,
            Self::Throat => 741.0,
            Self::ThirdEye => 852.0,
            Self::Crown => 963.0,
        }
    }

    /// Display color as `#RRGGBB`.
    pub fn color(self) -> &'static str {
        match self {
            Self::Root => "#E53935",
            Self::Sacral => "#FB8C00",
            Self::SolarPlexus => "#FDD835",
            Self::Heart => "#43A047",
            Self::Throat => "#1E88E5",
            Self::ThirdEye => "#3949AB",
            Self::Crown => "#8E24AA",
        }
    }

    /// Stable storage/wire label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Root => "root",
            Self::Sacral => "sacral",
            Self::SolarPlexus => "solar_plexus",
            Self::Heart => "heart",
            Self::Throat => "throat",
            Self::ThirdEye => "third_eye",
            Self::Crown => "crown",
        }
    }

    /// Parses a storage label. Accepts surrounding whitespace and any case.
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|chakra| chakra.as_str() == normalized)
    }
}

#[cfg(test)]
mod tests {
    use super::ChakraType;

    #[test]
    fn indices_follow_canonical_order() {
        let indices: Vec<u8> = ChakraType::ALL.iter().map(|c| c.index()).collect();
        assert_eq!(indices, vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn parse_accepts_storage_labels() {
        for chakra in ChakraType::ALL {
            assert_eq!(ChakraType::parse(chakra.as_str()), Some(chakra));
        }
        assert_eq!(ChakraType::parse(" Third_Eye "), Some(ChakraType::ThirdEye));
        assert_eq!(ChakraType::parse("spleen"), None);
    }
}
