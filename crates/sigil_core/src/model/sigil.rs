//! Sigil domain model.
//!
//! # Responsibility
//! - Define the canonical sigil record and its creation payload.
//! - Validate attribute invariants before persistence.
//!
//! # Invariants
//! - `id` is stable, non-nil and never reused for another sigil.
//! - A sigil belongs to exactly one `owner_id`.
//! - Sigils are immutable after creation; evolution produces a new sigil
//!   carrying an `EvolutionParent` back-reference.
//! - `frequency_hz` is finite and non-negative.

use crate::model::chakra::ChakraType;
use crate::model::stage::EvolutionStage;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable sigil identifier.
pub type SigilId = Uuid;

/// Stable user identifier owning sigils and alignments.
pub type OwnerId = Uuid;

/// Largest numerology value accepted (master number 33).
pub const NUMEROLOGY_MAX: u8 = 33;

/// Numerology profile derived from a sigil's intention.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumerologyProfile {
    /// Reduced core numbers: expression, soul urge, personality.
    pub numbers: Vec<u8>,
    /// Archetype label for the expression number.
    pub archetype: String,
    /// Free-form vibration description.
    pub vibration: String,
}

/// Opaque visual payload. Never interpreted by core.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SigilVisual(pub String);

impl SigilVisual {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Back-reference from an evolved sigil to the sigil it was forked from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionParent {
    pub parent_id: SigilId,
    /// Parent stage at fork time.
    pub parent_stage: EvolutionStage,
}

/// Validation failures for sigil invariants.
#[derive(Debug, Clone, PartialEq)]
pub enum SigilValidationError {
    NilId,
    NilOwner,
    InvalidFrequency(f64),
    NumerologyOutOfRange(u8),
    SelfParent(SigilId),
}

impl Display for SigilValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "sigil id must not be nil"),
            Self::NilOwner => write!(f, "sigil owner_id must not be nil"),
            Self::InvalidFrequency(value) => {
                write!(f, "frequency_hz must be finite and >= 0, got {value}")
            }
            Self::NumerologyOutOfRange(value) => write!(
                f,
                "numerology number {value} is out of range 0..={NUMEROLOGY_MAX}"
            ),
            Self::SelfParent(id) => write!(f, "sigil {id} cannot evolve from itself"),
        }
    }
}

impl Error for SigilValidationError {}

/// Creation payload sent to the persistence service.
///
/// The service assigns `id` and `created_at_ms` on insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSigil {
    pub owner_id: OwnerId,
    pub chakra: ChakraType,
    pub frequency_hz: f64,
    pub intention: String,
    pub numerology: NumerologyProfile,
    pub visual: SigilVisual,
    pub evolved_from: Option<EvolutionParent>,
}

impl NewSigil {
    /// Validates attribute invariants shared with persisted sigils.
    pub fn validate(&self) -> Result<(), SigilValidationError> {
        if self.owner_id.is_nil() {
            return Err(SigilValidationError::NilOwner);
        }
        validate_attributes(self.frequency_hz, &self.numerology)
    }

    /// Materializes the persisted shape once identity is assigned.
    pub fn into_sigil(self, id: SigilId, created_at_ms: i64) -> Sigil {
        Sigil {
            id,
            owner_id: self.owner_id,
            chakra: self.chakra,
            frequency_hz: self.frequency_hz,
            intention: self.intention,
            numerology: self.numerology,
            visual: self.visual,
            created_at_ms,
            evolved_from: self.evolved_from,
        }
    }
}

/// Canonical persisted sigil record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sigil {
    pub id: SigilId,
    pub owner_id: OwnerId,
    pub chakra: ChakraType,
    /// Frequency in Hz.
    pub frequency_hz: f64,
    pub intention: String,
    pub numerology: NumerologyProfile,
    pub visual: SigilVisual,
    /// Unix epoch milliseconds, immutable.
    pub created_at_ms: i64,
    pub evolved_from: Option<EvolutionParent>,
}

impl Sigil {
    /// Validates persisted-state invariants.
    ///
    /// Blank intentions are only rejected at creation time; persisted rows
    /// with empty text still score with baseline values.
    pub fn validate(&self) -> Result<(), SigilValidationError> {
        if self.id.is_nil() {
            return Err(SigilValidationError::NilId);
        }
        if self.owner_id.is_nil() {
            return Err(SigilValidationError::NilOwner);
        }
        if let Some(parent) = self.evolved_from {
            if parent.parent_id == self.id {
                return Err(SigilValidationError::SelfParent(self.id));
            }
        }
        validate_attributes(self.frequency_hz, &self.numerology)
    }

    /// Decimal rendering of the frequency as shown to users.
    ///
    /// Whole frequencies render without a fractional part (`639`, not `639.0`).
    pub fn frequency_label(&self) -> String {
        self.frequency_hz.to_string()
    }

    pub fn is_evolved(&self) -> bool {
        self.evolved_from.is_some()
    }
}

fn validate_attributes(
    frequency_hz: f64,
    numerology: &NumerologyProfile,
) -> Result<(), SigilValidationError> {
    if !frequency_hz.is_finite() || frequency_hz < 0.0 {
        return Err(SigilValidationError::InvalidFrequency(frequency_hz));
    }
    if let Some(value) = numerology
        .numbers
        .iter()
        .copied()
        .find(|value| *value > NUMEROLOGY_MAX)
    {
        return Err(SigilValidationError::NumerologyOutOfRange(value));
    }
    Ok(())
}
