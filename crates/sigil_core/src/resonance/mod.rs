//! Pure resonance engine: scoring, classification, compliance, aggregation.
//!
//! # Responsibility
//! - Hold every derived-metric rule as a pure function over its inputs.
//! - Expose one explicit recomputation pipeline for whole collections.
//!
//! # Invariants
//! - No I/O and no logging; callers decide when to recompute.

pub mod compliance;
pub mod evolution;
pub mod field;
pub mod pipeline;
pub mod scorer;
