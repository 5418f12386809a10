//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate persistence calls and the resonance pipeline into
//!   session-level use cases.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod numerology;
pub mod session;
