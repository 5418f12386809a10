//! Flutter-facing bindings for the sigil core.

pub mod api;
