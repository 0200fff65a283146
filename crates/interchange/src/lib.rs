//! gesto-interchange: Shared compiled-grammar literal types and deserialization.
//!
//! Provides the [`GrammarNode`] tagged union (Leaf/Branch/Fan) that the
//! grammar compiler produces, the script generator embeds, and the
//! runtime matcher consumes, plus a single [`from_literal`] entry point
//! that deserializes a `serde_json::Value` literal back into a
//! `GrammarNode`.
//!
//! This crate keeps the literal format in one place so that gesto-core
//! (producer) and gesto-eval / gesto-codegen (consumers) never disagree
//! on what a compiled grammar denotes.

pub mod deserialize;
pub mod types;

pub use deserialize::{from_literal, InterchangeError};
pub use types::{GrammarNode, WILDCARD};
