//! gesto-core: Gesto grammar compiler core library.
//!
//! Turns the device vocabulary service's dependent-option catalog into
//! the cascading selector chain shown in the block editor, and compiles
//! the user's selection into the command-grammar literal embedded in
//! generated action scripts.
//!
//! # Public API
//!
//! Key types are re-exported at the crate root for convenience:
//!
//! - [`Catalog`] -- the dependent-option dataset, by depth and prefix context
//! - [`build_chain()`] -- pure (catalog, selection prefix) -> field list
//! - [`compile()`] -- selection vector -> [`GrammarNode`] literal
//! - [`CatalogError`] / [`CompileError`] -- configuration and compile errors
//!
//! Everything here is pure and synchronous: no I/O, no shared mutable
//! state, identical output for identical input (including branch order).

pub mod catalog;
pub mod chain;
pub mod error;
pub mod grammar;

// ── Convenience re-exports: key types ────────────────────────────────

pub use catalog::{Catalog, CommandBranch, CommandTree, Context};
pub use chain::{build_chain, Field, FieldOption};
pub use error::{CatalogError, CompileError};
pub use grammar::{compile, normalize, Selection};

// ── Convenience re-exports: the shared literal ───────────────────────

pub use gesto_interchange::{GrammarNode, WILDCARD};
