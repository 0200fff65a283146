//! gesto-codegen: block registry and action-script generation.
//!
//! Two consumers sit downstream of the editor: the rendering surface,
//! which needs the declarative block-shape metadata ([`blocks`]), and
//! the script runner, which needs the emitted Python action script
//! ([`script`]). Voice-command blocks compile their selection through
//! gesto-core and embed the resulting grammar as a constructor literal
//! the runtime matcher consumes ([`python`]).

pub mod blocks;
pub mod python;
pub mod script;

pub use blocks::{block_defs, registry, GestureDef};
pub use python::grammar_literal;
pub use script::{generate_script, Expr, KeySpec, ScriptProgram, Stmt};

use gesto_core::CompileError;

/// Error type for code generation operations.
#[derive(Debug, thiserror::Error)]
pub enum CodegenError {
    /// A voice-command block's selection does not compile against the
    /// catalog. An empty grammar is not reported here -- it emits a
    /// no-op listen instead.
    #[error("voice command block: {0}")]
    Grammar(#[from] CompileError),

    /// The program structure is invalid (bad key letter, unknown
    /// variable name, etc.).
    #[error("invalid program: {0}")]
    InvalidProgram(String),
}
