//! gesto-eval: runtime command matcher -- accepts a compiled grammar
//! plus a live transcription stream, produces the matched command path.
//!
//! The matcher consumes the grammar literal (not the editor state),
//! pulls recognized tokens from a [`TokenSource`] as they arrive, and
//! resolves to a [`Transcription`]: the matched path on success, an
//! empty path on timeout or exhaustion. Failure to recognize speech is
//! routine behavior, never an error.

pub mod matcher;

pub use matcher::{listen, ScriptedSource, TokenSource, Transcription};

// ──────────────────────────────────────────────
// Integration tests
// ──────────────────────────────────────────────
