//! Streaming prefix matcher over a compiled grammar.
//!
//! Key invariant: a non-empty proper prefix of an admissible sequence
//! keeps the matcher listening; a transcription that cannot be extended
//! to any admissible sequence is a failed match, reported once the
//! source signals no-more-input. Matching is order-sensitive and
//! anchored at the start of the transcription.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use gesto_interchange::GrammarNode;

// ──────────────────────────────────────────────
// Token source
// ──────────────────────────────────────────────

/// The live transcription feed.
///
/// `next_token` blocks until the recognizer produces the next token and
/// returns `None` when the source signals no-more-input or timeout --
/// the matcher does not distinguish the two; timeout policy belongs to
/// the recognizer behind this trait.
pub trait TokenSource {
    fn next_token(&mut self) -> Option<String>;
}

/// A fixed transcript replayed token by token (tests, CLI).
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    tokens: VecDeque<String>,
}

impl ScriptedSource {
    pub fn new<I, S>(tokens: I) -> ScriptedSource
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedSource {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }
}

impl TokenSource for ScriptedSource {
    fn next_token(&mut self) -> Option<String> {
        self.tokens.pop_front()
    }
}

// ──────────────────────────────────────────────
// Match outcome
// ──────────────────────────────────────────────

/// The outcome handed back to the generated script.
///
/// On success `path` holds exactly the tokens consumed, in order. On
/// failure `path` is empty and `timeout` is set -- an ordinary "no
/// command recognized" outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcription {
    /// Everything the recognizer produced, space-joined.
    pub text: String,
    /// The matched command path, empty when nothing matched.
    pub path: Vec<String>,
    /// True when the source was exhausted without a match.
    pub timeout: bool,
}

impl Transcription {
    fn matched(path: Vec<String>) -> Transcription {
        Transcription {
            text: path.join(" "),
            path,
            timeout: false,
        }
    }

    fn unmatched(heard: Vec<String>) -> Transcription {
        Transcription {
            text: heard.join(" "),
            path: Vec::new(),
            timeout: true,
        }
    }
}

// ──────────────────────────────────────────────
// Matching
// ──────────────────────────────────────────────

/// One step of the anchored walk.
enum Step<'g> {
    /// The token completed an admissible sequence.
    Complete,
    /// The token extended a valid prefix; continue below this node.
    Descend(&'g GrammarNode),
    /// No admissible sequence starts with the tokens heard so far.
    Dead,
}

fn advance<'g>(node: &'g GrammarNode, token: &str) -> Step<'g> {
    match node {
        GrammarNode::Leaf { token: expected } => {
            if expected == token {
                Step::Complete
            } else {
                Step::Dead
            }
        }
        GrammarNode::Branch {
            token: expected,
            child,
        } => {
            if expected == token {
                Step::Descend(child.as_ref())
            } else {
                Step::Dead
            }
        }
        GrammarNode::Fan { branches } => {
            for branch in branches {
                match advance(branch, token) {
                    Step::Dead => continue,
                    step => return step,
                }
            }
            Step::Dead
        }
    }
}

/// Pull tokens from the source until a complete admissible sequence has
/// been recognized, or the source is exhausted with nothing admissible.
///
/// Returns immediately on completion; a dead transcription keeps
/// draining the source so the full utterance can be reported, but
/// cannot recover -- matching is anchored.
pub fn listen(grammar: &GrammarNode, source: &mut dyn TokenSource) -> Transcription {
    let mut heard: Vec<String> = Vec::new();
    let mut position: Option<&GrammarNode> = Some(grammar);

    while let Some(token) = source.next_token() {
        heard.push(token.clone());

        let Some(node) = position else {
            continue;
        };
        match advance(node, &token) {
            Step::Complete => return Transcription::matched(heard),
            Step::Descend(child) => position = Some(child),
            Step::Dead => position = None,
        }
    }

    Transcription::unmatched(heard)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(token: &str) -> GrammarNode {
        GrammarNode::Leaf {
            token: token.to_string(),
        }
    }

    fn branch(token: &str, child: GrammarNode) -> GrammarNode {
        GrammarNode::Branch {
            token: token.to_string(),
            child: Box::new(child),
        }
    }

    /// Grammar for {[on,light], [on,fan], [off,light]}.
    fn grammar() -> GrammarNode {
        GrammarNode::Fan {
            branches: vec![
                branch(
                    "on",
                    GrammarNode::Fan {
                        branches: vec![leaf("light"), leaf("fan")],
                    },
                ),
                branch("off", leaf("light")),
            ],
        }
    }

    #[test]
    fn complete_sequence_returns_consumed_path() {
        let mut source = ScriptedSource::new(["off", "light"]);
        let t = listen(&grammar(), &mut source);
        assert_eq!(t.path, vec!["off".to_string(), "light".to_string()]);
        assert_eq!(t.text, "off light");
        assert!(!t.timeout);
    }

    #[test]
    fn match_returns_as_soon_as_sequence_completes() {
        // Tokens past the completed command stay in the source.
        let mut source = ScriptedSource::new(["on", "fan", "off"]);
        let t = listen(&grammar(), &mut source);
        assert_eq!(t.path, vec!["on".to_string(), "fan".to_string()]);
        assert_eq!(source.next_token(), Some("off".to_string()));
    }

    #[test]
    fn proper_prefix_keeps_listening_until_input_ends() {
        let mut source = ScriptedSource::new(["on"]);
        let t = listen(&grammar(), &mut source);
        assert!(t.path.is_empty());
        assert!(t.timeout);
    }

    #[test]
    fn inextensible_transcription_fails() {
        let mut source = ScriptedSource::new(["on", "heater", "light"]);
        let t = listen(&grammar(), &mut source);
        // "light" after the dead "heater" cannot revive the match.
        assert!(t.path.is_empty());
        assert_eq!(t.text, "on heater light");
    }

    #[test]
    fn first_token_mismatch_fails() {
        let mut source = ScriptedSource::new(["heater"]);
        let t = listen(&grammar(), &mut source);
        assert!(t.path.is_empty());
    }

    #[test]
    fn empty_source_is_a_timeout() {
        let mut source = ScriptedSource::default();
        let t = listen(&grammar(), &mut source);
        assert_eq!(
            t,
            Transcription {
                text: String::new(),
                path: vec![],
                timeout: true,
            }
        );
    }

    #[test]
    fn empty_grammar_never_matches() {
        let empty = GrammarNode::Fan { branches: vec![] };
        let mut source = ScriptedSource::new(["on"]);
        let t = listen(&empty, &mut source);
        assert!(t.path.is_empty());
        assert!(t.timeout);
    }

    #[test]
    fn single_level_grammar_matches_one_token() {
        let g = GrammarNode::Fan {
            branches: vec![leaf("on"), leaf("off")],
        };
        let mut source = ScriptedSource::new(["off"]);
        let t = listen(&g, &mut source);
        assert_eq!(t.path, vec!["off".to_string()]);
    }
}
