//! The compiled command-grammar literal.
//!
//! A [`GrammarNode`] denotes a finite set of admissible spoken-token
//! sequences. It is built once per compile call, is immutable afterward,
//! and is embedded verbatim (as JSON or as a constructor literal in the
//! generated script's target language) for the runtime matcher to
//! consume at execution time.

use std::collections::VecDeque;

/// Reserved marker meaning "accept any catalog-valid continuation here".
///
/// A UI affordance only: it is never a legal data-level token, and both
/// catalog validation and literal deserialization reject it as one.
pub const WILDCARD: &str = "---";

/// A compiled command grammar.
///
/// - `Leaf` -- a single token with no continuation.
/// - `Branch` -- a token followed by exactly one child grammar.
/// - `Fan` -- sibling alternatives, produced when a wildcard position
///   expands to every valid continuation at that depth. Branch order is
///   catalog order and is significant (reproducible output).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrammarNode {
    Leaf {
        token: String,
    },
    Branch {
        token: String,
        child: Box<GrammarNode>,
    },
    Fan {
        branches: Vec<GrammarNode>,
    },
}

impl GrammarNode {
    /// Enumerate the set of concrete token sequences this grammar denotes,
    /// in deterministic (catalog) order.
    ///
    /// A `Branch` whose child denotes nothing contributes no sequences:
    /// the branch token alone is not admissible when a continuation was
    /// compiled below it.
    pub fn sequences(&self) -> Vec<Vec<String>> {
        match self {
            GrammarNode::Leaf { token } => vec![vec![token.clone()]],
            GrammarNode::Branch { token, child } => child
                .sequences()
                .into_iter()
                .map(|mut seq| {
                    seq.insert(0, token.clone());
                    seq
                })
                .collect(),
            GrammarNode::Fan { branches } => {
                branches.iter().flat_map(GrammarNode::sequences).collect()
            }
        }
    }

    /// True when the grammar denotes zero sequences (an empty fan, or a
    /// branch chain that only terminates in empty fans).
    pub fn denotes_nothing(&self) -> bool {
        match self {
            GrammarNode::Leaf { .. } => false,
            GrammarNode::Branch { child, .. } => child.denotes_nothing(),
            GrammarNode::Fan { branches } => branches.iter().all(GrammarNode::denotes_nothing),
        }
    }

    /// Follow a concrete token path into the grammar and return the
    /// sub-grammar below it, if any.
    ///
    /// An empty path returns the node itself. A path that matches a full
    /// admissible sequence ends at a `Leaf` with nothing below it, so
    /// `None` is returned. Used by the runtime to resume listening below
    /// an already-matched prefix.
    pub fn descend(&self, path: &[String]) -> Option<&GrammarNode> {
        let mut path: VecDeque<&String> = path.iter().collect();
        let mut node = self;
        loop {
            let Some(next) = path.pop_front() else {
                return Some(node);
            };
            node = match node {
                GrammarNode::Leaf { .. } => return None,
                GrammarNode::Branch { token, child } => {
                    if token != next {
                        return None;
                    }
                    child.as_ref()
                }
                GrammarNode::Fan { branches } => {
                    let followed = branches.iter().find_map(|b| match b {
                        GrammarNode::Leaf { token } if token == next => None,
                        GrammarNode::Branch { token, child } if token == next => {
                            Some(child.as_ref())
                        }
                        _ => None,
                    });
                    match followed {
                        Some(child) => child,
                        None => return None,
                    }
                }
            };
        }
    }

    /// Serialize to the JSON literal format.
    ///
    /// - Leaf:   `{"token": "on"}`
    /// - Branch: `{"token": "on", "child": {...}}`
    /// - Fan:    `{"branches": [...]}`
    pub fn to_literal(&self) -> serde_json::Value {
        match self {
            GrammarNode::Leaf { token } => serde_json::json!({ "token": token }),
            GrammarNode::Branch { token, child } => {
                serde_json::json!({ "token": token, "child": child.to_literal() })
            }
            GrammarNode::Fan { branches } => {
                let branches: Vec<serde_json::Value> =
                    branches.iter().map(GrammarNode::to_literal).collect();
                serde_json::json!({ "branches": branches })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn branch(token: &str, child: GrammarNode) -> GrammarNode {
        GrammarNode::Branch {
            token: token.to_string(),
            child: Box::new(child),
        }
    }

    fn leaf(token: &str) -> GrammarNode {
        GrammarNode::Leaf {
            token: token.to_string(),
        }
    }

    #[test]
    fn leaf_denotes_singleton() {
        assert_eq!(leaf("on").sequences(), vec![vec!["on".to_string()]]);
    }

    #[test]
    fn branch_prepends_token() {
        let g = branch("on", leaf("light"));
        assert_eq!(
            g.sequences(),
            vec![vec!["on".to_string(), "light".to_string()]]
        );
    }

    #[test]
    fn fan_preserves_branch_order() {
        let g = branch(
            "on",
            GrammarNode::Fan {
                branches: vec![leaf("light"), leaf("fan")],
            },
        );
        assert_eq!(
            g.sequences(),
            vec![
                vec!["on".to_string(), "light".to_string()],
                vec!["on".to_string(), "fan".to_string()],
            ]
        );
    }

    #[test]
    fn empty_fan_denotes_nothing() {
        let g = GrammarNode::Fan { branches: vec![] };
        assert!(g.sequences().is_empty());
        assert!(g.denotes_nothing());

        let g = branch("on", GrammarNode::Fan { branches: vec![] });
        assert!(g.sequences().is_empty());
        assert!(g.denotes_nothing());
    }

    #[test]
    fn descend_follows_concrete_prefix() {
        let g = GrammarNode::Fan {
            branches: vec![
                branch(
                    "on",
                    GrammarNode::Fan {
                        branches: vec![leaf("light"), leaf("fan")],
                    },
                ),
                branch("off", leaf("light")),
            ],
        };

        let sub = g.descend(&["on".to_string()]).unwrap();
        assert_eq!(
            sub.sequences(),
            vec![vec!["light".to_string()], vec!["fan".to_string()]]
        );

        assert!(g.descend(&["heater".to_string()]).is_none());
        assert!(g
            .descend(&["on".to_string(), "light".to_string()])
            .is_none());
    }

    #[test]
    fn descend_empty_path_is_identity() {
        let g = branch("on", leaf("light"));
        assert_eq!(g.descend(&[]), Some(&g));
    }
}
