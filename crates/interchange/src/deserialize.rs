//! Deserialization from grammar literals into [`GrammarNode`].
//!
//! The main entry point is [`from_literal`], which takes a
//! `&serde_json::Value` and produces a [`GrammarNode`]. The literal is
//! the exact structure [`GrammarNode::to_literal`] emits, so any
//! compiled grammar round-trips.

use crate::types::{GrammarNode, WILDCARD};
use std::fmt;

/// Errors during grammar literal deserialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterchangeError {
    /// A node object has neither a `token` nor a `branches` field.
    MissingField { field: String },
    /// The reserved wildcard marker appeared as a data-level token.
    ReservedToken { token: String },
    /// The literal structure is invalid.
    InvalidLiteral(String),
}

impl fmt::Display for InterchangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterchangeError::MissingField { field } => {
                write!(f, "grammar node missing required field: '{}'", field)
            }
            InterchangeError::ReservedToken { token } => {
                write!(f, "reserved marker '{}' is not a legal token", token)
            }
            InterchangeError::InvalidLiteral(msg) => {
                write!(f, "invalid grammar literal: {}", msg)
            }
        }
    }
}

impl std::error::Error for InterchangeError {}

/// Deserialize a grammar literal into a [`GrammarNode`].
///
/// Dispatches on the fields present: `branches` means a Fan, `token`
/// with `child` means a Branch, a bare `token` means a Leaf.
pub fn from_literal(literal: &serde_json::Value) -> Result<GrammarNode, InterchangeError> {
    let obj = literal.as_object().ok_or_else(|| {
        InterchangeError::InvalidLiteral(format!("expected an object, got: {}", literal))
    })?;

    if let Some(branches) = obj.get("branches") {
        let arr = branches.as_array().ok_or_else(|| {
            InterchangeError::InvalidLiteral("'branches' must be an array".to_string())
        })?;
        let branches = arr
            .iter()
            .map(from_literal)
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(GrammarNode::Fan { branches });
    }

    let token = obj
        .get("token")
        .and_then(|t| t.as_str())
        .ok_or_else(|| InterchangeError::MissingField {
            field: "token".to_string(),
        })?
        .to_string();

    if token == WILDCARD {
        return Err(InterchangeError::ReservedToken { token });
    }

    match obj.get("child") {
        Some(child) => Ok(GrammarNode::Branch {
            token,
            child: Box::new(from_literal(child)?),
        }),
        None => Ok(GrammarNode::Leaf { token }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_compiled_grammar() {
        let g = GrammarNode::Branch {
            token: "on".to_string(),
            child: Box::new(GrammarNode::Fan {
                branches: vec![
                    GrammarNode::Leaf {
                        token: "light".to_string(),
                    },
                    GrammarNode::Leaf {
                        token: "fan".to_string(),
                    },
                ],
            }),
        };
        let parsed = from_literal(&g.to_literal()).unwrap();
        assert_eq!(parsed, g);
        assert_eq!(parsed.sequences(), g.sequences());
    }

    #[test]
    fn rejects_wildcard_as_token() {
        let literal = serde_json::json!({ "token": "---" });
        assert_eq!(
            from_literal(&literal),
            Err(InterchangeError::ReservedToken {
                token: "---".to_string()
            })
        );
    }

    #[test]
    fn rejects_missing_token() {
        let literal = serde_json::json!({ "child": { "token": "x" } });
        assert!(matches!(
            from_literal(&literal),
            Err(InterchangeError::MissingField { .. })
        ));
    }

    #[test]
    fn rejects_non_object() {
        assert!(matches!(
            from_literal(&serde_json::json!(["on"])),
            Err(InterchangeError::InvalidLiteral(_))
        ));
    }

    #[test]
    fn parses_empty_fan() {
        let literal = serde_json::json!({ "branches": [] });
        let parsed = from_literal(&literal).unwrap();
        assert!(parsed.denotes_nothing());
    }
}
