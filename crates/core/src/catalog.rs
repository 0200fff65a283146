//! The dependent-option catalog.
//!
//! A [`Catalog`] describes, for each hierarchy depth, the set of valid
//! next tokens given the tokens chosen so far. It is supplied by the
//! device vocabulary service as a nested [`CommandTree`] and flattened
//! into per-depth context maps here; the flattened form can also be
//! exchanged directly as JSON.
//!
//! Context keys are full prefix tuples, not bare parent words: the same
//! word can occur under two different prefixes with different
//! continuations, and the tuple keying keeps those apart.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::error::CatalogError;
use gesto_interchange::WILDCARD;

/// A parent context: the ordered tuple of tokens chosen at depths
/// `0..d`. The empty tuple is the root context.
pub type Context = Vec<String>;

// ──────────────────────────────────────────────
// Vocabulary tree input
// ──────────────────────────────────────────────

/// The nested vocabulary mapping reported by the device service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandTree {
    pub branches: Vec<CommandBranch>,
}

/// One spoken word and the sub-vocabulary reachable after it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandBranch {
    pub word: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<CommandTree>,
}

// ──────────────────────────────────────────────
// Catalog
// ──────────────────────────────────────────────

/// The full dependent-option dataset, by depth and prefix context.
///
/// `levels[d]` maps each context reachable at depth `d` to its ordered
/// option list. Option order is preserved verbatim from the source tree:
/// it is the UI order and the compile tie-break order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Catalog {
    levels: Vec<BTreeMap<Context, Vec<String>>>,
}

impl Catalog {
    /// Flatten a nested vocabulary tree into per-depth context maps.
    pub fn from_tree(tree: &CommandTree) -> Catalog {
        let mut catalog = Catalog::default();
        let mut prefix = Vec::new();
        walk(&mut catalog.levels, tree, &mut prefix);
        catalog
    }

    /// Build a catalog directly from per-depth context maps (tests and
    /// pre-flattened catalog files).
    pub fn from_levels(levels: Vec<BTreeMap<Context, Vec<String>>>) -> Catalog {
        Catalog { levels }
    }

    /// Maximum grammar depth (the chain length bound).
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    /// True when no root-level options exist.
    pub fn is_empty(&self) -> bool {
        self.root_options().is_empty()
    }

    /// Root-level tokens, in catalog order.
    pub fn root_options(&self) -> &[String] {
        self.options_at(&[]).unwrap_or(&[])
    }

    /// The ordered option list at depth `prefix.len()` for the given
    /// concrete prefix, or `None` when no continuation is defined there
    /// (a terminal chain, not an error).
    pub fn options_at(&self, prefix: &[String]) -> Option<&[String]> {
        self.levels
            .get(prefix.len())?
            .get(prefix)
            .map(Vec::as_slice)
    }

    /// Run configuration checks and collect every violation.
    ///
    /// Checks: the wildcard marker must never appear as a data-level
    /// token; every context key must have the right arity for its depth
    /// and be reachable through the previous level's options; option
    /// lists must not repeat a token. Absence of a continuation context
    /// for a reachable token is legitimate and not reported.
    pub fn validate(&self) -> Vec<CatalogError> {
        let mut errors = Vec::new();

        for (depth, level) in self.levels.iter().enumerate() {
            for (context, options) in level {
                if context.len() != depth {
                    errors.push(CatalogError::DanglingContext {
                        depth,
                        context: context.clone(),
                    });
                    continue;
                }
                if depth > 0 {
                    let parent = &context[..depth - 1];
                    let reachable = self
                        .levels
                        .get(depth - 1)
                        .and_then(|l| l.get(parent))
                        .map(|opts| opts.contains(&context[depth - 1]))
                        .unwrap_or(false);
                    if !reachable {
                        errors.push(CatalogError::DanglingContext {
                            depth,
                            context: context.clone(),
                        });
                    }
                }

                let mut seen = BTreeSet::new();
                for token in options {
                    if token == WILDCARD {
                        errors.push(CatalogError::ReservedWildcard {
                            depth,
                            context: context.clone(),
                        });
                    }
                    if !seen.insert(token) {
                        errors.push(CatalogError::DuplicateToken {
                            depth,
                            context: context.clone(),
                            token: token.clone(),
                        });
                    }
                }
            }
        }

        errors
    }

    /// Serialize the flattened form.
    ///
    /// `{"levels": [[{"context": [...], "options": [...]}, ...], ...]}`
    pub fn to_json(&self) -> serde_json::Value {
        let levels: Vec<serde_json::Value> = self
            .levels
            .iter()
            .map(|level| {
                let entries: Vec<serde_json::Value> = level
                    .iter()
                    .map(|(context, options)| {
                        serde_json::json!({ "context": context, "options": options })
                    })
                    .collect();
                serde_json::Value::Array(entries)
            })
            .collect();
        serde_json::json!({ "levels": levels })
    }

    /// Deserialize the flattened form produced by [`Catalog::to_json`].
    ///
    /// Structural checks only; semantic checks live in
    /// [`Catalog::validate`].
    pub fn from_json(value: &serde_json::Value) -> Result<Catalog, CatalogError> {
        let levels_arr = value
            .get("levels")
            .and_then(|l| l.as_array())
            .ok_or_else(|| CatalogError::InvalidCatalog("missing 'levels' array".to_string()))?;

        let mut levels = Vec::with_capacity(levels_arr.len());
        for (depth, level) in levels_arr.iter().enumerate() {
            let entries = level.as_array().ok_or_else(|| {
                CatalogError::InvalidCatalog(format!("level {} is not an array", depth))
            })?;
            let mut map = BTreeMap::new();
            for entry in entries {
                let context = parse_string_array(entry.get("context"), depth, "context")?;
                let options = parse_string_array(entry.get("options"), depth, "options")?;
                map.insert(context, options);
            }
            levels.push(map);
        }
        Ok(Catalog { levels })
    }
}

fn parse_string_array(
    value: Option<&serde_json::Value>,
    depth: usize,
    field: &str,
) -> Result<Vec<String>, CatalogError> {
    let arr = value.and_then(|v| v.as_array()).ok_or_else(|| {
        CatalogError::InvalidCatalog(format!("level {} entry missing '{}' array", depth, field))
    })?;
    arr.iter()
        .map(|v| {
            v.as_str().map(str::to_owned).ok_or_else(|| {
                CatalogError::InvalidCatalog(format!(
                    "level {} entry has a non-string value in '{}'",
                    depth, field
                ))
            })
        })
        .collect()
}

fn walk(
    levels: &mut Vec<BTreeMap<Context, Vec<String>>>,
    tree: &CommandTree,
    prefix: &mut Vec<String>,
) {
    let depth = prefix.len();
    if depth >= levels.len() {
        levels.push(BTreeMap::new());
    }

    let options = levels[depth].entry(prefix.clone()).or_default();
    for branch in &tree.branches {
        if !options.contains(&branch.word) {
            options.push(branch.word.clone());
        }
    }

    for branch in &tree.branches {
        if let Some(children) = &branch.children {
            prefix.push(branch.word.clone());
            walk(levels, children, prefix);
            prefix.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn light_tree() -> CommandTree {
        CommandTree {
            branches: vec![
                CommandBranch {
                    word: "on".to_string(),
                    children: Some(CommandTree {
                        branches: vec![
                            CommandBranch {
                                word: "light".to_string(),
                                children: None,
                            },
                            CommandBranch {
                                word: "fan".to_string(),
                                children: None,
                            },
                        ],
                    }),
                },
                CommandBranch {
                    word: "off".to_string(),
                    children: Some(CommandTree {
                        branches: vec![CommandBranch {
                            word: "light".to_string(),
                            children: None,
                        }],
                    }),
                },
            ],
        }
    }

    #[test]
    fn from_tree_preserves_option_order() {
        let catalog = Catalog::from_tree(&light_tree());
        assert_eq!(catalog.depth(), 2);
        assert_eq!(catalog.root_options(), ["on", "off"]);
        assert_eq!(
            catalog.options_at(&["on".to_string()]),
            Some(&["light".to_string(), "fan".to_string()][..])
        );
        assert_eq!(
            catalog.options_at(&["off".to_string()]),
            Some(&["light".to_string()][..])
        );
    }

    #[test]
    fn absent_continuation_is_terminal() {
        let catalog = Catalog::from_tree(&light_tree());
        assert_eq!(
            catalog.options_at(&["on".to_string(), "light".to_string()]),
            None
        );
        assert_eq!(catalog.options_at(&["heater".to_string()]), None);
    }

    #[test]
    fn validate_accepts_well_formed_catalog() {
        let catalog = Catalog::from_tree(&light_tree());
        assert!(catalog.validate().is_empty());
    }

    #[test]
    fn validate_reports_dangling_context() {
        let mut level1 = BTreeMap::new();
        level1.insert(vec!["on".to_string()], vec!["light".to_string()]);
        // "ghost" never appears among the root options
        level1.insert(vec!["ghost".to_string()], vec!["light".to_string()]);
        let catalog = Catalog::from_levels(vec![
            BTreeMap::from([(vec![], vec!["on".to_string()])]),
            level1,
        ]);
        assert_eq!(
            catalog.validate(),
            vec![CatalogError::DanglingContext {
                depth: 1,
                context: vec!["ghost".to_string()],
            }]
        );
    }

    #[test]
    fn validate_rejects_wildcard_token_and_duplicates() {
        let catalog = Catalog::from_levels(vec![BTreeMap::from([(
            vec![],
            vec!["on".to_string(), "---".to_string(), "on".to_string()],
        )])]);
        let errors = catalog.validate();
        assert!(errors.contains(&CatalogError::ReservedWildcard {
            depth: 0,
            context: vec![],
        }));
        assert!(errors.contains(&CatalogError::DuplicateToken {
            depth: 0,
            context: vec![],
            token: "on".to_string(),
        }));
    }

    #[test]
    fn json_round_trip() {
        let catalog = Catalog::from_tree(&light_tree());
        let parsed = Catalog::from_json(&catalog.to_json()).unwrap();
        assert_eq!(parsed, catalog);
    }

    #[test]
    fn from_json_rejects_missing_levels() {
        let err = Catalog::from_json(&serde_json::json!({})).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidCatalog(_)));
    }

    #[test]
    fn command_tree_deserializes_from_service_json() {
        let tree: CommandTree = serde_json::from_value(serde_json::json!({
            "branches": [
                { "word": "on", "children": { "branches": [ { "word": "light" } ] } },
                { "word": "off" }
            ]
        }))
        .unwrap();
        let catalog = Catalog::from_tree(&tree);
        assert_eq!(catalog.root_options(), ["on", "off"]);
    }
}
