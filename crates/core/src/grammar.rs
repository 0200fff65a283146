//! The grammar tree compiler.
//!
//! Walks the chain of currently selected values and produces the nested
//! command-tree literal embedded in generated scripts. A concrete
//! selection contributes a single token; a wildcard fans out to every
//! catalog-valid continuation at that depth, re-derived from the live
//! catalog on every compile.
//!
//! The compiler is pure and deterministic: identical (selections,
//! catalog) inputs produce structurally identical output, including
//! branch order (catalog order).

use crate::catalog::Catalog;
use crate::error::CompileError;
use gesto_interchange::{GrammarNode, WILDCARD};

/// The user's choice at one chain position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// A concrete token.
    Token(String),
    /// Accept any catalog-valid continuation here.
    Wildcard,
}

impl Selection {
    /// Interpret a raw field value: the wildcard marker (or the empty
    /// string, the editor's unset default) is a wildcard-or-unset,
    /// anything else a concrete token.
    pub fn from_value(value: &str) -> Option<Selection> {
        match value {
            "" => None,
            WILDCARD => Some(Selection::Wildcard),
            token => Some(Selection::Token(token.to_string())),
        }
    }

    fn is_wildcard(&self) -> bool {
        matches!(self, Selection::Wildcard)
    }
}

/// Normalize raw field values into a selection vector.
///
/// Only a contiguous prefix ending at the first wildcard, the first
/// unset field, or end-of-chain is meaningful; everything after it is
/// dropped (trailing stale values from a cleared chain are ignored).
pub fn normalize(values: &[String]) -> Vec<Selection> {
    let mut selections = Vec::new();
    for value in values {
        match Selection::from_value(value) {
            None => break,
            Some(selection) => {
                let stop = selection.is_wildcard();
                selections.push(selection);
                if stop {
                    break;
                }
            }
        }
    }
    selections
}

/// Compile a selection vector against a catalog into the grammar
/// literal.
///
/// The result denotes exactly the set of token sequences reachable by
/// substituting, at each wildcard position, every token the catalog
/// permits there given the concrete prefix chosen so far. An empty
/// selection vector, or a grammar that denotes zero sequences, is
/// reported as [`CompileError::EmptyGrammar`] -- never compiled into a
/// script that would listen on nothing.
pub fn compile(selections: &[Selection], catalog: &Catalog) -> Result<GrammarNode, CompileError> {
    if selections.is_empty() {
        return Err(CompileError::EmptyGrammar);
    }

    let mut prefix = Vec::new();
    let node = compile_at(selections, catalog, 0, &mut prefix)?;

    if node.denotes_nothing() {
        return Err(CompileError::EmptyGrammar);
    }
    Ok(node)
}

fn compile_at(
    selections: &[Selection],
    catalog: &Catalog,
    depth: usize,
    prefix: &mut Vec<String>,
) -> Result<GrammarNode, CompileError> {
    match &selections[depth] {
        Selection::Token(token) => {
            let known = catalog
                .options_at(prefix)
                .map(|opts| opts.contains(token))
                .unwrap_or(false);
            if !known {
                return Err(CompileError::UnknownToken {
                    depth,
                    token: token.clone(),
                });
            }
            attach(selections, catalog, depth, prefix, token.clone())
        }
        Selection::Wildcard => {
            // Re-query the live catalog for the fan-out; an absent or
            // empty context yields a zero-branch fan, resolved to
            // EmptyGrammar at the root. The marker itself is never a
            // token, even in an unvalidated catalog.
            let options: Vec<String> = catalog
                .options_at(prefix)
                .map(|opts| {
                    opts.iter()
                        .filter(|t| t.as_str() != WILDCARD)
                        .cloned()
                        .collect()
                })
                .unwrap_or_default();
            let mut branches = Vec::with_capacity(options.len());
            for token in options {
                branches.push(attach(selections, catalog, depth, prefix, token)?);
            }
            Ok(GrammarNode::Fan { branches })
        }
    }
}

/// Emit the node for `token` at `depth`, recursing into the remaining
/// suffix of the selection vector when one exists.
fn attach(
    selections: &[Selection],
    catalog: &Catalog,
    depth: usize,
    prefix: &mut Vec<String>,
    token: String,
) -> Result<GrammarNode, CompileError> {
    if depth + 1 < selections.len() {
        prefix.push(token.clone());
        let child = compile_at(selections, catalog, depth + 1, prefix)?;
        prefix.pop();
        Ok(GrammarNode::Branch {
            token,
            child: Box::new(child),
        })
    } else {
        Ok(GrammarNode::Leaf { token })
    }
}
