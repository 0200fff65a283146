//! The dependent field chain.
//!
//! The block editor renders a voice-command block as a row of cascading
//! selectors. [`build_chain`] is a pure function from (catalog, current
//! selections) to that field list: no widget registry, no shared
//! counters, no mutation. Cascade invalidation falls out of purity --
//! changing an earlier selection means recomputing the chain, and fields
//! past a wildcard or an unset selection simply are not materialized.

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::grammar::Selection;
use gesto_interchange::WILDCARD;

/// One entry in a selector's dropdown. `label` is what the editor
/// shows, `value` what the selection carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    pub label: String,
    pub value: String,
}

/// One selector in the chain. `name` is stable (`FIELD_<depth>`) so the
/// editor can wire each selector to its parent by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub depth: usize,
    pub options: Vec<FieldOption>,
}

impl Field {
    fn new(depth: usize, tokens: &[String]) -> Field {
        let mut options = Vec::with_capacity(tokens.len() + 1);
        // The wildcard leads every option list and doubles as the unset
        // default.
        options.push(FieldOption {
            label: WILDCARD.to_string(),
            value: WILDCARD.to_string(),
        });
        options.extend(tokens.iter().map(|t| FieldOption {
            label: t.clone(),
            value: t.clone(),
        }));
        Field {
            name: format!("FIELD_{}", depth),
            depth,
            options,
        }
    }
}

/// Materialize the selector chain for the given catalog and selection
/// prefix.
///
/// Field 0 exists whenever the catalog is non-empty. Field `i` exists
/// only while Field `i-1` holds a concrete selection that the catalog
/// recognizes and a continuation context is defined for it; a wildcard,
/// an unset field, or a terminal context ends the chain.
pub fn build_chain(catalog: &Catalog, selections: &[Selection]) -> Vec<Field> {
    let mut fields = Vec::new();
    if catalog.is_empty() {
        return fields;
    }

    fields.push(Field::new(0, catalog.root_options()));

    let mut prefix: Vec<String> = Vec::new();
    for (depth, selection) in selections.iter().enumerate() {
        let Selection::Token(token) = selection else {
            break;
        };
        let known = catalog
            .options_at(&prefix)
            .map(|opts| opts.contains(token))
            .unwrap_or(false);
        if !known {
            break;
        }
        prefix.push(token.clone());

        match catalog.options_at(&prefix) {
            Some(next) if !next.is_empty() => {
                fields.push(Field::new(depth + 1, next));
            }
            _ => break,
        }
    }

    fields
}
