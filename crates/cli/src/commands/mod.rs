//! One module per subcommand, plus shared input loading.

pub(crate) mod chain;
pub(crate) mod generate;
pub(crate) mod grammar;
pub(crate) mod match_cmd;
pub(crate) mod validate;

use std::path::Path;

use gesto_core::{normalize, Catalog, CommandTree, Selection};

/// Load a catalog from either input form: the device service's nested
/// vocabulary tree (`{"branches": [...]}`) or the flattened catalog
/// (`{"levels": [...]}`).
pub(crate) fn load_catalog(path: &Path) -> Result<Catalog, String> {
    let json_str = std::fs::read_to_string(path)
        .map_err(|e| format!("error reading '{}': {}", path.display(), e))?;
    let value: serde_json::Value = serde_json::from_str(&json_str)
        .map_err(|e| format!("error parsing JSON in '{}': {}", path.display(), e))?;

    if value.get("branches").is_some() {
        let tree: CommandTree = serde_json::from_value(value)
            .map_err(|e| format!("invalid vocabulary tree in '{}': {}", path.display(), e))?;
        Ok(Catalog::from_tree(&tree))
    } else {
        Catalog::from_json(&value).map_err(|e| format!("{}", e))
    }
}

/// Parse a comma-separated `--select` value into a selection vector.
pub(crate) fn parse_selection(select: &str) -> Vec<Selection> {
    if select.is_empty() {
        return Vec::new();
    }
    let values: Vec<String> = select.split(',').map(|s| s.trim().to_string()).collect();
    normalize(&values)
}
