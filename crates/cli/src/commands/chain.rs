use std::path::Path;
use std::process;

use gesto_core::build_chain;

use crate::{report_error, OutputFormat};

pub(crate) fn cmd_chain(catalog_path: &Path, select: &str, output: OutputFormat, quiet: bool) {
    let catalog = match super::load_catalog(catalog_path) {
        Ok(c) => c,
        Err(msg) => {
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let selections = super::parse_selection(select);
    let fields = build_chain(&catalog, &selections);

    match output {
        OutputFormat::Text => {
            if fields.is_empty() {
                println!("no fields (empty catalog)");
                return;
            }
            for field in &fields {
                let options: Vec<&str> =
                    field.options.iter().map(|o| o.label.as_str()).collect();
                println!("{}: {}", field.name, options.join(" | "));
            }
        }
        OutputFormat::Json => match serde_json::to_string_pretty(&fields) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                report_error(&format!("serialization error: {}", e), output, quiet);
                process::exit(1);
            }
        },
    }
}
