use std::path::Path;
use std::process;

use crate::{report_error, OutputFormat};

pub(crate) fn cmd_validate(catalog_path: &Path, output: OutputFormat, quiet: bool) {
    let catalog = match super::load_catalog(catalog_path) {
        Ok(c) => c,
        Err(msg) => {
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let errors = catalog.validate();
    if errors.is_empty() {
        if !quiet {
            match output {
                OutputFormat::Text => {
                    println!(
                        "catalog OK: {} level(s), {} root option(s)",
                        catalog.depth(),
                        catalog.root_options().len()
                    );
                }
                OutputFormat::Json => {
                    println!("{}", serde_json::json!({ "errors": [] }));
                }
            }
        }
        return;
    }

    match output {
        OutputFormat::Text => {
            if !quiet {
                for error in &errors {
                    eprintln!("error: {}", error);
                }
            }
        }
        OutputFormat::Json => {
            let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            eprintln!("{}", serde_json::json!({ "errors": messages }));
        }
    }
    process::exit(1);
}
