use std::path::Path;
use std::process;

use gesto_core::compile;

use crate::{report_error, OutputFormat};

pub(crate) fn cmd_grammar(
    catalog_path: &Path,
    select: &str,
    sequences: bool,
    output: OutputFormat,
    quiet: bool,
) {
    let catalog = match super::load_catalog(catalog_path) {
        Ok(c) => c,
        Err(msg) => {
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let selections = super::parse_selection(select);
    let grammar = match compile(&selections, &catalog) {
        Ok(g) => g,
        Err(e) => {
            report_error(&format!("compile error: {}", e), output, quiet);
            process::exit(1);
        }
    };

    if sequences {
        let seqs = grammar.sequences();
        match output {
            OutputFormat::Text => {
                for seq in &seqs {
                    println!("{}", seq.join(" "));
                }
            }
            OutputFormat::Json => {
                println!("{}", serde_json::json!({ "sequences": seqs }));
            }
        }
        return;
    }

    match serde_json::to_string_pretty(&grammar.to_literal()) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            report_error(&format!("serialization error: {}", e), output, quiet);
            process::exit(1);
        }
    }
}
