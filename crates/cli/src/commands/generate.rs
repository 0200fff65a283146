use std::path::Path;
use std::process;

use gesto_codegen::{generate_script, ScriptProgram};

use crate::{report_error, OutputFormat};

pub(crate) fn cmd_generate(
    program_path: &Path,
    catalog_path: &Path,
    out: Option<&Path>,
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

    let program_str = match std::fs::read_to_string(program_path) {
        Ok(s) => s,
        Err(e) => {
            let msg = format!("error reading '{}': {}", program_path.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };
    let program: ScriptProgram = match serde_json::from_str(&program_str) {
        Ok(p) => p,
        Err(e) => {
            let msg = format!("error parsing program '{}': {}", program_path.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let script = match generate_script(&program, &catalog) {
        Ok(s) => s,
        Err(e) => {
            report_error(&format!("code generation error: {}", e), output, quiet);
            process::exit(1);
        }
    };

    match out {
        Some(path) => {
            if let Err(e) = std::fs::write(path, &script) {
                let msg = format!("error writing '{}': {}", path.display(), e);
                report_error(&msg, output, quiet);
                process::exit(1);
            }
            if !quiet {
                match output {
                    OutputFormat::Text => {
                        println!("Generated script in {}", path.display());
                    }
                    OutputFormat::Json => {
                        println!(
                            "{}",
                            serde_json::json!({ "out": path.display().to_string() })
                        );
                    }
                }
            }
        }
        None => {
            print!("{}", script);
        }
    }
}
