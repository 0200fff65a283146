use std::path::Path;
use std::process;

use gesto_eval::{listen, ScriptedSource};
use gesto_interchange::from_literal;

use crate::{report_error, OutputFormat};

pub(crate) fn cmd_match(grammar_path: &Path, tokens: &str, output: OutputFormat, quiet: bool) {
    let json_str = match std::fs::read_to_string(grammar_path) {
        Ok(s) => s,
        Err(e) => {
            let msg = format!("error reading '{}': {}", grammar_path.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };
    let literal: serde_json::Value = match serde_json::from_str(&json_str) {
        Ok(v) => v,
        Err(e) => {
            let msg = format!("error parsing JSON in '{}': {}", grammar_path.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };
    let grammar = match from_literal(&literal) {
        Ok(g) => g,
        Err(e) => {
            report_error(&format!("invalid grammar: {}", e), output, quiet);
            process::exit(1);
        }
    };

    let transcript: Vec<String> = tokens
        .split(',')
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();
    let mut source = ScriptedSource::new(transcript);
    let transcription = listen(&grammar, &mut source);

    // Not matching is a routine outcome, not a failure exit.
    match output {
        OutputFormat::Text => {
            if transcription.path.is_empty() {
                println!("No command recognized");
            } else {
                println!("Command found: {}", transcription.path.join(" "));
            }
        }
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "text": transcription.text,
                    "path": transcription.path,
                    "timeout": transcription.timeout,
                })
            );
        }
    }
}
