mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Gesto block-programming toolchain.
#[derive(Parser)]
#[command(name = "gesto", version, about = "Gesto block-programming toolchain")]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a vocabulary catalog file
    Validate {
        /// Path to the catalog JSON (vocabulary tree or flattened form)
        catalog: PathBuf,
    },

    /// Show the voice-command selector chain for a selection prefix
    Chain {
        /// Path to the catalog JSON
        catalog: PathBuf,
        /// Comma-separated field values, e.g. "on" or "on,---"
        #[arg(long, default_value = "")]
        select: String,
    },

    /// Compile a selection into the grammar literal
    Grammar {
        /// Path to the catalog JSON
        catalog: PathBuf,
        /// Comma-separated field values, e.g. "on,---"
        #[arg(long)]
        select: String,
        /// Print the enumerated command sequences instead of the literal
        #[arg(long)]
        sequences: bool,
    },

    /// Generate the Python action script from a block program
    Generate {
        /// Path to the program JSON file
        program: PathBuf,
        /// Path to the catalog JSON
        #[arg(long)]
        catalog: PathBuf,
        /// Write the script here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Run the reference matcher over a scripted transcript
    #[command(name = "match")]
    Match {
        /// Path to a compiled grammar literal JSON file
        grammar: PathBuf,
        /// Comma-separated transcript tokens, e.g. "on,light"
        #[arg(long)]
        tokens: String,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { catalog } => {
            commands::validate::cmd_validate(&catalog, cli.output, cli.quiet);
        }
        Commands::Chain { catalog, select } => {
            commands::chain::cmd_chain(&catalog, &select, cli.output, cli.quiet);
        }
        Commands::Grammar {
            catalog,
            select,
            sequences,
        } => {
            commands::grammar::cmd_grammar(&catalog, &select, sequences, cli.output, cli.quiet);
        }
        Commands::Generate {
            program,
            catalog,
            out,
        } => {
            commands::generate::cmd_generate(&program, &catalog, out.as_deref(), cli.output, cli.quiet);
        }
        Commands::Match { grammar, tokens } => {
            commands::match_cmd::cmd_match(&grammar, &tokens, cli.output, cli.quiet);
        }
    }
}

/// Report an error on stderr in the selected output format.
pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    match output {
        OutputFormat::Json => {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        }
        OutputFormat::Text => {
            if !quiet {
                eprintln!("error: {}", msg);
            }
        }
    }
}
