//! `specgraph` command line: compile, merge and combine OpenAPI documents.

use clap::{Parser, Subcommand};
use serde_json::Value;
use specgraph::{Error, ErrorKind, ErrorOrigin};
use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "specgraph",
    about = "Compile multi-file OpenAPI documents into a relational model graph",
    version
)]
struct Cli {
    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence.
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Merge and compile a document, writing the model graph as JSON.
    Compile {
        /// Root OpenAPI document (.json, .yaml or .yml).
        input: PathBuf,

        /// Output file; stdout when omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Option file; defaults to specgraph.toml next to the input.
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Inline every cross-file reference into one document.
    Merge {
        input: PathBuf,

        /// Output file; the format follows its extension.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Rebuild a master document from several source documents.
    MergeSources {
        master: PathBuf,

        #[arg(required = true)]
        sources: Vec<PathBuf>,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

// run
fn run(command: Command) -> Result<(), Error> {
    match command {
        Command::Compile {
            input,
            output,
            config,
        } => {
            let options = specgraph::options_for(&input, config.as_deref())?;
            let graph = specgraph::compile(&input, &options)?;

            info!(
                entities = graph.entities.len(),
                join_tables = graph.join_tables.len(),
                endpoints = graph.endpoints.len(),
                "compiled"
            );

            match output {
                Some(path) => specgraph::write_graph(&path, &graph),
                None => {
                    let text = graph.to_json().map_err(internal)?;
                    println!("{text}");
                    Ok(())
                }
            }
        }
        Command::Merge { input, output } => {
            let merged = specgraph::merge_file(&input)?;
            info!(inlined = merged.inlined.len(), "merged");

            emit(output.as_deref(), &merged.document)
        }
        Command::MergeSources {
            master,
            sources,
            output,
        } => {
            let merged = specgraph::merge_sources(&master, &sources)?;

            emit(output.as_deref(), &merged)
        }
    }
}

// emit
fn emit(output: Option<&Path>, value: &Value) -> Result<(), Error> {
    match output {
        Some(path) => specgraph::write_document(path, value),
        None => {
            let text = serde_json::to_string_pretty(value).map_err(internal)?;
            println!("{text}");
            Ok(())
        }
    }
}

// internal
fn internal(err: serde_json::Error) -> Error {
    Error::new(ErrorKind::Internal, ErrorOrigin::Interface, err.to_string())
}
