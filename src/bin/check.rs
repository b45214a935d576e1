//! Model Document Checker CLI
//!
//! Loads a definition set, validates model documents against it, and
//! prints the resulting diagnostics.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use twindl::{syntax, ModelGraph, Validator};

#[derive(Parser)]
#[command(name = "twindl-check")]
#[command(about = "Validate digital twin model documents against a definition set")]
struct Cli {
    /// Directory holding context.json, constraint.json and graph.json
    #[arg(short, long, default_value = "definitions")]
    definitions: PathBuf,

    /// Model documents to check
    #[arg(required = true)]
    models: Vec<PathBuf>,

    /// Emit problems as JSON instead of readable lines
    #[arg(long)]
    json: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(problem_count) => {
            if problem_count > 0 {
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(2);
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<usize> {
    let graph = ModelGraph::from_directory(&cli.definitions);
    anyhow::ensure!(
        graph.initialized(),
        "definition set at {} could not be loaded",
        cli.definitions.display()
    );
    let validator = Validator::new(&graph);

    let mut total = 0;
    for path in &cli.models {
        let text =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let tree =
            syntax::parse(&text).with_context(|| format!("parsing {}", path.display()))?;
        let problems = validator.validate(&tree);
        total += problems.len();

        if cli.json {
            println!("{}", serde_json::to_string_pretty(&problems)?);
            continue;
        }
        if problems.is_empty() {
            println!("{}: ok", path.display());
            continue;
        }
        for problem in &problems {
            let (line, column) = line_column(&text, problem.offset);
            println!(
                "{}:{line}:{column}: {}",
                path.display(),
                problem.message.replace('\n', " ")
            );
        }
    }
    Ok(total)
}

/// 1-based line and column of a byte offset
fn line_column(text: &str, offset: usize) -> (usize, usize) {
    let prefix = &text[..offset.min(text.len())];
    let line = prefix.matches('\n').count() + 1;
    let column = prefix
        .rsplit('\n')
        .next()
        .map_or(0, |rest| rest.chars().count())
        + 1;
    (line, column)
}
