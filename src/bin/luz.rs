use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use luz::{transpile, ParseOptions};

/// Round-trip a source file through the transpiler.
#[derive(Parser)]
#[command(name = "luz", version, about)]
struct Cli {
    /// Source file to transpile.
    input: PathBuf,

    /// Strip type annotations, type aliases, and type functions.
    #[arg(long)]
    strip_types: bool,

    /// Skip the concrete-syntax side-table and synthesize output spacing.
    #[arg(long)]
    no_cst: bool,

    /// Emit the result as JSON instead of raw source.
    #[arg(long)]
    json: bool,
}

#[derive(serde::Serialize)]
struct JsonResult<'a> {
    text: &'a str,
    error: Option<&'a luz::TranspileError>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();

    let source = std::fs::read_to_string(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;

    let options = ParseOptions {
        capture_cst: !cli.no_cst,
    };

    match transpile(&source, options, !cli.strip_types) {
        Ok(text) => {
            if cli.json {
                let result = JsonResult {
                    text: &text,
                    error: None,
                };
                println!("{}", serde_json::to_string(&result)?);
            } else {
                print!("{text}");
            }
            Ok(())
        }
        Err(error) => {
            if cli.json {
                let result = JsonResult {
                    text: "",
                    error: Some(&error),
                };
                println!("{}", serde_json::to_string(&result)?);
                Ok(())
            } else {
                anyhow::bail!("{}: {error}", cli.input.display());
            }
        }
    }
}
