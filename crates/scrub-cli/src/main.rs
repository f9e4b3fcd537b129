//! scrub - Main Entry Point
//!
//! Reads HTML from a file or stdin and writes the sanitized, linked
//! markup to stdout. Logs go to stderr.

use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use scrub_sanitize::{LinkMode, Pipeline, SanitizeConfig};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "scrub", version, about = "Sanitize untrusted HTML and link issue references")]
struct Args {
    /// Input file; stdin when omitted or "-"
    input: Option<PathBuf>,

    /// JSON settings file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Issue prefix, overrides the config file
    #[arg(long)]
    prefix: Option<String>,

    /// Only link references found in text, never inside attributes
    #[arg(long, conflicts_with = "no_links")]
    text_nodes: bool,

    /// Skip reference linking
    #[arg(long)]
    no_links: bool,
}

fn read_input(input: Option<&PathBuf>) -> anyhow::Result<String> {
    match input {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SanitizeConfig::from_path(path)?,
        None => SanitizeConfig::default(),
    };
    if let Some(prefix) = args.prefix {
        config.issue_prefix = prefix;
    }
    if args.text_nodes {
        config.link_mode = LinkMode::TextNodes;
    }
    if args.no_links {
        config.link_mode = LinkMode::Disabled;
    }

    let pipeline = Pipeline::new(&config).context("invalid settings")?;
    let html = read_input(args.input.as_ref())?;
    tracing::info!(bytes = html.len(), prefix = %config.issue_prefix, "sanitizing input");

    let output = pipeline.render(&html);

    let mut stdout = io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.write_all(b"\n")?;
    Ok(())
}
