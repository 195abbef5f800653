//! sqlfn CLI - SQL-invoked function catalog

use sqlfn_cli::cli;
use sqlfn_cli::config;
use sqlfn_cli::input;
use sqlfn_cli::output;
use sqlfn_cli::register;

use anyhow::{Context, Result};
use clap::Parser;
use is_terminal::IsTerminal;
use sqlfn_core::FunctionRegistry;
use std::fs;
use std::io::{self, Write};
use std::process::ExitCode;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use cli::{Args, OutputFormat};
use output::{format_json, format_rejections, format_table};

/// One or more definitions were rejected.
const EXIT_FAILURE: u8 = 1;
/// Configuration or I/O error.
const EXIT_CONFIG_ERROR: u8 = 66;

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(args) {
        Ok(has_rejections) => {
            if has_rejections {
                ExitCode::from(EXIT_FAILURE)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            eprintln!("sqlfn: error: {e:#}");
            ExitCode::from(EXIT_CONFIG_ERROR)
        }
    }
}

/// Logs go to stderr so they never mix with catalog output.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::builder()
            .with_default_directive(LevelFilter::WARN.into())
            .from_env_lossy()
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .try_init();
}

fn run(args: Args) -> Result<bool> {
    let config = config::load_config(args.config.as_deref())?;
    let sources = input::read_input(&args.files)?;

    let mut registry = FunctionRegistry::new(config);
    let rejections = register::register_sources(&mut registry, &sources, args.replace);
    tracing::info!(
        "registered {} function(s), rejected {}",
        registry.len(),
        rejections.len()
    );

    let output_str = match args.format {
        OutputFormat::Json => {
            format_json(&registry, args.compact).context("Failed to serialize catalog")?
        }
        OutputFormat::Table => {
            format_table(&registry, !args.quiet).context("Failed to format catalog")?
        }
    };

    write_output(&args.output, &output_str)?;

    if !args.quiet && !rejections.is_empty() {
        let report = format_rejections(&rejections, true).context("Failed to format rejections")?;
        eprint!("{report}");
    }

    Ok(!rejections.is_empty())
}

fn write_output(path: &Option<std::path::PathBuf>, content: &str) -> Result<()> {
    if let Some(path) = path {
        fs::write(path, content)
            .with_context(|| format!("Failed to write to {}", path.display()))?;
    } else {
        io::stdout()
            .write_all(content.as_bytes())
            .context("Failed to write to stdout")?;
        // Ensure newline at end for terminal output
        if !content.ends_with('\n') {
            println!();
        }
    }
    Ok(())
}
