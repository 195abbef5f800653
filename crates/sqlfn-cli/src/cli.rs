//! CLI argument parsing using clap.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// sqlfn - SQL-invoked function catalog
#[derive(Parser, Debug)]
#[command(name = "sqlfn")]
#[command(about = "Register SQL function definitions and print the resulting catalog", long_about = None)]
#[command(version)]
pub struct Args {
    /// JSON files holding one function definition or an array of them (reads from stdin if none provided)
    #[arg(value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "table", value_enum)]
    pub format: OutputFormat,

    /// Registry configuration file (JSON)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Add a new version when a function already exists instead of failing
    #[arg(short, long)]
    pub replace: bool,

    /// Suppress rejected definitions on stderr
    #[arg(short, long)]
    pub quiet: bool,

    /// Compact JSON output (no pretty-printing)
    #[arg(short, long)]
    pub compact: bool,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(short, long)]
    pub verbose: bool,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    Table,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["sqlfn"]);
        assert!(args.files.is_empty());
        assert_eq!(args.format, OutputFormat::Table);
        assert!(!args.replace);
        assert!(args.config.is_none());
    }

    #[test]
    fn test_flags() {
        let args = Args::parse_from([
            "sqlfn", "-f", "json", "--compact", "--replace", "-v", "a.json", "b.json",
        ]);
        assert_eq!(args.format, OutputFormat::Json);
        assert!(args.compact);
        assert!(args.replace);
        assert!(args.verbose);
        assert_eq!(args.files.len(), 2);
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        assert!(Args::try_parse_from(["sqlfn", "-f", "mermaid"]).is_err());
    }
}
