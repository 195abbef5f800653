//! Human-readable table output formatting.

use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use sqlfn_core::FunctionRegistry;
use std::fmt::{self, Write};

use crate::register::Rejection;

/// Format the registry contents as human-readable text with optional colors.
///
/// Lists the latest version of every overload. Older versions are counted but not shown.
pub fn format_table(registry: &FunctionRegistry, use_colors: bool) -> Result<String, fmt::Error> {
    let colored = use_colors && std::io::stdout().is_terminal();
    let mut out = String::new();

    write_header(&mut out, colored)?;

    let total_versions = registry.iter().count();
    let stats = format!(
        "Summary: {} functions | {} versions",
        registry.len(),
        total_versions
    );
    if colored {
        writeln!(out, "{}", stats.cyan())?;
    } else {
        writeln!(out, "{stats}")?;
    }
    writeln!(out)?;

    for entry in registry.latest() {
        let handle = entry.handle().to_string();
        if colored {
            writeln!(out, "{}", handle.bold())?;
        } else {
            writeln!(out, "{handle}")?;
        }
        writeln!(out, "  {}", entry.function())?;
        let description = entry.function().description();
        if !description.is_empty() {
            writeln!(out, "  -- {description}")?;
        }
    }

    Ok(out)
}

/// Format rejected definitions for stderr.
pub fn format_rejections(rejections: &[Rejection], use_colors: bool) -> Result<String, fmt::Error> {
    let colored = use_colors && std::io::stderr().is_terminal();
    let mut out = String::new();

    for rejection in rejections {
        let mut location = rejection.source.clone();
        if let Some(index) = rejection.index {
            write!(location, "[{index}]")?;
        }
        if let Some(name) = &rejection.name {
            write!(location, " {name}")?;
        }
        if colored {
            writeln!(out, "{} {location}: {}", "rejected".red(), rejection.message)?;
        } else {
            writeln!(out, "rejected {location}: {}", rejection.message)?;
        }
    }

    Ok(out)
}

fn write_header(out: &mut String, colored: bool) -> fmt::Result {
    let title = "SQL Function Catalog";
    let line = "═".repeat(50);

    if colored {
        writeln!(out, "{}", title.bold())?;
        writeln!(out, "{}", line.dimmed())?;
    } else {
        writeln!(out, "{title}")?;
        writeln!(out, "{line}")?;
    }
    Ok(())
}
