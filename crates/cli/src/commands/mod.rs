//! Subcommand implementations.

pub mod cart;
pub mod dashboard;
pub mod merchant;

use std::io::Write;

use crate::OutputFormat;

/// Write `value` to stdout as pretty JSON or via its `Display` impl.
fn emit<T>(value: &T, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>>
where
    T: serde::Serialize + std::fmt::Display,
{
    let mut out = std::io::stdout().lock();
    match format {
        OutputFormat::Text => write!(out, "{value}")?,
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(value)?)?,
    }
    Ok(())
}
