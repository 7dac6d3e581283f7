use std::path::PathBuf;

use clap::Parser;
use gridbox::{RemainderPolicy, Size};

/// Lay out a sample dialog for a given screen and print its rectangles as JSON.
#[derive(Parser, Debug)]
#[command(name = "gridbox", version, about)]
pub struct Args {
    /// Screen size the size formulas are evaluated against.
    #[arg(long, value_parser = parse_size, default_value = "800x600")]
    pub screen: Size,

    /// Window size to place into. Defaults to the dialog's best size.
    #[arg(long, value_parser = parse_size)]
    pub available: Option<Size>,

    /// JSON layout config (default leaf size, remainder policy).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Extra formula variable, repeatable.
    #[arg(long = "var", value_name = "NAME=VALUE", value_parser = parse_var)]
    pub vars: Vec<(String, i64)>,

    /// Hand leftover pixels to the largest-weight track instead of dropping them.
    #[arg(long)]
    pub fill_remainder: bool,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pub pretty: bool,
}

impl Args {
    /// Remainder policy override from the command line, if any.
    pub fn remainder(&self) -> Option<RemainderPolicy> {
        self.fill_remainder.then_some(RemainderPolicy::LargestWeight)
    }
}

/// Parse `WIDTHxHEIGHT`, e.g. `1024x768`.
pub fn parse_size(s: &str) -> Result<Size, String> {
    let (width, height) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let width = width
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("bad width '{width}': {e}"))?;
    let height = height
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("bad height '{height}': {e}"))?;
    Ok(Size::new(width, height))
}

/// Parse `name=value` with an integer value.
pub fn parse_var(s: &str) -> Result<(String, i64), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{s}'"))?;
    let name = name.trim();
    let valid_name = name
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !valid_name {
        return Err(format!("invalid variable name '{name}'"));
    }
    let value = value
        .trim()
        .parse::<i64>()
        .map_err(|e| format!("bad value for '{name}': {e}"))?;
    Ok((name.to_string(), value))
}
