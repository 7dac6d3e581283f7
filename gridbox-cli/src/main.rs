//! gridbox - lay out a sample dialog and print the placed rectangles.

mod cli;
mod sample;

use anyhow::{Context, Result};
use clap::Parser;
use gridbox::{LayoutConfig, WindowLayout};
use gridbox_formula::Variables;
use tracing_subscriber::EnvFilter;

use crate::cli::Args;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            LayoutConfig::from_json(&json)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => LayoutConfig::default(),
    };
    if let Some(remainder) = args.remainder() {
        config.remainder = remainder;
    }

    let mut vars = Variables::screen(args.screen.width as i64, args.screen.height as i64);
    for (name, value) in &args.vars {
        vars.set(name.as_str(), *value);
    }

    let dialog = sample::settings_dialog().context("building sample dialog")?;
    let mut window = WindowLayout::new(dialog, vars, config)?;

    let best = window.best_size().context("measuring dialog")?;
    tracing::info!(width = best.width, height = best.height, "best size");

    let available = args.available.unwrap_or(best);
    let snapshot = window.layout(available).context("laying out dialog")?;

    let json = if args.pretty {
        serde_json::to_string_pretty(snapshot)?
    } else {
        serde_json::to_string(snapshot)?
    };
    println!("{json}");
    Ok(())
}
