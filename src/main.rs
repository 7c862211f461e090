use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use crossprint::export::{self, OutputFormat};
use crossprint::fonts::CosmicTextMeasure;
use crossprint::{LayoutConfig, PageStyle, PuzzleDocument, compose_page};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Lay out a crossword puzzle as a printable page
#[derive(Parser, Debug)]
#[command(name = "crossprint")]
#[command(version)]
#[command(about = "Render crossword puzzle JSON to a print-ready PDF, SVG or PNG page", long_about = None)]
struct Args {
    /// Puzzle JSON file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output file path (.svg or .png select those formats, anything else writes PDF)
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("{}=info", env!("CARGO_CRATE_NAME")))),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let puzzle = PuzzleDocument::from_path(&args.input)?;
    info!(
        rows = puzzle.size.rows,
        cols = puzzle.size.cols,
        across = puzzle.clues.across.len(),
        down = puzzle.clues.down.len(),
        "loaded puzzle"
    );

    let mut measure = CosmicTextMeasure::new();
    let page = compose_page(
        &puzzle,
        &LayoutConfig::default(),
        &PageStyle::default(),
        &mut measure,
    )?;
    if page.malformed_clues > 0 {
        warn!(count = page.malformed_clues, "some clues had no number");
    }

    let output = std::env::current_dir()
        .context("Failed to resolve the current directory")?
        .join(&args.output);
    let format = OutputFormat::from_path(&output);

    let data = export::encode(&page, format, measure.fallbacks())?;
    export::write_output(&output, &data)?;
    info!("{} saved to: {}", format.name(), output.display());

    Ok(())
}
