use std::path::PathBuf;

use thiserror::Error;

/// Fatal failures of a render run. Recoverable layout conditions
/// ([`crate::flow::LayoutOverflow`], [`crate::clue::ClueParseError`]) are
/// handled inside the composer instead.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to read puzzle file {}: {source}", path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse puzzle JSON: {0}")]
    ParseInput(#[from] serde_json::Error),

    #[error("Puzzle grid must have at least one row and one column (got {rows}x{cols})")]
    EmptyGrid { rows: usize, cols: usize },

    #[error("Failed to parse SVG: {0}")]
    Svg(String),

    #[error("Failed to encode PNG: {0}")]
    Png(String),

    #[error("Failed to convert SVG to PDF: {0}")]
    Pdf(String),

    #[error("Failed to write {}: {source}", path.display())]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
