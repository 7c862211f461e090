//! Print layout for crossword puzzles.
//!
//! A [`PuzzleDocument`] is composed into a single US-Letter page: a title
//! block, the grid in the top-right columns and the clue lists flowed down
//! the remaining column regions. The page is kept as a display list and
//! exported as SVG, PNG or PDF.

pub mod clue;
pub mod compose;
pub mod draw;
pub mod error;
pub mod export;
pub mod flow;
pub mod fonts;
pub mod geometry;
pub mod grid;
pub mod puzzle;
pub mod style;
pub mod svg;
pub mod text;

pub use compose::{OverflowReport, RenderedPage, compose_page};
pub use error::{Error, Result};
pub use geometry::LayoutConfig;
pub use puzzle::PuzzleDocument;
pub use style::PageStyle;
