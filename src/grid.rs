use tracing::warn;

use crate::draw::{Canvas, Rect, Stroke};
use crate::error::{Error, Result};
use crate::geometry::Point;
use crate::puzzle::{GridCell, PuzzleDocument};
use crate::style::PageStyle;

/// Square cells sized so that `cols` of them span the reserved width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    pub origin: Point,
    pub rows: usize,
    pub cols: usize,
    pub cell_size: f32,
}

impl GridGeometry {
    pub fn new(origin: Point, rows: usize, cols: usize, width: f32) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(Error::EmptyGrid { rows, cols });
        }
        Ok(Self {
            origin,
            rows,
            cols,
            cell_size: width / cols as f32,
        })
    }

    pub fn height(&self) -> f32 {
        self.cell_size * self.rows as f32
    }

    pub fn cell_rect(&self, row: usize, col: usize) -> Rect {
        Rect::new(
            self.origin.x + col as f32 * self.cell_size,
            self.origin.y + row as f32 * self.cell_size,
            self.cell_size,
            self.cell_size,
        )
    }
}

/// Draws every grid cell into `canvas`.
///
/// Per cell: border (filled when blocked), then the circle, then the number
/// patch and its label, so the number always stays legible.
pub fn draw_grid(
    canvas: &mut Canvas,
    puzzle: &PuzzleDocument,
    geometry: &GridGeometry,
    style: &PageStyle,
) {
    if puzzle.grid.len() != puzzle.cell_count() {
        warn!(
            expected = puzzle.cell_count(),
            actual = puzzle.grid.len(),
            "grid length does not match rows x cols"
        );
    }

    for cell in puzzle.cells() {
        draw_cell(canvas, &cell, geometry, style);
    }
}

fn draw_cell(canvas: &mut Canvas, cell: &GridCell, geometry: &GridGeometry, style: &PageStyle) {
    let rect = geometry.cell_rect(cell.row, cell.col);
    let size = geometry.cell_size;
    let stroke = Stroke {
        color: style.ink_color.clone(),
        width: style.grid_stroke,
    };

    let fill = cell.is_block.then_some(style.ink_color.as_str());
    canvas.rect(rect, fill, Some(stroke.clone()));

    if cell.has_circle {
        let center = Point::new(rect.x + size / 2.0, rect.y + size / 2.0);
        canvas.circle(center, size / 2.0 - style.grid_stroke, stroke);
    }

    if let Some(number) = cell.number {
        let inset = style.grid_stroke / 2.0;
        canvas.rect(
            Rect::new(rect.x + inset, rect.y + inset, size / 2.0, size / 2.0),
            Some(&style.paper_color),
            None,
        );
        canvas.text(
            rect.x + style.cell_padding,
            rect.y + style.cell_padding,
            &number.to_string(),
            &style.grid_number,
            &style.ink_color,
        );
    }
}
