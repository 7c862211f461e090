use thiserror::Error;

use crate::geometry::{ColumnBounds, Point};

/// Every column has been used up; nothing more can be placed on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("content does not fit in the {columns} available columns")]
pub struct LayoutOverflow {
    pub columns: usize,
}

/// Next free write position: a column index and a y offset inside it.
///
/// The cursor only moves forward. Once a column is left it is never
/// revisited.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowCursor {
    column: usize,
    y: f32,
}

impl FlowCursor {
    pub fn new(y: f32) -> Self {
        Self { column: 0, y }
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    /// Finds where a block of `height` goes. The caller draws at the
    /// returned point and then calls [`FlowCursor::advance`].
    ///
    /// A block that does not fit moves to the top of the next usable column
    /// even if it is taller than that column. Columns with no room at all
    /// (a grid reaching past the bottom margin) are skipped.
    pub fn place(&mut self, bounds: &ColumnBounds, height: f32) -> Result<Point, LayoutOverflow> {
        let overflow = LayoutOverflow {
            columns: bounds.len(),
        };

        let current = bounds.get(self.column).ok_or(overflow)?;
        if current.has_room() && self.y + height <= current.y_bottom {
            return Ok(Point::new(current.x, self.y));
        }

        loop {
            self.column += 1;
            let next = bounds.get(self.column).ok_or(overflow)?;
            if next.has_room() {
                self.y = next.y_top;
                return Ok(Point::new(next.x, self.y));
            }
        }
    }

    pub fn advance(&mut self, dy: f32) {
        self.y += dy;
    }

    pub fn is_exhausted(&self, bounds: &ColumnBounds) -> bool {
        self.column >= bounds.len()
    }
}
