//! Page geometry and the column regions clue text flows through.

/// US Letter in PDF points (72 per inch).
const LETTER_WIDTH: f32 = 612.0;
const LETTER_HEIGHT: f32 = 792.0;

const MARGIN_TOP: f32 = 54.0;
const MARGIN_LEFT: f32 = 72.0;
const MARGIN_BOTTOM: f32 = 72.0;
const MARGIN_RIGHT: f32 = 72.0;

const COLUMN_COUNT: usize = 5;
const COLUMN_GAP: f32 = 25.0;
const GRID_COLUMNS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: f32,
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    pub page_width: f32,
    pub page_height: f32,
    pub margins: Margins,
    pub column_count: usize,
    pub column_gap: f32,
    /// Number of columns the grid occupies, counted from the right edge.
    pub grid_columns: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            page_width: LETTER_WIDTH,
            page_height: LETTER_HEIGHT,
            margins: Margins {
                top: MARGIN_TOP,
                left: MARGIN_LEFT,
                bottom: MARGIN_BOTTOM,
                right: MARGIN_RIGHT,
            },
            column_count: COLUMN_COUNT,
            column_gap: COLUMN_GAP,
            grid_columns: GRID_COLUMNS,
        }
    }
}

impl LayoutConfig {
    /// Width of a single column.
    pub fn column_unit(&self) -> f32 {
        let count = self.column_count.max(1) as f32;
        let gaps = self.column_gap * (count - 1.0);
        (self.page_width - self.margins.left - self.margins.right - gaps) / count
    }

    /// Width spanned by `n` adjacent columns including the gaps between them.
    pub fn column_width(&self, n: usize) -> f32 {
        if n == 0 {
            return 0.0;
        }
        n as f32 * self.column_unit() + (n - 1) as f32 * self.column_gap
    }

    pub fn column_x(&self, index: usize) -> f32 {
        self.margins.left + index as f32 * (self.column_unit() + self.column_gap)
    }

    pub fn content_width(&self) -> f32 {
        self.page_width - self.margins.left - self.margins.right
    }

    pub fn content_bottom(&self) -> f32 {
        self.page_height - self.margins.bottom
    }

    /// Top-left corner of the grid area, flush with the right margin.
    pub fn grid_origin(&self, header_bottom: f32) -> Point {
        Point::new(
            self.page_width - self.margins.right - self.column_width(self.grid_columns),
            header_bottom,
        )
    }

    /// Builds the column table for a page whose header ends at
    /// `header_bottom` and whose grid is `grid_height` tall.
    pub fn column_bounds(&self, header_bottom: f32, grid_height: f32) -> ColumnBounds {
        let beside_grid = self.column_count.saturating_sub(self.grid_columns);
        let below_grid_top = header_bottom + grid_height + self.column_gap;
        let y_bottom = self.content_bottom();

        let columns = (0..self.column_count)
            .map(|index| ColumnBound {
                x: self.column_x(index),
                y_top: if index < beside_grid {
                    header_bottom
                } else {
                    below_grid_top
                },
                y_bottom,
            })
            .collect();

        ColumnBounds {
            columns,
            width: self.column_unit(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnBound {
    pub x: f32,
    pub y_top: f32,
    pub y_bottom: f32,
}

impl ColumnBound {
    /// False when the column starts at or below its own bottom edge.
    pub fn has_room(&self) -> bool {
        self.y_top < self.y_bottom
    }
}

/// Column regions in flow order. Fixed for the duration of a render.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnBounds {
    columns: Vec<ColumnBound>,
    width: f32,
}

impl ColumnBounds {
    pub fn new(columns: Vec<ColumnBound>, width: f32) -> Self {
        Self { columns, width }
    }

    pub fn get(&self, index: usize) -> Option<&ColumnBound> {
        self.columns.get(index)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn iter(&self) -> impl Iterator<Item = &ColumnBound> {
        self.columns.iter()
    }
}
