use tracing::{debug, warn};

use crate::clue::{decode_entities, parse_clue};
use crate::draw::{Canvas, DrawCommand, Stroke};
use crate::error::Result;
use crate::flow::{FlowCursor, LayoutOverflow};
use crate::fonts::TextMeasure;
use crate::geometry::{ColumnBounds, LayoutConfig, Point};
use crate::grid::{GridGeometry, draw_grid};
use crate::puzzle::{Direction, PuzzleDocument};
use crate::style::{PageStyle, TextStyle};
use crate::text::{TextBlock, layout_text};

/// Clue content that did not fit on the page and was left out.
#[derive(Debug, Clone, PartialEq)]
pub struct OverflowReport {
    pub error: LayoutOverflow,
    /// Text of the first section label or clue that was dropped.
    pub first_dropped: String,
    pub dropped_items: usize,
}

/// A fully composed page, ready to serialise.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub width: f32,
    pub height: f32,
    pub background: String,
    pub commands: Vec<DrawCommand>,
    pub overflow: Option<OverflowReport>,
    pub malformed_clues: usize,
}

/// Lays out `puzzle` on a single page: header, grid, then the clue columns.
pub fn compose_page<M: TextMeasure + ?Sized>(
    puzzle: &PuzzleDocument,
    config: &LayoutConfig,
    style: &PageStyle,
    measure: &mut M,
) -> Result<RenderedPage> {
    let mut composer = PageComposer {
        puzzle,
        config,
        style,
        measure,
        canvas: Canvas::new(),
        overflow: None,
        malformed_clues: 0,
    };

    let header_bottom = composer.draw_header();

    let grid = GridGeometry::new(
        config.grid_origin(header_bottom),
        puzzle.size.rows,
        puzzle.size.cols,
        config.column_width(config.grid_columns),
    )?;
    draw_grid(&mut composer.canvas, puzzle, &grid, style);

    let bounds = config.column_bounds(header_bottom, grid.height());
    let mut cursor = FlowCursor::new(header_bottom);
    for direction in Direction::ALL {
        composer.draw_clue_section(direction, &bounds, &mut cursor);
    }

    if let Some(report) = &composer.overflow {
        warn!(
            dropped = report.dropped_items,
            first = %report.first_dropped,
            "{}", report.error
        );
    }

    Ok(RenderedPage {
        width: config.page_width,
        height: config.page_height,
        background: style.paper_color.clone(),
        commands: composer.canvas.into_commands(),
        overflow: composer.overflow,
        malformed_clues: composer.malformed_clues,
    })
}

struct PageComposer<'a, M: TextMeasure + ?Sized> {
    puzzle: &'a PuzzleDocument,
    config: &'a LayoutConfig,
    style: &'a PageStyle,
    measure: &'a mut M,
    canvas: Canvas,
    overflow: Option<OverflowReport>,
    malformed_clues: usize,
}

impl<M: TextMeasure + ?Sized> PageComposer<'_, M> {
    /// Title, subtitle and rule. Returns the y where the columns begin.
    fn draw_header(&mut self) -> f32 {
        let puzzle = self.puzzle;
        let x = self.config.margins.left;
        let width = Some(self.config.content_width());
        let mut y = self.config.margins.top;

        if let Some(title) = puzzle.display_title() {
            let block = layout_text(self.measure, title, &self.style.title, width);
            y = self.draw_block(&block, x, y, self.style.title);
        }

        let subtitle = puzzle.subtitle();
        let block = layout_text(self.measure, &subtitle, &self.style.subtitle, width);
        y = self.draw_block(&block, x, y, self.style.subtitle);

        self.canvas.line(
            Point::new(x, y),
            Point::new(self.config.page_width - self.config.margins.right, y),
            Stroke {
                color: self.style.ink_color.clone(),
                width: self.style.rule_width,
            },
        );

        y + self.style.header_gap
    }

    fn draw_clue_section(
        &mut self,
        direction: Direction,
        bounds: &ColumnBounds,
        cursor: &mut FlowCursor,
    ) {
        let puzzle = self.puzzle;
        let label = direction.label();
        let header = layout_text(self.measure, label, &self.style.section_title, None);
        if let Some(pos) = self.place(bounds, cursor, &header, label) {
            self.draw_block(&header, pos.x, pos.y, self.style.section_title);
            cursor.advance(header.height());
        }

        let number_width = self.style.clue_number_width;
        let body_width = bounds.width() - number_width;

        for raw in puzzle.clues.for_direction(direction) {
            let (number, text) = match parse_clue(raw) {
                Ok(clue) => (clue.number, clue.text),
                Err(err) => {
                    warn!(%err, "rendering clue without a number");
                    self.malformed_clues += 1;
                    (String::new(), decode_entities(raw).into_owned())
                }
            };

            let body = layout_text(self.measure, &text, &self.style.clue, Some(body_width));
            let Some(pos) = self.place(bounds, cursor, &body, raw) else {
                continue;
            };

            self.canvas.text(
                pos.x,
                pos.y,
                &number,
                &self.style.clue_number,
                &self.style.ink_color,
            );
            self.draw_block(&body, pos.x + number_width, pos.y, self.style.clue);
            cursor.advance(body.height());
        }

        if !cursor.is_exhausted(bounds) {
            cursor.advance(self.style.clue.line_advance());
        }
        debug!(
            direction = label,
            column = cursor.column(),
            y = cursor.y(),
            "finished clue section"
        );
    }

    /// Places a block through the cursor, recording it as dropped when every
    /// column is already full.
    fn place(
        &mut self,
        bounds: &ColumnBounds,
        cursor: &mut FlowCursor,
        block: &TextBlock,
        source: &str,
    ) -> Option<Point> {
        match cursor.place(bounds, block.height()) {
            Ok(pos) => Some(pos),
            Err(error) => {
                let report = self.overflow.get_or_insert_with(|| OverflowReport {
                    error,
                    first_dropped: source.to_string(),
                    dropped_items: 0,
                });
                report.dropped_items += 1;
                None
            }
        }
    }

    /// Draws each line of `block` starting at `y` and returns the y below it.
    fn draw_block(&mut self, block: &TextBlock, x: f32, y: f32, text_style: TextStyle) -> f32 {
        for (line_y, line) in block.line_offsets(y) {
            self.canvas
                .text(x, line_y, line, &text_style, &self.style.ink_color);
        }
        y + block.height()
    }
}
