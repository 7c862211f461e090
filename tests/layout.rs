use std::collections::HashSet;

use crossprint::draw::{Canvas, DrawCommand, TextCommand};
use crossprint::fonts::TextMeasure;
use crossprint::geometry::{LayoutConfig, Point};
use crossprint::grid::{GridGeometry, draw_grid};
use crossprint::puzzle::{Clues, GridSize, PuzzleDocument};
use crossprint::style::{PageStyle, TextStyle};
use crossprint::{RenderedPage, compose_page};
use proptest::prelude::*;

/// Deterministic stand-in for font shaping: every character is half an em.
struct HalfEm;

impl TextMeasure for HalfEm {
    fn measure_text(
        &mut self,
        text: &str,
        style: &TextStyle,
        _max_width: Option<f32>,
    ) -> (f32, f32) {
        (text.chars().count() as f32 * style.size * 0.5, style.line_advance())
    }
}

fn puzzle(across: Vec<String>, down: Vec<String>) -> PuzzleDocument {
    PuzzleDocument {
        title: Some("Weekend Warmup".to_string()),
        has_title: true,
        publisher: Some("Grid Press".to_string()),
        date: Some("6/14/2024".to_string()),
        size: GridSize { rows: 3, cols: 3 },
        grid: ["C", "A", "T", "A", ".", "O", "B", "O", "W"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        gridnums: vec![Some(1), Some(2), Some(3), Some(4), None, None, Some(5), None, None],
        circles: vec![false, false, false, false, false, false, false, false, true],
        clues: Clues { across, down },
    }
}

fn numbered(prefix: &str, count: usize) -> Vec<String> {
    (1..=count)
        .map(|n| format!("{n}. {prefix} clue {n:03}"))
        .collect()
}

fn render(puzzle: &PuzzleDocument) -> RenderedPage {
    compose_page(
        puzzle,
        &LayoutConfig::default(),
        &PageStyle::default(),
        &mut HalfEm,
    )
    .expect("page composes")
}

fn texts(page: &RenderedPage) -> Vec<&TextCommand> {
    page.commands
        .iter()
        .filter_map(|command| match command {
            DrawCommand::Text(text) => Some(text),
            _ => None,
        })
        .collect()
}

fn find<'a>(page: &'a RenderedPage, text: &str) -> Option<&'a TextCommand> {
    texts(page).into_iter().find(|t| t.text == text)
}

#[test]
fn across_clues_precede_down_clues_in_input_order() {
    let across = vec![
        "5. Zebra crossing".to_string(),
        "1. Apple pie".to_string(),
        "3. Mango".to_string(),
    ];
    let down = vec!["2. Kiwi".to_string(), "4. Banana".to_string()];
    let page = render(&puzzle(across, down));

    let order: Vec<&str> = texts(&page)
        .into_iter()
        .map(|t| t.text.as_str())
        .filter(|t| {
            ["Zebra crossing", "Apple pie", "Mango", "Kiwi", "Banana"].contains(t)
        })
        .collect();

    assert_eq!(
        order,
        vec!["Zebra crossing", "Apple pie", "Mango", "Kiwi", "Banana"]
    );

    let across_label = find(&page, "ACROSS").expect("across label");
    let down_label = find(&page, "DOWN").expect("down label");
    let banana = find(&page, "Banana").expect("banana");
    assert!(across_label.y < down_label.y);
    assert!(down_label.y < banana.y);
}

#[test]
fn overflowing_clue_starts_the_next_column() {
    let page = render(&puzzle(numbered("Across", 70), Vec::new()));
    let config = LayoutConfig::default();
    let across_label = find(&page, "ACROSS").expect("across label");

    let bodies: Vec<&TextCommand> = texts(&page)
        .into_iter()
        .filter(|t| t.text.starts_with("Across clue"))
        .collect();
    let first_in_second = bodies
        .iter()
        .position(|t| (t.x - (config.column_x(1) + 13.0)).abs() < 1e-3)
        .expect("some clue reaches the second column");

    assert!(first_in_second > 0);
    let moved = bodies[first_in_second];
    let previous = bodies[first_in_second - 1];

    // Top of the second column, level with the section label in the first.
    assert_eq!(moved.y, across_label.y);
    // The previous clue was the last one that still fit in the first column.
    let clue_height = 8.0 * 1.16 + 2.0;
    assert!(previous.y + clue_height <= config.content_bottom());
    assert!(previous.y + 2.0 * clue_height > config.content_bottom());
}

#[test]
fn flow_never_moves_backwards() {
    let page = render(&puzzle(numbered("Across", 120), numbered("Down", 60)));

    let bodies: Vec<&TextCommand> = texts(&page)
        .into_iter()
        .filter(|t| t.style == PageStyle::default().clue)
        .collect();

    for pair in bodies.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        assert!(b.x > a.x || (b.x == a.x && b.y > a.y), "{a:?} then {b:?}");
    }
}

#[test]
fn columns_below_the_grid_start_under_it() {
    let page = render(&puzzle(numbered("Across", 150), Vec::new()));
    let config = LayoutConfig::default();
    let across_label = find(&page, "ACROSS").expect("across label");
    let grid_bottom = across_label.y + config.column_width(3);

    let third_column = texts(&page)
        .into_iter()
        .find(|t| (t.x - (config.column_x(2) + 13.0)).abs() < 1e-3)
        .expect("clues reach the third column");

    assert!((third_column.y - (grid_bottom + config.column_gap)).abs() < 1e-3);
}

#[test]
fn content_past_the_last_column_is_reported_not_drawn() {
    let across = numbered("Across", 300);
    let down = numbered("Down", 100);
    let page = render(&puzzle(across, down));

    let report = page.overflow.as_ref().expect("page overflows");
    assert_eq!(report.error.columns, 5);
    assert!(report.dropped_items > 0);

    let drawn = texts(&page);
    let bodies = drawn
        .iter()
        .filter(|t| t.style == PageStyle::default().clue)
        .count();
    let labels = drawn
        .iter()
        .filter(|t| t.text == "ACROSS" || t.text == "DOWN")
        .count();
    assert_eq!(bodies + labels + report.dropped_items, 402);

    let config = LayoutConfig::default();
    assert!(
        drawn
            .iter()
            .all(|t| t.x >= config.margins.left && t.y >= config.margins.top),
        "nothing falls back to the page origin"
    );
    assert!(report.first_dropped.contains("clue"));
}

#[test]
fn tall_grid_keeps_clues_on_the_page() {
    let mut puzzle = puzzle(numbered("Across", 200), Vec::new());
    let (rows, cols) = (40, 10);
    puzzle.size = GridSize { rows, cols };
    puzzle.grid = vec!["A".to_string(); rows * cols];
    puzzle.gridnums = vec![None; rows * cols];
    puzzle.circles = Vec::new();
    let page = render(&puzzle);
    let config = LayoutConfig::default();

    let drawn = texts(&page);
    let clue_style = PageStyle::default().clue;
    let bodies: Vec<&&TextCommand> = drawn.iter().filter(|t| t.style == clue_style).collect();
    assert!(!bodies.is_empty());
    for body in &bodies {
        assert!(body.y < config.content_bottom(), "{body:?} is below the margin");
        assert!(body.x < config.column_x(2), "{body:?} is under the grid");
    }

    let report = page.overflow.as_ref().expect("page overflows");
    let labels = drawn
        .iter()
        .filter(|t| t.text == "ACROSS" || t.text == "DOWN")
        .count();
    assert_eq!(bodies.len() + labels + report.dropped_items, 202);
}

#[test]
fn section_label_that_does_not_fit_starts_the_next_column() {
    // 53 one-line clues end 9.28pt above the bottom margin once the section
    // gap is added, which leaves no room for the 11.12pt DOWN label.
    let page = render(&puzzle(numbered("Across", 53), numbered("Down", 1)));
    let config = LayoutConfig::default();
    let across_label = find(&page, "ACROSS").expect("across label");

    let first_column_x = config.column_x(0) + 13.0;
    let across_bodies: Vec<&TextCommand> = texts(&page)
        .into_iter()
        .filter(|t| t.text.starts_with("Across clue"))
        .collect();
    assert_eq!(across_bodies.len(), 53);
    assert!(across_bodies.iter().all(|t| (t.x - first_column_x).abs() < 1e-3));

    let down_label = find(&page, "DOWN").expect("down label");
    assert!((down_label.x - config.column_x(1)).abs() < 1e-3);
    assert!((down_label.y - across_label.y).abs() < 1e-3);

    let down_clue = find(&page, "Down clue 001").expect("down clue");
    assert!((down_clue.x - (config.column_x(1) + 13.0)).abs() < 1e-3);
    assert!(down_clue.y > down_label.y);
    assert!(page.overflow.is_none());
}

#[test]
fn page_without_title_keeps_subtitle_and_rule() {
    let mut puzzle = puzzle(numbered("Across", 2), numbered("Down", 2));
    puzzle.has_title = false;
    let page = render(&puzzle);

    assert!(find(&page, "Weekend Warmup").is_none());
    let subtitle = find(&page, "Grid Press — Friday, June 14, 2024").expect("subtitle");
    assert_eq!(subtitle.y, 54.0);

    let rule = page.commands.iter().find_map(|command| match command {
        DrawCommand::Line { from, to, .. } => Some((*from, *to)),
        _ => None,
    });
    let (from, to) = rule.expect("horizontal rule");
    assert_eq!(from.y, to.y);
    assert_eq!(from.x, 72.0);
    assert_eq!(to.x, 540.0);
    assert!(from.y > subtitle.y);
}

#[test]
fn title_pushes_the_subtitle_down() {
    let page = render(&puzzle(Vec::new(), Vec::new()));

    let title = find(&page, "Weekend Warmup").expect("title");
    let subtitle = find(&page, "Grid Press — Friday, June 14, 2024").expect("subtitle");
    assert_eq!(title.y, 54.0);
    assert!((subtitle.y - (54.0 + 13.0 * 1.12)).abs() < 1e-3);
}

fn grid_puzzle(rows: usize, cols: usize, blocks: Vec<bool>, numbers: Vec<Option<u32>>) -> PuzzleDocument {
    PuzzleDocument {
        title: None,
        has_title: false,
        publisher: None,
        date: None,
        size: GridSize { rows, cols },
        grid: blocks
            .iter()
            .map(|block| if *block { ".".to_string() } else { "A".to_string() })
            .collect(),
        gridnums: numbers,
        circles: Vec::new(),
        clues: Clues::default(),
    }
}

proptest! {
    #[test]
    fn every_cell_is_drawn_exactly_once(
        (rows, cols, blocks, numbers) in (1usize..=21, 1usize..=21).prop_flat_map(|(rows, cols)| {
            (
                Just(rows),
                Just(cols),
                proptest::collection::vec(any::<bool>(), rows * cols),
                proptest::collection::vec(proptest::option::of(1u32..200), rows * cols),
            )
        })
    ) {
        let puzzle = grid_puzzle(rows, cols, blocks, numbers.clone());
        let origin = Point::new(100.0, 50.0);
        let geometry = GridGeometry::new(origin, rows, cols, 270.0).expect("non-empty grid");
        let mut canvas = Canvas::new();

        draw_grid(&mut canvas, &puzzle, &geometry, &PageStyle::default());

        let cell_at = |x: f32, y: f32| {
            (
                ((y - origin.y) / geometry.cell_size).round() as usize,
                ((x - origin.x) / geometry.cell_size).round() as usize,
            )
        };

        let mut cells = HashSet::new();
        let mut patches = HashSet::new();
        let mut labels = HashSet::new();
        for command in canvas.commands() {
            match command {
                DrawCommand::Rect { rect, stroke: Some(_), .. } => {
                    prop_assert!(cells.insert(cell_at(rect.x, rect.y)));
                }
                DrawCommand::Rect { rect, stroke: None, .. } => {
                    prop_assert!(patches.insert(cell_at(rect.x, rect.y)));
                }
                DrawCommand::Text(text) => {
                    let (row, col) = cell_at(text.x - 2.0, text.y - 2.0);
                    prop_assert_eq!(
                        Some(text.text.clone()),
                        numbers[row * cols + col].map(|n| n.to_string())
                    );
                    prop_assert!(labels.insert((row, col)));
                }
                _ => {}
            }
        }

        prop_assert_eq!(cells.len(), rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                prop_assert!(cells.contains(&(row, col)));
            }
        }

        let numbered: HashSet<(usize, usize)> = numbers
            .iter()
            .enumerate()
            .filter(|(_, n)| n.is_some())
            .map(|(i, _)| (i / cols, i % cols))
            .collect();
        prop_assert_eq!(&patches, &numbered);
        prop_assert_eq!(&labels, &numbered);
    }
}
