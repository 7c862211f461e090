use std::path::Path;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::{Error, Result};

/// Grid symbol marking a blocked (black) square.
pub const BLOCK: &str = ".";

const DATE_INPUT_FORMATS: &[&str] = &["%m/%d/%Y", "%Y-%m-%d", "%Y/%m/%d"];
const FULL_DATE_FORMAT: &str = "%A, %B %-d, %Y";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct GridSize {
    pub rows: usize,
    pub cols: usize,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Clues {
    pub across: Vec<String>,
    pub down: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Across,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::Across, Direction::Down];

    pub fn label(self) -> &'static str {
        match self {
            Direction::Across => "ACROSS",
            Direction::Down => "DOWN",
        }
    }
}

impl Clues {
    pub fn for_direction(&self, direction: Direction) -> &[String] {
        match direction {
            Direction::Across => &self.across,
            Direction::Down => &self.down,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PuzzleDocument {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, rename = "hastitle", deserialize_with = "truthy")]
    pub has_title: bool,
    #[serde(default)]
    pub publisher: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    pub size: GridSize,
    pub grid: Vec<String>,
    #[serde(default, deserialize_with = "grid_numbers")]
    pub gridnums: Vec<Option<u32>>,
    #[serde(default, deserialize_with = "circle_flags")]
    pub circles: Vec<bool>,
    pub clues: Clues,
}

/// One square of the grid, derived from the parallel `grid`, `circles` and
/// `gridnums` sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    pub index: usize,
    pub row: usize,
    pub col: usize,
    pub is_block: bool,
    pub has_circle: bool,
    pub number: Option<u32>,
}

impl PuzzleDocument {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| Error::ReadInput {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn cell_count(&self) -> usize {
        self.size.rows * self.size.cols
    }

    /// Cells in row-major order. Grid entries past `rows * cols` are ignored.
    pub fn cells(&self) -> impl Iterator<Item = GridCell> + '_ {
        let cols = self.size.cols.max(1);
        self.grid
            .iter()
            .take(self.cell_count())
            .enumerate()
            .map(move |(index, symbol)| GridCell {
                index,
                row: index / cols,
                col: index % cols,
                is_block: symbol == BLOCK,
                has_circle: self.circles.get(index).copied().unwrap_or(false),
                number: self.gridnums.get(index).copied().flatten(),
            })
    }

    /// Title text, only when the document asks for it to be shown.
    pub fn display_title(&self) -> Option<&str> {
        if !self.has_title {
            return None;
        }
        self.title.as_deref().filter(|title| !title.trim().is_empty())
    }

    /// `"<publisher> — <full date>"`, dropping whichever half is missing.
    pub fn subtitle(&self) -> String {
        let publisher = self
            .publisher
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty());
        let date = self.date.as_deref().and_then(format_full_date);

        match (publisher, date) {
            (Some(publisher), Some(date)) => format!("{publisher} — {date}"),
            (Some(publisher), None) => publisher.to_string(),
            (None, Some(date)) => date,
            (None, None) => String::new(),
        }
    }
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_INPUT_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

/// Formats a date like `"Friday, December 5, 2025"`.
pub fn format_full_date(raw: &str) -> Option<String> {
    parse_date(raw).map(|date| date.format(FULL_DATE_FORMAT).to_string())
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn truthy<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(is_truthy(&value))
}

fn circle_flags<'de, D>(deserializer: D) -> std::result::Result<Vec<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Option::<Vec<Value>>::deserialize(deserializer)?;
    Ok(values
        .unwrap_or_default()
        .iter()
        .map(is_truthy)
        .collect())
}

fn grid_numbers<'de, D>(deserializer: D) -> std::result::Result<Vec<Option<u32>>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Option::<Vec<Value>>::deserialize(deserializer)?;
    Ok(values
        .unwrap_or_default()
        .iter()
        .map(|value| {
            let number = match value {
                Value::Number(n) => n.as_u64(),
                Value::String(s) => s.trim().parse::<u64>().ok(),
                _ => None,
            };
            number
                .filter(|n| *n > 0)
                .and_then(|n| u32::try_from(n).ok())
        })
        .collect())
}
