use crate::fonts::TextMeasure;
use crate::style::TextStyle;

/// Wrapped text ready to draw: the lines in order plus the vertical metrics
/// needed to advance past it.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub lines: Vec<String>,
    pub line_advance: f32,
    pub paragraph_gap: f32,
}

impl TextBlock {
    pub fn height(&self) -> f32 {
        self.lines.len() as f32 * self.line_advance + self.paragraph_gap
    }

    /// Top y of each line when the block starts at `y`.
    pub fn line_offsets(&self, y: f32) -> impl Iterator<Item = (f32, &str)> + '_ {
        self.lines
            .iter()
            .enumerate()
            .map(move |(idx, line)| (y + idx as f32 * self.line_advance, line.as_str()))
    }
}

/// Greedy word wrap of `text` at `max_width`. Explicit newlines start a new
/// line; a word wider than the whole line is broken between characters.
pub fn layout_text<M: TextMeasure + ?Sized>(
    measure: &mut M,
    text: &str,
    style: &TextStyle,
    max_width: Option<f32>,
) -> TextBlock {
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        match max_width {
            Some(width) => wrap_paragraph(measure, paragraph, style, width, &mut lines),
            None => lines.push(paragraph.trim().to_string()),
        }
    }

    TextBlock {
        lines,
        line_advance: style.line_advance(),
        paragraph_gap: style.paragraph_gap,
    }
}

fn wrap_paragraph<M: TextMeasure + ?Sized>(
    measure: &mut M,
    paragraph: &str,
    style: &TextStyle,
    max_width: f32,
    out: &mut Vec<String>,
) {
    let mut current = String::new();

    for word in paragraph.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };

        let (candidate_width, _) = measure.measure_text(&candidate, style, None);
        if candidate_width <= max_width {
            current = candidate;
            continue;
        }

        if !current.is_empty() {
            out.push(std::mem::take(&mut current));
        }

        let (word_width, _) = measure.measure_text(word, style, None);
        if word_width <= max_width {
            current = word.to_string();
        } else {
            current = break_word(measure, word, style, max_width, out);
        }
    }

    if !current.is_empty() {
        out.push(current);
    }
}

/// Pushes every full-width chunk of `word` and returns the remainder.
fn break_word<M: TextMeasure + ?Sized>(
    measure: &mut M,
    word: &str,
    style: &TextStyle,
    max_width: f32,
    out: &mut Vec<String>,
) -> String {
    let mut current = String::new();
    for ch in word.chars() {
        let mut candidate = current.clone();
        candidate.push(ch);

        let (candidate_width, _) = measure.measure_text(&candidate, style, None);
        if candidate_width > max_width && !current.is_empty() {
            out.push(current);
            current = ch.to_string();
        } else {
            current = candidate;
        }
    }
    current
}
