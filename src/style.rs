const INK: &str = "#000000";
const PAPER: &str = "#ffffff";

const TITLE_SIZE: f32 = 13.0;
const SUBTITLE_SIZE: f32 = 11.0;
const SECTION_TITLE_SIZE: f32 = 7.0;
const SECTION_TITLE_GAP: f32 = 3.0;
const CLUE_SIZE: f32 = 8.0;
const CLUE_GAP: f32 = 2.0;
const CLUE_NUMBER_SIZE: f32 = 7.0;
const GRID_NUMBER_SIZE: f32 = 6.0;

const SERIF_LINE_HEIGHT: f32 = 1.12;
const SANS_LINE_HEIGHT: f32 = 1.16;

const GRID_STROKE: f32 = 0.5;
const CELL_PADDING: f32 = 2.0;
const RULE_WIDTH: f32 = 1.0;
const HEADER_GAP: f32 = 20.0;
const CLUE_NUMBER_WIDTH: f32 = 13.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFamily {
    Serif,
    SansSerif,
}

impl FontFamily {
    pub fn css_name(self) -> &'static str {
        match self {
            FontFamily::Serif => "serif",
            FontFamily::SansSerif => "sans-serif",
        }
    }
}

/// Font selection plus the vertical metrics used by the flow layout.
///
/// `line_height` is a multiple of `size`; `paragraph_gap` is extra space in
/// points appended after the last line of a block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub family: FontFamily,
    pub size: f32,
    pub bold: bool,
    pub line_height: f32,
    pub paragraph_gap: f32,
}

impl TextStyle {
    pub fn serif(size: f32, bold: bool) -> Self {
        Self {
            family: FontFamily::Serif,
            size,
            bold,
            line_height: SERIF_LINE_HEIGHT,
            paragraph_gap: 0.0,
        }
    }

    pub fn sans(size: f32, bold: bool) -> Self {
        Self {
            family: FontFamily::SansSerif,
            size,
            bold,
            line_height: SANS_LINE_HEIGHT,
            paragraph_gap: 0.0,
        }
    }

    pub fn with_paragraph_gap(mut self, gap: f32) -> Self {
        self.paragraph_gap = gap;
        self
    }

    pub fn line_advance(&self) -> f32 {
        self.size * self.line_height
    }
}

/// Colours, text styles and stroke metrics of the printed page.
#[derive(Debug, Clone)]
pub struct PageStyle {
    pub ink_color: String,
    pub paper_color: String,

    pub title: TextStyle,
    pub subtitle: TextStyle,
    pub section_title: TextStyle,
    pub clue: TextStyle,
    pub clue_number: TextStyle,
    pub grid_number: TextStyle,

    pub grid_stroke: f32,
    pub cell_padding: f32,
    pub rule_width: f32,
    pub header_gap: f32,
    pub clue_number_width: f32,
}

impl Default for PageStyle {
    fn default() -> Self {
        Self {
            ink_color: INK.to_string(),
            paper_color: PAPER.to_string(),

            title: TextStyle::serif(TITLE_SIZE, true),
            subtitle: TextStyle::serif(SUBTITLE_SIZE, true),
            section_title: TextStyle::sans(SECTION_TITLE_SIZE, true)
                .with_paragraph_gap(SECTION_TITLE_GAP),
            clue: TextStyle::sans(CLUE_SIZE, false).with_paragraph_gap(CLUE_GAP),
            clue_number: TextStyle::sans(CLUE_NUMBER_SIZE, true),
            grid_number: TextStyle::sans(GRID_NUMBER_SIZE, false),

            grid_stroke: GRID_STROKE,
            cell_padding: CELL_PADDING,
            rule_width: RULE_WIDTH,
            header_gap: HEADER_GAP,
            clue_number_width: CLUE_NUMBER_WIDTH,
        }
    }
}
