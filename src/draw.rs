use crate::geometry::Point;
use crate::style::TextStyle;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub color: String,
    pub width: f32,
}

/// A single line of text. `y` is the top of the line box, not the baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct TextCommand {
    pub x: f32,
    pub y: f32,
    pub text: String,
    pub style: TextStyle,
    pub fill: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rect {
        rect: Rect,
        fill: Option<String>,
        stroke: Option<Stroke>,
    },
    Circle {
        center: Point,
        radius: f32,
        stroke: Stroke,
    },
    Line {
        from: Point,
        to: Point,
        stroke: Stroke,
    },
    Text(TextCommand),
}

/// Append-only display list. Later commands paint over earlier ones.
#[derive(Debug, Default, Clone)]
pub struct Canvas {
    commands: Vec<DrawCommand>,
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rect(&mut self, rect: Rect, fill: Option<&str>, stroke: Option<Stroke>) {
        self.commands.push(DrawCommand::Rect {
            rect,
            fill: fill.map(str::to_string),
            stroke,
        });
    }

    pub fn circle(&mut self, center: Point, radius: f32, stroke: Stroke) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            stroke,
        });
    }

    pub fn line(&mut self, from: Point, to: Point, stroke: Stroke) {
        self.commands.push(DrawCommand::Line { from, to, stroke });
    }

    pub fn text(&mut self, x: f32, y: f32, text: &str, style: &TextStyle, fill: &str) {
        if text.is_empty() {
            return;
        }
        self.commands.push(DrawCommand::Text(TextCommand {
            x,
            y,
            text: text.to_string(),
            style: *style,
            fill: fill.to_string(),
        }));
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }
}
