use std::fmt::Write;

use crate::compose::RenderedPage;
use crate::draw::{DrawCommand, Stroke, TextCommand};

/// Distance from the top of a line box to the baseline, as a fraction of
/// the font size.
const ASCENT: f32 = 0.8;

/// XML 1.0 valid char ranges:
/// - 0x09, 0x0A, 0x0D
/// - 0x20..=0xD7FF
/// - 0xE000..=0xFFFD
/// - 0x10000..=0x10FFFF
fn is_valid_xml_char(c: char) -> bool {
    matches!(
        c as u32,
        0x09 | 0x0A | 0x0D | 0x20..=0xD7FF | 0xE000..=0xFFFD | 0x10000..=0x10FFFF
    )
}

pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if !is_valid_xml_char(c) {
            continue;
        }
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Serialises the page as a standalone SVG document, one user unit per point.
pub fn to_svg(page: &RenderedPage) -> String {
    let mut body = String::new();
    for command in &page.commands {
        write_command(&mut body, command);
    }

    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" width="{w}" height="{h}"><rect width="100%" height="100%" fill="{bg}" />{body}</svg>"#,
        w = page.width,
        h = page.height,
        bg = escape_xml(&page.background),
    )
}

fn stroke_attrs(stroke: &Stroke) -> String {
    format!(
        r#" stroke="{}" stroke-width="{:.2}""#,
        escape_xml(&stroke.color),
        stroke.width
    )
}

fn write_command(out: &mut String, command: &DrawCommand) {
    // Writing to a String cannot fail.
    let _ = match command {
        DrawCommand::Rect { rect, fill, stroke } => write!(
            out,
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}"{} />"#,
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            fill.as_deref().map(escape_xml).unwrap_or_else(|| "none".to_string()),
            stroke.as_ref().map(stroke_attrs).unwrap_or_default(),
        ),
        DrawCommand::Circle {
            center,
            radius,
            stroke,
        } => write!(
            out,
            r#"<circle cx="{:.2}" cy="{:.2}" r="{:.2}" fill="none"{} />"#,
            center.x,
            center.y,
            radius,
            stroke_attrs(stroke),
        ),
        DrawCommand::Line { from, to, stroke } => write!(
            out,
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}"{} />"#,
            from.x,
            from.y,
            to.x,
            to.y,
            stroke_attrs(stroke),
        ),
        DrawCommand::Text(text) => write_text(out, text),
    };
}

fn write_text(out: &mut String, text: &TextCommand) -> std::fmt::Result {
    let weight_attr = if text.style.bold {
        " font-weight=\"700\""
    } else {
        ""
    };

    write!(
        out,
        r#"<text x="{:.2}" y="{:.2}" font-family="{}" font-size="{:.2}" fill="{}"{} xml:space="preserve">{}</text>"#,
        text.x,
        text.y + text.style.size * ASCENT,
        text.style.family.css_name(),
        text.style.size,
        escape_xml(&text.fill),
        weight_attr,
        escape_xml(&text.text),
    )
}
