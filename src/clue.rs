//! Clue strings arrive as `"<number>. <text>"`, possibly carrying HTML
//! entities (`&quot;`, `&#39;`, `&eacute;`, ...).

use std::borrow::Cow;

use quick_xml::escape::resolve_html5_entity;
use thiserror::Error;
use tracing::debug;

const SEPARATOR: &str = ". ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedClue {
    /// Kept as text so labels like `"12"` or `"3A"` survive unchanged.
    pub number: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClueParseError {
    #[error("clue {0:?} has no \". \" separator after its number")]
    MissingSeparator(String),

    #[error("clue {0:?} starts with the separator and has no number")]
    EmptyNumber(String),
}

/// Decodes HTML character references one at a time. A bare `&` or an
/// unknown reference is kept verbatim without affecting its neighbours.
pub fn decode_entities(raw: &str) -> Cow<'_, str> {
    if !raw.contains('&') {
        return Cow::Borrowed(raw);
    }

    let mut decoded = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        decoded.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];

        let resolved = after
            .find(';')
            .and_then(|end| resolve_entity(&after[..end]).map(|text| (text, end + 1)));
        match resolved {
            Some((text, consumed)) => {
                decoded.push_str(&text);
                rest = &after[consumed..];
            }
            None => {
                debug!(text = raw, "keeping unrecognised '&' verbatim");
                decoded.push('&');
                rest = after;
            }
        }
    }
    decoded.push_str(rest);

    Cow::Owned(decoded)
}

/// Resolves the part between `&` and `;`: a named HTML5 entity or a
/// decimal/hex character reference.
fn resolve_entity(name: &str) -> Option<String> {
    if let Some(number) = name.strip_prefix('#') {
        let code = match number.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => number.parse::<u32>().ok()?,
        };
        return char::from_u32(code).map(String::from);
    }
    resolve_html5_entity(name).map(str::to_string)
}

/// Splits a raw clue at the first `". "`.
///
/// Anything before the separator is the number, so a body containing an
/// abbreviation like `"St. Louis"` is fine, but a number token containing
/// `". "` itself is not detectable.
pub fn parse_clue(raw: &str) -> Result<ParsedClue, ClueParseError> {
    let decoded = decode_entities(raw);

    let Some(idx) = decoded.find(SEPARATOR) else {
        return Err(ClueParseError::MissingSeparator(decoded.into_owned()));
    };
    if idx == 0 {
        return Err(ClueParseError::EmptyNumber(decoded.into_owned()));
    }

    Ok(ParsedClue {
        number: decoded[..idx].to_string(),
        text: decoded[idx + SEPARATOR.len()..].to_string(),
    })
}
