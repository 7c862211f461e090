use std::collections::HashMap;
use std::path::Path;

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping, Weight};
use tracing::debug;

use crate::style::{FontFamily, TextStyle};

/// Fonts in this directory (relative to the working directory) are loaded
/// next to the system fonts for both measuring and exporting.
pub const LOCAL_FONTS_DIR: &str = "fonts";

/// Concrete faces behind the generic `serif` and `sans-serif` families.
///
/// Measuring and exporting each own a font database, so the choice is made
/// once from the measuring database and then applied to the export ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FallbackFamilies {
    pub sans: Option<String>,
    pub serif: Option<String>,
}

impl FallbackFamilies {
    /// Picks the first family whose name says "sans", and the first other
    /// family whose name says "serif". Either falls back to the first
    /// family seen.
    pub fn pick<'a>(families: impl IntoIterator<Item = &'a str>) -> Self {
        let mut sans: Option<&str> = None;
        let mut serif: Option<&str> = None;
        let mut first: Option<&str> = None;

        for family in families {
            first.get_or_insert(family);

            let lower = family.to_ascii_lowercase();
            if lower.contains("sans") {
                sans.get_or_insert(family);
            } else if lower.contains("serif") {
                serif.get_or_insert(family);
            }
        }

        Self {
            sans: sans.or(first).map(str::to_string),
            serif: serif.or(first).map(str::to_string),
        }
    }
}

#[derive(Hash, PartialEq, Eq, Clone)]
struct MeasureKey {
    text: String,
    family: FontFamily,
    font_size_bits: u32,
    line_height_bits: u32,
    is_bold: bool,
    max_width_bits: Option<u32>,
}

/// Rendered extent of a string. Returns `(width, height)` in points; with
/// `max_width` the text wraps and the height covers every wrapped line.
pub trait TextMeasure {
    fn measure_text(&mut self, text: &str, style: &TextStyle, max_width: Option<f32>)
    -> (f32, f32);
}

pub struct CosmicTextMeasure {
    font_system: FontSystem,
    fallbacks: FallbackFamilies,
    cache: HashMap<MeasureKey, (f32, f32)>,
}

impl CosmicTextMeasure {
    pub fn new() -> Self {
        let mut font_system = FontSystem::new();
        let db = font_system.db_mut();

        let local_fonts = Path::new(LOCAL_FONTS_DIR);
        if local_fonts.is_dir() {
            db.load_fonts_dir(local_fonts);
        }

        let fallbacks = FallbackFamilies::pick(
            db.faces()
                .flat_map(|face| face.families.iter().map(|(name, _)| name.as_str())),
        );
        if let Some(family) = &fallbacks.sans {
            db.set_sans_serif_family(family.clone());
        }
        if let Some(family) = &fallbacks.serif {
            db.set_serif_family(family.clone());
        }
        debug!(sans = ?fallbacks.sans, serif = ?fallbacks.serif, "measuring fonts");

        Self {
            font_system,
            fallbacks,
            cache: HashMap::new(),
        }
    }

    /// Faces used for measuring; pass these to the exporter so the page is
    /// drawn with the fonts it was laid out with.
    pub fn fallbacks(&self) -> &FallbackFamilies {
        &self.fallbacks
    }
}

impl TextMeasure for CosmicTextMeasure {
    fn measure_text(
        &mut self,
        text: &str,
        style: &TextStyle,
        max_width: Option<f32>,
    ) -> (f32, f32) {
        let key = MeasureKey {
            text: text.to_string(),
            family: style.family,
            font_size_bits: style.size.to_bits(),
            line_height_bits: style.line_height.to_bits(),
            is_bold: style.bold,
            max_width_bits: max_width.map(f32::to_bits),
        };

        if let Some(cached) = self.cache.get(&key) {
            return *cached;
        }

        let mut buffer = Buffer::new(
            &mut self.font_system,
            Metrics {
                font_size: style.size,
                line_height: style.line_advance(),
            },
        );

        buffer.set_size(&mut self.font_system, max_width, None);

        let attrs = Attrs::new()
            .family(match style.family {
                FontFamily::Serif => Family::Serif,
                FontFamily::SansSerif => Family::SansSerif,
            })
            .weight(if style.bold {
                Weight::BOLD
            } else {
                Weight::NORMAL
            });

        buffer.set_text(&mut self.font_system, text, &attrs, Shaping::Advanced, None);

        let mut total_width: f32 = 0.0;
        let mut total_height: f32 = 0.0;

        for run in buffer.layout_runs() {
            total_width = total_width.max(run.line_w);
            total_height += run.line_height;
        }

        let measured = (total_width, total_height);
        self.cache.insert(key, measured);
        measured
    }
}

impl Default for CosmicTextMeasure {
    fn default() -> Self {
        Self::new()
    }
}
