//! Writes a composed page to disk as SVG, PNG or PDF.

use std::path::Path;
use std::sync::Arc;

use resvg::usvg;
use tiny_skia::{Pixmap, Transform};
use tracing::debug;

use crate::compose::RenderedPage;
use crate::error::{Error, Result};
use crate::fonts::{FallbackFamilies, LOCAL_FONTS_DIR};
use crate::svg::to_svg;

const PNG_SCALE: f32 = 2.0;

/// Loads system and local fonts into an export font database and points
/// its generic families at the faces text was measured with. `resvg` and
/// `svg2pdf` each bring their own `fontdb` version, so this is a macro
/// rather than a function over one concrete type.
macro_rules! load_export_fonts {
    ($fontdb:expr, $fallbacks:expr) => {{
        let fontdb = $fontdb;
        let fallbacks: &FallbackFamilies = $fallbacks;
        fontdb.load_system_fonts();

        let local_fonts = Path::new(LOCAL_FONTS_DIR);
        if local_fonts.is_dir() {
            fontdb.load_fonts_dir(local_fonts);
        }

        if let Some(family) = &fallbacks.sans {
            fontdb.set_sans_serif_family(family.clone());
        }
        if let Some(family) = &fallbacks.serif {
            fontdb.set_serif_family(family.clone());
        }
    }};
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Pdf,
    Svg,
    Png,
}

impl OutputFormat {
    /// `.svg` and `.png` select those formats; everything else is PDF.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match ext.as_deref() {
            Some("svg") => OutputFormat::Svg,
            Some("png") => OutputFormat::Png,
            _ => OutputFormat::Pdf,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            OutputFormat::Pdf => "PDF",
            OutputFormat::Svg => "SVG",
            OutputFormat::Png => "PNG",
        }
    }
}

/// Serialises `page` in `format`. Raster and PDF output resolve the generic
/// font families through `fallbacks`.
pub fn encode(
    page: &RenderedPage,
    format: OutputFormat,
    fallbacks: &FallbackFamilies,
) -> Result<Vec<u8>> {
    let svg = to_svg(page);
    debug!(bytes = svg.len(), format = format.name(), "serialised page");

    match format {
        OutputFormat::Svg => Ok(svg.into_bytes()),
        OutputFormat::Png => svg_to_png(&svg, PNG_SCALE, fallbacks),
        OutputFormat::Pdf => svg_to_pdf(&svg, fallbacks),
    }
}

/// Writes `data` to `path`, creating missing parent directories first.
pub fn write_output(path: &Path, data: &[u8]) -> Result<()> {
    let write_error = |source| Error::WriteOutput {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_error)?;
    }
    std::fs::write(path, data).map_err(write_error)
}

fn svg_to_png(svg: &str, scale: f32, fallbacks: &FallbackFamilies) -> Result<Vec<u8>> {
    let mut opts = usvg::Options::default();
    load_export_fonts!(opts.fontdb_mut(), fallbacks);

    let tree = usvg::Tree::from_str(svg, &opts).map_err(|e| Error::Svg(e.to_string()))?;

    let width = (tree.size().width() * scale).ceil() as u32;
    let height = (tree.size().height() * scale).ceil() as u32;

    let mut pixmap = Pixmap::new(width, height)
        .ok_or_else(|| Error::Png(format!("cannot allocate a {width}x{height} pixmap")))?;
    resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());

    pixmap.encode_png().map_err(|e| Error::Png(e.to_string()))
}

fn svg_to_pdf(svg: &str, fallbacks: &FallbackFamilies) -> Result<Vec<u8>> {
    use svg2pdf::usvg::fontdb;

    let mut db = fontdb::Database::new();
    load_export_fonts!(&mut db, fallbacks);

    let mut opts = svg2pdf::usvg::Options::default();
    opts.fontdb = Arc::new(db);

    let tree = svg2pdf::usvg::Tree::from_str(svg, &opts).map_err(|e| Error::Svg(e.to_string()))?;

    // Text as paths: the PDF never depends on font embedding succeeding.
    let mut options = svg2pdf::ConversionOptions::default();
    options.embed_text = false;

    svg2pdf::to_pdf(&tree, options, svg2pdf::PageOptions::default())
        .map_err(|e| Error::Pdf(e.to_string()))
}
