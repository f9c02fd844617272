//! Export coordinator.
//!
//! Turns an [`ExportRequest`] into CSS, SVG, PNG or JPEG and hands the result to
//! a [`Host`]. Everything up to the host call is synchronous and
//! deterministic for a given random source; the host call is the only I/O.
//! The coordinator keeps no state between calls.

mod host;

use std::fmt;
use std::str::FromStr;

use rand::Rng;

pub use host::{DesktopHost, Host, MemoryHost, TextSink};

use crate::canvas::CanvasSpec;
use crate::error::{ExportError, HostError};
use crate::filter::FilterSet;
use crate::paint::{ColorStops, GradientSpec};
use crate::raster::{self, RasterFormat};
use crate::{style, vector};

/// Prefix of every exported file name.
pub const PRODUCT_NAME: &str = "magicgrounds";

/// Output encodings.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ExportFormat {
    Css,
    Svg,
    Png,
    Jpeg,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 4] =
        [ExportFormat::Css, ExportFormat::Svg, ExportFormat::Png, ExportFormat::Jpeg];

    /// Raster encoding, if this format is one.
    pub fn raster(self) -> Option<RasterFormat> {
        match self {
            ExportFormat::Png => Some(RasterFormat::Png),
            ExportFormat::Jpeg => Some(RasterFormat::Jpeg),
            ExportFormat::Css | ExportFormat::Svg => None,
        }
    }

    /// Name of the file this format is written to, or `None` for CSS (clipboard text).
    pub fn file_name(self) -> Option<String> {
        let ext = match self {
            ExportFormat::Css => return None,
            ExportFormat::Svg => "svg",
            ExportFormat::Png | ExportFormat::Jpeg => self.raster()?.extension(),
        };
        Some(file_name(ext))
    }
}

/// `"magicgrounds-gradient.<ext>"`.
pub fn file_name(ext: &str) -> String {
    format!("{}-gradient.{}", PRODUCT_NAME, ext)
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExportFormat::Css => "CSS",
            ExportFormat::Svg => "SVG",
            ExportFormat::Png => "PNG",
            ExportFormat::Jpeg => "JPEG",
        })
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "css" => Ok(ExportFormat::Css),
            "svg" => Ok(ExportFormat::Svg),
            "png" => Ok(ExportFormat::Png),
            "jpeg" | "jpg" => Ok(ExportFormat::Jpeg),
            other => Err(format!("unknown export format {:?} (css, svg, png, jpeg)", other)),
        }
    }
}

/// Everything one export needs. Built per call and consumed by [`export`].
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRequest {
    pub format: ExportFormat,
    pub gradient: GradientSpec,
    pub filters: FilterSet,
    pub canvas: CanvasSpec,
}

/// Where the exported payload went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// `Host::write_text`.
    Text,
    /// `Host::write_file` under this name.
    File(String),
}

/// Success report, enough for a "exported as PNG" style message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutcome {
    pub format: ExportFormat,
    pub destination: Destination,
    /// Payload size in bytes.
    pub bytes: usize,
}

impl fmt::Display for ExportOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.destination {
            Destination::Text => write!(f, "{} copied ({} bytes)", self.format, self.bytes),
            Destination::File(name) => write!(f, "{} saved to {} ({} bytes)", self.format, name, self.bytes),
        }
    }
}

/// Runs one export.
///
/// - CSS: `background: <gradient>;` via `write_text`
/// - SVG: vector document via `write_file`
/// - PNG/JPEG: rasterized at `canvas.width x canvas.height` (scale ignored),
///   grain applied with `rng`, encoded, then `write_file`
///
/// The payload is fully built before the host is called, so a failure at any
/// step leaves no output behind.
pub fn export<H, R>(request: ExportRequest, host: &mut H, rng: &mut R) -> Result<ExportOutcome, ExportError>
where
    H: Host + ?Sized,
    R: Rng + ?Sized,
{
    let ExportRequest { format, gradient, filters, canvas } = request;
    let (width, height) = (canvas.width(), canvas.height());
    log::debug!("exporting {} at {}x{}", format, width, height);

    // CSS is the only format without a file name; it goes to write_text.
    let outcome = match format.file_name() {
        None => {
            let css = style::declaration(&gradient);
            host.write_text(&css)?;
            ExportOutcome { format, destination: Destination::Text, bytes: css.len() }
        }
        Some(name) => {
            let bytes = match format.raster() {
                Some(raster_format) => {
                    let surface = raster::render(&gradient, &filters, width, height, rng)?;
                    let encoded = raster::encode(&surface, raster_format)?;
                    host.write_file(&encoded, &name)?;
                    encoded.len()
                }
                None => {
                    let svg = vector::to_svg(&gradient, width, height);
                    host.write_text_file(&svg, &name)?;
                    svg.len()
                }
            };
            ExportOutcome { format, destination: Destination::File(name), bytes }
        }
    };

    log::info!("{}", outcome);
    Ok(outcome)
}

/// Copies the comma-joined color literals (`"#a, #b, #c"`) via `write_text`.
pub fn copy_palette<H: Host + ?Sized>(stops: &ColorStops, host: &mut H) -> Result<String, HostError> {
    let text = stops.palette_text();
    host.write_text(&text)?;
    log::info!("palette copied: {}", text);
    Ok(text)
}
