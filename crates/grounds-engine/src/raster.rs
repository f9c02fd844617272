//! CPU rasterizer: paints a gradient into an RGBA8 surface and encodes it.

use std::fmt;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbaImage};
use rand::Rng;

use crate::canvas::MAX_DIMENSION;
use crate::error::ExportError;
use crate::filter::FilterSet;
use crate::grain::apply_grain;
use crate::paint::{GradientSpec, Paint};

/// JPEG quality used for every export (0.9 on a 0-1 scale).
pub const JPEG_QUALITY: u8 = 90;

/// Compressed raster formats.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum RasterFormat {
    Png,
    Jpeg,
}

impl RasterFormat {
    /// File extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            RasterFormat::Png => "png",
            RasterFormat::Jpeg => "jpg",
        }
    }
}

impl fmt::Display for RasterFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RasterFormat::Png => "PNG",
            RasterFormat::Jpeg => "JPEG",
        })
    }
}

/// Paints `spec` over a `width x height` surface, sampling at pixel centres.
///
/// Fails for an empty surface or one with an edge above [`MAX_DIMENSION`].
pub fn paint(spec: &GradientSpec, width: u32, height: u32) -> Result<RgbaImage, ExportError> {
    if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(ExportError::Surface { width, height });
    }
    let geometry = Paint::for_surface(spec, width, height);
    let ramp = spec.ramp();
    Ok(RgbaImage::from_fn(width, height, |x, y| {
        let t = geometry.position(x as f32 + 0.5, y as f32 + 0.5);
        image::Rgba(ramp.sample(t))
    }))
}

/// Paints the gradient, then applies grain when `filters.grain() > 0`.
///
/// Only grain reaches raster output; blur, contrast, brightness and hue are
/// preview-only.
pub fn render<R: Rng + ?Sized>(
    spec: &GradientSpec,
    filters: &FilterSet,
    width: u32,
    height: u32,
    rng: &mut R,
) -> Result<RgbaImage, ExportError> {
    let mut surface = paint(spec, width, height)?;
    if filters.grain() > 0.0 {
        apply_grain(&mut surface, filters.grain(), rng);
    }
    Ok(surface)
}

/// Encodes the surface into compressed bytes.
///
/// JPEG has no alpha channel; translucent pixels are composited over black.
pub fn encode(img: &RgbaImage, format: RasterFormat) -> Result<Vec<u8>, ExportError> {
    let (w, h) = img.dimensions();
    let mut out = Vec::new();
    match format {
        RasterFormat::Png => {
            PngEncoder::new(&mut out).write_image(img.as_raw(), w, h, ExtendedColorType::Rgba8)?;
        }
        RasterFormat::Jpeg => {
            let rgb = flatten_over_black(img);
            JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY).write_image(
                &rgb,
                w,
                h,
                ExtendedColorType::Rgb8,
            )?;
        }
    }
    Ok(out)
}

fn flatten_over_black(img: &RgbaImage) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(img.as_raw().len() / 4 * 3);
    for px in img.pixels() {
        let [r, g, b, a] = px.0;
        if a == 255 {
            rgb.extend_from_slice(&[r, g, b]);
        } else {
            let a = a as u32;
            rgb.extend([r, g, b].map(|c| ((c as u32 * a + 127) / 255) as u8));
        }
    }
    rgb
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterKey;
    use crate::paint::{ColorStops, GradientKind};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn spec(lits: &[&str], kind: GradientKind) -> GradientSpec {
        GradientSpec::new(ColorStops::parse(lits).unwrap(), kind, 0.0)
    }

    #[test]
    fn linear_runs_corner_to_corner() {
        let img = paint(&spec(&["#000000", "#ffffff"], GradientKind::Linear), 64, 64).unwrap();
        let tl = img.get_pixel(0, 0).0[0];
        let br = img.get_pixel(63, 63).0[0];
        let tr = img.get_pixel(63, 0).0[0];
        assert!(tl < 5, "top-left {tl}");
        assert!(br > 250, "bottom-right {br}");
        // The anti-diagonal sits at the midpoint.
        assert!((126..=130).contains(&tr), "top-right {tr}");
    }

    #[test]
    fn radial_is_darkest_in_the_middle() {
        let img = paint(&spec(&["#000000", "#ffffff"], GradientKind::Radial), 41, 41).unwrap();
        let mid = img.get_pixel(20, 20).0[0];
        let corner = img.get_pixel(0, 0).0[0];
        assert!(mid < 10 && corner > 240, "mid {mid} corner {corner}");
    }

    #[test]
    fn conic_sweeps_clockwise_from_top() {
        let img = paint(&spec(&["#000000", "#ffffff"], GradientKind::Conic), 100, 100).unwrap();
        let right = img.get_pixel(99, 50).0[0];
        let left = img.get_pixel(0, 50).0[0];
        assert!(right < left, "right {right} left {left}");
    }

    #[test]
    fn empty_or_huge_surface_fails() {
        let s = spec(&["#000", "#fff"], GradientKind::Linear);
        assert!(matches!(paint(&s, 0, 10), Err(ExportError::Surface { width: 0, height: 10 })));
        assert!(matches!(paint(&s, MAX_DIMENSION + 1, 1), Err(ExportError::Surface { .. })));
    }

    #[test]
    fn render_without_grain_matches_plain_paint() {
        let s = spec(&["#123456", "#abcdef", "#fedcba"], GradientKind::Linear);
        let plain = paint(&s, 30, 20).unwrap();
        let rendered = render(&s, &FilterSet::identity(), 30, 20, &mut StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(plain.as_raw(), rendered.as_raw());
    }

    #[test]
    fn render_with_grain_perturbs_pixels() {
        let s = spec(&["#808080", "#808080"], GradientKind::Linear);
        let grainy = FilterSet::identity().update(FilterKey::Grain, 50.0);
        let img = render(&s, &grainy, 30, 20, &mut StdRng::seed_from_u64(1)).unwrap();
        assert!(img.pixels().any(|p| p.0[0] != 0x80));
    }

    #[test]
    fn png_round_trips_losslessly() {
        let s = spec(&["#ff0000", "#0000ff80"], GradientKind::Linear);
        let img = paint(&s, 17, 9).unwrap();
        let bytes = encode(&img, RasterFormat::Png).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap().into_rgba8();
        assert_eq!(decoded.as_raw(), img.as_raw());
    }

    #[test]
    fn jpeg_decodes_to_the_requested_size() {
        let s = spec(&["#ff0000", "#0000ff"], GradientKind::Linear);
        let img = paint(&s, 40, 24).unwrap();
        let bytes = encode(&img, RasterFormat::Jpeg).unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (40, 24));
    }

    #[test]
    fn jpeg_flattens_alpha_over_black() {
        let img = RgbaImage::from_pixel(1, 1, image::Rgba([255, 255, 255, 0]));
        assert_eq!(flatten_over_black(&img), vec![0, 0, 0]);
        let img = RgbaImage::from_pixel(1, 1, image::Rgba([200, 100, 50, 255]));
        assert_eq!(flatten_over_black(&img), vec![200, 100, 50]);
    }

    #[test]
    fn extensions() {
        assert_eq!(RasterFormat::Png.extension(), "png");
        assert_eq!(RasterFormat::Jpeg.extension(), "jpg");
    }
}
