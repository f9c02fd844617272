//! Paint model shared by the style synthesizer, rasterizer and vector serializer.
//!
//! Scope:
//! - color literals and their resolved sRGB bytes
//! - the ordered stop list and its invariants
//! - gradient shape/direction and the sampling ramp
//!
//! Surface geometry is resolved by [`Paint::for_surface`]; pixel loops live in
//! `raster`.

pub mod color;
pub mod gradient;
pub mod stops;

pub use color::{Color, ColorParseError};
pub use gradient::{ColorRamp, GradientKind, GradientSpec};
pub use stops::{ColorStops, StopsError};

/// Gradient geometry resolved against a `width x height` pixel surface.
///
/// Coordinates are in pixels with a top-left origin. Each variant maps a pixel
/// centre to a ramp position `t` via [`Paint::position`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Paint {
    /// Projection onto the segment `start -> end`.
    Linear { start: (f32, f32), end: (f32, f32) },
    /// Distance from `center`, reaching `t = 1` at `radius`.
    Radial { center: (f32, f32), radius: f32 },
    /// Clockwise sweep from 12 o'clock, rotated by `from_degrees`.
    Conic { center: (f32, f32), from_degrees: f32 },
}

impl Paint {
    /// Geometry for raster export.
    ///
    /// Linear paint always spans the top-left to bottom-right diagonal, which
    /// is also what the vector document encodes. Radial reaches the farthest
    /// corner, like a `circle` CSS radial gradient.
    pub fn for_surface(spec: &GradientSpec, width: u32, height: u32) -> Self {
        let (w, h) = (width as f32, height as f32);
        let center = (w * 0.5, h * 0.5);
        match spec.kind {
            GradientKind::Linear => Paint::Linear { start: (0.0, 0.0), end: (w, h) },
            GradientKind::Radial => Paint::Radial { center, radius: center.0.hypot(center.1) },
            GradientKind::Conic => Paint::Conic { center, from_degrees: spec.angle() },
        }
    }

    /// Ramp position for the point `(x, y)`.
    pub fn position(&self, x: f32, y: f32) -> f32 {
        match *self {
            Paint::Linear { start, end } => {
                let (dx, dy) = (end.0 - start.0, end.1 - start.1);
                let len2 = dx * dx + dy * dy;
                if len2 <= f32::EPSILON {
                    return 0.0;
                }
                ((x - start.0) * dx + (y - start.1) * dy) / len2
            }
            Paint::Radial { center, radius } => {
                if radius <= f32::EPSILON {
                    return 0.0;
                }
                (x - center.0).hypot(y - center.1) / radius
            }
            Paint::Conic { center, from_degrees } => {
                // atan2(dx, -dy) is 0 at 12 o'clock and grows clockwise in y-down space.
                let turn = (x - center.0).atan2(center.1 - y).to_degrees();
                (turn - from_degrees).rem_euclid(360.0) / 360.0
            }
        }
    }
}
