use std::fmt;
use std::str::FromStr;

use super::{Color, ColorStops};

/// Gradient shape.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum GradientKind {
    /// Straight band along an angle.
    #[default]
    Linear,
    /// Concentric circles around the centre; the angle is ignored.
    Radial,
    /// Sweep around the centre starting at the angle.
    Conic,
}

impl GradientKind {
    pub const ALL: [GradientKind; 3] = [GradientKind::Linear, GradientKind::Radial, GradientKind::Conic];

    pub fn name(self) -> &'static str {
        match self {
            GradientKind::Linear => "linear",
            GradientKind::Radial => "radial",
            GradientKind::Conic => "conic",
        }
    }

    /// Whether the angle participates in this shape.
    #[inline]
    pub fn uses_angle(self) -> bool {
        !matches!(self, GradientKind::Radial)
    }
}

impl fmt::Display for GradientKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GradientKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GradientKind::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown gradient kind {:?} (linear, radial, conic)", s))
    }
}

/// Upper bound of the angle domain, in degrees.
pub const MAX_ANGLE: f32 = 360.0;

/// A complete gradient description: stops, shape, and direction.
///
/// Rebuilt from the session on every render; nothing derived from it is cached.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientSpec {
    pub stops: ColorStops,
    pub kind: GradientKind,
    angle_degrees: f32,
}

impl GradientSpec {
    pub fn new(stops: ColorStops, kind: GradientKind, angle_degrees: f32) -> Self {
        Self { stops, kind, angle_degrees: 0.0 }.with_angle(angle_degrees)
    }

    /// Angle in `[0, 360]` degrees.
    #[inline]
    pub fn angle(&self) -> f32 {
        self.angle_degrees
    }

    /// Sets the angle, clamped to `[0, 360]`. NaN keeps the current angle.
    pub fn with_angle(mut self, degrees: f32) -> Self {
        if degrees.is_nan() {
            log::warn!("ignoring NaN gradient angle");
        } else {
            self.angle_degrees = degrees.clamp(0.0, MAX_ANGLE);
        }
        self
    }

    pub fn with_kind(mut self, kind: GradientKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_stops(mut self, stops: ColorStops) -> Self {
        self.stops = stops;
        self
    }

    /// Stops resolved to straight-alpha RGBA at their offsets, ready to sample.
    pub fn ramp(&self) -> ColorRamp {
        ColorRamp::new(self.stops.iter_with_offsets().map(|(c, t)| (t as f32, c)))
    }
}

/// Piecewise-linear color ramp over `[0, 1]`.
///
/// Positions outside the range pad with the edge colors. Interpolation is done
/// on straight (non-premultiplied) sRGB channels.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorRamp {
    stops: Vec<(f32, [f32; 4])>,
}

impl ColorRamp {
    pub fn new<'a>(stops: impl IntoIterator<Item = (f32, &'a Color)>) -> Self {
        let stops = stops
            .into_iter()
            .map(|(t, c)| {
                let [r, g, b, a] = c.rgba();
                (t, [r as f32, g as f32, b as f32, a as f32])
            })
            .collect();
        Self { stops }
    }

    /// Color at position `t`, rounded to bytes.
    pub fn sample(&self, t: f32) -> [u8; 4] {
        let px = self.sample_f32(t);
        px.map(|v| v.round().clamp(0.0, 255.0) as u8)
    }

    fn sample_f32(&self, t: f32) -> [f32; 4] {
        let (Some(first), Some(last)) = (self.stops.first(), self.stops.last()) else {
            return [0.0; 4];
        };
        if t.is_nan() || t <= first.0 {
            return first.1;
        }
        if t >= last.0 {
            return last.1;
        }
        for pair in self.stops.windows(2) {
            let (t0, c0) = pair[0];
            let (t1, c1) = pair[1];
            if t <= t1 {
                let span = t1 - t0;
                if span <= f32::EPSILON {
                    return c1;
                }
                let f = (t - t0) / span;
                return [0, 1, 2, 3].map(|i| c0[i] + (c1[i] - c0[i]) * f);
            }
        }
        last.1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(lits: &[&str], kind: GradientKind, angle: f32) -> GradientSpec {
        GradientSpec::new(ColorStops::parse(lits).unwrap(), kind, angle)
    }

    #[test]
    fn kind_round_trips_through_its_name() {
        for k in GradientKind::ALL {
            assert_eq!(k.name().parse::<GradientKind>().unwrap(), k);
        }
        assert_eq!("CONIC".parse::<GradientKind>().unwrap(), GradientKind::Conic);
        assert!("diamond".parse::<GradientKind>().is_err());
    }

    #[test]
    fn radial_ignores_angle() {
        assert!(GradientKind::Linear.uses_angle());
        assert!(GradientKind::Conic.uses_angle());
        assert!(!GradientKind::Radial.uses_angle());
    }

    #[test]
    fn angle_is_clamped() {
        let g = spec(&["#000", "#fff"], GradientKind::Linear, 720.0);
        assert_eq!(g.angle(), 360.0);
        assert_eq!(g.clone().with_angle(-15.0).angle(), 0.0);
        assert_eq!(g.with_angle(f32::NAN).angle(), 360.0);
    }

    #[test]
    fn ramp_endpoints_and_midpoint() {
        let ramp = spec(&["#000000", "#ffffff"], GradientKind::Linear, 0.0).ramp();
        assert_eq!(ramp.sample(0.0), [0, 0, 0, 255]);
        assert_eq!(ramp.sample(1.0), [255, 255, 255, 255]);
        assert_eq!(ramp.sample(0.5), [128, 128, 128, 255]);
    }

    #[test]
    fn ramp_pads_outside_unit_range() {
        let ramp = spec(&["#ff0000", "#0000ff"], GradientKind::Linear, 0.0).ramp();
        assert_eq!(ramp.sample(-3.0), [255, 0, 0, 255]);
        assert_eq!(ramp.sample(9.0), [0, 0, 255, 255]);
        assert_eq!(ramp.sample(f32::NAN), [255, 0, 0, 255]);
    }

    #[test]
    fn ramp_hits_interior_stops_exactly() {
        let ramp = spec(&["#000000", "#00ff00", "#000000"], GradientKind::Linear, 0.0).ramp();
        assert_eq!(ramp.sample(0.5), [0, 255, 0, 255]);
        assert_eq!(ramp.sample(0.25), [0, 128, 0, 255]);
    }
}
