//! CSS text for the live preview and the "copy CSS" export.

use std::fmt::Write as _;

use crate::filter::{FilterKey, FilterSet};
use crate::paint::{GradientKind, GradientSpec};

/// Comma-joined `"<color> <offset%>"` list, offsets at `index / (n - 1)`.
pub fn color_stops(spec: &GradientSpec) -> String {
    let mut out = String::new();
    for (i, (color, t)) in spec.stops.iter_with_offsets().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "{} {}%", color, t * 100.0);
    }
    out
}

/// Gradient function for `spec`, e.g. `linear-gradient(90deg, #f00 0%, #00f 100%)`.
pub fn gradient(spec: &GradientSpec) -> String {
    let open = match spec.kind {
        GradientKind::Linear => "linear-gradient(",
        GradientKind::Radial => "radial-gradient(circle, ",
        GradientKind::Conic => "conic-gradient(from ",
    };
    let mut out = String::from(open);
    if spec.kind.uses_angle() {
        let _ = write!(out, "{}deg, ", spec.angle());
    }
    out.push_str(&color_stops(spec));
    out.push(')');
    out
}

/// A complete `background:` declaration.
pub fn declaration(spec: &GradientSpec) -> String {
    format!("background: {};", gradient(spec))
}

/// Preview `filter` value in canonical order: blur, contrast, brightness,
/// hue-rotate.
///
/// Filters sitting at their identity value are left out; an all-identity set
/// is `none`. Grain is never listed because it only exists in raster output.
pub fn filter(filters: &FilterSet) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(4);
    if filters.blur() != FilterKey::Blur.identity() {
        parts.push(format!("blur({}px)", filters.blur_px()));
    }
    if filters.contrast() != FilterKey::Contrast.identity() {
        parts.push(format!("contrast({}%)", filters.contrast()));
    }
    if filters.brightness() != FilterKey::Brightness.identity() {
        parts.push(format!("brightness({}%)", filters.brightness()));
    }
    if filters.hue() != FilterKey::Hue.identity() {
        parts.push(format!("hue-rotate({}deg)", filters.hue()));
    }
    if parts.is_empty() {
        "none".to_string()
    } else {
        parts.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::ColorStops;

    fn spec(lits: &[&str], kind: GradientKind, angle: f32) -> GradientSpec {
        GradientSpec::new(ColorStops::parse(lits).unwrap(), kind, angle)
    }

    #[test]
    fn red_to_blue_declaration() {
        let s = spec(&["#FF0000", "#0000FF"], GradientKind::Linear, 90.0);
        assert_eq!(
            declaration(&s),
            "background: linear-gradient(90deg, #FF0000 0%, #0000FF 100%);"
        );
    }

    #[test]
    fn three_stop_offsets() {
        let s = spec(&["#A00", "#B00", "#C00"], GradientKind::Linear, 0.0);
        assert_eq!(color_stops(&s), "#A00 0%, #B00 50%, #C00 100%");
    }

    #[test]
    fn four_stop_offsets_print_shortest_form() {
        let s = spec(&["#abc"; 4], GradientKind::Linear, 0.0);
        assert_eq!(
            color_stops(&s),
            "#abc 0%, #abc 33.33333333333333%, #abc 66.66666666666666%, #abc 100%"
        );
    }

    #[test]
    fn radial_ignores_angle() {
        let s = spec(&["#fff", "#000"], GradientKind::Radial, 135.0);
        assert_eq!(gradient(&s), "radial-gradient(circle, #fff 0%, #000 100%)");
    }

    #[test]
    fn conic_starts_from_angle() {
        let s = spec(&["#fff", "#000"], GradientKind::Conic, 45.0);
        assert_eq!(gradient(&s), "conic-gradient(from 45deg, #fff 0%, #000 100%)");
    }

    #[test]
    fn fractional_angle_is_kept() {
        let s = spec(&["#fff", "#000"], GradientKind::Linear, 22.5);
        assert!(gradient(&s).starts_with("linear-gradient(22.5deg,"));
    }

    #[test]
    fn identity_filter_is_none() {
        assert_eq!(filter(&FilterSet::identity()), "none");
    }

    #[test]
    fn filter_lists_only_active_entries_in_order() {
        let f = FilterSet::identity()
            .update(FilterKey::Hue, 90.0)
            .update(FilterKey::Blur, 3.0)
            .update(FilterKey::Grain, 80.0);
        assert_eq!(filter(&f), "blur(1.5px) hue-rotate(90deg)");

        let f = f.update(FilterKey::Contrast, 150.0).update(FilterKey::Brightness, 80.0);
        assert_eq!(
            filter(&f),
            "blur(1.5px) contrast(150%) brightness(80%) hue-rotate(90deg)"
        );
    }
}
