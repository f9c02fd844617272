//! SVG serializer.
//!
//! The document carries color and geometry only: a full-size rectangle filled
//! with a diagonal linear gradient. Grain and the other filters have no vector
//! representation and are not emitted.

use std::fmt::Write as _;

use crate::paint::GradientSpec;

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Serializes `spec` as a self-contained `width x height` SVG document.
///
/// The gradient runs from the top-left to the bottom-right corner regardless
/// of the gradient's kind or angle, matching raster linear output.
pub fn to_svg(spec: &GradientSpec, width: u32, height: u32) -> String {
    let mut svg = String::with_capacity(320 + spec.stops.len() * 64);
    let _ = writeln!(svg, r#"<svg width="{}" height="{}" xmlns="{}">"#, width, height, SVG_NS);
    svg.push_str("  <defs>\n");
    svg.push_str(r#"    <linearGradient id="grad" x1="0%" y1="0%" x2="100%" y2="100%">"#);
    svg.push('\n');
    for (color, t) in spec.stops.iter_with_offsets() {
        let _ = writeln!(
            svg,
            r#"      <stop offset="{}%" style="stop-color:{}"/>"#,
            t * 100.0,
            escape_attr(color.as_str())
        );
    }
    svg.push_str("    </linearGradient>\n");
    svg.push_str("  </defs>\n");
    svg.push_str(r#"  <rect width="100%" height="100%" fill="url(#grad)"/>"#);
    svg.push_str("\n</svg>\n");
    svg
}

fn escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}
