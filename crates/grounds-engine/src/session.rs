//! Editing session: the one place gradient, filter and canvas state live.
//!
//! Every edit is a command `(Session, input) -> Session`. The caller owns the
//! value and decides where to keep it; the engine holds no globals.

use rand::Rng;

use crate::canvas::CanvasSpec;
use crate::catalog::{self, AspectRatio};
use crate::export::{ExportFormat, ExportRequest};
use crate::filter::{FilterKey, FilterSet};
use crate::paint::{Color, ColorStops, GradientKind, GradientSpec};
use crate::style;

/// Direction a fresh session starts with, in degrees.
pub const DEFAULT_ANGLE: f32 = 45.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    gradient: GradientSpec,
    filters: FilterSet,
    canvas: CanvasSpec,
    active_preset: Option<&'static str>,
    active_template: Option<&'static str>,
}

impl Default for Session {
    /// Three-stop ocean palette, linear at 45 degrees, identity filters,
    /// 1080x1080 aspect-locked canvas.
    fn default() -> Self {
        let stops = ColorStops::parse(catalog::DEFAULT_PALETTE)
            .expect("built-in default palette is valid");
        Self {
            gradient: GradientSpec::new(stops, GradientKind::Linear, DEFAULT_ANGLE),
            filters: FilterSet::identity(),
            canvas: CanvasSpec::default(),
            active_preset: catalog::palette(catalog::DEFAULT_PRESET).map(|p| p.name),
            active_template: catalog::template(catalog::DEFAULT_TEMPLATE).map(|t| t.name),
        }
    }
}

impl Session {
    pub fn new(gradient: GradientSpec, filters: FilterSet, canvas: CanvasSpec) -> Self {
        Self { gradient, filters, canvas, active_preset: None, active_template: None }
    }

    #[inline]
    pub fn gradient(&self) -> &GradientSpec {
        &self.gradient
    }

    #[inline]
    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    #[inline]
    pub fn canvas(&self) -> &CanvasSpec {
        &self.canvas
    }

    pub fn active_preset(&self) -> Option<&'static str> {
        self.active_preset
    }

    pub fn active_template(&self) -> Option<&'static str> {
        self.active_template
    }

    // ── stops ─────────────────────────────────────────────────────────────

    fn map_stops(mut self, f: impl FnOnce(ColorStops) -> ColorStops) -> Self {
        let stops = f(self.gradient.stops.clone());
        self.gradient = self.gradient.with_stops(stops);
        self
    }

    pub fn add_stop(self) -> Self {
        self.map_stops(ColorStops::add)
    }

    pub fn remove_stop(self, index: usize) -> Self {
        self.map_stops(|s| s.remove(index))
    }

    pub fn replace_stop(self, index: usize, color: Color) -> Self {
        self.map_stops(|s| s.replace(index, color))
    }

    pub fn set_stops(self, stops: ColorStops) -> Self {
        self.map_stops(|_| stops)
    }

    /// Loads a catalog palette and marks it active. Unknown names change nothing.
    pub fn load_preset(mut self, name: &str) -> Self {
        let Some(preset) = catalog::palette(name) else {
            log::warn!("unknown palette {:?}", name);
            return self;
        };
        self = self.map_stops(|s| s.load_preset(preset.colors));
        self.active_preset = Some(preset.name);
        log::debug!("palette {} loaded", preset.name);
        self
    }

    /// Replaces the stops with `count` random HSL colors.
    pub fn randomize<R: Rng + ?Sized>(self, count: usize, rng: &mut R) -> Self {
        let stops = ColorStops::randomize(count, rng);
        log::debug!("randomized palette: {}", stops.palette_text());
        self.set_stops(stops)
    }

    // ── shape ─────────────────────────────────────────────────────────────

    pub fn set_kind(mut self, kind: GradientKind) -> Self {
        self.gradient = self.gradient.with_kind(kind);
        self
    }

    pub fn set_angle(mut self, degrees: f32) -> Self {
        self.gradient = self.gradient.with_angle(degrees);
        self
    }

    // ── filters ───────────────────────────────────────────────────────────

    pub fn update_filter(mut self, key: FilterKey, value: f32) -> Self {
        self.filters = self.filters.update(key, value);
        self
    }

    pub fn reset_filters(mut self) -> Self {
        self.filters = self.filters.reset();
        self
    }

    // ── canvas ────────────────────────────────────────────────────────────

    /// Applies a catalog template's size and marks it active. Unknown names
    /// change nothing.
    pub fn select_template(mut self, name: &str) -> Self {
        let Some(t) = catalog::template(name) else {
            log::warn!("unknown template {:?}", name);
            return self;
        };
        self.canvas = self.canvas.with_size(t.width, t.height);
        self.active_template = Some(t.name);
        self
    }

    pub fn apply_ratio(mut self, ratio: AspectRatio) -> Self {
        let (w, h) = ratio.size();
        self.canvas = self.canvas.with_size(w, h);
        self
    }

    pub fn set_width(mut self, width: u32) -> Self {
        self.canvas = self.canvas.set_width(width);
        self
    }

    pub fn set_height(mut self, height: u32) -> Self {
        self.canvas = self.canvas.set_height(height);
        self
    }

    pub fn set_width_text(mut self, text: &str) -> Self {
        self.canvas = self.canvas.set_width_text(text);
        self
    }

    pub fn set_height_text(mut self, text: &str) -> Self {
        self.canvas = self.canvas.set_height_text(text);
        self
    }

    pub fn set_scale(mut self, scale: f32) -> Self {
        self.canvas = self.canvas.set_scale(scale);
        self
    }

    pub fn set_aspect_lock(mut self, locked: bool) -> Self {
        self.canvas = self.canvas.with_aspect_lock(locked);
        self
    }

    pub fn toggle_aspect_lock(mut self) -> Self {
        self.canvas = self.canvas.toggle_aspect_lock();
        self
    }

    // ── preview / export ──────────────────────────────────────────────────

    /// CSS `background` value for the live preview.
    pub fn preview_background(&self) -> String {
        style::gradient(&self.gradient)
    }

    /// CSS `filter` value for the live preview.
    pub fn preview_filter(&self) -> String {
        style::filter(&self.filters)
    }

    pub fn preview_size(&self) -> (f32, f32) {
        self.canvas.preview_size()
    }

    /// Snapshot of the current state for one export.
    pub fn export_request(&self, format: ExportFormat) -> ExportRequest {
        ExportRequest {
            format,
            gradient: self.gradient.clone(),
            filters: self.filters,
            canvas: self.canvas,
        }
    }
}
