//! Filter pipeline: grain, blur, contrast, brightness and hue rotation.
//!
//! A [`FilterSet`] is a plain value holder. Every write is clamped into the
//! field's domain; nothing is ever rejected.

use std::fmt;

/// Preview blur radius per filter unit. `blur = 100` renders as `blur(50px)`.
pub const BLUR_PX_PER_UNIT: f32 = 0.5;

/// Hue shortcut buttons offered next to the hue slider.
pub const HUE_PRESETS: [f32; 5] = [15.0, 45.0, 90.0, 180.0, 270.0];

/// One adjustable filter parameter.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum FilterKey {
    Grain,
    Blur,
    Contrast,
    Brightness,
    Hue,
}

impl FilterKey {
    pub const ALL: [FilterKey; 5] = [
        FilterKey::Grain,
        FilterKey::Blur,
        FilterKey::Contrast,
        FilterKey::Brightness,
        FilterKey::Hue,
    ];

    /// Inclusive `(min, max)` domain.
    pub fn domain(self) -> (f32, f32) {
        match self {
            FilterKey::Grain | FilterKey::Blur => (0.0, 100.0),
            FilterKey::Contrast | FilterKey::Brightness => (0.0, 200.0),
            FilterKey::Hue => (0.0, 360.0),
        }
    }

    /// Value at which the filter has no visible effect.
    pub fn identity(self) -> f32 {
        match self {
            FilterKey::Contrast | FilterKey::Brightness => 100.0,
            FilterKey::Grain | FilterKey::Blur | FilterKey::Hue => 0.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FilterKey::Grain => "grain",
            FilterKey::Blur => "blur",
            FilterKey::Contrast => "contrast",
            FilterKey::Brightness => "brightness",
            FilterKey::Hue => "hue",
        }
    }
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Filter parameters, each kept inside its [`FilterKey::domain`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FilterSet {
    grain: f32,
    blur: f32,
    contrast: f32,
    brightness: f32,
    hue: f32,
}

impl Default for FilterSet {
    fn default() -> Self {
        Self::identity()
    }
}

impl FilterSet {
    /// `{grain: 0, blur: 0, contrast: 100, brightness: 100, hue: 0}`.
    pub const fn identity() -> Self {
        Self { grain: 0.0, blur: 0.0, contrast: 100.0, brightness: 100.0, hue: 0.0 }
    }

    /// Returns the identity set regardless of `self`.
    pub fn reset(self) -> Self {
        Self::identity()
    }

    pub fn get(&self, key: FilterKey) -> f32 {
        match key {
            FilterKey::Grain => self.grain,
            FilterKey::Blur => self.blur,
            FilterKey::Contrast => self.contrast,
            FilterKey::Brightness => self.brightness,
            FilterKey::Hue => self.hue,
        }
    }

    /// Stores `value` clamped to the field's domain.
    ///
    /// Infinities clamp to the nearest bound; NaN is invalid input and leaves
    /// the field as it was.
    pub fn update(mut self, key: FilterKey, value: f32) -> Self {
        if value.is_nan() {
            log::warn!("ignoring NaN for filter {}", key);
            return self;
        }
        let (lo, hi) = key.domain();
        let v = value.clamp(lo, hi);
        if v != value {
            log::debug!("filter {} clamped from {} to {}", key, value, v);
        }
        let slot = match key {
            FilterKey::Grain => &mut self.grain,
            FilterKey::Blur => &mut self.blur,
            FilterKey::Contrast => &mut self.contrast,
            FilterKey::Brightness => &mut self.brightness,
            FilterKey::Hue => &mut self.hue,
        };
        *slot = v;
        self
    }

    #[inline]
    pub fn grain(&self) -> f32 {
        self.grain
    }

    #[inline]
    pub fn blur(&self) -> f32 {
        self.blur
    }

    #[inline]
    pub fn contrast(&self) -> f32 {
        self.contrast
    }

    #[inline]
    pub fn brightness(&self) -> f32 {
        self.brightness
    }

    #[inline]
    pub fn hue(&self) -> f32 {
        self.hue
    }

    /// Preview blur radius in pixels.
    #[inline]
    pub fn blur_px(&self) -> f32 {
        self.blur * BLUR_PX_PER_UNIT
    }
}
