//! Output canvas: export resolution, preview scale and aspect lock.

/// Width used when a typed width cannot be understood.
pub const FALLBACK_WIDTH: u32 = 800;
/// Height used when a typed height cannot be understood.
pub const FALLBACK_HEIGHT: u32 = 600;
/// Largest accepted edge, in pixels.
pub const MAX_DIMENSION: u32 = 16_384;

pub const MIN_SCALE: f32 = 0.5;
pub const MAX_SCALE: f32 = 3.0;

/// Longest preview edge, in logical pixels.
pub const PREVIEW_MAX: f32 = 400.0;

/// Export size plus preview settings.
///
/// Invariant: `1 <= width, height <= MAX_DIMENSION` and
/// `MIN_SCALE <= scale <= MAX_SCALE`. Constructors and commands clamp into
/// these ranges, so a `CanvasSpec` is always safe to rasterize.
///
/// `scale` only affects the on-screen preview; exports use `width x height`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CanvasSpec {
    width: u32,
    height: u32,
    scale: f32,
    aspect_locked: bool,
}

impl Default for CanvasSpec {
    /// 1080x1080 (Instagram Post), scale 1, aspect locked.
    fn default() -> Self {
        Self { width: 1080, height: 1080, scale: 1.0, aspect_locked: true }
    }
}

impl CanvasSpec {
    /// Unlocked-by-default canvas of the given size (edges clamped into range).
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: clamp_dimension(width),
            height: clamp_dimension(height),
            scale: 1.0,
            aspect_locked: false,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    #[inline]
    pub fn aspect_locked(&self) -> bool {
        self.aspect_locked
    }

    /// `width / height`.
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    /// Sets both edges directly, ignoring the lock (templates, ratio shortcuts).
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = clamp_dimension(width);
        self.height = clamp_dimension(height);
        self
    }

    pub fn with_aspect_lock(mut self, locked: bool) -> Self {
        self.aspect_locked = locked;
        self
    }

    pub fn toggle_aspect_lock(self) -> Self {
        let locked = !self.aspect_locked;
        self.with_aspect_lock(locked)
    }

    /// Edits the width. When locked, height follows as
    /// `round(width * height_old / width_old)`.
    pub fn set_width(mut self, width: u32) -> Self {
        let width = clamp_dimension(width);
        if self.aspect_locked {
            self.height = follow(width, self.height, self.width);
        }
        self.width = width;
        self
    }

    /// Edits the height. When locked, width follows as
    /// `round(height * width_old / height_old)`.
    pub fn set_height(mut self, height: u32) -> Self {
        let height = clamp_dimension(height);
        if self.aspect_locked {
            self.width = follow(height, self.width, self.height);
        }
        self.height = height;
        self
    }

    /// [`set_width`](Self::set_width) from text input; unusable text becomes
    /// [`FALLBACK_WIDTH`].
    pub fn set_width_text(self, text: &str) -> Self {
        self.set_width(parse_dimension(text, FALLBACK_WIDTH))
    }

    /// [`set_height`](Self::set_height) from text input; unusable text becomes
    /// [`FALLBACK_HEIGHT`].
    pub fn set_height_text(self, text: &str) -> Self {
        self.set_height(parse_dimension(text, FALLBACK_HEIGHT))
    }

    /// Preview scale, clamped to `[MIN_SCALE, MAX_SCALE]`. NaN is ignored.
    pub fn set_scale(mut self, scale: f32) -> Self {
        if scale.is_nan() {
            log::warn!("ignoring NaN canvas scale");
            return self;
        }
        self.scale = scale.clamp(MIN_SCALE, MAX_SCALE);
        self
    }

    /// On-screen preview box: each edge is `min(400, edge * scale)`.
    pub fn preview_size(&self) -> (f32, f32) {
        (
            (self.width as f32 * self.scale).min(PREVIEW_MAX),
            (self.height as f32 * self.scale).min(PREVIEW_MAX),
        )
    }
}

/// Parses a dimension the way a number field does: leading whitespace, an
/// optional sign, then digits up to the first non-digit (`"640px"` is 640).
///
/// Empty, non-numeric, zero and negative input yield `fallback`; values past
/// [`MAX_DIMENSION`] are clamped.
pub fn parse_dimension(text: &str, fallback: u32) -> u32 {
    let s = text.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    let digits = &digits[..end];

    if digits.is_empty() || negative {
        log::warn!("invalid dimension {:?}, using {}", text, fallback);
        return fallback;
    }
    // Digits only; the sole failure mode left is overflow.
    let value = digits.parse::<u64>().unwrap_or(u64::MAX);
    if value == 0 {
        log::warn!("zero dimension {:?}, using {}", text, fallback);
        return fallback;
    }
    clamp_dimension(value.min(u32::MAX as u64) as u32)
}

#[inline]
fn clamp_dimension(v: u32) -> u32 {
    v.clamp(1, MAX_DIMENSION)
}

/// `round(edited * other_old / edited_old)`, kept inside the dimension range.
fn follow(edited: u32, other_old: u32, edited_old: u32) -> u32 {
    let v = (edited as f64 * other_old as f64 / edited_old as f64).round();
    clamp_dimension(v.min(MAX_DIMENSION as f64) as u32)
}
