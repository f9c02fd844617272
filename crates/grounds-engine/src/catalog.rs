//! Built-in palettes, canvas templates and ratio shortcuts.

/// A named palette.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PalettePreset {
    pub name: &'static str,
    pub colors: &'static [&'static str],
}

/// A named export size.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CanvasTemplate {
    pub name: &'static str,
    pub width: u32,
    pub height: u32,
    /// Human-readable ratio shown next to the size.
    pub ratio: &'static str,
}

/// Ratio shortcut; applied as `width * RATIO_UNIT x height * RATIO_UNIT`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AspectRatio {
    pub width: u32,
    pub height: u32,
}

/// Pixel size of one ratio step.
pub const RATIO_UNIT: u32 = 200;

pub const DEFAULT_PALETTE: &[&str] = &["#667eea", "#764ba2", "#f093fb"];
pub const DEFAULT_PRESET: &str = "ocean";
pub const DEFAULT_TEMPLATE: &str = "Instagram Post";

pub const PALETTES: &[PalettePreset] = &[
    PalettePreset { name: "sunset", colors: &["#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4", "#FFEAA7"] },
    PalettePreset { name: "cyberpunk", colors: &["#FF00FF", "#00FFFF", "#FFFF00", "#FF0080", "#8000FF"] },
    PalettePreset { name: "ocean", colors: &["#667eea", "#764ba2", "#f093fb", "#f5576c", "#4facfe"] },
    PalettePreset { name: "pastel", colors: &["#FFB6C1", "#E6E6FA", "#B0E0E6", "#F0E68C", "#DDA0DD"] },
    PalettePreset { name: "forest", colors: &["#2d5016", "#3e7b27", "#87a96b", "#c9d9b7", "#b8d0a7"] },
    PalettePreset { name: "neon", colors: &["#39FF14", "#FF073A", "#00BFFF", "#FFD700", "#FF1493"] },
    PalettePreset { name: "vintage", colors: &["#D4A574", "#8B4513", "#CD853F", "#DEB887", "#F4A460"] },
    PalettePreset { name: "cosmic", colors: &["#4B0082", "#8A2BE2", "#9400D3", "#FF69B4", "#FFB6C1"] },
];

pub const TEMPLATES: &[CanvasTemplate] = &[
    CanvasTemplate { name: "Instagram Post", width: 1080, height: 1080, ratio: "1:1" },
    CanvasTemplate { name: "Instagram Story", width: 1080, height: 1920, ratio: "9:16" },
    CanvasTemplate { name: "YouTube Banner", width: 2560, height: 1440, ratio: "16:9" },
    CanvasTemplate { name: "Twitter Header", width: 1500, height: 500, ratio: "3:1" },
    CanvasTemplate { name: "LinkedIn Cover", width: 1584, height: 396, ratio: "4:1" },
    CanvasTemplate { name: "Facebook Cover", width: 1200, height: 630, ratio: "1.91:1" },
    CanvasTemplate { name: "Desktop Wallpaper", width: 1920, height: 1080, ratio: "16:9" },
    CanvasTemplate { name: "Mobile Wallpaper", width: 1080, height: 1920, ratio: "9:16" },
];

pub const RATIOS: &[AspectRatio] = &[
    AspectRatio { width: 1, height: 1 },
    AspectRatio { width: 2, height: 1 },
    AspectRatio { width: 16, height: 9 },
    AspectRatio { width: 4, height: 3 },
    AspectRatio { width: 3, height: 2 },
    AspectRatio { width: 7, height: 4 },
];

/// Looks a palette up by name, ignoring case.
pub fn palette(name: &str) -> Option<&'static PalettePreset> {
    PALETTES.iter().find(|p| p.name.eq_ignore_ascii_case(name.trim()))
}

/// Looks a template up by name, ignoring case and treating `-`/`_` as spaces
/// (`instagram-story` finds "Instagram Story").
pub fn template(name: &str) -> Option<&'static CanvasTemplate> {
    let wanted = normalize(name);
    TEMPLATES.iter().find(|t| normalize(t.name) == wanted)
}

/// Parses `W:H` into one of the offered ratio shortcuts.
pub fn ratio(text: &str) -> Option<AspectRatio> {
    let (w, h) = text.trim().split_once(':')?;
    let wanted = AspectRatio { width: w.trim().parse().ok()?, height: h.trim().parse().ok()? };
    RATIOS.iter().copied().find(|r| *r == wanted)
}

impl AspectRatio {
    /// Canvas size this shortcut applies.
    pub fn size(self) -> (u32, u32) {
        (self.width * RATIO_UNIT, self.height * RATIO_UNIT)
    }
}

impl std::fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.width, self.height)
    }
}

fn normalize(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| if c == '-' || c == '_' { ' ' } else { c.to_ascii_lowercase() })
        .collect()
}
