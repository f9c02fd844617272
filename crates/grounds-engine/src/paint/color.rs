use std::fmt;
use std::str::FromStr;

/// A gradient stop color.
///
/// Keeps the literal text the color was written as so style and vector output
/// reproduce it verbatim (`#FF0000` stays upper-case, `hsl(...)` stays HSL),
/// alongside the resolved straight-alpha sRGB bytes used by the rasterizer.
///
/// Accepted forms:
/// - `#rgb`, `#rrggbb`, `#rrggbbaa`
/// - `hsl(h, s%, l%)` with `h` in degrees and `s`/`l` in percent
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Color {
    literal: String,
    rgba: [u8; 4],
}

impl Color {
    /// `#ffffff`, the color appended by "add stop".
    pub fn white() -> Self {
        Self { literal: "#ffffff".to_string(), rgba: [255, 255, 255, 255] }
    }

    /// Builds an HSL color and its `hsl(h, s%, l%)` literal.
    pub fn hsl(hue: u16, saturation: u8, lightness: u8) -> Self {
        let rgb = hsl_to_rgb(hue as f32, saturation as f32 / 100.0, lightness as f32 / 100.0);
        Self {
            literal: format!("hsl({}, {}%, {}%)", hue, saturation, lightness),
            rgba: [rgb[0], rgb[1], rgb[2], 255],
        }
    }

    /// Parses a color literal. Surrounding whitespace is dropped from the literal.
    pub fn parse(src: &str) -> Result<Self, ColorParseError> {
        let literal = src.trim();
        let rgba = if let Some(hex) = literal.strip_prefix('#') {
            parse_hex(literal, hex)?
        } else if let Some(args) = strip_function(literal, "hsl") {
            parse_hsl(literal, args)?
        } else {
            return Err(ColorParseError::new(literal, "expected #hex or hsl(h, s%, l%)"));
        };
        Ok(Self { literal: literal.to_string(), rgba })
    }

    /// The text this color was written as.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.literal
    }

    /// Straight-alpha sRGB bytes.
    #[inline]
    pub fn rgba(&self) -> [u8; 4] {
        self.rgba
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.literal)
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::parse(s)
    }
}

/// A color literal that could not be understood.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorParseError {
    pub input: String,
    pub message: String,
}

impl ColorParseError {
    fn new(input: &str, msg: impl Into<String>) -> Self {
        Self { input: input.to_string(), message: msg.into() }
    }
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid color {:?}: {}", self.input, self.message)
    }
}

impl std::error::Error for ColorParseError {}

fn parse_hex(literal: &str, hex: &str) -> Result<[u8; 4], ColorParseError> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ColorParseError::new(literal, "non-hex digit in color literal"));
    }
    // ASCII only past this point, so byte slicing is on char boundaries.
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
    let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).map(|v| v * 17);
    let parsed = match hex.len() {
        3 => (nibble(0), nibble(1), nibble(2), Ok(255)),
        6 => (byte(0), byte(2), byte(4), Ok(255)),
        8 => (byte(0), byte(2), byte(4), byte(6)),
        n => {
            return Err(ColorParseError::new(
                literal,
                format!("hex color must have 3, 6 or 8 digits, got {}", n),
            ));
        }
    };
    match parsed {
        (Ok(r), Ok(g), Ok(b), Ok(a)) => Ok([r, g, b, a]),
        _ => Err(ColorParseError::new(literal, "malformed hex color")),
    }
}

/// Returns the argument text of `name(...)`, case-insensitively.
fn strip_function<'a>(literal: &'a str, name: &str) -> Option<&'a str> {
    let open = literal.find('(')?;
    if !literal[..open].trim().eq_ignore_ascii_case(name) {
        return None;
    }
    literal[open + 1..].strip_suffix(')')
}

fn parse_hsl(literal: &str, args: &str) -> Result<[u8; 4], ColorParseError> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    let [h, s, l] = parts.as_slice() else {
        return Err(ColorParseError::new(literal, "hsl() takes exactly three components"));
    };

    let number = |text: &str, what: &str| -> Result<f32, ColorParseError> {
        let text = text.strip_suffix("deg").unwrap_or(text);
        let text = text.strip_suffix('%').unwrap_or(text).trim();
        text.parse::<f32>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| ColorParseError::new(literal, format!("invalid {} {:?}", what, text)))
    };

    let hue = number(h, "hue")?;
    let sat = number(s, "saturation")?.clamp(0.0, 100.0) / 100.0;
    let light = number(l, "lightness")?.clamp(0.0, 100.0) / 100.0;
    let [r, g, b] = hsl_to_rgb(hue, sat, light);
    Ok([r, g, b, 255])
}

/// CSS Color 4 HSL -> sRGB conversion. `s` and `l` are in [0, 1].
fn hsl_to_rgb(hue: f32, s: f32, l: f32) -> [u8; 3] {
    let h = hue.rem_euclid(360.0);
    let a = s * l.min(1.0 - l);
    let f = |n: f32| {
        let k = (n + h / 30.0) % 12.0;
        let v = l - a * (k - 3.0).min(9.0 - k).min(1.0).max(-1.0);
        (v * 255.0).round().clamp(0.0, 255.0) as u8
    };
    [f(0.0), f(8.0), f(4.0)]
}
