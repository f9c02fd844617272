use rand::Rng;

use super::Color;

/// Fewest stops a gradient may have.
pub const MIN_STOPS: usize = 2;
/// Most stops a gradient may have.
pub const MAX_STOPS: usize = 5;
/// Stop count used by [`ColorStops::randomize`] callers that do not pick one.
pub const DEFAULT_RANDOM_COUNT: usize = 3;

/// Ordered gradient stops.
///
/// Invariant: `MIN_STOPS <= len <= MAX_STOPS`. Positions are never stored; a
/// stop's offset is derived from its index (see [`offset`]).
///
/// Every mutation is a command that consumes the old list and returns the new
/// one. Requests that would break the length invariant return the list
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorStops {
    colors: Vec<Color>,
}

impl ColorStops {
    /// Builds a stop list, or `None` when the length is outside `[MIN_STOPS, MAX_STOPS]`.
    pub fn new(colors: Vec<Color>) -> Option<Self> {
        (MIN_STOPS..=MAX_STOPS)
            .contains(&colors.len())
            .then_some(Self { colors })
    }

    /// Parses each literal; fails on the first bad color or an invalid count.
    pub fn parse<S: AsRef<str>>(literals: &[S]) -> Result<Self, StopsError> {
        let colors = literals
            .iter()
            .map(|s| Color::parse(s.as_ref()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(StopsError::Color)?;
        let len = colors.len();
        Self::new(colors).ok_or(StopsError::Count(len))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false; present for API symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    #[inline]
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Stops paired with their normalized offsets in `[0, 1]`.
    pub fn iter_with_offsets(&self) -> impl Iterator<Item = (&Color, f64)> + '_ {
        let n = self.colors.len();
        self.colors.iter().enumerate().map(move |(i, c)| (c, offset(i, n)))
    }

    /// Appends `#ffffff`. No-op at `MAX_STOPS`.
    pub fn add(mut self) -> Self {
        if self.colors.len() >= MAX_STOPS {
            log::debug!("add ignored: already at {} stops", MAX_STOPS);
            return self;
        }
        self.colors.push(Color::white());
        self
    }

    /// Removes the stop at `index`. No-op at `MIN_STOPS` or for an out-of-range index.
    pub fn remove(mut self, index: usize) -> Self {
        if self.colors.len() <= MIN_STOPS {
            log::debug!("remove ignored: gradient needs at least {} stops", MIN_STOPS);
            return self;
        }
        if index < self.colors.len() {
            self.colors.remove(index);
        }
        self
    }

    /// Swaps in `color` at `index`. Out-of-range indices are ignored.
    pub fn replace(mut self, index: usize, color: Color) -> Self {
        if let Some(slot) = self.colors.get_mut(index) {
            *slot = color;
        }
        self
    }

    /// Replaces the whole list with a catalog entry.
    ///
    /// Catalog entries are validated by their own tests; a malformed one leaves
    /// the current list in place.
    pub fn load_preset(self, preset: &[&str]) -> Self {
        match Self::parse(preset) {
            Ok(loaded) => loaded,
            Err(e) => {
                log::warn!("preset rejected: {}", e);
                self
            }
        }
    }

    /// Random HSL palette: hue in [0, 360), saturation in [50, 100),
    /// lightness in [40, 80). `count` is clamped to `[MIN_STOPS, MAX_STOPS]`.
    pub fn randomize<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Self {
        let count = count.clamp(MIN_STOPS, MAX_STOPS);
        let colors = (0..count)
            .map(|_| {
                let hue = rng.gen_range(0..360u16);
                let saturation = rng.gen_range(50..100u8);
                let lightness = rng.gen_range(40..80u8);
                Color::hsl(hue, saturation, lightness)
            })
            .collect();
        Self { colors }
    }

    /// Stop count for an unsized shuffle: 3, 4 or 5.
    pub fn random_count<R: Rng + ?Sized>(rng: &mut R) -> usize {
        DEFAULT_RANDOM_COUNT + rng.gen_range(0..3)
    }

    /// Comma-joined literals, as copied by "Copy Palette".
    pub fn palette_text(&self) -> String {
        self.colors
            .iter()
            .map(Color::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Normalized offset of stop `index` among `count` stops.
///
/// A lone stop sits at 0 rather than dividing by zero.
#[inline]
pub fn offset(index: usize, count: usize) -> f64 {
    if count <= 1 {
        0.0
    } else {
        index as f64 / (count - 1) as f64
    }
}

/// Reasons a stop list could not be built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopsError {
    Color(super::ColorParseError),
    Count(usize),
}

impl std::fmt::Display for StopsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StopsError::Color(e) => e.fmt(f),
            StopsError::Count(n) => write!(
                f,
                "a gradient needs {} to {} colors, got {}",
                MIN_STOPS, MAX_STOPS, n
            ),
        }
    }
}

impl std::error::Error for StopsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StopsError::Color(e) => Some(e),
            StopsError::Count(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn stops(lits: &[&str]) -> ColorStops {
        ColorStops::parse(lits).unwrap()
    }

    #[test]
    fn add_then_remove_restores_every_valid_length() {
        let pool = ["#000000", "#111111", "#222222", "#333333"];
        for n in MIN_STOPS..MAX_STOPS {
            let original = stops(&pool[..n]);
            let restored = original.clone().add().remove(n);
            assert_eq!(restored, original, "n = {n}");
        }
    }

    #[test]
    fn add_appends_white() {
        let s = stops(&["#A00000", "#B00000"]).add();
        assert_eq!(s.len(), 3);
        assert_eq!(s.colors()[2].as_str(), "#ffffff");
    }

    #[test]
    fn add_at_five_is_noop() {
        let full = stops(&["#000", "#111", "#222", "#333", "#444"]);
        assert_eq!(full.clone().add(), full);
    }

    #[test]
    fn remove_at_two_is_noop() {
        let pair = stops(&["#AAAAAA", "#BBBBBB"]);
        let after = pair.clone().remove(0);
        assert_eq!(after, pair);
        assert_eq!(after.palette_text(), "#AAAAAA, #BBBBBB");
    }

    #[test]
    fn remove_out_of_range_is_noop() {
        let three = stops(&["#000", "#111", "#222"]);
        assert_eq!(three.clone().remove(7), three);
    }

    #[test]
    fn replace_swaps_one_slot() {
        let s = stops(&["#000", "#111", "#222"]).replace(1, Color::parse("#fff").unwrap());
        assert_eq!(s.palette_text(), "#000, #fff, #222");
        let unchanged = s.clone().replace(3, Color::white());
        assert_eq!(unchanged, s);
    }

    #[test]
    fn offsets_for_three_stops() {
        let s = stops(&["#A00", "#B00", "#C00"]);
        let offsets: Vec<f64> = s.iter_with_offsets().map(|(_, o)| o).collect();
        assert_eq!(offsets, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn lone_stop_offset_is_zero() {
        assert_eq!(offset(0, 1), 0.0);
        assert_eq!(offset(0, 0), 0.0);
    }

    #[test]
    fn new_rejects_bad_counts() {
        assert!(ColorStops::new(vec![Color::white()]).is_none());
        assert!(ColorStops::new(vec![Color::white(); 6]).is_none());
        assert_eq!(
            ColorStops::parse(&["#fff"]).unwrap_err(),
            StopsError::Count(1)
        );
    }

    #[test]
    fn parse_reports_first_bad_color() {
        let err = ColorStops::parse(&["#fff", "nope", "#000"]).unwrap_err();
        assert!(matches!(err, StopsError::Color(ref e) if e.input == "nope"));
    }

    #[test]
    fn load_preset_replaces_wholesale() {
        let s = stops(&["#000", "#111"])
            .load_preset(&["#FF6B6B", "#4ECDC4", "#45B7D1"]);
        assert_eq!(s.palette_text(), "#FF6B6B, #4ECDC4, #45B7D1");
    }

    #[test]
    fn malformed_preset_keeps_current_list() {
        let current = stops(&["#000", "#111"]);
        assert_eq!(current.clone().load_preset(&["#000", "bogus"]), current);
        assert_eq!(current.clone().load_preset(&["#000"]), current);
    }

    #[test]
    fn randomize_stays_in_documented_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let count = ColorStops::random_count(&mut rng);
            assert!((3..=5).contains(&count));
            let s = ColorStops::randomize(count, &mut rng);
            assert_eq!(s.len(), count);
            for c in s.colors() {
                let inner = c
                    .as_str()
                    .strip_prefix("hsl(")
                    .and_then(|t| t.strip_suffix(')'))
                    .unwrap();
                let nums: Vec<u16> = inner
                    .split(", ")
                    .map(|p| p.trim_end_matches('%').parse().unwrap())
                    .collect();
                assert!(nums[0] < 360);
                assert!((50..100).contains(&nums[1]));
                assert!((40..80).contains(&nums[2]));
            }
        }
    }

    #[test]
    fn randomize_clamps_count() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(ColorStops::randomize(0, &mut rng).len(), MIN_STOPS);
        assert_eq!(ColorStops::randomize(99, &mut rng).len(), MAX_STOPS);
    }

    #[test]
    fn randomize_is_reproducible_with_a_seed() {
        let a = ColorStops::randomize(4, &mut StdRng::seed_from_u64(42));
        let b = ColorStops::randomize(4, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }
}
