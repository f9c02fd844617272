//! Film-grain synthesis.
//!
//! Grain is achromatic: each pixel gets a single noise sample that is added to
//! R, G and B alike, so it shifts brightness without tinting. Alpha is never
//! touched.

use image::RgbaImage;
use rand::Rng;

/// Largest accepted grain intensity.
pub const MAX_GRAIN: f32 = 100.0;

/// Adds grain of intensity `amount` (clamped to `[0, 100]`) to `img`.
///
/// Per pixel: `noise = (uniform() - 0.5) * amount * 2`, added to each color
/// channel, rounded and clamped to `[0, 255]`. At `amount == 0` (or NaN) the
/// buffer is left byte-identical and `rng` is not consumed.
pub fn apply_grain<R: Rng + ?Sized>(img: &mut RgbaImage, amount: f32, rng: &mut R) {
    if amount.is_nan() || amount <= 0.0 {
        return;
    }
    let spread = amount.min(MAX_GRAIN) as f64 * 2.0;

    for px in img.pixels_mut() {
        let noise = (rng.r#gen::<f64>() - 0.5) * spread;
        for c in &mut px.0[..3] {
            *c = (*c as f64 + noise).round().clamp(0.0, 255.0) as u8;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn ramp(w: u32, h: u32) -> RgbaImage {
        RgbaImage::from_fn(w, h, |x, y| {
            let v = ((x + y * w) * 37 % 256) as u8;
            Rgba([v, 255 - v, v / 2, (x * 5 % 256) as u8])
        })
    }

    #[test]
    fn zero_grain_is_byte_identical() {
        let original = ramp(16, 9);
        let mut img = original.clone();
        apply_grain(&mut img, 0.0, &mut StdRng::seed_from_u64(3));
        assert_eq!(img.as_raw(), original.as_raw());
    }

    #[test]
    fn zero_grain_does_not_touch_rng() {
        let mut a = StdRng::seed_from_u64(9);
        let mut b = StdRng::seed_from_u64(9);
        apply_grain(&mut ramp(4, 4), 0.0, &mut a);
        assert_eq!(a.r#gen::<u64>(), b.r#gen::<u64>());
    }

    #[test]
    fn full_grain_stays_in_byte_range_and_keeps_alpha() {
        // Saturated pixels push the clamp in both directions.
        let src = RgbaImage::from_fn(32, 32, |x, _| {
            if x % 2 == 0 { Rgba([0, 0, 0, 17]) } else { Rgba([255, 255, 255, 200]) }
        });
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..20 {
            let mut img = src.clone();
            apply_grain(&mut img, 100.0, &mut rng);
            for (out, inp) in img.pixels().zip(src.pixels()) {
                assert_eq!(out.0[3], inp.0[3]);
            }
        }
    }

    #[test]
    fn noise_is_achromatic() {
        let mut img = RgbaImage::from_pixel(64, 64, Rgba([128, 128, 128, 255]));
        apply_grain(&mut img, 60.0, &mut StdRng::seed_from_u64(5));
        let mut changed = 0;
        for px in img.pixels() {
            assert_eq!(px.0[0], px.0[1]);
            assert_eq!(px.0[1], px.0[2]);
            if px.0[0] != 128 {
                changed += 1;
            }
            // |noise| <= amount, so mid-grey never clamps.
            assert!((68..=188).contains(&px.0[0]));
        }
        assert!(changed > 64 * 64 / 2);
    }

    #[test]
    fn draws_one_sample_per_pixel() {
        let mut rng = StdRng::seed_from_u64(21);
        let mut reference = StdRng::seed_from_u64(21);
        let mut img = RgbaImage::from_pixel(5, 3, Rgba([90, 90, 90, 255]));
        apply_grain(&mut img, 30.0, &mut rng);
        for _ in 0..15 {
            let _: f64 = reference.r#gen();
        }
        assert_eq!(rng.r#gen::<u64>(), reference.r#gen::<u64>());
    }

    #[test]
    fn seeded_output_is_reproducible() {
        let mut a = ramp(20, 20);
        let mut b = ramp(20, 20);
        apply_grain(&mut a, 40.0, &mut StdRng::seed_from_u64(77));
        apply_grain(&mut b, 40.0, &mut StdRng::seed_from_u64(77));
        assert_eq!(a.as_raw(), b.as_raw());
    }

    #[test]
    fn intensity_above_domain_is_clamped() {
        let mut img = RgbaImage::from_pixel(64, 64, Rgba([128, 128, 128, 255]));
        apply_grain(&mut img, 10_000.0, &mut StdRng::seed_from_u64(2));
        // With amount clamped to 100 the noise never exceeds +-100.
        assert!(img.pixels().all(|p| (28..=228).contains(&p.0[0])));
    }
}
