//! Skin-tone distribution analysis in YCrCb space.
//!
//! Printed photos and screens shift chrominance away from the band real
//! skin occupies, and flat reproductions lose natural chroma variation.
//! The check scores the mean Cr and Cb of the crop against the skin band
//! and rewards chrominance spread.

use crate::image::FaceImage;

/// Mean-Cr band occupied by skin.
const CR_BAND: (f64, f64) = (133.0, 173.0);
/// Mean-Cb band occupied by skin.
const CB_BAND: (f64, f64) = (77.0, 127.0);
/// Combined chroma std-dev that earns a full variation score.
const FULL_VARIATION_STD: f64 = 40.0;
const OUT_OF_BAND_SCORE: f64 = 0.5;

/// Skin-tone plausibility score in [0, 1]. `None` for an empty crop.
pub fn color_score(image: &FaceImage) -> Option<f64> {
    let count = image.width() as usize * image.height() as usize;
    if count == 0 {
        return None;
    }

    let mut cr_sum = 0.0;
    let mut cb_sum = 0.0;
    let mut cr_sq = 0.0;
    let mut cb_sq = 0.0;
    for y in 0..image.height() {
        for x in 0..image.width() {
            let (b, g, r) = image.bgr(x, y);
            let (b, g, r) = (b as f64, g as f64, r as f64);
            let cr = 128.0 + 0.5 * r - 0.4187 * g - 0.0813 * b;
            let cb = 128.0 - 0.1687 * r - 0.3313 * g + 0.5 * b;
            cr_sum += cr;
            cb_sum += cb;
            cr_sq += cr * cr;
            cb_sq += cb * cb;
        }
    }

    let n = count as f64;
    let cr_mean = cr_sum / n;
    let cb_mean = cb_sum / n;
    let cr_std = (cr_sq / n - cr_mean * cr_mean).max(0.0).sqrt();
    let cb_std = (cb_sq / n - cb_mean * cb_mean).max(0.0).sqrt();

    let cr_score = if (CR_BAND.0..=CR_BAND.1).contains(&cr_mean) {
        1.0
    } else {
        OUT_OF_BAND_SCORE
    };
    let cb_score = if (CB_BAND.0..=CB_BAND.1).contains(&cb_mean) {
        1.0
    } else {
        OUT_OF_BAND_SCORE
    };
    let variation_score = ((cr_std + cb_std) / FULL_VARIATION_STD).min(1.0);

    Some((cr_score + cb_score + variation_score) / 3.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image_from(w: u32, h: u32, f: impl Fn(u32, u32) -> (u8, u8, u8)) -> FaceImage {
        let mut data = Vec::new();
        for y in 0..h {
            for x in 0..w {
                let (b, g, r) = f(x, y);
                data.extend_from_slice(&[b, g, r]);
            }
        }
        FaceImage::from_bgr(w, h, data).unwrap()
    }

    #[test]
    fn flat_skin_tone_lands_in_band() {
        // BGR (110, 140, 180): Cr ~150, Cb ~106, but zero variation. The
        // one-pass variance leaves sub-1e-6 residue on a flat image, so
        // the tolerance must absorb it.
        let image = image_from(32, 32, |_, _| (110, 140, 180));
        let score = color_score(&image).unwrap();
        assert!((score - 2.0 / 3.0).abs() < 1e-6, "score was {score}");
    }

    #[test]
    fn varied_skin_tone_beats_flat_skin_tone() {
        let flat = image_from(32, 32, |_, _| (110, 140, 180));
        let varied = image_from(32, 32, |x, y| {
            let jitter = ((x * 31 + y * 17) % 29) as i32 - 14;
            (
                (110 + jitter).clamp(0, 255) as u8,
                (140 - jitter).clamp(0, 255) as u8,
                (180 + jitter).clamp(0, 255) as u8,
            )
        });
        assert!(color_score(&varied).unwrap() > color_score(&flat).unwrap());
    }

    #[test]
    fn grayscale_image_misses_both_bands() {
        // Pure gray sits at Cr = Cb = 128, just outside both bands.
        let image = image_from(32, 32, |_, _| (200, 200, 200));
        let score = color_score(&image).unwrap();
        assert!((score - 1.0 / 3.0).abs() < 1e-6, "score was {score}");
    }

    #[test]
    fn blue_cast_misses_the_skin_band() {
        let image = image_from(32, 32, |_, _| (240, 80, 40));
        let skin = image_from(32, 32, |_, _| (110, 140, 180));
        assert!(color_score(&image).unwrap() < color_score(&skin).unwrap());
    }
}
