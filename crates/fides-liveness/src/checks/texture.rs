//! Micro-texture analysis.
//!
//! Real skin shows natural intensity variation between neighboring
//! pixels; flat prints and screens are much smoother. A coarse grid of
//! interior pixels is sampled and each sample counts its 8-connected
//! neighbors whose intensity differs by more than a fixed delta. The
//! score is the fraction of samples with at least three such neighbors.

use crate::image::GrayImage;

/// Sample every other interior pixel.
const STRIDE: u32 = 2;
/// Intensity difference that counts as texture.
const DELTA: i32 = 10;
/// Neighbors that must differ for a sample to count as textured.
const MIN_DIFFERING: u32 = 3;

/// Fraction of grid samples showing natural micro-texture, in [0, 1].
/// Higher means more consistent with a live capture. `None` when the
/// image has no interior pixels to sample.
pub fn texture_score(gray: &GrayImage) -> Option<f64> {
    let (w, h) = (gray.width(), gray.height());
    if w < 3 || h < 3 {
        return None;
    }

    let mut textured = 0u64;
    let mut total = 0u64;

    let mut y = 1;
    while y < h - 1 {
        let mut x = 1;
        while x < w - 1 {
            let center = gray.at(x, y) as i32;
            let mut differing = 0u32;
            for dy in -1i32..=1 {
                for dx in -1i32..=1 {
                    if dx == 0 && dy == 0 {
                        continue;
                    }
                    let neighbor =
                        gray.at((x as i32 + dx) as u32, (y as i32 + dy) as u32) as i32;
                    if (center - neighbor).abs() > DELTA {
                        differing += 1;
                    }
                }
            }
            if differing >= MIN_DIFFERING {
                textured += 1;
            }
            total += 1;
            x += STRIDE;
        }
        y += STRIDE;
    }

    if total == 0 {
        None
    } else {
        Some(textured as f64 / total as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::FaceImage;

    fn gray_from(width: u32, height: u32, f: impl Fn(u32, u32) -> u8) -> GrayImage {
        let mut data = Vec::new();
        for y in 0..height {
            for x in 0..width {
                let v = f(x, y);
                data.extend_from_slice(&[v, v, v]);
            }
        }
        FaceImage::from_bgr(width, height, data).unwrap().to_gray()
    }

    #[test]
    fn flat_image_scores_zero() {
        let gray = gray_from(32, 32, |_, _| 120);
        assert_eq!(texture_score(&gray), Some(0.0));
    }

    #[test]
    fn noisy_image_scores_high() {
        // Deterministic pseudo-noise with swings far above the delta.
        let gray = gray_from(32, 32, |x, y| {
            let n = x.wrapping_mul(31).wrapping_add(y.wrapping_mul(57)) % 97;
            (60 + (n * 2) % 120) as u8
        });
        let score = texture_score(&gray).unwrap();
        assert!(score > 0.5, "score was {score}");
    }

    #[test]
    fn too_small_image_is_degenerate() {
        let gray = gray_from(2, 2, |_, _| 50);
        assert_eq!(texture_score(&gray), None);
    }

    #[test]
    fn smooth_gradient_scores_low() {
        // 1 intensity step per pixel never exceeds the delta.
        let gray = gray_from(64, 64, |x, _| (x * 2) as u8);
        let score = texture_score(&gray).unwrap();
        assert!(score < 0.1, "score was {score}");
    }
}
