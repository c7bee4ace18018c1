//! Corneal reflection analysis.
//!
//! A live eye under ambient light shows a small specular glint; a printed
//! or displayed eye shows either none or a large washed-out highlight.
//! The check measures the fraction of bright pixels in a window around
//! each eye landmark.

use crate::image::{EyePositions, FaceImage};

/// Half-width of the square window inspected around each eye.
const EYE_WINDOW_RADIUS: i64 = 10;
/// Mean channel intensity above which a pixel counts as a glint.
const BRIGHT_THRESHOLD: f64 = 200.0;
/// Bright-pixel ratio band of a plausible specular glint.
const GLINT_BAND: (f64, f64) = (0.01, 0.15);
const GLINT_SCORE: f64 = 0.8;
const WASHED_OUT_SCORE: f64 = 0.4;
const NO_GLINT_SCORE: f64 = 0.3;

/// Reflection score averaged over both eyes. `None` when neither eye
/// window overlaps the image.
pub fn reflection_score(image: &FaceImage, eyes: &EyePositions) -> Option<f64> {
    let left = eye_score(image, eyes.left);
    let right = eye_score(image, eyes.right);
    match (left, right) {
        (Some(l), Some(r)) => Some((l + r) / 2.0),
        (Some(s), None) | (None, Some(s)) => Some(s),
        (None, None) => None,
    }
}

fn eye_score(image: &FaceImage, center: (u32, u32)) -> Option<f64> {
    let (cx, cy) = (center.0 as i64, center.1 as i64);
    let mut total = 0u32;
    let mut bright = 0u32;
    for y in cy - EYE_WINDOW_RADIUS..=cy + EYE_WINDOW_RADIUS {
        for x in cx - EYE_WINDOW_RADIUS..=cx + EYE_WINDOW_RADIUS {
            if x < 0 || y < 0 || x >= image.width() as i64 || y >= image.height() as i64 {
                continue;
            }
            total += 1;
            let (b, g, r) = image.bgr(x as u32, y as u32);
            if (b as f64 + g as f64 + r as f64) / 3.0 > BRIGHT_THRESHOLD {
                bright += 1;
            }
        }
    }
    if total == 0 {
        return None;
    }
    let ratio = bright as f64 / total as f64;
    Some(if ratio > GLINT_BAND.0 && ratio < GLINT_BAND.1 {
        GLINT_SCORE
    } else if ratio >= GLINT_BAND.1 {
        WASHED_OUT_SCORE
    } else {
        NO_GLINT_SCORE
    })
}
