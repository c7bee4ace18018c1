//! Deterministic synthetic inputs for the demo scenarios.
//!
//! No camera or face model is wired into the demo, so the scenarios run
//! on generated data: a skin-toned face crop with natural-looking grain
//! and eye glints, a striped screen-replay crop, and pseudo-random
//! L2-normalized embeddings.

use fides_liveness::{EyePositions, FaceImage};

pub const EMBEDDING_DIM: usize = 128;

/// A face crop that passes the liveness checks: skin-band chrominance,
/// block-scale and pixel-scale variation, and one specular glint per eye.
pub fn live_face() -> FaceImage {
    face_from(|x, y| {
        let near_left = (19..22).contains(&x) && (19..21).contains(&y);
        let near_right = (43..46).contains(&x) && (19..21).contains(&y);
        if near_left || near_right {
            return (255, 255, 255);
        }
        let coarse = jitter(x / 4, y / 4, 1, 30);
        let b = (110 + coarse + jitter(x, y, 2, 18)).clamp(0, 255) as u8;
        let g = (140 + coarse + jitter(x, y, 3, 18)).clamp(0, 255) as u8;
        let r = (180 + coarse + jitter(x, y, 4, 18)).clamp(0, 255) as u8;
        (b, g, r)
    })
}

/// A recaptured-screen crop: a hard pixel grid with no skin chrominance.
pub fn screen_replay_face() -> FaceImage {
    face_from(|x, _| if x % 4 < 2 { (40, 40, 40) } else { (220, 220, 220) })
}

pub fn eye_positions() -> EyePositions {
    EyePositions {
        left: (20, 20),
        right: (44, 20),
    }
}

/// Pseudo-random L2-normalized embedding, stable for a given seed.
pub fn embedding(seed: u32) -> Vec<f32> {
    let mut v: Vec<f32> = (0..EMBEDDING_DIM as u32)
        .map(|i| (hash(i, 0, seed) % 2_001) as f32 / 1_000.0 - 1.0)
        .collect();
    normalize(&mut v);
    v
}

/// The same embedding with sub-quantization noise, standing in for a
/// second capture of the same face.
pub fn recaptured(embedding: &[f32]) -> Vec<f32> {
    let mut v: Vec<f32> = embedding
        .iter()
        .enumerate()
        .map(|(i, &x)| x + (hash(i as u32, 1, 99) % 3) as f32 * 1e-6)
        .collect();
    normalize(&mut v);
    v
}

fn normalize(v: &mut [f32]) {
    let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}

fn face_from(f: impl Fn(u32, u32) -> (u8, u8, u8)) -> FaceImage {
    let mut data = Vec::new();
    for y in 0..64 {
        for x in 0..64 {
            let (b, g, r) = f(x, y);
            data.extend_from_slice(&[b, g, r]);
        }
    }
    // 64 * 64 * 3 bytes by construction.
    FaceImage::from_bgr(64, 64, data).unwrap_or_else(|_| unreachable!())
}

fn hash(x: u32, y: u32, seed: u32) -> u32 {
    let mut h = x.wrapping_mul(374_761_393)
        ^ y.wrapping_mul(668_265_263)
        ^ seed.wrapping_mul(2_246_822_519);
    h ^= h >> 13;
    h = h.wrapping_mul(1_274_126_177);
    h ^ (h >> 16)
}

fn jitter(x: u32, y: u32, seed: u32, amplitude: i32) -> i32 {
    (hash(x, y, seed) % (2 * amplitude as u32 + 1)) as i32 - amplitude
}
