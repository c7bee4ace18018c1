//! Screen-grid periodicity analysis.
//!
//! A photographed display overlays the face with the panel's pixel
//! lattice, which shows up as strong repeating structure along the grid
//! axes. Intensity profiles are sampled along four directions, band-pass
//! filtered to strip illumination gradients, and autocorrelated; a
//! profile with several strong correlation peaks is treated as periodic.

use crate::image::GrayImage;

/// Spacing between sampled profiles, in pixels.
const PROFILE_STRIDE: u32 = 8;
/// Profiles shorter than this carry too few lags to judge.
const MIN_PROFILE_LEN: usize = 16;
/// Half-width of the centered moving average used as a band-pass.
const SMOOTH_HALF: usize = 4;
const CORRELATION_THRESHOLD: f64 = 0.8;
/// Strong lags needed before a profile counts as periodic.
const MIN_PERIODIC_LAGS: usize = 3;
const PERIODIC_SCORE: f64 = 0.2;

/// Periodicity score: 1.0 when no sampled profile shows grid-like
/// repetition, [`PERIODIC_SCORE`] when any does. `None` when the image is
/// too small to yield a single analyzable profile.
pub fn periodicity_score(gray: &GrayImage) -> Option<f64> {
    let mut analyzable = 0u32;
    let mut periodic = 0u32;
    for profile in sample_profiles(gray) {
        if profile.len() < MIN_PROFILE_LEN {
            continue;
        }
        analyzable += 1;
        if is_periodic(&profile) {
            periodic += 1;
        }
    }
    if analyzable == 0 {
        return None;
    }
    Some(if periodic > 0 { PERIODIC_SCORE } else { 1.0 })
}

/// Intensity profiles along the horizontal, vertical, and both diagonal
/// directions, spaced by [`PROFILE_STRIDE`].
fn sample_profiles(gray: &GrayImage) -> Vec<Vec<f64>> {
    let (w, h) = (gray.width(), gray.height());
    let mut profiles = Vec::new();

    for y in (0..h).step_by(PROFILE_STRIDE as usize) {
        profiles.push((0..w).map(|x| gray.at(x, y) as f64).collect());
    }
    for x in (0..w).step_by(PROFILE_STRIDE as usize) {
        profiles.push((0..h).map(|y| gray.at(x, y) as f64).collect());
    }
    // Diagonals walk from the top edge.
    for x0 in (0..w).step_by(PROFILE_STRIDE as usize) {
        let mut down_right = Vec::new();
        let mut down_left = Vec::new();
        for t in 0..h {
            if x0 + t < w {
                down_right.push(gray.at(x0 + t, t) as f64);
            }
            if t <= x0 {
                down_left.push(gray.at(x0 - t, t) as f64);
            }
        }
        profiles.push(down_right);
        profiles.push(down_left);
    }
    profiles
}

fn is_periodic(profile: &[f64]) -> bool {
    let detrended = band_pass(profile);
    let max_lag = detrended.len() / 2;
    let mut strong = 0usize;
    for lag in 2..=max_lag {
        if autocorrelation(&detrended, lag) > CORRELATION_THRESHOLD {
            strong += 1;
            if strong >= MIN_PERIODIC_LAGS {
                return true;
            }
        }
    }
    false
}

/// Subtracts a centered moving average, removing DC and slow gradients
/// while keeping grid-frequency structure. Edges use a clamped window.
fn band_pass(profile: &[f64]) -> Vec<f64> {
    let n = profile.len();
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let lo = i.saturating_sub(SMOOTH_HALF);
        let hi = (i + SMOOTH_HALF).min(n - 1);
        let window = &profile[lo..=hi];
        let mean = window.iter().sum::<f64>() / window.len() as f64;
        out.push(profile[i] - mean);
    }
    out
}

/// Pearson correlation between the signal and itself shifted by `lag`.
fn autocorrelation(signal: &[f64], lag: usize) -> f64 {
    let n = signal.len() - lag;
    let a = &signal[..n];
    let b = &signal[lag..];
    let mean_a = a.iter().sum::<f64>() / n as f64;
    let mean_b = b.iter().sum::<f64>() / n as f64;
    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for i in 0..n {
        let da = a[i] - mean_a;
        let db = b[i] - mean_b;
        cov += da * db;
        var_a += da * da;
        var_b += db * db;
    }
    let denom = (var_a * var_b).sqrt();
    if denom <= f64::EPSILON {
        return 0.0;
    }
    cov / denom
}
