//! Liveness verdict types produced by the anti-spoof detector.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The closed set of anti-spoof checks.
///
/// The `scores` map in `AntiSpoofResult` is keyed by this enum rather than
/// free-form strings so callers cannot invent check names. Variant order is
/// the order the detector runs the checks, and `BTreeMap` iteration follows
/// it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum LivenessCheck {
    /// Micro-texture grid sampling. Flat prints and screens score low.
    Texture,
    /// 2-D spectral energy ratio. Screens and GAN output sit at the extremes.
    Frequency,
    /// Oriented periodicity (moiré) detection for screen recapture.
    Periodicity,
    /// Chroma skin-band and variance check.
    Color,
    /// Specular catch-light ratio around the eye landmarks.
    EyeReflection,
}

impl LivenessCheck {
    /// All checks in evaluation order.
    pub const ALL: [LivenessCheck; 5] = [
        LivenessCheck::Texture,
        LivenessCheck::Frequency,
        LivenessCheck::Periodicity,
        LivenessCheck::Color,
        LivenessCheck::EyeReflection,
    ];

    /// Stable lowercase name used in reason strings.
    pub fn name(&self) -> &'static str {
        match self {
            LivenessCheck::Texture => "texture",
            LivenessCheck::Frequency => "frequency",
            LivenessCheck::Periodicity => "periodicity",
            LivenessCheck::Color => "color",
            LivenessCheck::EyeReflection => "eye_reflection",
        }
    }
}

/// The verdict of one anti-spoof analysis.
///
/// Computed, returned, forgotten: this core never persists results. A
/// fail-open verdict (unanalyzable image) carries
/// [`AntiSpoofResult::INCOMPLETE_REASON`] so the caller can route it to
/// manual review instead of treating it as a clean pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AntiSpoofResult {
    /// True when the combined score reached the liveness threshold.
    pub is_live: bool,
    /// Weighted combination of the sub-scores, in [0, 1].
    pub confidence: f64,
    /// Per-check sub-scores in [0, 1], keyed by the closed check set.
    pub scores: BTreeMap<LivenessCheck, f64>,
    /// Human-readable explanation of the verdict.
    pub reason: String,
}

impl AntiSpoofResult {
    /// Reason string of a fail-open verdict. Callers must treat a result
    /// carrying this reason as "route to manual review", not as a pass.
    pub const INCOMPLETE_REASON: &'static str = "analysis incomplete";

    /// True when this verdict came from the fail-open path rather than a
    /// completed analysis.
    pub fn is_incomplete(&self) -> bool {
        self.reason == Self::INCOMPLETE_REASON
    }

    /// The fail-open verdict returned when an image cannot be analyzed at
    /// all. Deliberately permissive (`is_live = true`) so an infrastructure
    /// fault never hard-blocks a legitimate user.
    pub fn fail_open() -> Self {
        Self {
            is_live: true,
            confidence: 0.5,
            scores: BTreeMap::new(),
            reason: Self::INCOMPLETE_REASON.to_string(),
        }
    }
}
