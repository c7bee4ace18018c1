//! The anti-spoof detector.
//!
//! Runs every sub-check over a face crop, combines the scores with the
//! configured weights, and renders a verdict. The detector fails OPEN:
//! an image that cannot be analyzed at all yields a permissive verdict
//! carrying [`AntiSpoofResult::INCOMPLETE_REASON`] so callers can route
//! it to manual review instead of hard-blocking the user. An image that
//! exceeds the configured size cap is a hard error instead, since the
//! caller sent something the pipeline was never meant to accept.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use fides_contracts::error::{FidesError, FidesResult};
use fides_contracts::liveness::{AntiSpoofResult, LivenessCheck};

use crate::checks;
use crate::config::LivenessConfig;
use crate::image::{EyePositions, FaceImage};

/// Images with a shorter edge below this cannot carry face texture.
const MIN_ANALYZABLE_EDGE: u32 = 16;
/// Substituted when a sub-check finds its input degenerate.
const NEUTRAL_SCORE: f64 = 0.5;
/// Sub-scores below this are listed as failed checks in the reason.
const FAILED_CHECK_THRESHOLD: f64 = 0.5;

/// Stateless spoof detector. Cheap to clone; construct once per
/// configuration and share.
#[derive(Debug, Clone)]
pub struct LivenessDetector {
    config: LivenessConfig,
}

impl LivenessDetector {
    /// Build a detector, validating the configuration up front.
    pub fn new(config: LivenessConfig) -> FidesResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Detector with the deployment default configuration.
    pub fn with_defaults() -> Self {
        Self {
            config: LivenessConfig::default(),
        }
    }

    pub fn config(&self) -> &LivenessConfig {
        &self.config
    }

    /// Analyze a face crop. `eyes` are optional landmarks; without them
    /// the eye-reflection check contributes a neutral score.
    pub fn analyze(
        &self,
        image: &FaceImage,
        eyes: Option<&EyePositions>,
    ) -> FidesResult<AntiSpoofResult> {
        if image.max_edge() > self.config.max_edge {
            return Err(FidesError::ImageTooLarge {
                edge: image.max_edge(),
                max_edge: self.config.max_edge,
            });
        }

        let gray = image.to_gray();
        if image.min_edge() < MIN_ANALYZABLE_EDGE || gray.is_flat() {
            warn!(
                width = image.width(),
                height = image.height(),
                "image unanalyzable, failing open"
            );
            return Ok(AntiSpoofResult::fail_open());
        }

        let texture = checks::texture_score(&gray).unwrap_or(NEUTRAL_SCORE);
        let frequency = checks::frequency_score(&gray).unwrap_or(NEUTRAL_SCORE);
        let periodicity = checks::periodicity_score(&gray).unwrap_or(NEUTRAL_SCORE);
        let color = checks::color_score(image).unwrap_or(NEUTRAL_SCORE);
        let eye_reflection = match eyes {
            Some(eyes) => checks::reflection_score(image, eyes).unwrap_or(NEUTRAL_SCORE),
            None => NEUTRAL_SCORE,
        };
        debug!(
            texture,
            frequency, periodicity, color, eye_reflection, "sub-check scores"
        );

        let w = &self.config.weights;
        let combined = w.texture * texture
            + w.frequency * frequency
            + w.periodicity * periodicity
            + w.color * color
            + w.eye_reflection * eye_reflection;
        let confidence = round3(combined);
        let is_live = confidence >= self.config.liveness_threshold;

        let mut scores = BTreeMap::new();
        scores.insert(LivenessCheck::Texture, texture);
        scores.insert(LivenessCheck::Frequency, frequency);
        scores.insert(LivenessCheck::Periodicity, periodicity);
        scores.insert(LivenessCheck::Color, color);
        scores.insert(LivenessCheck::EyeReflection, eye_reflection);

        let failed: Vec<&str> = scores
            .iter()
            .filter(|(_, score)| **score < FAILED_CHECK_THRESHOLD)
            .map(|(check, _)| check.name())
            .collect();
        let reason = if !failed.is_empty() {
            format!("Failed checks: {}", failed.join(", "))
        } else if is_live {
            "All liveness checks passed".to_string()
        } else {
            "Overall confidence too low".to_string()
        };

        debug!(is_live, confidence, reason = %reason, "liveness analysis complete");
        Ok(AntiSpoofResult {
            is_live,
            confidence,
            scores,
            reason,
        })
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
