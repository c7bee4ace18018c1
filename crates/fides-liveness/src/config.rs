//! Liveness detector configuration.

use serde::{Deserialize, Serialize};

use fides_contracts::error::{FidesError, FidesResult};

/// How closely the check weights must sum to 1.0.
const WEIGHT_SUM_EPSILON: f64 = 1e-6;

/// Per-check weights. Must sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CheckWeights {
    pub texture: f64,
    pub frequency: f64,
    pub periodicity: f64,
    pub color: f64,
    pub eye_reflection: f64,
}

impl Default for CheckWeights {
    fn default() -> Self {
        Self {
            texture: 0.25,
            frequency: 0.20,
            periodicity: 0.25,
            color: 0.15,
            eye_reflection: 0.15,
        }
    }
}

impl CheckWeights {
    fn sum(&self) -> f64 {
        self.texture + self.frequency + self.periodicity + self.color + self.eye_reflection
    }
}

/// Configuration for the liveness detector.
///
/// Deserializable from TOML; every field has the deployment default:
///
/// ```toml
/// liveness_threshold = 0.65
/// max_edge = 2048
///
/// [weights]
/// texture = 0.25
/// frequency = 0.20
/// periodicity = 0.25
/// color = 0.15
/// eye_reflection = 0.15
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LivenessConfig {
    #[serde(default)]
    pub weights: CheckWeights,
    /// Combined score at or above this is a live verdict.
    #[serde(default = "default_threshold")]
    pub liveness_threshold: f64,
    /// Images with a longer edge are rejected outright — the spectral
    /// analyzers scale with pixel count.
    #[serde(default = "default_max_edge")]
    pub max_edge: u32,
}

fn default_threshold() -> f64 {
    0.65
}

fn default_max_edge() -> u32 {
    2048
}

impl Default for LivenessConfig {
    fn default() -> Self {
        Self {
            weights: CheckWeights::default(),
            liveness_threshold: default_threshold(),
            max_edge: default_max_edge(),
        }
    }
}

impl LivenessConfig {
    /// Validate weights and thresholds. Called by `LivenessDetector::new`;
    /// a violation must abort startup.
    pub fn validate(&self) -> FidesResult<()> {
        let w = &self.weights;
        for (name, weight) in [
            ("texture", w.texture),
            ("frequency", w.frequency),
            ("periodicity", w.periodicity),
            ("color", w.color),
            ("eye_reflection", w.eye_reflection),
        ] {
            if !(0.0..=1.0).contains(&weight) {
                return Err(FidesError::ConfigError {
                    reason: format!("check weight '{}' must be in [0, 1], got {}", name, weight),
                });
            }
        }
        if (w.sum() - 1.0).abs() > WEIGHT_SUM_EPSILON {
            return Err(FidesError::ConfigError {
                reason: format!("liveness check weights must sum to 1.0, got {}", w.sum()),
            });
        }
        if !(0.0..=1.0).contains(&self.liveness_threshold) {
            return Err(FidesError::ConfigError {
                reason: format!(
                    "liveness_threshold must be in [0, 1], got {}",
                    self.liveness_threshold
                ),
            });
        }
        if self.max_edge == 0 {
            return Err(FidesError::ConfigError {
                reason: "max_edge must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}
