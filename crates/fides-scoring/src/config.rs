//! Scoring configuration: weight vector and decision thresholds.
//!
//! Two weight schemes shipped historically and disagree (liveness 0.25
//! with no risk weight vs. liveness 0.20 with a 0.05 risk weight, and
//! different manual-review thresholds). Neither is authoritative, so both
//! are exposed as named presets and a deployment must declare which one it
//! runs — `from_toml_str` has no silent default.

use serde::{Deserialize, Serialize};

use fides_contracts::error::{FidesError, FidesResult};

/// How closely the weight sum must hit 1.0.
const WEIGHT_SUM_EPSILON: f64 = 1e-6;

/// The named historical weight schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WeightScheme {
    /// Five factors, liveness 0.25, thresholds 85/50.
    BalancedV1,
    /// Liveness 0.20 plus an explicit 0.05 risk-factor weight,
    /// thresholds 85/60.
    RiskWeightedV2,
}

/// Per-factor weights. Must sum to 1.0.
///
/// `risk` weights a sixth factor defined as `1 − risk_penalty`; with
/// `risk = 0` the engine reduces to the plain five-factor formula.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub face: f64,
    pub liveness: f64,
    pub document: f64,
    pub age: f64,
    pub uniqueness: f64,
    #[serde(default)]
    pub risk: f64,
}

impl ScoringWeights {
    pub fn balanced_v1() -> Self {
        Self {
            face: 0.30,
            liveness: 0.25,
            document: 0.20,
            age: 0.10,
            uniqueness: 0.15,
            risk: 0.0,
        }
    }

    pub fn risk_weighted_v2() -> Self {
        Self {
            face: 0.30,
            liveness: 0.20,
            document: 0.20,
            age: 0.10,
            uniqueness: 0.15,
            risk: 0.05,
        }
    }

    fn sum(&self) -> f64 {
        self.face + self.liveness + self.document + self.age + self.uniqueness + self.risk
    }

    fn all(&self) -> [(&'static str, f64); 6] {
        [
            ("face", self.face),
            ("liveness", self.liveness),
            ("document", self.document),
            ("age", self.age),
            ("uniqueness", self.uniqueness),
            ("risk", self.risk),
        ]
    }
}

/// Decision thresholds on the 0–100 score scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecisionThresholds {
    /// Score at or above this auto-verifies.
    pub auto_verify: f64,
    /// Score at or above this (but below `auto_verify`) goes to manual
    /// review; anything lower is rejected.
    pub manual_review: f64,
}

/// Full configuration for the trust scoring engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub weights: ScoringWeights,
    pub thresholds: DecisionThresholds,
    /// Face similarity below this raises `LOW_FACE_MATCH` and triggers the
    /// rejection cap.
    pub low_face_match: f64,
}

/// Raw TOML shape: either a `scheme` name or a spelled-out `[weights]`
/// table (threshold overrides allowed in both cases).
#[derive(Debug, Deserialize)]
struct RawScoringConfig {
    scheme: Option<WeightScheme>,
    weights: Option<ScoringWeights>,
    thresholds: Option<DecisionThresholds>,
    low_face_match: Option<f64>,
}

impl ScoringConfig {
    /// The `balanced-v1` preset.
    pub fn balanced_v1() -> Self {
        Self {
            weights: ScoringWeights::balanced_v1(),
            thresholds: DecisionThresholds {
                auto_verify: 85.0,
                manual_review: 50.0,
            },
            low_face_match: 0.5,
        }
    }

    /// The `risk-weighted-v2` preset.
    pub fn risk_weighted_v2() -> Self {
        Self {
            weights: ScoringWeights::risk_weighted_v2(),
            thresholds: DecisionThresholds {
                auto_verify: 85.0,
                manual_review: 60.0,
            },
            low_face_match: 0.5,
        }
    }

    /// Parse a TOML document.
    ///
    /// The document must declare its scheme explicitly — either
    /// `scheme = "balanced-v1" | "risk-weighted-v2"` or a full `[weights]`
    /// table. Declaring both, or neither, is a `ConfigError`.
    pub fn from_toml_str(s: &str) -> FidesResult<Self> {
        let raw: RawScoringConfig =
            toml::from_str(s).map_err(|e| FidesError::ConfigError {
                reason: format!("failed to parse scoring TOML: {}", e),
            })?;

        let mut config = match (raw.scheme, raw.weights) {
            (Some(WeightScheme::BalancedV1), None) => Self::balanced_v1(),
            (Some(WeightScheme::RiskWeightedV2), None) => Self::risk_weighted_v2(),
            (None, Some(weights)) => Self {
                weights,
                thresholds: DecisionThresholds {
                    auto_verify: 85.0,
                    manual_review: 50.0,
                },
                low_face_match: 0.5,
            },
            (Some(_), Some(_)) => {
                return Err(FidesError::ConfigError {
                    reason: "declare either 'scheme' or '[weights]', not both".to_string(),
                })
            }
            (None, None) => {
                return Err(FidesError::ConfigError {
                    reason: "scoring config must declare a 'scheme' or a '[weights]' table"
                        .to_string(),
                })
            }
        };

        if let Some(thresholds) = raw.thresholds {
            config.thresholds = thresholds;
        }
        if let Some(low_face_match) = raw.low_face_match {
            config.low_face_match = low_face_match;
        }
        config.validate()?;
        Ok(config)
    }

    /// Read and parse the file at `path`.
    pub fn from_file(path: &std::path::Path) -> FidesResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| FidesError::ConfigError {
            reason: format!("failed to read scoring config '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Validate weights and thresholds. Called by the engine constructor.
    pub fn validate(&self) -> FidesResult<()> {
        for (name, weight) in self.weights.all() {
            if !(0.0..=1.0).contains(&weight) {
                return Err(FidesError::ConfigError {
                    reason: format!("weight '{}' must be in [0, 1], got {}", name, weight),
                });
            }
        }
        let sum = self.weights.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_EPSILON {
            return Err(FidesError::ConfigError {
                reason: format!("scoring weights must sum to 1.0, got {}", sum),
            });
        }

        let t = &self.thresholds;
        if !(0.0..=100.0).contains(&t.auto_verify) || !(0.0..=100.0).contains(&t.manual_review) {
            return Err(FidesError::ConfigError {
                reason: format!(
                    "thresholds must be in [0, 100], got auto_verify={} manual_review={}",
                    t.auto_verify, t.manual_review
                ),
            });
        }
        if t.manual_review >= t.auto_verify {
            return Err(FidesError::ConfigError {
                reason: format!(
                    "manual_review threshold ({}) must be below auto_verify ({})",
                    t.manual_review, t.auto_verify
                ),
            });
        }

        if !(0.0..=1.0).contains(&self.low_face_match) {
            return Err(FidesError::ConfigError {
                reason: format!(
                    "low_face_match must be in [0, 1], got {}",
                    self.low_face_match
                ),
            });
        }
        Ok(())
    }
}
