//! Trust score result types.
//!
//! The scoring engine fuses a `VerificationSignal` into a single
//! `TrustScoreResult`. Everything here is a closed enumeration or a fixed
//! field — no open-ended maps beyond `breakdown`, which is itself keyed by
//! the closed `TrustFactor` set.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The discrete verification outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// Score reached the auto-verify threshold.
    AutoVerified,
    /// Score landed between the manual-review and auto-verify thresholds,
    /// or a critical override demoted an auto-verification.
    ManualReview,
    /// Score fell below the manual-review threshold.
    Rejected,
}

/// How certain the engine is about its decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceBand {
    High,
    Medium,
    Low,
}

/// The closed set of factors contributing to the trust score.
///
/// Variant order is evaluation order; the `breakdown` map iterates in this
/// order, which keeps serialized output byte-identical across calls.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TrustFactor {
    Face,
    Liveness,
    Document,
    Age,
    Uniqueness,
    RiskPenalty,
}

/// Machine-readable flag raised during scoring.
///
/// Serialized as its stable string code (e.g. `"LOW_FACE_MATCH"`,
/// `"PREVIOUS_REJECTIONS_2"`) so downstream systems can match on it
/// without parsing reason prose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrustFlag {
    LowFaceMatch,
    LivenessFailed,
    UnclearDocument,
    LowOcrQuality,
    AgeMismatch,
    DuplicateDocument,
    DuplicateFace,
    FuzzyMatch,
    PreviousRejections(u32),
}

impl TrustFlag {
    /// The stable wire code for this flag.
    pub fn code(&self) -> String {
        match self {
            TrustFlag::LowFaceMatch => "LOW_FACE_MATCH".to_string(),
            TrustFlag::LivenessFailed => "LIVENESS_FAILED".to_string(),
            TrustFlag::UnclearDocument => "UNCLEAR_DOCUMENT".to_string(),
            TrustFlag::LowOcrQuality => "LOW_OCR_QUALITY".to_string(),
            TrustFlag::AgeMismatch => "AGE_MISMATCH".to_string(),
            TrustFlag::DuplicateDocument => "DUPLICATE_DOCUMENT".to_string(),
            TrustFlag::DuplicateFace => "DUPLICATE_FACE".to_string(),
            TrustFlag::FuzzyMatch => "FUZZY_MATCH".to_string(),
            TrustFlag::PreviousRejections(n) => format!("PREVIOUS_REJECTIONS_{n}"),
        }
    }

    /// Parse a wire code back into a flag. Returns `None` for unknown codes.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "LOW_FACE_MATCH" => Some(TrustFlag::LowFaceMatch),
            "LIVENESS_FAILED" => Some(TrustFlag::LivenessFailed),
            "UNCLEAR_DOCUMENT" => Some(TrustFlag::UnclearDocument),
            "LOW_OCR_QUALITY" => Some(TrustFlag::LowOcrQuality),
            "AGE_MISMATCH" => Some(TrustFlag::AgeMismatch),
            "DUPLICATE_DOCUMENT" => Some(TrustFlag::DuplicateDocument),
            "DUPLICATE_FACE" => Some(TrustFlag::DuplicateFace),
            "FUZZY_MATCH" => Some(TrustFlag::FuzzyMatch),
            other => {
                let count = other.strip_prefix("PREVIOUS_REJECTIONS_")?;
                count.parse().ok().map(TrustFlag::PreviousRejections)
            }
        }
    }
}

impl fmt::Display for TrustFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code())
    }
}

impl Serialize for TrustFlag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.code())
    }
}

impl<'de> Deserialize<'de> for TrustFlag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        TrustFlag::from_code(&code)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown trust flag '{code}'")))
    }
}

/// The fused verification verdict for one identity check.
///
/// Immutable value object: computed, returned, forgotten. Any archiving is
/// the API layer's responsibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrustScoreResult {
    /// Final trust score on the 0–100 scale, rounded to one decimal.
    pub score: f64,
    /// The discrete outcome derived from the configured thresholds.
    pub decision: Decision,
    /// Confidence band tied to the decision.
    pub confidence: ConfidenceBand,
    /// Per-factor contributions on the 0–100 scale, for audit.
    pub breakdown: BTreeMap<TrustFactor, f64>,
    /// Ordered human-readable explanations. Never empty: the first entry
    /// always summarizes the decision.
    pub reasons: Vec<String>,
    /// Machine-readable flags, in factor evaluation order. Every flag has
    /// at least one corresponding entry in `reasons`.
    pub flags: Vec<TrustFlag>,
}
