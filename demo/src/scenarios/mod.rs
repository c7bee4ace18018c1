//! Demo scenarios, each wiring the three decision-core engines end to end.

pub mod clean_pass;
pub mod duplicate_identity;
pub mod screen_replay;

use chrono::NaiveDate;
use serde::Serialize;

use fides_contracts::liveness::AntiSpoofResult;
use fides_contracts::signal::VerificationSignal;

/// Pretty-printed JSON for scenario output. Falls back to debug
/// formatting if serialization somehow fails.
pub fn pretty<T: Serialize + std::fmt::Debug>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| format!("{value:#?}"))
}

/// A strong baseline signal wired to the given liveness verdict. The
/// scenarios tweak individual fields from here.
pub fn signal_from_liveness(verdict: &AntiSpoofResult) -> VerificationSignal {
    VerificationSignal {
        face_similarity: 0.94,
        liveness_score: verdict.confidence,
        liveness_passed: verdict.is_live,
        document_confidence: 0.9,
        ocr_confidence: 88.0,
        document_type_verified: true,
        date_of_birth: NaiveDate::from_ymd_opt(1990, 5, 14),
        estimated_age: Some(36),
        is_unique_document: true,
        is_unique_face: true,
        fuzzy_match_found: false,
        device_fingerprint: Some("demo-device-001".to_string()),
        previous_rejections: 0,
    }
}
