//! # fides-contracts
//!
//! Shared types and contracts for the FIDES identity-verification decision
//! core.
//!
//! All crates in the workspace import from here. No business logic lives in
//! this crate — only data definitions, boundary validation, and error types.

pub mod error;
pub mod hash;
pub mod liveness;
pub mod score;
pub mod signal;

#[cfg(test)]
mod tests {
    use crate::error::FidesError;
    use crate::hash::{parse_fuzzy_tag, EmbeddingHashSet};
    use crate::liveness::AntiSpoofResult;
    use crate::score::{Decision, TrustFactor, TrustFlag};
    use crate::signal::VerificationSignal;

    fn valid_signal() -> VerificationSignal {
        VerificationSignal {
            face_similarity: 0.92,
            liveness_score: 0.9,
            liveness_passed: true,
            document_confidence: 0.9,
            ocr_confidence: 85.0,
            document_type_verified: true,
            date_of_birth: None,
            estimated_age: None,
            is_unique_document: true,
            is_unique_face: true,
            fuzzy_match_found: false,
            device_fingerprint: None,
            previous_rejections: 0,
        }
    }

    // ── VerificationSignal validation ────────────────────────────────────────

    #[test]
    fn valid_signal_passes_validation() {
        assert!(valid_signal().validate().is_ok());
    }

    #[test]
    fn face_similarity_above_one_is_rejected() {
        let mut signal = valid_signal();
        signal.face_similarity = 1.2;

        match signal.validate() {
            Err(FidesError::SignalOutOfRange { field, value, .. }) => {
                assert_eq!(field, "face_similarity");
                assert_eq!(value, 1.2);
            }
            other => panic!("expected SignalOutOfRange, got {:?}", other),
        }
    }

    #[test]
    fn negative_liveness_score_is_rejected() {
        let mut signal = valid_signal();
        signal.liveness_score = -0.01;
        assert!(signal.validate().is_err());
    }

    #[test]
    fn ocr_confidence_uses_percent_scale() {
        let mut signal = valid_signal();
        signal.ocr_confidence = 85.0;
        assert!(signal.validate().is_ok());

        signal.ocr_confidence = 101.0;
        assert!(signal.validate().is_err());
    }

    #[test]
    fn nan_field_is_rejected() {
        let mut signal = valid_signal();
        signal.document_confidence = f64::NAN;
        assert!(signal.validate().is_err());
    }

    #[test]
    fn first_violation_wins_in_declaration_order() {
        let mut signal = valid_signal();
        signal.face_similarity = 2.0;
        signal.ocr_confidence = -5.0;

        match signal.validate() {
            Err(FidesError::SignalOutOfRange { field, .. }) => {
                assert_eq!(field, "face_similarity");
            }
            other => panic!("expected SignalOutOfRange, got {:?}", other),
        }
    }

    // ── TrustFlag wire codes ─────────────────────────────────────────────────

    #[test]
    fn flag_codes_round_trip() {
        let flags = [
            TrustFlag::LowFaceMatch,
            TrustFlag::LivenessFailed,
            TrustFlag::UnclearDocument,
            TrustFlag::LowOcrQuality,
            TrustFlag::AgeMismatch,
            TrustFlag::DuplicateDocument,
            TrustFlag::DuplicateFace,
            TrustFlag::FuzzyMatch,
            TrustFlag::PreviousRejections(3),
        ];
        for flag in flags {
            assert_eq!(TrustFlag::from_code(&flag.code()), Some(flag));
        }
    }

    #[test]
    fn previous_rejections_code_carries_count() {
        assert_eq!(TrustFlag::PreviousRejections(2).code(), "PREVIOUS_REJECTIONS_2");
    }

    #[test]
    fn unknown_flag_code_is_none() {
        assert_eq!(TrustFlag::from_code("TOTALLY_UNKNOWN"), None);
        assert_eq!(TrustFlag::from_code("PREVIOUS_REJECTIONS_x"), None);
    }

    #[test]
    fn flag_serializes_as_plain_string() {
        let json = serde_json::to_string(&TrustFlag::DuplicateFace).unwrap();
        assert_eq!(json, "\"DUPLICATE_FACE\"");

        let decoded: TrustFlag = serde_json::from_str("\"PREVIOUS_REJECTIONS_1\"").unwrap();
        assert_eq!(decoded, TrustFlag::PreviousRejections(1));
    }

    // ── Decision / TrustFactor serde ─────────────────────────────────────────

    #[test]
    fn decision_round_trips_snake_case() {
        let json = serde_json::to_string(&Decision::AutoVerified).unwrap();
        assert_eq!(json, "\"auto_verified\"");
        let decoded: Decision = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, Decision::AutoVerified);
    }

    #[test]
    fn trust_factor_order_matches_evaluation_order() {
        assert!(TrustFactor::Face < TrustFactor::Liveness);
        assert!(TrustFactor::Liveness < TrustFactor::Document);
        assert!(TrustFactor::Document < TrustFactor::Age);
        assert!(TrustFactor::Age < TrustFactor::Uniqueness);
        assert!(TrustFactor::Uniqueness < TrustFactor::RiskPenalty);
    }

    // ── AntiSpoofResult fail-open ────────────────────────────────────────────

    #[test]
    fn fail_open_is_distinguishable_from_a_pass() {
        let result = AntiSpoofResult::fail_open();
        assert!(result.is_live);
        assert_eq!(result.confidence, 0.5);
        assert!(result.is_incomplete());
        assert_eq!(result.reason, AntiSpoofResult::INCOMPLETE_REASON);
    }

    // ── EmbeddingHashSet format ──────────────────────────────────────────────

    #[test]
    fn well_formed_hash_set_is_accepted() {
        let set = EmbeddingHashSet {
            embedding_hash: "ab".repeat(32),
            fuzzy_hashes: vec![
                format!("L0_{}", "0f".repeat(8)),
                format!("L1_{}", "1e".repeat(8)),
                format!("L2_{}", "2d".repeat(8)),
                format!("L3_{}", "3c".repeat(8)),
            ],
        };
        assert!(set.is_well_formed());
    }

    #[test]
    fn wrong_level_order_is_rejected() {
        let set = EmbeddingHashSet {
            embedding_hash: "ab".repeat(32),
            fuzzy_hashes: vec![
                format!("L1_{}", "0f".repeat(8)),
                format!("L0_{}", "1e".repeat(8)),
                format!("L2_{}", "2d".repeat(8)),
                format!("L3_{}", "3c".repeat(8)),
            ],
        };
        assert!(!set.is_well_formed());
    }

    #[test]
    fn parse_fuzzy_tag_validates_format() {
        assert_eq!(parse_fuzzy_tag(&format!("L2_{}", "ab".repeat(8))), Some(2));
        // Too-short digest, missing tag, out-of-range level.
        assert_eq!(parse_fuzzy_tag("L2_abcd"), None);
        assert_eq!(parse_fuzzy_tag("abcdef"), None);
        assert_eq!(parse_fuzzy_tag(&format!("L9_{}", "ab".repeat(8))), None);
    }

    // ── FidesError display messages ──────────────────────────────────────────

    #[test]
    fn error_signal_out_of_range_display() {
        let err = FidesError::SignalOutOfRange {
            field: "face_similarity",
            value: 1.5,
            expected: "[0, 1]",
        };
        let msg = err.to_string();
        assert!(msg.contains("face_similarity"));
        assert!(msg.contains("1.5"));
    }

    #[test]
    fn error_embedding_dimension_display() {
        let err = FidesError::EmbeddingDimension {
            expected: 512,
            actual: 128,
        };
        let msg = err.to_string();
        assert!(msg.contains("512"));
        assert!(msg.contains("128"));
    }

    #[test]
    fn error_image_too_large_display() {
        let err = FidesError::ImageTooLarge {
            edge: 4096,
            max_edge: 2048,
        };
        let msg = err.to_string();
        assert!(msg.contains("4096"));
        assert!(msg.contains("2048"));
    }

    #[test]
    fn error_config_display() {
        let err = FidesError::ConfigError {
            reason: "weights sum to 0.9".to_string(),
        };
        assert!(err.to_string().contains("configuration error"));
        assert!(err.to_string().contains("weights sum to 0.9"));
    }
}
