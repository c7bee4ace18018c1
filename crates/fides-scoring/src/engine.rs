//! The trust scoring engine.
//!
//! Fuses one `VerificationSignal` into a `TrustScoreResult`:
//!
//! 1. Validate every bounded field (fail closed — no clamping).
//! 2. Normalize the five factors in fixed order: face → liveness →
//!    document → age → uniqueness, collecting flags and reasons as each
//!    factor is evaluated.
//! 3. Weighted sum, then subtract the risk penalty (previous rejections,
//!    duplicate evidence) AFTER weighting.
//! 4. Map the 0–100 score through the configured thresholds.
//! 5. Apply critical overrides: a low face match caps the score below the
//!    manual-review threshold, and duplicate evidence can never leave an
//!    auto-verification standing.
//!
//! `score_at` is a pure function of its arguments: identical inputs
//! produce byte-identical output.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::debug;

use fides_contracts::error::FidesResult;
use fides_contracts::score::{
    ConfidenceBand, Decision, TrustFactor, TrustFlag, TrustScoreResult,
};
use fides_contracts::signal::VerificationSignal;

use crate::age;
use crate::config::ScoringConfig;

/// Per-rejection penalty, and its cap across rejections.
const REJECTION_PENALTY_STEP: f64 = 0.1;
const REJECTION_PENALTY_CAP: f64 = 0.2;
/// Flat penalty when either uniqueness flag failed.
const DUPLICATE_PENALTY: f64 = 0.1;

/// The trust scoring engine. Holds only immutable, validated config;
/// share freely across threads.
#[derive(Debug, Clone)]
pub struct TrustScoringEngine {
    config: ScoringConfig,
}

impl TrustScoringEngine {
    /// Build an engine from `config`, validating it first.
    ///
    /// Returns `FidesError::ConfigError` when weights do not sum to 1.0 or
    /// thresholds are out of order — the deployment must not start.
    pub fn new(config: ScoringConfig) -> FidesResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Score `signal` as of today. Thin wrapper over [`score_at`];
    /// only the age-consistency factor reads the date.
    ///
    /// [`score_at`]: TrustScoringEngine::score_at
    pub fn score(&self, signal: &VerificationSignal) -> FidesResult<TrustScoreResult> {
        self.score_at(signal, chrono::Utc::now().date_naive())
    }

    /// Score `signal` against the reference date `as_of`.
    ///
    /// Pure and deterministic: same input, byte-identical output.
    pub fn score_at(
        &self,
        signal: &VerificationSignal,
        as_of: NaiveDate,
    ) -> FidesResult<TrustScoreResult> {
        signal.validate()?;

        let weights = &self.config.weights;
        let mut breakdown = BTreeMap::new();
        let mut reasons = Vec::new();
        let mut flags = Vec::new();

        // 1. Face similarity.
        let face = signal.face_similarity;
        if face < self.config.low_face_match {
            flags.push(TrustFlag::LowFaceMatch);
            reasons.push("Low face similarity".to_string());
        }
        breakdown.insert(TrustFactor::Face, round1(face * 100.0));

        // 2. Liveness. A failed check is never fully trusted, even when
        // its raw confidence was high.
        let liveness = if signal.liveness_passed {
            signal.liveness_score
        } else {
            flags.push(TrustFlag::LivenessFailed);
            reasons.push("Liveness check failed".to_string());
            signal.liveness_score * 0.5
        };
        breakdown.insert(TrustFactor::Liveness, round1(liveness * 100.0));

        // 3. Document quality.
        let document = (signal.document_confidence * 0.5
            + (signal.ocr_confidence / 100.0) * 0.3
            + if signal.document_type_verified { 0.2 } else { 0.0 })
        .min(1.0);
        if signal.document_confidence < 0.5 {
            flags.push(TrustFlag::UnclearDocument);
            reasons.push("Document type unclear".to_string());
        }
        if signal.ocr_confidence < 50.0 {
            flags.push(TrustFlag::LowOcrQuality);
            reasons.push("Poor document quality/OCR".to_string());
        }
        breakdown.insert(TrustFactor::Document, round1(document * 100.0));

        // 4. Age consistency.
        let (age, ages) = age::consistency_score(signal.date_of_birth, signal.estimated_age, as_of);
        if age < 0.5 {
            if let Some((document_age, estimated_age)) = ages {
                flags.push(TrustFlag::AgeMismatch);
                reasons.push(format!(
                    "Age mismatch: document says ~{document_age}, face appears ~{estimated_age}"
                ));
            }
        }
        breakdown.insert(TrustFactor::Age, round1(age * 100.0));

        // 5. Uniqueness.
        let mut uniqueness = 1.0f64;
        if !signal.is_unique_document {
            uniqueness -= 0.5;
            flags.push(TrustFlag::DuplicateDocument);
            reasons.push("Document already registered to another user".to_string());
        }
        if !signal.is_unique_face {
            uniqueness -= 0.3;
            flags.push(TrustFlag::DuplicateFace);
            reasons.push("Face matched to existing user".to_string());
        }
        if signal.fuzzy_match_found {
            uniqueness -= 0.2;
            flags.push(TrustFlag::FuzzyMatch);
            reasons.push("Possible face match (fuzzy)".to_string());
        }
        let uniqueness = uniqueness.max(0.0);
        breakdown.insert(TrustFactor::Uniqueness, round1(uniqueness * 100.0));

        // 6. Risk penalty, subtracted after weighting.
        let mut penalty = 0.0f64;
        if signal.previous_rejections > 0 {
            penalty += (REJECTION_PENALTY_STEP * signal.previous_rejections as f64)
                .min(REJECTION_PENALTY_CAP);
            flags.push(TrustFlag::PreviousRejections(signal.previous_rejections));
            reasons.push(format!(
                "Previous rejections: {}",
                signal.previous_rejections
            ));
        }
        if !signal.is_unique_document || !signal.is_unique_face {
            penalty += DUPLICATE_PENALTY;
        }
        breakdown.insert(TrustFactor::RiskPenalty, round1(penalty * 100.0));

        // Weighted base. The sixth factor (1 − penalty) only participates
        // under the risk-weighted scheme; with weight 0 it vanishes.
        let base = weights.face * face
            + weights.liveness * liveness
            + weights.document * document
            + weights.age * age
            + weights.uniqueness * uniqueness
            + weights.risk * (1.0 - penalty);

        let final_score = (base - penalty).clamp(0.0, 1.0);
        let mut score = round1(final_score * 100.0);

        let thresholds = &self.config.thresholds;
        let (mut decision, mut confidence) = if score >= thresholds.auto_verify {
            (Decision::AutoVerified, ConfidenceBand::High)
        } else if score >= thresholds.manual_review {
            (Decision::ManualReview, ConfidenceBand::Medium)
        } else {
            (Decision::Rejected, ConfidenceBand::Low)
        };

        // Critical overrides. A face that does not match the document can
        // never be waved through on the strength of other factors, and
        // duplicate evidence always forces a human into the loop.
        if flags.contains(&TrustFlag::LowFaceMatch) {
            score = score.min(round1(thresholds.manual_review - 0.1)).max(0.0);
            decision = Decision::Rejected;
            confidence = ConfidenceBand::Low;
        } else if decision == Decision::AutoVerified
            && (flags.contains(&TrustFlag::DuplicateDocument)
                || flags.contains(&TrustFlag::DuplicateFace))
        {
            decision = Decision::ManualReview;
            confidence = ConfidenceBand::Medium;
        }

        let headline = match decision {
            Decision::AutoVerified => "All verification checks passed",
            Decision::ManualReview => "Some checks need manual verification",
            Decision::Rejected => "Verification failed",
        };
        reasons.insert(0, headline.to_string());

        debug!(
            score,
            decision = ?decision,
            flag_count = flags.len(),
            "trust score computed"
        );

        Ok(TrustScoreResult {
            score,
            decision,
            confidence,
            breakdown,
            reasons,
            flags,
        })
    }
}

/// Round to one decimal place on the 0–100 scale.
fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}
