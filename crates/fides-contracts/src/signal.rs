//! The input bundle consumed by the trust scoring engine.
//!
//! A `VerificationSignal` collects the outputs of the upstream face, OCR,
//! and uniqueness providers. Bounded fields are validated at this boundary
//! — the scoring engine fails closed on any out-of-range value rather than
//! clamping it into range.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{FidesError, FidesResult};

/// All verification signals for one identity check, as produced by the
/// external face, document, and uniqueness providers.
///
/// `previous_rejections` is unsigned: a negative rejection count is
/// unrepresentable by construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationSignal {
    /// Cosine similarity between selfie and document face, in [0, 1].
    pub face_similarity: f64,
    /// Anti-spoof confidence reported by the liveness detector, in [0, 1].
    pub liveness_score: f64,
    /// Whether the liveness detector's verdict was "live".
    pub liveness_passed: bool,
    /// Document type detection confidence, in [0, 1].
    pub document_confidence: f64,
    /// OCR text extraction confidence, in [0, 100].
    pub ocr_confidence: f64,
    /// Whether the detected document type matches the expected one.
    pub document_type_verified: bool,
    /// Date of birth extracted from the document, if OCR found one.
    pub date_of_birth: Option<NaiveDate>,
    /// Age estimated from the face image, if the provider supplied one.
    pub estimated_age: Option<u32>,
    /// Document hash not seen on any other identity.
    pub is_unique_document: bool,
    /// Exact embedding hash not seen on any other identity.
    pub is_unique_face: bool,
    /// A fuzzy hash level matched another identity.
    pub fuzzy_match_found: bool,
    /// Opaque device identifier for risk context, if the client sent one.
    pub device_fingerprint: Option<String>,
    /// Number of previous rejected verification attempts for this user.
    pub previous_rejections: u32,
}

impl VerificationSignal {
    /// Check every bounded field against its declared domain.
    ///
    /// Returns the first violation as `FidesError::SignalOutOfRange`.
    /// Fields are checked in declaration order so the error is
    /// deterministic for a given signal.
    pub fn validate(&self) -> FidesResult<()> {
        Self::check_range("face_similarity", self.face_similarity, 0.0, 1.0)?;
        Self::check_range("liveness_score", self.liveness_score, 0.0, 1.0)?;
        Self::check_range("document_confidence", self.document_confidence, 0.0, 1.0)?;
        Self::check_range("ocr_confidence", self.ocr_confidence, 0.0, 100.0)?;
        Ok(())
    }

    fn check_range(
        field: &'static str,
        value: f64,
        lo: f64,
        hi: f64,
    ) -> FidesResult<()> {
        // NaN fails every comparison, so it is rejected here too.
        if value >= lo && value <= hi {
            Ok(())
        } else {
            Err(FidesError::SignalOutOfRange {
                field,
                value,
                expected: if hi > 1.0 { "[0, 100]" } else { "[0, 1]" },
            })
        }
    }
}
