//! # fides-scoring
//!
//! The deterministic trust scoring engine of the FIDES decision core.
//!
//! Takes a [`VerificationSignal`](fides_contracts::signal::VerificationSignal)
//! — face similarity, liveness verdict, document quality, age data,
//! uniqueness flags, risk context — and fuses it into a single auditable
//! [`TrustScoreResult`](fides_contracts::score::TrustScoreResult) with a
//! 0–100 score, an accept/review/reject decision, and a per-factor
//! breakdown.
//!
//! The engine fails closed: an out-of-range input is surfaced as an error,
//! never clamped, because silent clamping could mask a defect that
//! systematically inflates trust scores. This is the deliberate opposite of
//! the liveness detector's fail-open policy.

pub mod age;
pub mod config;
pub mod engine;

pub use config::{DecisionThresholds, ScoringConfig, ScoringWeights, WeightScheme};
pub use engine::TrustScoringEngine;
