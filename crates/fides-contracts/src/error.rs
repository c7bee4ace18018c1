//! Error types for the FIDES decision core.
//!
//! All fallible operations in the core return `FidesResult<T>`. Error
//! variants carry enough context for the caller to log an actionable
//! message without re-deriving state.
//!
//! The taxonomy deliberately splits by failure policy:
//!
//! - Input errors (`SignalOutOfRange`, `EmbeddingDimension`,
//!   `NonFiniteEmbedding`, `ImageTooLarge`, `MalformedImage`) are caller
//!   programming errors and fail closed — no result is produced.
//! - Configuration errors (`ConfigError`) must be raised when an engine is
//!   constructed, never mid-request.
//! - An unanalyzable image inside the liveness detector is NOT an error:
//!   the detector fails open with a flagged low-certainty result instead.

use thiserror::Error;

/// The unified error type for the FIDES decision core.
#[derive(Debug, Error)]
pub enum FidesError {
    /// A bounded signal field was outside its declared domain.
    ///
    /// Silent clamping is forbidden here: a systematically out-of-range
    /// input could inflate trust scores without anyone noticing.
    #[error("signal field '{field}' out of range: {value} (expected {expected})")]
    SignalOutOfRange {
        field: &'static str,
        value: f64,
        expected: &'static str,
    },

    /// An embedding vector did not have the configured dimensionality.
    #[error("embedding has {actual} dimensions, deployment declares {expected}")]
    EmbeddingDimension { expected: usize, actual: usize },

    /// An embedding component was NaN or infinite.
    #[error("embedding component {index} is not finite")]
    NonFiniteEmbedding { index: usize },

    /// A face image exceeded the configured maximum edge length.
    ///
    /// The spectral analyzers scale with pixel count, so oversized inputs
    /// are rejected rather than trusted to the caller's size limit.
    #[error("image edge {edge}px exceeds configured maximum {max_edge}px")]
    ImageTooLarge { edge: u32, max_edge: u32 },

    /// A pixel buffer did not match its declared dimensions.
    #[error("malformed image: {reason}")]
    MalformedImage { reason: String },

    /// A required configuration value is missing or invalid.
    ///
    /// Raised by engine constructors; a deployment that hits this must not
    /// start serving requests.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },
}

/// Convenience alias used throughout the FIDES crates.
pub type FidesResult<T> = Result<T, FidesError>;
