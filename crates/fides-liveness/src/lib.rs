//! # fides-liveness
//!
//! Liveness and presentation-attack detection for the FIDES decision
//! core.
//!
//! [`detector::LivenessDetector`] takes an upright BGR face crop (and
//! optional eye landmarks) and scores five independent physical cues:
//! micro-texture, spectral energy balance, screen-grid periodicity,
//! skin-tone chrominance, and corneal reflection. The weighted
//! combination against a configurable threshold yields an
//! [`fides_contracts::liveness::AntiSpoofResult`].
//!
//! Face detection and landmark extraction happen upstream; this crate
//! only judges the crop it is given. Unanalyzable inputs fail open with
//! a marked incomplete verdict so callers can route them to manual
//! review.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use fides_liveness::{FaceImage, LivenessDetector};
//!
//! let detector = LivenessDetector::with_defaults();
//! let image = FaceImage::from_bgr(width, height, pixels)?;
//! let verdict = detector.analyze(&image, None)?;
//! if !verdict.is_live {
//!     println!("spoof suspected: {}", verdict.reason);
//! }
//! ```

pub mod checks;
pub mod config;
pub mod detector;
pub mod image;

pub use config::{CheckWeights, LivenessConfig};
pub use detector::LivenessDetector;
pub use image::{EyePositions, FaceImage, GrayImage};
