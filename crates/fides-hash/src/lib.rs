//! # fides-hash
//!
//! Privacy-preserving embedding hashing for duplicate-identity detection.
//!
//! The engine turns an L2-normalized face embedding into:
//!
//! - an **exact hash** — salted SHA-256 of the 256-level quantized vector,
//!   matching only when two embeddings quantize identically, and
//! - a **fuzzy hash family** — four salted, truncated digests at
//!   decreasing quantization granularity (64/32/16/8 bins), where coarser
//!   levels keep matching the same person through aging, facial hair,
//!   glasses, or minor pose and lighting change.
//!
//! The raw embedding is never stored or transmitted; a digest cannot be
//! inverted to recover it. The duplicate lookup itself (storing digests,
//! querying previously seen identities) lives outside this core.

pub mod config;
pub mod engine;

pub use config::HasherConfig;
pub use engine::{compare_fuzzy, EmbeddingHasher};
