//! Embedding hash set and fuzzy-comparison types.
//!
//! Hashes are derived only from the embedding and the deployment salt —
//! never from PII, metadata, or timestamps. Unrelated requests for the
//! same person stay unlinkable beyond the intended fuzzy tolerance.

use serde::{Deserialize, Serialize};

/// Number of fuzzy hash levels (L0 finest … L3 coarsest).
pub const FUZZY_LEVELS: usize = 4;

/// Hex length of a truncated fuzzy digest (after the `L{n}_` tag).
pub const FUZZY_DIGEST_LEN: usize = 16;

/// The privacy-preserving hash family for one embedding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddingHashSet {
    /// Salted SHA-256 of the 256-level quantized embedding, lowercase hex.
    /// Matches only when two embeddings quantize identically.
    pub embedding_hash: String,
    /// Exactly four tagged digests, finest to coarsest: `L0_…` … `L3_…`.
    /// Coarser levels tolerate more appearance change.
    pub fuzzy_hashes: Vec<String>,
}

impl EmbeddingHashSet {
    /// True when every field is in the expected wire format: a 64-char hex
    /// exact hash and four `L{level}_{16 hex}` fuzzy entries in level order.
    pub fn is_well_formed(&self) -> bool {
        let exact_ok = self.embedding_hash.len() == 64
            && self.embedding_hash.bytes().all(|b| b.is_ascii_hexdigit());
        let fuzzy_ok = self.fuzzy_hashes.len() == FUZZY_LEVELS
            && self
                .fuzzy_hashes
                .iter()
                .enumerate()
                .all(|(level, h)| parse_fuzzy_tag(h) == Some(level));
        exact_ok && fuzzy_ok
    }
}

/// Parse a fuzzy hash entry, returning its level when well formed.
pub fn parse_fuzzy_tag(entry: &str) -> Option<usize> {
    let rest = entry.strip_prefix('L')?;
    let (level, digest) = rest.split_once('_')?;
    let level: usize = level.parse().ok()?;
    if level < FUZZY_LEVELS
        && digest.len() == FUZZY_DIGEST_LEN
        && digest.bytes().all(|b| b.is_ascii_hexdigit())
    {
        Some(level)
    } else {
        None
    }
}

/// The outcome of comparing two fuzzy hash families.
///
/// The duplicate-decision policy (e.g. `matching_levels >= 2` or
/// `confidence >= 0.5`) is a consumer-side threshold, deliberately not
/// hard-coded in this core.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FuzzyComparison {
    /// Number of levels present in both sets whose digests match exactly.
    pub matching_levels: u32,
    /// Sum of per-level weights over matched levels, in [0, 1]. Coarser
    /// levels weigh more because a coarse collision is stronger evidence
    /// of the same person.
    pub confidence: f64,
}
