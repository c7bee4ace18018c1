//! Salted, quantized embedding hashing.
//!
//! Every digest commits to exactly two things: the quantized embedding
//! bytes and the deployment salt (plus a level tag for fuzzy digests).
//! Nothing else — no PII, no metadata, no timestamps — so hashes of
//! unrelated requests stay unlinkable beyond the intended tolerance.
//!
//! Digest input layout (bytes, in order):
//!   exact:  quantized embedding (1 byte per component, 256 levels) ‖ salt
//!   fuzzy:  quantized embedding (1 byte per component, `64 >> level`
//!           levels) ‖ `_L{level}_` ‖ salt
//!
//! The hash is one-way (SHA-256) and salted: recovering the embedding from
//! a stored digest is the biometric-template-protection property this
//! engine exists for, traded off against some matching recall.

use sha2::{Digest, Sha256};
use tracing::debug;

use fides_contracts::error::{FidesError, FidesResult};
use fides_contracts::hash::{
    parse_fuzzy_tag, EmbeddingHashSet, FuzzyComparison, FUZZY_DIGEST_LEN, FUZZY_LEVELS,
};

use crate::config::HasherConfig;

/// Per-level weights for `compare_fuzzy`. Coarser levels weigh more: a
/// collision at 8 bins survives aging, facial hair, and glasses, so it is
/// stronger same-person evidence than a fine-grained L0 match.
const LEVEL_WEIGHTS: [f64; FUZZY_LEVELS] = [0.15, 0.20, 0.30, 0.35];

/// The embedding hash engine.
///
/// Stateless after construction; holds only the validated config, so one
/// instance may be shared across threads freely.
#[derive(Debug, Clone)]
pub struct EmbeddingHasher {
    config: HasherConfig,
}

impl EmbeddingHasher {
    /// Build a hasher from `config`, validating it first.
    ///
    /// Returns `FidesError::ConfigError` on an empty salt or zero
    /// dimensionality — the deployment must not start in that state.
    pub fn new(config: HasherConfig) -> FidesResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The exact-duplicate digest for `embedding`.
    ///
    /// Each component of the (assumed L2-normalized, range ≈ [-1, 1])
    /// embedding is quantized into 256 levels via `round((x + 1) · 127.5)`,
    /// then the byte sequence is hashed together with the salt. Two
    /// embeddings that quantize identically always produce the same
    /// digest; this tolerates only sub-quantization floating noise.
    pub fn embedding_hash(&self, embedding: &[f32]) -> FidesResult<String> {
        self.check_embedding(embedding)?;

        let quantized: Vec<u8> = embedding
            .iter()
            .map(|&x| ((x + 1.0) * 127.5).round().clamp(0.0, 255.0) as u8)
            .collect();

        let mut hasher = Sha256::new();
        hasher.update(&quantized);
        hasher.update(self.config.salt.as_bytes());
        Ok(hex::encode(hasher.finalize()))
    }

    /// The four-level fuzzy digest family for `embedding`.
    ///
    /// Level `i` quantizes into `64 >> i` bins (64, 32, 16, 8), hashes the
    /// bytes with a level tag and the salt, truncates to 16 hex chars, and
    /// prefixes `L{i}_`. Coarser levels are deliberately more
    /// collision-tolerant: they still match the same person after aging or
    /// minor pose/lighting change, at the cost of more cross-person
    /// collisions.
    pub fn fuzzy_hashes(&self, embedding: &[f32]) -> FidesResult<Vec<String>> {
        self.check_embedding(embedding)?;

        let mut hashes = Vec::with_capacity(FUZZY_LEVELS);
        for level in 0..FUZZY_LEVELS {
            let bins = (64u32 >> level) as f32;
            let top = bins - 1.0;
            let quantized: Vec<u8> = embedding
                .iter()
                .map(|&x| ((x + 1.0) * (bins / 2.0)).floor().clamp(0.0, top) as u8)
                .collect();

            let mut hasher = Sha256::new();
            hasher.update(&quantized);
            hasher.update(format!("_L{level}_").as_bytes());
            hasher.update(self.config.salt.as_bytes());
            let digest = hex::encode(hasher.finalize());

            hashes.push(format!("L{level}_{}", &digest[..FUZZY_DIGEST_LEN]));
        }

        debug!(levels = hashes.len(), "generated fuzzy hash family");
        Ok(hashes)
    }

    /// The full hash family (exact + fuzzy) in one call, as consumers store
    /// them together.
    pub fn hash_set(&self, embedding: &[f32]) -> FidesResult<EmbeddingHashSet> {
        Ok(EmbeddingHashSet {
            embedding_hash: self.embedding_hash(embedding)?,
            fuzzy_hashes: self.fuzzy_hashes(embedding)?,
        })
    }

    /// Fail closed on dimension mismatch or non-finite components. A NaN
    /// would quantize to an arbitrary bin and defeat determinism.
    fn check_embedding(&self, embedding: &[f32]) -> FidesResult<()> {
        if embedding.len() != self.config.embedding_dim {
            return Err(FidesError::EmbeddingDimension {
                expected: self.config.embedding_dim,
                actual: embedding.len(),
            });
        }
        for (index, x) in embedding.iter().enumerate() {
            if !x.is_finite() {
                return Err(FidesError::NonFiniteEmbedding { index });
            }
        }
        Ok(())
    }
}

/// Compare two fuzzy hash families level by level.
///
/// A level counts as a hit when it is present and well formed in both sets
/// and the entries match exactly; malformed entries are skipped rather
/// than treated as errors, since stored hashes may predate format changes.
/// `confidence` sums [`LEVEL_WEIGHTS`] over matched levels (1.0 when all
/// four match). Symmetric: `compare_fuzzy(a, b) == compare_fuzzy(b, a)`.
pub fn compare_fuzzy(a: &[String], b: &[String]) -> FuzzyComparison {
    let by_level = |entries: &[String]| -> [Option<String>; FUZZY_LEVELS] {
        let mut slots: [Option<String>; FUZZY_LEVELS] = Default::default();
        for entry in entries {
            if let Some(level) = parse_fuzzy_tag(entry) {
                slots[level] = Some(entry.clone());
            }
        }
        slots
    };

    let slots_a = by_level(a);
    let slots_b = by_level(b);

    let mut matching_levels = 0u32;
    let mut confidence = 0.0f64;
    for level in 0..FUZZY_LEVELS {
        if let (Some(ha), Some(hb)) = (&slots_a[level], &slots_b[level]) {
            if ha == hb {
                matching_levels += 1;
                confidence += LEVEL_WEIGHTS[level];
            }
        }
    }

    FuzzyComparison {
        matching_levels,
        confidence,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher(dim: usize) -> EmbeddingHasher {
        EmbeddingHasher::new(HasherConfig::new("test-salt-v1", dim)).unwrap()
    }

    /// A deterministic pseudo-embedding spread across [-1, 1].
    fn embedding(dim: usize, seed: f32) -> Vec<f32> {
        (0..dim)
            .map(|i| ((i as f32 * 0.37 + seed).sin()))
            .collect()
    }

    // ── Construction / config validation ────────────────────────────────────

    #[test]
    fn empty_salt_refuses_to_construct() {
        let result = EmbeddingHasher::new(HasherConfig::new("", 512));
        assert!(matches!(
            result,
            Err(fides_contracts::error::FidesError::ConfigError { .. })
        ));
    }

    #[test]
    fn zero_dimension_refuses_to_construct() {
        assert!(EmbeddingHasher::new(HasherConfig::new("salt", 0)).is_err());
    }

    #[test]
    fn config_deserializes_from_toml() {
        let config: HasherConfig =
            toml::from_str("salt = \"s1\"\nembedding_dim = 128\n").unwrap();
        assert_eq!(config.embedding_dim, 128);
        assert!(EmbeddingHasher::new(config).is_ok());
    }

    // ── Exact hash ───────────────────────────────────────────────────────────

    #[test]
    fn same_embedding_hashes_identically() {
        let h = hasher(32);
        let e = embedding(32, 0.0);
        assert_eq!(h.embedding_hash(&e).unwrap(), h.embedding_hash(&e).unwrap());
    }

    #[test]
    fn sub_quantization_noise_does_not_change_digest() {
        // Two embeddings identical except in the 6th decimal place of one
        // dimension must collide at every level.
        let h = hasher(32);
        let a = embedding(32, 0.0);
        let mut b = a.clone();
        b[7] += 1e-6;

        assert_eq!(h.embedding_hash(&a).unwrap(), h.embedding_hash(&b).unwrap());
        assert_eq!(h.fuzzy_hashes(&a).unwrap(), h.fuzzy_hashes(&b).unwrap());
    }

    #[test]
    fn different_embeddings_hash_differently() {
        let h = hasher(32);
        let a = embedding(32, 0.0);
        let b = embedding(32, 1.0);
        assert_ne!(h.embedding_hash(&a).unwrap(), h.embedding_hash(&b).unwrap());
    }

    #[test]
    fn digest_is_lowercase_hex_of_fixed_length() {
        let h = hasher(8);
        let digest = h.embedding_hash(&embedding(8, 0.5)).unwrap();
        assert_eq!(digest.len(), 64);
        assert!(digest.bytes().all(|b| b.is_ascii_hexdigit()));
        assert_eq!(digest, digest.to_lowercase());
    }

    #[test]
    fn different_salts_are_unlinkable() {
        // Same embedding, different deployment salts: every digest differs,
        // so stored hashes cannot be joined across deployments.
        let e = embedding(32, 0.0);
        let h1 = EmbeddingHasher::new(HasherConfig::new("salt-a", 32)).unwrap();
        let h2 = EmbeddingHasher::new(HasherConfig::new("salt-b", 32)).unwrap();

        assert_ne!(h1.embedding_hash(&e).unwrap(), h2.embedding_hash(&e).unwrap());
        let f1 = h1.fuzzy_hashes(&e).unwrap();
        let f2 = h2.fuzzy_hashes(&e).unwrap();
        for (a, b) in f1.iter().zip(&f2) {
            assert_ne!(a, b);
        }
    }

    #[test]
    fn extreme_components_clamp_instead_of_wrapping() {
        // Components slightly outside [-1, 1] (normalization slop) must not
        // wrap around the byte range.
        let h = hasher(4);
        let a = vec![-1.001, 1.001, 0.0, 0.0];
        let b = vec![-1.0, 1.0, 0.0, 0.0];
        assert_eq!(h.embedding_hash(&a).unwrap(), h.embedding_hash(&b).unwrap());
    }

    // ── Input validation ─────────────────────────────────────────────────────

    #[test]
    fn dimension_mismatch_is_an_error() {
        let h = hasher(32);
        let e = embedding(16, 0.0);
        assert!(matches!(
            h.embedding_hash(&e),
            Err(fides_contracts::error::FidesError::EmbeddingDimension {
                expected: 32,
                actual: 16,
            })
        ));
    }

    #[test]
    fn non_finite_component_is_an_error() {
        let h = hasher(4);
        let e = vec![0.0, f32::NAN, 0.0, 0.0];
        assert!(matches!(
            h.embedding_hash(&e),
            Err(fides_contracts::error::FidesError::NonFiniteEmbedding { index: 1 })
        ));
        assert!(h.fuzzy_hashes(&[0.0, 0.0, f32::INFINITY, 0.0]).is_err());
    }

    // ── Fuzzy hash family ────────────────────────────────────────────────────

    #[test]
    fn fuzzy_family_is_tagged_and_well_formed() {
        let h = hasher(32);
        let set = h.hash_set(&embedding(32, 0.0)).unwrap();
        assert!(set.is_well_formed());
        assert!(set.fuzzy_hashes[0].starts_with("L0_"));
        assert!(set.fuzzy_hashes[3].starts_with("L3_"));
    }

    #[test]
    fn coarse_levels_are_never_less_tolerant() {
        // Perturb each component by a small epsilon. Wherever a fine level
        // still matches, every coarser level must match too (a coarse bin
        // contains whole fine bins).
        let h = hasher(64);
        let base = embedding(64, 0.3);

        for step in 1..=20 {
            let eps = step as f32 * 0.0015;
            let perturbed: Vec<f32> = base.iter().map(|x| x + eps).collect();

            let fa = h.fuzzy_hashes(&base).unwrap();
            let fb = h.fuzzy_hashes(&perturbed).unwrap();
            let matched: Vec<bool> = fa.iter().zip(&fb).map(|(a, b)| a == b).collect();

            for level in 0..FUZZY_LEVELS - 1 {
                assert!(
                    !matched[level] || matched[level + 1],
                    "L{} matched but L{} did not at eps {}",
                    level,
                    level + 1,
                    eps
                );
            }
        }
    }

    // ── compare_fuzzy ────────────────────────────────────────────────────────

    #[test]
    fn full_match_has_unit_confidence() {
        let h = hasher(32);
        let f = h.fuzzy_hashes(&embedding(32, 0.0)).unwrap();
        let cmp = compare_fuzzy(&f, &f);
        assert_eq!(cmp.matching_levels, 4);
        assert!((cmp.confidence - 1.0).abs() < 1e-12);
    }

    #[test]
    fn disjoint_sets_do_not_match() {
        let h = hasher(32);
        let fa = h.fuzzy_hashes(&embedding(32, 0.0)).unwrap();
        let fb = h.fuzzy_hashes(&embedding(32, 2.0)).unwrap();
        let cmp = compare_fuzzy(&fa, &fb);
        assert_eq!(cmp.matching_levels, 0);
        assert_eq!(cmp.confidence, 0.0);
    }

    #[test]
    fn compare_is_symmetric() {
        let h = hasher(32);
        let fa = h.fuzzy_hashes(&embedding(32, 0.0)).unwrap();
        let mut fb = fa.clone();
        // Knock out L0 on one side to force a partial match.
        fb[0] = format!("L0_{}", "00".repeat(8));

        assert_eq!(compare_fuzzy(&fa, &fb), compare_fuzzy(&fb, &fa));
    }

    #[test]
    fn coarse_match_weighs_more_than_fine_match() {
        let l0 = vec![format!("L0_{}", "ab".repeat(8))];
        let l3 = vec![format!("L3_{}", "cd".repeat(8))];

        let fine = compare_fuzzy(&l0, &l0);
        let coarse = compare_fuzzy(&l3, &l3);
        assert_eq!(fine.matching_levels, 1);
        assert_eq!(coarse.matching_levels, 1);
        assert!(coarse.confidence > fine.confidence);
    }

    #[test]
    fn malformed_entries_are_skipped() {
        let good = format!("L3_{}", "cd".repeat(8));
        let a = vec!["garbage".to_string(), good.clone()];
        let b = vec![good.clone(), "L9_nope".to_string()];
        let cmp = compare_fuzzy(&a, &b);
        assert_eq!(cmp.matching_levels, 1);
        assert!((cmp.confidence - 0.35).abs() < 1e-12);
    }
}
