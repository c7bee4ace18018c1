//! Scenario 3: the same face enrolled under a second identity.
//!
//! A second capture of an already-enrolled face produces matching fuzzy
//! hashes at every level. The uniqueness flags flip in the signal, and
//! the duplicate override demotes a would-be auto-verification to manual
//! review.

use fides_contracts::error::FidesResult;
use fides_hash::{compare_fuzzy, EmbeddingHasher, HasherConfig};
use fides_liveness::LivenessDetector;
use fides_scoring::{ScoringConfig, TrustScoringEngine};

use crate::scenarios::{pretty, signal_from_liveness};
use crate::synthetic;

pub fn run_scenario() -> FidesResult<()> {
    println!("── Scenario 3: duplicate identity ──");
    println!();

    let hasher = EmbeddingHasher::new(HasherConfig::new("demo-salt", synthetic::EMBEDDING_DIM))?;
    let enrolled = hasher.hash_set(&synthetic::embedding(7))?;
    let probe_embedding = synthetic::recaptured(&synthetic::embedding(7));
    let probe = hasher.hash_set(&probe_embedding)?;

    let comparison = compare_fuzzy(&enrolled.fuzzy_hashes, &probe.fuzzy_hashes);
    println!("[1] fuzzy hash comparison against the enrolled identity:");
    println!("{}", pretty(&comparison));
    println!();

    let detector = LivenessDetector::with_defaults();
    let verdict = detector.analyze(&synthetic::live_face(), Some(&synthetic::eye_positions()))?;

    let engine = TrustScoringEngine::new(ScoringConfig::balanced_v1())?;
    let mut signal = signal_from_liveness(&verdict);
    signal.is_unique_face = enrolled.embedding_hash != probe.embedding_hash;
    signal.fuzzy_match_found = comparison.matching_levels > 0;
    let trust = engine.score(&signal)?;
    println!("[2] trust score with duplicate-face evidence:");
    println!("{}", pretty(&trust));
    println!();

    println!("outcome: {:?} (score {})", trust.decision, trust.score);
    println!();
    Ok(())
}
