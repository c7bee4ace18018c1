//! Scenario 1: a clean first-time verification.
//!
//! A live-looking face crop passes the anti-spoof checks, every upstream
//! signal is strong, and the embedding is hashed for future duplicate
//! lookups. Expected outcome: auto-verified.

use fides_contracts::error::FidesResult;
use fides_hash::{EmbeddingHasher, HasherConfig};
use fides_liveness::LivenessDetector;
use fides_scoring::{ScoringConfig, TrustScoringEngine};

use crate::scenarios::{pretty, signal_from_liveness};
use crate::synthetic;

pub fn run_scenario() -> FidesResult<()> {
    println!("── Scenario 1: clean verification ──");
    println!();

    let detector = LivenessDetector::with_defaults();
    let verdict = detector.analyze(&synthetic::live_face(), Some(&synthetic::eye_positions()))?;
    println!("[1] liveness verdict:");
    println!("{}", pretty(&verdict));
    println!();

    let engine = TrustScoringEngine::new(ScoringConfig::balanced_v1())?;
    let signal = signal_from_liveness(&verdict);
    let trust = engine.score(&signal)?;
    println!("[2] trust score:");
    println!("{}", pretty(&trust));
    println!();

    let hasher = EmbeddingHasher::new(HasherConfig::new("demo-salt", synthetic::EMBEDDING_DIM))?;
    let hashes = hasher.hash_set(&synthetic::embedding(7))?;
    println!("[3] embedding hashes stored for duplicate detection:");
    println!("{}", pretty(&hashes));
    println!();

    println!("outcome: {:?} (score {})", trust.decision, trust.score);
    println!();
    Ok(())
}
