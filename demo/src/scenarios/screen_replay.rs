//! Scenario 2: a screen-replay presentation attack.
//!
//! The "selfie" is a recaptured display: the periodicity check flags the
//! pixel grid and the chrominance check misses the skin band. The failed
//! liveness verdict then drags the trust score below auto-verification
//! even though the document signals look fine.

use fides_contracts::error::FidesResult;
use fides_liveness::LivenessDetector;
use fides_scoring::{ScoringConfig, TrustScoringEngine};

use crate::scenarios::{pretty, signal_from_liveness};
use crate::synthetic;

pub fn run_scenario() -> FidesResult<()> {
    println!("── Scenario 2: screen-replay attack ──");
    println!();

    let detector = LivenessDetector::with_defaults();
    let verdict = detector.analyze(&synthetic::screen_replay_face(), None)?;
    println!("[1] liveness verdict:");
    println!("{}", pretty(&verdict));
    println!();

    let engine = TrustScoringEngine::new(ScoringConfig::balanced_v1())?;
    let signal = signal_from_liveness(&verdict);
    let trust = engine.score(&signal)?;
    println!("[2] trust score:");
    println!("{}", pretty(&trust));
    println!();

    println!("outcome: {:?} (score {})", trust.decision, trust.score);
    println!();
    Ok(())
}
