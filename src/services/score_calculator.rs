//! Pure scoring: a list of results in, a `SecurityScore` out.
//!
//! Deterministic and order-independent by construction — it only ever
//! accumulates counters and divides at the end.

use std::collections::HashMap;

use crate::domain::models::{ExecutionResult, ResultStatus, SecurityScore, Tactic, Technique};

/// The outcome class of a single `ExecutionResult`, kept behind one function
/// (see spec §9) so the classification rule can be refined without touching
/// the aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Blocked,
    Detected,
    Successful,
    Skipped,
}

/// Classify a single result. `status = failure` counts as blocked,
/// `status = success` with `detected` true counts as detected, `status =
/// success` with `detected` false counts as successful, `status = skipped`
/// (or anything non-terminal, which should never reach scoring) does not
/// count.
pub fn classify(result: &ExecutionResult) -> Outcome {
    match result.status {
        ResultStatus::Failure => Outcome::Blocked,
        ResultStatus::Success if result.detected => Outcome::Detected,
        ResultStatus::Success => Outcome::Successful,
        ResultStatus::Skipped | ResultStatus::Pending | ResultStatus::Running => Outcome::Skipped,
    }
}

#[derive(Default)]
struct Tally {
    blocked: u64,
    detected: u64,
    successful: u64,
    skipped: u64,
}

impl Tally {
    fn counted(&self) -> u64 {
        self.blocked + self.detected + self.successful
    }

    fn overall(&self) -> f64 {
        let counted = self.counted();
        if counted == 0 {
            return 0.0;
        }
        100.0 * (self.blocked as f64 + self.detected as f64 / 2.0) / (counted as f64)
    }
}

/// Compute a `SecurityScore` over a set of results, looking up each result's
/// technique to bucket per-tactic tallies. Results whose technique cannot be
/// resolved are still counted toward the aggregate but skipped for
/// `by_tactic` (a dangling technique reference is a data problem upstream,
/// not a reason to fail scoring).
pub fn calculate(results: &[ExecutionResult], techniques: &HashMap<String, Technique>) -> SecurityScore {
    let mut overall_tally = Tally::default();
    let mut tactic_tallies: HashMap<Tactic, Tally> = HashMap::new();

    for result in results {
        let outcome = classify(result);
        match outcome {
            Outcome::Blocked => overall_tally.blocked += 1,
            Outcome::Detected => overall_tally.detected += 1,
            Outcome::Successful => overall_tally.successful += 1,
            Outcome::Skipped => overall_tally.skipped += 1,
        }

        if let Some(technique) = techniques.get(&result.technique_id) {
            for tactic in technique.all_tactics() {
                let tally = tactic_tallies.entry(tactic).or_default();
                match outcome {
                    Outcome::Blocked => tally.blocked += 1,
                    Outcome::Detected => tally.detected += 1,
                    Outcome::Successful => tally.successful += 1,
                    Outcome::Skipped => tally.skipped += 1,
                }
            }
        }
    }

    let by_tactic = tactic_tallies
        .iter()
        .map(|(tactic, tally)| (*tactic, tally.overall()))
        .collect();

    SecurityScore {
        overall: overall_tally.overall(),
        blocked: overall_tally.blocked,
        detected: overall_tally.detected,
        successful: overall_tally.successful,
        total: results.len() as u64,
        by_tactic,
    }
}
