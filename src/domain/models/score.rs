//! SecurityScore: derived, never stored independently of an Execution.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::technique::Tactic;

/// The aggregate and per-tactic outcome of a completed execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityScore {
    pub overall: f64,
    pub blocked: u64,
    pub detected: u64,
    pub successful: u64,
    pub total: u64,
    pub by_tactic: HashMap<Tactic, f64>,
}
