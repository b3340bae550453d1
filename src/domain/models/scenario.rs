//! Scenario domain model: an ordered sequence of phases of techniques.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single technique selected within a phase, optionally pinning which
/// declared executor to use.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TechniqueSelection {
    pub technique_id: String,
    pub executor_name: Option<String>,
}

/// An ordered group of technique selections within a scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Phase {
    pub name: String,
    pub order: u32,
    pub techniques: Vec<TechniqueSelection>,
}

/// A scenario: an ordered sequence of phases run against a set of agents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub phases: Vec<Phase>,
    pub tags: Vec<String>,
}

impl Scenario {
    /// Phases in declared `order`, stable for ties.
    pub fn ordered_phases(&self) -> Vec<&Phase> {
        let mut phases: Vec<&Phase> = self.phases.iter().collect();
        phases.sort_by_key(|p| p.order);
        phases
    }
}
