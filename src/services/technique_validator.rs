//! Validates a scenario against the technique catalog.
//!
//! Platform-compatibility is deliberately not checked here: it depends on
//! which agents a scenario will actually run against, which is the
//! planner's job (`services::orchestrator`), not the validator's.

use std::collections::HashMap;

use crate::domain::models::{Scenario, Tactic, Technique};

/// Result of validating a scenario against the catalog.
#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl ValidationReport {
    fn ok() -> Self {
        Self { valid: true, errors: vec![] }
    }

    fn failed(errors: Vec<String>) -> Self {
        Self { valid: false, errors }
    }
}

/// Validate a scenario's structure and technique references against the
/// current catalog.
pub fn validate(scenario: &Scenario, catalog: &HashMap<String, Technique>) -> ValidationReport {
    let mut errors = Vec::new();

    if scenario.phases.is_empty() {
        errors.push("scenario has no phases".to_string());
    }

    for phase in &scenario.phases {
        if phase.techniques.is_empty() {
            errors.push(format!("phase '{}' has no techniques", phase.name));
            continue;
        }

        for selection in &phase.techniques {
            let Some(technique) = catalog.get(&selection.technique_id) else {
                errors.push(format!(
                    "phase '{}': unknown technique '{}'",
                    phase.name, selection.technique_id
                ));
                continue;
            };

            if let Some(executor_name) = &selection.executor_name {
                if technique.executor_named(executor_name).is_none() {
                    errors.push(format!(
                        "phase '{}': technique '{}' has no executor named '{}'",
                        phase.name, selection.technique_id, executor_name
                    ));
                }
            }
        }
    }

    if errors.is_empty() {
        ValidationReport::ok()
    } else {
        ValidationReport::failed(errors)
    }
}

/// `GET /techniques/coverage`'s backing computation: how many catalog
/// entries exist per tactic. Pure domain logic over the catalog, kept here
/// so the transport layer doesn't have to duplicate it.
pub fn tactic_coverage(catalog: &HashMap<String, Technique>) -> HashMap<Tactic, u64> {
    let mut coverage: HashMap<Tactic, u64> = HashMap::new();
    for technique in catalog.values() {
        for tactic in technique.all_tactics() {
            *coverage.entry(tactic).or_insert(0) += 1;
        }
    }
    coverage
}
