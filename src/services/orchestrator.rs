//! AttackOrchestrator (the Planner): expands a scenario x selected agents
//! into an ordered list of `PlannedTask`s with executor + command resolved.
//!
//! Tie-breaks favor scenario declaration order and agent input order so
//! plans are byte-for-byte reproducible (§8 property 5). Platform mismatches
//! degrade gracefully by skipping the (agent, technique) pair rather than
//! failing the whole scenario; only a wholly inapplicable scenario surfaces
//! as an error.

use std::collections::HashMap;

use crate::domain::errors::{CoreError, CoreResult};
use crate::domain::models::{Agent, PlannedTask, Scenario, Technique};

/// The output of `plan_execution`.
#[derive(Debug, Clone)]
pub struct Plan {
    pub tasks: Vec<PlannedTask>,
}

/// Expand `scenario` against `agents` (in input order) into an ordered plan.
///
/// `catalog` must contain every technique referenced by the scenario;
/// `TechniqueValidator` should have already run during scenario authoring,
/// but an unknown technique here is still a hard planning error rather than
/// a silent skip, since it signals a catalog/scenario drift the validator
/// should have caught.
pub fn plan_execution(
    scenario: &Scenario,
    agents: &[Agent],
    safe_mode: bool,
    catalog: &HashMap<String, Technique>,
) -> CoreResult<Plan> {
    let mut tasks = Vec::new();

    for phase in scenario.ordered_phases() {
        for selection in &phase.techniques {
            let technique = catalog
                .get(&selection.technique_id)
                .ok_or_else(|| CoreError::validation(vec![format!("unknown technique '{}'", selection.technique_id)]))?;

            if safe_mode && !technique.is_safe {
                continue;
            }

            for agent in agents {
                let executor = match &selection.executor_name {
                    Some(name) => match technique.executor_named(name) {
                        Some(e) if e.matches_platform(agent.platform.as_str()) => e,
                        _ => continue,
                    },
                    None => match technique.first_matching_executor(agent.platform.as_str(), &agent.executors) {
                        Some(e) => e,
                        None => continue,
                    },
                };

                tasks.push(PlannedTask {
                    technique_id: technique.id.clone(),
                    agent_paw: agent.paw.clone(),
                    executor_type: executor.executor_type.clone(),
                    executor_name: executor.name.clone(),
                    command: executor.command.clone(),
                    timeout: executor.timeout,
                    cleanup: executor.cleanup.clone(),
                });
            }
        }
    }

    if tasks.is_empty() {
        return Err(CoreError::Precondition("no applicable tasks for the given scenario/agents/safe_mode combination".to_string()));
    }

    Ok(Plan { tasks })
}
