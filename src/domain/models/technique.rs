//! Technique domain model: a MITRE ATT&CK catalog entry.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A MITRE ATT&CK top-level category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tactic {
    InitialAccess,
    Execution,
    Persistence,
    PrivilegeEscalation,
    DefenseEvasion,
    CredentialAccess,
    Discovery,
    LateralMovement,
    Collection,
    CommandAndControl,
    Exfiltration,
    Impact,
}

/// One platform/shell-specific realization of a technique.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Executor {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub executor_type: String,
    pub platform: Option<String>,
    pub command: String,
    pub cleanup: Option<String>,
    pub timeout: u32,
    #[serde(default)]
    pub elevation_required: bool,
}

impl Executor {
    /// Whether this executor applies to the given agent platform.
    /// An empty/absent platform on the executor matches any agent platform.
    pub fn matches_platform(&self, agent_platform: &str) -> bool {
        match &self.platform {
            None => true,
            Some(p) if p.is_empty() => true,
            Some(p) => p.eq_ignore_ascii_case(agent_platform),
        }
    }
}

/// A MITRE ATT&CK technique entry, e.g. `T1082`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Technique {
    pub id: String,
    pub name: String,
    pub description: String,
    pub tactic: Tactic,
    #[serde(default)]
    pub tactics: Vec<Tactic>,
    pub platforms: HashSet<String>,
    /// Ordered: earlier executors are preferred when multiple match.
    pub executors: Vec<Executor>,
    #[serde(default)]
    pub detection: Vec<String>,
    pub is_safe: bool,
}

impl Technique {
    /// Find a declared executor by name.
    pub fn executor_named(&self, name: &str) -> Option<&Executor> {
        self.executors.iter().find(|e| e.name.as_deref() == Some(name))
    }

    /// First executor (in declaration order) compatible with the given
    /// platform and executor-type set.
    pub fn first_matching_executor(
        &self,
        agent_platform: &str,
        agent_executor_types: &HashSet<String>,
    ) -> Option<&Executor> {
        self.executors
            .iter()
            .find(|e| e.matches_platform(agent_platform) && agent_executor_types.contains(&e.executor_type))
    }

    /// All tactics this technique is associated with (primary + additional).
    pub fn all_tactics(&self) -> Vec<Tactic> {
        let mut out = vec![self.tactic];
        out.extend(self.tactics.iter().copied());
        out
    }
}
