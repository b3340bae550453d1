//! Agent domain model.
//!
//! Agents are remote endpoints that register with the control plane,
//! report their platform and supported executors, and execute planned
//! tasks against the host's defensive stack.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Status of an agent in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    Online,
    Offline,
}

impl AgentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Offline => "offline",
        }
    }
}

/// An agent's host platform.
///
/// Kept as a normalized string rather than a closed enum: the catalog and
/// fleets span platforms (windows/linux/darwin/...) this core never needs to
/// branch on beyond case-insensitive equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Platform(String);

impl Platform {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn from_str(s: &str) -> Self {
        Self(s.to_lowercase())
    }
}

impl From<String> for Platform {
    fn from(s: String) -> Self {
        Self::from_str(&s)
    }
}

impl From<&str> for Platform {
    fn from(s: &str) -> Self {
        Self::from_str(s)
    }
}

/// A registered endpoint agent.
///
/// Identity is `paw`, an opaque string the agent chooses at registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    pub paw: String,
    pub hostname: String,
    pub username: String,
    pub platform: Platform,
    pub executors: HashSet<String>,
    pub status: AgentStatus,
    pub last_seen: DateTime<Utc>,
}

impl Agent {
    /// Construct a freshly-registered agent, `status = online`, `last_seen = now`.
    pub fn register(
        paw: impl Into<String>,
        hostname: impl Into<String>,
        username: impl Into<String>,
        platform: Platform,
        executors: HashSet<String>,
    ) -> Self {
        Self {
            paw: paw.into(),
            hostname: hostname.into(),
            username: username.into(),
            platform,
            executors,
            status: AgentStatus::Online,
            last_seen: Utc::now(),
        }
    }

    pub fn is_online(&self) -> bool {
        self.status == AgentStatus::Online
    }

    /// Whether this agent's platform/executor set is compatible with the
    /// given executor requirements. Empty platform on the executor means "any".
    pub fn supports(&self, executor_type: &str, executor_platform: Option<&str>) -> bool {
        let platform_ok = match executor_platform {
            None => true,
            Some("") => true,
            Some(p) => p.eq_ignore_ascii_case(self.platform.as_str()),
        };
        platform_ok && self.executors.contains(executor_type)
    }

    /// Mark this agent stale: transition to offline. Returns true if this
    /// call actually performed the online -> offline transition.
    pub fn mark_offline_if_stale(&mut self, now: DateTime<Utc>, staleness_timeout: chrono::Duration) -> bool {
        if self.status == AgentStatus::Online && now.signed_duration_since(self.last_seen) > staleness_timeout {
            self.status = AgentStatus::Offline;
            true
        } else {
            false
        }
    }

    pub fn heartbeat(&mut self, now: DateTime<Utc>) {
        self.last_seen = now;
        self.status = AgentStatus::Online;
    }
}
