//! AgentRegistry: tracks agent liveness, queried by the planner for
//! capabilities.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{info, warn};

use crate::domain::errors::CoreResult;
use crate::domain::models::{Agent, AgentStatus, Platform};
use crate::domain::ports::AgentRepo;
use crate::services::notification_dispatcher::NotificationDispatcher;

pub struct AgentRegistry {
    repo: Arc<dyn AgentRepo>,
    notifications: Arc<NotificationDispatcher>,
    staleness_timeout: Duration,
}

impl AgentRegistry {
    pub fn new(repo: Arc<dyn AgentRepo>, notifications: Arc<NotificationDispatcher>, staleness_timeout: Duration) -> Self {
        Self { repo, notifications, staleness_timeout }
    }

    /// Upsert an agent: create if unseen, otherwise refresh its reported
    /// attributes and bring it back online.
    pub async fn register_or_update(
        &self,
        paw: &str,
        hostname: &str,
        username: &str,
        platform: Platform,
        executors: std::collections::HashSet<String>,
    ) -> CoreResult<Agent> {
        match self.repo.find_by_paw(paw).await? {
            Some(mut agent) => {
                agent.hostname = hostname.to_string();
                agent.username = username.to_string();
                agent.platform = platform;
                agent.executors = executors;
                agent.heartbeat(Utc::now());
                self.repo.update(&agent).await?;
                Ok(agent)
            }
            None => {
                let agent = Agent::register(paw, hostname, username, platform, executors);
                self.repo.create(&agent).await?;
                info!(paw, "agent registered");
                Ok(agent)
            }
        }
    }

    pub async fn heartbeat(&self, paw: &str) -> CoreResult<()> {
        self.repo.update_last_seen(paw, Utc::now()).await
    }

    /// Sweep online agents, marking any stale past `staleness_timeout` as
    /// offline, firing an offline notification for each transition.
    pub async fn check_stale(&self) -> CoreResult<usize> {
        self.check_stale_at(Utc::now()).await
    }

    async fn check_stale_at(&self, now: DateTime<Utc>) -> CoreResult<usize> {
        let online = self.repo.find_by_status(AgentStatus::Online).await?;
        let mut transitioned = 0;

        for mut agent in online {
            if agent.mark_offline_if_stale(now, self.staleness_timeout) {
                let paw = agent.paw.clone();
                if let Err(err) = self.repo.update(&agent).await {
                    warn!(paw, error = %err, "failed to persist stale agent transition");
                    continue;
                }
                transitioned += 1;
                self.notifications.notify_agent_offline(&paw).await;
            }
        }

        Ok(transitioned)
    }
}
