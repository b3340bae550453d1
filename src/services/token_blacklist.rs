//! TokenBlacklist: in-memory revoked-token set with TTL-based sweeping.
//!
//! Grounded on the teacher's reader-writer-lock-over-shared-state pattern
//! (`active_goals_cache` in the DAG executor); readers are non-blocking in
//! the common case since `RwLock::read` doesn't contend with other readers.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use tokio::sync::RwLock;
use tracing::info;

const SWEEP_INTERVAL: StdDuration = StdDuration::from_secs(60);

fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

pub struct TokenBlacklist {
    entries: Arc<RwLock<HashMap<String, DateTime<Utc>>>>,
    running: Arc<AtomicBool>,
}

impl TokenBlacklist {
    pub fn new() -> Self {
        Self { entries: Arc::new(RwLock::new(HashMap::new())), running: Arc::new(AtomicBool::new(true)) }
    }

    pub async fn revoke(&self, token: &str, expiry: DateTime<Utc>) {
        self.entries.write().await.insert(hash_token(token), expiry);
    }

    /// True iff an entry exists whose expiry is still in the future.
    /// Expired entries are treated as not-revoked so callers never need a
    /// separate cleanup pass.
    pub async fn is_revoked(&self, token: &str) -> bool {
        let entries = self.entries.read().await;
        entries.get(&hash_token(token)).is_some_and(|expiry| *expiry > Utc::now())
    }

    async fn sweep(&self) {
        let now = Utc::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, expiry| *expiry > now);
        let removed = before - entries.len();
        if removed > 0 {
            info!(removed, "token blacklist sweep removed expired entries");
        }
    }

    /// Start the background sweeper. Calling `close` stops it; calling
    /// `start_sweeper` again after close is not supported (construct a new
    /// `TokenBlacklist` instead).
    pub fn start_sweeper(self: &Arc<Self>) -> tokio::task::JoinHandle<()> {
        let blacklist = self.clone();
        tokio::spawn(async move {
            while blacklist.running.load(Ordering::SeqCst) {
                tokio::time::sleep(SWEEP_INTERVAL).await;
                if !blacklist.running.load(Ordering::SeqCst) {
                    break;
                }
                blacklist.sweep().await;
            }
        })
    }

    /// Idempotent shutdown signal for the sweeper loop.
    pub fn close(&self) {
        self.running.store(false, Ordering::SeqCst);
    }
}

impl Default for TokenBlacklist {
    fn default() -> Self {
        Self::new()
    }
}
