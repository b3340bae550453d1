//! Technique (MITRE ATT&CK catalog) repository port.

use async_trait::async_trait;

use crate::domain::errors::CoreResult;
use crate::domain::models::{Tactic, Technique};

/// Repository interface for Technique catalog persistence.
///
/// Catalog ingestion (`import_from_yaml`) is named here because the core's
/// planner and validator consume its output, but parsing/storing the YAML
/// itself is the persistence backend's concern, not the core's.
#[async_trait]
pub trait TechniqueRepo: Send + Sync {
    async fn create(&self, technique: &Technique) -> CoreResult<()>;
    async fn update(&self, technique: &Technique) -> CoreResult<()>;
    async fn delete(&self, id: &str) -> CoreResult<()>;
    async fn find_by_id(&self, id: &str) -> CoreResult<Option<Technique>>;
    async fn find_all(&self) -> CoreResult<Vec<Technique>>;
    async fn find_by_tactic(&self, tactic: Tactic) -> CoreResult<Vec<Technique>>;
    async fn find_by_platform(&self, platform: &str) -> CoreResult<Vec<Technique>>;
    async fn import_from_yaml(&self, yaml: &str) -> CoreResult<usize>;
}
