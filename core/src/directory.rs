//! Agent directory seam
//!
//! The directory service is an external collaborator; this trait is the
//! panel's only view of it. Creation delegates to the provisioning
//! service, everything else goes straight to the directory store.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::agent::{AgentCreate, AgentUpdate, ProvisionedAgent, SupportAgent};

#[derive(Debug, Clone, Error)]
pub enum DirectoryError {
    /// The backend answered with an error message worth showing as-is
    /// (notably the provisioning service's `{error}` body).
    #[error("{0}")]
    Service(String),
    /// The call never produced a usable response.
    #[error("request failed: {0}")]
    Transport(String),
}

/// The external Agent Directory Service.
#[async_trait]
pub trait AgentDirectory: Send + Sync {
    /// Fetch the full agent list.
    async fn list(&self) -> Result<Vec<SupportAgent>, DirectoryError>;

    /// Provision a new agent (auth identity plus directory rows).
    async fn create(&self, agent: AgentCreate) -> Result<ProvisionedAgent, DirectoryError>;

    /// Partial update of one agent.
    async fn update(&self, id: Uuid, update: AgentUpdate) -> Result<(), DirectoryError>;

    /// Delete one agent.
    async fn delete(&self, id: Uuid) -> Result<(), DirectoryError>;
}
