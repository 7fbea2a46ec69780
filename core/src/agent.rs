//! Support agent data model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role recorded on the auth identity, the users row, and the
/// provisioning response.
pub const SUPPORT_ROLE: &str = "support";

/// Role tag carried by the support-agent directory row.
pub const SUPPORT_AGENT_ROLE: &str = "support_agent";

/// A support-staff account entitled to use the support portal.
///
/// Owned by the external directory service; everything here is a read
/// model. `last_login_at` is set by the auth platform and never written
/// from this side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupportAgent {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub is_active: bool,
    pub last_login_at: Option<DateTime<Utc>>,
}

/// Payload submitted to the provisioning service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentCreate {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Partial update; only the active flag is mutated by this surface.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl AgentUpdate {
    /// Update that toggles portal access.
    pub fn active(is_active: bool) -> Self {
        Self {
            is_active: Some(is_active),
        }
    }
}

/// Response body of a successful provisioning call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvisionedAgent {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}
