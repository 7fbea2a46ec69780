//! Auth/database platform client
//!
//! The backend platform is an external collaborator providing identity
//! creation, row storage, and duplicate-key error codes. `AuthPlatform`
//! is the handler's seam to it; `HttpPlatform` is the production
//! implementation speaking the platform's admin HTTP API with the
//! service-role credential.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

use agentdesk_core::agent::SUPPORT_ROLE;

use crate::config::ServiceConfig;

/// Postgres unique-constraint violation, the one failure code the
/// provisioning flow tolerates as an idempotent no-op.
pub const UNIQUE_VIOLATION: &str = "23505";

/// Failure reported by the platform.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct PlatformError {
    /// Backend error code, when the platform supplied one.
    pub code: Option<String>,
    pub message: String,
}

impl PlatformError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }

    /// True when the failure is a duplicate-key insert.
    pub fn is_unique_violation(&self) -> bool {
        self.code.as_deref() == Some(UNIQUE_VIOLATION)
    }
}

/// Request to create one auth identity.
#[derive(Debug, Clone)]
pub struct IdentityRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// The created identity. Its id is the single source of truth for the
/// new account; both directory rows are keyed by it.
#[derive(Debug, Clone, Deserialize)]
pub struct Identity {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Row for the general user directory.
#[derive(Debug, Clone, Serialize)]
pub struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub role: String,
    pub user_metadata: serde_json::Value,
}

/// Row for the support-agent-specific directory.
#[derive(Debug, Clone, Serialize)]
pub struct AgentRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub is_active: bool,
}

/// The platform's admin surface, as used by provisioning.
#[async_trait]
pub trait AuthPlatform: Send + Sync {
    /// Create an auth identity with support-role metadata and a
    /// pre-confirmed email (no verification mail is sent).
    async fn create_identity(&self, req: IdentityRequest) -> Result<Identity, PlatformError>;

    /// Insert into the general user directory.
    async fn insert_user_row(&self, row: UserRow) -> Result<(), PlatformError>;

    /// Insert into the support-agent directory.
    async fn insert_agent_row(&self, row: AgentRow) -> Result<(), PlatformError>;
}

/// HTTP implementation against the platform's admin API.
pub struct HttpPlatform {
    http: reqwest::Client,
    base_url: String,
    service_key: String,
}

impl HttpPlatform {
    pub fn new(config: &ServiceConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.platform_url.trim_end_matches('/').to_string(),
            service_key: config.service_role_key.clone(),
        }
    }

    fn authed(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.header(header::AUTHORIZATION, format!("Bearer {}", self.service_key))
            .header("apikey", &self.service_key)
    }

    async fn insert_row<R: Serialize + Sync>(
        &self,
        table: &str,
        row: &R,
    ) -> Result<(), PlatformError> {
        let url = format!("{}/rest/v1/{}", self.base_url, table);
        let resp = self
            .authed(self.http.post(&url).json(row))
            .header("Prefer", "return=minimal")
            .send()
            .await
            .map_err(|e| PlatformError::new(e.to_string()))?;

        if resp.status().is_success() {
            return Ok(());
        }
        Err(parse_error_body(resp).await)
    }
}

#[async_trait]
impl AuthPlatform for HttpPlatform {
    async fn create_identity(&self, req: IdentityRequest) -> Result<Identity, PlatformError> {
        let url = format!("{}/auth/v1/admin/users", self.base_url);
        let body = json!({
            "email": req.email,
            "password": req.password,
            "user_metadata": { "name": req.name, "role": SUPPORT_ROLE },
            "app_metadata": { "role": SUPPORT_ROLE },
            // Support agents never go through the verification-mail flow.
            "email_confirm": true,
        });

        let resp = self
            .authed(self.http.post(&url).json(&body))
            .send()
            .await
            .map_err(|e| PlatformError::new(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(parse_error_body(resp).await);
        }
        resp.json::<Identity>()
            .await
            .map_err(|e| PlatformError::new(format!("invalid identity response: {e}")))
    }

    async fn insert_user_row(&self, row: UserRow) -> Result<(), PlatformError> {
        self.insert_row("users", &row).await
    }

    async fn insert_agent_row(&self, row: AgentRow) -> Result<(), PlatformError> {
        self.insert_row("support_agents", &row).await
    }
}

/// Pull a code and message out of a platform error response. The auth
/// and storage APIs disagree on field names, so try the usual ones.
async fn parse_error_body(resp: reqwest::Response) -> PlatformError {
    let status = resp.status();
    let body = resp.bytes().await.unwrap_or_default();

    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(&body) {
        let code = value
            .get("code")
            .and_then(|c| c.as_str())
            .map(String::from);
        let message = ["message", "msg", "error_description", "error"]
            .iter()
            .find_map(|k| value.get(*k).and_then(|m| m.as_str()))
            .map(String::from)
            .unwrap_or_else(|| status.to_string());
        return PlatformError { code, message };
    }

    PlatformError::new(if body.is_empty() {
        status.to_string()
    } else {
        String::from_utf8_lossy(&body).to_string()
    })
}
