//! Support-agent provisioning handler
//!
//! One linear sequence, no retries:
//!
//! 1. create the auth identity (fatal on failure; its id is the source
//!    of truth for the new account),
//! 2. insert the general users row (duplicate key tolerated, anything
//!    else fatal; the identity from step 1 is NOT rolled back),
//! 3. insert the support-agent row (duplicate key tolerated, anything
//!    else logged and swallowed, because the authoritative identity
//!    already exists).
//!
//! The asymmetry between steps 2 and 3 is deliberate and load-bearing:
//! an identity can end up able to log in without a support-agent row.
//! That inconsistency window has no automatic reconciliation.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use agentdesk_core::agent::{ProvisionedAgent, SUPPORT_AGENT_ROLE, SUPPORT_ROLE};

use crate::platform::{AgentRow, IdentityRequest, UserRow};
use crate::AppState;

/// Fatal provisioning failures. All map to a 400 `{error}` body.
#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("{0}")]
    Validation(String),
    #[error("Failed to create auth user: {0}")]
    AuthProvisioning(String),
    #[error("Failed to create user record: {0}")]
    DirectoryWrite(String),
}

impl IntoResponse for ProvisionError {
    fn into_response(self) -> Response {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}

#[derive(Debug, Deserialize)]
pub struct ProvisionRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// POST / — provision one support agent.
pub async fn create_support_agent(
    State(state): State<AppState>,
    payload: Result<Json<ProvisionRequest>, JsonRejection>,
) -> Result<Json<ProvisionedAgent>, ProvisionError> {
    let Json(req) = payload.map_err(|e| ProvisionError::Validation(e.body_text()))?;

    if req.name.is_empty() || req.email.is_empty() || req.password.is_empty() {
        return Err(ProvisionError::Validation(
            "Name, email, and password are required".into(),
        ));
    }

    tracing::info!(email = %req.email, "creating support agent");

    // Step 1: the auth identity. Everything downstream keys off its id.
    let identity = state
        .platform
        .create_identity(IdentityRequest {
            name: req.name.clone(),
            email: req.email.clone(),
            password: req.password.clone(),
        })
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "auth identity creation failed");
            ProvisionError::AuthProvisioning(e.message)
        })?;

    tracing::info!(id = %identity.id, "auth identity created");

    // Step 2: general user directory. A re-provision of an existing id
    // hits the unique constraint and is treated as already done.
    if let Err(e) = state
        .platform
        .insert_user_row(UserRow {
            id: identity.id,
            email: req.email.clone(),
            role: SUPPORT_ROLE.into(),
            user_metadata: json!({ "name": req.name, "role": SUPPORT_ROLE }),
        })
        .await
    {
        if !e.is_unique_violation() {
            tracing::error!(error = %e, "users directory insert failed");
            return Err(ProvisionError::DirectoryWrite(e.message));
        }
    }

    // Step 3: support-agent directory. Failures other than duplicates
    // are logged but do not fail the request; the identity exists and
    // is authoritative.
    if let Err(e) = state
        .platform
        .insert_agent_row(AgentRow {
            id: identity.id,
            name: req.name.clone(),
            email: req.email.clone(),
            role: SUPPORT_AGENT_ROLE.into(),
            is_active: true,
        })
        .await
    {
        if !e.is_unique_violation() {
            tracing::error!(error = %e, "support agent directory insert failed");
        }
    }

    tracing::info!(id = %identity.id, "support agent provisioned");

    Ok(Json(ProvisionedAgent {
        id: identity.id,
        name: req.name,
        email: req.email,
        role: SUPPORT_ROLE.into(),
        is_active: true,
        created_at: identity.created_at,
    }))
}
