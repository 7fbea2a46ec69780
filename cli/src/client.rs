//! HTTP directory client
//!
//! `AgentDirectory` over the remote directory service. Creation is the
//! odd one out: it goes to the provisioning service, which answers
//! either the provisioned agent or a `{error}` body whose message is
//! shown to the admin verbatim.

use async_trait::async_trait;
use uuid::Uuid;

use agentdesk_core::agent::{AgentCreate, AgentUpdate, ProvisionedAgent, SupportAgent};
use agentdesk_core::directory::{AgentDirectory, DirectoryError};

pub struct DirectoryClient {
    http: reqwest::Client,
    base_url: String,
    provision_url: String,
}

impl DirectoryClient {
    pub fn new(base_url: &str, provision_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            provision_url: provision_url.to_string(),
        }
    }

    fn agents_url(&self, id: Option<Uuid>) -> String {
        match id {
            Some(id) => format!("{}/agents/{}", self.base_url, id),
            None => format!("{}/agents", self.base_url),
        }
    }
}

#[async_trait]
impl AgentDirectory for DirectoryClient {
    async fn list(&self) -> Result<Vec<SupportAgent>, DirectoryError> {
        let resp = self
            .http
            .get(self.agents_url(None))
            .send()
            .await
            .map_err(transport)?;
        let resp = check(resp).await?;
        resp.json().await.map_err(transport)
    }

    async fn create(&self, agent: AgentCreate) -> Result<ProvisionedAgent, DirectoryError> {
        let resp = self
            .http
            .post(&self.provision_url)
            .json(&agent)
            .send()
            .await
            .map_err(transport)?;
        let resp = check(resp).await?;
        resp.json().await.map_err(transport)
    }

    async fn update(&self, id: Uuid, update: AgentUpdate) -> Result<(), DirectoryError> {
        let resp = self
            .http
            .patch(self.agents_url(Some(id)))
            .json(&update)
            .send()
            .await
            .map_err(transport)?;
        check(resp).await.map(|_| ())
    }

    async fn delete(&self, id: Uuid) -> Result<(), DirectoryError> {
        let resp = self
            .http
            .delete(self.agents_url(Some(id)))
            .send()
            .await
            .map_err(transport)?;
        check(resp).await.map(|_| ())
    }
}

fn transport(err: reqwest::Error) -> DirectoryError {
    DirectoryError::Transport(err.to_string())
}

/// Map a non-success response to the service's `{error}` message when
/// one is present, otherwise to the HTTP status line.
async fn check(resp: reqwest::Response) -> Result<reqwest::Response, DirectoryError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let message = resp
        .json::<serde_json::Value>()
        .await
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
        .unwrap_or_else(|| status.to_string());
    Err(DirectoryError::Service(message))
}
