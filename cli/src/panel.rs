//! Agent management panel
//!
//! Holds the loaded agent list and the observable mutation semantics:
//! every confirmed write is followed by a full refetch from the
//! directory (no optimistic updates, no local cache invalidation), so
//! the displayed records always carry server-assigned fields. A failed
//! load leaves the list in its last-known state and raises a banner;
//! recovery is always user-initiated.

use thiserror::Error;
use uuid::Uuid;

use agentdesk_core::agent::{AgentCreate, AgentUpdate, ProvisionedAgent, SupportAgent};
use agentdesk_core::directory::{AgentDirectory, DirectoryError};
use agentdesk_core::form::{AgentForm, FormError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PanelError {
    #[error("Failed to load support agents")]
    LoadFailed,
    /// Field-level validation failure; never reaches the network.
    #[error("{0}")]
    Invalid(#[from] FormError),
    #[error("{0}")]
    CreateFailed(String),
    #[error("{0}")]
    UpdateFailed(String),
    #[error("{0}")]
    DeleteFailed(String),
}

pub struct AgentPanel<D: AgentDirectory> {
    directory: D,
    agents: Vec<SupportAgent>,
    banner: Option<String>,
}

impl<D: AgentDirectory> AgentPanel<D> {
    pub fn new(directory: D) -> Self {
        Self {
            directory,
            agents: Vec::new(),
            banner: None,
        }
    }

    /// Currently loaded agents (last successful fetch).
    pub fn agents(&self) -> &[SupportAgent] {
        &self.agents
    }

    /// Load-failure banner, if the last refetch failed.
    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    /// Fetch the full agent list. On failure the list keeps its
    /// last-known state (empty on first load) and a banner is raised;
    /// there is no retry.
    pub async fn load(&mut self) -> Result<(), PanelError> {
        match self.directory.list().await {
            Ok(agents) => {
                self.agents = agents;
                self.banner = None;
                Ok(())
            }
            Err(_) => {
                self.banner = Some(PanelError::LoadFailed.to_string());
                Err(PanelError::LoadFailed)
            }
        }
    }

    /// Create a support agent from the form: run the validation
    /// pipeline, pre-check the loaded list for the email (best-effort,
    /// the backend constraint is authoritative), submit, then refetch.
    pub async fn create(&mut self, form: &AgentForm) -> Result<ProvisionedAgent, PanelError> {
        form.validate()?;

        if self.agents.iter().any(|a| a.email == form.email) {
            return Err(FormError::DuplicateEmail.into());
        }

        let created = self
            .directory
            .create(AgentCreate {
                name: form.name.clone(),
                email: form.email.clone(),
                password: form.password.clone(),
            })
            .await
            .map_err(|e| PanelError::CreateFailed(create_message(e)))?;

        // The displayed record must reflect server-assigned fields, so
        // refetch instead of inserting locally. A failed refetch only
        // raises the banner; the creation itself succeeded.
        let _ = self.load().await;
        Ok(created)
    }

    /// Toggle portal access. The displayed value changes only after
    /// server confirmation and a refetch.
    pub async fn set_active(&mut self, id: Uuid, is_active: bool) -> Result<(), PanelError> {
        self.directory
            .update(id, AgentUpdate::active(is_active))
            .await
            .map_err(|e| PanelError::UpdateFailed(service_message(e, "Failed to update support agent")))?;
        let _ = self.load().await;
        Ok(())
    }

    /// Delete an agent. Confirmation is the caller's responsibility.
    pub async fn delete(&mut self, id: Uuid) -> Result<(), PanelError> {
        self.directory
            .delete(id)
            .await
            .map_err(|e| PanelError::DeleteFailed(service_message(e, "Failed to delete support agent")))?;
        let _ = self.load().await;
        Ok(())
    }
}

/// The provisioning service's error message travels to the admin as-is;
/// transport failures fall back to a generic message.
fn create_message(err: DirectoryError) -> String {
    service_message(err, "Failed to create support agent")
}

fn service_message(err: DirectoryError, fallback: &str) -> String {
    match err {
        DirectoryError::Service(msg) => msg,
        DirectoryError::Transport(_) => fallback.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// In-memory directory with per-operation failure injection.
    #[derive(Default)]
    struct MockDirectory {
        agents: Mutex<Vec<SupportAgent>>,
        list_error: Mutex<Option<DirectoryError>>,
        create_error: Mutex<Option<DirectoryError>>,
        update_error: Mutex<Option<DirectoryError>>,
        delete_error: Mutex<Option<DirectoryError>>,
        create_calls: AtomicUsize,
    }

    impl MockDirectory {
        fn with_agent(email: &str) -> Self {
            let dir = Self::default();
            dir.agents.lock().unwrap().push(agent(email, true));
            dir
        }
    }

    fn agent(email: &str, is_active: bool) -> SupportAgent {
        SupportAgent {
            id: Uuid::new_v4(),
            name: "Existing Agent".into(),
            email: email.into(),
            is_active,
            last_login_at: None,
        }
    }

    #[async_trait]
    impl AgentDirectory for &MockDirectory {
        async fn list(&self) -> Result<Vec<SupportAgent>, DirectoryError> {
            if let Some(err) = self.list_error.lock().unwrap().clone() {
                return Err(err);
            }
            Ok(self.agents.lock().unwrap().clone())
        }

        async fn create(&self, req: AgentCreate) -> Result<ProvisionedAgent, DirectoryError> {
            self.create_calls.fetch_add(1, Ordering::SeqCst);
            if let Some(err) = self.create_error.lock().unwrap().clone() {
                return Err(err);
            }
            let id = Uuid::new_v4();
            self.agents.lock().unwrap().push(SupportAgent {
                id,
                name: req.name.clone(),
                email: req.email.clone(),
                is_active: true,
                last_login_at: None,
            });
            Ok(ProvisionedAgent {
                id,
                name: req.name,
                email: req.email,
                role: "support".into(),
                is_active: true,
                created_at: chrono::Utc::now(),
            })
        }

        async fn update(&self, id: Uuid, update: AgentUpdate) -> Result<(), DirectoryError> {
            if let Some(err) = self.update_error.lock().unwrap().clone() {
                return Err(err);
            }
            let mut agents = self.agents.lock().unwrap();
            if let Some(agent) = agents.iter_mut().find(|a| a.id == id) {
                if let Some(active) = update.is_active {
                    agent.is_active = active;
                }
            }
            Ok(())
        }

        async fn delete(&self, id: Uuid) -> Result<(), DirectoryError> {
            if let Some(err) = self.delete_error.lock().unwrap().clone() {
                return Err(err);
            }
            self.agents.lock().unwrap().retain(|a| a.id != id);
            Ok(())
        }
    }

    fn form(email: &str) -> AgentForm {
        AgentForm::new("Sarah Johnson", email, "secret123", "secret123")
    }

    #[tokio::test]
    async fn test_load_failure_keeps_last_known_list() {
        let dir = MockDirectory::with_agent("a@b.c");
        let mut panel = AgentPanel::new(&dir);
        panel.load().await.unwrap();
        assert_eq!(panel.agents().len(), 1);

        *dir.list_error.lock().unwrap() =
            Some(DirectoryError::Transport("connection refused".into()));
        assert_eq!(panel.load().await, Err(PanelError::LoadFailed));

        // Last-known state retained, banner raised.
        assert_eq!(panel.agents().len(), 1);
        assert_eq!(panel.banner(), Some("Failed to load support agents"));
    }

    #[tokio::test]
    async fn test_create_reloads_with_server_assigned_fields() {
        let dir = MockDirectory::default();
        let mut panel = AgentPanel::new(&dir);
        panel.load().await.unwrap();

        let created = panel.create(&form("sarah@voya.com")).await.unwrap();
        assert_eq!(created.role, "support");
        assert!(created.is_active);

        // The list was refetched, not locally patched.
        assert_eq!(panel.agents().len(), 1);
        assert_eq!(panel.agents()[0].id, created.id);
        assert!(panel.agents()[0].is_active);
    }

    #[tokio::test]
    async fn test_duplicate_email_blocks_without_network_call() {
        let dir = MockDirectory::with_agent("sarah@voya.com");
        let mut panel = AgentPanel::new(&dir);
        panel.load().await.unwrap();

        let err = panel.create(&form("sarah@voya.com")).await.unwrap_err();
        assert_eq!(err, PanelError::Invalid(FormError::DuplicateEmail));
        assert_eq!(dir.create_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_duplicate_check_is_case_sensitive() {
        // Exact-match only: a different casing slips past the local
        // pre-check and is left to the backend constraint.
        let dir = MockDirectory::with_agent("sarah@voya.com");
        let mut panel = AgentPanel::new(&dir);
        panel.load().await.unwrap();

        assert!(panel.create(&form("Sarah@voya.com")).await.is_ok());
        assert_eq!(dir.create_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_validation_failure_never_reaches_network() {
        let dir = MockDirectory::default();
        let mut panel = AgentPanel::new(&dir);

        let bad = AgentForm::new("Sarah", "not-an-email", "secret123", "secret123");
        let err = panel.create(&bad).await.unwrap_err();
        assert_eq!(err.to_string(), "Please enter a valid email address");
        assert_eq!(dir.create_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_create_failure_surfaces_service_message() {
        let dir = MockDirectory::default();
        *dir.create_error.lock().unwrap() = Some(DirectoryError::Service(
            "Failed to create auth user: email already registered".into(),
        ));
        let mut panel = AgentPanel::new(&dir);
        panel.load().await.unwrap();

        let err = panel.create(&form("sarah@voya.com")).await.unwrap_err();
        assert_eq!(
            err,
            PanelError::CreateFailed(
                "Failed to create auth user: email already registered".into()
            )
        );
        // List unchanged; the admin corrects the form and retries.
        assert!(panel.agents().is_empty());
    }

    #[tokio::test]
    async fn test_create_transport_failure_uses_generic_message() {
        let dir = MockDirectory::default();
        *dir.create_error.lock().unwrap() =
            Some(DirectoryError::Transport("timed out".into()));
        let mut panel = AgentPanel::new(&dir);

        let err = panel.create(&form("sarah@voya.com")).await.unwrap_err();
        assert_eq!(
            err,
            PanelError::CreateFailed("Failed to create support agent".into())
        );
    }

    #[tokio::test]
    async fn test_toggle_flips_only_the_active_flag() {
        let dir = MockDirectory::with_agent("sarah@voya.com");
        let mut panel = AgentPanel::new(&dir);
        panel.load().await.unwrap();

        let before = panel.agents()[0].clone();
        panel.set_active(before.id, false).await.unwrap();

        let after = &panel.agents()[0];
        assert!(!after.is_active);
        assert_eq!(after.id, before.id);
        assert_eq!(after.name, before.name);
        assert_eq!(after.email, before.email);
    }

    #[tokio::test]
    async fn test_toggle_failure_leaves_state_unchanged() {
        let dir = MockDirectory::with_agent("sarah@voya.com");
        let mut panel = AgentPanel::new(&dir);
        panel.load().await.unwrap();
        let id = panel.agents()[0].id;

        *dir.update_error.lock().unwrap() =
            Some(DirectoryError::Transport("connection reset".into()));
        let err = panel.set_active(id, false).await.unwrap_err();
        assert_eq!(
            err,
            PanelError::UpdateFailed("Failed to update support agent".into())
        );
        assert!(panel.agents()[0].is_active);
    }

    #[tokio::test]
    async fn test_delete_removes_and_reloads() {
        let dir = MockDirectory::with_agent("sarah@voya.com");
        let mut panel = AgentPanel::new(&dir);
        panel.load().await.unwrap();
        let id = panel.agents()[0].id;

        panel.delete(id).await.unwrap();
        assert!(panel.agents().is_empty());
    }
}
