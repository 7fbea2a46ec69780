//! AgentDesk admin panel
//!
//! Terminal admin console for support-agent accounts.
//!
//! # Usage
//!
//! ```bash
//! agentdesk login
//! agentdesk agents list
//! agentdesk agents create --name "Sarah Johnson" --email sarah@voya.com \
//!     --password secret123 --confirm-password secret123
//! agentdesk agents deactivate <id>
//! agentdesk agents delete <id> --yes
//! agentdesk logout
//! ```

use clap::{Parser, Subcommand};
use uuid::Uuid;

use agentdesk_core::session::{AdminSession, SessionError};

mod client;
mod commands;
mod config;
mod output;
mod panel;

use client::DirectoryClient;
use config::SessionStore;
use panel::AgentPanel;

#[derive(Parser)]
#[command(name = "agentdesk")]
#[command(version = "0.1.0")]
#[command(about = "Support agent administration", long_about = None)]
struct Cli {
    /// Agent directory service base URL
    #[arg(long, env = "AGENTDESK_API_URL", default_value = "http://localhost:8080/api")]
    api_url: String,

    /// Provisioning service URL
    #[arg(long, env = "AGENTDESK_PROVISION_URL", default_value = "http://localhost:8787/")]
    provision_url: String,

    /// Output format
    #[arg(long, short, value_enum, default_value = "table")]
    format: output::OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage support agents
    Agents {
        #[command(subcommand)]
        action: AgentCommands,
    },
    /// Stamp a local admin session (client-side convenience, no
    /// credential exchange happens here)
    Login,
    /// Clear the local admin session
    Logout,
}

#[derive(Subcommand)]
pub enum AgentCommands {
    /// List all support agents
    List,
    /// Create a new support agent
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
    },
    /// Grant portal access
    Activate { id: Uuid },
    /// Revoke portal access
    Deactivate { id: Uuid },
    /// Delete a support agent
    Delete {
        id: Uuid,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let store = match SessionStore::open() {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Login => login(&store),
        Commands::Logout => logout(&store),
        Commands::Agents { action } => {
            if let Err(message) = check_session(&store) {
                eprintln!("{message}");
                std::process::exit(1);
            }
            let client = DirectoryClient::new(&cli.api_url, &cli.provision_url);
            let mut panel = AgentPanel::new(client);
            commands::handle(action, &mut panel, cli.format).await
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn login(store: &SessionStore) -> Result<(), String> {
    store.save(&AdminSession::sign_in(chrono::Utc::now()))?;
    println!("Signed in. Session valid for 24 hours.");
    Ok(())
}

fn logout(store: &SessionStore) -> Result<(), String> {
    store.clear()?;
    println!("Signed out.");
    Ok(())
}

/// The panel gate: a missing or stale session blocks every agent
/// command and clears the stored entries. Client-side convenience only.
fn check_session(store: &SessionStore) -> Result<(), String> {
    let session = match store.load()? {
        Some(session) => session,
        None => {
            store.clear()?;
            return Err("Not signed in. Run `agentdesk login` first.".into());
        }
    };

    match session.validate(chrono::Utc::now()) {
        Ok(()) => Ok(()),
        Err(SessionError::Expired) => {
            store.clear()?;
            Err("Session expired. Please sign in again.".into())
        }
        Err(SessionError::NotSignedIn) => {
            store.clear()?;
            Err("Not signed in. Run `agentdesk login` first.".into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn scratch_store() -> SessionStore {
        let dir = std::env::temp_dir().join(format!("agentdesk-{}", Uuid::new_v4()));
        SessionStore::at(dir)
    }

    #[test]
    fn test_fresh_session_passes_gate_and_keeps_entries() {
        let store = scratch_store();
        store.save(&AdminSession::sign_in(Utc::now())).unwrap();

        assert!(check_session(&store).is_ok());
        assert!(store.path().exists());

        store.clear().unwrap();
    }

    #[test]
    fn test_stale_session_is_rejected_and_entries_cleared() {
        let store = scratch_store();
        let stale = AdminSession::sign_in(Utc::now() - Duration::hours(25));
        store.save(&stale).unwrap();
        assert!(store.path().exists());

        let message = check_session(&store).unwrap_err();
        assert_eq!(message, "Session expired. Please sign in again.");
        assert!(!store.path().exists());
    }

    #[test]
    fn test_missing_session_is_rejected() {
        let store = scratch_store();

        let message = check_session(&store).unwrap_err();
        assert_eq!(message, "Not signed in. Run `agentdesk login` first.");
        assert!(!store.path().exists());
    }

    #[test]
    fn test_partial_session_file_counts_as_missing_and_is_cleared() {
        let store = scratch_store();
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(store.path(), "authenticated = true\n").unwrap();

        let message = check_session(&store).unwrap_err();
        assert_eq!(message, "Not signed in. Run `agentdesk login` first.");
        assert!(!store.path().exists());
    }
}
