//! Agent subcommands

use std::io::{self, BufRead, Write};

use uuid::Uuid;

use agentdesk_core::form::AgentForm;

use crate::client::DirectoryClient;
use crate::output::{print_agents, OutputFormat};
use crate::panel::AgentPanel;
use crate::AgentCommands;

pub async fn handle(
    action: AgentCommands,
    panel: &mut AgentPanel<DirectoryClient>,
    format: OutputFormat,
) -> Result<(), String> {
    match action {
        AgentCommands::List => {
            panel.load().await.map_err(|e| e.to_string())?;
            print_agents(panel.agents(), format);
        }
        AgentCommands::Create {
            name,
            email,
            password,
            confirm_password,
        } => {
            // The duplicate pre-check runs against the loaded list; a
            // failed load just means an empty pre-check, the backend
            // constraint stays authoritative.
            let _ = panel.load().await;

            let form = AgentForm::new(&name, &email, &password, &confirm_password);
            let created = panel.create(&form).await.map_err(|e| e.to_string())?;
            println!("Created support agent: {}", created.id);
            print_agents(panel.agents(), format);
        }
        AgentCommands::Activate { id } => {
            panel.set_active(id, true).await.map_err(|e| e.to_string())?;
            print_agents(panel.agents(), format);
        }
        AgentCommands::Deactivate { id } => {
            panel.set_active(id, false).await.map_err(|e| e.to_string())?;
            print_agents(panel.agents(), format);
        }
        AgentCommands::Delete { id, yes } => {
            if !yes && !confirm_delete(id)? {
                println!("Aborted.");
                return Ok(());
            }
            panel.delete(id).await.map_err(|e| e.to_string())?;
            println!("Support agent deleted.");
        }
    }
    Ok(())
}

fn confirm_delete(id: Uuid) -> Result<bool, String> {
    print!(
        "Are you sure you want to delete support agent {id}? This action cannot be undone. [y/N] "
    );
    io::stdout().flush().map_err(|e| e.to_string())?;

    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .map_err(|e| e.to_string())?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
