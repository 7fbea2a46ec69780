//! Output formatting

use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use agentdesk_core::agent::SupportAgent;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}

#[derive(Tabled)]
struct AgentLine {
    #[tabled(rename = "Agent")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Last Login")]
    last_login: String,
}

impl From<&SupportAgent> for AgentLine {
    fn from(agent: &SupportAgent) -> Self {
        let status = if agent.is_active {
            "Active".green().to_string()
        } else {
            "Inactive".dimmed().to_string()
        };
        Self {
            name: agent.name.clone(),
            email: agent.email.clone(),
            status,
            last_login: agent
                .last_login_at
                .map(|t| t.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "Never".to_string()),
        }
    }
}

pub fn print_agents(agents: &[SupportAgent], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            if agents.is_empty() {
                println!("No support agents. Create your first agent with `agentdesk agents create`.");
                return;
            }
            let lines: Vec<AgentLine> = agents.iter().map(AgentLine::from).collect();
            println!("{}", Table::new(lines).with(Style::sharp()));
        }
        OutputFormat::Json => print_serialized(agents, format),
        OutputFormat::Yaml => print_serialized(agents, format),
    }
}

pub fn print_serialized<T: Serialize + ?Sized>(data: &T, format: OutputFormat) {
    match format {
        OutputFormat::Yaml => {
            println!("{}", serde_yaml::to_string(data).unwrap_or_default());
        }
        _ => {
            println!("{}", serde_json::to_string_pretty(data).unwrap_or_default());
        }
    }
}
