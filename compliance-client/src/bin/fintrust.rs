//! FinTrust Guardian command-line host
//!
//! Loads audit logs and policies from the compliance API and prints them.

use anyhow::Context;
use clap::{Parser, Subcommand};
use compliance_client::{
    load_dashboard, AuditLogEntry, ClientConfig, ComplianceApi, ComplianceClient, Policy,
};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "fintrust", about = "FinTrust Guardian compliance client")]
struct Cli {
    /// Compliance API base URL (overrides config file and environment)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Print the decoded values as JSON instead of tables (timestamps as RFC 3339 UTC)
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show audit logs and current policies
    Dashboard,
    /// Show audit logs
    Logs {
        /// Only entries for this user
        #[arg(long)]
        user: Option<String>,
    },
    /// Show data-sharing policies
    Policies,
    /// Request authorization for a partner to access user data
    Authorize {
        partner_id: String,
        user_id: String,
        purpose: String,
    },
}

fn load_config(cli: &Cli) -> anyhow::Result<ClientConfig> {
    let mut config = match std::env::var(compliance_client::CONFIG_PATH_ENV) {
        Ok(path) => {
            info!("Loading config from: {}", path);
            ClientConfig::from_file(&path)?
        }
        Err(_) => ClientConfig::from_env()?,
    };

    if let Some(base_url) = &cli.base_url {
        config.base_url = base_url.clone();
    }
    Ok(config)
}

fn print_logs(logs: &[AuditLogEntry]) {
    println!(
        "{:<27} {:<16} {:<16} {:<20} {}",
        "TIMESTAMP", "USER ID", "PARTNER ID", "PURPOSE", "DATA ACCESSED"
    );
    for log in logs {
        println!(
            "{:<27} {:<16} {:<16} {:<20} {}",
            log.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            log.user_id,
            log.partner_id,
            log.purpose,
            log.data_accessed
        );
    }
}

fn print_policies(policies: &[Policy]) {
    if policies.is_empty() {
        println!("No policies available.");
        return;
    }
    for policy in policies {
        println!("Partner:          {}", policy.partner_id);
        println!("Purpose:          {}", policy.purpose);
        println!("Data Fields:      {}", policy.data_fields_display());
        println!("Consent Required: {}", policy.consent_label());
        println!();
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let client = ComplianceClient::new(config)?;

    match &cli.command {
        Command::Dashboard => {
            let snapshot = load_dashboard(&client).await;

            println!("Compliance Dashboard\n");
            println!("Audit Logs");
            match &snapshot.audit_logs {
                Ok(logs) if cli.json => print_json(logs)?,
                Ok(logs) => print_logs(logs),
                Err(e) => println!("  unavailable: {}", e),
            }

            println!("\nCurrent Policies");
            match &snapshot.policies {
                Ok(policies) if cli.json => print_json(policies)?,
                Ok(policies) => print_policies(policies),
                Err(e) => println!("  unavailable: {}", e),
            }

            if !snapshot.is_complete() {
                anyhow::bail!("dashboard loaded partially");
            }
        }
        Command::Logs { user } => {
            let logs = match user {
                Some(user_id) => client
                    .get_user_audit_logs(user_id)
                    .await
                    .with_context(|| format!("fetching audit logs for {}", user_id))?,
                None => client.get_audit_logs().await.context("fetching audit logs")?,
            };
            if cli.json {
                print_json(&logs)?;
            } else {
                print_logs(&logs);
            }
        }
        Command::Policies => {
            let policies = client.get_policies().await.context("fetching policies")?;
            if cli.json {
                print_json(&policies)?;
            } else {
                print_policies(&policies);
            }
        }
        Command::Authorize {
            partner_id,
            user_id,
            purpose,
        } => {
            let result = client
                .authorize_data_request(partner_id, user_id, purpose)
                .await
                .context("authorizing data request")?;
            print_json(&result)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_json_flag_describes_decoded_output() {
        let command = Cli::command();
        let json = command
            .get_arguments()
            .find(|arg| arg.get_id() == "json")
            .unwrap();

        let help = json.get_help().unwrap().to_string();
        assert!(help.contains("decoded values"));
        assert!(help.contains("RFC 3339"));
        assert!(!help.contains("raw"));
    }

    #[test]
    fn test_parses_user_logs_with_global_json() {
        let cli = Cli::try_parse_from(["fintrust", "logs", "--user", "user_123", "--json"]).unwrap();

        assert!(cli.json);
        assert!(matches!(cli.command, Command::Logs { user: Some(ref u) } if u == "user_123"));
    }
}
