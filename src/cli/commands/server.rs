use clap::Subcommand;
use serde_json::json;
use crate::cli::config::*;
use crate::cli::utils::*;
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum ServerCommands {
    #[command(about = "Register remote API server")]
    Add {
        #[arg(help = "Server name")]
        name: String,
        #[arg(help = "API base URL, e.g. https://host/api")]
        url: String,
        #[arg(long, default_value = "", help = "Description")]
        description: String,
    },

    #[command(about = "List all servers")]
    List,

    #[command(about = "Show currently selected server")]
    Current,

    #[command(about = "Switch to server (persistent selection)")]
    Use {
        #[arg(help = "Server name to switch to")]
        name: String,
    },

    #[command(about = "Remove server from registry")]
    Delete {
        #[arg(help = "Server name to delete")]
        name: String,
    },

    #[command(about = "Check that a server answers (defaults to current server)")]
    Ping {
        #[arg(help = "Server name to ping")]
        name: Option<String>,
    },
}

pub async fn handle(cmd: ServerCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        ServerCommands::Add { name, url, description } => {
            url::Url::parse(&url).map_err(|e| anyhow::anyhow!("Invalid server URL '{}': {}", url, e))?;

            let mut config = load_server_config()?;
            if config.servers.contains_key(&name) {
                return Err(anyhow::anyhow!("Server '{}' already exists", name));
            }

            let info = ServerInfo::new(url, description);
            let server_url = info.url.clone();
            config.servers.insert(name.clone(), info);
            if config.current_server.is_none() {
                config.current_server = Some(name.clone());
            }
            save_server_config(&config)?;

            output_success(
                &output_format,
                &format!("Server '{}' added ({})", name, server_url),
                Some(json!({ "server": name, "url": server_url })),
            )
        }
        ServerCommands::List => {
            let config = load_server_config()?;
            if config.servers.is_empty() {
                return output_empty_collection(&output_format, "servers", "No servers configured");
            }

            let mut names: Vec<&String> = config.servers.keys().collect();
            names.sort();

            match output_format {
                OutputFormat::Json => {
                    let servers: Vec<_> = names.iter().map(|name| {
                        let info = &config.servers[*name];
                        json!({
                            "name": name,
                            "url": info.url,
                            "description": info.description,
                            "status": info.status,
                            "last_ping": info.last_ping,
                            "current": config.current_server.as_deref() == Some(name.as_str())
                        })
                    }).collect();
                    print_json(&json!({ "servers": servers }))?;
                }
                OutputFormat::Text => {
                    println!("{:<15} {:<40} {:<8} {}", "NAME", "URL", "STATUS", "DESCRIPTION");
                    print_rule(80);
                    for name in names {
                        let info = &config.servers[name];
                        let marker = if config.current_server.as_deref() == Some(name.as_str()) { "*" } else { " " };
                        println!("{}{:<14} {:<40} {:<8} {}", marker, name, info.url, info.status.label(), info.description);
                    }
                }
            }
            Ok(())
        }
        ServerCommands::Current => {
            let (name, url) = current_target()?;
            match output_format {
                OutputFormat::Json => print_json(&json!({ "current_server": { "name": name, "url": url } })),
                OutputFormat::Text => {
                    println!("Current server: {}", name);
                    println!("URL: {}", url);
                    Ok(())
                }
            }
        }
        ServerCommands::Use { name } => {
            let mut config = load_server_config()?;
            if !config.servers.contains_key(&name) {
                return Err(anyhow::anyhow!("Server '{}' not found", name));
            }
            config.current_server = Some(name.clone());
            save_server_config(&config)?;

            output_success(
                &output_format,
                &format!("Switched to server '{}'", name),
                Some(json!({ "current_server": name })),
            )
        }
        ServerCommands::Delete { name } => {
            let mut config = load_server_config()?;
            if config.servers.remove(&name).is_none() {
                return Err(anyhow::anyhow!("Server '{}' not found", name));
            }
            if config.current_server.as_deref() == Some(name.as_str()) {
                config.current_server = None;
            }
            save_server_config(&config)?;

            let mut auth = load_auth_config()?;
            if auth.sessions.remove(&name).is_some() {
                save_auth_config(&auth)?;
            }

            output_success(&output_format, &format!("Server '{}' deleted successfully", name), None)
        }
        ServerCommands::Ping { name } => {
            let mut config = load_server_config()?;
            let target = match name.or_else(|| config.current_server.clone()) {
                Some(target) => target,
                None => return Err(anyhow::anyhow!("No current server set")),
            };

            let info = config
                .servers
                .get_mut(&target)
                .ok_or_else(|| anyhow::anyhow!("Server '{}' not found", target))?;
            let status = ping_server(&info.url).await;
            info.update_ping(status.clone());
            save_server_config(&config)?;

            output_success(
                &output_format,
                &format!("Server '{}' is {}", target, status.label()),
                Some(json!({ "server": target, "status": status })),
            )
        }
    }
}
