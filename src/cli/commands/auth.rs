use chrono::Utc;
use clap::Subcommand;
use serde_json::json;

use crate::api::{ApiClient, AuthApi};
use crate::cli::config::*;
use crate::cli::utils::*;
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Login to the current server")]
    Login {
        #[arg(help = "Email address")]
        email: String,
        #[arg(long, env = "STAFFDESK_PASSWORD", help = "Password")]
        password: String,
    },

    #[command(about = "Forget the stored token for the current server")]
    Logout,

    #[command(about = "Show current authentication status")]
    Status,

    #[command(about = "Show current user information")]
    Whoami,
}

pub async fn handle(cmd: AuthCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        AuthCommands::Login { email, password } => {
            let (server, url) = current_target()?;
            let client = ApiClient::new(&url)?;
            let response = client.login(&email, &password).await?;

            let mut auth = load_auth_config()?;
            auth.sessions.insert(
                server.clone(),
                AuthSession {
                    email: email.clone(),
                    token: response.access_token,
                    logged_in_at: Utc::now(),
                },
            );
            save_auth_config(&auth)?;

            let name = response.user.map(|u| u.display_name()).unwrap_or_else(|| email.clone());
            output_success(
                &output_format,
                &format!("Logged in to '{}' as {}", server, name),
                Some(json!({ "server": server, "email": email })),
            )
        }
        AuthCommands::Logout => {
            let (server, _) = current_target()?;
            let mut auth = load_auth_config()?;
            if auth.sessions.remove(&server).is_none() {
                return Err(anyhow::anyhow!("Not logged in to '{}'", server));
            }
            save_auth_config(&auth)?;
            output_success(&output_format, &format!("Logged out of '{}'", server), None)
        }
        AuthCommands::Status => {
            let (server, url) = current_target()?;
            let auth = load_auth_config()?;
            let session = auth.sessions.get(&server);
            let expires_at = session.and_then(|s| token_expiry(&s.token));
            let expired = expires_at.map(|exp| exp <= Utc::now()).unwrap_or(false);

            match output_format {
                OutputFormat::Json => print_json(&json!({
                    "server": server,
                    "url": url,
                    "authenticated": session.is_some() && !expired,
                    "email": session.map(|s| s.email.clone()),
                    "logged_in_at": session.map(|s| s.logged_in_at),
                    "expires_at": expires_at,
                })),
                OutputFormat::Text => {
                    println!("Server: {} ({})", server, url);
                    match session {
                        Some(session) => {
                            println!("Logged in as: {}", session.email);
                            println!("Since: {}", session.logged_in_at.format("%Y-%m-%d %H:%M:%S UTC"));
                            match expires_at {
                                Some(exp) if expired => println!("Token expired at {}", exp.format("%Y-%m-%d %H:%M:%S UTC")),
                                Some(exp) => println!("Token expires at {}", exp.format("%Y-%m-%d %H:%M:%S UTC")),
                                None => println!("Token expiry unknown"),
                            }
                        }
                        None => println!("Not logged in"),
                    }
                    Ok(())
                }
            }
        }
        AuthCommands::Whoami => {
            let client = current_client()?;
            let profile = client.profile().await?;

            match output_format {
                OutputFormat::Json => print_json(&profile),
                OutputFormat::Text => {
                    println!("Name: {}", profile.display_name());
                    println!("Email: {}", profile.email_address);
                    if let Some(role) = profile.role.as_ref().and_then(|r| r.name()) {
                        println!("Role: {}", role);
                    }
                    if profile.is_super_admin {
                        println!("Super admin: yes");
                    }
                    Ok(())
                }
            }
        }
    }
}
