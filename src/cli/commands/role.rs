use clap::Subcommand;
use serde_json::json;

use crate::api::RoleApi;
use crate::cli::config::current_client;
use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::role::RoleInput;
use crate::types::ListQuery;

#[derive(Subcommand)]
pub enum RoleCommands {
    #[command(about = "List roles")]
    List {
        #[arg(long, help = "Search term")]
        search: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        limit: u32,
    },

    #[command(about = "Show a role and its granted menus")]
    Show {
        #[arg(help = "Role ID")]
        id: String,
    },

    #[command(about = "Create a role")]
    Create {
        #[arg(help = "Role name")]
        name: String,
        #[arg(long, help = "Create the role inactive")]
        inactive: bool,
    },

    #[command(about = "Rename or (de)activate a role")]
    Update {
        #[arg(help = "Role ID")]
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, help = "Set active state (true/false)")]
        active: Option<bool>,
    },

    #[command(about = "Delete a role")]
    Delete {
        #[arg(help = "Role ID")]
        id: String,
    },

    #[command(about = "Delete several roles at once")]
    DeleteMany {
        #[arg(required = true, help = "Role IDs")]
        ids: Vec<String>,
    },
}

pub async fn handle(cmd: RoleCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let client = current_client()?;

    match cmd {
        RoleCommands::List { search, page, limit } => {
            let roles = client.list_roles(&ListQuery::page(page, limit).with_search(search)).await?;
            if roles.data.is_empty() {
                return output_empty_collection(&output_format, "roles", "No roles found");
            }

            match output_format {
                OutputFormat::Json => print_json(&json!({
                    "roles": roles.data,
                    "pagination": roles.pagination,
                })),
                OutputFormat::Text => {
                    println!("{:<26} {:<25} {:<10} {}", "ID", "NAME", "STATUS", "PERMISSIONS");
                    print_rule(75);
                    for role in &roles.data {
                        println!("{:<26} {:<25} {:<10} {}", role.id, role.name, status_label(role.is_active), role.permissions.len());
                    }
                    println!(
                        "Page {} of {} ({} roles)",
                        roles.pagination.page, roles.pagination.total_pages, roles.pagination.total
                    );
                    Ok(())
                }
            }
        }
        RoleCommands::Show { id } => {
            let role = client.get_role(&id).await?;
            match output_format {
                OutputFormat::Json => print_json(&role),
                OutputFormat::Text => {
                    println!("Role: {} ({})", role.name, role.id);
                    println!("Status: {}", status_label(role.is_active));
                    if role.permissions.is_empty() {
                        println!("No menus granted");
                    } else {
                        println!("Granted menus:");
                        for permission in &role.permissions {
                            println!("  - {} ({})", permission.menu_name, permission.menu_id);
                        }
                    }
                    Ok(())
                }
            }
        }
        RoleCommands::Create { name, inactive } => {
            if name.trim().is_empty() {
                return Err(anyhow::anyhow!("Role name is required"));
            }
            let role = client
                .create_role(&RoleInput { name: name.trim().to_string(), is_active: !inactive })
                .await?;
            output_success(
                &output_format,
                &format!("Role '{}' created", role.name),
                Some(json!({ "role": role })),
            )
        }
        RoleCommands::Update { id, name, active } => {
            let current = client.get_role(&id).await?;
            let input = RoleInput {
                name: name.unwrap_or(current.name),
                is_active: active.unwrap_or(current.is_active),
            };
            if input.name.trim().is_empty() {
                return Err(anyhow::anyhow!("Role name is required"));
            }
            let role = client.update_role(&id, &input).await?;
            output_success(
                &output_format,
                &format!("Role '{}' updated", role.name),
                Some(json!({ "role": role })),
            )
        }
        RoleCommands::Delete { id } => {
            client.delete_role(&id).await?;
            output_success(&output_format, &format!("Role '{}' deleted", id), Some(json!({ "id": id })))
        }
        RoleCommands::DeleteMany { ids } => {
            let result = client.delete_roles(&ids).await?;
            output_success(
                &output_format,
                &format!("Deleted {} roles", result.deleted_count),
                Some(json!({ "deletedCount": result.deleted_count })),
            )
        }
    }
}
