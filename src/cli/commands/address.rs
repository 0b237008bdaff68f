use clap::Subcommand;
use serde_json::json;

use crate::allowlist::{AddressInput, AddressKind};
use crate::api::AllowListApi;
use crate::cli::config::{current_client, current_user_id};
use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::types::ListQuery;

/// Shared by `ip` and `mac`; the kind picks the collection
#[derive(Subcommand)]
pub enum AddressCommands {
    #[command(about = "List allowed addresses")]
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long, help = "Only entries created by this user ID")]
        created_by: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        limit: u32,
    },

    #[command(about = "Allow an address")]
    Add {
        #[arg(help = "Label, e.g. the site or device")]
        name: String,
        address: String,
    },

    #[command(about = "Change an entry's label or address")]
    Update {
        #[arg(help = "Entry ID")]
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        address: Option<String>,
    },

    #[command(about = "Remove an entry")]
    Delete {
        #[arg(help = "Entry ID")]
        id: String,
    },

    #[command(about = "Remove several entries at once")]
    DeleteMany {
        #[arg(required = true, help = "Entry IDs")]
        ids: Vec<String>,
    },
}

pub async fn handle(kind: AddressKind, cmd: AddressCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let client = current_client()?;

    match cmd {
        AddressCommands::List { search, created_by, page, limit } => {
            let query = ListQuery::page(page, limit)
                .with_search(search)
                .with_created_by(created_by);
            let entries = client.list_addresses(kind, &query).await?;
            if entries.data.is_empty() {
                return output_empty_collection(
                    &output_format,
                    "addresses",
                    &format!("No {} entries found", kind.label()),
                );
            }

            match output_format {
                OutputFormat::Json => print_json(&json!({
                    "addresses": entries.data,
                    "pagination": entries.pagination,
                })),
                OutputFormat::Text => {
                    println!("{:<26} {:<25} {}", "ID", "NAME", "ADDRESS");
                    print_rule(75);
                    for entry in &entries.data {
                        println!("{:<26} {:<25} {}", entry.id, entry.name, entry.address);
                    }
                    println!(
                        "Page {} of {} ({} entries)",
                        entries.pagination.page, entries.pagination.total_pages, entries.pagination.total
                    );
                    Ok(())
                }
            }
        }
        AddressCommands::Add { name, address } => {
            let input = AddressInput::new(kind, &name, &address)?.with_created_by(current_user_id(&client).await);
            let entry = client.create_address(kind, &input).await?;
            output_success(
                &output_format,
                &format!("{} {} allowed as '{}'", kind.label(), entry.address, entry.name),
                Some(json!({ "address": entry })),
            )
        }
        AddressCommands::Update { id, name, address } => {
            let current = client.get_address(kind, &id).await?;
            let input = AddressInput::new(
                kind,
                name.as_deref().unwrap_or(&current.name),
                address.as_deref().unwrap_or(&current.address),
            )?
            .with_created_by(current.created_by);
            let entry = client.update_address(kind, &id, &input).await?;
            output_success(
                &output_format,
                &format!("{} '{}' updated", kind.label(), entry.name),
                Some(json!({ "address": entry })),
            )
        }
        AddressCommands::Delete { id } => {
            client.delete_address(kind, &id).await?;
            output_success(
                &output_format,
                &format!("{} '{}' removed", kind.label(), id),
                Some(json!({ "id": id })),
            )
        }
        AddressCommands::DeleteMany { ids } => {
            let result = client.delete_addresses(kind, &ids).await?;
            output_success(
                &output_format,
                &format!("Removed {} {} entries", result.deleted_count, kind.label()),
                Some(json!({ "deletedCount": result.deleted_count })),
            )
        }
    }
}
