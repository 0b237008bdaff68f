use clap::Subcommand;
use serde_json::json;

use crate::api::RosterApi;
use crate::cli::config::{current_client, current_user_id};
use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::roster::SlotInput;
use crate::types::ListQuery;

#[derive(Subcommand)]
pub enum SlotCommands {
    #[command(about = "List shift slots")]
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long, help = "Only slots created by this user ID")]
        created_by: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        limit: u32,
    },

    #[command(about = "Create a slot from a start and end time (e.g. \"9:00 AM\" \"5:30 PM\")")]
    Create {
        start: String,
        end: String,
    },

    #[command(about = "Change a slot's times")]
    Update {
        #[arg(help = "Slot ID")]
        id: String,
        start: String,
        end: String,
    },

    #[command(about = "Delete a slot")]
    Delete {
        #[arg(help = "Slot ID")]
        id: String,
    },

    #[command(about = "Delete several slots at once")]
    DeleteMany {
        #[arg(required = true, help = "Slot IDs")]
        ids: Vec<String>,
    },
}

pub async fn handle(cmd: SlotCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let client = current_client()?;

    match cmd {
        SlotCommands::List { search, created_by, page, limit } => {
            let query = ListQuery::page(page, limit)
                .with_search(search)
                .with_created_by(created_by);
            let slots = client.list_slots(&query).await?;
            if slots.data.is_empty() {
                return output_empty_collection(&output_format, "slots", "No slots found");
            }

            match output_format {
                OutputFormat::Json => print_json(&json!({
                    "slots": slots.data,
                    "pagination": slots.pagination,
                })),
                OutputFormat::Text => {
                    println!("{:<26} {:<10} {:<10} {}", "ID", "START", "END", "HOURS");
                    print_rule(56);
                    for slot in &slots.data {
                        println!("{:<26} {:<10} {:<10} {}", slot.id, slot.start_time, slot.end_time, slot.total_hrs);
                    }
                    println!(
                        "Page {} of {} ({} slots)",
                        slots.pagination.page, slots.pagination.total_pages, slots.pagination.total
                    );
                    Ok(())
                }
            }
        }
        SlotCommands::Create { start, end } => {
            let input = SlotInput::new(&start, &end)?;
            let input = input.with_created_by(current_user_id(&client).await);
            let slot = client.create_slot(&input).await?;
            output_success(
                &output_format,
                &format!("Slot {} created ({} hrs)", slot.label(), slot.total_hrs),
                Some(json!({ "slot": slot })),
            )
        }
        SlotCommands::Update { id, start, end } => {
            let current = client.get_slot(&id).await?;
            let input = SlotInput::new(&start, &end)?.with_created_by(current.created_by);
            let slot = client.update_slot(&id, &input).await?;
            output_success(
                &output_format,
                &format!("Slot {} updated ({} hrs)", slot.label(), slot.total_hrs),
                Some(json!({ "slot": slot })),
            )
        }
        SlotCommands::Delete { id } => {
            client.delete_slot(&id).await?;
            output_success(&output_format, &format!("Slot '{}' deleted", id), Some(json!({ "id": id })))
        }
        SlotCommands::DeleteMany { ids } => {
            let result = client.delete_slots(&ids).await?;
            output_success(
                &output_format,
                &format!("Deleted {} slots", result.deleted_count),
                Some(json!({ "deletedCount": result.deleted_count })),
            )
        }
    }
}
