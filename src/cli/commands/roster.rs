use chrono::NaiveDate;
use clap::{Args, Subcommand};
use serde_json::json;

use crate::api::RosterApi;
use crate::cli::config::{current_client, current_user_id};
use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::roster::{RosterType, StaffRosterInput};
use crate::types::ListQuery;

#[derive(Subcommand)]
pub enum RosterCommands {
    #[command(about = "List staff rosters")]
    List {
        #[arg(long, help = "Search by employee name")]
        search: Option<String>,
        #[arg(long, help = "Only rosters created by this user ID")]
        created_by: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        limit: u32,
    },

    #[command(about = "Show one staff roster and its dates")]
    Show {
        #[arg(help = "Staff roster ID")]
        id: String,
    },

    #[command(about = "Assign an employee to a slot on one or more days")]
    Assign(AssignArgs),

    #[command(about = "Replace a staff roster")]
    Update {
        #[arg(help = "Staff roster ID")]
        id: String,
        #[command(flatten)]
        assign: AssignArgs,
    },

    #[command(about = "Delete a staff roster")]
    Delete {
        #[arg(help = "Staff roster ID")]
        id: String,
    },

    #[command(about = "Delete several staff rosters at once")]
    DeleteMany {
        #[arg(required = true, help = "Staff roster IDs")]
        ids: Vec<String>,
    },
}

#[derive(Args)]
pub struct AssignArgs {
    #[arg(long, help = "Employee ID")]
    user: String,
    #[arg(long, help = "Slot ID")]
    slot: String,
    #[arg(long = "type", default_value = "Roster", help = "Roster, Week Off, Over Time, Sick Leave or Leave")]
    roster_type: RosterType,
    #[arg(long = "date", required = true, help = "Day to schedule (YYYY-MM-DD); repeatable")]
    dates: Vec<NaiveDate>,
}

impl AssignArgs {
    fn input(&self) -> crate::Result<StaffRosterInput> {
        StaffRosterInput::new(&self.user, self.roster_type, &self.slot, &self.dates)
    }
}

pub async fn handle(cmd: RosterCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let client = current_client()?;

    match cmd {
        RosterCommands::List { search, created_by, page, limit } => {
            let query = ListQuery::page(page, limit)
                .with_search(search)
                .with_created_by(created_by);
            let rosters = client.list_staff_rosters(&query).await?;
            if rosters.data.is_empty() {
                return output_empty_collection(&output_format, "rosters", "No staff rosters found");
            }

            match output_format {
                OutputFormat::Json => print_json(&json!({
                    "rosters": rosters.data,
                    "pagination": rosters.pagination,
                })),
                OutputFormat::Text => {
                    println!("{:<26} {:<22} {:<11} {:<20} {}", "ID", "EMPLOYEE", "TYPE", "SLOT", "DAYS");
                    print_rule(90);
                    for roster in &rosters.data {
                        let slot = format!("{} - {}", roster.start_time, roster.end_time);
                        println!(
                            "{:<26} {:<22} {:<11} {:<20} {}",
                            roster.id,
                            roster.user_name,
                            roster.roster_type,
                            slot,
                            roster.roster_dates.len()
                        );
                    }
                    println!(
                        "Page {} of {} ({} rosters)",
                        rosters.pagination.page, rosters.pagination.total_pages, rosters.pagination.total
                    );
                    Ok(())
                }
            }
        }
        RosterCommands::Show { id } => {
            let roster = client.get_staff_roster(&id).await?;
            match output_format {
                OutputFormat::Json => print_json(&roster),
                OutputFormat::Text => {
                    println!("Roster: {} ({})", roster.user_name, roster.id);
                    println!("Type: {}", roster.roster_type);
                    println!("Slot: {} - {}", roster.start_time, roster.end_time);
                    println!("Days:");
                    for day in roster.dates() {
                        println!("  - {}", day.format("%a %Y-%m-%d"));
                    }
                    Ok(())
                }
            }
        }
        RosterCommands::Assign(args) => {
            let input = args.input()?.with_created_by(current_user_id(&client).await);
            let roster = client.create_staff_roster(&input).await?;
            output_success(
                &output_format,
                &format!("Scheduled {} day(s) for '{}'", input.roster_dates.len(), args.user),
                Some(json!({ "roster": roster })),
            )
        }
        RosterCommands::Update { id, assign } => {
            let input = assign.input()?.with_created_by(current_user_id(&client).await);
            let roster = client.update_staff_roster(&id, &input).await?;
            output_success(
                &output_format,
                &format!("Staff roster '{}' updated", id),
                Some(json!({ "roster": roster })),
            )
        }
        RosterCommands::Delete { id } => {
            client.delete_staff_roster(&id).await?;
            output_success(&output_format, &format!("Staff roster '{}' deleted", id), Some(json!({ "id": id })))
        }
        RosterCommands::DeleteMany { ids } => {
            let result = client.delete_staff_rosters(&ids).await?;
            output_success(
                &output_format,
                &format!("Deleted {} staff rosters", result.deleted_count),
                Some(json!({ "deletedCount": result.deleted_count })),
            )
        }
    }
}
