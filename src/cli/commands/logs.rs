use chrono::NaiveDate;
use clap::Args;
use serde_json::json;

use crate::api::UserLogApi;
use crate::audit::UserLogQuery;
use crate::cli::config::current_client;
use crate::cli::utils::*;
use crate::cli::OutputFormat;

#[derive(Args)]
pub struct LogsArgs {
    #[arg(long, help = "Search by user or description")]
    search: Option<String>,
    #[arg(long, help = "Only entries from this day (YYYY-MM-DD)")]
    date: Option<NaiveDate>,
    #[arg(long, default_value_t = 1)]
    page: u32,
    #[arg(long, default_value_t = 10)]
    limit: u32,
}

pub async fn handle(args: LogsArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let client = current_client()?;
    let query = UserLogQuery {
        page: Some(args.page),
        limit: Some(args.limit),
        search: args.search,
        created_at: args.date,
    };
    let logs = client.user_logs(&query).await?;

    if logs.data.is_empty() {
        return output_empty_collection(&output_format, "logs", "No activity found");
    }

    match output_format {
        OutputFormat::Json => print_json(&json!({
            "logs": logs.data,
            "pagination": logs.pagination,
        })),
        OutputFormat::Text => {
            println!("{:<20} {:<20} {}", "WHEN", "USER", "DESCRIPTION");
            print_rule(80);
            for log in &logs.data {
                println!(
                    "{:<20} {:<20} {}",
                    log.created_at.format("%Y-%m-%d %H:%M"),
                    log.username,
                    log.description
                );
            }
            println!(
                "Page {} of {} ({} entries)",
                logs.pagination.page, logs.pagination.total_pages, logs.pagination.total
            );
            Ok(())
        }
    }
}
