use clap::{Args, Subcommand};
use serde_json::json;

use crate::api::EmployeeApi;
use crate::cli::config::current_client;
use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::employee::{EmployeeInput, EmployeeQuery, WorkStatus};

#[derive(Subcommand)]
pub enum EmployeeCommands {
    #[command(about = "List employees")]
    List {
        #[arg(long, help = "Search by name or email")]
        search: Option<String>,
        #[arg(long, help = "Working, Resigned or Terminated")]
        status: Option<WorkStatus>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        limit: u32,
    },

    #[command(about = "Show one employee")]
    Show {
        #[arg(help = "Employee ID")]
        id: String,
    },

    #[command(about = "Create an employee")]
    Create(EmployeeFields),

    #[command(about = "Update an employee; only the given fields change")]
    Update {
        #[arg(help = "Employee ID")]
        id: String,
        #[command(flatten)]
        fields: EmployeeFields,
    },

    #[command(about = "Delete an employee (soft unless --permanent)")]
    Delete {
        #[arg(help = "Employee ID")]
        id: String,
        #[arg(long, help = "Remove the record for good")]
        permanent: bool,
    },

    #[command(about = "Headcount by work status")]
    Stats,
}

#[derive(Args)]
pub struct EmployeeFields {
    #[arg(long)]
    first_name: Option<String>,
    #[arg(long)]
    last_name: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long, env = "STAFFDESK_EMPLOYEE_PASSWORD", hide_env_values = true)]
    password: Option<String>,
    #[arg(long, help = "Role ID")]
    role: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    country: Option<String>,
    #[arg(long, help = "Joining date (YYYY-MM-DD)")]
    joining_date: Option<String>,
    #[arg(long, help = "Working, Resigned or Terminated")]
    status: Option<WorkStatus>,
    #[arg(long, help = "Resigned date (YYYY-MM-DD); ignored while Working")]
    resigned_date: Option<String>,
    #[arg(long)]
    salary: Option<String>,
    #[arg(long)]
    category: Option<String>,
    #[arg(long, help = "Set active state (true/false)")]
    active: Option<bool>,
}

impl From<EmployeeFields> for EmployeeInput {
    fn from(fields: EmployeeFields) -> Self {
        EmployeeInput {
            first_name: fields.first_name,
            last_name: fields.last_name,
            email_address: fields.email,
            password: fields.password,
            role: fields.role,
            user_phone: fields.phone,
            country: fields.country,
            joining_date: fields.joining_date,
            work_status: fields.status,
            resigned_date: fields.resigned_date,
            monthly_salary: fields.salary,
            category: fields.category,
            is_active: fields.active,
            ..Default::default()
        }
    }
}

pub async fn handle(cmd: EmployeeCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let client = current_client()?;

    match cmd {
        EmployeeCommands::List { search, status, category, page, limit } => {
            let query = EmployeeQuery {
                page: Some(page),
                limit: Some(limit),
                search,
                work_status: status,
                category,
            };
            let employees = client.list_employees(&query).await?;
            if employees.data.is_empty() {
                return output_empty_collection(&output_format, "employees", "No employees found");
            }

            match output_format {
                OutputFormat::Json => print_json(&json!({
                    "employees": employees.data,
                    "pagination": employees.pagination,
                })),
                OutputFormat::Text => {
                    println!("{:<26} {:<25} {:<30} {:<11} {}", "ID", "NAME", "EMAIL", "STATUS", "CATEGORY");
                    print_rule(100);
                    for e in &employees.data {
                        println!(
                            "{:<26} {:<25} {:<30} {:<11} {}",
                            e.id,
                            e.display_name(),
                            e.email_address,
                            e.work_status,
                            e.category
                        );
                    }
                    println!(
                        "Page {} of {} ({} employees)",
                        employees.pagination.page, employees.pagination.total_pages, employees.pagination.total
                    );
                    Ok(())
                }
            }
        }
        EmployeeCommands::Show { id } => {
            let employee = client.get_employee(&id).await?;
            match output_format {
                OutputFormat::Json => print_json(&employee),
                OutputFormat::Text => {
                    println!("Employee: {} ({})", employee.display_name(), employee.id);
                    println!("Email: {}", employee.email_address);
                    println!("Status: {}", employee.work_status);
                    if let Some(ref date) = employee.resigned_date {
                        if employee.work_status != WorkStatus::Working {
                            println!("Resigned: {}", date);
                        }
                    }
                    if let Some(role) = employee.role.as_ref().and_then(|r| r.name()) {
                        println!("Role: {}", role);
                    }
                    if !employee.category.is_empty() {
                        println!("Category: {}", employee.category);
                    }
                    if employee.is_super_admin {
                        println!("Super admin");
                    }
                    Ok(())
                }
            }
        }
        EmployeeCommands::Create(fields) => {
            let input = EmployeeInput::from(fields).prepare(None)?;
            let employee = client.create_employee(&input).await?;
            output_success(
                &output_format,
                &format!("Employee '{}' created", employee.display_name()),
                Some(json!({ "employee": employee })),
            )
        }
        EmployeeCommands::Update { id, fields } => {
            let current = client.get_employee(&id).await?;
            let input = EmployeeInput::from(fields).prepare(Some(&current))?;
            let employee = client.update_employee(&id, &input).await?;
            output_success(
                &output_format,
                &format!("Employee '{}' updated", employee.display_name()),
                Some(json!({ "employee": employee })),
            )
        }
        EmployeeCommands::Delete { id, permanent } => {
            if permanent {
                client.purge_employee(&id).await?;
            } else {
                client.delete_employee(&id).await?;
            }
            let verb = if permanent { "permanently deleted" } else { "deleted" };
            output_success(
                &output_format,
                &format!("Employee '{}' {}", id, verb),
                Some(json!({ "id": id, "permanent": permanent })),
            )
        }
        EmployeeCommands::Stats => {
            let stats = client.employee_statistics().await?;
            match output_format {
                OutputFormat::Json => print_json(&stats),
                OutputFormat::Text => {
                    println!("Total:        {}", stats.total);
                    println!("Working:      {}", stats.working);
                    println!("Resigned:     {}", stats.resigned);
                    println!("Super admins: {}", stats.super_admins);
                    Ok(())
                }
            }
        }
    }
}
