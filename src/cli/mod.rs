pub mod commands;
pub mod config;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::allowlist::AddressKind;

#[derive(Parser)]
#[command(name = "staffdesk")]
#[command(about = "Staffdesk CLI - menus, roles, staff and rosters for the staffing admin API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Remote API server management")]
    Server {
        #[command(subcommand)]
        cmd: commands::server::ServerCommands,
    },

    #[command(about = "Authentication and token management")]
    Auth {
        #[command(subcommand)]
        cmd: commands::auth::AuthCommands,
    },

    #[command(about = "Menu hierarchy administration")]
    Menu {
        #[command(subcommand)]
        cmd: commands::menu::MenuCommands,
    },

    #[command(about = "Role management")]
    Role {
        #[command(subcommand)]
        cmd: commands::role::RoleCommands,
    },

    #[command(about = "Role permission matrix")]
    Permission {
        #[command(subcommand)]
        cmd: commands::permission::PermissionCommands,
    },

    #[command(about = "Render the navigation sidebar for the signed-in user")]
    Sidebar(commands::sidebar::SidebarArgs),

    #[command(about = "Browse user activity logs")]
    Logs(commands::logs::LogsArgs),

    #[command(about = "Employee records")]
    Employee {
        #[command(subcommand)]
        cmd: commands::employee::EmployeeCommands,
    },

    #[command(about = "Shift slots used by staff rosters")]
    Slot {
        #[command(subcommand)]
        cmd: commands::slot::SlotCommands,
    },

    #[command(about = "Staff roster scheduling")]
    Roster {
        #[command(subcommand)]
        cmd: commands::roster::RosterCommands,
    },

    #[command(about = "IP address allow-list")]
    Ip {
        #[command(subcommand)]
        cmd: commands::address::AddressCommands,
    },

    #[command(about = "MAC address allow-list")]
    Mac {
        #[command(subcommand)]
        cmd: commands::address::AddressCommands,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Server { cmd } => commands::server::handle(cmd, output_format).await,
        Commands::Auth { cmd } => commands::auth::handle(cmd, output_format).await,
        Commands::Menu { cmd } => commands::menu::handle(cmd, output_format).await,
        Commands::Role { cmd } => commands::role::handle(cmd, output_format).await,
        Commands::Permission { cmd } => commands::permission::handle(cmd, output_format).await,
        Commands::Sidebar(args) => commands::sidebar::handle(args, output_format).await,
        Commands::Logs(args) => commands::logs::handle(args, output_format).await,
        Commands::Employee { cmd } => commands::employee::handle(cmd, output_format).await,
        Commands::Slot { cmd } => commands::slot::handle(cmd, output_format).await,
        Commands::Roster { cmd } => commands::roster::handle(cmd, output_format).await,
        Commands::Ip { cmd } => commands::address::handle(AddressKind::Ip, cmd, output_format).await,
        Commands::Mac { cmd } => commands::address::handle(AddressKind::Mac, cmd, output_format).await,
    }
}
