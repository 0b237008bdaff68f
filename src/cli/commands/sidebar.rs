use clap::Args;
use serde_json::json;

use crate::api::AuthApi;
use crate::cli::config::current_client;
use crate::cli::utils::print_json;
use crate::cli::OutputFormat;
use crate::menu::{filter_forest, is_route_permitted};
use crate::permission::PermissionSet;
use crate::sidebar::Sidebar;
use crate::store::MenuTreeStore;

#[derive(Args)]
pub struct SidebarArgs {
    #[arg(long, help = "Current route; opens the submenu containing it")]
    route: Option<String>,
    #[arg(long, help = "Submenu ID to open")]
    open: Option<String>,
}

pub async fn handle(args: SidebarArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let client = current_client()?;
    let profile = client.profile().await?;
    let permitted = PermissionSet::from_profile(&profile);

    let mut store = MenuTreeStore::new();
    store.refresh(&client).await?;
    let filtered = filter_forest(store.snapshot(), &permitted);

    let mut sidebar = Sidebar::new(&filtered);
    if let Some(ref id) = args.open {
        sidebar.toggle_submenu(id);
    }
    if let Some(ref route) = args.route {
        sidebar.sync_route(route);
    }
    let route_permitted = args.route.as_deref().map(|route| is_route_permitted(&filtered, route));

    match output_format {
        OutputFormat::Json => print_json(&json!({
            "user": profile.display_name(),
            "items": sidebar.items(),
            "openSubmenu": sidebar.open_submenu(),
            "route": args.route,
            "routePermitted": route_permitted,
        })),
        OutputFormat::Text => {
            println!("MENU ({})", profile.display_name());
            print!("{}", sidebar.render_text());
            if let (Some(route), Some(false)) = (args.route.as_deref(), route_permitted) {
                println!("Route {} is not permitted for this user", route);
            }
            Ok(())
        }
    }
}
