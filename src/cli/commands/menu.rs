use clap::{Args, Subcommand};
use serde_json::json;
use std::path::PathBuf;

use crate::api::MenuApi;
use crate::cli::config::current_client;
use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::menu::{find, MenuForm, MenuKind, MenuNode, SubmenuField};
use crate::store::MenuTreeStore;
use crate::types::ListQuery;

#[derive(Subcommand)]
pub enum MenuCommands {
    #[command(about = "Show the menu hierarchy")]
    Tree {
        #[arg(long, help = "Search term")]
        search: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, help = "Page size (defaults to the configured hierarchy limit)")]
        limit: Option<u32>,
    },

    #[command(about = "Create a menu, optionally with submenus")]
    Create(MenuFields),

    #[command(about = "Update a menu and its submenus")]
    Update {
        #[arg(help = "Menu ID")]
        id: String,
        #[command(flatten)]
        fields: MenuFields,
    },

    #[command(about = "Delete a menu")]
    Delete {
        #[arg(help = "Menu ID")]
        id: String,
    },

    #[command(about = "Delete several menus at once")]
    DeleteMany {
        #[arg(required = true, help = "Menu IDs")]
        ids: Vec<String>,
    },
}

#[derive(Args, Default)]
pub struct MenuFields {
    #[arg(long, help = "YAML or JSON file holding the menu and its subItems")]
    file: Option<PathBuf>,
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    icon: Option<String>,
    #[arg(long, help = "Route; ignored for group titles and menus with submenus")]
    path: Option<String>,
    #[arg(long)]
    order: Option<i64>,
    #[arg(long)]
    group_title: bool,
    #[arg(long, help = "Parent menu ID")]
    parent: Option<String>,
    #[arg(long = "submenu", value_name = "NAME=PATH", help = "Submenu row; repeat for several")]
    submenus: Vec<String>,
    #[arg(long, help = "Drop all submenus")]
    no_submenus: bool,
}

impl MenuFields {
    fn apply(self, form: &mut MenuForm) -> anyhow::Result<()> {
        if let Some(name) = self.name {
            form.set_name(name);
        }
        if let Some(icon) = self.icon {
            form.set_icon(icon);
        }
        if let Some(order) = self.order {
            form.set_order(order);
        }
        if let Some(parent) = self.parent {
            form.set_parent_id(parent);
        }
        if self.group_title {
            form.set_group_title(true);
        }
        if self.no_submenus {
            form.set_has_submenus(false);
        }
        if !self.submenus.is_empty() {
            if !form.set_has_submenus(true) {
                return Err(anyhow::anyhow!("Group titles cannot have submenus"));
            }
            // Replace the seeded or loaded rows with the ones given here
            let existing: Vec<_> = form.submenus().iter().map(|row| row.temp_id.clone()).collect();
            for temp_id in &existing {
                form.remove_submenu(temp_id);
            }
            for entry in &self.submenus {
                let (name, path) = parse_submenu(entry)?;
                let temp_id = form.add_submenu();
                form.update_submenu(&temp_id, SubmenuField::Name(name));
                form.update_submenu(&temp_id, SubmenuField::Path(path));
            }
        }
        if let Some(path) = self.path {
            if !form.set_path(path) {
                tracing::warn!("Path ignored: menu is a group title or has submenus");
            }
        }
        Ok(())
    }
}

fn parse_submenu(entry: &str) -> anyhow::Result<(String, String)> {
    match entry.split_once('=') {
        Some((name, path)) => Ok((name.trim().to_string(), path.trim().to_string())),
        None => Err(anyhow::anyhow!("Invalid submenu '{}', expected NAME=PATH", entry)),
    }
}

fn kind_label(node: &MenuNode) -> &'static str {
    match node.kind() {
        MenuKind::GroupTitle => "group",
        MenuKind::Branch => "menu",
        MenuKind::Route => "link",
        MenuKind::Unrouted => "unrouted",
        MenuKind::Invalid { .. } => "invalid",
    }
}

fn print_tree(nodes: &[MenuNode], depth: usize) {
    for node in nodes {
        println!(
            "{}{:<w$} {:<8} {:<6} {:<28} {}",
            "  ".repeat(depth),
            node.name,
            kind_label(node),
            node.order,
            node.path,
            node.id().unwrap_or("-"),
            w = 30usize.saturating_sub(depth * 2),
        );
        print_tree(&node.sub_items, depth + 1);
    }
}

pub async fn handle(cmd: MenuCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let client = current_client()?;

    match cmd {
        MenuCommands::Tree { search, page, limit } => {
            let limit = limit.unwrap_or(crate::config::config().menu.hierarchy_limit);
            let mut store = MenuTreeStore::new();
            store.refresh_with(&client, &ListQuery::page(page, limit).with_search(search)).await?;

            if store.snapshot().is_empty() {
                return output_empty_collection(&output_format, "menus", "No menus found");
            }

            match output_format {
                OutputFormat::Json => print_json(&json!({
                    "menus": store.snapshot(),
                    "pagination": store.pagination(),
                })),
                OutputFormat::Text => {
                    println!("{:<30} {:<8} {:<6} {:<28} {}", "NAME", "KIND", "ORDER", "PATH", "ID");
                    print_rule(90);
                    print_tree(store.snapshot(), 0);
                    println!("Total: {} menus", store.pagination().total);
                    Ok(())
                }
            }
        }
        MenuCommands::Create(fields) => {
            let mut form = match fields.file {
                Some(ref path) => {
                    let node: MenuNode = read_structured(path)?;
                    MenuForm::edit(&MenuNode { id: None, ..node })
                }
                None => MenuForm::new(),
            };
            fields.apply(&mut form)?;

            let created = form.save(&client).await?;
            output_success(
                &output_format,
                &format!("Menu '{}' created", created.name),
                Some(json!({ "menu": created })),
            )
        }
        MenuCommands::Update { id, fields } => {
            let node = match fields.file {
                Some(ref path) => {
                    let node: MenuNode = read_structured(path)?;
                    MenuNode { id: Some(id.clone()), ..node }
                }
                None => {
                    let mut store = MenuTreeStore::new();
                    let forest = store.refresh(&client).await?;
                    find(forest, &id)
                        .cloned()
                        .ok_or_else(|| anyhow::anyhow!("Menu '{}' not found", id))?
                }
            };

            let mut form = MenuForm::edit(&node);
            fields.apply(&mut form)?;

            let updated = form.save(&client).await?;
            output_success(
                &output_format,
                &format!("Menu '{}' updated", updated.name),
                Some(json!({ "menu": updated })),
            )
        }
        MenuCommands::Delete { id } => {
            client.delete_menu(&id).await?;
            output_success(&output_format, &format!("Menu '{}' deleted", id), Some(json!({ "id": id })))
        }
        MenuCommands::DeleteMany { ids } => {
            let result = client.delete_menus(&ids).await?;
            output_success(
                &output_format,
                &format!("Deleted {} menus", result.deleted_count),
                Some(json!({ "deletedCount": result.deleted_count })),
            )
        }
    }
}
