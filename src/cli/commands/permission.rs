use clap::Subcommand;
use serde_json::json;

use crate::api::RoleApi;
use crate::cli::config::current_client;
use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::menu::{sort_forest, MenuNode};
use crate::permission::{PermissionEditor, PermissionSet};
use crate::store::MenuTreeStore;

#[derive(Subcommand)]
pub enum PermissionCommands {
    #[command(about = "Show the permission matrix for a role")]
    Show {
        #[arg(help = "Role ID")]
        role: String,
    },

    #[command(about = "Toggle menus (with their submenus) for a role")]
    Toggle {
        #[arg(help = "Role ID")]
        role: String,
        #[arg(required = true, help = "Menu IDs to toggle, applied in order")]
        menus: Vec<String>,
        #[arg(long, help = "Save the resulting selection")]
        save: bool,
    },

    #[command(about = "Replace a role's permissions with exactly these menu IDs")]
    Assign {
        #[arg(help = "Role ID")]
        role: String,
        #[arg(help = "Menu IDs to grant (none clears all grants)")]
        menus: Vec<String>,
    },

    #[command(about = "Show the menus the server grants the signed-in user")]
    Mine,
}

fn print_matrix(editor: &PermissionEditor) {
    for row in editor.visible_rows() {
        println!(
            "{}[{}] {} ({})",
            "    ".repeat(row.depth),
            if row.selected { "x" } else { " " },
            row.name,
            row.id
        );
    }
}

fn print_outline(nodes: &[MenuNode], depth: usize) {
    for node in nodes {
        match node.path.as_str() {
            "" => println!("{}- {}", "    ".repeat(depth), node.name),
            path => println!("{}- {} ({})", "    ".repeat(depth), node.name, path),
        }
        print_outline(&node.sub_items, depth + 1);
    }
}

fn matrix_json(editor: &PermissionEditor) -> serde_json::Value {
    let rows: Vec<_> = editor
        .visible_rows()
        .into_iter()
        .map(|row| json!({ "id": row.id, "name": row.name, "depth": row.depth, "selected": row.selected }))
        .collect();
    json!({
        "roleId": editor.role_id(),
        "permissions": editor.selected().to_sorted_vec(),
        "menus": rows,
    })
}

pub async fn handle(cmd: PermissionCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let client = current_client()?;

    match cmd {
        PermissionCommands::Show { role } => {
            let role = client.get_role(&role).await?;
            let mut store = MenuTreeStore::new();
            store.refresh(&client).await?;

            let mut editor = PermissionEditor::for_role(&role, store.into_snapshot());
            editor.expand_all();

            match output_format {
                OutputFormat::Json => print_json(&matrix_json(&editor)),
                OutputFormat::Text => {
                    println!("Role: {}", role.name);
                    print_matrix(&editor);
                    Ok(())
                }
            }
        }
        PermissionCommands::Toggle { role, menus, save } => {
            let role = client.get_role(&role).await?;
            let mut store = MenuTreeStore::new();
            store.refresh(&client).await?;

            let mut editor = PermissionEditor::for_role(&role, store.into_snapshot());
            for menu in &menus {
                if !editor.toggle(menu) {
                    return Err(anyhow::anyhow!("Menu '{}' not found in hierarchy", menu));
                }
            }
            editor.expand_all();

            if save {
                editor.save(&client).await?;
            }

            match output_format {
                OutputFormat::Json => {
                    let mut body = matrix_json(&editor);
                    body["saved"] = json!(save);
                    print_json(&body)
                }
                OutputFormat::Text => {
                    println!("Role: {}", role.name);
                    print_matrix(&editor);
                    if save {
                        println!("✓ Saved {} permissions", editor.selected().len());
                    } else {
                        println!("(preview only; pass --save to apply)");
                    }
                    Ok(())
                }
            }
        }
        PermissionCommands::Assign { role, menus } => {
            let selected: PermissionSet = menus.into_iter().collect();
            let editor = PermissionEditor::new(role.clone(), Vec::new(), selected);
            editor.save(&client).await?;

            output_success(
                &output_format,
                &format!("Assigned {} permissions to role '{}'", editor.selected().len(), role),
                Some(json!({ "roleId": role, "permissions": editor.selected().to_sorted_vec() })),
            )
        }
        PermissionCommands::Mine => {
            let mut menus = client.my_menus().await?;
            sort_forest(&mut menus);

            match output_format {
                OutputFormat::Json => print_json(&json!({ "menus": menus })),
                OutputFormat::Text => {
                    if menus.is_empty() {
                        println!("No menu items available");
                    }
                    print_outline(&menus, 0);
                    Ok(())
                }
            }
        }
    }
}
