mod common;

use anyhow::Result;
use serde_json::json;
use staffdesk::api::RoleApi;
use staffdesk::permission::{PermissionEditor, PermissionSet};
use staffdesk::store::MenuTreeStore;

async fn backend_with_role(granted: &[&str]) -> Result<common::FakeBackend> {
    let mut state = common::BackendState {
        menus: common::sample_menus(),
        ..Default::default()
    };
    state.roles.insert("r1".to_string(), common::sample_role("r1", granted));
    common::spawn(state).await
}

#[tokio::test]
async fn editor_starts_from_role_grants() -> Result<()> {
    let backend = backend_with_role(&["dash", "staff"]).await?;
    let client = backend.client()?;

    let role = client.get_role("r1").await?;
    let mut store = MenuTreeStore::new();
    store.refresh(&client).await?;
    let editor = PermissionEditor::for_role(&role, store.into_snapshot());

    assert!(editor.is_selected("dash"));
    assert!(editor.is_selected("staff"));
    assert!(!editor.is_selected("hr"));
    Ok(())
}

#[tokio::test]
async fn cascade_toggle_then_save_sends_full_replacement() -> Result<()> {
    let backend = backend_with_role(&["dash"]).await?;
    let client = backend.client()?;

    let role = client.get_role("r1").await?;
    let mut store = MenuTreeStore::new();
    store.refresh(&client).await?;
    let mut editor = PermissionEditor::for_role(&role, store.into_snapshot());

    assert!(editor.toggle("hr"));
    assert!(editor.toggle("dash"));
    editor.save(&client).await?;

    let assignments = backend.state().assignments.clone();
    assert_eq!(
        assignments,
        vec![json!({ "roleId": "r1", "permissions": ["hr", "roster", "staff"] })]
    );
    Ok(())
}

#[tokio::test]
async fn empty_selection_clears_all_grants() -> Result<()> {
    let backend = backend_with_role(&["dash"]).await?;
    let client = backend.client()?;

    let editor = PermissionEditor::new("r1", Vec::new(), PermissionSet::new());
    editor.save(&client).await?;

    assert_eq!(
        backend.state().assignments.clone(),
        vec![json!({ "roleId": "r1", "permissions": [] })]
    );
    Ok(())
}

#[tokio::test]
async fn failed_save_keeps_local_selection() -> Result<()> {
    let backend = backend_with_role(&[]).await?;
    backend.state().fail_assign = true;
    let client = backend.client()?;

    let mut store = MenuTreeStore::new();
    store.refresh(&client).await?;
    let mut editor = PermissionEditor::new("r1", store.into_snapshot(), PermissionSet::new());
    editor.toggle("hr");

    let err = editor.save(&client).await.unwrap_err();
    assert_eq!(err.status_code(), 500);
    assert_eq!(editor.selected().to_sorted_vec(), vec!["hr", "roster", "staff"]);
    assert!(backend.state().assignments.is_empty());
    Ok(())
}

#[tokio::test]
async fn unknown_role_is_not_found() -> Result<()> {
    let backend = backend_with_role(&[]).await?;
    let client = backend.client()?;

    let err = client.get_role("missing").await.unwrap_err();
    assert_eq!(err.status_code(), 404);
    assert!(err.to_string().contains("Role not found"));
    Ok(())
}
