#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, patch, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use staffdesk::api::ApiClient;

pub const TOKEN: &str = "test-token";

/// What the fake backend serves and what it has been sent
#[derive(Default)]
pub struct BackendState {
    pub menus: Vec<Value>,
    pub roles: HashMap<String, Value>,
    pub profile: Value,
    pub logs: Vec<Value>,
    pub fail_hierarchy: bool,
    pub fail_assign: bool,
    pub menu_writes: Vec<(String, Value)>,
    pub assignments: Vec<Value>,
    pub deleted: Vec<String>,
    pub last_query: HashMap<String, String>,
    /// Plain collections keyed by resource path (`employee`, `roster`, ...)
    pub records: HashMap<String, Vec<Value>>,
    pub record_writes: Vec<(String, Value)>,
}

type Shared = Arc<Mutex<BackendState>>;

pub struct FakeBackend {
    pub base_url: String,
    pub state: Shared,
}

impl FakeBackend {
    pub fn client(&self) -> Result<ApiClient> {
        Ok(ApiClient::with_timeout(&self.base_url, Duration::from_secs(5))?.with_token(Some(TOKEN.to_string())))
    }

    pub fn anonymous_client(&self) -> Result<ApiClient> {
        Ok(ApiClient::with_timeout(&self.base_url, Duration::from_secs(5))?)
    }

    pub fn state(&self) -> std::sync::MutexGuard<'_, BackendState> {
        self.state.lock().unwrap()
    }
}

/// Start the fake backend on a free port inside the current test runtime
pub async fn spawn(state: BackendState) -> Result<FakeBackend> {
    // RUST_LOG=staffdesk=debug shows client traffic in test output
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();

    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .context("failed to bind fake backend")?;

    let shared: Shared = Arc::new(Mutex::new(state));
    let app = router(shared.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok(FakeBackend {
        base_url: format!("http://127.0.0.1:{}/api", port),
        state: shared,
    })
}

/// Collections served with the generic list/get/create/update/delete handlers
pub const RECORD_RESOURCES: [&str; 5] = ["employee", "roster", "staff-roster", "ip-address", "mac-address"];

fn router(state: Shared) -> Router {
    let mut router = Router::new()
        .route("/api/employee/statistics", get(employee_statistics))
        .route("/api/employee/:id/permanent", delete(purge_employee));
    for resource in RECORD_RESOURCES {
        router = router
            .route(&format!("/api/{}", resource), get(list_records).post(create_record))
            .route(&format!("/api/{}/delete-many", resource), post(delete_many_records))
            .route(
                &format!("/api/{}/:id", resource),
                get(get_record).patch(update_record).delete(delete_record),
            );
    }

    router
        .route("/api/menu/hierarchy", get(hierarchy))
        .route("/api/menu", post(create_menu))
        .route("/api/menu/delete-many", post(delete_many_menus))
        .route("/api/menu/:id", patch(update_menu).delete(delete_menu))
        .route("/api/role/:id", get(get_role))
        .route("/api/role-permission/assign", post(assign))
        .route("/api/role-permission/my-menus", get(my_menus))
        .route("/api/auth/profile", get(profile))
        .route("/api/user-logs", get(user_logs))
        .with_state(state)
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "statusCode": status.as_u16(), "message": message }))).into_response()
}

fn page(data: Vec<Value>, page: u32, limit: u32) -> Value {
    let total = data.len() as u32;
    json!({
        "data": data,
        "pagination": {
            "total": total,
            "page": page,
            "limit": limit,
            "totalPages": if limit == 0 { 0 } else { total.div_ceil(limit) },
        }
    })
}

fn number(query: &HashMap<String, String>, key: &str, default: u32) -> u32 {
    query.get(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

async fn hierarchy(State(state): State<Shared>, Query(query): Query<HashMap<String, String>>) -> Response {
    let mut state = state.lock().unwrap();
    state.last_query = query.clone();
    if state.fail_hierarchy {
        return error(StatusCode::INTERNAL_SERVER_ERROR, "Database unavailable");
    }
    Json(page(state.menus.clone(), number(&query, "page", 1), number(&query, "limit", 10))).into_response()
}

async fn create_menu(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut state = state.lock().unwrap();
    state.menu_writes.push(("POST".to_string(), body.clone()));
    let mut parent = body["parent"].clone();
    parent["_id"] = json!("new-menu");
    parent["subItems"] = body["submenus"].clone();
    Json(parent).into_response()
}

async fn update_menu(State(state): State<Shared>, Path(id): Path<String>, Json(body): Json<Value>) -> Response {
    let mut state = state.lock().unwrap();
    state.menu_writes.push((format!("PATCH {}", id), body.clone()));
    let mut parent = body["parent"].clone();
    parent["_id"] = json!(id);
    parent["subItems"] = body["submenus"].clone();
    Json(parent).into_response()
}

async fn delete_menu(State(state): State<Shared>, Path(id): Path<String>) -> Response {
    state.lock().unwrap().deleted.push(id);
    StatusCode::NO_CONTENT.into_response()
}

async fn delete_many_menus(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let ids: Vec<String> = serde_json::from_value(body["ids"].clone()).unwrap_or_default();
    let count = ids.len();
    state.lock().unwrap().deleted.extend(ids);
    Json(json!({ "deletedCount": count })).into_response()
}

async fn get_role(State(state): State<Shared>, Path(id): Path<String>) -> Response {
    match state.lock().unwrap().roles.get(&id) {
        Some(role) => Json(role.clone()).into_response(),
        None => error(StatusCode::NOT_FOUND, "Role not found"),
    }
}

async fn assign(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut state = state.lock().unwrap();
    if state.fail_assign {
        return error(StatusCode::INTERNAL_SERVER_ERROR, "Could not save permissions");
    }
    state.assignments.push(body);
    Json(json!({ "message": "Permissions assigned" })).into_response()
}

async fn my_menus(State(state): State<Shared>, headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return error(StatusCode::UNAUTHORIZED, "Unauthorized");
    }
    Json(Value::Array(state.lock().unwrap().menus.clone())).into_response()
}

async fn profile(State(state): State<Shared>, headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return error(StatusCode::UNAUTHORIZED, "Unauthorized");
    }
    Json(state.lock().unwrap().profile.clone()).into_response()
}

async fn user_logs(State(state): State<Shared>, Query(query): Query<HashMap<String, String>>) -> Response {
    let mut state = state.lock().unwrap();
    state.last_query = query.clone();
    Json(page(state.logs.clone(), number(&query, "page", 1), number(&query, "limit", 10))).into_response()
}

fn resource_of(uri: &Uri) -> String {
    uri.path()
        .trim_start_matches("/api/")
        .split('/')
        .next()
        .unwrap_or_default()
        .to_string()
}

fn matches_query(record: &Value, query: &HashMap<String, String>) -> bool {
    if record["is_deleted"] == json!(true) {
        return false;
    }
    for key in ["created_by", "work_status", "category"] {
        if let Some(wanted) = query.get(key) {
            if record[key].as_str() != Some(wanted.as_str()) {
                return false;
            }
        }
    }
    match query.get("search") {
        Some(search) => {
            let search = search.to_lowercase();
            record
                .as_object()
                .map(|fields| {
                    fields
                        .values()
                        .filter_map(Value::as_str)
                        .any(|v| v.to_lowercase().contains(&search))
                })
                .unwrap_or(false)
        }
        None => true,
    }
}

async fn list_records(
    State(state): State<Shared>,
    uri: Uri,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let mut state = state.lock().unwrap();
    state.last_query = query.clone();
    let records: Vec<Value> = state
        .records
        .get(&resource_of(&uri))
        .map(|list| list.iter().filter(|r| matches_query(r, &query)).cloned().collect())
        .unwrap_or_default();
    Json(page(records, number(&query, "page", 1), number(&query, "limit", 10))).into_response()
}

/// Unknown ids answer 200 with an empty body, as some of the real
/// endpoints do
async fn get_record(State(state): State<Shared>, uri: Uri, Path(id): Path<String>) -> Response {
    let state = state.lock().unwrap();
    let found = state
        .records
        .get(&resource_of(&uri))
        .and_then(|list| list.iter().find(|r| r["_id"] == json!(id)).cloned());
    match found {
        Some(record) => Json(record).into_response(),
        None => StatusCode::OK.into_response(),
    }
}

async fn create_record(State(state): State<Shared>, uri: Uri, Json(body): Json<Value>) -> Response {
    let resource = resource_of(&uri);
    let mut state = state.lock().unwrap();
    state.record_writes.push((format!("POST {}", resource), body.clone()));
    let list = state.records.entry(resource.clone()).or_default();
    let mut record = body;
    record["_id"] = json!(format!("{}-{}", resource, list.len() + 1));
    list.push(record.clone());
    Json(record).into_response()
}

async fn update_record(
    State(state): State<Shared>,
    uri: Uri,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let resource = resource_of(&uri);
    let mut state = state.lock().unwrap();
    state.record_writes.push((format!("PATCH {}/{}", resource, id), body.clone()));
    let record = state
        .records
        .get_mut(&resource)
        .and_then(|list| list.iter_mut().find(|r| r["_id"] == json!(id)));
    match (record, body) {
        (Some(record), Value::Object(changes)) => {
            if let Some(fields) = record.as_object_mut() {
                fields.extend(changes);
            }
            Json(record.clone()).into_response()
        }
        (Some(_), _) => error(StatusCode::BAD_REQUEST, "Body must be an object"),
        (None, _) => error(StatusCode::NOT_FOUND, "Record not found"),
    }
}

/// Employees are soft-deleted; everything else is removed
async fn delete_record(State(state): State<Shared>, uri: Uri, Path(id): Path<String>) -> Response {
    let resource = resource_of(&uri);
    let mut state = state.lock().unwrap();
    state.deleted.push(format!("{}/{}", resource, id));
    if let Some(list) = state.records.get_mut(&resource) {
        if resource == "employee" {
            for record in list.iter_mut().filter(|r| r["_id"] == json!(id)) {
                record["is_deleted"] = json!(true);
            }
        } else {
            list.retain(|r| r["_id"] != json!(id));
        }
    }
    Json(json!({ "message": "Deleted" })).into_response()
}

async fn delete_many_records(State(state): State<Shared>, uri: Uri, Json(body): Json<Value>) -> Response {
    let resource = resource_of(&uri);
    let ids: Vec<String> = serde_json::from_value(body["ids"].clone()).unwrap_or_default();
    let mut state = state.lock().unwrap();
    let before = state.records.get(&resource).map(Vec::len).unwrap_or(0);
    if let Some(list) = state.records.get_mut(&resource) {
        list.retain(|r| !ids.iter().any(|id| r["_id"] == json!(id)));
    }
    let after = state.records.get(&resource).map(Vec::len).unwrap_or(0);
    state.deleted.extend(ids.iter().map(|id| format!("{}/{}", resource, id)));
    Json(json!({ "deletedCount": before - after })).into_response()
}

async fn purge_employee(State(state): State<Shared>, Path(id): Path<String>) -> Response {
    let mut state = state.lock().unwrap();
    state.deleted.push(format!("employee/{}/permanent", id));
    if let Some(list) = state.records.get_mut("employee") {
        list.retain(|r| r["_id"] != json!(id));
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn employee_statistics(State(state): State<Shared>) -> Response {
    let state = state.lock().unwrap();
    let active: Vec<&Value> = state
        .records
        .get("employee")
        .map(|list| list.iter().filter(|r| r["is_deleted"] != json!(true)).collect())
        .unwrap_or_default();
    let count = |field: &str, value: Value| active.iter().filter(|r| r[field] == value).count();
    Json(json!({
        "total": active.len(),
        "working": count("work_status", json!("Working")),
        "resigned": count("work_status", json!("Resigned")),
        "superAdmins": count("isSuperAdmin", json!(true)),
    }))
    .into_response()
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == format!("Bearer {}", TOKEN))
        .unwrap_or(false)
}

/// Management header, HR branch (children out of order), Dashboard link.
/// Top level is also out of order so sorting is observable.
pub fn sample_menus() -> Vec<Value> {
    vec![
        json!({
            "_id": "hr", "name": "HR", "icon": "People", "path": null, "order": 3,
            "subItems": [
                { "_id": "staff", "name": "Staff", "icon": "Badge", "path": "/hr/staff", "order": 2, "parentId": "hr" },
                { "_id": "roster", "name": "Roster", "icon": "NotARealIcon", "path": "/hr/roster", "order": 1, "parentId": "hr" }
            ]
        }),
        json!({ "_id": "mgmt", "name": "Management", "groupTitle": true, "order": 1, "subItems": [] }),
        json!({ "_id": "dash", "name": "Dashboard", "icon": "Dashboard", "path": "/dashboard", "order": 2, "subItems": [] }),
    ]
}

pub fn sample_role(id: &str, granted: &[&str]) -> Value {
    json!({
        "_id": id,
        "name": "Coordinator",
        "isActive": true,
        "permissions": granted
            .iter()
            .map(|m| json!({ "_id": format!("p-{}", m), "menuId": m, "menuName": m }))
            .collect::<Vec<_>>(),
    })
}

pub fn sample_profile(granted: &[&str]) -> Value {
    json!({
        "_id": "u1",
        "firstName": "Jo",
        "lastName": "Nguyen",
        "emailAddress": "jo@example.com",
        "role": {
            "_id": "r1",
            "name": "Coordinator",
            "permissions": granted.iter().map(|m| json!({ "menuId": m })).collect::<Vec<_>>(),
        }
    })
}

pub async fn backend_with_menus() -> Result<FakeBackend> {
    spawn(BackendState {
        menus: sample_menus(),
        ..Default::default()
    })
    .await
}

pub fn sample_employees() -> Vec<Value> {
    vec![
        json!({
            "_id": "e1", "firstName": "Jo", "lastName": "Nguyen", "emailAddress": "jo@example.com",
            "work_status": "Working", "category": "Nurse", "monthlySalary": "3100", "isSuperAdmin": true,
            "bank_name": "First Bank"
        }),
        json!({
            "_id": "e2", "firstName": "Sam", "lastName": "Okafor", "emailAddress": "sam@example.com",
            "work_status": "Resigned", "resigned_date": "2024-02-01", "category": "Carer", "monthlySalary": 2800
        }),
        json!({
            "_id": "e3", "firstName": "Ana", "lastName": "Silva", "emailAddress": "ana@example.com",
            "work_status": "Working", "category": "Carer"
        }),
    ]
}

/// Backend with employees, one day slot, and one IP allow-list entry
pub async fn backend_with_records() -> Result<FakeBackend> {
    let mut state = BackendState {
        profile: sample_profile(&[]),
        ..Default::default()
    };
    state.records.insert("employee".to_string(), sample_employees());
    state.records.insert(
        "roster".to_string(),
        vec![json!({
            "_id": "s1", "start_time": "9:00 AM", "end_time": "5:00 PM", "total_hrs": "8.00", "created_by": "u1"
        })],
    );
    state.records.insert(
        "ip-address".to_string(),
        vec![json!({ "_id": "ip1", "name": "Head office", "address": "10.0.0.1", "created_by": "u1" })],
    );
    spawn(state).await
}
