//! RemoteClient against a local mock of the hosted table API

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use regen_directory_sdk::{
    CategoryId, DirectoryClient, EnterpriseFilter, EnterpriseId, FailureKind, NewEnterprise,
    RemoteClient,
};

const KEY: &str = "anon-test-key";

#[derive(Clone, Default)]
struct Recorded {
    queries: Arc<Mutex<Vec<HashMap<String, String>>>>,
    inserts: Arc<Mutex<Vec<Value>>>,
}

fn enterprise_row(id: &str, name: &str, category: &str, subcategories: &[&str]) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": null,
        "website": null,
        "address": null,
        "latitude": null,
        "longitude": null,
        "has_location": false,
        "category": category,
        "subcategories": subcategories,
        "is_featured": false,
        "created_at": "2024-03-01T12:00:00Z",
        "updated_at": "2024-03-01T12:00:00Z"
    })
}

fn authorized(headers: &HeaderMap) -> bool {
    let apikey = headers.get("apikey").and_then(|v| v.to_str().ok());
    let bearer = headers.get("authorization").and_then(|v| v.to_str().ok());
    let expected = format!("Bearer {}", KEY);
    apikey == Some(KEY) && bearer == Some(expected.as_str())
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"message": "Invalid API key", "code": "PGRST301", "details": null, "hint": null})),
    )
        .into_response()
}

async fn categories(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    Json(json!([
        {"id": 1, "name": "Land Projects"},
        {"id": 2, "name": "Capital Sources"}
    ]))
    .into_response()
}

async fn subcategories(headers: HeaderMap, Query(params): Query<HashMap<String, String>>) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    if params.get("category_id").map(String::as_str) != Some("eq.1") {
        return Json(json!([])).into_response();
    }
    Json(json!([
        {"id": 10, "category_id": 1, "name": "Permaculture"},
        {"id": 11, "category_id": 1, "name": "Forestry"}
    ]))
    .into_response()
}

async fn list_enterprises(
    State(recorded): State<Recorded>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    recorded.queries.lock().unwrap().push(params.clone());

    if params.get("id").map(String::as_str) == Some("eq.missing") {
        return Json(json!([])).into_response();
    }
    if params.get("category").map(String::as_str) == Some("eq.Broken") {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"message": "relation does not exist", "code": "42P01"})),
        )
            .into_response();
    }
    Json(json!([
        enterprise_row("a", "Oak Hollow", "Land Projects", &["Permaculture", "Forestry"]),
        enterprise_row("b", "Birch Lot", "Land Projects", &["Forestry"])
    ]))
    .into_response()
}

async fn insert_enterprise(
    State(recorded): State<Recorded>,
    headers: HeaderMap,
    Json(body): Json<Vec<Value>>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let prefer = headers.get("prefer").and_then(|v| v.to_str().ok());
    if prefer != Some("return=representation") || body.len() != 1 {
        return (StatusCode::BAD_REQUEST, Json(json!({"message": "bad insert"}))).into_response();
    }
    let draft = body[0].clone();
    recorded.inserts.lock().unwrap().push(draft.clone());

    if draft["name"] == "Duplicate" {
        return (
            StatusCode::CONFLICT,
            Json(json!({"message": "duplicate key value violates unique constraint", "code": "23505"})),
        )
            .into_response();
    }

    let mut row = draft;
    row["id"] = json!("generated-1");
    row["created_at"] = json!("2024-03-02T08:30:00Z");
    row["updated_at"] = json!("2024-03-02T08:30:00Z");
    (StatusCode::CREATED, Json(json!([row]))).into_response()
}

async fn spawn_mock() -> (String, Recorded) {
    let recorded = Recorded::default();
    let app = Router::new()
        .route("/rest/v1/categories", get(categories))
        .route("/rest/v1/subcategories", get(subcategories))
        .route("/rest/v1/enterprises", get(list_enterprises).post(insert_enterprise))
        .with_state(recorded.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}", addr), recorded)
}

#[tokio::test]
async fn test_reads_send_keys_and_parse_rows() {
    let (url, _) = spawn_mock().await;
    let client = RemoteClient::new(&url, KEY);

    let categories = client.list_categories().await.unwrap();
    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0].name, "Land Projects");

    let subs = client.list_subcategories(CategoryId::new(1)).await.unwrap();
    let names: Vec<_> = subs.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Permaculture", "Forestry"]);
}

#[tokio::test]
async fn test_enterprise_filter_is_encoded_as_postgrest_operators() {
    let (url, recorded) = spawn_mock().await;
    let client = RemoteClient::new(&url, KEY);

    let filter = EnterpriseFilter::in_category("Land Projects").with_subcategories(["Forestry", "Permaculture"]);
    let rows = client.list_enterprises(&filter).await.unwrap();
    assert_eq!(rows.len(), 2);

    client.list_featured().await.unwrap();

    let queries = recorded.queries.lock().unwrap();
    assert_eq!(queries[0].get("select").map(String::as_str), Some("*"));
    assert_eq!(queries[0].get("category").map(String::as_str), Some("eq.Land Projects"));
    assert_eq!(
        queries[0].get("subcategories").map(String::as_str),
        Some(r#"ov.{"Forestry","Permaculture"}"#)
    );
    assert_eq!(queries[1].get("is_featured").map(String::as_str), Some("eq.true"));
    assert_eq!(queries[1].get("limit").map(String::as_str), Some("6"));
}

#[tokio::test]
async fn test_get_enterprise_empty_array_is_absent() {
    let (url, _) = spawn_mock().await;
    let client = RemoteClient::new(&url, KEY);

    assert!(client.get_enterprise(&EnterpriseId::new("missing")).await.unwrap().is_none());
    let err = client
        .get_enterprise_required(&EnterpriseId::new("missing"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), FailureKind::NotFound);

    let found = client.get_enterprise(&EnterpriseId::new("a")).await.unwrap();
    assert_eq!(found.map(|e| e.name), Some("Oak Hollow".to_string()));
}

#[tokio::test]
async fn test_rejected_read_is_read_failure() {
    let (url, _) = spawn_mock().await;

    let bad_key = RemoteClient::new(&url, "wrong");
    let err = bad_key.list_categories().await.unwrap_err();
    assert_eq!(err.kind(), FailureKind::ReadFailure);
    assert!(err.to_string().contains("Invalid API key"));

    let client = RemoteClient::new(&url, KEY);
    let err = client
        .list_enterprises(&EnterpriseFilter::in_category("Broken"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), FailureKind::ReadFailure);
}

#[tokio::test]
async fn test_submit_posts_single_row_and_returns_representation() {
    let (url, recorded) = spawn_mock().await;
    let client = RemoteClient::new(&url, KEY);

    let draft = NewEnterprise::new("  Seed Library ", "Network Organizers")
        .with_website("")
        .with_subcategories(["Seed Saving"]);
    let created = client.submit_enterprise(draft).await.unwrap();

    assert_eq!(created.id.as_str(), "generated-1");
    assert_eq!(created.name, "Seed Library");
    assert_eq!(created.subcategories, vec!["Seed Saving"]);

    let inserts = recorded.inserts.lock().unwrap();
    assert_eq!(inserts[0]["website"], Value::Null);
    assert_eq!(inserts[0]["has_location"], json!(false));
}

#[tokio::test]
async fn test_invalid_submission_makes_no_request() {
    let (url, recorded) = spawn_mock().await;
    let client = RemoteClient::new(&url, KEY);

    let err = client
        .submit_enterprise(NewEnterprise::new("", "Land Projects").with_website("not a url"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), FailureKind::Validation);
    assert!(recorded.inserts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_rejected_insert_is_write_failure() {
    let (url, _) = spawn_mock().await;
    let client = RemoteClient::new(&url, KEY);

    let err = client
        .submit_enterprise(NewEnterprise::new("Duplicate", "Land Projects"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), FailureKind::WriteFailure);
    assert!(err.to_string().contains("duplicate key"));
}

#[tokio::test]
async fn test_unreachable_store_on_write_is_write_failure() {
    let client = RemoteClient::new("http://127.0.0.1:9", KEY);
    let err = client
        .submit_enterprise(NewEnterprise::new("Hill Farm", "Land Projects"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), FailureKind::WriteFailure);
}
