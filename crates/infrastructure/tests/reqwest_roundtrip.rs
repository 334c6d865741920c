//! End-to-end tests of the reqwest adapter against a local server.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::{delete, get},
};
use pretty_assertions::assert_eq;
use rowdeck_application::{HttpClient, HttpClientError, TableSession};
use rowdeck_domain::{
    PayloadMode, RecordId, ViewSettings,
    request::{Headers, RequestSpec},
};
use rowdeck_infrastructure::ReqwestHttpClient;
use serde_json::{Value, json};
use url::Url;

type Users = Arc<Mutex<Vec<Value>>>;

async fn list_users(State(users): State<Users>) -> Json<Value> {
    Json(Value::Array(users.lock().expect("lock").clone()))
}

async fn remove_user(State(users): State<Users>, Path(id): Path<String>) -> StatusCode {
    let mut users = users.lock().expect("lock");
    let before = users.len();
    users.retain(|user| user["id"].to_string() != id);
    if users.len() < before {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

async fn secure(headers: HeaderMap) -> Result<Json<Value>, StatusCode> {
    match headers.get("authorization").and_then(|v| v.to_str().ok()) {
        Some("Bearer secret") => Ok(Json(json!({ "data": [{ "id": "s1" }], "total": 1 }))),
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}

async fn slow() -> Json<Value> {
    tokio::time::sleep(Duration::from_millis(500)).await;
    Json(json!([]))
}

async fn spawn_server(users: Users) -> String {
    let app = Router::new()
        .route("/users", get(list_users))
        .route("/users/{id}", delete(remove_user))
        .route("/secure", get(secure))
        .route("/slow", get(slow))
        .with_state(users);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    format!("http://{addr}")
}

fn seeded_users() -> Users {
    Arc::new(Mutex::new(vec![
        json!({ "id": 1, "name": "Ada" }),
        json!({ "id": 2, "name": "Bo" }),
        json!({ "id": 3, "name": "Cy" }),
    ]))
}

fn client() -> Arc<ReqwestHttpClient> {
    Arc::new(ReqwestHttpClient::new().expect("client"))
}

fn ids(session: &TableSession<ReqwestHttpClient>) -> Vec<String> {
    session
        .controller()
        .records()
        .iter()
        .filter_map(|r| r.id().map(|id| id.to_string()))
        .collect()
}

#[tokio::test]
async fn get_returns_status_body_and_lowercase_headers() {
    let base = spawn_server(seeded_users()).await;
    let url = Url::parse(&format!("{base}/users")).expect("url");

    let response = client()
        .execute(&RequestSpec::get(url))
        .await
        .expect("response");

    assert!(response.is_success());
    assert_eq!(
        response.headers.get("content-type").map(String::as_str),
        Some("application/json")
    );
    let body: Value = serde_json::from_slice(&response.body).expect("json");
    assert_eq!(body.as_array().map(Vec::len), Some(3));
}

#[tokio::test]
async fn error_status_is_a_response_not_a_transport_error() {
    let base = spawn_server(seeded_users()).await;
    let url = Url::parse(&format!("{base}/secure")).expect("url");

    let response = client()
        .execute(&RequestSpec::get(url))
        .await
        .expect("response");

    assert_eq!(response.status.as_u16(), 401);
}

#[tokio::test]
async fn custom_headers_are_sent() {
    let base = spawn_server(seeded_users()).await;
    let url = Url::parse(&format!("{base}/secure")).expect("url");
    let mut headers = Headers::new();
    headers.set("Authorization", "Bearer secret");

    let response = client()
        .execute(&RequestSpec::get(url).with_headers(headers))
        .await
        .expect("response");

    assert_eq!(response.status.as_u16(), 200);
}

#[tokio::test]
async fn slow_server_times_out() {
    let base = spawn_server(seeded_users()).await;
    let url = Url::parse(&format!("{base}/slow")).expect("url");

    let result = client()
        .execute(&RequestSpec::get(url).with_timeout(50))
        .await;

    assert_eq!(result, Err(HttpClientError::Timeout { timeout_ms: 50 }));
}

#[tokio::test]
async fn closed_port_fails_to_connect() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    let url = Url::parse(&format!("http://{addr}/users")).expect("url");
    let result = client().execute(&RequestSpec::get(url)).await;

    assert!(matches!(
        result,
        Err(HttpClientError::ConnectionRefused { .. } | HttpClientError::ConnectionFailed(_))
    ));
}

#[tokio::test]
async fn session_loads_and_deletes_through_http() {
    let users = seeded_users();
    let base = spawn_server(Arc::clone(&users)).await;

    let mut settings = ViewSettings::new("Users", "users");
    settings.base_url = Some(base);
    let mut session = TableSession::new(settings, client());

    session.mount().await;
    assert_eq!(ids(&session), vec!["1", "2", "3"]);

    session
        .controller_mut()
        .request_delete(RecordId::from(2))
        .expect("request delete");
    session.confirm_delete().await;

    assert_eq!(ids(&session), vec!["1", "3"]);
    assert_eq!(users.lock().expect("lock").len(), 2);

    session.refresh().await;
    assert_eq!(ids(&session), vec!["1", "3"]);
}

#[tokio::test]
async fn session_reads_nested_payload_with_auth_header() {
    let base = spawn_server(seeded_users()).await;

    let mut settings = ViewSettings::new("Secure", format!("{base}/secure"));
    settings.payload = PayloadMode::Nested;
    settings
        .custom_headers
        .insert("Authorization".into(), "Bearer secret".into());
    let mut session = TableSession::new(settings, client());

    session.mount().await;
    assert_eq!(ids(&session), vec!["s1"]);
}
