//! Behavioural tests for the table controller and session.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use rowdeck_application::{
    CallbackObserver, FetchError, HttpClient, HttpClientError, ListBody, Screen, TableController,
    TableError, TableSession,
};
use rowdeck_domain::{
    ColumnDescriptor, DetailFieldDescriptor, DomainError, PayloadMode, Record, RecordId,
    SortDirection, ViewSettings, ViewState,
    request::{HttpMethod, RequestSpec},
    response::{ResponseSpec, StatusCode},
};
use serde_json::{Value, json};

const ENDPOINT: &str = "https://api.example.com/users";

/// Routes requests by method and URL to canned responses.
#[derive(Default)]
struct RoutedClient {
    routes: HashMap<(HttpMethod, String), Result<ResponseSpec, HttpClientError>>,
    calls: Mutex<Vec<(HttpMethod, String)>>,
}

impl RoutedClient {
    fn route(mut self, method: HttpMethod, url: &str, status: u16, body: &str) -> Self {
        self.routes.insert(
            (method, url.to_string()),
            Ok(ResponseSpec::with_body(status, body)),
        );
        self
    }

    fn fail(mut self, method: HttpMethod, url: &str, error: HttpClientError) -> Self {
        self.routes.insert((method, url.to_string()), Err(error));
        self
    }

    fn calls(&self) -> Vec<(HttpMethod, String)> {
        self.calls.lock().expect("lock").clone()
    }
}

impl HttpClient for RoutedClient {
    fn execute(
        &self,
        request: &RequestSpec,
    ) -> impl Future<Output = Result<ResponseSpec, HttpClientError>> + Send {
        let key = (request.method, request.url.to_string());
        self.calls.lock().expect("lock").push(key.clone());
        let result = self
            .routes
            .get(&key)
            .cloned()
            .unwrap_or_else(|| Ok(ResponseSpec::with_body(404, "")));
        async move { result }
    }
}

type Log = Arc<Mutex<Vec<String>>>;

fn settings() -> ViewSettings {
    let mut settings = ViewSettings::new("Users", ENDPOINT);
    settings.detail_title = "User".into();
    settings.columns = vec![
        ColumnDescriptor::new("id", "ID").sortable(),
        ColumnDescriptor::new("name", "Name").sortable(),
        ColumnDescriptor::new("role", "Role"),
    ];
    settings.detail_fields = vec![
        DetailFieldDescriptor::new("name", "Name"),
        DetailFieldDescriptor::new("email", "Email"),
    ];
    settings
}

fn three_users() -> &'static str {
    r#"[{"id":1,"name":"Cy","role":"admin"},{"id":2,"name":"Ada"},{"id":3,"name":"Bo"}]"#
}

fn records(value: Value) -> Vec<Record> {
    value
        .as_array()
        .cloned()
        .unwrap_or_default()
        .into_iter()
        .filter_map(Record::from_value)
        .collect()
}

fn users() -> Vec<Record> {
    records(serde_json::from_str(three_users()).expect("json"))
}

fn ids(records: &[Record]) -> Vec<String> {
    records
        .iter()
        .filter_map(|r| r.id().map(|id| id.to_string()))
        .collect()
}

fn observed(settings: ViewSettings) -> (TableController, Log) {
    let log: Log = Arc::default();
    let data_log = Arc::clone(&log);
    let error_log = Arc::clone(&log);
    let observer = CallbackObserver::new()
        .on_data_change(move |records| {
            data_log
                .lock()
                .expect("lock")
                .push(format!("data:{}", records.len()));
        })
        .on_error(move |error| {
            error_log.lock().expect("lock").push(format!("error:{error}"));
        });
    (TableController::new(settings).with_observer(observer), log)
}

async fn mounted_session(
    client: RoutedClient,
) -> (TableSession<RoutedClient>, Arc<RoutedClient>, Log) {
    let client = Arc::new(client);
    let (controller, log) = observed(settings());
    let mut session = TableSession::with_controller(controller, Arc::clone(&client));
    session.mount().await;
    (session, client, log)
}

#[tokio::test]
async fn mount_loads_records() {
    let client = RoutedClient::default().route(HttpMethod::Get, ENDPOINT, 200, three_users());
    let (session, _, log) = mounted_session(client).await;

    let controller = session.controller();
    assert_eq!(ids(controller.records()), vec!["1", "2", "3"]);
    assert!(!controller.is_loading());
    assert_eq!(*log.lock().expect("lock"), vec!["data:3".to_string()]);
}

#[tokio::test]
async fn failed_load_leaves_empty_list_and_reports_error() {
    let client = RoutedClient::default().fail(
        HttpMethod::Get,
        ENDPOINT,
        HttpClientError::ConnectionFailed("reset".into()),
    );
    let (session, _, log) = mounted_session(client).await;

    assert!(session.controller().records().is_empty());
    assert!(!session.controller().is_loading());
    let log = log.lock().expect("lock");
    assert_eq!(log.len(), 1);
    assert!(log[0].starts_with("error:failed to load records"));
}

#[tokio::test]
async fn refresh_failure_replaces_previous_records_with_empty_list() {
    let client = Arc::new(
        RoutedClient::default().route(HttpMethod::Get, ENDPOINT, 200, three_users()),
    );
    let mut session = TableSession::new(settings(), Arc::clone(&client));
    session.mount().await;
    assert_eq!(session.controller().records().len(), 3);

    let broken = Arc::new(RoutedClient::default().route(HttpMethod::Get, ENDPOINT, 500, "oops"));
    let mut session = TableSession::with_controller(session.into_controller(), broken);
    session.refresh().await;

    assert!(session.controller().records().is_empty());
    let Screen::List(list) = session.controller().render().screen else {
        panic!("expected list screen");
    };
    assert_eq!(list.body, ListBody::Empty("No data found".into()));
}

#[test]
fn loading_message_shows_while_fetch_is_outstanding() {
    let mut controller = TableController::new(settings());
    let ticket = controller.mount().expect("ticket");

    assert!(controller.is_loading());
    let Screen::List(list) = controller.render().screen else {
        panic!("expected list screen");
    };
    assert_eq!(list.body, ListBody::Loading("Loading...".into()));

    controller.finish_load(ticket.generation, Ok(Vec::new()));
    assert!(!controller.is_loading());
}

#[test]
fn list_request_carries_json_content_type_and_custom_headers() {
    let mut settings = settings();
    settings
        .custom_headers
        .insert("Authorization".into(), "Bearer t".into());
    let mut controller = TableController::new(settings);

    let ticket = controller.mount().expect("ticket");
    assert_eq!(ticket.request.method, HttpMethod::Get);
    assert_eq!(ticket.request.url.as_str(), ENDPOINT);
    assert_eq!(
        ticket.request.headers.get("content-type"),
        Some("application/json")
    );
    assert_eq!(ticket.request.headers.get("authorization"), Some("Bearer t"));
}

#[tokio::test]
async fn nested_payload_reads_data_field() {
    let mut settings = settings();
    settings.payload = PayloadMode::Nested;
    let client = Arc::new(RoutedClient::default().route(
        HttpMethod::Get,
        ENDPOINT,
        200,
        r#"{"data":[{"id":"a"},{"id":"b"}],"page":1}"#,
    ));
    let mut session = TableSession::new(settings, client);
    session.mount().await;

    assert_eq!(ids(session.controller().records()), vec!["a", "b"]);
}

#[test]
fn sort_toggles_and_resets() {
    let mut controller = TableController::new(settings());
    let ticket = controller.mount().expect("ticket");
    controller.finish_load(ticket.generation, Ok(users()));

    assert!(controller.sort_by("name"));
    assert_eq!(ids(controller.records()), vec!["2", "3", "1"]);
    assert_eq!(controller.sort_state().direction, SortDirection::Ascending);

    assert!(controller.sort_by("name"));
    assert_eq!(ids(controller.records()), vec!["1", "3", "2"]);
    assert_eq!(controller.sort_state().direction, SortDirection::Descending);

    assert!(controller.sort_by("id"));
    assert_eq!(ids(controller.records()), vec!["1", "2", "3"]);
    assert_eq!(controller.sort_state().direction, SortDirection::Ascending);
}

#[test]
fn non_sortable_and_unknown_columns_do_nothing() {
    let mut controller = TableController::new(settings());
    let ticket = controller.mount().expect("ticket");
    controller.finish_load(ticket.generation, Ok(users()));

    assert!(!controller.sort_by("role"));
    assert!(!controller.sort_by("missing"));
    assert_eq!(controller.sort_state().key, None);
    assert_eq!(ids(controller.records()), vec!["1", "2", "3"]);
}

#[test]
fn sorted_header_shows_direction() {
    let mut controller = TableController::new(settings());
    let ticket = controller.mount().expect("ticket");
    controller.finish_load(ticket.generation, Ok(users()));
    controller.sort_by("name");
    controller.sort_by("name");

    let Screen::List(list) = controller.render().screen else {
        panic!("expected list screen");
    };
    let labels: Vec<String> = list.headers.iter().map(|h| h.display()).collect();
    assert_eq!(labels, vec!["ID", "Name ↓", "Role"]);
}

#[tokio::test]
async fn confirmed_delete_removes_record_remotely_and_locally() {
    let client = RoutedClient::default()
        .route(HttpMethod::Get, ENDPOINT, 200, three_users())
        .route(HttpMethod::Delete, &format!("{ENDPOINT}/2"), 204, "");
    let (mut session, client, log) = mounted_session(client).await;

    session
        .controller_mut()
        .request_delete(RecordId::from(2))
        .expect("request");
    assert!(session.controller().render().confirmation.is_open);

    session.confirm_delete().await;

    assert_eq!(ids(session.controller().records()), vec!["1", "3"]);
    assert!(!session.controller().render().confirmation.is_open);
    assert!(session.controller().deletion().target().is_none());
    assert_eq!(
        client.calls().last(),
        Some(&(HttpMethod::Delete, format!("{ENDPOINT}/2")))
    );
    assert_eq!(
        *log.lock().expect("lock"),
        vec!["data:3".to_string(), "data:2".to_string()]
    );
}

#[tokio::test]
async fn cancelled_delete_makes_no_call() {
    let client = RoutedClient::default().route(HttpMethod::Get, ENDPOINT, 200, three_users());
    let (mut session, client, _) = mounted_session(client).await;

    session
        .controller_mut()
        .request_delete(RecordId::from(2))
        .expect("request");
    assert!(session.controller_mut().cancel_delete());
    session.confirm_delete().await;

    assert_eq!(ids(session.controller().records()), vec!["1", "2", "3"]);
    assert_eq!(client.calls(), vec![(HttpMethod::Get, ENDPOINT.to_string())]);
}

#[tokio::test]
async fn failed_delete_keeps_records_and_reports_error() {
    let client = RoutedClient::default()
        .route(HttpMethod::Get, ENDPOINT, 200, three_users())
        .route(HttpMethod::Delete, &format!("{ENDPOINT}/2"), 500, "boom");
    let (mut session, _, log) = mounted_session(client).await;

    session
        .controller_mut()
        .request_delete(RecordId::from(2))
        .expect("request");
    session.confirm_delete().await;

    assert_eq!(ids(session.controller().records()), vec!["1", "2", "3"]);
    assert!(session.controller().deletion().target().is_none());
    let log = log.lock().expect("lock");
    assert_eq!(
        log.last().map(String::as_str),
        Some("error:failed to delete record 2: server responded with 500 Internal Server Error")
    );
}

#[tokio::test]
async fn deleting_the_detail_record_returns_to_list() {
    let client = RoutedClient::default()
        .route(HttpMethod::Get, ENDPOINT, 200, three_users())
        .route(HttpMethod::Delete, &format!("{ENDPOINT}/2"), 200, "{}");
    let (mut session, _, _) = mounted_session(client).await;

    session
        .controller_mut()
        .select_record(&RecordId::from(2))
        .expect("select");
    session
        .controller_mut()
        .request_delete_selected()
        .expect("request");
    session.confirm_delete().await;

    assert_eq!(session.controller().view(), &ViewState::List);
}

#[tokio::test]
async fn deleting_another_record_keeps_detail_view() {
    let client = RoutedClient::default()
        .route(HttpMethod::Get, ENDPOINT, 200, three_users())
        .route(HttpMethod::Delete, &format!("{ENDPOINT}/3"), 200, "{}");
    let (mut session, _, _) = mounted_session(client).await;

    session
        .controller_mut()
        .select_record(&RecordId::from(2))
        .expect("select");
    session
        .controller_mut()
        .request_delete(RecordId::from(3))
        .expect("request");
    session.confirm_delete().await;

    let detail = session.controller().view().detail_record().expect("detail");
    assert_eq!(detail.id(), Some(RecordId::from(2)));
    assert_eq!(ids(session.controller().records()), vec!["1", "2"]);
}

#[test]
fn delete_requests_are_gated() {
    let mut disabled = settings();
    disabled.enable_delete = false;
    let mut controller = TableController::new(disabled);
    let ticket = controller.mount().expect("ticket");
    controller.finish_load(ticket.generation, Ok(users()));
    assert_eq!(
        controller.request_delete(RecordId::from(1)),
        Err(DomainError::DeleteDisabled)
    );

    let mut controller = TableController::new(settings());
    let ticket = controller.mount().expect("ticket");
    controller.finish_load(ticket.generation, Ok(users()));
    assert_eq!(
        controller.request_delete(RecordId::from(9)),
        Err(DomainError::RecordNotFound(RecordId::from(9)))
    );

    controller.request_delete(RecordId::from(1)).expect("first");
    let _ticket = controller.confirm_delete().expect("delete ticket");
    assert_eq!(
        controller.request_delete(RecordId::from(2)),
        Err(DomainError::DeletionInProgress)
    );
}

#[test]
fn view_switch_keeps_sort_and_deletion_state() {
    let mut controller = TableController::new(settings());
    let ticket = controller.mount().expect("ticket");
    controller.finish_load(ticket.generation, Ok(users()));
    controller.sort_by("name");

    controller.select_row(0).expect("row 0");
    let Screen::Detail(detail) = controller.render().screen else {
        panic!("expected detail screen");
    };
    assert_eq!(detail.title, "User");
    assert_eq!(detail.id, Some(RecordId::from(2)));
    assert_eq!(detail.fields[0].value, "Ada");
    assert_eq!(detail.fields[1].value, "N/A");

    controller.back();
    assert!(controller.view().is_list());
    assert_eq!(controller.sort_state().key.as_deref(), Some("name"));
    assert_eq!(ids(controller.records()), vec!["2", "3", "1"]);
}

#[test]
fn selecting_missing_rows_fails() {
    let mut controller = TableController::new(settings());
    let ticket = controller.mount().expect("ticket");
    controller.finish_load(ticket.generation, Ok(Vec::new()));

    assert_eq!(
        controller.select_row(0),
        Err(DomainError::RowOutOfRange { index: 0, len: 0 })
    );
    assert!(controller.view().is_list());
}

#[test]
fn stale_load_is_discarded() {
    let (mut controller, log) = observed(settings());
    let first = controller.mount().expect("ticket A");
    let second = controller
        .set_endpoint("https://api.example.com/admins")
        .expect("ticket B");
    assert_eq!(second.request.url.as_str(), "https://api.example.com/admins");

    assert!(controller.finish_load(
        second.generation,
        Ok(records(json!([{"id": "b1"}])))
    ));
    assert!(!controller.finish_load(
        first.generation,
        Ok(records(json!([{"id": "a1"}, {"id": "a2"}])))
    ));

    assert_eq!(ids(controller.records()), vec!["b1"]);
    assert!(!controller.is_loading());
    assert_eq!(*log.lock().expect("lock"), vec!["data:1".to_string()]);
}

#[test]
fn stale_load_does_not_clear_loading_flag() {
    let mut controller = TableController::new(settings());
    let first = controller.mount().expect("ticket A");
    let _second = controller.refresh().expect("ticket B");

    assert!(!controller.finish_load(first.generation, Ok(Vec::new())));
    assert!(controller.is_loading());
}

#[test]
fn same_endpoint_does_not_reload() {
    let mut controller = TableController::new(settings());
    controller.mount().expect("ticket");
    assert!(controller.set_endpoint(ENDPOINT).is_none());
}

#[test]
fn outcomes_after_unmount_are_ignored() {
    let (mut controller, log) = observed(settings());
    let ticket = controller.mount().expect("ticket");
    controller.unmount();

    assert!(!controller.finish_load(ticket.generation, Ok(records(json!([{"id": 1}])))));
    assert!(controller.records().is_empty());
    assert!(log.lock().expect("lock").is_empty());
    assert!(controller.refresh().is_none());
}

#[test]
fn invalid_endpoint_fails_immediately() {
    let (mut controller, log) = observed(ViewSettings::new("Broken", "users"));
    assert!(controller.mount().is_none());
    assert!(!controller.is_loading());

    let log = log.lock().expect("lock");
    assert_eq!(log.len(), 1);
    assert!(log[0].starts_with("error:failed to load records: invalid endpoint"));
}

#[test]
fn refresh_can_be_disabled() {
    let mut settings = settings();
    settings.enable_refresh = false;
    let mut controller = TableController::new(settings);
    controller.mount().expect("initial load still runs");
    assert!(controller.refresh().is_none());
}

#[test]
fn successful_reload_resets_sort_state() {
    let mut controller = TableController::new(settings());
    let ticket = controller.mount().expect("ticket");
    controller.finish_load(ticket.generation, Ok(users()));
    controller.sort_by("name");

    let ticket = controller.refresh().expect("ticket");
    controller.finish_load(ticket.generation, Ok(records(json!([{"id": 5}, {"id": 4}]))));

    assert_eq!(controller.sort_state().key, None);
    assert_eq!(ids(controller.records()), vec!["5", "4"]);
}

#[test]
fn fetch_error_is_reported_as_table_error() {
    let errors: Arc<Mutex<Vec<TableError>>> = Arc::default();
    let sink = Arc::clone(&errors);
    let mut controller = TableController::new(settings()).with_observer(
        CallbackObserver::new().on_error(move |e| sink.lock().expect("lock").push(e.clone())),
    );
    let ticket = controller.mount().expect("ticket");
    controller.finish_load(
        ticket.generation,
        Err(FetchError::Status(StatusCode::new(401))),
    );

    assert_eq!(
        *errors.lock().expect("lock"),
        vec![TableError::Fetch(FetchError::Status(StatusCode::new(401)))]
    );
}

#[test]
fn delete_settling_after_endpoint_change_keeps_new_list() {
    let admins = "https://api.example.com/admins";
    let (mut controller, log) = observed(settings());
    let ticket = controller.mount().expect("ticket");
    controller.finish_load(ticket.generation, Ok(users()));

    controller.request_delete(RecordId::from(2)).expect("request");
    let delete = controller.confirm_delete().expect("delete ticket");
    assert_eq!(delete.request.url.as_str(), "https://api.example.com/users/2");

    let ticket = controller.set_endpoint(admins).expect("reload");
    controller.finish_load(
        ticket.generation,
        Ok(records(json!([{"id": 2}, {"id": 5}]))),
    );
    log.lock().expect("lock").clear();

    assert!(controller.finish_delete(&delete.id, Ok(())));
    assert!(!controller.deletion().is_deleting());
    assert_eq!(ids(controller.records()), vec!["2", "5"]);
    assert!(log.lock().expect("lock").is_empty());
}

#[test]
fn delete_settling_on_same_endpoint_after_refresh_still_removes() {
    let mut controller = TableController::new(settings());
    let ticket = controller.mount().expect("ticket");
    controller.finish_load(ticket.generation, Ok(users()));

    controller.request_delete(RecordId::from(2)).expect("request");
    let delete = controller.confirm_delete().expect("delete ticket");
    let ticket = controller.refresh().expect("reload");
    controller.finish_load(ticket.generation, Ok(users()));

    assert!(controller.finish_delete(&delete.id, Ok(())));
    assert_eq!(ids(controller.records()), vec!["1", "3"]);
}
