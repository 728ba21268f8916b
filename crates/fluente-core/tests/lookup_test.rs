#![allow(clippy::unwrap_used)]
// Integration tests for the API-backed option sources, end to end through
// a picker against a wiremock backend.

use std::sync::Arc;
use std::time::Duration;

use secrecy::SecretString;
use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use fluente_api::{ApiClient, Session, TransportConfig};
use fluente_core::picker::{OptionSource, SearchQuery};
use fluente_core::{PickerBuilder, PickerSnapshot, SearchPhase, StudentOptions};

async fn setup() -> (MockServer, Arc<ApiClient>) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let session = Session::with_token(SecretString::from("tok".to_owned()));
    let client =
        ApiClient::with_session(base_url, &TransportConfig::default(), session).unwrap();
    (server, Arc::new(client))
}

fn users_body(users: serde_json::Value) -> serde_json::Value {
    json!({
        "users": users,
        "total": 1,
        "page": 1,
        "limit": 50,
        "totalPages": 1
    })
}

fn student(id: &str, name: &str, email: &str) -> serde_json::Value {
    json!({
        "id": id,
        "email": email,
        "fullName": name,
        "role": "STUDENT",
        "createdAt": "2024-03-01T12:00:00Z",
        "updatedAt": "2024-03-01T12:00:00Z"
    })
}

async fn wait_for(
    picker: &fluente_core::Picker<()>,
    pred: impl Fn(&PickerSnapshot) -> bool,
) -> PickerSnapshot {
    let mut rx = picker.subscribe();
    tokio::time::timeout(Duration::from_secs(10), async move {
        loop {
            {
                let snap = rx.borrow_and_update();
                if pred(&snap) {
                    return snap.clone();
                }
            }
            rx.changed().await.expect("picker task ended");
        }
    })
    .await
    .expect("timed out waiting for picker snapshot")
}

#[tokio::test]
async fn student_source_labels_name_and_email() {
    let (server, api) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/users"))
        .and(query_param("role", "STUDENT"))
        .respond_with(ResponseTemplate::new(200).set_body_json(users_body(json!([
            student("s1", "Alice Souza", "alice@school.example")
        ]))))
        .mount(&server)
        .await;

    let source = StudentOptions::new(api);
    let options = source
        .search(&SearchQuery {
            term: String::new(),
            limit: 50,
            filters: (),
        })
        .await
        .unwrap();

    assert_eq!(options.len(), 1);
    assert_eq!(options[0].value, "s1");
    assert_eq!(options[0].label, "Alice Souza (alice@school.example)");
}

#[tokio::test]
async fn malformed_users_payload_yields_zero_options() {
    let (server, api) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "users": "oops-not-an-array"
        })))
        .mount(&server)
        .await;

    let source = StudentOptions::new(api);
    let options = source
        .search(&SearchQuery {
            term: String::new(),
            limit: 50,
            filters: (),
        })
        .await
        .unwrap();

    assert!(options.is_empty(), "malformed payload is zero results, not an error");
}

#[tokio::test]
async fn server_error_propagates_as_error() {
    let (server, api) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": "Internal",
            "message": "database down"
        })))
        .mount(&server)
        .await;

    let source = StudentOptions::new(api);
    let result = source
        .search(&SearchQuery {
            term: String::new(),
            limit: 50,
            filters: (),
        })
        .await;

    assert!(result.is_err(), "server failure must surface as an error");
}

#[tokio::test]
async fn find_by_id_distinguishes_missing_from_failure() {
    let (server, api) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/users/ghost"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": "NotFound",
            "message": "no such user"
        })))
        .mount(&server)
        .await;

    let source = StudentOptions::new(api);
    let found = source.find_by_id("ghost").await.unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn picker_over_student_source_searches_and_selects() {
    let (server, api) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/users"))
        .and(query_param("search", "jo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(users_body(json!([
            student("s2", "John Doe", "john@school.example"),
            student("s3", "Johnny Lee", "johnny@school.example")
        ]))))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(users_body(json!([
            student("s1", "Alice Souza", "alice@school.example")
        ]))))
        .mount(&server)
        .await;

    let picker = PickerBuilder::single(StudentOptions::new(api))
        .debounce(Duration::from_millis(10))
        .spawn();

    wait_for(&picker, |s| s.phase == SearchPhase::Ready).await;

    picker.set_term("jo");
    let snap = wait_for(&picker, |s| {
        s.phase == SearchPhase::Ready && s.options.len() == 2
    })
    .await;
    assert_eq!(snap.options[0].label, "John Doe (john@school.example)");

    picker.select(snap.options[0].clone());
    let snap = wait_for(&picker, |s| !s.selection.is_empty()).await;
    assert_eq!(snap.values(), vec!["s2".to_owned()]);
    assert_eq!(snap.selected[0].display_label(), "John Doe (john@school.example)");
}
