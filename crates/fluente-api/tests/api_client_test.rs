#![allow(clippy::unwrap_used)]
// Integration tests for `ApiClient` using wiremock.

use secrecy::SecretString;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use fluente_api::{
    ApiClient, CreatePaymentInput, Error, PaymentQuery, PaymentStatus, Session, TransportConfig,
    UserQuery, UserRole,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = ApiClient::new(base_url, &TransportConfig::default()).unwrap();
    (server, client)
}

async fn setup_authenticated() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let session = Session::with_token(SecretString::from("tok-abc".to_owned()));
    let client = ApiClient::with_session(base_url, &TransportConfig::default(), session).unwrap();
    (server, client)
}

fn sample_user(id: &str, name: &str, role: &str) -> serde_json::Value {
    json!({
        "id": id,
        "email": format!("{id}@school.example"),
        "fullName": name,
        "role": role,
        "createdAt": "2024-03-01T12:00:00Z",
        "updatedAt": "2024-03-01T12:00:00Z"
    })
}

// ── Authentication ──────────────────────────────────────────────────

#[tokio::test]
async fn login_stores_token_and_user() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({
            "email": "admin@school.example",
            "password": "hunter2"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "ok",
            "user": {
                "id": "u1",
                "email": "admin@school.example",
                "fullName": "Admin",
                "role": "ADMIN"
            },
            "accessToken": "tok-123"
        })))
        .mount(&server)
        .await;

    let secret = SecretString::from("hunter2".to_owned());
    let response = client.login("admin@school.example", &secret).await.unwrap();

    assert_eq!(response.user.full_name, "Admin");
    assert!(client.session().is_authenticated());
    assert_eq!(client.session().user().unwrap().email, "admin@school.example");
}

#[tokio::test]
async fn login_failure_maps_to_authentication_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "Unauthorized",
            "message": "Invalid credentials"
        })))
        .mount(&server)
        .await;

    let secret = SecretString::from("wrong".to_owned());
    let result = client.login("admin@school.example", &secret).await;

    assert!(
        matches!(result, Err(Error::Authentication { .. })),
        "expected Authentication error, got: {result:?}"
    );
    assert!(!client.session().is_authenticated());
}

#[tokio::test]
async fn expired_token_maps_to_session_expired() {
    let (server, client) = setup_authenticated().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = client.list_users(&UserQuery::default()).await;
    assert!(
        matches!(result, Err(Error::SessionExpired)),
        "expected SessionExpired, got: {result:?}"
    );
}

#[tokio::test]
async fn logout_clears_session_even_on_server_error() {
    let (server, client) = setup_authenticated().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/logout"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let _ = client.logout().await;
    assert!(!client.session().is_authenticated());
}

// ── Users ───────────────────────────────────────────────────────────

#[tokio::test]
async fn list_students_sends_role_and_bearer() {
    let (server, client) = setup_authenticated().await;

    Mock::given(method("GET"))
        .and(path("/api/users"))
        .and(query_param("role", "STUDENT"))
        .and(header("Authorization", "Bearer tok-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "users": [sample_user("s1", "Alice Souza", "STUDENT")],
            "total": 1,
            "page": 1,
            "limit": 50,
            "totalPages": 1
        })))
        .mount(&server)
        .await;

    let page = client
        .list_users(&UserQuery::role(UserRole::Student))
        .await
        .unwrap();

    assert_eq!(page.total, 1);
    assert_eq!(page.users[0].full_name, "Alice Souza");
    assert_eq!(page.users[0].role, UserRole::Student);
}

#[tokio::test]
async fn unknown_role_deserializes_without_failing() {
    let (server, client) = setup_authenticated().await;

    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "users": [sample_user("x1", "Mystery", "SUPERVISOR")],
            "total": 1,
            "page": 1,
            "limit": 50,
            "totalPages": 1
        })))
        .mount(&server)
        .await;

    let page = client.list_users(&UserQuery::default()).await.unwrap();
    assert_eq!(page.users[0].role, UserRole::Unknown);
}

// ── Payments ────────────────────────────────────────────────────────

#[tokio::test]
async fn list_payments_builds_filter_params() {
    let (server, client) = setup_authenticated().await;

    Mock::given(method("GET"))
        .and(path("/api/payments"))
        .and(query_param("status", "OVERDUE"))
        .and(query_param("referenceYear", "2025"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "payments": [],
            "total": 0,
            "page": 1,
            "limit": 25,
            "totalPages": 0
        })))
        .mount(&server)
        .await;

    let query = PaymentQuery {
        status: Some(PaymentStatus::Overdue),
        reference_year: Some(2025),
        ..PaymentQuery::default()
    };
    let page = client.list_payments(&query).await.unwrap();
    assert_eq!(page.total, 0);
}

#[tokio::test]
async fn create_payment_round_trips() {
    let (server, client) = setup_authenticated().await;

    Mock::given(method("POST"))
        .and(path("/api/payments"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "p1",
            "studentId": "s1",
            "classId": null,
            "amount": 350.0,
            "description": "March tuition",
            "status": "PENDING",
            "dueDate": "2025-03-10T00:00:00Z",
            "paidDate": null,
            "referenceMonth": 3,
            "referenceYear": 2025,
            "notes": null,
            "createdAt": "2025-02-20T12:00:00Z",
            "updatedAt": "2025-02-20T12:00:00Z",
            "student": { "id": "s1", "fullName": "Alice Souza", "email": "s1@school.example" },
            "class": null
        })))
        .mount(&server)
        .await;

    let input = CreatePaymentInput {
        student_id: "s1".into(),
        class_id: None,
        amount: 350.0,
        description: "March tuition".into(),
        due_date: "2025-03-10T00:00:00Z".parse().unwrap(),
        reference_month: 3,
        reference_year: 2025,
        notes: None,
    };
    let payment = client.create_payment(&input).await.unwrap();

    assert_eq!(payment.id, "p1");
    assert_eq!(payment.status, PaymentStatus::Pending);
    assert_eq!(payment.student.full_name, "Alice Souza");
}

#[tokio::test]
async fn mark_paid_hits_pay_endpoint() {
    let (server, client) = setup_authenticated().await;

    Mock::given(method("PATCH"))
        .and(path("/api/payments/p1/pay"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "p1",
            "studentId": "s1",
            "amount": 350.0,
            "description": "March tuition",
            "status": "PAID",
            "dueDate": "2025-03-10T00:00:00Z",
            "paidDate": "2025-03-08T09:30:00Z",
            "referenceMonth": 3,
            "referenceYear": 2025,
            "createdAt": "2025-02-20T12:00:00Z",
            "updatedAt": "2025-03-08T09:30:00Z",
            "student": { "id": "s1", "fullName": "Alice Souza", "email": "s1@school.example" }
        })))
        .mount(&server)
        .await;

    let payment = client
        .mark_payment_paid("p1", &fluente_api::MarkPaidInput::default())
        .await
        .unwrap();
    assert_eq!(payment.status, PaymentStatus::Paid);
    assert!(payment.paid_date.is_some());
}

// ── Error handling ──────────────────────────────────────────────────

#[tokio::test]
async fn structured_error_body_is_decoded() {
    let (server, client) = setup_authenticated().await;

    Mock::given(method("DELETE"))
        .and(path("/api/classes/c9"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "error": "Conflict",
            "message": "Class has active enrollments"
        })))
        .mount(&server)
        .await;

    let result = client.delete_class("c9").await;
    match result {
        Err(Error::Api { status, ref message }) => {
            assert_eq!(status, 409);
            assert!(message.contains("active enrollments"), "got: {message}");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn malformed_success_body_is_a_deserialization_error() {
    let (server, client) = setup_authenticated().await;

    Mock::given(method("GET"))
        .and(path("/api/payments/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let result = client.payment_stats().await;
    assert!(
        matches!(result, Err(Error::Deserialization { .. })),
        "expected Deserialization error, got: {result:?}"
    );
}
