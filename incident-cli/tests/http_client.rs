use incident_cli::HttpIncidentApi;
use incident_core::{ApiConfig, ApiError, IncidentApi, QueryState, SortField};
use incident_model::{IncidentId, IncidentUpdate, NewIncident, Service, Severity, Status};
use serde_json::json;
use std::collections::HashMap;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn incident_json(id: &str, status: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": "Checkout latency",
        "service": "Payments",
        "severity": "SEV2",
        "status": status,
        "owner": "alice",
        "summary": "p99 above 2s",
        "createdAt": "2024-03-01T10:15:00",
        "updatedAt": "2024-03-01T11:00:00"
    })
}

fn client(server: &MockServer) -> HttpIncidentApi {
    HttpIncidentApi::new(ApiConfig::new(format!("{}/api", server.uri())))
}

async fn only_query(server: &MockServer) -> HashMap<String, String> {
    let requests = server.received_requests().await.unwrap_or_default();
    assert_eq!(requests.len(), 1);
    requests[0].url.query_pairs().into_owned().collect()
}

#[tokio::test]
async fn list_sends_defaults_and_omits_empty_filters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/incidents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [incident_json("1", "OPEN")],
            "totalPages": 3,
            "number": 0
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = client(&server)
        .list_incidents(&QueryState::default())
        .await
        .unwrap();
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.content.len(), 1);

    let query = only_query(&server).await;
    assert_eq!(query.get("page").map(String::as_str), Some("0"));
    assert_eq!(query.get("size").map(String::as_str), Some("10"));
    assert_eq!(query.get("sort").map(String::as_str), Some("createdAt,desc"));
    for absent in ["title", "service", "severity", "status"] {
        assert!(!query.contains_key(absent), "{absent} should not be sent");
    }
}

#[tokio::test]
async fn list_sends_active_filters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/incidents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [],
            "totalPages": 0,
            "number": 2
        })))
        .mount(&server)
        .await;

    let mut state = QueryState::default();
    state.toggle_sort(SortField::Severity);
    state.set_search("db down".into());
    state.set_service(Some(Service::Database));
    state.set_status(Some(Status::Mitigated));
    state.page = 2;

    let page = client(&server).list_incidents(&state).await.unwrap();
    assert!(page.content.is_empty());

    let query = only_query(&server).await;
    assert_eq!(query.get("page").map(String::as_str), Some("2"));
    assert_eq!(query.get("sort").map(String::as_str), Some("severity,asc"));
    assert_eq!(query.get("title").map(String::as_str), Some("db down"));
    assert_eq!(query.get("service").map(String::as_str), Some("Database"));
    assert_eq!(query.get("status").map(String::as_str), Some("MITIGATED"));
    assert!(!query.contains_key("severity"));
}

#[tokio::test]
async fn list_accepts_legacy_page_shape() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/incidents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "incidents": [incident_json("7", "RESOLVED")],
            "totalPages": 1
        })))
        .mount(&server)
        .await;

    let page = client(&server)
        .list_incidents(&QueryState::default())
        .await
        .unwrap();
    assert_eq!(page.content[0].id, IncidentId::new("7"));
    assert_eq!(page.content[0].status, Status::Resolved);
    assert_eq!(page.number, 0);
}

#[tokio::test]
async fn get_decodes_incident() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/incidents/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(incident_json("42", "OPEN")))
        .mount(&server)
        .await;

    let incident = client(&server)
        .get_incident(&IncidentId::new("42"))
        .await
        .unwrap();
    assert_eq!(incident.title, "Checkout latency");
    assert_eq!(incident.severity, Severity::Sev2);
    assert_eq!(incident.owner.as_deref(), Some("alice"));
    assert!(incident.created_at.is_some());
}

#[tokio::test]
async fn create_posts_every_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/incidents"))
        .and(body_json(json!({
            "title": "Login errors",
            "service": "Auth",
            "severity": "SEV1",
            "status": "OPEN",
            "owner": "",
            "summary": "500s on /login"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(incident_json("9", "OPEN")))
        .expect(1)
        .mount(&server)
        .await;

    let payload = NewIncident {
        title: "Login errors".into(),
        service: Service::Auth,
        severity: Severity::Sev1,
        status: Status::Open,
        owner: String::new(),
        summary: "500s on /login".into(),
    };
    let created = client(&server).create_incident(&payload).await.unwrap();
    assert_eq!(created.id, IncidentId::new("9"));
}

#[tokio::test]
async fn update_patches_only_present_fields() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/incidents/42"))
        .and(body_json(json!({ "status": "MITIGATED" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(incident_json("42", "MITIGATED")))
        .expect(1)
        .mount(&server)
        .await;

    let update = IncidentUpdate {
        status: Some(Status::Mitigated),
        ..IncidentUpdate::default()
    };
    let updated = client(&server)
        .update_incident(&IncidentId::new("42"), &update)
        .await
        .unwrap();
    assert_eq!(updated.status, Status::Mitigated);
}

#[tokio::test]
async fn non_success_status_carries_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/incidents/404"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Incident not found"))
        .mount(&server)
        .await;

    let err = client(&server)
        .get_incident(&IncidentId::new("404"))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    match err {
        ApiError::Status { status, body } => {
            assert_eq!(status, 404);
            assert_eq!(body, "Incident not found");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/incidents/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client(&server)
        .get_incident(&IncidentId::new("1"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let api = HttpIncidentApi::new(ApiConfig::new("http://127.0.0.1:9/api"));
    let err = api
        .list_incidents(&QueryState::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}
