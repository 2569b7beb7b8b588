// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Router tests.

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode as HttpStatusCode},
};
use civic_pulse::Channel;
use civic_pulse_domain::{AdminId, CitizenId, OfficerId};
use serde_json::{Value, json};
use time::macros::datetime;
use tokio::sync::broadcast;
use tower::ServiceExt;

const FIXTURE: &str = r#"{
    "admins": [{ "id": 1, "name": "Control Room", "email": "admin@example.org" }],
    "citizens": [
        { "id": 100, "name": "Meera Das", "email": "meera@example.org" },
        { "id": 200, "name": "Karan Shah", "email": "karan@example.org" }
    ],
    "officers": [
        { "id": 7, "name": "Ravi Kumar", "email": "ravi@example.org", "department": "CYBER" },
        { "id": 8, "name": "Anita Singh", "email": "anita@example.org", "department": "WATER" }
    ],
    "complaints": [
        {
            "id": 1, "citizen_id": 100, "title": "Phishing call from fake bank",
            "description": "Caller asked for my OTP", "category": "CYBER",
            "assigned_admin_id": 1
        },
        {
            "id": 2, "citizen_id": 100, "title": "Fake courier SMS",
            "description": "Link asked for card details", "category": "CYBER",
            "status": "RESOLVED", "stage": "RESOLVED", "assigned_officer_id": 7,
            "feedback": {
                "rating": 3, "officer_behaviour_rating": 5, "resolution_status": "RESOLVED",
                "timeliness": "DELAYED", "comment": "Took a while", "reopened": false,
                "submitted_at": "2026-03-12T11:00:00Z"
            }
        }
    ]
}"#;

const ADMIN: (i64, &str) = (1, "admin");
const OFFICER: (i64, &str) = (7, "officer");
const WATER_OFFICER: (i64, &str) = (8, "officer");
const CITIZEN: (i64, &str) = (100, "citizen");

/// Helper to create test app state from the fixture.
fn create_test_app_state() -> AppState {
    let persistence: Persistence =
        seed::seed_from_str(FIXTURE, datetime!(2026-03-14 09:30:00 UTC))
            .expect("Failed to load fixture");
    let upload_dir: PathBuf =
        std::env::temp_dir().join(format!("civic-pulse-server-test-{}", uuid::Uuid::new_v4()));
    AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        storage: Arc::new(LocalEvidenceStorage::new(upload_dir)),
        notifier: Arc::new(LiveNotifier::new()),
    }
}

fn json_request(method: &str, uri: &str, actor: Option<(i64, &str)>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some((id, role)) = actor {
        builder = builder
            .header("X-Actor-Id", id.to_string())
            .header("X-Actor-Role", role);
    }
    builder
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str, actor: (i64, &str)) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("X-Actor-Id", actor.0.to_string())
        .header("X-Actor-Role", actor.1)
        .body(Body::empty())
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (HttpStatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status: HttpStatusCode = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn assign_complaint(app: &Router, officer_id: i64) -> (HttpStatusCode, Value) {
    send(
        app,
        json_request(
            "PUT",
            "/api/admin/complaints/1/assign",
            Some(ADMIN),
            &json!({ "officer_id": officer_id }),
        ),
    )
    .await
}

fn drain(rx: &mut broadcast::Receiver<Notification>) -> Vec<Notification> {
    let mut received: Vec<Notification> = Vec::new();
    while let Ok(notification) = rx.try_recv() {
        received.push(notification);
    }
    received
}

// ============================================================================
// Identity
// ============================================================================

#[tokio::test]
async fn test_missing_actor_headers_are_rejected() {
    let app: Router = build_router(create_test_app_state());
    let (status, _) = send(
        &app,
        json_request("GET", "/api/admin/complaints", None, &Value::Null),
    )
    .await;
    assert_eq!(status, HttpStatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unknown_role_is_rejected() {
    let app: Router = build_router(create_test_app_state());
    let (status, _) = send(&app, empty_request("GET", "/api/admin/complaints", (1, "mayor"))).await;
    assert_eq!(status, HttpStatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_wrong_role_is_forbidden() {
    let app: Router = build_router(create_test_app_state());
    let (status, body) = send(&app, empty_request("GET", "/api/admin/complaints", CITIZEN)).await;
    assert_eq!(status, HttpStatusCode::FORBIDDEN);
    assert_eq!(body["error"], json!(true));
}

// ============================================================================
// Lifecycle over HTTP
// ============================================================================

#[tokio::test]
async fn test_submit_complaint_returns_created() {
    let app: Router = build_router(create_test_app_state());
    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/citizen/complaints",
            Some(CITIZEN),
            &json!({
                "title": "Garbage not collected",
                "description": "Three days running",
                "category": "sanitation",
                "priority": "high"
            }),
        ),
    )
    .await;

    assert_eq!(status, HttpStatusCode::CREATED);
    assert_eq!(body["id"], json!(3));
    assert_eq!(body["status"], json!("PENDING"));
    assert_eq!(body["priority"], json!("HIGH"));
}

#[tokio::test]
async fn test_assign_publishes_three_notifications() {
    let app_state: AppState = create_test_app_state();
    let mut rx: broadcast::Receiver<Notification> = app_state.notifier.subscribe();
    let app: Router = build_router(app_state);

    let (status, body) = assign_complaint(&app, 7).await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["status"], json!("IN_PROGRESS"));
    assert_eq!(body["stage"], json!("ASSIGNED"));

    let channels: Vec<Channel> = drain(&mut rx).iter().map(|n| n.channel).collect();
    assert_eq!(
        channels,
        vec![
            Channel::Citizen(CitizenId::new(100)),
            Channel::Officer(OfficerId::new(7)),
            Channel::Admin(AdminId::new(1)),
        ]
    );

    let (_, availability) = send(
        &app,
        empty_request("GET", "/api/admin/officers/availability", ADMIN),
    )
    .await;
    let ravi: &Value = availability
        .as_array()
        .unwrap()
        .iter()
        .find(|row| row["officer_id"] == json!(7))
        .unwrap();
    assert_eq!(ravi["status"], json!("BUSY"));
    assert_eq!(ravi["active_complaints"], json!(1));
}

#[tokio::test]
async fn test_assign_department_mismatch_is_unprocessable() {
    let app_state: AppState = create_test_app_state();
    let mut rx: broadcast::Receiver<Notification> = app_state.notifier.subscribe();
    let app: Router = build_router(app_state);

    let (status, _) = assign_complaint(&app, 8).await;
    assert_eq!(status, HttpStatusCode::UNPROCESSABLE_ENTITY);
    assert!(drain(&mut rx).is_empty());
}

#[tokio::test]
async fn test_unknown_complaint_is_not_found() {
    let app: Router = build_router(create_test_app_state());
    let (status, _) = send(&app, empty_request("GET", "/api/admin/complaints/99", ADMIN)).await;
    assert_eq!(status, HttpStatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_deleted_complaint_conflicts_on_update() {
    let app: Router = build_router(create_test_app_state());
    let (status, body) = send(
        &app,
        empty_request(
            "DELETE",
            "/api/admin/complaints/1?reason=Duplicate%20report",
            ADMIN,
        ),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["deletion_reason"], json!("Duplicate report"));

    let (status, body) = send(
        &app,
        empty_request("GET", "/api/citizen/complaints/deleted", CITIZEN),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
    let ids: Vec<Value> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["id"].clone())
        .collect();
    assert_eq!(ids, vec![json!(1)]);

    let (status, _) = send(
        &app,
        json_request(
            "PUT",
            "/api/admin/complaints/1/status",
            Some(ADMIN),
            &json!({ "status": "RESOLVED" }),
        ),
    )
    .await;
    assert_eq!(status, HttpStatusCode::CONFLICT);

    let (status, body) = send(&app, empty_request("GET", "/api/citizen/complaints/1", CITIZEN)).await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["deleted"], json!(true));
}

#[tokio::test]
async fn test_officer_update_by_non_owner_is_forbidden() {
    let app: Router = build_router(create_test_app_state());
    assign_complaint(&app, 7).await;

    let (status, _) = send(
        &app,
        json_request(
            "PUT",
            "/api/officer/complaints/1",
            Some(WATER_OFFICER),
            &json!({ "status": "RESOLVED" }),
        ),
    )
    .await;
    assert_eq!(status, HttpStatusCode::FORBIDDEN);

    let (_, body) = send(&app, empty_request("GET", "/api/admin/complaints/1", ADMIN)).await;
    assert_eq!(body["status"], json!("IN_PROGRESS"));
}

#[tokio::test]
async fn test_officer_workload_lists_classification() {
    let app: Router = build_router(create_test_app_state());
    assign_complaint(&app, 7).await;

    let (status, body) = send(&app, empty_request("GET", "/api/officers/workload", OFFICER)).await;
    assert_eq!(status, HttpStatusCode::OK);
    let ravi: &Value = body
        .as_array()
        .unwrap()
        .iter()
        .find(|row| row["officer_id"] == json!(7))
        .unwrap();
    assert_eq!(ravi["classification"], json!("BUSY"));
}

#[tokio::test]
async fn test_citizen_deleted_view_is_empty_without_deletions() {
    let app: Router = build_router(create_test_app_state());
    let (status, body) = send(
        &app,
        empty_request("GET", "/api/citizen/complaints/deleted", CITIZEN),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_officer_update_reports_recomputed_status() {
    let app: Router = build_router(create_test_app_state());
    assign_complaint(&app, 7).await;

    let (status, body) = send(
        &app,
        json_request(
            "PUT",
            "/api/officer/complaints/1",
            Some(OFFICER),
            &json!({ "status": "RESOLVED", "remark": "Number blocked" }),
        ),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["status"], json!("RESOLVED"));
    assert_eq!(body["officer_remark"], json!("Number blocked"));
    assert_eq!(body["assigned_officer_status"], json!("AVAILABLE"));
}

// ============================================================================
// Feedback
// ============================================================================

#[tokio::test]
async fn test_officer_reads_seeded_feedback() {
    let app: Router = build_router(create_test_app_state());

    let (status, body) = send(
        &app,
        empty_request("GET", "/api/officer/complaints/2/feedback", OFFICER),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["complaint_id"], json!(2));
    assert_eq!(body["rating"], json!(3));
    assert_eq!(body["timeliness"], json!("DELAYED"));
    assert_eq!(body["submitted_at"], json!("2026-03-12T11:00:00Z"));

    let (status, body) = send(&app, empty_request("GET", "/api/officer/feedbacks", OFFICER)).await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_feedback_of_another_officer_is_forbidden() {
    let app: Router = build_router(create_test_app_state());
    let (status, _) = send(
        &app,
        empty_request("GET", "/api/officer/complaints/2/feedback", WATER_OFFICER),
    )
    .await;
    assert_eq!(status, HttpStatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_missing_feedback_is_not_found() {
    let app: Router = build_router(create_test_app_state());
    assign_complaint(&app, 7).await;

    let (status, _) = send(
        &app,
        empty_request("GET", "/api/officer/complaints/1/feedback", OFFICER),
    )
    .await;
    assert_eq!(status, HttpStatusCode::NOT_FOUND);
}

// ============================================================================
// Evidence
// ============================================================================

fn evidence_request(content_type: &str, bytes: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/officer/complaints/1/evidence?file_name=meter.png")
        .header("X-Actor-Id", OFFICER.0.to_string())
        .header("X-Actor-Role", OFFICER.1)
        .header("content-type", content_type)
        .body(Body::from(bytes))
        .unwrap()
}

#[tokio::test]
async fn test_evidence_upload_is_stored_and_served() {
    let app_state: AppState = create_test_app_state();
    let upload_dir: PathBuf = app_state.storage.root().to_path_buf();
    let app: Router = build_router(app_state);
    assign_complaint(&app, 7).await;

    let (status, body) = send(&app, evidence_request("image/png", vec![0x89; 1024 * 1024])).await;
    assert_eq!(status, HttpStatusCode::OK);
    let url: String = body["evidence_url"].as_str().unwrap().to_string();
    assert!(url.starts_with("/uploads/officer/"));
    assert_eq!(body["assigned_officer_status"], json!("BUSY"));
    assert_eq!(body["assigned_officer_active_complaints"], json!(1));

    let response = app
        .clone()
        .oneshot(Request::builder().uri(&url).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), HttpStatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "image/png"
    );

    std::fs::remove_dir_all(upload_dir).unwrap();
}

#[tokio::test]
async fn test_evidence_upload_rejects_oversized_file() {
    let app: Router = build_router(create_test_app_state());
    assign_complaint(&app, 7).await;

    let (status, body) = send(
        &app,
        evidence_request("image/jpeg", vec![0xff; 6 * 1024 * 1024]),
    )
    .await;
    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("exceeds"));
}

#[tokio::test]
async fn test_evidence_upload_rejects_pdf() {
    let app: Router = build_router(create_test_app_state());
    assign_complaint(&app, 7).await;

    let (status, _) = send(&app, evidence_request("application/pdf", vec![0x25; 64])).await;
    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_evidence_path_traversal_is_not_found() {
    let app: Router = build_router(create_test_app_state());
    let response = app
        .oneshot(
            Request::builder()
                .uri("/uploads/officer/..%2Fsecret.png")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), HttpStatusCode::NOT_FOUND);
}
