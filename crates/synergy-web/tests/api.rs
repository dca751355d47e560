//! Router-level tests against an in-memory database and the seed workspace.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use synergy_core::auth::Session;
use synergy_core::{seed, store};
use synergy_web::{create_router, state::AppState};
use tower::ServiceExt;

fn test_state() -> AppState {
    let db = Arc::new(synergy_db::init_memory_pool().expect("db"));
    AppState::new(db, seed::workspace(), Session::default(), Duration::ZERO)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request");

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let value = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, value)
}

async fn login(app: &Router, email: &str) -> Value {
    let (status, user) = send(
        app,
        "POST",
        "/api/session/login",
        Some(json!({ "email": email, "password": "whatever" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login {}", email);
    user
}

#[tokio::test]
async fn login_sets_current_user_and_persists() {
    let state = test_state();
    let app = create_router(state.clone());

    let user = login(&app, "john.smith@synergysphere.com").await;
    assert_eq!(user["id"], "2");

    let (status, session) = send(&app, "GET", "/api/session", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(session["currentUser"]["name"], "John Smith");

    let restored = Session::restore(&state.db).expect("restore");
    assert_eq!(restored.require().expect("user").id, "2");

    send(&app, "POST", "/api/session/logout", None).await;
    let (_, session) = send(&app, "GET", "/api/session", None).await;
    assert!(session["currentUser"].is_null());
    assert!(!Session::restore(&state.db).expect("restore").is_authenticated());
}

#[tokio::test]
async fn login_failure_is_unauthorized() {
    let app = create_router(test_state());
    let (status, body) = send(
        &app,
        "POST",
        "/api/session/login",
        Some(json!({ "email": "ghost@synergysphere.com", "password": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, "Invalid credentials");
}

#[tokio::test]
async fn api_requires_login() {
    let app = create_router(test_state());
    let (status, _) = send(&app, "GET", "/api/dashboard", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn completing_a_task_notifies_the_actor() {
    let state = test_state();
    let app = create_router(state.clone());
    login(&app, "admin@synergysphere.com").await;

    let (status, task) = send(&app, "PATCH", "/api/tasks/3", Some(json!({ "status": "done" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(task["status"], "done");

    let (_, list) = send(&app, "GET", "/api/notifications?filter=unread", None).await;
    assert_eq!(list["unreadCount"], 1);
    assert_eq!(list["notifications"][0]["type"], "task_completed");
    assert_eq!(list["notifications"][0]["timeAgo"], "Just now");

    // Saved to the snapshot store.
    let saved = store::load_workspace(&state.db).expect("load");
    assert_eq!(saved.task("3").expect("task").status.as_str(), "done");
}

#[tokio::test]
async fn employee_cannot_touch_other_tasks() {
    let app = create_router(test_state());
    login(&app, "emily.davis@synergysphere.com").await;

    let (status, _) = send(&app, "PATCH", "/api/tasks/1", Some(json!({ "status": "done" }))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, tasks) = send(&app, "GET", "/api/tasks", None).await;
    assert_eq!(tasks.as_array().expect("tasks").len(), 3);

    let (status, _) = send(&app, "GET", "/api/users", None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn employee_tasks_are_self_assigned() {
    let app = create_router(test_state());
    login(&app, "emily.davis@synergysphere.com").await;

    let (status, task) = send(
        &app,
        "POST",
        "/api/tasks",
        Some(json!({
            "title": "Usability study",
            "description": "Five participants",
            "projectId": "1",
            "assigneeId": "2",
            "priority": "medium",
            "dueDate": "2024-06-01",
            "estimatedHours": 6
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(task["assigneeId"], "3");
    assert_eq!(task["assignedBy"], "3");
    assert_eq!(task["timeTracked"], 0.0);
}

#[tokio::test]
async fn deleting_project_removes_its_tasks() {
    let app = create_router(test_state());
    login(&app, "admin@synergysphere.com").await;

    let (status, deletion) = send(&app, "DELETE", "/api/projects/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deletion["removedTasks"], 3);

    let (_, tasks) = send(&app, "GET", "/api/tasks?projectId=1", None).await;
    assert!(tasks.as_array().expect("tasks").is_empty());

    let (status, _) = send(&app, "GET", "/api/projects/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn mark_all_read_only_affects_current_user() {
    let state = test_state();
    let app = create_router(state.clone());
    login(&app, "john.smith@synergysphere.com").await;

    let (status, body) = send(&app, "POST", "/api/notifications/read-all", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["changed"], 1);

    let workspace = state.workspace.read().await;
    assert_eq!(workspace.unread_count("2"), 0);
    assert_eq!(workspace.unread_count("5"), 1);
    assert_eq!(workspace.unread_count("4"), 1);
}

#[tokio::test]
async fn cannot_read_someone_elses_notification() {
    let app = create_router(test_state());
    login(&app, "john.smith@synergysphere.com").await;

    // Notification 3 belongs to Lisa.
    let (status, _) = send(&app, "POST", "/api/notifications/3/read", None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = send(&app, "DELETE", "/api/notifications/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn profile_update_refreshes_session() {
    let state = test_state();
    let app = create_router(state.clone());
    login(&app, "lisa.brown@synergysphere.com").await;

    let (status, user) = send(
        &app,
        "PATCH",
        "/api/profile",
        Some(json!({ "location": "Porto", "skills": "SEO, Copywriting" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["skills"], json!(["SEO", "Copywriting"]));

    let restored = Session::restore(&state.db).expect("restore");
    assert_eq!(restored.require().expect("user").location, "Porto");
}

#[tokio::test]
async fn discussion_post_notifies_teammates() {
    let state = test_state();
    let app = create_router(state.clone());
    login(&app, "john.smith@synergysphere.com").await;

    let (status, post) = send(
        &app,
        "POST",
        "/api/projects/2/discussions",
        Some(json!({ "message": "Auth flow merged" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, threads) = send(&app, "GET", "/api/projects/2/discussions", None).await;
    assert_eq!(threads[0]["id"], post["id"]);

    let workspace = state.workspace.read().await;
    assert_eq!(workspace.notifications[0].user_id, "5");
    drop(workspace);

    // John is not on project 3.
    let (status, _) = send(&app, "POST", "/api/discussions/3/replies", Some(json!({ "message": "hi" }))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn analytics_and_navigation() {
    let app = create_router(test_state());
    login(&app, "mike.wilson@synergysphere.com").await;

    let (status, report) = send(&app, "GET", "/api/analytics", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["totals"]["completionRate"], 40);

    let (_, nav) = send(&app, "GET", "/api/navigation", None).await;
    assert_eq!(nav["items"].as_array().expect("items").len(), 6);
    assert_eq!(nav["unreadNotifications"], 1);

    let (_, swot) = send(&app, "GET", "/api/swot?user=1", None).await;
    assert_eq!(swot["selected"]["userId"], "4");
}

#[tokio::test]
async fn failed_save_leaves_workspace_untouched() {
    let state = test_state();
    let app = create_router(state.clone());
    login(&app, "admin@synergysphere.com").await;
    let notifications_before = state.workspace.read().await.notifications.len();

    state
        .db
        .with_conn(|conn| Ok(conn.execute_batch("DROP TABLE workspace_snapshots")?))
        .expect("drop snapshots");

    let (status, _) = send(&app, "PATCH", "/api/tasks/3", Some(json!({ "status": "done" }))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let workspace = state.workspace.read().await;
    assert_eq!(workspace.task("3").expect("task").status.as_str(), "todo");
    assert_eq!(workspace.notifications.len(), notifications_before);
}

#[tokio::test]
async fn index_renders_login_then_dashboard() {
    let app = create_router(test_state());

    let (status, page) = send(&app, "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(page.as_str().expect("html").contains("Not signed in"));

    login(&app, "admin@synergysphere.com").await;
    let (_, page) = send(&app, "GET", "/", None).await;
    let html = page.as_str().expect("html");
    assert!(html.contains("Welcome back, Sarah Johnson"));
    assert!(html.contains("Users"));
}

#[tokio::test]
async fn internal_notify_accepts_events() {
    let app = create_router(test_state());
    let (status, _) = send(&app, "POST", "/internal/notify", Some(json!({ "type": "DashboardRefresh" }))).await;
    assert_eq!(status, StatusCode::OK);
}
