//! HTTP-level tests for resource stores and pages.

mod common;

use std::sync::Arc;

use assert_matches::assert_matches;
use opsdesk::models::{new_record_id, Task, TaskPriority, TaskStatus, Vehicle, VehicleStatus};
use opsdesk::{PageOutcome, Resource, ResourcePage, ResourceStore};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{http_transport, TestServer};

fn task_json(id: &str, title: &str, status: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "description": "",
        "location": "Downtown Office",
        "assignee": "Mike Johnson",
        "status": status,
        "priority": "medium",
        "dueDate": "2024-06-10"
    })
}

#[tokio::test]
async fn list_reads_the_collection_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            task_json("t1", "Replace filters", "pending"),
            task_json("t2", "Inspect roof", "completed"),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let mut store: ResourceStore<Task> =
        ResourceStore::new(http_transport(&format!("{}/api", server.uri())));
    let tasks = store.list().await.unwrap();

    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[1].status, TaskStatus::Completed);
    assert!(Arc::ptr_eq(&tasks, &store.cached()));
}

#[tokio::test]
async fn create_posts_the_full_record() {
    let server = MockServer::start().await;
    let record = task_json("t9", "Check alarms", "pending");
    Mock::given(method("POST"))
        .and(path("/api/tasks"))
        .and(body_json(&record))
        .respond_with(ResponseTemplate::new(201).set_body_json(&record))
        .expect(1)
        .mount(&server)
        .await;

    let store: ResourceStore<Task> =
        ResourceStore::new(http_transport(&format!("{}/api", server.uri())));
    let task: Task = serde_json::from_value(record).unwrap();
    let created = store.create(task.clone()).await.unwrap();
    assert_eq!(created, task);
}

#[tokio::test]
async fn update_puts_to_the_record_path() {
    let server = MockServer::start().await;
    let record = task_json("t1", "Replace filters", "in-progress");
    Mock::given(method("PUT"))
        .and(path("/api/tasks/t1"))
        .and(body_json(&record))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let store: ResourceStore<Task> =
        ResourceStore::new(http_transport(&format!("{}/api", server.uri())));
    let task: Task = serde_json::from_value(record).unwrap();
    // an empty body echoes the record that was sent
    let updated = store.update("t1", task.clone()).await.unwrap();
    assert_eq!(updated, task);
}

#[tokio::test]
async fn status_only_acknowledgement_still_refreshes_page() {
    let server = MockServer::start().await;
    let record = task_json("t9", "Check alarms", "pending");
    Mock::given(method("GET"))
        .and(path("/api/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([record.clone()])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/tasks"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"id": "t9", "success": true})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let store = ResourceStore::new(http_transport(&format!("{}/api", server.uri())));
    let mut page: ResourcePage<Task> = ResourcePage::new(store).with_seed_on_empty(false);
    let task: Task = serde_json::from_value(record).unwrap();

    assert_eq!(page.submit_create(task).await, PageOutcome::Applied);
    assert_eq!(page.error(), None);
    assert_eq!(page.rows().len(), 1);
    assert_eq!(page.rows()[0].title, "Check alarms");
}

#[tokio::test]
async fn delete_of_missing_record_reports_status() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/tasks/nope"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let store: ResourceStore<Task> =
        ResourceStore::new(http_transport(&format!("{}/api", server.uri())));
    let err = store.delete("nope").await.unwrap_err();
    assert_eq!(err.message(), "Failed to delete tasks: 404 Not Found");
}

#[tokio::test]
async fn failed_update_leaves_page_rows_untouched() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tasks"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([task_json("t1", "Replace filters", "pending")])),
        )
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/tasks/t1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database offline"))
        .mount(&server)
        .await;

    let store = ResourceStore::new(http_transport(&format!("{}/api", server.uri())));
    let mut page: ResourcePage<Task> = ResourcePage::new(store).with_seed_on_empty(false);
    assert_eq!(page.load().await, PageOutcome::Applied);
    let before = page.rows();

    assert!(page.open_edit("t1"));
    page.edit_buffer_mut().unwrap().status = TaskStatus::Completed;
    assert_eq!(page.submit_edit().await, PageOutcome::Failed);

    assert!(Arc::ptr_eq(&before, &page.rows()));
    assert_eq!(page.rows()[0].status, TaskStatus::Pending);
    assert_eq!(
        page.error(),
        Some("Failed to update tasks: 500 Internal Server Error (database offline)")
    );
    assert!(!page.mode().is_closed());
    assert!(!page.is_loading());
}

#[tokio::test]
async fn unreachable_service_surfaces_banner() {
    // nothing listens on the discard port
    let store = ResourceStore::new(http_transport("http://127.0.0.1:9/api"));
    let mut page: ResourcePage<Vehicle> = ResourcePage::new(store);
    assert_eq!(page.load().await, PageOutcome::Failed);
    assert_matches!(page.error(), Some(msg) if msg.starts_with("Failed to list vehicles"));
    assert!(page.rows().is_empty());
}

#[tokio::test]
async fn empty_collection_is_seeded_once() {
    let server = TestServer::spawn().await;

    let mut first: ResourcePage<Vehicle> =
        ResourcePage::new(ResourceStore::new(server.transport())).with_defaults(Vehicle::defaults());
    assert_eq!(first.load().await, PageOutcome::Applied);
    assert_eq!(first.rows().len(), Vehicle::defaults().len());

    let mut second: ResourcePage<Vehicle> =
        ResourcePage::new(ResourceStore::new(server.transport())).with_defaults(Vehicle::defaults());
    assert_eq!(second.load().await, PageOutcome::Applied);

    assert_eq!(server.backend.len("vehicles"), Vehicle::defaults().len());
    assert_eq!(second.rows().len(), Vehicle::defaults().len());
}

#[tokio::test]
async fn create_toggle_and_delete_round_trip() {
    let server = TestServer::spawn().await;
    let store = ResourceStore::new(server.transport());
    let mut page: ResourcePage<Task> = ResourcePage::new(store).with_seed_on_empty(false);
    assert_eq!(page.load().await, PageOutcome::Applied);
    assert!(page.rows().is_empty());

    let id = new_record_id();
    let task = Task {
        id: id.clone(),
        title: "Service HVAC unit".to_string(),
        description: "Quarterly service".to_string(),
        location: "North Warehouse".to_string(),
        assignee: "Sarah Williams".to_string(),
        status: TaskStatus::Pending,
        priority: TaskPriority::High,
        due_date: "2024-07-01".to_string(),
    };
    assert_eq!(page.submit_create(task).await, PageOutcome::Applied);
    assert_eq!(page.rows().len(), 1);

    let outcome = page
        .submit_update(&id, |t| t.status = TaskStatus::Completed)
        .await;
    assert_eq!(outcome, PageOutcome::Applied);
    assert_eq!(page.rows()[0].status, TaskStatus::Completed);
    assert_eq!(page.rows()[0].title, "Service HVAC unit");

    assert!(page.open_delete(&id));
    assert_eq!(page.submit_delete().await, PageOutcome::Applied);
    assert!(page.rows().is_empty());
    assert!(server.backend.is_empty("tasks"));
}

#[tokio::test]
async fn invalid_record_is_rejected_before_sending() {
    let server = TestServer::spawn().await;
    let store = ResourceStore::new(server.transport());
    let mut page: ResourcePage<Vehicle> = ResourcePage::new(store).with_seed_on_empty(false);
    page.load().await;

    let mut vehicle = Vehicle::defaults().remove(0);
    vehicle.id = new_record_id();
    vehicle.make.clear();
    vehicle.status = VehicleStatus::Operational;

    assert_eq!(page.submit_create(vehicle).await, PageOutcome::Failed);
    assert_matches!(page.error(), Some(msg) if msg.starts_with("Validation error"));
    assert!(server.backend.is_empty("vehicles"));
}
