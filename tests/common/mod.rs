//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use opsdesk::mock_server;
use opsdesk::models::{ActiveStatus, Employee};
use opsdesk::{HttpTransport, MemoryBackend, ResourceTransport};
use tokio::task::JoinHandle;

/// A running in-memory resource server bound to an ephemeral port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub backend: MemoryBackend,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn spawn() -> Self {
        Self::spawn_with(MemoryBackend::new()).await
    }

    pub async fn spawn_with(backend: MemoryBackend) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral port");
        let addr = listener.local_addr().expect("local addr");
        let app = mock_server::router(backend.clone());
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock server");
        });
        Self {
            addr,
            backend,
            handle,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    pub fn transport(&self) -> Arc<dyn ResourceTransport> {
        http_transport(&self.base_url())
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub fn http_transport(base_url: &str) -> Arc<dyn ResourceTransport> {
    Arc::new(HttpTransport::new(reqwest::Client::new(), base_url).expect("valid base url"))
}

pub fn employee(id: &str, name: &str, department: &str, status: ActiveStatus) -> Employee {
    let handle = name.to_lowercase().replace(' ', ".");
    Employee {
        id: id.to_string(),
        name: name.to_string(),
        email: format!("{}@example.com", handle),
        phone: String::new(),
        department: department.to_string(),
        position: "Technician".to_string(),
        status,
        location: "Downtown Office".to_string(),
        hire_date: "2022-01-10".to_string(),
    }
}

pub fn roster() -> Vec<Employee> {
    vec![
        employee("e1", "Mike Johnson", "Facilities", ActiveStatus::Active),
        employee("e2", "Sarah Williams", "Operations", ActiveStatus::Active),
        employee("e3", "Tom Baker", "Facilities", ActiveStatus::Inactive),
        employee("e4", "Priya Natarajan", "Security", ActiveStatus::Active),
    ]
}
