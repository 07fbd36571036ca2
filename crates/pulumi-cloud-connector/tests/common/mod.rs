// crates/pulumi-cloud-connector/tests/common/mod.rs
// ============================================================================
// Module: Common Test Fixtures
// Description: In-process Pulumi Cloud stand-in for connector tests.
// Purpose: Serve canned API responses over HTTP and record every request.
// Dependencies: pulumi-cloud-config, pulumi-cloud-connector, tiny_http
// ============================================================================

//! ## Overview
//! [`MockPulumi`] binds `tiny_http` to an ephemeral local port, answers
//! requests by exact method and URL, and records what the connector sent.
//! Unknown routes answer 404 so unexpected calls fail loudly.

#![allow(dead_code, reason = "Shared test helpers may be unused in some cases.")]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::sync::Mutex;
use std::thread;
use std::thread::JoinHandle;

use pulumi_cloud_config::ApiConfig;
use pulumi_cloud_config::ConnectorConfig;
use pulumi_cloud_connector::PulumiConnector;
use serde_json::Value;
use tiny_http::Header;
use tiny_http::Request;
use tiny_http::Response;
use tiny_http::Server;

// ============================================================================
// SECTION: Routes and Records
// ============================================================================

/// Canned response for one method and URL.
#[derive(Debug, Clone)]
pub struct Route {
    /// HTTP method.
    pub method: &'static str,
    /// Path and query, exactly as sent.
    pub url: String,
    /// Response status.
    pub status: u16,
    /// Response body.
    pub body: String,
}

impl Route {
    /// Answers with a JSON document and status 200.
    pub fn json(method: &'static str, url: impl Into<String>, body: &Value) -> Self {
        Self {
            method,
            url: url.into(),
            status: 200,
            body: body.to_string(),
        }
    }

    /// Answers with an empty body and status 204.
    pub fn no_content(method: &'static str, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            status: 204,
            body: String::new(),
        }
    }

    /// Answers with an arbitrary status and body.
    pub fn raw(method: &'static str, url: impl Into<String>, status: u16, body: &str) -> Self {
        Self {
            method,
            url: url.into(),
            status,
            body: body.to_string(),
        }
    }
}

/// Request observed by [`MockPulumi`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// HTTP method.
    pub method: String,
    /// Path and query.
    pub url: String,
    /// Request body.
    pub body: String,
    /// `Authorization` header value.
    pub authorization: Option<String>,
    /// Every `Accept` header value in order.
    pub accept: Vec<String>,
    /// `Content-Type` header value.
    pub content_type: Option<String>,
}

impl RecordedRequest {
    /// Parses the body as JSON.
    pub fn json_body(&self) -> Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

// ============================================================================
// SECTION: Server
// ============================================================================

/// Local Pulumi Cloud stand-in.
pub struct MockPulumi {
    /// Base URL of the server.
    base_url: String,
    /// Listening server.
    server: Arc<Server>,
    /// Requests observed so far.
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    /// Worker thread.
    handle: Option<JoinHandle<()>>,
}

impl MockPulumi {
    /// Starts a server answering `routes`.
    pub fn start(routes: Vec<Route>) -> Self {
        let server = Arc::new(Server::http("127.0.0.1:0").unwrap());
        let addr = server.server_addr().to_ip().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let worker = Arc::clone(&server);
        let log = Arc::clone(&requests);
        let handle = thread::spawn(move || {
            for mut request in worker.incoming_requests() {
                let recorded = record(&mut request);
                let route = routes
                    .iter()
                    .find(|route| route.method == recorded.method && route.url == recorded.url);
                let (status, body) = route.map_or_else(
                    || (404, r#"{"message":"no route"}"#.to_string()),
                    |route| (route.status, route.body.clone()),
                );
                log.lock().unwrap().push(recorded);
                let header = Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
                    .unwrap();
                let response =
                    Response::from_string(body).with_status_code(status).with_header(header);
                let _ = request.respond(response);
            }
        });
        Self {
            base_url: format!("http://{addr}"),
            server,
            requests,
            handle: Some(handle),
        }
    }

    /// Returns the server base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the requests observed so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Returns connector configuration pointed at this server.
    pub fn config(&self, org_name: &str) -> ConnectorConfig {
        ConnectorConfig {
            access_token: "pul-test-token".to_string(),
            org_name: org_name.to_string(),
            api: ApiConfig {
                base_url: self.base_url.clone(),
                allow_http: true,
                timeout_ms: 5_000,
                ..ApiConfig::default()
            },
        }
    }

    /// Builds a connector for `org_name` against this server.
    pub fn connector(&self, org_name: &str) -> PulumiConnector {
        let config = self.config(org_name);
        config.validate().unwrap();
        PulumiConnector::from_config(&config).unwrap()
    }
}

impl Drop for MockPulumi {
    fn drop(&mut self) {
        self.server.unblock();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// Captures the parts of a request the tests assert on.
fn record(request: &mut Request) -> RecordedRequest {
    let mut body = String::new();
    let _ = request.as_reader().read_to_string(&mut body);
    let header = |name: &'static str| {
        request
            .headers()
            .iter()
            .filter(|header| header.field.equiv(name))
            .map(|header| header.value.as_str().to_string())
            .collect::<Vec<_>>()
    };
    RecordedRequest {
        method: request.method().to_string(),
        url: request.url().to_string(),
        authorization: header("Authorization").into_iter().next(),
        accept: header("Accept"),
        content_type: header("Content-Type").into_iter().next(),
        body,
    }
}

// ============================================================================
// SECTION: Payloads
// ============================================================================

/// Builds a member listing payload entry.
pub fn member_json(login: &str, name: &str, role: &str) -> Value {
    serde_json::json!({
        "role": role,
        "user": {
            "name": name,
            "githubLogin": login,
            "avatarUrl": format!("https://avatars/{login}")
        },
        "created": "2024-05-01T00:00:00Z",
        "knownToPulumi": true,
        "virtualAdmin": false
    })
}
