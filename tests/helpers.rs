#![allow(dead_code)]

use once_cell::sync::Lazy;
use poem::{
    handler,
    http::StatusCode,
    listener::{Acceptor, Listener, TcpListener},
    post,
    web::{Data, Json},
    Endpoint, EndpointExt, IntoResponse, Response, Route, Server,
};
use serde_json::{json, Value};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};
use std::time::Duration;
use vc_relay::configuration::UpstreamSettings;
use vc_relay::state::RelayState;
use vc_relay::telemetry::{get_subscriber, init_subscriber};

// Ensure that the `tracing` stack is only initialised once using `once_cell`
static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    };
});

pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
}

impl TestApp {
    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> reqwest::Response {
        self.client
            .post(format!("{}{}", self.address, path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_raw(
        &self,
        path: &str,
        body: &'static str,
        content_type: Option<&str>,
    ) -> reqwest::Response {
        let mut request = self
            .client
            .post(format!("{}{}", self.address, path))
            .body(body);
        if let Some(content_type) = content_type {
            request = request.header("Content-Type", content_type);
        }
        request.send().await.expect("Failed to execute request.")
    }
}

/// A request received by the mock upstream.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub path: String,
    pub body: Value,
}

/// Shared between the mock upstream server and the test body.
#[derive(Clone, Default)]
pub struct MockUpstream {
    pub address: String,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    issued: Arc<AtomicUsize>,
    fail_with: Option<StatusCode>,
    // None fails every path
    fail_on: Option<&'static str>,
    delay: Option<Duration>,
}

impl MockUpstream {
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, path: &str) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|call| call.path == path)
            .collect()
    }

    async fn record(&self, path: &str, body: Value) -> Option<Response> {
        self.calls.lock().unwrap().push(RecordedCall {
            path: path.to_string(),
            body,
        });
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match (self.fail_with, self.fail_on) {
            (Some(status), None) => Some(status),
            (Some(status), Some(failing)) if failing == path => Some(status),
            _ => None,
        }
        .map(|status| (status, Json(json!({ "message": "upstream refused" }))).into_response())
    }
}

#[handler]
async fn mock_verify(body: Json<Value>, upstream: Data<&MockUpstream>) -> Response {
    let received = body.0;
    if let Some(failure) = upstream.record("/verify-credential", received.clone()).await {
        return failure;
    }
    Json(json!({
        "verified": true,
        "checks": ["proof"],
        "received": received,
    }))
    .into_response()
}

#[handler]
async fn mock_issue(body: Json<Value>, upstream: Data<&MockUpstream>) -> Response {
    let request = body.0;
    if let Some(failure) = upstream.record("/issue-credential", request.clone()).await {
        return failure;
    }
    let serial = upstream.issued.fetch_add(1, Ordering::SeqCst) + 1;
    let mut subject = request["claims"].clone();
    subject["id"] = request["subject"].clone();
    Json(issued_credential(serial, subject)).into_response()
}

pub fn issued_credential(serial: usize, subject: Value) -> Value {
    json!({
        "@context": ["https://www.w3.org/2018/credentials/v1"],
        "id": format!("urn:uuid:demo-{}", serial),
        "type": ["VerifiableCredential"],
        "issuer": { "id": "did:ethr:sepolia:0xissuer" },
        "issuanceDate": "2024-05-01T10:00:00Z",
        "credentialSubject": subject,
        "proof": {
            "type": "JwtProof2020",
            "created": "2024-05-01T10:00:00Z",
            "verificationMethod": "did:ethr:sepolia:0xissuer#controller",
            "proofPurpose": "assertionMethod",
            "jwt": format!("header.payload-{}.signature", serial)
        }
    })
}

async fn serve<E>(ep: E) -> String
where
    E: Endpoint + 'static,
{
    let acceptor = TcpListener::bind("127.0.0.1:0".to_string())
        .into_acceptor()
        .await
        .expect("Failed to bind random port");
    let port = acceptor.local_addr()[0]
        .as_socket_addr()
        .expect("tcp listener has a socket address")
        .port();
    // Launch the server as a background task
    let _ = tokio::spawn(Server::new_with_acceptor(acceptor).run(ep));
    format!("http://127.0.0.1:{}", port)
}

async fn spawn_mock(mut upstream: MockUpstream) -> MockUpstream {
    let app = Route::new()
        .at("/verify-credential", post(mock_verify))
        .at("/issue-credential", post(mock_issue))
        .data(upstream.clone());
    upstream.address = serve(app).await;
    upstream
}

/// Mock VC service answering every call successfully.
pub async fn spawn_upstream() -> MockUpstream {
    spawn_mock(MockUpstream::default()).await
}

/// Mock VC service answering every call with `status`.
pub async fn spawn_failing_upstream(status: StatusCode) -> MockUpstream {
    spawn_mock(MockUpstream {
        fail_with: Some(status),
        ..Default::default()
    })
    .await
}

/// Mock VC service answering `path` with `status` and everything else
/// successfully.
pub async fn spawn_upstream_failing_on(path: &'static str, status: StatusCode) -> MockUpstream {
    spawn_mock(MockUpstream {
        fail_with: Some(status),
        fail_on: Some(path),
        ..Default::default()
    })
    .await
}

/// Mock VC service that waits `delay` before answering.
pub async fn spawn_slow_upstream(delay: Duration) -> MockUpstream {
    spawn_mock(MockUpstream {
        delay: Some(delay),
        ..Default::default()
    })
    .await
}

/// Address nothing listens on, for connection refusal.
pub fn unused_address() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    format!("http://127.0.0.1:{}", port)
}

// Launch our application in the background
pub async fn spawn_app(upstream: UpstreamSettings) -> TestApp {
    // The first time `initialize` is invoked the code in `TRACING` is executed.
    // All other invocations will instead skip execution.
    Lazy::force(&TRACING);

    let state = RelayState::new(&upstream).expect("Failed to build upstream client.");
    let address = serve(vc_relay::app(state)).await;

    TestApp {
        address,
        client: reqwest::Client::new(),
    }
}
