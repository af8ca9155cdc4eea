#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use school_health::api::ApiClient;
use school_health::api::errors::{ApiError, ApiResult};
use school_health::transport::{ApiRequest, Method, Transport};
use serde_json::Value;

/// Canned answer of the stub backend.
#[derive(Clone, Debug)]
pub enum Reply {
    Json(Value),
    Status(u16, String),
    Offline,
}

/// In-memory transport answering by verb and path and recording every
/// request it receives.
#[derive(Default)]
pub struct StubTransport {
    replies: Mutex<HashMap<(Method, String), Reply>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl StubTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reply(&self, method: Method, path: &str, reply: Reply) {
        self.replies
            .lock()
            .expect("replies lock")
            .insert((method, path.to_string()), reply);
    }

    pub fn json(&self, method: Method, path: &str, body: Value) {
        self.reply(method, path, Reply::Json(body));
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().expect("requests lock").clone()
    }

    pub fn last_request(&self) -> ApiRequest {
        self.requests()
            .pop()
            .expect("at least one request was sent")
    }
}

impl Transport for StubTransport {
    fn send(&self, request: &ApiRequest) -> ApiResult<Value> {
        self.requests
            .lock()
            .expect("requests lock")
            .push(request.clone());

        let reply = self
            .replies
            .lock()
            .expect("replies lock")
            .get(&(request.method, request.path.clone()))
            .cloned();

        match reply {
            Some(Reply::Json(body)) => Ok(body),
            Some(Reply::Status(status, message)) => Err(ApiError::Server { status, message }),
            Some(Reply::Offline) => Err(ApiError::Network("connection refused".to_string())),
            None => Err(ApiError::Server {
                status: 404,
                message: format!("no route for {} {}", request.method, request.path),
            }),
        }
    }
}

/// API client backed by a fresh stub.
pub fn stub_client() -> (ApiClient, Arc<StubTransport>) {
    let stub = StubTransport::new();
    let client = ApiClient::new(stub.clone());
    (client, stub)
}
