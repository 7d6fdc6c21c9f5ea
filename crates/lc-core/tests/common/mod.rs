#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use async_trait::async_trait;
use lc_core::session::StaticSession;
use lc_core::transport::{ApiRequest, ApiResponse, Method, Transport, TransportError};
use lc_core::ApiClient;

pub const BASE: &str = "http://api.test";

/// In-memory transport answering from a script keyed by method and path.
/// Unscripted requests get a 404.
#[derive(Default)]
pub struct FakeTransport {
    script: RefCell<HashMap<(Method, String), Result<ApiResponse, TransportError>>>,
    calls: RefCell<Vec<ApiRequest>>,
}

impl FakeTransport {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn reply(&self, method: Method, path: &str, status: u16, body: serde_json::Value) {
        self.script.borrow_mut().insert(
            (method, path.to_string()),
            Ok(ApiResponse::new(status, body.to_string())),
        );
    }

    pub fn reply_raw(&self, method: Method, path: &str, status: u16, body: &str) {
        self.script
            .borrow_mut()
            .insert((method, path.to_string()), Ok(ApiResponse::new(status, body)));
    }

    pub fn refuse(&self, method: Method, path: &str) {
        self.script.borrow_mut().insert(
            (method, path.to_string()),
            Err(TransportError::new("connection refused")),
        );
    }

    pub fn calls(&self) -> Vec<ApiRequest> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

#[async_trait(?Send)]
impl Transport for FakeTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let path = request
            .url
            .strip_prefix(BASE)
            .unwrap_or(&request.url)
            .to_string();
        let key = (request.method, path);
        self.calls.borrow_mut().push(request);
        self.script
            .borrow()
            .get(&key)
            .cloned()
            .unwrap_or_else(|| Ok(ApiResponse::new(404, r#"{"detail":"Not found."}"#)))
    }
}

pub type TestClient = ApiClient<Rc<FakeTransport>, StaticSession>;

pub fn client(fake: &Rc<FakeTransport>, token: Option<&str>) -> TestClient {
    let session = match token {
        Some(t) => StaticSession::new(t).with_username("ravi_agent"),
        None => StaticSession::anonymous(),
    };
    ApiClient::new(Rc::clone(fake), session, format!("{BASE}/"))
}
