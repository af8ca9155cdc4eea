//! Request description and the pluggable transport that executes it.
//!
//! [`Transport`] is the only seam between the API wrappers and the network:
//! [`HttpTransport`] sends requests with `reqwest`, tests substitute stubs.

use std::fmt::{Display, Formatter};

use serde::Serialize;
use serde_json::Value;

use crate::api::errors::{ApiError, ApiResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub const fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl Display for Method {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One API call: verb, path relative to the base URL, query and JSON body.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub body: Option<Value>,
}

impl ApiRequest {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: None,
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Serializes `query` the way `URLSearchParams` would; `None` fields are
    /// expected to be skipped by the query type itself.
    pub fn with_query<Q: Serialize + ?Sized>(mut self, query: &Q) -> ApiResult<Self> {
        let encoded = serde_html_form::to_string(query)
            .map_err(|e| ApiError::InvalidRequest(format!("query encoding: {e}")))?;
        self.query = (!encoded.is_empty()).then_some(encoded);
        Ok(self)
    }

    pub fn with_json<B: Serialize + ?Sized>(mut self, body: &B) -> ApiResult<Self> {
        let body = serde_json::to_value(body)
            .map_err(|e| ApiError::InvalidRequest(format!("body encoding: {e}")))?;
        self.body = Some(body);
        Ok(self)
    }

    pub fn path_and_query(&self) -> String {
        match &self.query {
            Some(query) => format!("{}?{}", self.path, query),
            None => self.path.clone(),
        }
    }
}

/// Executes a request and returns the decoded JSON body.
///
/// Non-2xx answers are reported as [`ApiError::Server`]; an empty body is
/// returned as `Value::Null`.
pub trait Transport: Send + Sync {
    fn send(&self, request: &ApiRequest) -> ApiResult<Value>;
}

/// Pluggable bearer-token provider consulted before every request.
///
/// Returning `Ok(None)` sends the request without an `Authorization` header.
pub trait TokenSource: Send + Sync {
    fn token(&self) -> ApiResult<Option<String>>;
}

/// Anonymous requests.
pub struct NoAuth;

impl TokenSource for NoAuth {
    fn token(&self) -> ApiResult<Option<String>> {
        Ok(None)
    }
}

/// Token obtained outside this crate (e.g. after logging in through the backend).
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl TokenSource for StaticToken {
    fn token(&self) -> ApiResult<Option<String>> {
        Ok(Some(self.0.clone()))
    }
}

/// Human-readable message from an error body: its `message`/`error` field
/// when the body is JSON, the raw text otherwise.
pub fn error_message(body: &str) -> String {
    let trimmed = body.trim();
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(trimmed) {
        if let Some(message) = ["message", "error", "errorMessage"]
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_str))
        {
            return message.to_string();
        }
    }
    if trimmed.is_empty() {
        "empty response".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(feature = "client")]
pub use http::HttpTransport;

#[cfg(feature = "client")]
mod http {
    use std::sync::Arc;
    use std::time::Duration;

    use serde_json::Value;

    use super::{ApiRequest, Method, TokenSource, Transport, error_message};
    use crate::api::errors::{ApiError, ApiResult};

    /// Blocking `reqwest` transport rooted at the backend base URL.
    pub struct HttpTransport {
        http: reqwest::blocking::Client,
        base_url: String,
        token_source: Arc<dyn TokenSource>,
    }

    impl HttpTransport {
        pub fn new(
            base_url: impl Into<String>,
            token_source: Arc<dyn TokenSource>,
            timeout: Duration,
        ) -> ApiResult<Self> {
            let http = reqwest::blocking::Client::builder()
                .timeout(timeout)
                .build()?;
            Ok(Self {
                http,
                base_url: base_url.into().trim_end_matches('/').to_string(),
                token_source,
            })
        }

        pub fn base_url(&self) -> &str {
            &self.base_url
        }
    }

    impl Transport for HttpTransport {
        fn send(&self, request: &ApiRequest) -> ApiResult<Value> {
            let url = format!("{}{}", self.base_url, request.path_and_query());
            let mut builder = match request.method {
                Method::Get => self.http.get(&url),
                Method::Post => self.http.post(&url),
                Method::Put => self.http.put(&url),
                Method::Delete => self.http.delete(&url),
            };

            if let Some(token) = self.token_source.token()? {
                builder = builder.bearer_auth(token);
            }
            if let Some(body) = &request.body {
                builder = builder.json(body);
            }

            log::debug!("{} {}", request.method, url);
            let response = builder.send()?;
            let status = response.status();
            let text = response.text()?;

            if !status.is_success() {
                log::warn!("{} {} answered {}", request.method, url, status);
                return Err(ApiError::Server {
                    status: status.as_u16(),
                    message: error_message(&text),
                });
            }

            if text.trim().is_empty() {
                return Ok(Value::Null);
            }
            serde_json::from_str(&text).map_err(ApiError::from)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Query {
        page: u64,
        #[serde(skip_serializing_if = "Option::is_none")]
        child_id: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        search: Option<String>,
    }

    #[test]
    fn query_skips_absent_fields_and_encodes_values() {
        let request = ApiRequest::get("/medical-orders")
            .with_query(&Query {
                page: 2,
                child_id: None,
                search: Some("sởi & cúm".to_string()),
            })
            .unwrap();
        let rendered = request.path_and_query();
        assert!(rendered.starts_with("/medical-orders?page=2&search="));
        assert!(!rendered.contains("childId"));
        assert!(!rendered.contains(' '));
        assert!(!rendered.contains("& "));
    }

    #[test]
    fn empty_query_leaves_path_untouched() {
        let request = ApiRequest::get("/childs/all")
            .with_query(&Query {
                page: 1,
                child_id: None,
                search: None,
            })
            .unwrap();
        assert_eq!(request.path_and_query(), "/childs/all?page=1");

        let bare = ApiRequest::delete("/child/delete/c1");
        assert_eq!(bare.path_and_query(), "/child/delete/c1");
        assert_eq!(bare.method.to_string(), "DELETE");
    }

    #[test]
    fn json_body_is_attached() {
        let request = ApiRequest::post("/childs/add")
            .with_json(&json!({"fullName": "An"}))
            .unwrap();
        assert_eq!(request.body, Some(json!({"fullName": "An"})));
    }

    #[test]
    fn error_message_prefers_json_message() {
        assert_eq!(
            error_message(r#"{"isSuccess":false,"message":"Không tìm thấy"}"#),
            "Không tìm thấy"
        );
        assert_eq!(error_message("Bad Gateway"), "Bad Gateway");
        assert_eq!(error_message("  "), "empty response");
    }

    #[test]
    fn token_sources() {
        assert_eq!(NoAuth.token().unwrap(), None);
        assert_eq!(
            StaticToken::new("abc").token().unwrap().as_deref(),
            Some("abc")
        );
    }
}
