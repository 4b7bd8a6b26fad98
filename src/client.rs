//! Casdoor REST client.
//!
//! Every Casdoor object kind is managed through the same four endpoints:
//!
//! | Operation | Request |
//! |---|---|
//! | get | `GET /api/get-<kind>?id=<owner>/<name>` |
//! | add | `POST /api/add-<kind>` with the object as JSON |
//! | update | `POST /api/update-<kind>?id=<owner>/<name>` with the object as JSON |
//! | delete | `POST /api/delete-<kind>` with the object as JSON |
//!
//! Responses are wrapped in an envelope `{"status": "ok" | "error", "msg": ..., "data": ...}`.
//! A mutation succeeded when `data` is `"Affected"`.
//!
//! Failed calls are returned as-is. Nothing is retried or cached, and the
//! transport's default timeouts apply.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::config::ProviderConfig;
use crate::error::ProviderError;
use crate::identifier::ResourceIdentifier;

/// `data` value of a mutation that changed something.
pub const AFFECTED: &str = "Affected";

const USER_AGENT: &str = concat!("casdoor-provider/", env!("CARGO_PKG_VERSION"));

/// The CRUD operations the resource adapters need from Casdoor.
///
/// `kind` is the API object kind (`user`, `application`, ...). Objects are
/// passed and returned in API shape (camelCase fields).
#[async_trait]
pub trait CasdoorApi: Send + Sync + 'static {
    /// Fetch an object. `Ok(None)` means it does not exist.
    async fn get_object(
        &self,
        kind: &str,
        id: &ResourceIdentifier,
    ) -> Result<Option<Value>, ProviderError>;

    /// Create an object. `Ok(false)` means Casdoor accepted the request but
    /// did not apply it.
    async fn add_object(&self, kind: &str, object: &Value) -> Result<bool, ProviderError>;

    /// Replace the object currently stored under `id`.
    async fn update_object(
        &self,
        kind: &str,
        id: &ResourceIdentifier,
        object: &Value,
    ) -> Result<bool, ProviderError>;

    /// Delete an object. The body must carry at least `owner` and `name`.
    async fn delete_object(&self, kind: &str, object: &Value) -> Result<bool, ProviderError>;
}

/// Casdoor's response envelope.
#[derive(Debug, Deserialize)]
struct Envelope {
    status: String,
    #[serde(default)]
    msg: String,
    #[serde(default)]
    data: Value,
}

/// HTTP implementation of [`CasdoorApi`].
#[derive(Debug, Clone)]
pub struct CasdoorClient {
    endpoint: String,
    client_id: String,
    client_secret: String,
    http: Client,
}

impl CasdoorClient {
    /// Create a client for the given endpoint and application credentials.
    pub fn new(
        endpoint: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Result<Self, ProviderError> {
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self::with_http_client(endpoint, client_id, client_secret, http))
    }

    /// Create a client around a pre-built `reqwest::Client`.
    pub fn with_http_client(
        endpoint: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        http: Client,
    ) -> Self {
        let endpoint = endpoint.into().trim_end_matches('/').to_string();
        Self {
            endpoint,
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            http,
        }
    }

    /// Create a client from resolved provider configuration.
    pub fn from_config(config: &ProviderConfig) -> Result<Self, ProviderError> {
        Self::new(
            config.endpoint.clone(),
            config.client_id.clone(),
            config.client_secret.clone(),
        )
    }

    /// The endpoint without a trailing slash.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn url(&self, operation: &str, kind: &str) -> String {
        format!("{}/api/{}-{}", self.endpoint, operation, kind)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.basic_auth(&self.client_id, Some(&self.client_secret))
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Value, ProviderError> {
        let response = self.authorize(builder).send().await?;
        read_body(response).await
    }

    /// Send a mutation and interpret its envelope.
    async fn mutate(
        &self,
        operation: &str,
        kind: &str,
        resource: String,
        builder: RequestBuilder,
    ) -> Result<bool, ProviderError> {
        let body = self.send(builder).await?;
        let envelope = parse_envelope(body)?;
        if envelope.status != "ok" {
            return Err(ProviderError::rejected(
                format!("{}-{}", operation, kind),
                resource,
                envelope.msg,
            ));
        }
        let affected = envelope.data.as_str() == Some(AFFECTED);
        debug!(operation, kind, affected, "mutation completed");
        Ok(affected)
    }
}

#[async_trait]
impl CasdoorApi for CasdoorClient {
    #[instrument(skip(self), fields(id = %id))]
    async fn get_object(
        &self,
        kind: &str,
        id: &ResourceIdentifier,
    ) -> Result<Option<Value>, ProviderError> {
        let url = self.url("get", kind);
        debug!("Casdoor GET {}", url);
        let api_id = id.api_id();
        let body = self
            .send(self.http.get(&url).query(&[("id", api_id.as_str())]))
            .await?;

        // Older Casdoor releases return the bare object instead of an envelope.
        let enveloped = body
            .as_object()
            .is_some_and(|map| map.contains_key("status"));
        let object = if enveloped {
            let envelope = parse_envelope(body)?;
            if envelope.status != "ok" {
                return Err(ProviderError::rejected(
                    format!("get-{}", kind),
                    api_id,
                    envelope.msg,
                ));
            }
            envelope.data
        } else {
            body
        };

        match object {
            Value::Null => Ok(None),
            Value::Object(_) => Ok(Some(object)),
            other => Err(ProviderError::Protocol(format!(
                "expected a {} object, got {}",
                kind, other
            ))),
        }
    }

    #[instrument(skip(self, object))]
    async fn add_object(&self, kind: &str, object: &Value) -> Result<bool, ProviderError> {
        let url = self.url("add", kind);
        debug!("Casdoor POST {}", url);
        self.mutate("add", kind, object_id(object), self.http.post(&url).json(object))
            .await
    }

    #[instrument(skip(self, object), fields(id = %id))]
    async fn update_object(
        &self,
        kind: &str,
        id: &ResourceIdentifier,
        object: &Value,
    ) -> Result<bool, ProviderError> {
        let url = self.url("update", kind);
        debug!("Casdoor POST {}", url);
        let api_id = id.api_id();
        let builder = self
            .http
            .post(&url)
            .query(&[("id", api_id.as_str())])
            .json(object);
        self.mutate("update", kind, api_id, builder).await
    }

    #[instrument(skip(self, object))]
    async fn delete_object(&self, kind: &str, object: &Value) -> Result<bool, ProviderError> {
        let url = self.url("delete", kind);
        debug!("Casdoor POST {}", url);
        self.mutate("delete", kind, object_id(object), self.http.post(&url).json(object))
            .await
    }
}

async fn read_body(response: Response) -> Result<Value, ProviderError> {
    let status = response.status();
    let url = response.url().clone();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        return Err(ProviderError::Protocol(format!(
            "HTTP {} from {}: {}",
            status,
            url.path(),
            text.trim()
        )));
    }

    let text = response.text().await?;
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&text).map_err(|e| {
        ProviderError::Protocol(format!("malformed response from {}: {}", url.path(), e))
    })
}

fn parse_envelope(body: Value) -> Result<Envelope, ProviderError> {
    serde_json::from_value(body)
        .map_err(|e| ProviderError::Protocol(format!("malformed response envelope: {}", e)))
}

fn object_id(object: &Value) -> String {
    let part = |key: &str| object.get(key).and_then(Value::as_str).unwrap_or_default();
    crate::identifier::format(part("owner"), part("name"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{basic_auth, body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> CasdoorClient {
        CasdoorClient::with_http_client(
            format!("{}/", server.uri()),
            "client-id",
            "client-secret",
            Client::new(),
        )
    }

    fn role_id() -> ResourceIdentifier {
        ResourceIdentifier::new("built-in", "r1")
    }

    #[tokio::test]
    async fn test_get_object_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/get-role"))
            .and(query_param("id", "built-in/r1"))
            .and(basic_auth("client-id", "client-secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "ok",
                "msg": "",
                "data": {"owner": "built-in", "name": "r1", "displayName": "Role 1"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let object = client(&server)
            .get_object("role", &role_id())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(object["displayName"], "Role 1");
    }

    #[tokio::test]
    async fn test_get_object_missing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/get-role"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"status": "ok", "data": null})),
            )
            .mount(&server)
            .await;

        assert!(client(&server)
            .get_object("role", &role_id())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_get_object_bare_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/get-role"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"owner": "built-in", "name": "r1"})),
            )
            .mount(&server)
            .await;

        let object = client(&server).get_object("role", &role_id()).await.unwrap();
        assert_eq!(object.unwrap()["name"], "r1");
    }

    #[tokio::test]
    async fn test_get_object_error_status_is_rejection() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/get-role"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "error",
                "msg": "Unauthorized operation"
            })))
            .mount(&server)
            .await;

        let err = client(&server)
            .get_object("role", &role_id())
            .await
            .unwrap_err();
        match err {
            ProviderError::Rejected {
                operation,
                resource,
                message,
            } => {
                assert_eq!(operation, "get-role");
                assert_eq!(resource, "built-in/r1");
                assert_eq!(message, "Unauthorized operation");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_http_error_is_protocol_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let err = client(&server)
            .get_object("role", &role_id())
            .await
            .unwrap_err();
        assert!(err.is_transport());
        assert!(err.to_string().contains("502"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_protocol_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = client(&server)
            .get_object("role", &role_id())
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Protocol(_)));
    }

    #[tokio::test]
    async fn test_add_object() {
        let server = MockServer::start().await;
        let object = json!({"owner": "built-in", "name": "r1"});
        Mock::given(method("POST"))
            .and(path("/api/add-role"))
            .and(body_json(&object))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"status": "ok", "data": "Affected"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        assert!(client(&server).add_object("role", &object).await.unwrap());
    }

    #[tokio::test]
    async fn test_add_object_unaffected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/add-role"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"status": "ok", "data": "Unaffected"})),
            )
            .mount(&server)
            .await;

        let affected = client(&server)
            .add_object("role", &json!({"owner": "built-in", "name": "r1"}))
            .await
            .unwrap();
        assert!(!affected);
    }

    #[tokio::test]
    async fn test_add_object_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/add-role"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "error",
                "msg": "role already exists"
            })))
            .mount(&server)
            .await;

        let err = client(&server)
            .add_object("role", &json!({"owner": "built-in", "name": "r1"}))
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Operation add-role rejected for built-in/r1: role already exists"
        );
    }

    #[tokio::test]
    async fn test_update_object_sends_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/update-role"))
            .and(query_param("id", "built-in/r1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"status": "ok", "data": "Affected"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let updated = client(&server)
            .update_object("role", &role_id(), &json!({"owner": "built-in", "name": "r1"}))
            .await
            .unwrap();
        assert!(updated);
    }

    #[tokio::test]
    async fn test_delete_object() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/delete-role"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"status": "ok", "data": "Affected"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let deleted = client(&server)
            .delete_object("role", &json!({"owner": "built-in", "name": "r1"}))
            .await
            .unwrap();
        assert!(deleted);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        let client = CasdoorClient::new("http://127.0.0.1:1", "id", "secret").unwrap();
        let err = client.get_object("role", &role_id()).await.unwrap_err();
        assert!(matches!(err, ProviderError::Transport(_)));
    }

    #[test]
    fn test_endpoint_trailing_slash_trimmed() {
        let client = CasdoorClient::new("https://door.example.com/", "id", "secret").unwrap();
        assert_eq!(client.endpoint(), "https://door.example.com");
        assert_eq!(
            client.url("get", "user"),
            "https://door.example.com/api/get-user"
        );
    }
}
