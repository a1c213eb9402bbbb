//! Authenticated JSON-over-HTTP client for the notes API.
//!
//! Every request carries `Content-Type` and `Accept` set to
//! `application/json`, plus `Authorization: Bearer <token>` when the
//! credential store holds a token. Caller-supplied headers replace these
//! defaults. Responses are normalized into [`ClientError`]:
//!
//! - no response at all: [`ClientError::Network`]
//! - non-2xx: [`ClientError::Api`] with the server's message
//! - 2xx that does not decode: [`ClientError::InvalidResponse`]
//!
//! Nothing is retried.

use std::sync::Arc;

use notes_core::{AuthResponse, Credentials, Note, NoteId, NoteInput, User};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, Url};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};

use crate::config::{ClientConfig, ConfigError};
use crate::credentials::{CredentialError, CredentialStore};
use crate::error::{ApiErrorKind, ClientError, ClientResult, GENERIC_ERROR_MESSAGE};

const JSON: &str = "application/json";

/// Auth reply as sent by the server, before the token is checked.
#[derive(Debug, Deserialize)]
struct RawAuthResponse {
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    user: Option<User>,
    #[serde(default)]
    message: Option<String>,
}

impl RawAuthResponse {
    fn validate(self) -> ClientResult<AuthResponse> {
        match self.token {
            Some(token) if !token.trim().is_empty() => Ok(AuthResponse {
                token,
                user: self.user,
                message: self.message,
            }),
            _ => Err(ClientError::InvalidResponse("missing token".to_string())),
        }
    }
}

/// Error body in either the flat or the nested form.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorBody {
    Flat { message: String },
    Nested { error: ErrorDetails },
}

#[derive(Debug, Deserialize)]
struct ErrorDetails {
    message: String,
}

/// Client for the notes HTTP API.
///
/// Cheap to clone; clones share the connection pool and credential store.
#[derive(Debug, Clone)]
pub struct HttpClient {
    http: reqwest::Client,
    base_url: Url,
    credentials: Arc<dyn CredentialStore>,
}

impl HttpClient {
    /// Build a client for `config.base_url` reading tokens from `credentials`.
    pub fn new(config: &ClientConfig, credentials: Arc<dyn CredentialStore>) -> ClientResult<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| ConfigError::InvalidValue {
            name: "base_url".to_string(),
            reason: e.to_string(),
        })?;

        if base_url.cannot_be_a_base() {
            return Err(ConfigError::InvalidValue {
                name: "base_url".to_string(),
                reason: format!("{} cannot be used as a base URL", base_url),
            }
            .into());
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ConfigError::InvalidValue {
                name: "http client".to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            http,
            base_url,
            credentials,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The credential store this client reads its token from.
    pub fn credentials(&self) -> &Arc<dyn CredentialStore> {
        &self.credentials
    }

    // ========================================================================
    // Authentication
    // ========================================================================

    /// POST /auth/signup
    pub async fn signup(&self, email: &str, password: &str) -> ClientResult<AuthResponse> {
        self.authenticate("signup", email, password).await
    }

    /// POST /auth/login
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<AuthResponse> {
        self.authenticate("login", email, password).await
    }

    async fn authenticate(
        &self,
        endpoint: &str,
        email: &str,
        password: &str,
    ) -> ClientResult<AuthResponse> {
        let body = Credentials::new(email, password);
        let raw: RawAuthResponse = self
            .request(Method::POST, &["auth", endpoint], Some(&body), HeaderMap::new())
            .await?;
        raw.validate()
    }

    // ========================================================================
    // Notes
    // ========================================================================

    /// GET /notes
    pub async fn list_notes(&self) -> ClientResult<Vec<Note>> {
        self.request::<_, ()>(Method::GET, &["notes"], None, HeaderMap::new())
            .await
    }

    /// POST /notes
    pub async fn create_note(&self, input: &NoteInput) -> ClientResult<Note> {
        self.request(Method::POST, &["notes"], Some(input), HeaderMap::new())
            .await
    }

    /// GET /notes/{id}
    pub async fn get_note(&self, id: &NoteId) -> ClientResult<Note> {
        self.request::<_, ()>(Method::GET, &["notes", id.as_str()], None, HeaderMap::new())
            .await
    }

    /// PUT /notes/{id}
    pub async fn update_note(&self, id: &NoteId, input: &NoteInput) -> ClientResult<Note> {
        self.request(
            Method::PUT,
            &["notes", id.as_str()],
            Some(input),
            HeaderMap::new(),
        )
        .await
    }

    /// DELETE /notes/{id}
    ///
    /// Any success body is accepted and discarded.
    pub async fn delete_note(&self, id: &NoteId) -> ClientResult<()> {
        self.request::<IgnoredAny, ()>(
            Method::DELETE,
            &["notes", id.as_str()],
            None,
            HeaderMap::new(),
        )
        .await?;
        Ok(())
    }

    // ========================================================================
    // Transport
    // ========================================================================

    /// Send a request to `segments` under the base URL and decode the reply.
    ///
    /// Each segment is percent-encoded as a single path segment. Entries in
    /// `headers` replace the default headers of the same name.
    pub async fn request<T, B>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&B>,
        headers: HeaderMap,
    ) -> ClientResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.endpoint(segments);

        let mut request_headers = self.default_headers()?;
        request_headers.extend(headers);

        let mut builder = self
            .http
            .request(method.clone(), url.clone())
            .headers(request_headers);
        if let Some(body) = body {
            builder = builder.body(serde_json::to_vec(body)?);
        }

        tracing::debug!(%method, %url, "Sending request");

        let response = builder.send().await.map_err(|e| {
            tracing::debug!(%method, %url, error = %e, "Request failed before a response");
            ClientError::Network(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.bytes().await {
                Ok(bytes) => error_message(&bytes),
                Err(_) => GENERIC_ERROR_MESSAGE.to_string(),
            };
            let err = ClientError::api(status, message);
            if err.kind() == Some(ApiErrorKind::Unauthorized) {
                tracing::warn!(%method, %url, %status, "Request rejected: not authenticated");
            } else {
                tracing::debug!(%method, %url, %status, error = %err, "Request returned an error");
            }
            return Err(err);
        }

        let bytes = response.bytes().await.map_err(ClientError::Network)?;
        tracing::debug!(%method, %url, %status, len = bytes.len(), "Received response");
        decode_body(&bytes)
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // new() rejects cannot-be-a-base URLs, so this always succeeds
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn default_headers(&self) -> ClientResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON));
        headers.insert(ACCEPT, HeaderValue::from_static(JSON));

        if let Some(token) = self.credentials.get()? {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| CredentialError::InvalidToken)?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        Ok(headers)
    }
}

/// Extract a human-readable message from an error response body.
fn error_message(bytes: &[u8]) -> String {
    let message = match serde_json::from_slice::<ErrorBody>(bytes) {
        Ok(ErrorBody::Flat { message }) => message,
        Ok(ErrorBody::Nested { error }) => error.message,
        Err(_) => String::new(),
    };

    if message.trim().is_empty() {
        GENERIC_ERROR_MESSAGE.to_string()
    } else {
        message
    }
}

/// Decode a success body. An empty body decodes as JSON `null`.
fn decode_body<T: DeserializeOwned>(bytes: &[u8]) -> ClientResult<T> {
    let result = if bytes.iter().all(u8::is_ascii_whitespace) {
        serde_json::from_slice(b"null")
    } else {
        serde_json::from_slice(bytes)
    };

    result.map_err(|e| ClientError::InvalidResponse(format!("failed to decode body: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::MemoryCredentialStore;

    fn client(base_url: &str) -> HttpClient {
        let config = ClientConfig {
            base_url: base_url.to_string(),
            ..ClientConfig::default()
        };
        HttpClient::new(&config, Arc::new(MemoryCredentialStore::new())).unwrap()
    }

    #[test]
    fn test_endpoint_appends_to_base_path() {
        let c = client("http://localhost:3000/dev");
        assert_eq!(
            c.endpoint(&["notes", "42"]).as_str(),
            "http://localhost:3000/dev/notes/42"
        );

        let c = client("http://localhost:3000/dev/");
        assert_eq!(
            c.endpoint(&["auth", "login"]).as_str(),
            "http://localhost:3000/dev/auth/login"
        );

        let c = client("http://localhost:3000");
        assert_eq!(c.endpoint(&["notes"]).as_str(), "http://localhost:3000/notes");
    }

    #[test]
    fn test_endpoint_encodes_ids() {
        let c = client("http://localhost:3000");
        assert_eq!(
            c.endpoint(&["notes", "a/b c"]).as_str(),
            "http://localhost:3000/notes/a%2Fb%20c"
        );
    }

    #[test]
    fn test_rejects_unusable_base_url() {
        let config = ClientConfig {
            base_url: "mailto:someone@example.com".to_string(),
            ..ClientConfig::default()
        };
        let result = HttpClient::new(&config, Arc::new(MemoryCredentialStore::new()));
        assert!(matches!(result, Err(ClientError::Config(_))));

        let config = ClientConfig {
            base_url: "not a url".to_string(),
            ..ClientConfig::default()
        };
        let result = HttpClient::new(&config, Arc::new(MemoryCredentialStore::new()));
        assert!(matches!(result, Err(ClientError::Config(_))));
    }

    #[test]
    fn test_default_headers_without_token() {
        let headers = client("http://localhost").default_headers().unwrap();
        assert_eq!(headers[CONTENT_TYPE], JSON);
        assert_eq!(headers[ACCEPT], JSON);
        assert!(!headers.contains_key(AUTHORIZATION));
    }

    #[test]
    fn test_default_headers_with_token() {
        let config = ClientConfig::default();
        let c = HttpClient::new(&config, Arc::new(MemoryCredentialStore::with_token("t0k"))).unwrap();
        let headers = c.default_headers().unwrap();
        assert_eq!(headers[AUTHORIZATION], "Bearer t0k");
        assert!(headers[AUTHORIZATION].is_sensitive());
    }

    #[test]
    fn test_token_with_newline_is_rejected() {
        let config = ClientConfig::default();
        let c = HttpClient::new(
            &config,
            Arc::new(MemoryCredentialStore::with_token("bad\ntoken")),
        )
        .unwrap();
        assert!(matches!(
            c.default_headers(),
            Err(ClientError::Credential(CredentialError::InvalidToken))
        ));
    }

    #[test]
    fn test_error_message_forms() {
        assert_eq!(error_message(br#"{"message": "Note not found"}"#), "Note not found");
        assert_eq!(
            error_message(br#"{"error": {"code": "NOT_FOUND", "message": "gone"}}"#),
            "gone"
        );
        assert_eq!(error_message(b""), GENERIC_ERROR_MESSAGE);
        assert_eq!(error_message(b"<html>502</html>"), GENERIC_ERROR_MESSAGE);
        assert_eq!(error_message(br#"{"message": ""}"#), GENERIC_ERROR_MESSAGE);
        assert_eq!(error_message(br#"{"detail": "x"}"#), GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn test_decode_empty_body_as_unit() {
        decode_body::<()>(b"").unwrap();
        decode_body::<()>(b"  \n").unwrap();
    }

    #[test]
    fn test_decode_empty_body_as_note_fails() {
        let result: ClientResult<Note> = decode_body(b"");
        assert!(matches!(result, Err(ClientError::InvalidResponse(_))));
    }

    #[test]
    fn test_auth_response_requires_token() {
        let raw: RawAuthResponse = serde_json::from_str("{}").unwrap();
        assert!(matches!(raw.validate(), Err(ClientError::InvalidResponse(_))));

        let raw: RawAuthResponse = serde_json::from_str(r#"{"token": ""}"#).unwrap();
        assert!(matches!(raw.validate(), Err(ClientError::InvalidResponse(_))));

        let raw: RawAuthResponse =
            serde_json::from_str(r#"{"token": "t", "user": {"email": "a@b.c"}}"#).unwrap();
        let response = raw.validate().unwrap();
        assert_eq!(response.token, "t");
        assert_eq!(response.user.unwrap().email, "a@b.c");
    }
}
