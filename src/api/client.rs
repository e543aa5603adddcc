//! Core `ConfigApi` trait and `HttpConfigApi` implementation.
//!
//! `HttpConfigApi` talks to the config server over plain JSON/HTTP.  All
//! connection details come from [`ServerSettings`]; nothing is hardcoded
//! except the endpoint paths.
//!
//! [`MockConfigApi`] (available under `#[cfg(test)]`) is a scripted stub
//! that records every call, for unit-testing the controller without a
//! running server.

use async_trait::async_trait;
use thiserror::Error;

use crate::api::types::{BeepResponse, ConfigPayload, Configuration, SaveResponse, ValidateResponse};
use crate::config::ServerSettings;

const CONFIG_PATH: &str = "/api/config";
const VALIDATE_HOTKEY_PATH: &str = "/api/validate/hotkey";
const BEEP_PATH: &str = "/api/beep";

// ---------------------------------------------------------------------------
// ApiError
// ---------------------------------------------------------------------------

/// Errors that can occur while talking to the config server.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// HTTP transport or connection error.
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The request did not complete within the configured timeout.
    #[error("config server request timed out")]
    Timeout,

    /// The server answered with a non-success status.
    #[error("config server returned HTTP {0}")]
    Status(u16),

    /// The response body could not be decoded as the expected JSON.
    #[error("failed to parse config server response: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Timeout
        } else if e.is_decode() {
            ApiError::Parse(e.to_string())
        } else {
            ApiError::Request(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// ConfigApi trait
// ---------------------------------------------------------------------------

/// The four calls the settings window makes against the config server.
///
/// Implementors must be `Send + Sync` so they can be shared as
/// `Arc<dyn ConfigApi>` between the UI thread and runtime tasks.
#[async_trait]
pub trait ConfigApi: Send + Sync {
    /// `GET /api/config`.  A non-success status is an error.
    async fn fetch_config(&self) -> Result<ConfigPayload, ApiError>;

    /// `POST /api/config`.  Returns the decoded body whatever the HTTP
    /// status; the caller inspects [`SaveResponse::ok`].
    async fn post_config(&self, cfg: &Configuration) -> Result<SaveResponse, ApiError>;

    /// `POST /api/validate/hotkey` with `{"hotkey": …}`.
    async fn validate_hotkey(&self, hotkey: &str) -> Result<ValidateResponse, ApiError>;

    /// `POST /api/beep`.
    async fn beep(&self) -> Result<BeepResponse, ApiError>;
}

// ---------------------------------------------------------------------------
// HttpConfigApi
// ---------------------------------------------------------------------------

/// [`ConfigApi`] over `reqwest`.
pub struct HttpConfigApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpConfigApi {
    /// Build an `HttpConfigApi` from the server settings.
    ///
    /// The HTTP client is pre-configured with the per-request timeout from
    /// `settings.timeout_secs`.  A default client is used if the builder
    /// fails.
    pub fn from_settings(settings: &ServerSettings) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(settings.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Full URL for an endpoint path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl ConfigApi for HttpConfigApi {
    async fn fetch_config(&self) -> Result<ConfigPayload, ApiError> {
        let response = self.client.get(self.url(CONFIG_PATH)).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }

        response
            .json::<ConfigPayload>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    async fn post_config(&self, cfg: &Configuration) -> Result<SaveResponse, ApiError> {
        let response = self
            .client
            .post(self.url(CONFIG_PATH))
            .json(cfg)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            log::debug!("POST {CONFIG_PATH} answered {status}; decoding body anyway");
        }

        response
            .json::<SaveResponse>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    async fn validate_hotkey(&self, hotkey: &str) -> Result<ValidateResponse, ApiError> {
        let body = serde_json::json!({ "hotkey": hotkey });

        let response = self
            .client
            .post(self.url(VALIDATE_HOTKEY_PATH))
            .json(&body)
            .send()
            .await?;

        response
            .json::<ValidateResponse>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    async fn beep(&self) -> Result<BeepResponse, ApiError> {
        let response = self.client.post(self.url(BEEP_PATH)).send().await?;

        response
            .json::<BeepResponse>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }
}

// ---------------------------------------------------------------------------
// MockConfigApi  (test-only)
// ---------------------------------------------------------------------------

/// A scripted [`ConfigApi`] that records every call.
///
/// Responses are fixed at construction; `validate_hotkey` answers `valid`
/// for every combo except the ones listed in `invalid`, normalising to
/// lowercase.
#[cfg(test)]
pub struct MockConfigApi {
    pub fetch_response: std::sync::Mutex<Result<ConfigPayload, ApiError>>,
    pub save_response: Result<SaveResponse, ApiError>,
    pub validate_error: Option<ApiError>,
    pub invalid: Vec<String>,
    pub beep_response: Result<BeepResponse, ApiError>,
    /// How long `post_config` takes to answer.
    pub post_delay: Option<std::time::Duration>,
    pub calls: std::sync::Mutex<MockCalls>,
}

/// Everything a [`MockConfigApi`] was asked to do.
#[cfg(test)]
#[derive(Debug, Default, Clone)]
pub struct MockCalls {
    pub fetches: usize,
    pub posted: Vec<Configuration>,
    pub validated: Vec<String>,
    pub beeps: usize,
    pub posts_in_flight: usize,
    pub max_posts_in_flight: usize,
}

#[cfg(test)]
impl MockConfigApi {
    /// A server holding `cfg` that accepts every save.
    pub fn serving(cfg: ConfigPayload) -> Self {
        Self {
            fetch_response: std::sync::Mutex::new(Ok(cfg)),
            save_response: Ok(SaveResponse {
                ok: true,
                error: None,
                path: Some("/tmp/presets.yaml".into()),
            }),
            validate_error: None,
            invalid: Vec::new(),
            beep_response: Ok(BeepResponse { ok: true }),
            post_delay: None,
            calls: std::sync::Mutex::new(MockCalls::default()),
        }
    }

    /// A server whose `GET /api/config` always fails.
    pub fn unreachable() -> Self {
        let mut api = Self::serving(ConfigPayload::default());
        api.fetch_response = std::sync::Mutex::new(Err(ApiError::Status(500)));
        api.save_response = Err(ApiError::Request("connection refused".into()));
        api.validate_error = Some(ApiError::Request("connection refused".into()));
        api.beep_response = Err(ApiError::Request("connection refused".into()));
        api
    }

    /// Swap what the next `fetch_config` returns.
    pub fn set_fetch(&self, response: Result<ConfigPayload, ApiError>) {
        *self.fetch_response.lock().unwrap() = response;
    }

    pub fn calls(&self) -> MockCalls {
        self.calls.lock().unwrap().clone()
    }

    /// Most `post_config` calls that were running at the same time.
    pub fn max_in_flight(&self) -> usize {
        self.calls.lock().unwrap().max_posts_in_flight
    }
}

#[cfg(test)]
#[async_trait]
impl ConfigApi for MockConfigApi {
    async fn fetch_config(&self) -> Result<ConfigPayload, ApiError> {
        self.calls.lock().unwrap().fetches += 1;
        self.fetch_response.lock().unwrap().clone()
    }

    async fn post_config(&self, cfg: &Configuration) -> Result<SaveResponse, ApiError> {
        {
            let mut calls = self.calls.lock().unwrap();
            calls.posted.push(cfg.clone());
            calls.posts_in_flight += 1;
            calls.max_posts_in_flight = calls.max_posts_in_flight.max(calls.posts_in_flight);
        }
        if let Some(delay) = self.post_delay {
            tokio::time::sleep(delay).await;
        }
        self.calls.lock().unwrap().posts_in_flight -= 1;
        self.save_response.clone()
    }

    async fn validate_hotkey(&self, hotkey: &str) -> Result<ValidateResponse, ApiError> {
        self.calls.lock().unwrap().validated.push(hotkey.to_string());
        if let Some(err) = &self.validate_error {
            return Err(err.clone());
        }
        if self.invalid.iter().any(|h| h == hotkey) {
            return Ok(ValidateResponse {
                ok: true,
                valid: Some(false),
                normalized: None,
            });
        }
        Ok(ValidateResponse {
            ok: true,
            valid: Some(true),
            normalized: Some(hotkey.to_lowercase()),
        })
    }

    async fn beep(&self) -> Result<BeepResponse, ApiError> {
        self.calls.lock().unwrap().beeps += 1;
        self.beep_response.clone()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn make_settings(base_url: &str) -> ServerSettings {
        ServerSettings {
            base_url: base_url.into(),
            timeout_secs: 2,
        }
    }

    #[test]
    fn from_settings_builds_without_panic() {
        let _api = HttpConfigApi::from_settings(&ServerSettings::default());
    }

    #[test]
    fn url_joins_endpoint_paths() {
        let api = HttpConfigApi::from_settings(&make_settings("http://127.0.0.1:8765"));
        assert_eq!(api.url(CONFIG_PATH), "http://127.0.0.1:8765/api/config");
        assert_eq!(
            api.url(VALIDATE_HOTKEY_PATH),
            "http://127.0.0.1:8765/api/validate/hotkey"
        );
    }

    #[test]
    fn url_tolerates_trailing_slash() {
        let api = HttpConfigApi::from_settings(&make_settings("http://localhost:9000/"));
        assert_eq!(api.url(BEEP_PATH), "http://localhost:9000/api/beep");
    }

    /// `HttpConfigApi` must be usable as `dyn ConfigApi`.
    #[test]
    fn api_is_object_safe() {
        let api: Box<dyn ConfigApi> =
            Box::new(HttpConfigApi::from_settings(&ServerSettings::default()));
        drop(api);
    }

    /// Nothing listens on port 9 (discard); the call must fail, not hang.
    #[tokio::test]
    async fn fetch_against_closed_port_is_an_error() {
        let api = HttpConfigApi::from_settings(&make_settings("http://127.0.0.1:9"));
        assert!(api.fetch_config().await.is_err());
    }

    /// Accept one connection on a loopback port and answer it with
    /// `status` and a JSON `body`.
    async fn serve_once(status: &str, body: &str) -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 8192];
            let _ = socket.read(&mut buf).await;
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn fetch_decodes_success_body() {
        let base = serve_once("200 OK", r#"{"hotkey": "ctrl+space", "language": "en"}"#).await;
        let api = HttpConfigApi::from_settings(&make_settings(&base));

        let cfg = api.fetch_config().await.unwrap();
        assert_eq!(cfg.hotkey.as_deref(), Some("ctrl+space"));
        assert_eq!(cfg.language.as_deref(), Some("en"));
        assert_eq!(cfg.model, None);
    }

    #[tokio::test]
    async fn fetch_maps_server_error_to_status() {
        let base = serve_once("500 Internal Server Error", r#"{"ok": false}"#).await;
        let api = HttpConfigApi::from_settings(&make_settings(&base));

        let err = api.fetch_config().await.unwrap_err();
        assert!(matches!(err, ApiError::Status(500)), "got {err:?}");
    }

    #[tokio::test]
    async fn post_decodes_body_of_bad_request() {
        let base = serve_once(
            "400 Bad Request",
            r#"{"ok": false, "error": "invalid hotkey: ctrl+"}"#,
        )
        .await;
        let api = HttpConfigApi::from_settings(&make_settings(&base));

        let resp = api.post_config(&Configuration::default()).await.unwrap();
        assert!(!resp.ok);
        assert_eq!(resp.error.as_deref(), Some("invalid hotkey: ctrl+"));
    }

    #[tokio::test]
    async fn post_with_garbage_body_is_a_parse_error() {
        let base = serve_once("502 Bad Gateway", "<html>upstream</html>").await;
        let api = HttpConfigApi::from_settings(&make_settings(&base));

        let err = api.post_config(&Configuration::default()).await.unwrap_err();
        assert!(matches!(err, ApiError::Parse(_)), "got {err:?}");
    }

    #[test]
    fn status_error_message_names_code() {
        assert_eq!(
            ApiError::Status(404).to_string(),
            "config server returned HTTP 404"
        );
    }
}
