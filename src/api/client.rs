use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::{api::types::ApiError, config, utils::storage};

/// Maximum attempts for a single logical request. Only transport failures
/// and timeout-class statuses are retried; authorization and validation
/// failures never are.
const MAX_ATTEMPTS: u32 = 3;
#[cfg(target_arch = "wasm32")]
const BACKOFF_BASE_MS: u32 = 250;

/// Sole path to the backend: owns request construction, bearer injection,
/// and error normalization. Cheap to construct; one per call site, like a
/// handle.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Option<String>,
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: None,
        }
    }

    pub fn new_with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: Some(base_url.into()),
        }
    }

    pub(crate) fn http_client(&self) -> &Client {
        &self.client
    }

    pub(crate) async fn resolved_base_url(&self) -> String {
        match &self.base_url {
            Some(base) => base.clone(),
            None => config::await_api_base_url().await,
        }
    }

    /// Attaches the bearer token when a session exists; anonymous requests
    /// simply omit the header and let the server answer 401.
    pub(crate) fn with_auth(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match storage::stored_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Sends a request built by `build`, retrying transport failures and
    /// timeout-class statuses with exponential backoff. The closure is
    /// invoked once per attempt so the builder is never reused.
    pub(crate) async fn send<F>(&self, build: F) -> Result<reqwest::Response, ApiError>
    where
        F: Fn() -> reqwest::RequestBuilder,
    {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match build().send().await {
                Ok(response) => {
                    let status = response.status();
                    if status == StatusCode::REQUEST_TIMEOUT && attempt < MAX_ATTEMPTS {
                        log::warn!("request timed out (attempt {}), retrying", attempt);
                        backoff(attempt).await;
                        continue;
                    }
                    Self::handle_unauthorized_status(status);
                    return Ok(response);
                }
                Err(err) if attempt < MAX_ATTEMPTS => {
                    log::warn!("request failed (attempt {}): {}, retrying", attempt, err);
                    backoff(attempt).await;
                }
                Err(err) => {
                    return Err(ApiError::network(format!("request failed: {}", err)));
                }
            }
        }
    }

    /// Parses a success body as JSON, or normalizes the failure.
    pub(crate) async fn expect_json<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| ApiError::unknown(format!("failed to parse response: {}", e)))
        } else {
            Err(Self::error_from(status, response).await)
        }
    }

    pub(crate) async fn expect_ok(&self, response: reqwest::Response) -> Result<(), ApiError> {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::error_from(status, response).await)
        }
    }

    async fn error_from(status: StatusCode, response: reqwest::Response) -> ApiError {
        let body = response.text().await.unwrap_or_default();
        ApiError::from_response(status.as_u16(), &body)
    }

    /// A 401 means the token is dead: clear it and send the browser back to
    /// the login entry point (wasm only; host tests observe the cleared
    /// token).
    fn handle_unauthorized_status(status: StatusCode) {
        if status == StatusCode::UNAUTHORIZED {
            storage::clear_token();
            redirect_to_login_if_needed();
        }
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_arch = "wasm32")]
fn redirect_to_login_if_needed() {
    if let Some(window) = web_sys::window() {
        let location = window.location();
        if let Ok(pathname) = location.pathname() {
            if pathname == "/login" {
                return;
            }
        }
        let _ = location.set_href("/login");
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn redirect_to_login_if_needed() {}

#[cfg(target_arch = "wasm32")]
async fn backoff(attempt: u32) {
    gloo_timers::future::TimeoutFuture::new(BACKOFF_BASE_MS << (attempt - 1)).await;
}

// Host tests retry immediately; real delays only matter in the browser.
#[cfg(not(target_arch = "wasm32"))]
async fn backoff(_attempt: u32) {}
