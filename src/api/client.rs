use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::session::Session;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

/// Longest server message kept in an error.
const MAX_ERROR_BODY: usize = 300;

/// HTTP client for the employee tracking API.
///
/// Cloning is cheap; the underlying connection pool is shared.
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: Arc<str>,
    token: Option<Arc<str>>,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("emptrack/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let mut base = base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }

        Ok(Self {
            client,
            base_url: Arc::from(base),
            token: None,
        })
    }

    pub fn from_config(cfg: &Config) -> AppResult<Self> {
        Self::new(&cfg.api_url, cfg.request_timeout())
    }

    /// Same client, authenticating with `token`.
    pub fn with_token(mut self, token: &str) -> Self {
        self.token = Some(Arc::from(token));
        self
    }

    pub fn for_session(self, session: &Session) -> Self {
        self.with_token(&session.token)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_token(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorized(&self, method: Method, path: &str) -> AppResult<RequestBuilder> {
        let token = self
            .token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or(AppError::NotLoggedIn)?;

        Ok(self
            .client
            .request(method, self.url(path))
            .header("Authorization", format!("Bearer {}", token))
            .header("Accept", "application/json"))
    }

    /// Map non-success responses onto `AppError`, keeping the server's message.
    async fn check(response: Response) -> AppResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED {
            return Err(AppError::Unauthorized);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read body".to_string());

        Err(AppError::Api {
            status: status.as_u16(),
            message: server_message(&body, status),
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> AppResult<T> {
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| AppError::Decode(e.to_string()))
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let response = self.authorized(Method::GET, path)?.send().await?;
        let response = Self::check(response).await?;
        Self::decode(response).await
    }

    /// GET a resource that may legitimately be absent (404, 204 or `null`).
    pub(crate) async fn get_optional<T: DeserializeOwned>(&self, path: &str) -> AppResult<Option<T>> {
        let response = self.authorized(Method::GET, path)?.send().await?;

        match response.status() {
            StatusCode::NOT_FOUND | StatusCode::NO_CONTENT => return Ok(None),
            _ => {}
        }

        let response = Self::check(response).await?;
        let bytes = response.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        serde_json::from_slice::<Option<T>>(&bytes).map_err(|e| AppError::Decode(e.to_string()))
    }

    pub(crate) async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> AppResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.authorized(method, path)?.json(body).send().await?;
        let response = Self::check(response).await?;
        Self::decode(response).await
    }

    /// Send a body and ignore whatever the server answers on success.
    pub(crate) async fn send_unit<B>(&self, method: Method, path: &str, body: &B) -> AppResult<()>
    where
        B: Serialize + ?Sized,
    {
        let response = self.authorized(method, path)?.json(body).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    pub(crate) async fn delete(&self, path: &str) -> AppResult<()> {
        let response = self.authorized(Method::DELETE, path)?.send().await?;
        Self::check(response).await?;
        Ok(())
    }

    /// POST without credentials; used by login only.
    pub(crate) async fn post_anonymous<B, T>(&self, path: &str, body: &B) -> AppResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .client
            .post(self.url(path))
            .header("Accept", "application/json")
            .json(body)
            .send()
            .await?;
        let response = Self::check(response).await?;
        Self::decode(response).await
    }
}

/// Pull a human readable message out of an error body.
/// Django REST style bodies carry it in `detail` or `error`.
fn server_message(body: &str, status: StatusCode) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["detail", "error", "message"] {
            if let Some(msg) = value.get(key).and_then(|v| v.as_str()) {
                return msg.to_string();
            }
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        return status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string();
    }

    trimmed.chars().take(MAX_ERROR_BODY).collect()
}
