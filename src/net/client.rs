//! Authenticated request dispatcher.
//!
//! Every backend call goes through [`ApiClient::send`]. The client is bound
//! to one base URL and one timeout at construction; there is no per-request
//! override, no retry and no backoff.
//!
//! CREDENTIALS
//! ===========
//! Before sending, the request path is run through
//! [`classify_path`](super::classify::classify_path). Protected paths get
//! `Authorization: Bearer <access>` when the session holds a token. With no
//! token the request still goes out bare; rejecting it is the backend's job.
//!
//! ERROR HANDLING
//! ==============
//! Transport failures (connect, timeout) come back as the `reqwest::Error`
//! itself inside [`ApiError::Transport`]. Non-2xx responses become
//! [`ApiError::Status`] with the response body kept verbatim.

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::classify::classify_path;
use crate::config::ApiConfig;
use crate::state::session::Session;
use crate::state::storage::StorageError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("http request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server returned {status}: {body}")]
    Status { status: StatusCode, body: Value },
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
    #[error("session storage failed: {0}")]
    Storage(#[from] StorageError),
    #[error("no refresh token stored; log in again")]
    MissingRefreshToken,
}

impl ApiError {
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }

    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status(),
            _ => None,
        }
    }
}

// =============================================================================
// REQUEST
// =============================================================================

/// Description of one backend call. `path` is relative to the base URL.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
    pub headers: HeaderMap,
}

impl ApiRequest {
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self { method, path: path.into(), body: None, headers: HeaderMap::new() }
    }

    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    #[must_use]
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    #[must_use]
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Attach a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Decode`] if `body` does not serialize.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    #[must_use]
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// `Authorization` value to send for `path`, if any.
#[must_use]
pub fn bearer_credential(session: &Session, path: &str) -> Option<String> {
    if !classify_path(path).is_protected() {
        return None;
    }
    session.access_token().map(|token| format!("Bearer {token}"))
}

// =============================================================================
// CLIENT
// =============================================================================

#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Session,
}

impl ApiClient {
    /// Build a client bound to `config`'s base URL and timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the HTTP client cannot be built.
    pub fn new(config: &ApiConfig, session: Session) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().timeout(config.timeout()).build()?;
        Ok(Self { http, base_url: config.base_url.clone(), session })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }

    /// Send `request`, attaching the bearer credential when its path is
    /// protected. A caller-supplied `Authorization` header is left alone.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] on network failure or timeout and
    /// [`ApiError::Status`] for a non-2xx response.
    pub async fn send(&self, request: ApiRequest) -> Result<reqwest::Response, ApiError> {
        let ApiRequest { method, path, body, headers } = request;
        let credential = if headers.contains_key(AUTHORIZATION) {
            None
        } else {
            bearer_credential(&self.session, &path)
        };

        tracing::debug!(
            %method,
            %path,
            protected = classify_path(&path).is_protected(),
            credential = credential.is_some(),
            "dispatching request"
        );

        let mut builder = self.http.request(method, self.url(&path)).headers(headers);
        if let Some(credential) = credential {
            builder = builder.header(AUTHORIZATION, HeaderValue::from_str(&credential)?);
        }
        if let Some(body) = &body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let text = match response.text().await {
                Ok(text) => text,
                Err(e) => {
                    tracing::debug!(%path, status = status.as_u16(), error = %e, "failed to read error body");
                    String::new()
                }
            };
            let body = serde_json::from_str::<Value>(&text).unwrap_or(Value::String(text));
            tracing::debug!(%path, status = status.as_u16(), "request rejected");
            return Err(ApiError::Status { status, body });
        }
        Ok(response)
    }

    /// Send and decode the JSON response body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`]; additionally [`ApiError::Decode`] if the body
    /// does not match `T`.
    pub async fn send_json<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        let response = self.send(request).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Send and discard the response body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn send_empty(&self, request: ApiRequest) -> Result<(), ApiError> {
        self.send(request).await?;
        Ok(())
    }

    /// # Errors
    ///
    /// See [`ApiClient::send_json`].
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send_json(ApiRequest::get(path)).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::send_json`].
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(ApiRequest::post(path).json(body)?).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::send_json`].
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(ApiRequest::put(path).json(body)?).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::send_json`].
    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(ApiRequest::patch(path).json(body)?).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send_empty(ApiRequest::delete(path)).await
    }
}
