//! Login, registration, token refresh and logout.
//!
//! Login and refresh write credentials through the client's session; they
//! never touch an [`AuthState`](crate::state::auth::AuthState). Callers
//! refresh their mirror afterwards with the returned profile.

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;

use serde::Serialize;
use serde_json::Value;

use crate::net::client::{ApiClient, ApiError};
use crate::net::types::{LoginRequest, LoginResponse, RefreshRequest, RefreshResponse};
use crate::state::session::Session;
use crate::state::storage::StorageError;

pub const LOGIN_PATH: &str = "/auth/login/";
pub const REGISTER_PATH: &str = "/auth/register/";
pub const REFRESH_PATH: &str = "/auth/login/refresh/";

/// Exchange credentials for tokens and persist them with the user's identity.
///
/// Nothing is stored when the call fails.
///
/// # Errors
///
/// Returns the client's [`ApiError`] unchanged (after logging it), or
/// [`ApiError::Storage`] if the session cannot be written.
pub async fn login(client: &ApiClient, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
    let response: LoginResponse = match client.post(LOGIN_PATH, &LoginRequest { email, password }).await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!(%email, error = %e, "login failed");
            return Err(e);
        }
    };

    client.session().persist_login(&response)?;
    tracing::info!(%email, role = ?response.role, "logged in");
    Ok(response)
}

/// Submit a registration payload and return the backend's raw answer.
///
/// # Errors
///
/// Propagates [`ApiError`] from the client.
pub async fn register<P: Serialize + ?Sized>(client: &ApiClient, payload: &P) -> Result<Value, ApiError> {
    client.post(REGISTER_PATH, payload).await
}

/// Trade the stored refresh token for a new access token and persist it.
///
/// # Errors
///
/// Returns [`ApiError::MissingRefreshToken`] when no refresh token is
/// stored, otherwise propagates [`ApiError`] from the client.
pub async fn refresh(client: &ApiClient) -> Result<String, ApiError> {
    let token = client.session().refresh_token().ok_or(ApiError::MissingRefreshToken)?;
    let response: RefreshResponse = client.post(REFRESH_PATH, &RefreshRequest { refresh: &token }).await?;
    client.session().persist_tokens(&response.access, response.refresh.as_deref())?;
    tracing::info!(rotated = response.refresh.is_some(), "access token refreshed");
    Ok(response.access)
}

/// Forget the local session. The backend is not contacted.
///
/// # Errors
///
/// Returns [`StorageError`] if storage cannot be cleared.
pub fn logout(session: &Session) -> Result<(), StorageError> {
    session.clear()?;
    tracing::info!("logged out");
    Ok(())
}
