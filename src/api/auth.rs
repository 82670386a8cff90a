//! Account endpoints and the bearer-token extractor.

use axum::{
    Json,
    extract::{FromRequestParts, State, rejection::JsonRejection},
    http::{HeaderMap, header, request::Parts},
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::{hash_password, verify_password_or_dummy};
use crate::error::{TaxError, AppResult};
use crate::models::{NewUser, User};

use super::handlers::{tax_error, json_body};
use super::request::{LoginRequest, RegisterRequest};
use super::response::{ApiErrorResponse, TokenResponse, UserResponse};
use super::state::AppState;

/// The authenticated, active user behind a request's bearer token.
///
/// Rejects with 401 when the `Authorization` header is missing or the token
/// is malformed, tampered with, expired or names an unknown user, and with
/// 400 `INACTIVE_USER` when the user has been deactivated.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

#[axum::async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiErrorResponse;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or_else(|| TaxError::Unauthorized {
            message: "missing bearer token".to_string(),
        })?;

        let claims = state.signer().verify(token, Utc::now())?;
        let user = state
            .store()
            .user_by_username(&claims.sub)
            .ok_or_else(|| TaxError::Unauthorized {
                message: "unknown user".to_string(),
            })?;

        if !user.is_active {
            return Err(TaxError::InactiveUser {
                username: user.username,
            }
            .into());
        }
        Ok(CurrentUser(user))
    }
}

/// Runs password hashing off the async workers.
async fn blocking<T, F>(work: F) -> AppResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    tokio::task::spawn_blocking(work).await.map_err(|e| TaxError::Internal {
        message: format!("password task failed: {e}"),
    })
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Handler for POST /auth/register.
pub(super) async fn register_handler(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Json<UserResponse>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing registration request");

    let request = json_body(payload, correlation_id)?;
    request
        .validate(state.config().auth().min_password_length)
        .map_err(|err| tax_error(correlation_id, err))?;

    let password = request.password.clone();
    let password_hash = blocking(move || hash_password(&password))
        .await
        .and_then(|hashed| hashed)
        .map_err(|err| tax_error(correlation_id, err))?;
    let user = state
        .store()
        .create_user(
            NewUser {
                username: request.username,
                email: request.email,
                password_hash,
            },
            Utc::now(),
        )
        .map_err(|err| tax_error(correlation_id, err))?;

    info!(
        correlation_id = %correlation_id,
        user_id = user.id,
        username = %user.username,
        "User registered"
    );
    Ok(Json(user.into()))
}

/// Handler for POST /auth/login.
pub(super) async fn login_handler(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing login request");

    let request = json_body(payload, correlation_id)?;
    let user = state.store().user_by_username(&request.username);

    // Unknown usernames still pay for a full hash check.
    let password = request.password.clone();
    let stored = user.as_ref().map(|user| user.password_hash.clone());
    let verified = blocking(move || verify_password_or_dummy(&password, stored.as_deref()))
        .await
        .map_err(|err| tax_error(correlation_id, err))?;

    let Some(user) = user.filter(|_| verified) else {
        warn!(
            correlation_id = %correlation_id,
            username = %request.username,
            "Login rejected"
        );
        return Err(TaxError::InvalidCredentials.into());
    };

    let access_token = state
        .signer()
        .issue(&user.username, Utc::now())
        .map_err(|err| tax_error(correlation_id, err))?;

    info!(correlation_id = %correlation_id, user_id = user.id, "Token issued");
    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}

/// Handler for GET /auth/me.
pub(super) async fn me_handler(CurrentUser(user): CurrentUser) -> Json<UserResponse> {
    Json(user.into())
}
