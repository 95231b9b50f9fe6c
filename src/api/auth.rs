use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use std::sync::Arc;

use super::{ApiError, AppState, MessageResponse};
use crate::services::AuthError;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Missing or null JSON fields deserialize to `None` so they hit the
/// validation path instead of a framework deserialization failure.
#[derive(Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Validation(msg) => Self::ValidationError(msg),
            AuthError::DuplicateEmail => Self::Duplicate("Email already exists".to_string()),
            AuthError::InvalidCredentials => {
                Self::Unauthorized("Invalid credentials".to_string())
            }
            AuthError::Database(msg) => Self::DatabaseError(msg),
            AuthError::Internal(msg) => Self::InternalError(msg),
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /signup
/// Register a new identity; the password never leaves this request unhashed.
pub async fn signup(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SignupRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let email = payload.email.unwrap_or_default();
    let password = payload.password.unwrap_or_default();

    state.auth_service().register(&email, &password).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User registered successfully!")),
    ))
}

/// POST /login
/// Verify credentials. No session or token is issued; the 200 is the whole
/// proof of authentication this service provides.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let email = payload.email.unwrap_or_default();
    let password = payload.password.unwrap_or_default();

    state.auth_service().verify(&email, &password).await?;

    Ok(Json(MessageResponse::new("Login successful!")))
}
