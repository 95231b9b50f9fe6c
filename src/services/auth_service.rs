//! Domain service for registration and credential verification.
//!
//! Owns no persistent state itself; delegates to the identity store and the
//! Argon2 hashing primitive.

use serde::Serialize;
use thiserror::Error;

use crate::entities::users::UserStatus;

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown email or wrong password. Deliberately a single variant so
    /// callers cannot probe which emails are registered.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Email already exists")]
    DuplicateEmail,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for AuthError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// User info DTO for responses. Carries no secret material.
#[derive(Debug, Clone, Serialize)]
pub struct UserInfo {
    pub email: String,
    pub status: UserStatus,
    pub created_at: String,
    pub updated_at: String,
}

/// Domain service trait for the credential flow.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Registers a new identity, hashing the password before storage.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Validation`] when either field is empty and
    /// [`AuthError::DuplicateEmail`] when the email is already registered.
    async fn register(&self, email: &str, password: &str) -> Result<UserInfo, AuthError>;

    /// Verifies credentials against the stored hash.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] for an unknown email as
    /// well as a wrong password.
    async fn verify(&self, email: &str, password: &str) -> Result<(), AuthError>;
}
