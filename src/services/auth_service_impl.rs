//! `SeaORM` implementation of the `AuthService` trait.

use crate::config::SecurityConfig;
use crate::db::Store;
use crate::services::auth_service::{AuthError, AuthService, UserInfo};
use async_trait::async_trait;

pub struct SeaOrmAuthService {
    store: Store,
    security: SecurityConfig,
}

impl SeaOrmAuthService {
    #[must_use]
    pub const fn new(store: Store, security: SecurityConfig) -> Self {
        Self { store, security }
    }

    fn require_credentials(email: &str, password: &str) -> Result<(), AuthError> {
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::Validation(
                "Email and password are required".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn register(&self, email: &str, password: &str) -> Result<UserInfo, AuthError> {
        Self::require_credentials(email, password)?;

        // Cheap pre-check so the common duplicate case skips the hash work.
        if self.store.get_user_by_email(email).await?.is_some() {
            return Err(AuthError::DuplicateEmail);
        }

        let password_hash = self.store.hash_password(password, &self.security).await?;

        // The unique constraint still arbitrates concurrent registrations;
        // a lost race surfaces here as a rejected insert.
        let user = self
            .store
            .create_user(email, &password_hash)
            .await?
            .ok_or(AuthError::DuplicateEmail)?;

        tracing::info!(email = %user.email, "User registered");

        Ok(UserInfo {
            email: user.email,
            status: user.status,
            created_at: user.created_at,
            updated_at: user.updated_at,
        })
    }

    async fn verify(&self, email: &str, password: &str) -> Result<(), AuthError> {
        Self::require_credentials(email, password)?;

        // Unknown email and wrong password both come back as `false`.
        let is_valid = self.store.verify_user_password(email, password).await?;

        if !is_valid {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(())
    }
}
