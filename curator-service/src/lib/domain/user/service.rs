use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::Claims;
use chrono::SubsecRound;
use chrono::Utc;

use crate::domain::user::models::AccessToken;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Password hashing and verification run on the blocking thread pool.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hashing and token issuance
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        let CreateUserCommand {
            email,
            full_name,
            password,
        } = command;

        if self.repository.find_by_email(email.as_str()).await?.is_some() {
            tracing::info!(reason = "duplicate_email", "Registration rejected");
            return Err(UserError::EmailAlreadyRegistered(email.to_string()));
        }

        let authenticator = Arc::clone(&self.authenticator);
        let password_hash =
            tokio::task::spawn_blocking(move || authenticator.hash_password(&password))
                .await
                .map_err(|e| UserError::Unknown(e.to_string()))?
                .map_err(|e| UserError::Password(e.to_string()))?;

        let user = User {
            id: UserId::new(),
            email,
            full_name,
            password_hash,
            // Microseconds, as stored
            created_at: Utc::now().trunc_subsecs(6),
        };

        let created_user = self.repository.create(user).await?;
        tracing::info!(user_id = %created_user.id, "User registered");

        Ok(created_user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        self.repository.find_by_email(email).await
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<AccessToken, UserError> {
        let Some(user) = self.repository.find_by_email(email).await? else {
            tracing::info!(reason = "unknown_email", "Login rejected");
            return Err(UserError::InvalidCredentials);
        };

        let authenticator = Arc::clone(&self.authenticator);
        let password = password.to_string();
        let stored_hash = user.password_hash.clone();
        let claims = Claims::for_subject(user.email.as_str());

        let result = tokio::task::spawn_blocking(move || {
            authenticator.authenticate(&password, &stored_hash, claims)
        })
        .await
        .map_err(|e| UserError::Unknown(e.to_string()))?;

        match result {
            Ok(result) => {
                if self.authenticator.needs_rehash(&user.password_hash) {
                    tracing::debug!(user_id = %user.id, "Stored password hash uses outdated parameters");
                }
                tracing::info!(user_id = %user.id, "User logged in");

                Ok(AccessToken {
                    access_token: result.access_token,
                    token_type: result.token_type.to_string(),
                })
            }
            Err(AuthenticationError::InvalidCredentials) => {
                tracing::info!(user_id = %user.id, reason = "wrong_password", "Login rejected");
                Err(UserError::InvalidCredentials)
            }
            Err(AuthenticationError::PasswordError(e)) => Err(UserError::Password(e.to_string())),
            Err(AuthenticationError::TokenError(e)) => Err(UserError::Token(e.to_string())),
        }
    }
}
