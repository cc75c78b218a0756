use std::sync::Arc;

use async_trait::async_trait;
use auth::IdentityError;
use auth::PrincipalLookup;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::user::models::User;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

/// Extension type holding the user resolved for the current request
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

/// Resolves token subjects (emails) to users through the user service.
pub struct UserLookup {
    user_service: Arc<dyn UserServicePort>,
}

impl UserLookup {
    pub fn new(user_service: Arc<dyn UserServicePort>) -> Self {
        Self { user_service }
    }
}

#[async_trait]
impl PrincipalLookup for UserLookup {
    type Principal = User;
    type Error = UserError;

    async fn find_by_subject(&self, subject: &str) -> Result<Option<User>, UserError> {
        self.user_service.find_user_by_email(subject).await
    }
}

impl From<IdentityError<UserError>> for ApiError {
    fn from(err: IdentityError<UserError>) -> Self {
        match err {
            IdentityError::Unauthenticated => {
                ApiError::Unauthorized("Could not validate credentials".to_string())
            }
            IdentityError::Inactive => ApiError::BadRequest("Inactive user".to_string()),
            IdentityError::Lookup(e) => ApiError::from(e),
        }
    }
}

/// Middleware that resolves the bearer token to an active user and adds it to
/// request extensions. Short-circuits with 401 otherwise.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    // A header that is not valid UTF-8 counts as missing
    let authorization = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let user = state
        .access_gate
        .current_active_identity(authorization)
        .await?;

    req.extensions_mut().insert(AuthenticatedUser(user));

    Ok(next.run(req).await)
}
