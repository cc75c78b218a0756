use axum::extract::State;
use axum::Form;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

/// OAuth2 password flow token endpoint.
///
/// Replies with the bare `{access_token, token_type}` object clients of that
/// flow expect, not the usual envelope.
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Json<TokenResponseData>, ApiError> {
    let token = state
        .user_service
        .authenticate(&form.username, &form.password)
        .await?;

    Ok(Json(TokenResponseData {
        access_token: token.access_token,
        token_type: token.token_type,
    }))
}

/// `application/x-www-form-urlencoded` login body; `username` is the email.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct LoginForm {
    username: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenResponseData {
    pub access_token: String,
    pub token_type: String,
}
