use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::ContentResponseData;
use crate::domain::content::errors::ContentError;
use crate::domain::content::models::ContentId;
use crate::domain::content::ports::ContentServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// Only the owner may delete; the deleted item is echoed back.
pub async fn delete_content(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
    Path(content_id): Path<String>,
) -> Result<ApiSuccess<ContentResponseData>, ApiError> {
    let content_id = ContentId::from_string(&content_id).map_err(ContentError::from)?;

    state
        .content_service
        .delete_content(content_id, user.id)
        .await
        .map_err(ApiError::from)
        .map(|ref content| ApiSuccess::new(StatusCode::OK, content.into()))
}
