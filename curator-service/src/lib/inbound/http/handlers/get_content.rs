use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use super::ContentResponseData;
use crate::domain::content::errors::ContentError;
use crate::domain::content::models::ContentId;
use crate::domain::content::ports::ContentServicePort;
use crate::inbound::http::router::AppState;

pub async fn get_content(
    State(state): State<AppState>,
    Path(content_id): Path<String>,
) -> Result<ApiSuccess<ContentResponseData>, ApiError> {
    let content_id = ContentId::from_string(&content_id).map_err(ContentError::from)?;

    state
        .content_service
        .get_content(content_id)
        .await
        .map_err(ApiError::from)
        .map(|ref content| ApiSuccess::new(StatusCode::OK, content.into()))
}
