use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use super::TagResponseData;
use crate::domain::tag::ports::TagServicePort;
use crate::inbound::http::router::AppState;

pub async fn list_tags(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<TagResponseData>>, ApiError> {
    state
        .tag_service
        .list_tags()
        .await
        .map_err(ApiError::from)
        .map(|tags| {
            let tag_data: Vec<TagResponseData> = tags.iter().map(|t| t.into()).collect();
            ApiSuccess::new(StatusCode::OK, tag_data)
        })
}
