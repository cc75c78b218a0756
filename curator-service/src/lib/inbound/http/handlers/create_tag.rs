use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::TagResponseData;
use crate::domain::tag::errors::TagError;
use crate::domain::tag::models::TagName;
use crate::domain::tag::ports::TagServicePort;
use crate::inbound::http::router::AppState;

pub async fn create_tag(
    State(state): State<AppState>,
    Json(body): Json<CreateTagRequest>,
) -> Result<ApiSuccess<TagResponseData>, ApiError> {
    let name = TagName::new(&body.name).map_err(TagError::from)?;

    state
        .tag_service
        .create_tag(name)
        .await
        .map_err(ApiError::from)
        .map(|ref tag| ApiSuccess::new(StatusCode::CREATED, tag.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateTagRequest {
    name: String,
}
