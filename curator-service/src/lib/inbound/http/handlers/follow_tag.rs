use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::TagResponseData;
use crate::domain::tag::errors::TagError;
use crate::domain::tag::models::Tag;
use crate::domain::tag::models::TagId;
use crate::domain::tag::ports::TagServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// Both endpoints reply with the caller's followed tags after the change.
pub async fn follow_tag(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
    Path(tag_id): Path<String>,
) -> Result<ApiSuccess<Vec<TagResponseData>>, ApiError> {
    let tag_id = TagId::from_string(&tag_id).map_err(TagError::from)?;

    state
        .tag_service
        .follow_tag(user.id, tag_id)
        .await
        .map_err(ApiError::from)
        .map(|ref tags| followed_tags_response(tags))
}

pub async fn unfollow_tag(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
    Path(tag_id): Path<String>,
) -> Result<ApiSuccess<Vec<TagResponseData>>, ApiError> {
    let tag_id = TagId::from_string(&tag_id).map_err(TagError::from)?;

    state
        .tag_service
        .unfollow_tag(user.id, tag_id)
        .await
        .map_err(ApiError::from)
        .map(|ref tags| followed_tags_response(tags))
}

fn followed_tags_response(tags: &[Tag]) -> ApiSuccess<Vec<TagResponseData>> {
    ApiSuccess::new(
        StatusCode::OK,
        tags.iter().map(TagResponseData::from).collect(),
    )
}
