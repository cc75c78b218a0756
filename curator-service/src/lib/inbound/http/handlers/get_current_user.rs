use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::TagResponseData;
use super::UserResponseData;
use crate::domain::tag::ports::TagServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn get_current_user(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<CurrentUserResponseData>, ApiError> {
    let followed_tags = state.tag_service.followed_tags(user.id).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        CurrentUserResponseData {
            user: (&user).into(),
            followed_tags: followed_tags.iter().map(TagResponseData::from).collect(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentUserResponseData {
    #[serde(flatten)]
    pub user: UserResponseData,
    pub followed_tags: Vec<TagResponseData>,
}
