use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::ContentResponseData;
use crate::domain::content::errors::ContentError;
use crate::domain::content::models::ContentTitle;
use crate::domain::content::models::ContentUrl;
use crate::domain::content::models::CreateContentCommand;
use crate::domain::content::ports::ContentServicePort;
use crate::domain::tag::models::TagName;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn create_content(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
    Json(body): Json<CreateContentRequest>,
) -> Result<ApiSuccess<ContentResponseData>, ApiError> {
    state
        .content_service
        .create_content(body.try_into_command()?, user.id)
        .await
        .map_err(ApiError::from)
        .map(|ref content| ApiSuccess::new(StatusCode::CREATED, content.into()))
}

/// HTTP request body for publishing content (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateContentRequest {
    title: String,
    url: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
}

impl CreateContentRequest {
    fn try_into_command(self) -> Result<CreateContentCommand, ContentError> {
        let title = ContentTitle::new(&self.title)?;
        let url = ContentUrl::new(&self.url)?;
        let tags = self
            .tags
            .iter()
            .map(|name| TagName::new(name))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CreateContentCommand::new(title, url, self.description, tags))
    }
}
