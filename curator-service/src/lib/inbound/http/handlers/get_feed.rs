use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::ContentResponseData;
use super::PageQuery;
use crate::domain::content::ports::ContentServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn get_feed(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
    Query(query): Query<PageQuery>,
) -> Result<ApiSuccess<Vec<ContentResponseData>>, ApiError> {
    state
        .content_service
        .get_feed(user.id, query.into())
        .await
        .map_err(ApiError::from)
        .map(|items| {
            let content_data: Vec<ContentResponseData> = items.iter().map(|c| c.into()).collect();
            ApiSuccess::new(StatusCode::OK, content_data)
        })
}
