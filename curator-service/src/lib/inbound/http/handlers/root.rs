use axum::Json;
use serde::Serialize;

pub async fn root() -> Json<RootResponseData> {
    Json(RootResponseData {
        message: "Welcome to the Curator API!".to_string(),
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RootResponseData {
    pub message: String,
}
