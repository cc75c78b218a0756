use std::sync::Arc;
use std::time::Duration;

use auth::AccessGate;
use auth::IdentityResolver;
use auth::TokenCodec;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_content::create_content;
use super::handlers::create_tag::create_tag;
use super::handlers::create_user::create_user;
use super::handlers::delete_content::delete_content;
use super::handlers::follow_tag::follow_tag;
use super::handlers::follow_tag::unfollow_tag;
use super::handlers::get_content::get_content;
use super::handlers::get_current_user::get_current_user;
use super::handlers::get_feed::get_feed;
use super::handlers::list_content::list_content;
use super::handlers::list_tags::list_tags;
use super::handlers::login::login;
use super::handlers::root::root;
use super::middleware::authenticate as auth_middleware;
use super::middleware::UserLookup;
use crate::domain::content::ports::ContentServicePort;
use crate::domain::tag::ports::TagServicePort;
use crate::domain::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub content_service: Arc<dyn ContentServicePort>,
    pub tag_service: Arc<dyn TagServicePort>,
    pub access_gate: Arc<AccessGate<UserLookup>>,
}

pub fn create_router(
    user_service: Arc<dyn UserServicePort>,
    content_service: Arc<dyn ContentServicePort>,
    tag_service: Arc<dyn TagServicePort>,
    token_codec: Arc<TokenCodec>,
) -> Router {
    let user_lookup = Arc::new(UserLookup::new(Arc::clone(&user_service)));
    let access_gate = Arc::new(AccessGate::new(IdentityResolver::new(
        token_codec,
        user_lookup,
    )));

    let state = AppState {
        user_service,
        content_service,
        tag_service,
        access_gate,
    };

    let public_routes = Router::new()
        .route("/", get(root))
        .route("/token", post(login))
        .route("/users", post(create_user))
        .route("/content", get(list_content))
        .route("/content/:content_id", get(get_content))
        .route("/tags", get(list_tags).post(create_tag));

    let protected_routes = Router::new()
        .route("/users/me", get(get_current_user))
        .route("/content", post(create_content))
        .route("/content/:content_id", delete(delete_content))
        .route("/tags/:tag_id/follow", post(follow_tag).delete(unfollow_tag))
        .route("/feed", get(get_feed))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
