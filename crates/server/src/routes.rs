pub mod actions;
pub mod auth;
pub mod pages;

use axum::{
    routing::{get, post, put},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;
use service::cache::routes as views;

use crate::state::ServerState;

pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

/// Build the full application router: health, auth, pages and actions.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/health", get(health))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout));

    let page_routes = Router::new()
        .route(views::SERVICIOS, get(pages::servicios))
        .route(views::PERFIL, get(pages::perfil));

    let action_routes = Router::new()
        .route("/actions/profile", post(actions::update_profile))
        .route("/actions/servicios", post(actions::create_servicio))
        .route("/actions/servicios/:id", put(actions::update_servicio).delete(actions::delete_servicio))
        .route("/actions/subservicios", post(actions::create_subservicio))
        .route(
            "/actions/subservicios/:id",
            put(actions::update_subservicio).delete(actions::delete_subservicio),
        );

    public
        .merge(page_routes)
        .merge(action_routes)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // status and latency
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
