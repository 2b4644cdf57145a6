pub mod health;
pub mod root;
pub mod session;
pub mod teacher;

use crate::{doc::ApiDoc, state::AppState};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

/// Builds the application router with its OpenAPI document and Swagger UI
pub fn create_router(state: AppState) -> Router {
    let (router, api) = OpenApiRouter::<AppState>::with_openapi(ApiDoc::openapi())
        .routes(routes!(root::root))
        .routes(routes!(health::health))
        .routes(routes!(session::get_sessions, session::create_session))
        .routes(routes!(session::check_conflicts))
        .routes(routes!(
            session::get_session,
            session::update_session,
            session::delete_session
        ))
        .routes(routes!(teacher::get_teachers))
        .routes(routes!(teacher::get_teacher_subjects))
        .with_state(state)
        .split_for_parts();

    router
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", api))
        .layer(ServiceBuilder::new().layer(CompressionLayer::new()))
}
