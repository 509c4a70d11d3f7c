pub mod auth;
pub mod crud;

use axum::{middleware, routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::openapi::{ApiDoc, HealthResponse};
use crate::state::ServerState;
use crud::policies;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "Service is up", body = HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

fn api_routes(state: &ServerState) -> Router<ServerState> {
    let s = &state.services;
    Router::new()
        .nest("/auth", auth::router())
        .nest("/customer", crud::router(s.customers.clone(), policies::CUSTOMER))
        .nest("/laundry-store", crud::router(s.laundry_stores.clone(), policies::LAUNDRY_STORE))
        .nest("/staff-trip", crud::router(s.staff_trips.clone(), policies::STAFF_TRIP))
        .nest("/order", crud::router(s.orders.clone(), policies::ORDER))
        .nest("/transaction", crud::router(s.transactions.clone(), policies::ADMIN_ONLY))
        .nest("/payment", crud::router(s.payments.clone(), policies::ADMIN_ONLY))
        .nest("/wallet", crud::router(s.wallets.clone(), policies::ADMIN_ONLY))
        .nest("/building", crud::router(s.buildings.clone(), policies::ADMIN_ONLY))
        .nest("/staff", crud::router(s.staff.clone(), policies::ADMIN_ONLY))
        .nest("/time-schedule", crud::router(s.time_schedules.clone(), policies::ADMIN_ONLY))
}

/// Build the full application router: health, auth, every CRUD resource and,
/// when enabled, Swagger UI. All of it sits behind the bearer-token middleware.
pub fn build_router(state: ServerState, cors: CorsLayer, docs_enabled: bool) -> Router {
    let mut app = Router::new()
        .route("/health", get(health))
        .nest("/api/v1", api_routes(&state));

    if docs_enabled {
        app = app.merge(SwaggerUi::new("/swagger/api/v1").url("/swagger/v1/swagger.json", ApiDoc::openapi()));
    }

    app.layer(middleware::from_fn_with_state(state.clone(), auth::require_bearer_token_state))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
