pub mod movies;

use axum::{routing::get, Json, Router};
use sea_orm::DatabaseConnection;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;
use service::movie::{MovieService, SeaOrmMovieRepository};
use std::sync::Arc;

/// Shared handler state; cheap to clone, all data lives in the store.
#[derive(Clone)]
pub struct ServerState {
    pub movies: MovieService<SeaOrmMovieRepository>,
}

impl ServerState {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { movies: MovieService::new(Arc::new(SeaOrmMovieRepository::new(db))) }
    }
}

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse))
)]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(crate::openapi::ApiDoc::openapi())
}

/// Build the full application router: health, OpenAPI document and movie routes.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let movie_routes = Router::new()
        .route("/movies", get(movies::list).post(movies::create))
        .route("/movies/", get(movies::list).post(movies::create))
        .route("/movies/filter", get(movies::filter))
        .route(
            "/movies/:id",
            get(movies::get).put(movies::update).delete(movies::delete),
        );

    Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .merge(movie_routes)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // status code and latency
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
