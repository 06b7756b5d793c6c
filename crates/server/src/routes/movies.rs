use axum::{
    extract::{rejection::{JsonRejection, PathRejection, QueryRejection}, Path, Query, State},
    Json,
};
use models::movie::{self, MovieFilter, MoviePatch, NewMovie};
use serde::Deserialize;
use service::movie::Deleted;
use tracing::info;

use crate::{errors::JsonApiError, routes::ServerState};

/// Raw filter query; values are normalized by `MovieFilter::from_query`.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FilterQuery {
    /// Exact title to match
    pub title: Option<String>,
    /// Exact release year to match
    pub year: Option<String>,
}

#[utoipa::path(
    post, path = "/movies/", tag = "movies",
    request_body = crate::openapi::CreateMovieDoc,
    responses(
        (status = 200, description = "Created", body = crate::openapi::MovieDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<NewMovie>, JsonRejection>,
) -> Result<Json<movie::Model>, JsonApiError> {
    let Json(input) = payload?;
    let created = state.movies.create(input).await?;
    Ok(Json(created))
}

#[utoipa::path(
    get, path = "/movies/", tag = "movies",
    responses((status = 200, description = "List OK", body = [crate::openapi::MovieDoc]))
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<movie::Model>>, JsonApiError> {
    let list = state.movies.list_all().await?;
    info!(count = list.len(), "list movies");
    Ok(Json(list))
}

#[utoipa::path(
    get, path = "/movies/filter", tag = "movies",
    params(FilterQuery),
    responses(
        (status = 200, description = "Matching movies", body = [crate::openapi::MovieDoc]),
        (status = 400, description = "Invalid year", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn filter(
    State(state): State<ServerState>,
    query: Result<Query<FilterQuery>, QueryRejection>,
) -> Result<Json<Vec<movie::Model>>, JsonApiError> {
    let Query(q) = query?;
    let f = MovieFilter::from_query(q.title, q.year).map_err(service::errors::ServiceError::from)?;
    let list = state.movies.filter(f).await?;
    info!(count = list.len(), "filter movies");
    Ok(Json(list))
}

#[utoipa::path(
    get, path = "/movies/{id}", tag = "movies",
    params(("id" = i32, Path, description = "Movie ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::MovieDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<movie::Model>, JsonApiError> {
    let Path(id) = id?;
    Ok(Json(state.movies.get(id).await?))
}

#[utoipa::path(
    put, path = "/movies/{id}", tag = "movies",
    params(("id" = i32, Path, description = "Movie ID")),
    request_body = crate::openapi::UpdateMovieDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::MovieDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<MoviePatch>, JsonRejection>,
) -> Result<Json<movie::Model>, JsonApiError> {
    let Path(id) = id?;
    let Json(patch) = payload?;
    Ok(Json(state.movies.update(id, patch).await?))
}

#[utoipa::path(
    delete, path = "/movies/{id}", tag = "movies",
    params(("id" = i32, Path, description = "Movie ID")),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::DeletedDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<Deleted>, JsonApiError> {
    let Path(id) = id?;
    Ok(Json(state.movies.delete(id).await?))
}
