use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct MovieDoc { pub id: i32, pub title: String, pub director: String, pub year: i32 }

#[derive(ToSchema)]
pub struct CreateMovieDoc { pub title: String, pub director: String, pub year: i32 }

/// Only supplied fields are changed; `null` is rejected.
#[derive(ToSchema)]
pub struct UpdateMovieDoc {
    pub title: Option<String>,
    pub director: Option<String>,
    pub year: Option<i32>,
}

#[derive(ToSchema)]
pub struct DeletedDoc { pub status: String, pub id: i32 }

#[derive(ToSchema)]
pub struct ErrorDoc { pub error: String, pub detail: Option<String> }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::movies::create,
        crate::routes::movies::list,
        crate::routes::movies::filter,
        crate::routes::movies::get,
        crate::routes::movies::update,
        crate::routes::movies::delete,
    ),
    components(
        schemas(
            HealthResponse,
            MovieDoc,
            CreateMovieDoc,
            UpdateMovieDoc,
            DeletedDoc,
            ErrorDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "movies")
    )
)]
pub struct ApiDoc;
