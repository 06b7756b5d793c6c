use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use models::db::{connect_with_config, migrate, DatabaseConfig};
use serde_json::{json, Value};
use server::routes::{build_router, ServerState};
use tower::ServiceExt;
use tower_http::cors::CorsLayer;

async fn app() -> Router {
    let db = connect_with_config(&DatabaseConfig::in_memory()).await.expect("connect in-memory db");
    migrate(&db).await.expect("migrate");
    build_router(ServerState::new(db), CorsLayer::very_permissive())
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            req = req.header(CONTENT_TYPE, "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };
    let res = app.clone().oneshot(req.body(body).unwrap()).await.unwrap();
    let status = res.status();
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

async fn create(app: &Router, title: &str, director: &str, year: i32) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/movies/",
        Some(json!({"title": title, "director": director, "year": year})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body
}

#[tokio::test]
async fn health_is_ok() {
    let app = app().await;
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn matrix_scenario_with_legacy_field_names() {
    let app = app().await;

    let (status, created) = send(
        &app,
        Method::POST,
        "/movies/",
        Some(json!({"titulo": "Matrix", "diretor": "Wachowski", "ano": 1999})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["id"], 1);

    let (status, got) = send(&app, Method::GET, "/movies/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(got, json!({"id": 1, "title": "Matrix", "director": "Wachowski", "year": 1999}));

    let (status, deleted) = send(&app, Method::DELETE, "/movies/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["id"], 1);
    assert!(deleted["status"].is_string());

    let (status, body) = send(&app, Method::GET, "/movies/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not Found");
}

#[tokio::test]
async fn list_answers_with_and_without_trailing_slash() {
    let app = app().await;
    create(&app, "Heat", "Mann", 1995).await;
    create(&app, "Thief", "Mann", 1981).await;

    let (status, with_slash) = send(&app, Method::GET, "/movies/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(with_slash.as_array().map(Vec::len), Some(2));

    let (status, without_slash) = send(&app, Method::GET, "/movies", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(with_slash, without_slash);
}

#[tokio::test]
async fn create_rejects_missing_and_blank_fields() {
    let app = app().await;

    let (status, body) = send(&app, Method::POST, "/movies/", Some(json!({"title": "Heat", "director": "Mann"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation Error");

    let (status, _) = send(&app, Method::POST, "/movies/", Some(json!({"title": "", "director": "Mann", "year": 1995}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::POST, "/movies/", Some(json!({"title": "Heat", "director": "Mann", "year": "1995"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, list) = send(&app, Method::GET, "/movies/", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn filter_combines_conditions_with_and() {
    let app = app().await;
    create(&app, "Dune", "Lynch", 1984).await;
    create(&app, "Dune", "Villeneuve", 2021).await;
    create(&app, "Arrival", "Villeneuve", 2016).await;

    let (status, body) = send(&app, Method::GET, "/movies/filter?title=Dune&year=2021", None).await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["director"], "Villeneuve");

    let (_, body) = send(&app, Method::GET, "/movies/filter?title=Dune", None).await;
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (_, body) = send(&app, Method::GET, "/movies/filter?year=2016", None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (_, body) = send(&app, Method::GET, "/movies/filter?title=dune", None).await;
    assert_eq!(body, json!([]));

    let (_, all) = send(&app, Method::GET, "/movies/", None).await;
    let (_, unfiltered) = send(&app, Method::GET, "/movies/filter", None).await;
    assert_eq!(all, unfiltered);
    let (_, empty_params) = send(&app, Method::GET, "/movies/filter?title=&year=", None).await;
    assert_eq!(all, empty_params);

    let (status, _) = send(&app, Method::GET, "/movies/filter?year=soon", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_filter_query_gets_json_error_body() {
    let app = app().await;

    let (status, body) = send(&app, Method::GET, "/movies/filter?title=a&title=b", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Bad Request");
    assert!(body["detail"].as_str().unwrap().contains("duplicate field"));

    let (status, body) = send(&app, Method::GET, "/movies/filter?year=soon", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation Error");
}

#[tokio::test]
async fn put_updates_only_supplied_fields() {
    let app = app().await;
    let created = create(&app, "A", "B", 2000).await;
    let id = created["id"].as_i64().unwrap();

    let (status, updated) = send(&app, Method::PUT, &format!("/movies/{id}"), Some(json!({"year": 2020}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated, json!({"id": id, "title": "A", "director": "B", "year": 2020}));

    let (status, same) = send(&app, Method::PUT, &format!("/movies/{id}"), Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(same, updated);

    let (status, _) = send(&app, Method::PUT, &format!("/movies/{id}"), Some(json!({"title": null}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, stored) = send(&app, Method::GET, &format!("/movies/{id}"), None).await;
    assert_eq!(stored, updated);
}

#[tokio::test]
async fn unknown_ids_are_not_found_for_put_and_delete() {
    let app = app().await;
    let (status, _) = send(&app, Method::PUT, "/movies/404", Some(json!({"year": 1}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, Method::DELETE, "/movies/404", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (_, list) = send(&app, Method::GET, "/movies/", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn non_integer_id_is_bad_request() {
    let app = app().await;
    let (status, body) = send(&app, Method::GET, "/movies/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Bad Request");
}

#[tokio::test]
async fn openapi_document_lists_movie_routes() {
    let app = app().await;
    let (status, doc) = send(&app, Method::GET, "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    for path in ["/movies/", "/movies/filter", "/movies/{id}", "/health"] {
        assert!(doc["paths"].get(path).is_some(), "missing {path}");
    }
}
