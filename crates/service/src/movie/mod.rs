//! Movie catalog: repository abstraction and application service.

pub mod repository;
pub mod service;

use serde::Serialize;

pub use repository::{MovieRepository, SeaOrmMovieRepository};
pub use service::MovieService;

/// Confirmation returned by a successful delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Deleted {
    pub status: &'static str,
    pub id: i32,
}

impl Deleted {
    pub fn new(id: i32) -> Self { Self { status: "movie deleted", id } }
}
