use std::sync::Arc;

use models::movie::{self, MovieFilter, MoviePatch, NewMovie};
use tracing::{info, instrument};

use super::repository::MovieRepository;
use super::Deleted;
use crate::errors::ServiceError;

/// Movie catalog business service independent of web framework.
/// Validates input before any store call and turns missing rows into `NotFound`.
pub struct MovieService<R: MovieRepository> {
    repo: Arc<R>,
}

impl<R: MovieRepository> Clone for MovieService<R> {
    fn clone(&self) -> Self { Self { repo: Arc::clone(&self.repo) } }
}

fn movie_not_found(id: i32) -> ServiceError { ServiceError::not_found(&format!("movie {id}")) }

impl<R: MovieRepository> MovieService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Insert a new movie; the store assigns the id.
    ///
    /// # Examples
    /// ```
    /// use service::movie::{MovieService, repository::mock::MockMovieRepository};
    /// use models::movie::NewMovie;
    /// use std::sync::Arc;
    /// let svc = MovieService::new(Arc::new(MockMovieRepository::default()));
    /// let input = NewMovie { title: "Matrix".into(), director: "Wachowski".into(), year: 1999 };
    /// let created = tokio_test::block_on(svc.create(input)).unwrap();
    /// assert_eq!(created.id, 1);
    /// ```
    #[instrument(skip(self, input), fields(title = %input.title))]
    pub async fn create(&self, input: NewMovie) -> Result<movie::Model, ServiceError> {
        input.validate()?;
        let created = self.repo.create(&input).await?;
        info!(id = created.id, "movie_created");
        Ok(created)
    }

    pub async fn list_all(&self) -> Result<Vec<movie::Model>, ServiceError> {
        self.repo.list(&MovieFilter::default()).await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<movie::Model, ServiceError> {
        self.repo.get(id).await?.ok_or_else(|| movie_not_found(id))
    }

    /// Exact-match filter; an empty filter is the same as `list_all`.
    #[instrument(skip(self))]
    pub async fn filter(&self, filter: MovieFilter) -> Result<Vec<movie::Model>, ServiceError> {
        self.repo.list(&filter).await
    }

    /// Partial update. Only supplied fields change; an empty patch touches
    /// nothing and returns the stored record.
    ///
    /// # Examples
    /// ```
    /// use service::movie::{MovieService, repository::mock::MockMovieRepository};
    /// use models::movie::{MoviePatch, NewMovie, Patch};
    /// use std::sync::Arc;
    /// let svc = MovieService::new(Arc::new(MockMovieRepository::default()));
    /// let created = tokio_test::block_on(svc.create(NewMovie { title: "A".into(), director: "B".into(), year: 2000 })).unwrap();
    /// let patch = MoviePatch { year: Patch::Value(2020), ..Default::default() };
    /// let updated = tokio_test::block_on(svc.update(created.id, patch)).unwrap();
    /// assert_eq!((updated.title.as_str(), updated.director.as_str(), updated.year), ("A", "B", 2020));
    /// ```
    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: i32, patch: MoviePatch) -> Result<movie::Model, ServiceError> {
        let changes = patch.validate()?;
        if changes.is_empty() {
            return self.get(id).await;
        }
        let updated = self.repo.update(id, &changes).await?.ok_or_else(|| movie_not_found(id))?;
        info!(id, "movie_updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<Deleted, ServiceError> {
        if !self.repo.delete(id).await? {
            return Err(movie_not_found(id));
        }
        info!(id, "movie_deleted");
        Ok(Deleted::new(id))
    }
}
