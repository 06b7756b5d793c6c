use async_trait::async_trait;
use models::movie::{self, MovieChanges, MovieFilter, NewMovie};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use tracing::debug;

use crate::errors::{db_err, ServiceError};

/// Persistence operations for movies. Each method is one logical store interaction.
#[async_trait]
pub trait MovieRepository: Send + Sync {
    async fn list(&self, filter: &MovieFilter) -> Result<Vec<movie::Model>, ServiceError>;
    async fn create(&self, input: &NewMovie) -> Result<movie::Model, ServiceError>;
    async fn get(&self, id: i32) -> Result<Option<movie::Model>, ServiceError>;
    /// `Ok(None)` when no row has this id; nothing is written in that case.
    async fn update(&self, id: i32, changes: &MovieChanges) -> Result<Option<movie::Model>, ServiceError>;
    /// `Ok(false)` when no row has this id.
    async fn delete(&self, id: i32) -> Result<bool, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmMovieRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmMovieRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl MovieRepository for SeaOrmMovieRepository {
    async fn list(&self, filter: &MovieFilter) -> Result<Vec<movie::Model>, ServiceError> {
        // No ORDER BY: rows come back in whatever order the store yields.
        filter.apply(movie::Entity::find()).all(&self.db).await.map_err(db_err)
    }

    async fn create(&self, input: &NewMovie) -> Result<movie::Model, ServiceError> {
        Ok(movie::create(&self.db, input).await?)
    }

    async fn get(&self, id: i32) -> Result<Option<movie::Model>, ServiceError> {
        movie::Entity::find_by_id(id).one(&self.db).await.map_err(db_err)
    }

    async fn update(&self, id: i32, changes: &MovieChanges) -> Result<Option<movie::Model>, ServiceError> {
        if changes.is_empty() {
            return self.get(id).await;
        }
        // Single UPDATE statement; zero affected rows means the id is unknown.
        let mut am = <movie::ActiveModel as ActiveModelTrait>::default();
        changes.apply_to(&mut am);
        let res = movie::Entity::update_many()
            .set(am)
            .filter(movie::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if res.rows_affected == 0 {
            return Ok(None);
        }
        debug!(id, rows = res.rows_affected, "movie row updated");
        self.get(id).await
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        let res = movie::Entity::delete_by_id(id).exec(&self.db).await.map_err(db_err)?;
        debug!(id, rows = res.rows_affected, "movie row deleted");
        Ok(res.rows_affected > 0)
    }
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Mutex;

    #[derive(Default)]
    pub struct MockMovieRepository {
        rows: Mutex<BTreeMap<i32, movie::Model>>,
        next_id: Mutex<i32>,
        mutations: AtomicUsize,
    }

    impl MockMovieRepository {
        /// Number of writes (insert, update, delete) that reached the store.
        pub fn mutations(&self) -> usize { self.mutations.load(Ordering::SeqCst) }
    }

    #[async_trait]
    impl MovieRepository for MockMovieRepository {
        async fn list(&self, filter: &MovieFilter) -> Result<Vec<movie::Model>, ServiceError> {
            let rows = self.rows.lock().await;
            Ok(rows.values().filter(|m| filter.matches(m)).cloned().collect())
        }

        async fn create(&self, input: &NewMovie) -> Result<movie::Model, ServiceError> {
            input.validate()?;
            let mut next_id = self.next_id.lock().await;
            *next_id += 1;
            let m = movie::Model {
                id: *next_id,
                title: input.title.clone(),
                director: input.director.clone(),
                year: input.year,
            };
            self.rows.lock().await.insert(m.id, m.clone());
            self.mutations.fetch_add(1, Ordering::SeqCst);
            Ok(m)
        }

        async fn get(&self, id: i32) -> Result<Option<movie::Model>, ServiceError> {
            Ok(self.rows.lock().await.get(&id).cloned())
        }

        async fn update(&self, id: i32, changes: &MovieChanges) -> Result<Option<movie::Model>, ServiceError> {
            let mut rows = self.rows.lock().await;
            let Some(m) = rows.get_mut(&id) else { return Ok(None) };
            changes.apply_to_model(m);
            self.mutations.fetch_add(1, Ordering::SeqCst);
            Ok(Some(m.clone()))
        }

        async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
            let removed = self.rows.lock().await.remove(&id).is_some();
            if removed {
                self.mutations.fetch_add(1, Ordering::SeqCst);
            }
            Ok(removed)
        }
    }
}
