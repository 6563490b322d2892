use std::collections::HashSet;

use crate::{
    api::error,
    modules::film::model::{FilmResponse, InsertFilm, UpdateFilm},
};

#[async_trait::async_trait]
pub trait FilmRepository {
    /// All films with rating resolved and genres populated by a single
    /// batched follow-up query over the full id list.
    async fn find_all(&self) -> Result<Vec<FilmResponse>, error::SystemError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<FilmResponse>, error::SystemError>;

    /// Inserts the film row, then its de-duplicated genre associations, and
    /// re-reads the enriched row as the canonical state.
    async fn save(&self, film: &InsertFilm) -> Result<FilmResponse, error::SystemError>;

    /// Fails with NotFound when zero rows are affected; otherwise replaces
    /// all genre associations (delete-then-insert) and re-reads.
    async fn update(&self, film: &UpdateFilm) -> Result<FilmResponse, error::SystemError>;

    /// Films ordered by like count, most liked first.
    async fn find_popular(&self, limit: i64) -> Result<Vec<FilmResponse>, error::SystemError>;

    async fn add_like(&self, film_id: i64, user_id: i64) -> Result<(), error::SystemError>;

    async fn remove_like(&self, film_id: i64, user_id: i64) -> Result<(), error::SystemError>;

    async fn get_likes(&self, film_id: i64) -> Result<HashSet<i64>, error::SystemError>;
}
