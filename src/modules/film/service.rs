use log::{debug, warn};
use std::collections::HashSet;
use std::sync::Arc;

use crate::{
    api::error,
    modules::{
        film::{
            model::{FilmResponse, GenreRef, InsertFilm, NewFilmModel, UpdateFilm, UpdateFilmModel},
            repository::FilmRepository,
        },
        user::repository::UserRepository,
    },
};

pub const DEFAULT_POPULAR_COUNT: i64 = 10;

#[derive(Clone)]
pub struct FilmService<F, U>
where
    F: FilmRepository + Send + Sync,
    U: UserRepository + Send + Sync,
{
    film_repo: Arc<F>,
    user_repo: Arc<U>,
}

/// Invalid (non-positive) ids are skipped and duplicates collapse to a single
/// association, first occurrence wins.
fn dedup_genre_ids(genres: Option<&[GenreRef]>) -> Vec<i32> {
    let mut seen = HashSet::new();
    genres
        .unwrap_or_default()
        .iter()
        .map(|genre| genre.id)
        .filter(|id| *id > 0 && seen.insert(*id))
        .collect()
}

impl<F, U> FilmService<F, U>
where
    F: FilmRepository + Send + Sync,
    U: UserRepository + Send + Sync,
{
    pub fn with_dependencies(film_repo: Arc<F>, user_repo: Arc<U>) -> Self {
        FilmService { film_repo, user_repo }
    }

    async fn ensure_user(&self, id: i64) -> Result<(), error::SystemError> {
        if self.user_repo.find_by_id(id).await?.is_none() {
            warn!("User {id} not found");
            return Err(error::SystemError::not_found("User with this id not found"));
        }
        Ok(())
    }

    async fn ensure_film(&self, id: i64) -> Result<(), error::SystemError> {
        if self.film_repo.find_by_id(id).await?.is_none() {
            warn!("Film {id} not found");
            return Err(error::SystemError::not_found("Film with this id not found"));
        }
        Ok(())
    }

    pub async fn get_films(&self) -> Result<Vec<FilmResponse>, error::SystemError> {
        self.film_repo.find_all().await
    }

    pub async fn get_film(&self, id: i64) -> Result<FilmResponse, error::SystemError> {
        self.film_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Film with this id not found"))
    }

    pub async fn add_film(&self, film: NewFilmModel) -> Result<FilmResponse, error::SystemError> {
        // Must fail before any row is written.
        let rating_id = match film.mpa {
            Some(ref mpa) if mpa.id > 0 => mpa.id,
            _ => {
                warn!("Film rating id is missing or zero");
                return Err(error::SystemError::bad_request(
                    "Film rating (MPA) id cannot be empty or zero",
                ));
            }
        };

        let genre_ids = dedup_genre_ids(film.genres.as_deref());
        debug!("add film with {} genre associations", genre_ids.len());

        self.film_repo
            .save(&InsertFilm {
                name: film.name,
                description: film.description,
                release_date: film.release_date,
                duration: film.duration,
                rating_id,
                genre_ids,
            })
            .await
    }

    pub async fn update_film(
        &self,
        film: UpdateFilmModel,
    ) -> Result<FilmResponse, error::SystemError> {
        let id = match film.id {
            Some(id) if id > 0 => id,
            _ => {
                warn!("Film id is empty");
                return Err(error::SystemError::empty_field("ID can't be empty"));
            }
        };

        let rating_id = match film.mpa {
            Some(ref mpa) if mpa.id > 0 => mpa.id,
            _ => {
                warn!("Film rating id is missing or zero");
                return Err(error::SystemError::bad_request(
                    "Film rating (MPA) id cannot be empty or zero",
                ));
            }
        };

        let genre_ids = dedup_genre_ids(film.genres.as_deref());

        self.film_repo
            .update(&UpdateFilm {
                id,
                name: film.name,
                description: film.description,
                release_date: film.release_date,
                duration: film.duration,
                rating_id,
                genre_ids,
            })
            .await
    }

    pub async fn get_popular(
        &self,
        count: Option<i64>,
    ) -> Result<Vec<FilmResponse>, error::SystemError> {
        let limit = match count {
            Some(count) if count > 0 => count,
            _ => DEFAULT_POPULAR_COUNT,
        };
        self.film_repo.find_popular(limit).await
    }

    pub async fn add_like(&self, film_id: i64, user_id: i64) -> Result<(), error::SystemError> {
        self.ensure_film(film_id).await?;
        self.ensure_user(user_id).await?;

        debug!("user {user_id} likes film {film_id}");
        self.film_repo.add_like(film_id, user_id).await
    }

    pub async fn remove_like(&self, film_id: i64, user_id: i64) -> Result<(), error::SystemError> {
        self.ensure_film(film_id).await?;
        self.ensure_user(user_id).await?;

        self.film_repo.remove_like(film_id, user_id).await
    }

    pub async fn get_likes(&self, film_id: i64) -> Result<Vec<i64>, error::SystemError> {
        self.ensure_film(film_id).await?;

        let mut likes: Vec<i64> = self.film_repo.get_likes(film_id).await?.into_iter().collect();
        likes.sort_unstable();
        Ok(likes)
    }
}
