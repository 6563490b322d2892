use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;

/// Single MPA classification attached to every film.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    pub id: i32,
    pub name: String,
}

/// Genre tag, many-to-many with films through `film_genre`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: i32,
    pub name: String,
}

/// Film row joined with its rating; genres are filled in by a follow-up
/// batched query.
#[derive(Debug, Clone, FromRow)]
pub struct FilmRow {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub duration: i32,
    pub mpa_id: i32,
    pub mpa_name: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct FilmGenreRow {
    pub film_id: i64,
    pub genre_id: i32,
    pub genre_name: String,
}
