use std::collections::{HashMap, HashSet};

use crate::{
    api::error,
    modules::film::{
        model::{FilmResponse, InsertFilm, UpdateFilm},
        repository::FilmRepository,
        schema::{FilmGenreRow, FilmRow, Genre},
    },
};

const FILM_WITH_RATING: &str = r#"
    SELECT f.id, f.name, f.description, f.release_date, f.duration,
           r.rating_id AS mpa_id, r.rating_name AS mpa_name
    FROM films f
    JOIN rating r ON f.rating_id = r.rating_id
"#;

#[derive(Clone)]
pub struct FilmRepositoryPg {
    pool: sqlx::PgPool,
}

impl FilmRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }

    /// One query over the whole id list, grouped in memory by film id.
    async fn genres_for_films(
        &self,
        film_ids: &[i64],
    ) -> Result<HashMap<i64, Vec<Genre>>, error::SystemError> {
        if film_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, FilmGenreRow>(
            r#"
            SELECT fg.film_id, g.id AS genre_id, g.name AS genre_name
            FROM genre g
            JOIN film_genre fg ON g.id = fg.genre_id
            WHERE fg.film_id = ANY($1)
            ORDER BY g.id
            "#,
        )
        .bind(film_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut by_film: HashMap<i64, Vec<Genre>> = HashMap::new();
        for row in rows {
            by_film
                .entry(row.film_id)
                .or_default()
                .push(Genre { id: row.genre_id, name: row.genre_name });
        }
        Ok(by_film)
    }

    async fn enrich(&self, films: Vec<FilmRow>) -> Result<Vec<FilmResponse>, error::SystemError> {
        let film_ids: Vec<i64> = films.iter().map(|f| f.id).collect();
        let mut by_film = self.genres_for_films(&film_ids).await?;

        Ok(films
            .into_iter()
            .map(|row| {
                let genres = by_film.remove(&row.id).unwrap_or_default();
                FilmResponse::from_row(row, genres)
            })
            .collect())
    }
}

// The service hands over de-duplicated ids; ON CONFLICT keeps the pair
// unique even if it does not.
async fn insert_genres(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    film_id: i64,
    genre_ids: &[i32],
) -> Result<(), error::SystemError> {
    for genre_id in genre_ids.iter().copied() {
        sqlx::query(
            "INSERT INTO film_genre (film_id, genre_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(film_id)
        .bind(genre_id)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

#[async_trait::async_trait]
impl FilmRepository for FilmRepositoryPg {
    async fn find_all(&self) -> Result<Vec<FilmResponse>, error::SystemError> {
        let films =
            sqlx::query_as::<_, FilmRow>(&format!("{FILM_WITH_RATING} ORDER BY f.id"))
                .fetch_all(&self.pool)
                .await?;

        self.enrich(films).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<FilmResponse>, error::SystemError> {
        let film = sqlx::query_as::<_, FilmRow>(&format!("{FILM_WITH_RATING} WHERE f.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match film {
            Some(row) => Ok(self.enrich(vec![row]).await?.into_iter().next()),
            None => Ok(None),
        }
    }

    async fn save(&self, film: &InsertFilm) -> Result<FilmResponse, error::SystemError> {
        let mut tx = self.pool.begin().await?;

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO films (name, description, release_date, duration, rating_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&film.name)
        .bind(&film.description)
        .bind(film.release_date)
        .bind(film.duration)
        .bind(film.rating_id)
        .fetch_one(&mut *tx)
        .await?;

        insert_genres(&mut tx, id, &film.genre_ids).await?;

        tx.commit().await?;

        self.find_by_id(id).await?.ok_or_else(|| {
            error::SystemError::DatabaseError("Saved film missing on re-read".into())
        })
    }

    async fn update(&self, film: &UpdateFilm) -> Result<FilmResponse, error::SystemError> {
        let mut tx = self.pool.begin().await?;

        let rows = sqlx::query(
            r#"
            UPDATE films
            SET name = $2, description = $3, release_date = $4, duration = $5, rating_id = $6
            WHERE id = $1
            "#,
        )
        .bind(film.id)
        .bind(&film.name)
        .bind(&film.description)
        .bind(film.release_date)
        .bind(film.duration)
        .bind(film.rating_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if rows == 0 {
            return Err(error::SystemError::not_found("Film with this id not found"));
        }

        sqlx::query("DELETE FROM film_genre WHERE film_id = $1")
            .bind(film.id)
            .execute(&mut *tx)
            .await?;

        insert_genres(&mut tx, film.id, &film.genre_ids).await?;

        tx.commit().await?;

        self.find_by_id(film.id).await?.ok_or_else(|| {
            error::SystemError::DatabaseError("Updated film missing on re-read".into())
        })
    }

    async fn find_popular(&self, limit: i64) -> Result<Vec<FilmResponse>, error::SystemError> {
        let films = sqlx::query_as::<_, FilmRow>(&format!(
            r#"
            {FILM_WITH_RATING}
            LEFT JOIN likes l ON l.film_id = f.id
            GROUP BY f.id, r.rating_id, r.rating_name
            ORDER BY COUNT(l.user_id) DESC, f.id
            LIMIT $1
            "#
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        self.enrich(films).await
    }

    async fn add_like(&self, film_id: i64, user_id: i64) -> Result<(), error::SystemError> {
        sqlx::query(
            "INSERT INTO likes (user_id, film_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(user_id)
        .bind(film_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn remove_like(&self, film_id: i64, user_id: i64) -> Result<(), error::SystemError> {
        sqlx::query("DELETE FROM likes WHERE film_id = $1 AND user_id = $2")
            .bind(film_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn get_likes(&self, film_id: i64) -> Result<HashSet<i64>, error::SystemError> {
        let users = sqlx::query_scalar::<_, i64>("SELECT user_id FROM likes WHERE film_id = $1")
            .bind(film_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(users.into_iter().collect())
    }
}
