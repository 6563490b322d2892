use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::modules::film::schema::{FilmRow, Genre, Rating};

// The first public film screening; nothing can be released before it.
const EARLIEST_RELEASE: NaiveDate = match NaiveDate::from_ymd_opt(1895, 12, 28) {
    Some(date) => date,
    None => panic!("invalid earliest release date"),
};

fn validate_release_date(release_date: &NaiveDate) -> Result<(), ValidationError> {
    if *release_date < EARLIEST_RELEASE {
        let mut err = ValidationError::new("release_date");
        err.message = Some("Release date must not be before 1895-12-28".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize)]
pub struct RatingRef {
    pub id: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenreRef {
    pub id: i32,
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewFilmModel {
    #[validate(length(min = 1, message = "Film name must not be blank"))]
    pub name: String,
    #[validate(length(max = 200, message = "Description must be at most 200 characters"))]
    pub description: Option<String>,
    #[validate(custom(function = validate_release_date))]
    pub release_date: Option<NaiveDate>,
    #[validate(range(min = 1, message = "Duration must be positive"))]
    pub duration: i32,
    pub mpa: Option<RatingRef>,
    pub genres: Option<Vec<GenreRef>>,
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFilmModel {
    pub id: Option<i64>,
    #[validate(length(min = 1, message = "Film name must not be blank"))]
    pub name: String,
    #[validate(length(max = 200, message = "Description must be at most 200 characters"))]
    pub description: Option<String>,
    #[validate(custom(function = validate_release_date))]
    pub release_date: Option<NaiveDate>,
    #[validate(range(min = 1, message = "Duration must be positive"))]
    pub duration: i32,
    pub mpa: Option<RatingRef>,
    pub genres: Option<Vec<GenreRef>>,
}

pub struct InsertFilm {
    pub name: String,
    pub description: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub duration: i32,
    pub rating_id: i32,
    pub genre_ids: Vec<i32>,
}

pub struct UpdateFilm {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub duration: i32,
    pub rating_id: i32,
    pub genre_ids: Vec<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilmResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub duration: i32,
    pub mpa: Rating,
    pub genres: Vec<Genre>,
}

impl FilmResponse {
    pub fn from_row(row: FilmRow, genres: Vec<Genre>) -> Self {
        FilmResponse {
            id: row.id,
            name: row.name,
            description: row.description,
            release_date: row.release_date,
            duration: row.duration,
            mpa: Rating { id: row.mpa_id, name: row.mpa_name },
            genres,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_film() -> NewFilmModel {
        NewFilmModel {
            name: "Shrek".to_string(),
            description: Some("An ogre and a donkey".to_string()),
            release_date: NaiveDate::from_ymd_opt(2001, 5, 18),
            duration: 90,
            mpa: Some(RatingRef { id: 2 }),
            genres: None,
        }
    }

    #[test]
    fn valid_film_passes() {
        assert!(valid_film().validate().is_ok());
    }

    #[test]
    fn release_before_first_screening_is_rejected() {
        let mut film = valid_film();
        film.release_date = NaiveDate::from_ymd_opt(1895, 12, 27);
        assert!(film.validate().is_err());

        film.release_date = NaiveDate::from_ymd_opt(1895, 12, 28);
        assert!(film.validate().is_ok());
    }

    #[test]
    fn overlong_description_is_rejected() {
        let mut film = valid_film();
        film.description = Some("x".repeat(201));
        assert!(film.validate().is_err());
    }

    #[test]
    fn non_positive_duration_is_rejected() {
        let mut film = valid_film();
        film.duration = 0;
        assert!(film.validate().is_err());
    }

    #[test]
    fn request_body_uses_camel_case() {
        let film: NewFilmModel = serde_json::from_value(json!({
            "name": "Shrek",
            "releaseDate": "2001-05-18",
            "duration": 90,
            "mpa": { "id": 2 },
            "genres": [{ "id": 1 }, { "id": 1 }, { "id": 2 }]
        }))
        .unwrap();

        assert_eq!(film.release_date, NaiveDate::from_ymd_opt(2001, 5, 18));
        assert_eq!(film.genres.as_ref().map(Vec::len), Some(3));
    }

    #[test]
    fn response_serializes_rating_and_genres() {
        let response = FilmResponse {
            id: 7,
            name: "Shrek".to_string(),
            description: None,
            release_date: NaiveDate::from_ymd_opt(2001, 5, 18),
            duration: 90,
            mpa: Rating { id: 2, name: "PG".to_string() },
            genres: vec![Genre { id: 3, name: "Cartoon".to_string() }],
        };

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["releaseDate"], "2001-05-18");
        assert_eq!(value["mpa"]["name"], "PG");
        assert_eq!(value["genres"][0]["id"], 3);
    }
}
