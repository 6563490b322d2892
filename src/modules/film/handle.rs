use actix_web::{delete, get, post, put, web};
use log::info;
use serde::Deserialize;

use crate::{
    api::{error, success},
    modules::{
        film::{model, repository_pg::FilmRepositoryPg, service::FilmService},
        user::repository_pg::UserRepositoryPg,
    },
    utils::ValidatedJson,
};

pub type FilmSvc = FilmService<FilmRepositoryPg, UserRepositoryPg>;

#[derive(Deserialize)]
pub struct PopularQuery {
    pub count: Option<i64>,
}

#[get("/films")]
pub async fn list_films(
    film_service: web::Data<FilmSvc>,
) -> Result<success::Success<Vec<model::FilmResponse>>, error::Error> {
    info!("getFilms");
    let films = film_service.get_films().await?;
    Ok(success::Success::ok(films))
}

#[post("/films")]
pub async fn add_film(
    film_service: web::Data<FilmSvc>,
    film_data: ValidatedJson<model::NewFilmModel>,
) -> Result<success::Success<model::FilmResponse>, error::Error> {
    info!("addFilm");
    let film = film_service.add_film(film_data.0).await?;
    Ok(success::Success::created(film))
}

#[put("/films")]
pub async fn update_film(
    film_service: web::Data<FilmSvc>,
    film_data: ValidatedJson<model::UpdateFilmModel>,
) -> Result<success::Success<model::FilmResponse>, error::Error> {
    info!("updateFilm");
    let film = film_service.update_film(film_data.0).await?;
    Ok(success::Success::ok(film))
}

#[get("/films/popular")]
pub async fn popular_films(
    film_service: web::Data<FilmSvc>,
    query: web::Query<PopularQuery>,
) -> Result<success::Success<Vec<model::FilmResponse>>, error::Error> {
    info!("getPopularFilms");
    let films = film_service.get_popular(query.count).await?;
    Ok(success::Success::ok(films))
}

#[get("/films/{id:\\d+}")]
pub async fn get_film(
    film_service: web::Data<FilmSvc>,
    film_id: web::Path<i64>,
) -> Result<success::Success<model::FilmResponse>, error::Error> {
    info!("getFilmById");
    let film = film_service.get_film(film_id.into_inner()).await?;
    Ok(success::Success::ok(film))
}

#[get("/films/{id:\\d+}/likes")]
pub async fn list_likes(
    film_service: web::Data<FilmSvc>,
    film_id: web::Path<i64>,
) -> Result<success::Success<Vec<i64>>, error::Error> {
    info!("getLikes");
    let likes = film_service.get_likes(film_id.into_inner()).await?;
    Ok(success::Success::ok(likes))
}

#[put("/films/{id:\\d+}/like/{user_id:\\d+}")]
pub async fn add_like(
    film_service: web::Data<FilmSvc>,
    path: web::Path<(i64, i64)>,
) -> Result<success::Success<()>, error::Error> {
    let (film_id, user_id) = path.into_inner();
    info!("addLike film {film_id} by user {user_id}");
    film_service.add_like(film_id, user_id).await?;
    Ok(success::Success::empty())
}

#[delete("/films/{id:\\d+}/like/{user_id:\\d+}")]
pub async fn remove_like(
    film_service: web::Data<FilmSvc>,
    path: web::Path<(i64, i64)>,
) -> Result<success::Success<()>, error::Error> {
    let (film_id, user_id) = path.into_inner();
    info!("removeLike film {film_id} by user {user_id}");
    film_service.remove_like(film_id, user_id).await?;
    Ok(success::Success::empty())
}
