use crate::modules::film::handle::*;
use actix_web::web::ServiceConfig;

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(list_films)
        .service(add_film)
        .service(update_film)
        .service(popular_films)
        .service(list_likes)
        .service(add_like)
        .service(remove_like)
        .service(get_film);
}
