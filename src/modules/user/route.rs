use crate::modules::user::handle::*;
use actix_web::web::ServiceConfig;

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(list_users).service(add_user).service(update_user).service(get_user);
}
