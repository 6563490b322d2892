use crate::modules::friend::handle::*;
use actix_web::web::ServiceConfig;

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(add_friend).service(delete_friend).service(common_friends).service(list_friends);
}
