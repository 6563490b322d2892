use actix_web::{get, post, put, web};
use log::info;

use crate::{
    api::{error, success},
    modules::user::{model, repository_pg::UserRepositoryPg, service::UserService},
    utils::ValidatedJson,
};

pub type UserSvc = UserService<UserRepositoryPg>;

#[get("/users")]
pub async fn list_users(
    user_service: web::Data<UserSvc>,
) -> Result<success::Success<Vec<model::UserResponse>>, error::Error> {
    info!("getUsers");
    let users = user_service.get_users().await?;
    Ok(success::Success::ok(users))
}

#[post("/users")]
pub async fn add_user(
    user_service: web::Data<UserSvc>,
    user_data: ValidatedJson<model::NewUserModel>,
) -> Result<success::Success<model::UserResponse>, error::Error> {
    info!("addUser");
    let user = user_service.add_user(user_data.0).await?;
    Ok(success::Success::created(user))
}

#[put("/users")]
pub async fn update_user(
    user_service: web::Data<UserSvc>,
    user_data: ValidatedJson<model::UpdateUserModel>,
) -> Result<success::Success<model::UserResponse>, error::Error> {
    info!("updateUser");
    let user = user_service.update_user(user_data.0).await?;
    Ok(success::Success::ok(user))
}

#[get("/users/{id:\\d+}")]
pub async fn get_user(
    user_service: web::Data<UserSvc>,
    user_id: web::Path<i64>,
) -> Result<success::Success<model::UserResponse>, error::Error> {
    info!("getUserById");
    let user = user_service.get_user(user_id.into_inner()).await?;
    Ok(success::Success::ok(user))
}
