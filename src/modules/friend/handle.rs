use actix_web::{delete, get, put, web};
use log::info;

use crate::{
    api::{error, success},
    modules::{
        friend::{repository_pg::FriendRepositoryPg, service::FriendService},
        user::{model::UserResponse, repository_pg::UserRepositoryPg},
    },
};

pub type FriendSvc = FriendService<FriendRepositoryPg, UserRepositoryPg>;

#[put("/users/{id:\\d+}/friends/{friend_id:\\d+}")]
pub async fn add_friend(
    friend_service: web::Data<FriendSvc>,
    path: web::Path<(i64, i64)>,
) -> Result<success::Success<()>, error::Error> {
    let (user_id, friend_id) = path.into_inner();
    info!("addFriend {user_id} -> {friend_id}");
    friend_service.add_friend(user_id, friend_id).await?;
    Ok(success::Success::empty())
}

#[delete("/users/{id:\\d+}/friends/{friend_id:\\d+}")]
pub async fn delete_friend(
    friend_service: web::Data<FriendSvc>,
    path: web::Path<(i64, i64)>,
) -> Result<success::Success<()>, error::Error> {
    let (user_id, friend_id) = path.into_inner();
    info!("deleteFriend {user_id} -> {friend_id}");
    friend_service.delete_friend(user_id, friend_id).await?;
    Ok(success::Success::empty())
}

#[get("/users/{id:\\d+}/friends")]
pub async fn list_friends(
    friend_service: web::Data<FriendSvc>,
    user_id: web::Path<i64>,
) -> Result<success::Success<Vec<UserResponse>>, error::Error> {
    info!("getFriends");
    let friends = friend_service.get_friends(user_id.into_inner()).await?;
    Ok(success::Success::ok(friends))
}

#[get("/users/{id:\\d+}/friends/common/{other_id:\\d+}")]
pub async fn common_friends(
    friend_service: web::Data<FriendSvc>,
    path: web::Path<(i64, i64)>,
) -> Result<success::Success<Vec<UserResponse>>, error::Error> {
    let (user_id, other_id) = path.into_inner();
    info!("getCommonFriends {user_id} & {other_id}");
    let friends = friend_service.get_common_friends(user_id, other_id).await?;
    Ok(success::Success::ok(friends))
}
