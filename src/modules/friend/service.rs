use log::{debug, warn};
use std::sync::Arc;

use crate::{
    api::error,
    modules::{
        friend::repository::FriendRepository,
        user::{model::UserResponse, repository::UserRepository, schema::UserEntity},
    },
};

#[derive(Clone)]
pub struct FriendService<F, U>
where
    F: FriendRepository + Send + Sync,
    U: UserRepository + Send + Sync,
{
    friend_repo: Arc<F>,
    user_repo: Arc<U>,
}

impl<F, U> FriendService<F, U>
where
    F: FriendRepository + Send + Sync,
    U: UserRepository + Send + Sync,
{
    pub fn with_dependencies(friend_repo: Arc<F>, user_repo: Arc<U>) -> Self {
        FriendService { friend_repo, user_repo }
    }

    async fn ensure_user(&self, id: i64) -> Result<UserEntity, error::SystemError> {
        self.user_repo.find_by_id(id).await?.ok_or_else(|| {
            warn!("User {id} not found");
            error::SystemError::not_found("User with this id not found")
        })
    }

    pub async fn add_friend(&self, user_id: i64, friend_id: i64) -> Result<(), error::SystemError> {
        self.ensure_user(user_id).await?;
        self.ensure_user(friend_id).await?;

        let friends = self.friend_repo.find_friend_ids(user_id).await?;
        if friends.contains(&friend_id) {
            warn!("the friendship was already created");
            return Err(error::SystemError::conflict("The friendship was already created"));
        }

        debug!("add friend {friend_id} to user {user_id}");
        self.friend_repo.create_friendship(user_id, friend_id).await
    }

    pub async fn delete_friend(
        &self,
        user_id: i64,
        friend_id: i64,
    ) -> Result<(), error::SystemError> {
        self.ensure_user(user_id).await?;
        self.ensure_user(friend_id).await?;

        let removed = self.friend_repo.delete_friendship(user_id, friend_id).await?;
        if removed == 0 {
            debug!("no friendship edge from {user_id} to {friend_id}, nothing to delete");
        }
        Ok(())
    }

    pub async fn get_friends(&self, user_id: i64) -> Result<Vec<UserResponse>, error::SystemError> {
        self.ensure_user(user_id).await?;

        let ids: Vec<i64> = self.friend_repo.find_friend_ids(user_id).await?.into_iter().collect();
        self.resolve_users(&ids).await
    }

    pub async fn get_common_friends(
        &self,
        user_id: i64,
        other_id: i64,
    ) -> Result<Vec<UserResponse>, error::SystemError> {
        self.ensure_user(user_id).await?;
        self.ensure_user(other_id).await?;

        let first = self.friend_repo.find_friend_ids(user_id).await?;
        let second = self.friend_repo.find_friend_ids(other_id).await?;

        let common: Vec<i64> = first.intersection(&second).copied().collect();
        self.resolve_users(&common).await
    }

    /// Ids that no longer resolve to a user row are skipped silently.
    async fn resolve_users(&self, ids: &[i64]) -> Result<Vec<UserResponse>, error::SystemError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let users = self.user_repo.find_by_ids(ids).await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }
}
