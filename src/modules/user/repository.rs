use crate::{
    api::error,
    modules::user::model::{InsertUser, UpdateUser},
    modules::user::schema::UserEntity,
};

#[async_trait::async_trait]
pub trait UserRepository {
    async fn find_all(&self) -> Result<Vec<UserEntity>, error::SystemError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<UserEntity>, error::SystemError>;

    /// Batch lookup for friend resolution. Ids with no matching row simply
    /// produce no entry, so dangling friendship references are skipped.
    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<UserEntity>, error::SystemError>;

    async fn create(&self, user: &InsertUser) -> Result<UserEntity, error::SystemError>;

    /// Returns the number of rows affected; zero means the user does not exist.
    async fn update(&self, user: &UpdateUser) -> Result<u64, error::SystemError>;
}
