use std::collections::HashSet;

use crate::{api::error, modules::friend::repository::FriendRepository};

#[derive(Clone)]
pub struct FriendRepositoryPg {
    pool: sqlx::PgPool,
}

impl FriendRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl FriendRepository for FriendRepositoryPg {
    async fn find_friend_ids(&self, user_id: i64) -> Result<HashSet<i64>, error::SystemError> {
        let ids = sqlx::query_scalar::<_, i64>(
            "SELECT friend_id FROM friendship WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids.into_iter().collect())
    }

    async fn create_friendship(
        &self,
        user_id: i64,
        friend_id: i64,
    ) -> Result<(), error::SystemError> {
        // A concurrent duplicate insert trips the primary key and surfaces as
        // Conflict through the sqlx error mapping.
        sqlx::query("INSERT INTO friendship (user_id, friend_id) VALUES ($1, $2)")
            .bind(user_id)
            .bind(friend_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete_friendship(
        &self,
        user_id: i64,
        friend_id: i64,
    ) -> Result<u64, error::SystemError> {
        let rows = sqlx::query("DELETE FROM friendship WHERE user_id = $1 AND friend_id = $2")
            .bind(user_id)
            .bind(friend_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows)
    }
}
