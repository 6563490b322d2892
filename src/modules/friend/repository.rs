use std::collections::HashSet;

use crate::api::error;

/// Friendship edges are directed: `create_friendship(a, b)` records only that
/// `a` added `b`. There is no implicit reciprocal edge.
#[async_trait::async_trait]
pub trait FriendRepository {
    async fn find_friend_ids(&self, user_id: i64) -> Result<HashSet<i64>, error::SystemError>;

    async fn create_friendship(
        &self,
        user_id: i64,
        friend_id: i64,
    ) -> Result<(), error::SystemError>;

    /// Returns the number of rows removed; zero when no edge existed.
    async fn delete_friendship(
        &self,
        user_id: i64,
        friend_id: i64,
    ) -> Result<u64, error::SystemError>;
}
