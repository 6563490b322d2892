use chrono::NaiveDate;
use sqlx::prelude::FromRow;

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct UserEntity {
    pub id: i64,
    pub email: String,
    pub login: String,
    pub name: String,
    pub birthday: Option<NaiveDate>,
}
