use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::modules::user::schema::UserEntity;

fn validate_birthday(birthday: &NaiveDate) -> Result<(), ValidationError> {
    if *birthday > chrono::Local::now().date_naive() {
        let mut err = ValidationError::new("birthday");
        err.message = Some("Birthday must not be in the future".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Deserialize, Validate)]
pub struct NewUserModel {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "Login must not be blank"))]
    pub login: String,
    pub name: Option<String>,
    #[validate(custom(function = validate_birthday))]
    pub birthday: Option<NaiveDate>,
}

#[derive(Deserialize, Validate)]
pub struct UpdateUserModel {
    pub id: Option<i64>,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "Login must not be blank"))]
    pub login: String,
    pub name: Option<String>,
    #[validate(custom(function = validate_birthday))]
    pub birthday: Option<NaiveDate>,
}

pub struct InsertUser {
    pub email: String,
    pub login: String,
    pub name: String,
    pub birthday: Option<NaiveDate>,
}

pub struct UpdateUser {
    pub id: i64,
    pub email: String,
    pub login: String,
    pub name: String,
    pub birthday: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub login: String,
    pub name: String,
    pub birthday: Option<NaiveDate>,
}

impl From<UserEntity> for UserResponse {
    fn from(entity: UserEntity) -> Self {
        UserResponse {
            id: entity.id,
            email: entity.email,
            login: entity.login,
            name: entity.name,
            birthday: entity.birthday,
        }
    }
}
