use log::{debug, warn};
use std::sync::Arc;

use crate::{
    api::error,
    modules::user::{
        model::{InsertUser, NewUserModel, UpdateUser, UpdateUserModel, UserResponse},
        repository::UserRepository,
    },
};

#[derive(Clone)]
pub struct UserService<U>
where
    U: UserRepository + Send + Sync,
{
    user_repo: Arc<U>,
}

impl<U> UserService<U>
where
    U: UserRepository + Send + Sync,
{
    pub fn with_dependencies(user_repo: Arc<U>) -> Self {
        UserService { user_repo }
    }

    pub async fn get_users(&self) -> Result<Vec<UserResponse>, error::SystemError> {
        let users = self.user_repo.find_all().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    pub async fn get_user(&self, id: i64) -> Result<UserResponse, error::SystemError> {
        let user = self
            .user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("User with this id not found"))?;
        Ok(UserResponse::from(user))
    }

    pub async fn add_user(&self, user: NewUserModel) -> Result<UserResponse, error::SystemError> {
        let name = match user.name {
            Some(name) if !name.trim().is_empty() => name,
            _ => {
                debug!("Username is empty, using login as name");
                user.login.clone()
            }
        };

        let created = self
            .user_repo
            .create(&InsertUser {
                email: user.email,
                login: user.login,
                name,
                birthday: user.birthday,
            })
            .await?;

        Ok(UserResponse::from(created))
    }

    pub async fn update_user(
        &self,
        user: UpdateUserModel,
    ) -> Result<UserResponse, error::SystemError> {
        let id = match user.id {
            Some(id) if id > 0 => id,
            _ => {
                warn!("User id is empty");
                return Err(error::SystemError::empty_field("ID can't be empty"));
            }
        };

        let name = match user.name {
            Some(name) if !name.trim().is_empty() => name,
            _ => user.login.clone(),
        };

        let rows = self
            .user_repo
            .update(&UpdateUser {
                id,
                email: user.email,
                login: user.login,
                name,
                birthday: user.birthday,
            })
            .await?;

        if rows == 0 {
            warn!("User {id} not found for update");
            return Err(error::SystemError::not_found("User with this id not found"));
        }

        let updated = self.user_repo.find_by_id(id).await?.ok_or_else(|| {
            error::SystemError::DatabaseError("Updated user missing on re-read".into())
        })?;

        Ok(UserResponse::from(updated))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::MockUserRepository;

    fn service() -> UserService<MockUserRepository> {
        UserService::with_dependencies(Arc::new(MockUserRepository::new()))
    }

    fn new_user(login: &str, name: Option<&str>) -> NewUserModel {
        NewUserModel {
            email: format!("{login}@example.com"),
            login: login.to_string(),
            name: name.map(str::to_string),
            birthday: None,
        }
    }

    #[actix_web::test]
    async fn missing_name_defaults_to_login() {
        let svc = service();

        let user = svc.add_user(new_user("alice", None)).await.unwrap();
        assert_eq!(user.name, "alice");

        let user = svc.add_user(new_user("bob", Some("  "))).await.unwrap();
        assert_eq!(user.name, "bob");

        let user = svc.add_user(new_user("carol", Some("Carol C."))).await.unwrap();
        assert_eq!(user.name, "Carol C.");
    }

    #[actix_web::test]
    async fn update_without_id_is_an_empty_field_error() {
        let svc = service();

        let err = svc
            .update_user(UpdateUserModel {
                id: None,
                email: "alice@example.com".to_string(),
                login: "alice".to_string(),
                name: None,
                birthday: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, error::SystemError::EmptyField(_)));
    }

    #[actix_web::test]
    async fn update_of_unknown_user_is_not_found() {
        let svc = service();

        let err = svc
            .update_user(UpdateUserModel {
                id: Some(123),
                email: "alice@example.com".to_string(),
                login: "alice".to_string(),
                name: None,
                birthday: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, error::SystemError::NotFound(_)));
    }

    #[actix_web::test]
    async fn update_replaces_all_fields() {
        let svc = service();
        let created = svc.add_user(new_user("alice", Some("Alice"))).await.unwrap();

        let updated = svc
            .update_user(UpdateUserModel {
                id: Some(created.id),
                email: "new@example.com".to_string(),
                login: "alice2".to_string(),
                name: None,
                birthday: None,
            })
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.email, "new@example.com");
        // name falls back to the login again when dropped on update
        assert_eq!(updated.name, "alice2");
    }

    #[actix_web::test]
    async fn unknown_user_lookup_is_not_found() {
        let svc = service();
        let err = svc.get_user(5).await.unwrap_err();
        assert!(matches!(err, error::SystemError::NotFound(_)));
    }
}
