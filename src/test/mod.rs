//! In-memory repository doubles used by the service unit tests.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

use crate::api::error;
use crate::modules::film::model::{FilmResponse, InsertFilm, UpdateFilm};
use crate::modules::film::repository::FilmRepository;
use crate::modules::film::schema::{Genre, Rating};
use crate::modules::friend::repository::FriendRepository;
use crate::modules::user::model::{InsertUser, UpdateUser};
use crate::modules::user::repository::UserRepository;
use crate::modules::user::schema::UserEntity;

#[derive(Default)]
pub struct MockUserRepository {
    users: Mutex<HashMap<i64, UserEntity>>,
    next_id: AtomicI64,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self { users: Mutex::new(HashMap::new()), next_id: AtomicI64::new(1) }
    }

    /// Removes the row directly, leaving any friendship edges dangling.
    pub fn drop_user(&self, id: i64) {
        self.users.lock().unwrap().remove(&id);
    }
}

#[async_trait::async_trait]
impl UserRepository for MockUserRepository {
    async fn find_all(&self) -> Result<Vec<UserEntity>, error::SystemError> {
        let mut users: Vec<UserEntity> = self.users.lock().unwrap().values().cloned().collect();
        users.sort_by_key(|u| u.id);
        Ok(users)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<UserEntity>, error::SystemError> {
        Ok(self.users.lock().unwrap().get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<UserEntity>, error::SystemError> {
        let users = self.users.lock().unwrap();
        let mut found: Vec<UserEntity> = ids.iter().filter_map(|id| users.get(id).cloned()).collect();
        found.sort_by_key(|u| u.id);
        Ok(found)
    }

    async fn create(&self, user: &InsertUser) -> Result<UserEntity, error::SystemError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let entity = UserEntity {
            id,
            email: user.email.clone(),
            login: user.login.clone(),
            name: user.name.clone(),
            birthday: user.birthday,
        };
        self.users.lock().unwrap().insert(id, entity.clone());
        Ok(entity)
    }

    async fn update(&self, user: &UpdateUser) -> Result<u64, error::SystemError> {
        let mut users = self.users.lock().unwrap();
        if !users.contains_key(&user.id) {
            return Ok(0);
        }
        users.insert(
            user.id,
            UserEntity {
                id: user.id,
                email: user.email.clone(),
                login: user.login.clone(),
                name: user.name.clone(),
                birthday: user.birthday,
            },
        );
        Ok(1)
    }
}

#[derive(Default)]
pub struct MockFriendRepository {
    edges: Mutex<HashSet<(i64, i64)>>,
}

impl MockFriendRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl FriendRepository for MockFriendRepository {
    async fn find_friend_ids(&self, user_id: i64) -> Result<HashSet<i64>, error::SystemError> {
        let edges = self.edges.lock().unwrap();
        Ok(edges.iter().filter(|(from, _)| *from == user_id).map(|(_, to)| *to).collect())
    }

    async fn create_friendship(
        &self,
        user_id: i64,
        friend_id: i64,
    ) -> Result<(), error::SystemError> {
        let mut edges = self.edges.lock().unwrap();
        if !edges.insert((user_id, friend_id)) {
            return Err(error::SystemError::conflict("Friendship already exists"));
        }
        Ok(())
    }

    async fn delete_friendship(
        &self,
        user_id: i64,
        friend_id: i64,
    ) -> Result<u64, error::SystemError> {
        let removed = self.edges.lock().unwrap().remove(&(user_id, friend_id));
        Ok(if removed { 1 } else { 0 })
    }
}

#[derive(Default)]
pub struct MockFilmRepository {
    films: Mutex<HashMap<i64, FilmResponse>>,
    likes: Mutex<HashSet<(i64, i64)>>,
    next_id: AtomicI64,
}

impl MockFilmRepository {
    pub fn new() -> Self {
        Self {
            films: Mutex::new(HashMap::new()),
            likes: Mutex::new(HashSet::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

fn synth_genres(genre_ids: &[i32]) -> Vec<Genre> {
    genre_ids.iter().map(|id| Genre { id: *id, name: format!("genre-{id}") }).collect()
}

#[async_trait::async_trait]
impl FilmRepository for MockFilmRepository {
    async fn find_all(&self) -> Result<Vec<FilmResponse>, error::SystemError> {
        let mut films: Vec<FilmResponse> = self.films.lock().unwrap().values().cloned().collect();
        films.sort_by_key(|f| f.id);
        Ok(films)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<FilmResponse>, error::SystemError> {
        Ok(self.films.lock().unwrap().get(&id).cloned())
    }

    async fn save(&self, film: &InsertFilm) -> Result<FilmResponse, error::SystemError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let response = FilmResponse {
            id,
            name: film.name.clone(),
            description: film.description.clone(),
            release_date: film.release_date,
            duration: film.duration,
            mpa: Rating { id: film.rating_id, name: format!("rating-{}", film.rating_id) },
            genres: synth_genres(&film.genre_ids),
        };
        self.films.lock().unwrap().insert(id, response.clone());
        Ok(response)
    }

    async fn update(&self, film: &UpdateFilm) -> Result<FilmResponse, error::SystemError> {
        let mut films = self.films.lock().unwrap();
        if !films.contains_key(&film.id) {
            return Err(error::SystemError::not_found("Film with this id not found"));
        }
        let response = FilmResponse {
            id: film.id,
            name: film.name.clone(),
            description: film.description.clone(),
            release_date: film.release_date,
            duration: film.duration,
            mpa: Rating { id: film.rating_id, name: format!("rating-{}", film.rating_id) },
            genres: synth_genres(&film.genre_ids),
        };
        films.insert(film.id, response.clone());
        Ok(response)
    }

    async fn find_popular(&self, limit: i64) -> Result<Vec<FilmResponse>, error::SystemError> {
        let films = self.films.lock().unwrap();
        let likes = self.likes.lock().unwrap();

        let mut ranked: Vec<(usize, FilmResponse)> = films
            .values()
            .map(|film| {
                let count = likes.iter().filter(|(_, film_id)| *film_id == film.id).count();
                (count, film.clone())
            })
            .collect();
        ranked.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.id.cmp(&b.1.id)));

        Ok(ranked.into_iter().take(limit as usize).map(|(_, film)| film).collect())
    }

    async fn add_like(&self, film_id: i64, user_id: i64) -> Result<(), error::SystemError> {
        self.likes.lock().unwrap().insert((user_id, film_id));
        Ok(())
    }

    async fn remove_like(&self, film_id: i64, user_id: i64) -> Result<(), error::SystemError> {
        self.likes.lock().unwrap().remove(&(user_id, film_id));
        Ok(())
    }

    async fn get_likes(&self, film_id: i64) -> Result<HashSet<i64>, error::SystemError> {
        let likes = self.likes.lock().unwrap();
        Ok(likes.iter().filter(|(_, f)| *f == film_id).map(|(u, _)| *u).collect())
    }
}
