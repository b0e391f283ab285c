use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;

#[derive(Debug, Default)]
struct Store {
    users: HashMap<UserId, User>,
    by_email: HashMap<EmailAddress, UserId>,
    last_id: i64,
}

/// Process-local user storage.
///
/// The uniqueness check and the insert share one write lock, so concurrent
/// registrations of the same email produce exactly one user.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    store: RwLock<Store>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let mut store = self.store.write().await;

        if store.by_email.contains_key(&user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }

        store.last_id += 1;
        let id = UserId(store.last_id);
        let created = User {
            id,
            email: user.email,
            nickname: user.nickname,
            image: user.image,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };

        store.by_email.insert(created.email.clone(), id);
        store.users.insert(id, created.clone());

        Ok(created)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.store.read().await.users.get(id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        let store = self.store.read().await;

        Ok(store
            .by_email
            .get(email)
            .and_then(|id| store.users.get(id))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::user::models::Nickname;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            email: EmailAddress::new(email.to_string()).unwrap(),
            nickname: Nickname::new("A".to_string()).unwrap(),
            image: None,
            password_hash: "$argon2id$test_hash".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let repository = InMemoryUserRepository::new();

        let first = repository.create(new_user("a@x.com")).await.unwrap();
        let second = repository.create(new_user("b@x.com")).await.unwrap();

        assert_eq!(first.id, UserId(1));
        assert_eq!(second.id, UserId(2));
    }

    #[tokio::test]
    async fn test_find_after_create() {
        let repository = InMemoryUserRepository::new();
        let created = repository.create(new_user("a@x.com")).await.unwrap();

        let by_email = repository
            .find_by_email(&EmailAddress::new("a@x.com".to_string()).unwrap())
            .await
            .unwrap()
            .expect("User not found by email");
        let by_id = repository
            .find_by_id(&created.id)
            .await
            .unwrap()
            .expect("User not found by id");

        assert_eq!(by_email.id, created.id);
        assert_eq!(by_id.email, created.email);
        assert!(repository
            .find_by_id(&UserId(99))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email() {
        let repository = InMemoryUserRepository::new();
        repository.create(new_user("a@x.com")).await.unwrap();

        let result = repository.create(new_user("A@X.com")).await;
        assert!(matches!(result, Err(UserError::EmailAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_concurrent_duplicates_yield_one_user() {
        let repository = Arc::new(InMemoryUserRepository::new());

        let attempts: Vec<_> = (0..16)
            .map(|_| {
                let repository = Arc::clone(&repository);
                tokio::spawn(async move { repository.create(new_user("a@x.com")).await })
            })
            .collect();

        let mut created = 0;
        let mut conflicts = 0;
        for attempt in attempts {
            match attempt.await.unwrap() {
                Ok(_) => created += 1,
                Err(UserError::EmailAlreadyExists(_)) => conflicts += 1,
                Err(e) => panic!("Unexpected error: {}", e),
            }
        }

        assert_eq!(created, 1);
        assert_eq!(conflicts, 15);
    }
}
