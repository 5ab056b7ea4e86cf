use chrono::Utc;
use tokio::sync::RwLock;

use crate::error::{PersistError, Result};
use crate::models::{NewUser, Pagination, User, UserPage, UserUpdate};

/// In-memory user list. Contents vanish on restart.
#[derive(Debug, Default)]
pub struct UserStore {
    users: RwLock<Vec<User>>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with the two demo users
    pub fn seeded() -> Self {
        let now = Utc::now();
        let users = vec![
            User {
                id: 1,
                name: "John Doe".to_string(),
                email: "john@example.com".to_string(),
                created_at: now,
                updated_at: None,
            },
            User {
                id: 2,
                name: "Jane Smith".to_string(),
                email: "jane@example.com".to_string(),
                created_at: now,
                updated_at: None,
            },
        ];
        Self {
            users: RwLock::new(users),
        }
    }

    /// 1-based page of users; `page` and `limit` are clamped to at least 1
    pub async fn list(&self, page: usize, limit: usize) -> UserPage {
        let (page, limit) = (page.max(1), limit.max(1));
        let users = self.users.read().await;
        let total = users.len();
        let start = (page - 1).saturating_mul(limit);
        let end = page.saturating_mul(limit);

        let slice = users
            .iter()
            .skip(start)
            .take(limit)
            .cloned()
            .collect();

        UserPage {
            users: slice,
            pagination: Pagination {
                current_page: page,
                total_pages: total.div_ceil(limit),
                total_users: total,
                has_next: end < total,
                has_prev: start > 0,
            },
        }
    }

    pub async fn get(&self, id: u64) -> Result<User> {
        self.users
            .read()
            .await
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or(PersistError::UserNotFound(id))
    }

    pub async fn create(&self, new_user: NewUser) -> Result<User> {
        let mut users = self.users.write().await;

        if users.iter().any(|u| u.email == new_user.email) {
            return Err(PersistError::EmailExists(new_user.email));
        }

        let user = User {
            id: users.iter().map(|u| u.id).max().unwrap_or(0) + 1,
            name: new_user.name,
            email: new_user.email,
            created_at: Utc::now(),
            updated_at: None,
        };
        users.push(user.clone());

        tracing::info!(user_id = user.id, "Created new user");
        Ok(user)
    }

    pub async fn update(&self, id: u64, update: UserUpdate) -> Result<User> {
        let mut users = self.users.write().await;

        let index = users
            .iter()
            .position(|u| u.id == id)
            .ok_or(PersistError::UserNotFound(id))?;

        if let Some(email) = &update.email {
            if users.iter().any(|u| &u.email == email && u.id != id) {
                return Err(PersistError::EmailExists(email.clone()));
            }
        }

        let user = &mut users[index];
        if let Some(name) = update.name {
            user.name = name;
        }
        if let Some(email) = update.email {
            user.email = email;
        }
        user.updated_at = Some(Utc::now());

        tracing::info!(user_id = id, "Updated user");
        Ok(user.clone())
    }

    pub async fn delete(&self, id: u64) -> Result<User> {
        let mut users = self.users.write().await;

        let index = users
            .iter()
            .position(|u| u.id == id)
            .ok_or(PersistError::UserNotFound(id))?;
        let user = users.remove(index);

        tracing::info!(user_id = id, "Deleted user");
        Ok(user)
    }
}
