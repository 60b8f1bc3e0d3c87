//! User profile service

use std::sync::Arc;

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        user::{UpdateProfile, UserFilter},
        Page, User,
    },
    repository::UserStore,
};

#[derive(Clone)]
pub struct UsersService {
    users: Arc<dyn UserStore>,
}

impl UsersService {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// Search users, returning the page and the total number of matches
    pub async fn search(&self, filter: &UserFilter, page: Page) -> AppResult<(Vec<User>, i64)> {
        let users = self.users.list(filter, page).await?;
        let total = self.users.count(filter).await?;
        Ok((users, total))
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<User> {
        self.users
            .find(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
    }

    /// Update the caller's own name, avatar and about text
    pub async fn update_profile(&self, user_id: i64, profile: UpdateProfile) -> AppResult<User> {
        profile.validate()?;

        let mut user = self.get_by_id(user_id).await?;
        if let Some(name) = profile.name {
            user.name = name;
        }
        if profile.avatar.is_some() {
            user.avatar = profile.avatar;
        }
        if profile.about.is_some() {
            user.about = profile.about;
        }

        self.users.update(&user).await?;
        self.get_by_id(user_id).await
    }
}
