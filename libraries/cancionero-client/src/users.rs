//! User management endpoints.

use crate::client::{ApiClient, RequestOptions};
use crate::error::Result;
use crate::types::{NewUser, Pagination, User, UserUpdate};
use tracing::debug;

impl ApiClient {
    pub async fn list_users(&self, page: Pagination) -> Result<Vec<User>> {
        let endpoint = format!("/api/usuarios?skip={}&limit={}", page.skip, page.limit);
        let users: Vec<User> = self.request(&endpoint, RequestOptions::get()).await?;

        debug!(count = users.len(), "Fetched users");
        Ok(users)
    }

    /// Create an account on behalf of someone else (admin only server-side).
    pub async fn create_user(&self, user: &NewUser) -> Result<User> {
        self.request("/api/usuarios", RequestOptions::post().json(user)?)
            .await
    }

    pub async fn get_user(&self, id: i64) -> Result<User> {
        self.request(&format!("/api/usuarios/{}", id), RequestOptions::get())
            .await
    }

    pub async fn update_user(&self, id: i64, update: &UserUpdate) -> Result<User> {
        self.request(
            &format!("/api/usuarios/{}", id),
            RequestOptions::put().json(update)?,
        )
        .await
    }

    pub async fn delete_user(&self, id: i64) -> Result<()> {
        self.request_discard(&format!("/api/usuarios/{}", id), RequestOptions::delete())
            .await?;

        debug!(user_id = id, "User deleted");
        Ok(())
    }
}
