//! Authentication endpoints.

use crate::client::{ApiClient, RequestOptions};
use crate::error::Result;
use crate::types::{Credentials, LoginResult, NewUser, TokenVerification, User};
use tracing::info;

impl ApiClient {
    /// Create an account.
    pub async fn register(&self, user: &NewUser) -> Result<User> {
        let created: User = self
            .request("/api/auth/register", RequestOptions::post().json(user)?)
            .await?;

        info!(user_id = created.id, email = %created.email, "Registered account");
        Ok(created)
    }

    /// Exchange credentials for a bearer token.
    ///
    /// The token is returned, not stored; call [`set_token`](Self::set_token)
    /// to use it for subsequent requests.
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResult> {
        let result: LoginResult = self
            .request(
                "/api/auth/login-json",
                RequestOptions::post().json(credentials)?,
            )
            .await?;

        info!(email = %credentials.email, role = %result.role, "Login successful");
        Ok(result)
    }

    /// The user the current token belongs to.
    pub async fn get_me(&self) -> Result<User> {
        self.request("/api/auth/me", RequestOptions::get()).await
    }

    /// Ask the server whether the current token is still valid.
    pub async fn verify_token(&self) -> Result<TokenVerification> {
        self.request("/api/auth/verify", RequestOptions::get()).await
    }
}
