//! Authenticated user state
//!
//! Holds the logged-in user as an [`Observable`]. Token persistence goes
//! through a [`SessionBackend`], which the API client implements.

use crate::error::{Result, StoreError};
use crate::observable::{Observable, SubscriptionId};
use async_trait::async_trait;
use cancionero_client::{ApiClient, Credentials, LoginResult, User};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// The slice of the API the auth store needs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionBackend: Send + Sync {
    /// Persisted bearer token, if any.
    async fn token(&self) -> Option<String>;

    /// Replace or clear the persisted bearer token.
    async fn set_token(&self, token: Option<String>) -> cancionero_client::Result<()>;

    async fn login(&self, credentials: &Credentials) -> cancionero_client::Result<LoginResult>;

    /// The user the current token belongs to.
    async fn get_me(&self) -> cancionero_client::Result<User>;
}

#[async_trait]
impl SessionBackend for ApiClient {
    async fn token(&self) -> Option<String> {
        ApiClient::token(self).await
    }

    async fn set_token(&self, token: Option<String>) -> cancionero_client::Result<()> {
        ApiClient::set_token(self, token).await
    }

    async fn login(&self, credentials: &Credentials) -> cancionero_client::Result<LoginResult> {
        ApiClient::login(self, credentials).await
    }

    async fn get_me(&self) -> cancionero_client::Result<User> {
        ApiClient::get_me(self).await
    }
}

/// Observable "who is logged in" state.
///
/// `None` means unauthenticated.
pub struct AuthStore<B: SessionBackend + ?Sized = ApiClient> {
    state: Observable<Option<User>>,
    backend: Arc<B>,
}

impl<B: SessionBackend + ?Sized> AuthStore<B> {
    /// Create an unauthenticated store.
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            state: Observable::new(None),
            backend,
        }
    }

    pub fn backend(&self) -> &Arc<B> {
        &self.backend
    }

    /// Current user snapshot.
    pub fn current(&self) -> Option<User> {
        self.state.get()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.get().is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.state.get().is_some_and(|user| user.is_admin())
    }

    /// Current user, or [`StoreError::NotAuthenticated`].
    pub fn require_user(&self) -> Result<User> {
        self.state.get().ok_or(StoreError::NotAuthenticated)
    }

    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&Option<User>) + Send + Sync + 'static,
    {
        self.state.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.state.unsubscribe(id)
    }

    /// Replace the user without touching the token.
    pub fn set_user(&self, user: Option<User>) {
        self.state.set(user);
    }

    /// Forget the user and the persisted token.
    ///
    /// The state is cleared even when removing the token fails.
    pub async fn clear_user(&self) -> Result<()> {
        self.state.set(None);
        self.backend.set_token(None).await?;
        Ok(())
    }

    /// Same as [`clear_user`](Self::clear_user).
    pub async fn logout(&self) -> Result<()> {
        self.clear_user().await?;
        info!("Logged out");
        Ok(())
    }

    /// Log in, persist the token and load the user.
    ///
    /// On any failure the store ends unauthenticated with no token stored.
    pub async fn login(&self, credentials: &Credentials) -> Result<User> {
        let result = self.backend.login(credentials).await?;

        if let Err(e) = self.backend.set_token(Some(result.access_token)).await {
            warn!(error = %e, "Could not persist token after login");
            self.abandon_login().await;
            return Err(e.into());
        }

        match self.backend.get_me().await {
            Ok(user) => {
                info!(user_id = user.id, role = %user.role, "Session started");
                self.state.set(Some(user.clone()));
                Ok(user)
            }
            Err(e) => {
                warn!(error = %e, "Could not load user after login");
                self.abandon_login().await;
                Err(e.into())
            }
        }
    }

    // The backend drops its in-memory token even when clearing storage fails
    async fn abandon_login(&self) {
        if let Err(e) = self.backend.set_token(None).await {
            warn!(error = %e, "Failed to discard token");
        }
        self.state.set(None);
    }

    /// Rebuild the session from a persisted token.
    ///
    /// - no token: `Ok(None)`, no network call
    /// - server accepts it: the user is stored and returned
    /// - server rejects it: token and state are cleared, `Ok(None)`
    /// - server unreachable: token is kept, state is cleared, the
    ///   connection error is returned
    pub async fn restore_session(&self) -> Result<Option<User>> {
        if self.backend.token().await.is_none() {
            debug!("No persisted token, skipping session restore");
            return Ok(None);
        }

        match self.backend.get_me().await {
            Ok(user) => {
                info!(user_id = user.id, "Session restored");
                self.state.set(Some(user.clone()));
                Ok(Some(user))
            }
            Err(e) if e.is_connection() => {
                warn!(error = ?e, "Server unreachable, keeping persisted token");
                self.state.set(None);
                Err(e.into())
            }
            Err(e) => {
                warn!(error = %e, "Persisted session rejected");
                self.state.set(None);
                self.backend.set_token(None).await?;
                Ok(None)
            }
        }
    }
}
