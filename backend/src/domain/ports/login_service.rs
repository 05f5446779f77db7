//! Driving port for session authentication.

use async_trait::async_trait;

use crate::domain::auth::LoginCredentials;
use crate::domain::error::Error;
use crate::domain::user::UserId;

/// Authenticate login credentials against stored accounts.
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Verify the credentials and return the authenticated user id.
    ///
    /// Unknown emails and wrong passwords both fail with the same generic
    /// `unauthorized` error, so callers cannot probe which emails exist.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error>;
}
