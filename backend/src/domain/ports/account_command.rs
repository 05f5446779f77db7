//! Driving port for account lifecycle mutations.

use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::error::Error;
use crate::domain::user::{EmailAddress, User, UserId};

/// Payload for registering a new account.
#[derive(Debug)]
pub struct RegisterRequest {
    /// Display name, free text.
    pub name: String,
    /// Unique login key.
    pub email: EmailAddress,
    /// Raw password; hashed by the service, zeroised on drop.
    pub password: Zeroizing<String>,
}

/// Payload for rotating an account password.
#[derive(Debug)]
pub struct ChangePasswordRequest {
    /// Current password; must verify against the stored hash.
    pub old_password: Zeroizing<String>,
    /// Replacement password.
    pub new_password: Zeroizing<String>,
}

/// Account lifecycle operations: register, rename, rotate password, delete.
#[async_trait]
pub trait AccountCommand: Send + Sync {
    /// Create an account, hashing the password before storage.
    ///
    /// A duplicate email fails with `conflict` and creates nothing.
    async fn register(&self, request: RegisterRequest) -> Result<User, Error>;

    /// Replace the display name.
    async fn rename(&self, user: UserId, name: String) -> Result<User, Error>;

    /// Rotate the password after verifying the old one.
    async fn change_password(
        &self,
        user: UserId,
        request: ChangePasswordRequest,
    ) -> Result<(), Error>;

    /// Delete the account, cascading to owned decks and cards; true when the
    /// account existed.
    async fn delete_account(&self, user: UserId) -> Result<bool, Error>;
}
