//! Port abstraction for user persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::user::{EmailAddress, User, UserId};

/// Persistence errors raised by user repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserPersistenceError {
    /// Repository connection could not be established.
    #[error("user repository connection failed: {message}")]
    Connection {
        /// Adapter-provided failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("user repository query failed: {message}")]
    Query {
        /// Adapter-provided failure description.
        message: String,
    },
    /// The email is already taken by another account.
    #[error("email {email} is already registered")]
    DuplicateEmail {
        /// The conflicting email.
        email: String,
    },
}

impl UserPersistenceError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Create a duplicate-email error for the given address.
    pub fn duplicate_email(email: impl Into<String>) -> Self {
        Self::DuplicateEmail {
            email: email.into(),
        }
    }
}

/// Payload for inserting a new user row; the password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUserRecord {
    /// Display name, free text.
    pub name: String,
    /// Unique login key.
    pub email: EmailAddress,
    /// Salted one-way credential hash (PHC string).
    pub password_hash: String,
}

/// CRUD access to user rows. Every call is one atomic unit of work.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user, returning the stored row.
    ///
    /// Fails with [`UserPersistenceError::DuplicateEmail`] when the email is
    /// already registered; no row is created in that case.
    async fn create(&self, record: &NewUserRecord) -> Result<User, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by login email.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Replace the display name, returning the refreshed row when it exists.
    async fn update_name(
        &self,
        id: UserId,
        name: &str,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Replace the stored credential hash; true when a row was updated.
    async fn update_password_hash(
        &self,
        id: UserId,
        password_hash: &str,
    ) -> Result<bool, UserPersistenceError>;

    /// Delete the user, cascading to owned decks and cards; true when a row
    /// existed.
    async fn delete(&self, id: UserId) -> Result<bool, UserPersistenceError>;
}
