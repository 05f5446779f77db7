//! Port abstraction for deck persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::deck::{Deck, DeckId, DeckName};
use crate::domain::user::UserId;

/// Persistence errors raised by deck repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeckPersistenceError {
    /// Repository connection could not be established.
    #[error("deck repository connection failed: {message}")]
    Connection {
        /// Adapter-provided failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("deck repository query failed: {message}")]
    Query {
        /// Adapter-provided failure description.
        message: String,
    },
}

impl DeckPersistenceError {
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
}

/// CRUD access to deck rows, always scoped to the owning user.
///
/// Lookups take the owner together with the deck id so adapters can enforce
/// ownership in a single `WHERE id = ? AND user_id = ?` predicate; a foreign
/// deck is indistinguishable from a missing one.
#[async_trait]
pub trait DeckRepository: Send + Sync {
    /// Insert a new deck for the owner, returning the stored row.
    async fn create(&self, owner: UserId, name: &DeckName) -> Result<Deck, DeckPersistenceError>;

    /// Fetch a deck by id when the owner matches.
    async fn find_for_owner(
        &self,
        owner: UserId,
        deck: DeckId,
    ) -> Result<Option<Deck>, DeckPersistenceError>;

    /// List the owner's decks in stable id order.
    async fn list_for_owner(&self, owner: UserId) -> Result<Vec<Deck>, DeckPersistenceError>;

    /// Rename a deck, returning the refreshed row when owner and id match.
    async fn rename(
        &self,
        owner: UserId,
        deck: DeckId,
        name: &DeckName,
    ) -> Result<Option<Deck>, DeckPersistenceError>;

    /// Delete a deck, cascading to contained cards; true when a row existed
    /// for this owner.
    async fn delete(&self, owner: UserId, deck: DeckId) -> Result<bool, DeckPersistenceError>;
}
