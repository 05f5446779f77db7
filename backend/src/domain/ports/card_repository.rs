//! Port abstraction for card persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::card::{Card, CardDraft, CardId, CardPatch};
use crate::domain::deck::DeckId;
use crate::domain::user::UserId;

/// Persistence errors raised by card repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CardPersistenceError {
    /// Repository connection could not be established.
    #[error("card repository connection failed: {message}")]
    Connection {
        /// Adapter-provided failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("card repository query failed: {message}")]
    Query {
        /// Adapter-provided failure description.
        message: String,
    },
}

impl CardPersistenceError {
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

/// CRUD access to card rows, scoped to the owning user where it matters.
#[async_trait]
pub trait CardRepository: Send + Sync {
    /// Insert a new card for the owner, returning the stored row.
    ///
    /// The draft's deck assignment is taken as already ownership-checked by
    /// the caller; unfiled cards pass `None`.
    async fn create(&self, owner: UserId, draft: &CardDraft)
    -> Result<Card, CardPersistenceError>;

    /// Fetch a card by id when the owner matches.
    async fn find_for_owner(
        &self,
        owner: UserId,
        card: CardId,
    ) -> Result<Option<Card>, CardPersistenceError>;

    /// List a deck's cards in stable id order.
    async fn list_for_deck(&self, deck: DeckId) -> Result<Vec<Card>, CardPersistenceError>;

    /// Apply a partial update, returning the refreshed row when owner and id
    /// match. An empty patch degenerates to a read.
    async fn update(
        &self,
        owner: UserId,
        card: CardId,
        patch: &CardPatch,
    ) -> Result<Option<Card>, CardPersistenceError>;

    /// Delete a card; true when a row existed for this owner.
    async fn delete(&self, owner: UserId, card: CardId) -> Result<bool, CardPersistenceError>;

    /// Case-insensitive substring search over the owner's cards, matching
    /// word, translation, or tip. Result order is stable for a fixed
    /// dataset.
    async fn search_for_owner(
        &self,
        owner: UserId,
        needle: &str,
    ) -> Result<Vec<Card>, CardPersistenceError>;
}
