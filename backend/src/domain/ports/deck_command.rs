//! Driving port for deck mutations.

use async_trait::async_trait;

use crate::domain::deck::{Deck, DeckId, DeckName};
use crate::domain::error::Error;
use crate::domain::user::UserId;

/// Deck lifecycle operations for an authenticated owner.
#[async_trait]
pub trait DeckCommand: Send + Sync {
    /// Create a deck owned by the user.
    async fn create_deck(&self, owner: UserId, name: DeckName) -> Result<Deck, Error>;

    /// Rename a deck; missing and foreign decks both fail with `not_found`.
    async fn rename_deck(
        &self,
        owner: UserId,
        deck: DeckId,
        name: DeckName,
    ) -> Result<Deck, Error>;

    /// Delete a deck and, by cascade, its cards; missing and foreign decks
    /// both fail with `not_found`.
    async fn delete_deck(&self, owner: UserId, deck: DeckId) -> Result<(), Error>;
}
