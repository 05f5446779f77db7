//! Driving port for deck read models.

use async_trait::async_trait;

use crate::domain::card::Card;
use crate::domain::deck::{Deck, DeckId};
use crate::domain::error::Error;
use crate::domain::user::UserId;

/// A deck together with its cards, for the deck detail view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckWithCards {
    /// The ownership-checked deck.
    pub deck: Deck,
    /// Its cards in stable id order.
    pub cards: Vec<Card>,
}

/// Read access to a user's decks.
#[async_trait]
pub trait DeckQuery: Send + Sync {
    /// List the user's decks in stable id order.
    async fn list_decks(&self, owner: UserId) -> Result<Vec<Deck>, Error>;

    /// Fetch a deck with its cards; missing and foreign decks both fail with
    /// `not_found`.
    async fn deck_with_cards(&self, owner: UserId, deck: DeckId)
    -> Result<DeckWithCards, Error>;
}
