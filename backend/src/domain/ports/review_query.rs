//! Driving port for review-session assembly.

use async_trait::async_trait;

use crate::domain::deck::{Deck, DeckId};
use crate::domain::error::Error;
use crate::domain::review::ReviewCard;
use crate::domain::user::UserId;

/// A shuffled review session over one deck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewSession {
    /// The ownership-checked deck under review.
    pub deck: Deck,
    /// The deck's cards in freshly shuffled presentation order.
    pub cards: Vec<ReviewCard>,
}

/// Assemble review sessions.
#[async_trait]
pub trait ReviewQuery: Send + Sync {
    /// Load the deck's cards and return them uniformly shuffled; a new order
    /// is drawn on every call. Missing and foreign decks both fail with
    /// `not_found`.
    async fn review_deck(&self, owner: UserId, deck: DeckId) -> Result<ReviewSession, Error>;
}
