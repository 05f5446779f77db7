//! Review domain service: ownership-checked, shuffled session assembly.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::deck::DeckId;
use crate::domain::deck_service::{DECK_NOT_FOUND, map_card_error, map_deck_error};
use crate::domain::error::Error;
use crate::domain::ports::{CardRepository, DeckRepository, ReviewQuery, ReviewSession};
use crate::domain::review::shuffle_for_review;
use crate::domain::user::UserId;

/// Review service implementing the [`ReviewQuery`] driving port.
#[derive(Clone)]
pub struct ReviewService<D, C> {
    decks: Arc<D>,
    cards: Arc<C>,
}

impl<D, C> ReviewService<D, C> {
    /// Create a new service over deck and card repositories.
    pub fn new(decks: Arc<D>, cards: Arc<C>) -> Self {
        Self { decks, cards }
    }
}

#[async_trait]
impl<D, C> ReviewQuery for ReviewService<D, C>
where
    D: DeckRepository,
    C: CardRepository,
{
    async fn review_deck(&self, owner: UserId, deck: DeckId) -> Result<ReviewSession, Error> {
        let deck = self
            .decks
            .find_for_owner(owner, deck)
            .await
            .map_err(map_deck_error)?
            .ok_or_else(|| Error::not_found(DECK_NOT_FOUND))?;
        let cards = self
            .cards
            .list_for_deck(deck.id())
            .await
            .map_err(map_card_error)?;
        Ok(ReviewSession {
            deck,
            cards: shuffle_for_review(cards),
        })
    }
}
