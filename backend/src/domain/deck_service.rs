//! Deck domain service: listing, detail, and lifecycle with ownership checks.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::deck::{Deck, DeckId, DeckName};
use crate::domain::error::Error;
use crate::domain::ports::{
    CardPersistenceError, CardRepository, DeckCommand, DeckPersistenceError, DeckQuery,
    DeckRepository, DeckWithCards,
};
use crate::domain::user::UserId;

/// User-facing message for a deck that is missing or owned by someone else.
pub(crate) const DECK_NOT_FOUND: &str = "deck not found or no access";

/// Deck service implementing the [`DeckQuery`] and [`DeckCommand`] driving
/// ports. Ownership is enforced by the repository's combined id/owner
/// predicate, so foreign decks are indistinguishable from missing ones.
#[derive(Clone)]
pub struct DeckService<D, C> {
    decks: Arc<D>,
    cards: Arc<C>,
}

impl<D, C> DeckService<D, C> {
    /// Create a new service over deck and card repositories.
    pub fn new(decks: Arc<D>, cards: Arc<C>) -> Self {
        Self { decks, cards }
    }
}

pub(crate) fn map_deck_error(error: DeckPersistenceError) -> Error {
    match error {
        DeckPersistenceError::Connection { message } => Error::service_unavailable(message),
        DeckPersistenceError::Query { message } => Error::internal(message),
    }
}

pub(crate) fn map_card_error(error: CardPersistenceError) -> Error {
    match error {
        CardPersistenceError::Connection { message } => Error::service_unavailable(message),
        CardPersistenceError::Query { message } => Error::internal(message),
    }
}

#[async_trait]
impl<D, C> DeckQuery for DeckService<D, C>
where
    D: DeckRepository,
    C: CardRepository,
{
    async fn list_decks(&self, owner: UserId) -> Result<Vec<Deck>, Error> {
        self.decks
            .list_for_owner(owner)
            .await
            .map_err(map_deck_error)
    }

    async fn deck_with_cards(
        &self,
        owner: UserId,
        deck: DeckId,
    ) -> Result<DeckWithCards, Error> {
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
        Ok(DeckWithCards { deck, cards })
    }
}

#[async_trait]
impl<D, C> DeckCommand for DeckService<D, C>
where
    D: DeckRepository,
    C: CardRepository,
{
    async fn create_deck(&self, owner: UserId, name: DeckName) -> Result<Deck, Error> {
        self.decks
            .create(owner, &name)
            .await
            .map_err(map_deck_error)
    }

    async fn rename_deck(
        &self,
        owner: UserId,
        deck: DeckId,
        name: DeckName,
    ) -> Result<Deck, Error> {
        self.decks
            .rename(owner, deck, &name)
            .await
            .map_err(map_deck_error)?
            .ok_or_else(|| Error::not_found(DECK_NOT_FOUND))
    }

    async fn delete_deck(&self, owner: UserId, deck: DeckId) -> Result<(), Error> {
        let removed = self
            .decks
            .delete(owner, deck)
            .await
            .map_err(map_deck_error)?;
        if !removed {
            return Err(Error::not_found(DECK_NOT_FOUND));
        }
        Ok(())
    }
}
