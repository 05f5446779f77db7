//! Card domain service: creation, partial update, deletion, and search.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::card::{Card, CardDraft, CardId, CardPatch};
use crate::domain::deck::DeckId;
use crate::domain::deck_service::{DECK_NOT_FOUND, map_card_error, map_deck_error};
use crate::domain::error::Error;
use crate::domain::ports::{CardCommand, CardQuery, CardRepository, DeckRepository};
use crate::domain::user::UserId;

/// User-facing message for a card that is missing or owned by someone else.
pub(crate) const CARD_NOT_FOUND: &str = "card not found or no access";

/// Card service implementing the [`CardQuery`] and [`CardCommand`] driving
/// ports. Deck assignments are verified against the same owner before a card
/// is created, keeping the card/deck ownership invariant intact.
#[derive(Clone)]
pub struct CardService<D, C> {
    decks: Arc<D>,
    cards: Arc<C>,
}

impl<D, C> CardService<D, C> {
    /// Create a new service over deck and card repositories.
    pub fn new(decks: Arc<D>, cards: Arc<C>) -> Self {
        Self { decks, cards }
    }
}

#[async_trait]
impl<D, C> CardQuery for CardService<D, C>
where
    D: DeckRepository,
    C: CardRepository,
{
    async fn card_for_edit(&self, owner: UserId, card: CardId) -> Result<Card, Error> {
        self.cards
            .find_for_owner(owner, card)
            .await
            .map_err(map_card_error)?
            .ok_or_else(|| Error::not_found(CARD_NOT_FOUND))
    }

    async fn search_cards(&self, owner: UserId, needle: &str) -> Result<Vec<Card>, Error> {
        self.cards
            .search_for_owner(owner, needle)
            .await
            .map_err(map_card_error)
    }
}

#[async_trait]
impl<D, C> CardCommand for CardService<D, C>
where
    D: DeckRepository,
    C: CardRepository,
{
    async fn add_card(&self, owner: UserId, draft: CardDraft) -> Result<Card, Error> {
        if let Some(deck) = draft.deck() {
            self.decks
                .find_for_owner(owner, deck)
                .await
                .map_err(map_deck_error)?
                .ok_or_else(|| Error::not_found(DECK_NOT_FOUND))?;
        }
        self.cards
            .create(owner, &draft)
            .await
            .map_err(map_card_error)
    }

    async fn update_card(
        &self,
        owner: UserId,
        card: CardId,
        patch: CardPatch,
    ) -> Result<Card, Error> {
        self.cards
            .update(owner, card, &patch)
            .await
            .map_err(map_card_error)?
            .ok_or_else(|| Error::not_found(CARD_NOT_FOUND))
    }

    async fn delete_card(&self, owner: UserId, card: CardId) -> Result<Option<DeckId>, Error> {
        let existing = self
            .cards
            .find_for_owner(owner, card)
            .await
            .map_err(map_card_error)?
            .ok_or_else(|| Error::not_found(CARD_NOT_FOUND))?;
        self.cards
            .delete(owner, card)
            .await
            .map_err(map_card_error)?;
        Ok(existing.deck())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for card lifecycle and ownership checks.
    use rstest::rstest;

    use super::*;
    use crate::domain::error::ErrorCode;
    use crate::domain::test_doubles::InMemoryStore;

    fn draft(word: &str, translation: &str, tip: Option<&str>, deck: Option<DeckId>) -> CardDraft {
        CardDraft::new(word, translation, tip, deck).expect("valid draft")
    }

    async fn seeded() -> (
        CardService<
            crate::domain::test_doubles::InMemoryDeckRepository,
            crate::domain::test_doubles::InMemoryCardRepository,
        >,
        UserId,
        DeckId,
    ) {
        let store = InMemoryStore::default();
        let owner = UserId::new(1);
        let deck = store.seed_deck(owner, "General Vocabulary");
        let service = CardService::new(Arc::new(store.decks()), Arc::new(store.cards()));
        (service, owner, deck)
    }

    #[tokio::test]
    async fn add_card_files_the_card_into_the_deck() {
        let (service, owner, deck) = seeded().await;
        let card = service
            .add_card(owner, draft("hello", "привіт", Some("greeting"), Some(deck)))
            .await
            .expect("add succeeds");
        assert_eq!(card.deck(), Some(deck));
        assert_eq!(card.owner(), owner);
    }

    #[tokio::test]
    async fn add_card_to_foreign_deck_is_not_found() {
        let (service, _owner, deck) = seeded().await;
        let err = service
            .add_card(
                UserId::new(2),
                draft("hello", "привіт", None, Some(deck)),
            )
            .await
            .expect_err("foreign deck must fail");
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.message(), DECK_NOT_FOUND);
    }

    #[tokio::test]
    async fn add_card_without_deck_creates_an_unfiled_card() {
        let (service, owner, _deck) = seeded().await;
        let card = service
            .add_card(owner, draft("hello", "привіт", None, None))
            .await
            .expect("add succeeds");
        assert_eq!(card.deck(), None);
    }

    #[tokio::test]
    async fn update_changing_only_word_preserves_other_fields() {
        let (service, owner, deck) = seeded().await;
        let card = service
            .add_card(owner, draft("hello", "привіт", Some("greeting"), Some(deck)))
            .await
            .expect("add succeeds");

        let updated = service
            .update_card(
                owner,
                card.id(),
                CardPatch::from_fields(Some("hullo"), None, None),
            )
            .await
            .expect("update succeeds");

        assert_eq!(updated.word(), "hullo");
        assert_eq!(updated.translation(), "привіт");
        assert_eq!(updated.tip(), Some("greeting"));
        assert_eq!(updated.deck(), Some(deck));
    }

    #[tokio::test]
    async fn empty_patch_returns_the_unchanged_card() {
        let (service, owner, deck) = seeded().await;
        let card = service
            .add_card(owner, draft("hello", "привіт", None, Some(deck)))
            .await
            .expect("add succeeds");

        let updated = service
            .update_card(owner, card.id(), CardPatch::default())
            .await
            .expect("empty patch succeeds");
        assert_eq!(updated, card);
    }

    #[rstest]
    #[case(UserId::new(2))] // foreign owner
    #[case(UserId::new(1))] // missing id
    #[tokio::test]
    async fn foreign_and_missing_cards_are_indistinguishable(#[case] requester: UserId) {
        let (service, owner, deck) = seeded().await;
        let card = service
            .add_card(owner, draft("hello", "привіт", None, Some(deck)))
            .await
            .expect("add succeeds");
        let probe = if requester == owner {
            CardId::new(card.id().as_i32() + 99)
        } else {
            card.id()
        };

        let err = service
            .card_for_edit(requester, probe)
            .await
            .expect_err("must not resolve");
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.message(), CARD_NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_card_reports_its_deck_for_redirects() {
        let (service, owner, deck) = seeded().await;
        let card = service
            .add_card(owner, draft("hello", "привіт", None, Some(deck)))
            .await
            .expect("add succeeds");

        let former_deck = service
            .delete_card(owner, card.id())
            .await
            .expect("delete succeeds");
        assert_eq!(former_deck, Some(deck));

        let err = service
            .card_for_edit(owner, card.id())
            .await
            .expect_err("deleted card is gone");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn search_matches_substrings_across_fields() {
        let (service, owner, deck) = seeded().await;
        service
            .add_card(owner, draft("hello", "world", None, Some(deck)))
            .await
            .expect("add succeeds");
        service
            .add_card(owner, draft("cat", "кіт", Some("animal"), Some(deck)))
            .await
            .expect("add succeeds");

        let hits = service.search_cards(owner, "orl").await.expect("search");
        assert_eq!(hits.len(), 1);
        assert_eq!(
            hits.first().map(Card::word),
            Some("hello"),
            "substring of the translation should match the hello/world card"
        );

        let by_tip = service.search_cards(owner, "ANIM").await.expect("search");
        assert_eq!(by_tip.len(), 1);
        assert_eq!(by_tip.first().map(Card::word), Some("cat"));
    }

    #[tokio::test]
    async fn search_is_scoped_to_the_owner() {
        let (service, owner, deck) = seeded().await;
        service
            .add_card(owner, draft("hello", "world", None, Some(deck)))
            .await
            .expect("add succeeds");

        let hits = service
            .search_cards(UserId::new(2), "hello")
            .await
            .expect("search");
        assert!(hits.is_empty());
    }
}
