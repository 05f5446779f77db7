//! In-memory repository doubles mirroring the persistence contracts.
//!
//! One [`InMemoryStore`] stands in for the database: the three repository
//! handles share its state, so foreign-key cascades behave like the real
//! schema (`ON DELETE CASCADE`) and ownership predicates match the Diesel
//! adapters' combined `id`/`user_id` filters.
//!
//! Compiled for unit tests and, via the `test-support` feature, for the
//! crate's integration tests.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::card::{Card, CardDraft, CardId, CardPatch};
use crate::domain::deck::{Deck, DeckId, DeckName};
use crate::domain::ports::{
    CardPersistenceError, CardRepository, DeckPersistenceError, DeckRepository, NewUserRecord,
    UserPersistenceError, UserRepository,
};
use crate::domain::user::{EmailAddress, User, UserId};

#[derive(Default)]
struct StoreState {
    users: Vec<User>,
    decks: Vec<Deck>,
    cards: Vec<Card>,
    next_user: i32,
    next_deck: i32,
    next_card: i32,
}

/// Shared in-memory database backing the repository doubles.
#[derive(Default, Clone)]
pub struct InMemoryStore {
    state: Arc<Mutex<StoreState>>,
}

impl InMemoryStore {
    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().expect("store lock")
    }

    /// Repository handle over the shared user table.
    #[must_use]
    pub fn users(&self) -> InMemoryUserRepository {
        InMemoryUserRepository {
            state: self.state.clone(),
        }
    }

    /// Repository handle over the shared deck table.
    #[must_use]
    pub fn decks(&self) -> InMemoryDeckRepository {
        InMemoryDeckRepository {
            state: self.state.clone(),
        }
    }

    /// Repository handle over the shared card table.
    #[must_use]
    pub fn cards(&self) -> InMemoryCardRepository {
        InMemoryCardRepository {
            state: self.state.clone(),
        }
    }

    /// Insert a deck directly, bypassing the service layer.
    pub fn seed_deck(&self, owner: UserId, name: &str) -> DeckId {
        let mut state = self.lock();
        state.next_deck += 1;
        let id = DeckId::new(state.next_deck);
        let name = DeckName::new(name).expect("valid seed deck name");
        state.decks.push(Deck::new(id, name, owner));
        id
    }

    /// Insert a card directly, bypassing the service layer.
    pub fn seed_card(
        &self,
        owner: UserId,
        deck: Option<DeckId>,
        word: &str,
        translation: &str,
        tip: Option<&str>,
    ) -> CardId {
        let mut state = self.lock();
        state.next_card += 1;
        let id = CardId::new(state.next_card);
        state.cards.push(Card::new(
            id,
            owner,
            deck,
            word,
            translation,
            tip.map(ToOwned::to_owned),
        ));
        id
    }

    /// Number of stored users.
    #[must_use]
    pub fn user_count(&self) -> usize {
        self.lock().users.len()
    }

    /// Number of stored cards.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.lock().cards.len()
    }
}

/// In-memory [`UserRepository`] double.
#[derive(Default, Clone)]
pub struct InMemoryUserRepository {
    state: Arc<Mutex<StoreState>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, record: &NewUserRecord) -> Result<User, UserPersistenceError> {
        let mut state = self.state.lock().expect("store lock");
        if state.users.iter().any(|user| user.email() == &record.email) {
            return Err(UserPersistenceError::duplicate_email(record.email.as_ref()));
        }
        state.next_user += 1;
        let user = User::new(
            UserId::new(state.next_user),
            record.name.clone(),
            record.email.clone(),
            record.password_hash.clone(),
        );
        state.users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let state = self.state.lock().expect("store lock");
        Ok(state.users.iter().find(|user| user.id() == id).cloned())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError> {
        let state = self.state.lock().expect("store lock");
        Ok(state.users.iter().find(|user| user.email() == email).cloned())
    }

    async fn update_name(
        &self,
        id: UserId,
        name: &str,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut state = self.state.lock().expect("store lock");
        let Some(slot) = state.users.iter_mut().find(|user| user.id() == id) else {
            return Ok(None);
        };
        let updated = User::new(id, name, slot.email().clone(), slot.password_hash());
        *slot = updated.clone();
        Ok(Some(updated))
    }

    async fn update_password_hash(
        &self,
        id: UserId,
        password_hash: &str,
    ) -> Result<bool, UserPersistenceError> {
        let mut state = self.state.lock().expect("store lock");
        let Some(slot) = state.users.iter_mut().find(|user| user.id() == id) else {
            return Ok(false);
        };
        *slot = User::new(id, slot.name(), slot.email().clone(), password_hash);
        Ok(true)
    }

    async fn delete(&self, id: UserId) -> Result<bool, UserPersistenceError> {
        let mut state = self.state.lock().expect("store lock");
        let before = state.users.len();
        state.users.retain(|user| user.id() != id);
        if state.users.len() == before {
            return Ok(false);
        }
        // ON DELETE CASCADE: owned decks and cards disappear with the user.
        state.decks.retain(|deck| deck.owner() != id);
        state.cards.retain(|card| card.owner() != id);
        Ok(true)
    }
}

/// In-memory [`DeckRepository`] double.
#[derive(Default, Clone)]
pub struct InMemoryDeckRepository {
    state: Arc<Mutex<StoreState>>,
}

#[async_trait]
impl DeckRepository for InMemoryDeckRepository {
    async fn create(&self, owner: UserId, name: &DeckName) -> Result<Deck, DeckPersistenceError> {
        let mut state = self.state.lock().expect("store lock");
        state.next_deck += 1;
        let deck = Deck::new(DeckId::new(state.next_deck), name.clone(), owner);
        state.decks.push(deck.clone());
        Ok(deck)
    }

    async fn find_for_owner(
        &self,
        owner: UserId,
        deck: DeckId,
    ) -> Result<Option<Deck>, DeckPersistenceError> {
        let state = self.state.lock().expect("store lock");
        Ok(state
            .decks
            .iter()
            .find(|candidate| candidate.id() == deck && candidate.owner() == owner)
            .cloned())
    }

    async fn list_for_owner(&self, owner: UserId) -> Result<Vec<Deck>, DeckPersistenceError> {
        let state = self.state.lock().expect("store lock");
        let mut decks: Vec<Deck> = state
            .decks
            .iter()
            .filter(|deck| deck.owner() == owner)
            .cloned()
            .collect();
        decks.sort_by_key(|deck| deck.id().as_i32());
        Ok(decks)
    }

    async fn rename(
        &self,
        owner: UserId,
        deck: DeckId,
        name: &DeckName,
    ) -> Result<Option<Deck>, DeckPersistenceError> {
        let mut state = self.state.lock().expect("store lock");
        let Some(slot) = state
            .decks
            .iter_mut()
            .find(|candidate| candidate.id() == deck && candidate.owner() == owner)
        else {
            return Ok(None);
        };
        let updated = Deck::new(deck, name.clone(), owner);
        *slot = updated.clone();
        Ok(Some(updated))
    }

    async fn delete(&self, owner: UserId, deck: DeckId) -> Result<bool, DeckPersistenceError> {
        let mut state = self.state.lock().expect("store lock");
        let before = state.decks.len();
        state
            .decks
            .retain(|candidate| !(candidate.id() == deck && candidate.owner() == owner));
        if state.decks.len() == before {
            return Ok(false);
        }
        // ON DELETE CASCADE: contained cards disappear with the deck.
        state.cards.retain(|card| card.deck() != Some(deck));
        Ok(true)
    }
}

/// In-memory [`CardRepository`] double.
#[derive(Default, Clone)]
pub struct InMemoryCardRepository {
    state: Arc<Mutex<StoreState>>,
}

#[async_trait]
impl CardRepository for InMemoryCardRepository {
    async fn create(
        &self,
        owner: UserId,
        draft: &CardDraft,
    ) -> Result<Card, CardPersistenceError> {
        let mut state = self.state.lock().expect("store lock");
        state.next_card += 1;
        let card = Card::new(
            CardId::new(state.next_card),
            owner,
            draft.deck(),
            draft.word(),
            draft.translation(),
            draft.tip().map(ToOwned::to_owned),
        );
        state.cards.push(card.clone());
        Ok(card)
    }

    async fn find_for_owner(
        &self,
        owner: UserId,
        card: CardId,
    ) -> Result<Option<Card>, CardPersistenceError> {
        let state = self.state.lock().expect("store lock");
        Ok(state
            .cards
            .iter()
            .find(|candidate| candidate.id() == card && candidate.owner() == owner)
            .cloned())
    }

    async fn list_for_deck(&self, deck: DeckId) -> Result<Vec<Card>, CardPersistenceError> {
        let state = self.state.lock().expect("store lock");
        let mut cards: Vec<Card> = state
            .cards
            .iter()
            .filter(|card| card.deck() == Some(deck))
            .cloned()
            .collect();
        cards.sort_by_key(|card| card.id().as_i32());
        Ok(cards)
    }

    async fn update(
        &self,
        owner: UserId,
        card: CardId,
        patch: &CardPatch,
    ) -> Result<Option<Card>, CardPersistenceError> {
        let mut state = self.state.lock().expect("store lock");
        let Some(slot) = state
            .cards
            .iter_mut()
            .find(|candidate| candidate.id() == card && candidate.owner() == owner)
        else {
            return Ok(None);
        };
        let updated = patch.apply_to(slot);
        *slot = updated.clone();
        Ok(Some(updated))
    }

    async fn delete(&self, owner: UserId, card: CardId) -> Result<bool, CardPersistenceError> {
        let mut state = self.state.lock().expect("store lock");
        let before = state.cards.len();
        state
            .cards
            .retain(|candidate| !(candidate.id() == card && candidate.owner() == owner));
        Ok(state.cards.len() < before)
    }

    async fn search_for_owner(
        &self,
        owner: UserId,
        needle: &str,
    ) -> Result<Vec<Card>, CardPersistenceError> {
        let state = self.state.lock().expect("store lock");
        let mut cards: Vec<Card> = state
            .cards
            .iter()
            .filter(|card| card.owner() == owner && card.matches(needle))
            .cloned()
            .collect();
        cards.sort_by_key(|card| card.id().as_i32());
        Ok(cards)
    }
}

#[cfg(test)]
mod tests {
    //! The doubles must honour the same cascade semantics as the schema.
    use super::*;

    #[tokio::test]
    async fn deleting_a_deck_cascades_to_its_cards() {
        let store = InMemoryStore::default();
        let owner = UserId::new(1);
        let deck = store.seed_deck(owner, "General Vocabulary");
        let card = store.seed_card(owner, Some(deck), "hello", "привіт", None);
        let unfiled = store.seed_card(owner, None, "loose", "вільний", None);

        assert!(store.decks().delete(owner, deck).await.expect("delete"));

        let cards = store.cards();
        assert!(
            cards
                .find_for_owner(owner, card)
                .await
                .expect("lookup")
                .is_none(),
            "filed card must disappear with its deck"
        );
        assert!(
            cards
                .find_for_owner(owner, unfiled)
                .await
                .expect("lookup")
                .is_some(),
            "unfiled card must survive"
        );
    }

    #[tokio::test]
    async fn deleting_a_user_cascades_to_decks_and_cards() {
        let store = InMemoryStore::default();
        let owner = UserId::new(1);
        let record = NewUserRecord {
            name: "Alice".to_owned(),
            email: EmailAddress::new("alice@example.com").expect("valid email"),
            password_hash: "$argon2id$stub".to_owned(),
        };
        let user = store.users().create(&record).await.expect("create user");
        let deck = store.seed_deck(user.id(), "General Vocabulary");
        store.seed_card(user.id(), Some(deck), "hello", "привіт", None);

        assert!(store.users().delete(user.id()).await.expect("delete"));
        assert_eq!(store.user_count(), 0);
        assert_eq!(store.card_count(), 0);
        assert!(
            store
                .decks()
                .find_for_owner(user.id(), deck)
                .await
                .expect("lookup")
                .is_none()
        );
    }

    #[tokio::test]
    async fn delete_of_missing_rows_reports_false() {
        let store = InMemoryStore::default();
        let owner = UserId::new(1);
        assert!(!store.users().delete(owner).await.expect("user delete"));
        assert!(
            !store
                .decks()
                .delete(owner, DeckId::new(9))
                .await
                .expect("deck delete")
        );
        assert!(
            !store
                .cards()
                .delete(owner, CardId::new(9))
                .await
                .expect("card delete")
        );
    }
}
