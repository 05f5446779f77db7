//! Driving port for card mutations.

use async_trait::async_trait;

use crate::domain::card::{Card, CardDraft, CardId, CardPatch};
use crate::domain::deck::DeckId;
use crate::domain::error::Error;
use crate::domain::user::UserId;

/// Card lifecycle operations for an authenticated owner.
#[async_trait]
pub trait CardCommand: Send + Sync {
    /// Create a card for the owner. When the draft names a deck, that deck's
    /// ownership is verified first; a foreign or missing deck fails with
    /// `not_found` and creates nothing.
    async fn add_card(&self, owner: UserId, draft: CardDraft) -> Result<Card, Error>;

    /// Apply a partial update; omitted fields keep their stored values.
    /// Missing and foreign cards both fail with `not_found`.
    async fn update_card(
        &self,
        owner: UserId,
        card: CardId,
        patch: CardPatch,
    ) -> Result<Card, Error>;

    /// Delete a card, reporting the deck it was filed into so callers can
    /// redirect back to the listing. Missing and foreign cards both fail
    /// with `not_found`.
    async fn delete_card(&self, owner: UserId, card: CardId) -> Result<Option<DeckId>, Error>;
}
