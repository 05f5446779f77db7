//! Driving port for card read models.

use async_trait::async_trait;

use crate::domain::card::{Card, CardId};
use crate::domain::error::Error;
use crate::domain::user::UserId;

/// Read access to a user's cards.
#[async_trait]
pub trait CardQuery: Send + Sync {
    /// Fetch a card for the edit view; missing and foreign cards both fail
    /// with `not_found`.
    async fn card_for_edit(&self, owner: UserId, card: CardId) -> Result<Card, Error>;

    /// Case-insensitive substring search over the user's cards, matching
    /// word, translation, or tip.
    async fn search_cards(&self, owner: UserId, needle: &str) -> Result<Vec<Card>, Error>;
}
