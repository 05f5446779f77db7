//! Card entity: one vocabulary entry with an optional deck assignment.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::deck::DeckId;
use super::user::UserId;

/// Validation errors raised by card value constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardValidationError {
    /// Word was missing or blank once trimmed.
    EmptyWord,
    /// Translation was missing or blank once trimmed.
    EmptyTranslation,
}

impl fmt::Display for CardValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyWord => write!(f, "word must not be empty"),
            Self::EmptyTranslation => write!(f, "translation must not be empty"),
        }
    }
}

impl std::error::Error for CardValidationError {}

/// Stable numeric card identifier (database-generated).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(i32);

impl CardId {
    /// Wrap a raw database identifier.
    #[must_use]
    pub fn new(id: i32) -> Self {
        Self(id)
    }

    /// Access the raw identifier.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Collapse a blank optional string to `None`, trimming the survivor.
fn normalize_optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToOwned::to_owned)
}

/// One vocabulary entry owned by a user, optionally filed into a deck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    id: CardId,
    owner: UserId,
    deck: Option<DeckId>,
    word: String,
    translation: String,
    tip: Option<String>,
}

impl Card {
    /// Build a card from persisted components.
    #[must_use]
    pub fn new(
        id: CardId,
        owner: UserId,
        deck: Option<DeckId>,
        word: impl Into<String>,
        translation: impl Into<String>,
        tip: Option<String>,
    ) -> Self {
        Self {
            id,
            owner,
            deck,
            word: word.into(),
            translation: translation.into(),
            tip,
        }
    }

    /// Stable card identifier.
    #[must_use]
    pub fn id(&self) -> CardId {
        self.id
    }

    /// Owning user.
    #[must_use]
    pub fn owner(&self) -> UserId {
        self.owner
    }

    /// Deck the card is filed into, if any.
    #[must_use]
    pub fn deck(&self) -> Option<DeckId> {
        self.deck
    }

    /// The vocabulary word.
    #[must_use]
    pub fn word(&self) -> &str {
        self.word.as_str()
    }

    /// Its translation.
    #[must_use]
    pub fn translation(&self) -> &str {
        self.translation.as_str()
    }

    /// Optional hint text.
    #[must_use]
    pub fn tip(&self) -> Option<&str> {
        self.tip.as_deref()
    }

    /// Case-insensitive substring match against word, translation, or tip.
    ///
    /// Mirrors the `ILIKE '%needle%'` predicate the persistence layer uses,
    /// so in-memory doubles and the database agree on search semantics.
    #[must_use]
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.word.to_lowercase().contains(&needle)
            || self.translation.to_lowercase().contains(&needle)
            || self
                .tip
                .as_deref()
                .is_some_and(|tip| tip.to_lowercase().contains(&needle))
    }
}

/// Validated payload for creating a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardDraft {
    word: String,
    translation: String,
    tip: Option<String>,
    deck: Option<DeckId>,
}

impl CardDraft {
    /// Validate and construct a draft; blank tips collapse to `None`.
    pub fn new(
        word: &str,
        translation: &str,
        tip: Option<&str>,
        deck: Option<DeckId>,
    ) -> Result<Self, CardValidationError> {
        let word = word.trim();
        if word.is_empty() {
            return Err(CardValidationError::EmptyWord);
        }
        let translation = translation.trim();
        if translation.is_empty() {
            return Err(CardValidationError::EmptyTranslation);
        }
        Ok(Self {
            word: word.to_owned(),
            translation: translation.to_owned(),
            tip: normalize_optional(tip),
            deck,
        })
    }

    /// The vocabulary word.
    #[must_use]
    pub fn word(&self) -> &str {
        self.word.as_str()
    }

    /// Its translation.
    #[must_use]
    pub fn translation(&self) -> &str {
        self.translation.as_str()
    }

    /// Optional hint text.
    #[must_use]
    pub fn tip(&self) -> Option<&str> {
        self.tip.as_deref()
    }

    /// Deck to file the card into, if any.
    #[must_use]
    pub fn deck(&self) -> Option<DeckId> {
        self.deck
    }
}

/// Partial update for a card: only supplied fields change.
///
/// Blank inputs count as omitted, so a half-filled edit form never
/// overwrites stored values with empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardPatch {
    word: Option<String>,
    translation: Option<String>,
    tip: Option<String>,
}

impl CardPatch {
    /// Build a patch from optional raw inputs, dropping blank values.
    #[must_use]
    pub fn from_fields(word: Option<&str>, translation: Option<&str>, tip: Option<&str>) -> Self {
        Self {
            word: normalize_optional(word),
            translation: normalize_optional(translation),
            tip: normalize_optional(tip),
        }
    }

    /// True when no field would change.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.word.is_none() && self.translation.is_none() && self.tip.is_none()
    }

    /// Replacement word, if supplied.
    #[must_use]
    pub fn word(&self) -> Option<&str> {
        self.word.as_deref()
    }

    /// Replacement translation, if supplied.
    #[must_use]
    pub fn translation(&self) -> Option<&str> {
        self.translation.as_deref()
    }

    /// Replacement tip, if supplied.
    #[must_use]
    pub fn tip(&self) -> Option<&str> {
        self.tip.as_deref()
    }

    /// Apply the patch to an existing card, leaving omitted fields alone.
    #[must_use]
    pub fn apply_to(&self, card: &Card) -> Card {
        Card::new(
            card.id(),
            card.owner(),
            card.deck(),
            self.word().unwrap_or_else(|| card.word()),
            self.translation().unwrap_or_else(|| card.translation()),
            self.tip().or_else(|| card.tip()).map(ToOwned::to_owned),
        )
    }
}
