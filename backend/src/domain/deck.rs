//! Deck entity: a named grouping of cards belonging to one user.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::user::UserId;

/// Maximum allowed length for a deck name.
pub const DECK_NAME_MAX: usize = 128;

/// Validation errors raised by deck value-type constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeckValidationError {
    /// Deck name was missing or blank once trimmed.
    EmptyName,
    /// Deck name exceeded [`DECK_NAME_MAX`] characters.
    NameTooLong {
        /// Maximum accepted length.
        max: usize,
    },
}

impl fmt::Display for DeckValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "deck name must not be empty"),
            Self::NameTooLong { max } => {
                write!(f, "deck name must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for DeckValidationError {}

/// Stable numeric deck identifier (database-generated).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeckId(i32);

impl DeckId {
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

impl fmt::Display for DeckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated deck name.
///
/// ## Invariants
/// - Trimmed of surrounding whitespace and non-empty.
/// - At most [`DECK_NAME_MAX`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DeckName(String);

impl DeckName {
    /// Validate and construct a [`DeckName`].
    pub fn new(name: impl Into<String>) -> Result<Self, DeckValidationError> {
        let name = name.into();
        let normalized = name.trim();
        if normalized.is_empty() {
            return Err(DeckValidationError::EmptyName);
        }
        if normalized.chars().count() > DECK_NAME_MAX {
            return Err(DeckValidationError::NameTooLong { max: DECK_NAME_MAX });
        }
        Ok(Self(normalized.to_owned()))
    }
}

impl AsRef<str> for DeckName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DeckName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<DeckName> for String {
    fn from(value: DeckName) -> Self {
        value.0
    }
}

impl TryFrom<String> for DeckName {
    type Error = DeckValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A named collection of vocabulary cards owned by one user.
///
/// The owner never changes after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    id: DeckId,
    name: DeckName,
    owner: UserId,
}

impl Deck {
    /// Build a deck from persisted components.
    #[must_use]
    pub fn new(id: DeckId, name: DeckName, owner: UserId) -> Self {
        Self { id, name, owner }
    }

    /// Stable deck identifier.
    #[must_use]
    pub fn id(&self) -> DeckId {
        self.id
    }

    /// Deck name.
    #[must_use]
    pub fn name(&self) -> &DeckName {
        &self.name
    }

    /// Owning user.
    #[must_use]
    pub fn owner(&self) -> UserId {
        self.owner
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn rejects_blank_names(#[case] input: &str) {
        let err = DeckName::new(input).expect_err("blank name must fail");
        assert_eq!(err, DeckValidationError::EmptyName);
    }

    #[test]
    fn rejects_overlong_names() {
        let err = DeckName::new("x".repeat(DECK_NAME_MAX + 1)).expect_err("overlong must fail");
        assert_eq!(err, DeckValidationError::NameTooLong { max: DECK_NAME_MAX });
    }

    #[rstest]
    #[case("General Vocabulary")]
    #[case("  padded  ")]
    fn accepts_and_trims_valid_names(#[case] input: &str) {
        let name = DeckName::new(input).expect("valid name");
        assert_eq!(name.as_ref(), input.trim());
    }
}
