//! Diesel row models and their conversions to domain entities.
//!
//! Rows are internal to the persistence layer; repositories translate them
//! to domain types at the boundary and never leak Diesel derives upward.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::{
    Card, CardId, Deck, DeckId, DeckName, EmailAddress, User, UserId,
};

use super::schema::{cards, decks, users};

/// Raised when a stored row no longer satisfies a domain invariant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("stored {entity} row {id} is invalid: {reason}")]
pub struct CorruptRow {
    /// Table the row came from.
    pub entity: &'static str,
    /// Primary key of the offending row.
    pub id: i32,
    /// Violated invariant.
    pub reason: String,
}

/// A `users` row as selected from the database.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = CorruptRow;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let email = EmailAddress::new(row.email).map_err(|error| CorruptRow {
            entity: "users",
            id: row.id,
            reason: error.to_string(),
        })?;
        Ok(Self::new(
            UserId::new(row.id),
            row.name,
            email,
            row.password_hash,
        ))
    }
}

/// Insertable payload for a new `users` row.
#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
}

/// A `decks` row as selected from the database.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = decks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DeckRow {
    pub id: i32,
    pub name: String,
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<DeckRow> for Deck {
    type Error = CorruptRow;

    fn try_from(row: DeckRow) -> Result<Self, Self::Error> {
        let name = DeckName::new(row.name).map_err(|error| CorruptRow {
            entity: "decks",
            id: row.id,
            reason: error.to_string(),
        })?;
        Ok(Self::new(DeckId::new(row.id), name, UserId::new(row.user_id)))
    }
}

/// Insertable payload for a new `decks` row.
#[derive(Debug, Insertable)]
#[diesel(table_name = decks)]
pub struct NewDeckRow<'a> {
    pub name: &'a str,
    pub user_id: i32,
}

/// A `cards` row as selected from the database.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = cards)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CardRow {
    pub id: i32,
    pub user_id: i32,
    pub deck_id: Option<i32>,
    pub word: String,
    pub translation: String,
    pub tip: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CardRow> for Card {
    fn from(row: CardRow) -> Self {
        Self::new(
            CardId::new(row.id),
            UserId::new(row.user_id),
            row.deck_id.map(DeckId::new),
            row.word,
            row.translation,
            row.tip,
        )
    }
}

/// Insertable payload for a new `cards` row.
#[derive(Debug, Insertable)]
#[diesel(table_name = cards)]
pub struct NewCardRow<'a> {
    pub user_id: i32,
    pub deck_id: Option<i32>,
    pub word: &'a str,
    pub translation: &'a str,
    pub tip: Option<&'a str>,
}

/// Partial update for a `cards` row; `None` fields are left untouched.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = cards)]
pub struct CardChangeset<'a> {
    pub word: Option<&'a str>,
    pub translation: Option<&'a str>,
    pub tip: Option<&'a str>,
}
