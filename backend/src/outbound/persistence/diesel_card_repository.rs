//! PostgreSQL-backed `CardRepository` implementation using Diesel ORM.
//!
//! Partial updates use an `AsChangeset` struct whose `None` fields are
//! skipped, so omitted values never overwrite stored ones. Search happens in
//! the database via `ILIKE` with the needle escaped, matching the domain's
//! case-insensitive substring semantics.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{CardPersistenceError, CardRepository};
use crate::domain::{Card, CardDraft, CardId, CardPatch, DeckId, UserId};

use super::models::{CardChangeset, CardRow, NewCardRow};
use super::pool::{DbPool, PoolError};
use super::schema::cards;

/// Diesel-backed implementation of the [`CardRepository`] port.
#[derive(Clone)]
pub struct DieselCardRepository {
    pool: DbPool,
}

impl DieselCardRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CardPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            CardPersistenceError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> CardPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    if let DieselError::DatabaseError(kind, info) = &error {
        debug!(?kind, message = info.message(), "diesel operation failed");
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            CardPersistenceError::connection("database connection error")
        }
        _ => CardPersistenceError::query("database error"),
    }
}

/// Escape `LIKE` metacharacters so the needle matches literally.
fn like_pattern(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len() + 2);
    escaped.push('%');
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

#[async_trait]
impl CardRepository for DieselCardRepository {
    async fn create(
        &self,
        owner: UserId,
        draft: &CardDraft,
    ) -> Result<Card, CardPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewCardRow {
            user_id: owner.as_i32(),
            deck_id: draft.deck().map(DeckId::as_i32),
            word: draft.word(),
            translation: draft.translation(),
            tip: draft.tip(),
        };
        let row: CardRow = diesel::insert_into(cards::table)
            .values(&new_row)
            .returning(CardRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(Card::from(row))
    }

    async fn find_for_owner(
        &self,
        owner: UserId,
        card: CardId,
    ) -> Result<Option<Card>, CardPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<CardRow> = cards::table
            .filter(
                cards::id
                    .eq(card.as_i32())
                    .and(cards::user_id.eq(owner.as_i32())),
            )
            .select(CardRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Card::from))
    }

    async fn list_for_deck(&self, deck: DeckId) -> Result<Vec<Card>, CardPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<CardRow> = cards::table
            .filter(cards::deck_id.eq(deck.as_i32()))
            .order(cards::id.asc())
            .select(CardRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Card::from).collect())
    }

    async fn update(
        &self,
        owner: UserId,
        card: CardId,
        patch: &CardPatch,
    ) -> Result<Option<Card>, CardPersistenceError> {
        if patch.is_empty() {
            // Nothing to write; degrade to a read so the caller still gets
            // the current row.
            return self.find_for_owner(owner, card).await;
        }

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changeset = CardChangeset {
            word: patch.word(),
            translation: patch.translation(),
            tip: patch.tip(),
        };
        let row: Option<CardRow> = diesel::update(
            cards::table.filter(
                cards::id
                    .eq(card.as_i32())
                    .and(cards::user_id.eq(owner.as_i32())),
            ),
        )
        .set((&changeset, cards::updated_at.eq(diesel::dsl::now)))
        .returning(CardRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;
        Ok(row.map(Card::from))
    }

    async fn delete(&self, owner: UserId, card: CardId) -> Result<bool, CardPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(
            cards::table.filter(
                cards::id
                    .eq(card.as_i32())
                    .and(cards::user_id.eq(owner.as_i32())),
            ),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }

    async fn search_for_owner(
        &self,
        owner: UserId,
        needle: &str,
    ) -> Result<Vec<Card>, CardPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let pattern = like_pattern(needle);
        let rows: Vec<CardRow> = cards::table
            .filter(cards::user_id.eq(owner.as_i32()))
            .filter(
                // `tip` is nullable, so the whole predicate unifies as
                // `Nullable<Bool>`; NULL rows simply do not match.
                cards::word
                    .ilike(pattern.clone())
                    .nullable()
                    .or(cards::translation.ilike(pattern.clone()).nullable())
                    .or(cards::tip.ilike(pattern)),
            )
            .order(cards::id.asc())
            .select(CardRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Card::from).collect())
    }
}
