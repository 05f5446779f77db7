//! PostgreSQL-backed `DeckRepository` implementation using Diesel ORM.
//!
//! Ownership is part of every predicate (`id` and `user_id` together), so a
//! foreign deck behaves exactly like a missing one. Deck deletion relies on
//! the schema's `ON DELETE CASCADE` to remove contained cards atomically.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{DeckPersistenceError, DeckRepository};
use crate::domain::{Deck, DeckId, DeckName, UserId};

use super::models::{DeckRow, NewDeckRow};
use super::pool::{DbPool, PoolError};
use super::schema::decks;

/// Diesel-backed implementation of the [`DeckRepository`] port.
#[derive(Clone)]
pub struct DieselDeckRepository {
    pool: DbPool,
}

impl DieselDeckRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> DeckPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            DeckPersistenceError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> DeckPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    if let DieselError::DatabaseError(kind, info) = &error {
        debug!(?kind, message = info.message(), "diesel operation failed");
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            DeckPersistenceError::connection("database connection error")
        }
        _ => DeckPersistenceError::query("database error"),
    }
}

fn row_to_deck(row: DeckRow) -> Result<Deck, DeckPersistenceError> {
    Deck::try_from(row).map_err(|error| DeckPersistenceError::query(error.to_string()))
}

#[async_trait]
impl DeckRepository for DieselDeckRepository {
    async fn create(&self, owner: UserId, name: &DeckName) -> Result<Deck, DeckPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewDeckRow {
            name: name.as_ref(),
            user_id: owner.as_i32(),
        };
        let row: DeckRow = diesel::insert_into(decks::table)
            .values(&new_row)
            .returning(DeckRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_deck(row)
    }

    async fn find_for_owner(
        &self,
        owner: UserId,
        deck: DeckId,
    ) -> Result<Option<Deck>, DeckPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<DeckRow> = decks::table
            .filter(
                decks::id
                    .eq(deck.as_i32())
                    .and(decks::user_id.eq(owner.as_i32())),
            )
            .select(DeckRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_deck).transpose()
    }

    async fn list_for_owner(&self, owner: UserId) -> Result<Vec<Deck>, DeckPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<DeckRow> = decks::table
            .filter(decks::user_id.eq(owner.as_i32()))
            .order(decks::id.asc())
            .select(DeckRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_deck).collect()
    }

    async fn rename(
        &self,
        owner: UserId,
        deck: DeckId,
        name: &DeckName,
    ) -> Result<Option<Deck>, DeckPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<DeckRow> = diesel::update(
            decks::table.filter(
                decks::id
                    .eq(deck.as_i32())
                    .and(decks::user_id.eq(owner.as_i32())),
            ),
        )
        .set((
            decks::name.eq(name.as_ref()),
            decks::updated_at.eq(diesel::dsl::now),
        ))
        .returning(DeckRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;
        row.map(row_to_deck).transpose()
    }

    async fn delete(&self, owner: UserId, deck: DeckId) -> Result<bool, DeckPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(
            decks::table.filter(
                decks::id
                    .eq(deck.as_i32())
                    .and(decks::user_id.eq(owner.as_i32())),
            ),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    //! Error-mapping coverage for this adapter.
    use super::*;

    #[test]
    fn pool_errors_map_to_connection_failures() {
        assert!(matches!(
            map_pool_error(PoolError::build("bad url")),
            DeckPersistenceError::Connection { .. }
        ));
    }

    #[test]
    fn other_diesel_errors_map_to_query_failures() {
        assert!(matches!(
            map_diesel_error(diesel::result::Error::NotFound),
            DeckPersistenceError::Query { .. }
        ));
    }
}
