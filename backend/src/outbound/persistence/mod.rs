//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports, backed by
//! PostgreSQL through `diesel-async` with `bb8` connection pooling.
//!
//! Principles:
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types; business rules live in the domain services.
//! - **Internal models**: row structs (`models`) and table definitions
//!   (`schema`) never leak out of this module.
//! - **One statement per call**: every port operation is a single SQL
//!   statement, so the database's own atomicity (plus `ON DELETE CASCADE`)
//!   is the unit of work.
//! - **Typed errors**: database failures map onto the ports' persistence
//!   error enums.

mod diesel_card_repository;
mod diesel_deck_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_card_repository::DieselCardRepository;
pub use diesel_deck_repository::DieselDeckRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
