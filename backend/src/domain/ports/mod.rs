//! Domain ports: repository abstractions and driving use-case traits.
//!
//! Repositories (driven ports) are implemented by the outbound persistence
//! adapters; the driving ports are implemented by the domain services and
//! consumed by the inbound HTTP adapter.

mod account_command;
mod card_command;
mod card_query;
mod card_repository;
mod deck_command;
mod deck_query;
mod deck_repository;
mod login_service;
mod review_query;
mod user_repository;

pub use account_command::{AccountCommand, ChangePasswordRequest, RegisterRequest};
pub use card_command::CardCommand;
pub use card_query::CardQuery;
pub use card_repository::{CardPersistenceError, CardRepository};
pub use deck_command::DeckCommand;
pub use deck_query::{DeckQuery, DeckWithCards};
pub use deck_repository::{DeckPersistenceError, DeckRepository};
pub use login_service::LoginService;
pub use review_query::{ReviewQuery, ReviewSession};
pub use user_repository::{NewUserRecord, UserPersistenceError, UserRepository};
