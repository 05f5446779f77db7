//! Domain primitives, entities, services, and ports.
//!
//! Purpose: define the strongly typed vocabulary model (users, decks, cards)
//! and the use-case services over it, independent of HTTP and persistence.
//! Inbound adapters consume the driving ports; outbound adapters implement
//! the repository ports.

pub mod account_service;
pub mod auth;
pub mod card;
pub mod card_service;
pub mod deck;
pub mod deck_service;
pub mod error;
pub mod password;
pub mod ports;
pub mod review;
pub mod review_service;
#[cfg(any(test, feature = "test-support"))]
pub mod test_doubles;
pub mod trace_id;
pub mod user;

pub use self::account_service::AccountService;
pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::card::{Card, CardDraft, CardId, CardPatch, CardValidationError};
pub use self::card_service::CardService;
pub use self::deck::{Deck, DeckId, DeckName, DeckValidationError};
pub use self::deck_service::DeckService;
pub use self::error::{Error, ErrorCode};
pub use self::password::CredentialHasher;
pub use self::review::{ReviewCard, shuffle_for_review};
pub use self::review_service::ReviewService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{EmailAddress, User, UserId, UserValidationError};

/// Convenient API result alias.
pub type ApiResult<T> = Result<T, Error>;
