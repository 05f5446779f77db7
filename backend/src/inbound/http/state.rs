//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain driving ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AccountCommand, CardCommand, CardQuery, DeckCommand, DeckQuery, LoginService, ReviewQuery,
};

/// Dependency bundle for HTTP handlers: one field per driving port.
#[derive(Clone)]
pub struct HttpState {
    /// Credential verification for `POST /login`.
    pub login: Arc<dyn LoginService>,
    /// Account lifecycle operations.
    pub accounts: Arc<dyn AccountCommand>,
    /// Deck read models.
    pub deck_query: Arc<dyn DeckQuery>,
    /// Deck mutations.
    pub deck_command: Arc<dyn DeckCommand>,
    /// Card read models.
    pub card_query: Arc<dyn CardQuery>,
    /// Card mutations.
    pub card_command: Arc<dyn CardCommand>,
    /// Review-session assembly.
    pub review: Arc<dyn ReviewQuery>,
}
