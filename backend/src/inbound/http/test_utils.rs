//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use actix_web::http::header;
use actix_web::web;

use crate::domain::test_doubles::InMemoryStore;
use crate::domain::{AccountService, CardService, DeckService, ReviewService};

use super::state::HttpState;
use super::users::RegisterForm;

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Build handler state over a fresh in-memory store, returning both so tests
/// can inspect the underlying rows.
pub fn in_memory_state() -> (web::Data<HttpState>, InMemoryStore) {
    let store = InMemoryStore::default();
    let users = Arc::new(store.users());
    let decks = Arc::new(store.decks());
    let cards = Arc::new(store.cards());

    let accounts = Arc::new(AccountService::new(users));
    let deck_service = Arc::new(DeckService::new(decks.clone(), cards.clone()));
    let card_service = Arc::new(CardService::new(decks.clone(), cards.clone()));
    let review_service = Arc::new(ReviewService::new(decks, cards));

    let state = HttpState {
        login: accounts.clone(),
        accounts,
        deck_query: deck_service.clone(),
        deck_command: deck_service,
        card_query: card_service.clone(),
        card_command: card_service,
        review: review_service,
    };
    (web::Data::new(state), store)
}

/// Registration form payload for tests.
pub fn register_payload(name: &str, email: &str, password: &str) -> RegisterForm {
    RegisterForm {
        name: Some(name.to_owned()),
        email: Some(email.to_owned()),
        password: Some(password.to_owned()),
    }
}

/// Extract the session cookie from a response, if one was set.
pub fn session_cookie(res: &ServiceResponse) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
}

/// The `Location` a redirect response points at.
pub fn follow_redirect(res: &ServiceResponse) -> String {
    res.headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| panic!("response has no Location header"))
}
