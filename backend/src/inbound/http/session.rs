//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Wraps the Actix session so handlers deal only with domain-friendly
//! operations: persisting the logged-in user, requiring one, and the
//! flash-message slot consumed by the next rendered view.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const FLASH_KEY: &str = "flash";

/// Severity of a flash message, mirrored by the view layer's styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FlashLevel {
    /// The operation completed.
    Success,
    /// The operation was refused or failed.
    Danger,
}

/// One-shot status message carried across a redirect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Flash {
    /// Message severity.
    pub level: FlashLevel,
    /// User-facing text.
    pub message: String,
}

impl Flash {
    /// Build a success flash.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            message: message.into(),
        }
    }

    /// Build a danger flash.
    #[must_use]
    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Danger,
            message: message.into(),
        }
    }
}

/// Newtype wrapper exposing higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    #[must_use]
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated user's id in the session cookie.
    pub fn persist_user(&self, user_id: UserId) -> Result<(), Error> {
        self.0
            .insert(USER_ID_KEY, user_id.as_i32())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the current user id from the session, if present.
    ///
    /// A tampered value that no longer parses as an id counts as logged out.
    pub fn user_id(&self) -> Result<Option<UserId>, Error> {
        match self.0.get::<i32>(USER_ID_KEY) {
            Ok(id) => Ok(id.map(UserId::new)),
            Err(error) => {
                tracing::warn!(%error, "invalid user id in session cookie");
                Ok(None)
            }
        }
    }

    /// Require an authenticated user id or fail with `401 Unauthorized`.
    pub fn require_user_id(&self) -> Result<UserId, Error> {
        self.user_id()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// Drop the authenticated identity, logging the user out.
    ///
    /// Only the identity key is removed so a farewell flash pushed right
    /// after survives into the next view.
    pub fn logout(&self) {
        self.0.remove(USER_ID_KEY);
    }

    /// Store a one-shot status message for the next rendered view.
    pub fn push_flash(&self, flash: Flash) -> Result<(), Error> {
        self.0
            .insert(FLASH_KEY, flash)
            .map_err(|error| Error::internal(format!("failed to store flash: {error}")))
    }

    /// Take the pending status message, clearing it from the session.
    pub fn take_flash(&self) -> Result<Option<Flash>, Error> {
        let flash = match self.0.get::<Flash>(FLASH_KEY) {
            Ok(flash) => flash,
            Err(error) => {
                tracing::warn!(%error, "invalid flash payload in session cookie");
                None
            }
        };
        if flash.is_some() {
            self.0.remove(FLASH_KEY);
        }
        Ok(flash)
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
