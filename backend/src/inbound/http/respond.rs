//! Small response helpers shared by the form-driven handlers.
//!
//! Mutating routes answer `303 See Other` and carry their outcome as a
//! flash message, which the next rendered view consumes; ownership misses
//! collapse onto the deck list as the safe default view.

use actix_web::HttpResponse;
use actix_web::http::header;

use crate::domain::{Error, ErrorCode};

use super::session::{Flash, SessionContext};

/// Redirect to the given location with `303 See Other`.
#[must_use]
pub fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location.to_owned()))
        .finish()
}

/// Store a flash message, then redirect.
pub fn flash_and_redirect(
    session: &SessionContext,
    flash: Flash,
    location: &str,
) -> Result<HttpResponse, Error> {
    session.push_flash(flash)?;
    Ok(see_other(location))
}

/// Collapse a `not_found` outcome onto the safe default view (`/`) with a
/// danger flash; any other error propagates to the JSON error envelope.
pub fn not_found_to_home(
    session: &SessionContext,
    error: Error,
) -> Result<HttpResponse, Error> {
    if error.code() == ErrorCode::NotFound {
        flash_and_redirect(session, Flash::danger(error.message()), "/")
    } else {
        Err(error)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use actix_web::http::StatusCode;

    use super::*;

    #[test]
    fn see_other_sets_location() {
        let response = see_other("/deck/3");
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response
                .headers()
                .get(header::LOCATION)
                .and_then(|value| value.to_str().ok()),
            Some("/deck/3")
        );
    }
}
