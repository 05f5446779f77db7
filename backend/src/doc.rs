//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] aggregate generating the OpenAPI specification for
//! the HTTP surface: every endpoint from the inbound layer, the shared JSON
//! schemas, and the session-cookie security scheme. Swagger UI serves the
//! document at `/docs` in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode, ReviewCard};
use crate::inbound::http::cards::{CardDto, CardForm, CardView};
use crate::inbound::http::decks::{AddDeckForm, DeckDetailView, DeckDto, DeckListView};
use crate::inbound::http::review::ReviewView;
use crate::inbound::http::session::{Flash, FlashLevel};
use crate::inbound::http::users::{AuthView, LoginForm, RegisterForm};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /login or POST /register.",
            ))),
        );
    }
}

/// OpenAPI document for the vocabulary service.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Linguist backend API",
        description = "Form-driven HTTP interface for decks, cards, and review sessions."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::register_form,
        crate::inbound::http::users::register,
        crate::inbound::http::users::login_form,
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::decks::index,
        crate::inbound::http::decks::add_deck,
        crate::inbound::http::decks::show_deck,
        crate::inbound::http::decks::delete_deck,
        crate::inbound::http::cards::add_card,
        crate::inbound::http::cards::edit_card,
        crate::inbound::http::cards::update_card,
        crate::inbound::http::cards::delete_card,
        crate::inbound::http::cards::search_cards,
        crate::inbound::http::review::review_deck,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        Flash,
        FlashLevel,
        AuthView,
        RegisterForm,
        LoginForm,
        DeckDto,
        DeckListView,
        DeckDetailView,
        AddDeckForm,
        CardDto,
        CardView,
        CardForm,
        ReviewCard,
        ReviewView,
    )),
    tags(
        (name = "accounts", description = "Registration, login, and logout"),
        (name = "decks", description = "Deck listing and lifecycle"),
        (name = "cards", description = "Card lifecycle and search"),
        (name = "review", description = "Shuffled review sessions"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying OpenAPI schema and path registration.
    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    use super::*;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn error_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get("Error").expect("Error schema");
        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
    }

    #[test]
    fn card_schema_matches_the_json_projection() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let card_schema = schemas.get("CardDto").expect("CardDto schema");
        for field in ["id", "word", "translation", "tip"] {
            assert_object_schema_has_field(card_schema, field);
        }
    }

    #[test]
    fn every_route_is_registered() {
        let doc = ApiDoc::openapi();
        for path in [
            "/",
            "/register",
            "/login",
            "/logout",
            "/deck/{deck_id}",
            "/add_card/{deck_id}",
            "/edit_card/{card_id}",
            "/update_card/{card_id}",
            "/delete_card/{card_id}",
            "/add_deck",
            "/delete_deck/{deck_id}",
            "/review/{deck_id}",
            "/search",
        ] {
            assert!(
                doc.paths.paths.contains_key(path),
                "path {path} should be documented"
            );
        }
    }
}
