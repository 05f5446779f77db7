//! Deck handlers: the home listing, deck detail, creation, and deletion.
//!
//! ```text
//! GET  /                 deck list for the signed-in user
//! POST /add_deck         deck_name=General+Vocabulary
//! GET  /deck/42          cards in deck 42
//! POST /delete_deck/42
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::domain::{Deck, DeckId, DeckName};

use super::ApiResult;
use super::cards::CardDto;
use super::respond::{flash_and_redirect, not_found_to_home};
use super::session::{Flash, SessionContext};
use super::state::HttpState;

/// JSON projection of a deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeckDto {
    /// Deck identifier.
    #[schema(example = 42)]
    pub id: i32,
    /// Deck name.
    #[schema(example = "General Vocabulary")]
    pub name: String,
}

impl From<Deck> for DeckDto {
    fn from(deck: Deck) -> Self {
        Self {
            id: deck.id().as_i32(),
            name: deck.name().as_ref().to_owned(),
        }
    }
}

/// View-model for the home page: the user's decks.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeckListView {
    /// The user's decks in stable order.
    pub decks: Vec<DeckDto>,
    /// Pending status message, if a redirect left one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flash: Option<Flash>,
}

/// View-model for one deck and its cards.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeckDetailView {
    /// The deck under view.
    pub deck: DeckDto,
    /// Its cards in stable order.
    pub cards: Vec<CardDto>,
    /// Pending status message, if a redirect left one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flash: Option<Flash>,
}

/// Form body for `POST /add_deck`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct AddDeckForm {
    /// Name for the new deck; required, non-empty.
    pub deck_name: Option<String>,
}

/// List the signed-in user's decks.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Deck list", body = DeckListView),
        (status = 401, description = "Not signed in", body = crate::domain::Error)
    ),
    tags = ["decks"],
    operation_id = "listDecks"
)]
#[get("/")]
pub async fn index(state: web::Data<HttpState>, session: SessionContext) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let decks = state.deck_query.list_decks(owner).await?;
    let flash = session.take_flash()?;
    Ok(HttpResponse::Ok().json(DeckListView {
        decks: decks.into_iter().map(DeckDto::from).collect(),
        flash,
    }))
}

/// Create a deck.
#[utoipa::path(
    post,
    path = "/add_deck",
    request_body(content = AddDeckForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Redirect to `/`; failures carry a danger flash"),
        (status = 401, description = "Not signed in", body = crate::domain::Error)
    ),
    tags = ["decks"],
    operation_id = "addDeck"
)]
#[post("/add_deck")]
pub async fn add_deck(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<AddDeckForm>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let name = match DeckName::new(form.into_inner().deck_name.unwrap_or_default()) {
        Ok(name) => name,
        Err(error) => {
            return flash_and_redirect(&session, Flash::danger(error.to_string()), "/");
        }
    };

    let deck = state.deck_command.create_deck(owner, name).await?;
    info!(deck_id = %deck.id(), "deck created");
    flash_and_redirect(&session, Flash::success("deck created"), "/")
}

/// Show one deck with its cards.
#[utoipa::path(
    get,
    path = "/deck/{deck_id}",
    params(("deck_id" = i32, Path, description = "Deck identifier")),
    responses(
        (status = 200, description = "Deck detail", body = DeckDetailView),
        (status = 303, description = "Unknown or foreign deck; redirect to `/`"),
        (status = 401, description = "Not signed in", body = crate::domain::Error)
    ),
    tags = ["decks"],
    operation_id = "showDeck"
)]
#[get("/deck/{deck_id}")]
pub async fn show_deck(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let deck_id = DeckId::new(path.into_inner());

    match state.deck_query.deck_with_cards(owner, deck_id).await {
        Ok(detail) => {
            let flash = session.take_flash()?;
            Ok(HttpResponse::Ok().json(DeckDetailView {
                deck: DeckDto::from(detail.deck),
                cards: detail.cards.into_iter().map(CardDto::from).collect(),
                flash,
            }))
        }
        Err(error) => not_found_to_home(&session, error),
    }
}

/// Delete a deck, cascading to its cards.
#[utoipa::path(
    post,
    path = "/delete_deck/{deck_id}",
    params(("deck_id" = i32, Path, description = "Deck identifier")),
    responses(
        (status = 303, description = "Redirect to `/`"),
        (status = 401, description = "Not signed in", body = crate::domain::Error)
    ),
    tags = ["decks"],
    operation_id = "deleteDeck"
)]
#[post("/delete_deck/{deck_id}")]
pub async fn delete_deck(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let deck_id = DeckId::new(path.into_inner());

    match state.deck_command.delete_deck(owner, deck_id).await {
        Ok(()) => {
            info!(deck_id = %deck_id, "deck deleted");
            flash_and_redirect(&session, Flash::success("deck and its cards deleted"), "/")
        }
        Err(error) => not_found_to_home(&session, error),
    }
}

#[cfg(test)]
mod tests {
    //! Handler coverage over in-memory services.
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};

    use super::*;
    use crate::domain::UserId;
    use crate::inbound::http::session::FlashLevel;
    use crate::inbound::http::test_utils::{
        follow_redirect, in_memory_state, register_payload, session_cookie,
        test_session_middleware,
    };
    use crate::inbound::http::users;

    fn test_app(
        state: actix_web::web::Data<HttpState>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(state)
            .wrap(test_session_middleware())
            .service(users::register)
            .service(index)
            .service(add_deck)
            .service(show_deck)
            .service(delete_deck)
    }

    async fn signed_in(
        app: &impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
    ) -> actix_web::cookie::Cookie<'static> {
        let res = actix_test::call_service(
            app,
            actix_test::TestRequest::post()
                .uri("/register")
                .set_form(register_payload("Alice", "alice@example.com", "password123"))
                .to_request(),
        )
        .await;
        session_cookie(&res).expect("session cookie")
    }

    #[actix_web::test]
    async fn index_requires_authentication() {
        let (state, _store) = in_memory_state();
        let app = actix_test::init_service(test_app(state)).await;
        let res =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri("/").to_request())
                .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn add_deck_then_index_lists_it_with_a_success_flash() {
        let (state, _store) = in_memory_state();
        let app = actix_test::init_service(test_app(state)).await;
        let cookie = signed_in(&app).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/add_deck")
                .cookie(cookie)
                .set_form(AddDeckForm {
                    deck_name: Some("General Vocabulary".to_owned()),
                })
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(follow_redirect(&res), "/");
        let cookie = session_cookie(&res).expect("session cookie");

        let view = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/").cookie(cookie).to_request(),
        )
        .await;
        let body: DeckListView = actix_test::read_body_json(view).await;
        assert_eq!(body.decks.len(), 1);
        assert_eq!(
            body.decks.first().map(|deck| deck.name.as_str()),
            Some("General Vocabulary")
        );
        let flash = body.flash.expect("flash present");
        assert_eq!(flash.level, FlashLevel::Success);
    }

    #[actix_web::test]
    async fn blank_deck_name_is_a_validation_flash() {
        let (state, _store) = in_memory_state();
        let app = actix_test::init_service(test_app(state)).await;
        let cookie = signed_in(&app).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/add_deck")
                .cookie(cookie)
                .set_form(AddDeckForm {
                    deck_name: Some("   ".to_owned()),
                })
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        let cookie = session_cookie(&res).expect("session cookie");

        let view = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/").cookie(cookie).to_request(),
        )
        .await;
        let body: DeckListView = actix_test::read_body_json(view).await;
        assert!(body.decks.is_empty());
        assert_eq!(body.flash.expect("flash present").level, FlashLevel::Danger);
    }

    #[actix_web::test]
    async fn foreign_deck_bounces_home_like_a_missing_one() {
        let (state, store) = in_memory_state();
        let foreign = store.seed_deck(UserId::new(99), "Not Yours");
        let app = actix_test::init_service(test_app(state)).await;
        let cookie = signed_in(&app).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri(&format!("/deck/{}", foreign.as_i32()))
                .cookie(cookie.clone())
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(follow_redirect(&res), "/");

        let missing = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/deck/424242")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(missing.status(), StatusCode::SEE_OTHER);
        assert_eq!(follow_redirect(&missing), "/");
    }

    #[actix_web::test]
    async fn delete_deck_cascades_to_cards() {
        let (state, store) = in_memory_state();
        let app = actix_test::init_service(test_app(state)).await;
        let cookie = signed_in(&app).await;

        // The registering test user gets id 1 in a fresh store.
        let owner = UserId::new(1);
        let deck = store.seed_deck(owner, "Doomed");
        store.seed_card(owner, Some(deck), "hello", "привіт", None);
        store.seed_card(owner, Some(deck), "world", "світ", None);
        assert_eq!(store.card_count(), 2);

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri(&format!("/delete_deck/{}", deck.as_i32()))
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(follow_redirect(&res), "/");
        assert_eq!(store.card_count(), 0);
    }
}
