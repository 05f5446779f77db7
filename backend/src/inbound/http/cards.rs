//! Card handlers: creation, editing, partial update, deletion, and search.
//!
//! ```text
//! POST /add_card/42      word=hello&translation=привіт&tip=greeting
//! GET  /edit_card/7
//! POST /update_card/7    word=hullo
//! POST /delete_card/7
//! GET  /search?q=orl
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Card, CardDraft, CardId, CardPatch, DeckId};

use super::ApiResult;
use super::respond::{flash_and_redirect, not_found_to_home};
use super::session::{Flash, SessionContext};
use super::state::HttpState;

/// JSON projection of a card: id, word, translation, and optional tip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CardDto {
    /// Card identifier.
    #[schema(example = 7)]
    pub id: i32,
    /// The vocabulary word.
    #[schema(example = "hello")]
    pub word: String,
    /// Its translation.
    #[schema(example = "привіт")]
    pub translation: String,
    /// Optional hint text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tip: Option<String>,
}

impl From<Card> for CardDto {
    fn from(card: Card) -> Self {
        Self {
            id: card.id().as_i32(),
            word: card.word().to_owned(),
            translation: card.translation().to_owned(),
            tip: card.tip().map(ToOwned::to_owned),
        }
    }
}

/// View-model for the card edit page.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CardView {
    /// The card under edit.
    pub card: CardDto,
    /// Pending status message, if a redirect left one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flash: Option<Flash>,
}

/// Form body shared by card creation and update.
///
/// On update, blank fields count as omitted and leave stored values alone.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CardForm {
    /// The vocabulary word; required on creation.
    pub word: Option<String>,
    /// Its translation; required on creation.
    pub translation: Option<String>,
    /// Optional hint text.
    pub tip: Option<String>,
}

/// Query string for `GET /search`.
#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchQuery {
    /// Substring to match against word, translation, or tip.
    pub q: String,
}

fn deck_location(deck: Option<DeckId>) -> String {
    deck.map_or_else(|| "/".to_owned(), |deck| format!("/deck/{deck}"))
}

/// Add a card to a deck.
#[utoipa::path(
    post,
    path = "/add_card/{deck_id}",
    params(("deck_id" = i32, Path, description = "Deck identifier")),
    request_body(content = CardForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Redirect to the deck view; failures carry a danger flash"),
        (status = 401, description = "Not signed in", body = crate::domain::Error)
    ),
    tags = ["cards"],
    operation_id = "addCard"
)]
#[post("/add_card/{deck_id}")]
pub async fn add_card(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i32>,
    form: web::Form<CardForm>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let deck_id = DeckId::new(path.into_inner());
    let form = form.into_inner();

    let draft = match CardDraft::new(
        form.word.as_deref().unwrap_or_default(),
        form.translation.as_deref().unwrap_or_default(),
        form.tip.as_deref(),
        Some(deck_id),
    ) {
        Ok(draft) => draft,
        Err(error) => {
            return flash_and_redirect(
                &session,
                Flash::danger(error.to_string()),
                &deck_location(Some(deck_id)),
            );
        }
    };

    match state.card_command.add_card(owner, draft).await {
        Ok(card) => {
            info!(card_id = %card.id(), deck_id = %deck_id, "card added");
            flash_and_redirect(
                &session,
                Flash::success("card added"),
                &deck_location(Some(deck_id)),
            )
        }
        Err(error) => not_found_to_home(&session, error),
    }
}

/// Fetch a card for editing.
#[utoipa::path(
    get,
    path = "/edit_card/{card_id}",
    params(("card_id" = i32, Path, description = "Card identifier")),
    responses(
        (status = 200, description = "Card edit view", body = CardView),
        (status = 303, description = "Unknown or foreign card; redirect to `/`"),
        (status = 401, description = "Not signed in", body = crate::domain::Error)
    ),
    tags = ["cards"],
    operation_id = "editCard"
)]
#[get("/edit_card/{card_id}")]
pub async fn edit_card(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let card_id = CardId::new(path.into_inner());

    match state.card_query.card_for_edit(owner, card_id).await {
        Ok(card) => {
            let flash = session.take_flash()?;
            Ok(HttpResponse::Ok().json(CardView {
                card: CardDto::from(card),
                flash,
            }))
        }
        Err(error) => not_found_to_home(&session, error),
    }
}

/// Partially update a card; omitted fields keep their stored values.
#[utoipa::path(
    post,
    path = "/update_card/{card_id}",
    params(("card_id" = i32, Path, description = "Card identifier")),
    request_body(content = CardForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Redirect to the card's deck view"),
        (status = 401, description = "Not signed in", body = crate::domain::Error)
    ),
    tags = ["cards"],
    operation_id = "updateCard"
)]
#[post("/update_card/{card_id}")]
pub async fn update_card(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i32>,
    form: web::Form<CardForm>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let card_id = CardId::new(path.into_inner());
    let form = form.into_inner();
    let patch = CardPatch::from_fields(
        form.word.as_deref(),
        form.translation.as_deref(),
        form.tip.as_deref(),
    );

    match state.card_command.update_card(owner, card_id, patch).await {
        Ok(card) => {
            info!(card_id = %card.id(), "card updated");
            flash_and_redirect(
                &session,
                Flash::success("card updated"),
                &deck_location(card.deck()),
            )
        }
        Err(error) => not_found_to_home(&session, error),
    }
}

/// Delete a card and return to its deck's listing.
#[utoipa::path(
    post,
    path = "/delete_card/{card_id}",
    params(("card_id" = i32, Path, description = "Card identifier")),
    responses(
        (status = 303, description = "Redirect to the card's former deck view"),
        (status = 401, description = "Not signed in", body = crate::domain::Error)
    ),
    tags = ["cards"],
    operation_id = "deleteCard"
)]
#[post("/delete_card/{card_id}")]
pub async fn delete_card(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let card_id = CardId::new(path.into_inner());

    match state.card_command.delete_card(owner, card_id).await {
        Ok(former_deck) => {
            info!(card_id = %card_id, "card deleted");
            flash_and_redirect(
                &session,
                Flash::success("card deleted"),
                &deck_location(former_deck),
            )
        }
        Err(error) => not_found_to_home(&session, error),
    }
}

/// Search the signed-in user's cards.
#[utoipa::path(
    get,
    path = "/search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching cards", body = [CardDto]),
        (status = 401, description = "Not signed in", body = crate::domain::Error)
    ),
    tags = ["cards"],
    operation_id = "searchCards"
)]
#[get("/search")]
pub async fn search_cards(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<SearchQuery>,
) -> ApiResult<web::Json<Vec<CardDto>>> {
    let owner = session.require_user_id()?;
    let cards = state.card_query.search_cards(owner, &query.q).await?;
    Ok(web::Json(cards.into_iter().map(CardDto::from).collect()))
}
