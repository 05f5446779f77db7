//! Review handler: a shuffled pass over one deck's cards.

use actix_web::{HttpResponse, get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{DeckId, ReviewCard};

use super::ApiResult;
use super::decks::DeckDto;
use super::respond::not_found_to_home;
use super::session::SessionContext;
use super::state::HttpState;

/// View-model for a review session.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewView {
    /// The deck under review.
    pub deck: DeckDto,
    /// Its cards in freshly shuffled presentation order.
    pub cards: Vec<ReviewCard>,
}

/// Start a review session over a deck.
#[utoipa::path(
    get,
    path = "/review/{deck_id}",
    params(("deck_id" = i32, Path, description = "Deck identifier")),
    responses(
        (status = 200, description = "Shuffled review session", body = ReviewView),
        (status = 303, description = "Unknown or foreign deck; redirect to `/`"),
        (status = 401, description = "Not signed in", body = crate::domain::Error)
    ),
    tags = ["review"],
    operation_id = "reviewDeck"
)]
#[get("/review/{deck_id}")]
pub async fn review_deck(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let deck_id = DeckId::new(path.into_inner());

    match state.review.review_deck(owner, deck_id).await {
        Ok(session_view) => Ok(HttpResponse::Ok().json(ReviewView {
            deck: DeckDto::from(session_view.deck),
            cards: session_view.cards,
        })),
        Err(error) => not_found_to_home(&session, error),
    }
}
