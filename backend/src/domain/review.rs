//! Review-session assembly: project a deck's cards and shuffle them.

use rand::seq::SliceRandom;
use rand::thread_rng;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::card::{Card, CardId};

/// Plain value projection of a card for a review session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewCard {
    /// Card identifier.
    #[schema(value_type = i32, example = 7)]
    pub id: CardId,
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

impl From<Card> for ReviewCard {
    fn from(card: Card) -> Self {
        Self {
            id: card.id(),
            word: card.word().to_owned(),
            translation: card.translation().to_owned(),
            tip: card.tip().map(ToOwned::to_owned),
        }
    }
}

/// Produce a uniformly shuffled review ordering of the given cards.
///
/// Presentation-order only; persisted state is untouched. Each invocation
/// reshuffles independently, so repeated sessions differ.
#[must_use]
pub fn shuffle_for_review(cards: Vec<Card>) -> Vec<ReviewCard> {
    let mut cards: Vec<ReviewCard> = cards.into_iter().map(ReviewCard::from).collect();
    cards.shuffle(&mut thread_rng());
    cards
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use std::collections::BTreeSet;

    use super::*;
    use crate::domain::user::UserId;

    fn cards(n: i32) -> Vec<Card> {
        (1..=n)
            .map(|i| {
                Card::new(
                    CardId::new(i),
                    UserId::new(1),
                    None,
                    format!("word-{i}"),
                    format!("translation-{i}"),
                    None,
                )
            })
            .collect()
    }

    #[test]
    fn shuffle_preserves_every_card_exactly_once() {
        let shuffled = shuffle_for_review(cards(10));
        let ids: BTreeSet<i32> = shuffled.iter().map(|card| card.id.as_i32()).collect();
        assert_eq!(shuffled.len(), 10);
        assert_eq!(ids, (1..=10).collect());
    }

    #[test]
    fn shuffle_is_not_deterministic_across_invocations() {
        let reference: Vec<i32> = shuffle_for_review(cards(6))
            .iter()
            .map(|card| card.id.as_i32())
            .collect();
        let any_differs = (0..20).any(|_| {
            let order: Vec<i32> = shuffle_for_review(cards(6))
                .iter()
                .map(|card| card.id.as_i32())
                .collect();
            order != reference
        });
        assert!(any_differs, "20 shuffles of 6 cards never changed order");
    }

    #[test]
    fn shuffle_of_empty_deck_is_empty() {
        assert!(shuffle_for_review(Vec::new()).is_empty());
    }

    #[test]
    fn review_card_serialises_without_null_tip() {
        let card = ReviewCard::from(Card::new(
            CardId::new(1),
            UserId::new(1),
            None,
            "hello",
            "привіт",
            None,
        ));
        let value = serde_json::to_value(&card).expect("serialisable card");
        assert!(value.get("tip").is_none());
        assert_eq!(value.get("word"), Some(&serde_json::json!("hello")));
    }
}
