//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations exactly; Diesel uses them for
//! compile-time query validation and type-safe SQL generation. Regenerate
//! with `diesel print-schema` when migrations change.

diesel::table! {
    /// Registered accounts.
    users (id) {
        /// Primary key, database-generated.
        id -> Int4,
        /// Display name, free text.
        name -> Text,
        /// Unique login key.
        email -> Text,
        /// Salted one-way credential hash (PHC string).
        password_hash -> Text,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Named card groupings, one owner each.
    decks (id) {
        /// Primary key, database-generated.
        id -> Int4,
        /// Deck name.
        name -> Text,
        /// Owning user; `ON DELETE CASCADE`.
        user_id -> Int4,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Vocabulary entries, optionally filed into a deck.
    cards (id) {
        /// Primary key, database-generated.
        id -> Int4,
        /// Owning user; `ON DELETE CASCADE`.
        user_id -> Int4,
        /// Containing deck, nullable; `ON DELETE CASCADE`.
        deck_id -> Nullable<Int4>,
        /// The vocabulary word.
        word -> Text,
        /// Its translation.
        translation -> Text,
        /// Optional hint text.
        tip -> Nullable<Text>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(decks -> users (user_id));
diesel::joinable!(cards -> decks (deck_id));

diesel::allow_tables_to_appear_in_same_query!(users, decks, cards);
