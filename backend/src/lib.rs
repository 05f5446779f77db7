//! Backend library for the Linguist vocabulary service.
//!
//! Users register, organise vocabulary cards into decks, and review them in
//! shuffled sessions. The crate is split along hexagonal lines: `domain`
//! holds entities, services, and ports; `inbound` adapts HTTP; `outbound`
//! adapts PostgreSQL persistence.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
/// Request-tracing middleware attaching per-request identifiers.
pub use middleware::Trace;
