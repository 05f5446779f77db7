//! Inbound adapters: translate transport requests into domain calls.

pub mod http;
