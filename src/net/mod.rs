//! Backend communication: path classification, the authenticated client,
//! wire types and per-resource helpers.

pub mod api;
pub mod classify;
pub mod client;
pub mod types;
