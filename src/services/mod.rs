//! Multi-step operations built on the client and session.

pub mod auth;
