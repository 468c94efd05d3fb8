//! # studio
//!
//! Client library for the dance-school backend: registration and login,
//! the class schedule and bookings, and the admin surface for classes,
//! instructors, students, payments, attendance and reports.
//!
//! Credentials live in an injected [`state::storage::Storage`] reached
//! through a [`state::session::Session`]; [`net::client::ApiClient`]
//! attaches them to requests whose path [`net::classify`] marks protected.

pub mod config;
pub mod net;
pub mod routes;
pub mod services;
pub mod state;

pub use config::ApiConfig;
pub use net::client::{ApiClient, ApiError, ApiRequest};
pub use state::auth::AuthState;
pub use state::session::Session;
