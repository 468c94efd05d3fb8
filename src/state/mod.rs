//! Client-side session state.
//!
//! DESIGN
//! ======
//! `storage` is the persistence seam, `session` the explicitly passed
//! context over it, and `auth` the read model the UI renders from.

pub mod auth;
pub mod session;
pub mod storage;
