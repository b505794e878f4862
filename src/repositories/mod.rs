//! Database repositories
//!
//! Provides the data access layer. Every query is parameterized; no SQL is
//! built from request input.

pub mod user;
pub mod vente;

pub use user::{UserRecord, UserRepository};
pub use vente::{VenteRecord, VenteRepository};
