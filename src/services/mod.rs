//! Business logic services
//!
//! Services encapsulate the business rules and coordinate between
//! validation, repositories, and the auth primitives.

pub mod auth;
pub mod vente;

pub use auth::AuthService;
pub use vente::VenteService;
