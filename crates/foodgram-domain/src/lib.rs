//! Domain types shared across Foodgram services.
//!
//! Pure types with no framework dependencies.

pub mod pagination;
pub mod user;
