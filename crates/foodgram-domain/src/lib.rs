//! Domain types shared across Foodgram crates.
//!
//! Pure types with no framework dependencies.

pub mod pagination;
