//! Auth types shared across Foodgram crates.
//!
//! Provides JWT issuing/validation and the `Identity` extractors that read the
//! `Authorization: Token <jwt>` header.

pub mod identity;
pub mod token;
