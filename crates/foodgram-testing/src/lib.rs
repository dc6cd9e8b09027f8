//! Test utilities for Foodgram services.
//!
//! Import in `#[cfg(test)]` blocks and integration tests only.

pub mod auth;
