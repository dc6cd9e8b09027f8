//! Shared service plumbing for Foodgram: configuration loading, health
//! endpoints, request-id middleware, tracing setup and sea-orm helpers.

pub mod config;
pub mod health;
pub mod middleware;
pub mod sea_ext;
pub mod tracing;
