pub mod auth;
pub mod catalog;
pub mod extract;
pub mod health;
pub mod pagination;
pub mod recipe;
pub mod response;
pub mod short_link;
pub mod user;
