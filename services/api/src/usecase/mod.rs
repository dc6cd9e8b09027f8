pub mod auth;
pub mod catalog;
pub mod follow;
pub mod mark;
pub mod recipe;
pub mod shopping_list;
pub mod short_link;
pub mod user;
pub mod views;
