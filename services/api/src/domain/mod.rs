pub mod draft;
pub mod image;
pub mod repository;
pub mod shopping_list;
pub mod short_code;
pub mod types;
