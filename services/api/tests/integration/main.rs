
mod account_test;
mod http_test;
mod recipe_test;
mod short_link_test;
mod social_test;
