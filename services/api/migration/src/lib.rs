pub use sea_orm_migration::prelude::*;

mod m20260301_000001_create_users;
mod m20260301_000002_create_tags;
mod m20260301_000003_create_ingredients;
mod m20260301_000004_create_recipes;
mod m20260301_000005_create_recipe_links;
mod m20260301_000006_create_recipe_marks;
mod m20260301_000007_create_follows;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_users::Migration),
            Box::new(m20260301_000002_create_tags::Migration),
            Box::new(m20260301_000003_create_ingredients::Migration),
            Box::new(m20260301_000004_create_recipes::Migration),
            Box::new(m20260301_000005_create_recipe_links::Migration),
            Box::new(m20260301_000006_create_recipe_marks::Migration),
            Box::new(m20260301_000007_create_follows::Migration),
        ]
    }
}
