use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Favorites and shopping carts share one `(user_id, recipe_id)` shape.
fn mark_table(table: RecipeMark) -> TableCreateStatement {
    Table::create()
        .table(table)
        .if_not_exists()
        .col(ColumnDef::new(Mark::UserId).integer().not_null())
        .col(ColumnDef::new(Mark::RecipeId).integer().not_null())
        .primary_key(Index::create().col(Mark::UserId).col(Mark::RecipeId))
        .foreign_key(
            ForeignKey::create()
                .from(table, Mark::UserId)
                .to(Users::Table, Users::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .from(table, Mark::RecipeId)
                .to(Recipes::Table, Recipes::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(mark_table(RecipeMark::Favorites)).await?;
        manager
            .create_table(mark_table(RecipeMark::ShoppingCarts))
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RecipeMark::ShoppingCarts).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RecipeMark::Favorites).to_owned())
            .await
    }
}

#[derive(Iden, Clone, Copy)]
enum RecipeMark {
    Favorites,
    ShoppingCarts,
}

#[derive(Iden)]
enum Mark {
    UserId,
    RecipeId,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[derive(Iden)]
enum Recipes {
    Table,
    Id,
}
