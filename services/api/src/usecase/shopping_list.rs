use crate::domain::repository::RecipeRepository;
use crate::domain::shopping_list::{aggregate, render};
use crate::error::FoodgramError;

pub struct DownloadShoppingListUseCase<R: RecipeRepository> {
    pub recipes: R,
}

impl<R: RecipeRepository> DownloadShoppingListUseCase<R> {
    /// Rendered plain-text list for `user_id`'s cart.
    pub async fn execute(&self, user_id: i32) -> Result<String, FoodgramError> {
        let lines = self.recipes.cart_lines(user_id).await?;
        let items = aggregate(lines);
        tracing::info!(user_id, items = items.len(), "rendered shopping list");
        Ok(render(&items))
    }
}
