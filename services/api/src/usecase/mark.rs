//! Favorite and shopping-cart toggles.

use crate::domain::repository::{RecipeMarkRepository, RecipeRepository};
use crate::domain::types::{Recipe, RecipeMark};
use crate::error::FoodgramError;

fn already_marked(mark: RecipeMark) -> FoodgramError {
    match mark {
        RecipeMark::Favorite => FoodgramError::AlreadyInFavorites,
        RecipeMark::ShoppingCart => FoodgramError::AlreadyInShoppingCart,
    }
}

fn not_marked(mark: RecipeMark) -> FoodgramError {
    match mark {
        RecipeMark::Favorite => FoodgramError::NotInFavorites,
        RecipeMark::ShoppingCart => FoodgramError::NotInShoppingCart,
    }
}

// ── AddRecipeMark ────────────────────────────────────────────────────────────

pub struct AddRecipeMarkUseCase<R: RecipeRepository, M: RecipeMarkRepository> {
    pub recipes: R,
    pub marks: M,
}

impl<R: RecipeRepository, M: RecipeMarkRepository> AddRecipeMarkUseCase<R, M> {
    /// Returns the marked recipe for its short representation.
    pub async fn execute(
        &self,
        mark: RecipeMark,
        user_id: i32,
        recipe_id: i32,
    ) -> Result<Recipe, FoodgramError> {
        let recipe = self
            .recipes
            .find_by_id(recipe_id)
            .await?
            .ok_or(FoodgramError::RecipeNotFound)?;
        if !self.marks.add(mark, user_id, recipe_id).await? {
            return Err(already_marked(mark));
        }
        tracing::info!(user_id, recipe_id, ?mark, "marked recipe");
        Ok(recipe)
    }
}

// ── RemoveRecipeMark ─────────────────────────────────────────────────────────

pub struct RemoveRecipeMarkUseCase<R: RecipeRepository, M: RecipeMarkRepository> {
    pub recipes: R,
    pub marks: M,
}

impl<R: RecipeRepository, M: RecipeMarkRepository> RemoveRecipeMarkUseCase<R, M> {
    pub async fn execute(
        &self,
        mark: RecipeMark,
        user_id: i32,
        recipe_id: i32,
    ) -> Result<(), FoodgramError> {
        if self.recipes.find_by_id(recipe_id).await?.is_none() {
            return Err(FoodgramError::RecipeNotFound);
        }
        if !self.marks.remove(mark, user_id, recipe_id).await? {
            return Err(not_marked(mark));
        }
        tracing::info!(user_id, recipe_id, ?mark, "unmarked recipe");
        Ok(())
    }
}
