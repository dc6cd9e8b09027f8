use crate::domain::repository::RecipeRepository;
use crate::domain::short_code::generate_short_code;
use crate::domain::types::{MAX_SHORT_CODE_ATTEMPTS, ShortCodeAssignment};
use crate::error::FoodgramError;

// ── GetShortLink ─────────────────────────────────────────────────────────────

/// Return the recipe's short code, assigning a fresh one on first use.
pub struct GetShortLinkUseCase<R: RecipeRepository> {
    pub recipes: R,
    pub generate: fn() -> String,
}

impl<R: RecipeRepository> GetShortLinkUseCase<R> {
    pub fn new(recipes: R) -> Self {
        Self {
            recipes,
            generate: generate_short_code,
        }
    }

    pub async fn execute(&self, recipe_id: i32) -> Result<String, FoodgramError> {
        let recipe = self
            .recipes
            .find_by_id(recipe_id)
            .await?
            .ok_or(FoodgramError::RecipeNotFound)?;
        if let Some(code) = recipe.short_code {
            return Ok(code);
        }

        for attempt in 1..=MAX_SHORT_CODE_ATTEMPTS {
            let code = (self.generate)();
            if self.recipes.short_code_exists(&code).await? {
                tracing::debug!(recipe_id, attempt, "short code taken, retrying");
                continue;
            }
            match self.recipes.assign_short_code(recipe_id, &code).await? {
                ShortCodeAssignment::Assigned => {
                    tracing::info!(recipe_id, code = %code, "assigned short code");
                    return Ok(code);
                }
                ShortCodeAssignment::AlreadyAssigned(existing) => return Ok(existing),
                ShortCodeAssignment::Collision => {
                    tracing::debug!(recipe_id, attempt, "short code collided on write, retrying");
                }
            }
        }
        Err(anyhow::anyhow!(
            "no free short code for recipe {recipe_id} after {MAX_SHORT_CODE_ATTEMPTS} attempts"
        )
        .into())
    }
}

// ── ResolveShortLink ─────────────────────────────────────────────────────────

pub struct ResolveShortLinkUseCase<R: RecipeRepository> {
    pub recipes: R,
}

impl<R: RecipeRepository> ResolveShortLinkUseCase<R> {
    /// Returns the id of the recipe owning `code`.
    pub async fn execute(&self, code: &str) -> Result<i32, FoodgramError> {
        self.recipes
            .find_by_short_code(code)
            .await?
            .map(|recipe| recipe.id)
            .ok_or(FoodgramError::ShortLinkNotFound)
    }
}
