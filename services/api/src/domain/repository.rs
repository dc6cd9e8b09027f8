#![allow(async_fn_in_trait)]

use foodgram_domain::pagination::{PageRequest, Paged};

use crate::domain::image::ImageUpload;
use crate::domain::types::{
    CartLine, Ingredient, NewRecipe, NewUser, Recipe, RecipeChanges, RecipeFilter,
    RecipeIngredient, RecipeMark, ShortCodeAssignment, Tag, User,
};
use crate::error::FoodgramError;

/// Repository for user accounts.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, FoodgramError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, FoodgramError>;
    async fn find_many(&self, ids: &[i32]) -> Result<Vec<User>, FoodgramError>;
    async fn list(&self, page: PageRequest) -> Result<Paged<User>, FoodgramError>;

    /// Insert a user. Fails with `UserAlreadyExists` when the email or
    /// username is taken.
    async fn create(&self, user: &NewUser) -> Result<User, FoodgramError>;

    async fn update_password(&self, id: i32, password_hash: &str) -> Result<(), FoodgramError>;

    /// Replace the avatar path, returning the previous one.
    async fn set_avatar(
        &self,
        id: i32,
        avatar: Option<&str>,
    ) -> Result<Option<String>, FoodgramError>;
}

/// Repository for `follower → author` subscriptions.
pub trait FollowRepository: Send + Sync {
    /// Returns `false` if the pair already existed.
    async fn add(&self, user_id: i32, following_id: i32) -> Result<bool, FoodgramError>;
    /// Returns `false` if the pair did not exist.
    async fn remove(&self, user_id: i32, following_id: i32) -> Result<bool, FoodgramError>;
    /// Subset of `candidates` that `user_id` follows.
    async fn following_among(
        &self,
        user_id: i32,
        candidates: &[i32],
    ) -> Result<Vec<i32>, FoodgramError>;
    /// Authors followed by `user_id`, ordered by username.
    async fn list_following(
        &self,
        user_id: i32,
        page: PageRequest,
    ) -> Result<Paged<User>, FoodgramError>;
}

/// Read-only tag reference data.
pub trait TagRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Tag>, FoodgramError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Tag>, FoodgramError>;
    /// Subset of `ids` that exist.
    async fn existing_ids(&self, ids: &[i32]) -> Result<Vec<i32>, FoodgramError>;
}

/// Read-only ingredient reference data.
pub trait IngredientRepository: Send + Sync {
    /// Ingredients whose name starts with `prefix` (case-insensitive), by name.
    async fn search(&self, prefix: Option<&str>) -> Result<Vec<Ingredient>, FoodgramError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Ingredient>, FoodgramError>;
    /// Subset of `ids` that exist.
    async fn existing_ids(&self, ids: &[i32]) -> Result<Vec<i32>, FoodgramError>;
}

/// Repository for the recipe aggregate (header, tags, ingredient lines).
pub trait RecipeRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<Recipe>, FoodgramError>;
    /// Newest first.
    async fn list(
        &self,
        filter: &RecipeFilter,
        page: PageRequest,
    ) -> Result<Paged<Recipe>, FoodgramError>;
    /// Newest first, at most `limit` items; `count` is the author's total.
    async fn list_by_author(
        &self,
        author_id: i32,
        limit: Option<u64>,
    ) -> Result<Paged<Recipe>, FoodgramError>;
    async fn tags_for(&self, recipe_id: i32) -> Result<Vec<Tag>, FoodgramError>;
    async fn ingredients_for(&self, recipe_id: i32)
    -> Result<Vec<RecipeIngredient>, FoodgramError>;

    /// Insert header, tag rows and ingredient lines atomically.
    async fn create(&self, recipe: &NewRecipe) -> Result<Recipe, FoodgramError>;
    /// Update scalars and replace all tag rows and ingredient lines atomically.
    async fn update(&self, id: i32, changes: &RecipeChanges) -> Result<Recipe, FoodgramError>;
    /// Returns `false` if the recipe did not exist.
    async fn delete(&self, id: i32) -> Result<bool, FoodgramError>;

    async fn find_by_short_code(&self, code: &str) -> Result<Option<Recipe>, FoodgramError>;
    async fn short_code_exists(&self, code: &str) -> Result<bool, FoodgramError>;
    /// Set the short code only while the recipe has none.
    async fn assign_short_code(
        &self,
        id: i32,
        code: &str,
    ) -> Result<ShortCodeAssignment, FoodgramError>;

    /// Every ingredient line of every recipe in `user_id`'s shopping cart.
    async fn cart_lines(&self, user_id: i32) -> Result<Vec<CartLine>, FoodgramError>;
}

/// Favorites and shopping carts: one `(user, recipe)` relation per mark.
pub trait RecipeMarkRepository: Send + Sync {
    /// Returns `false` if the pair already existed.
    async fn add(&self, mark: RecipeMark, user_id: i32, recipe_id: i32)
    -> Result<bool, FoodgramError>;
    /// Returns `false` if the pair did not exist.
    async fn remove(
        &self,
        mark: RecipeMark,
        user_id: i32,
        recipe_id: i32,
    ) -> Result<bool, FoodgramError>;
    /// Subset of `recipe_ids` carrying `mark` for `user_id`.
    async fn marked_among(
        &self,
        mark: RecipeMark,
        user_id: i32,
        recipe_ids: &[i32],
    ) -> Result<Vec<i32>, FoodgramError>;
}

/// Storage for uploaded images. Paths are relative to the media root.
pub trait MediaStore: Send + Sync {
    async fn save(&self, folder: &str, image: &ImageUpload) -> Result<String, FoodgramError>;
    async fn remove(&self, path: &str) -> Result<(), FoodgramError>;
}
