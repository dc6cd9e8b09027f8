// ── Limits ───────────────────────────────────────────────────────────────────

pub const MIN_SHORT_CODE_LEN: usize = 3;
pub const MAX_SHORT_CODE_LEN: usize = 15;
/// Generate-and-check attempts before short-link assignment gives up.
pub const MAX_SHORT_CODE_ATTEMPTS: usize = 32;

pub const MIN_AMOUNT: i32 = 1;
pub const MAX_AMOUNT: i32 = 32_000;
pub const MIN_COOKING_TIME: i32 = 1;
pub const MAX_COOKING_TIME: i32 = 32_000;

pub const RECIPE_NAME_MAX_LEN: usize = 256;
pub const EMAIL_MAX_LEN: usize = 254;
pub const USERNAME_MAX_LEN: usize = 150;
pub const PERSON_NAME_MAX_LEN: usize = 150;
pub const RESERVED_USERNAME: &str = "me";

/// Recipes embedded per author in subscription responses when no
/// `recipes_limit` is given.
pub const DEFAULT_SUBSCRIPTION_RECIPES: u64 = 3;
/// Recipe ids are `i32`, so no author has more recipes than this.
pub const MAX_SUBSCRIPTION_RECIPES: u64 = i32::MAX as u64;

/// Embedded recipes per author for a requested `recipes_limit`.
pub fn subscription_recipes_limit(requested: Option<u64>) -> u64 {
    requested
        .unwrap_or(DEFAULT_SUBSCRIPTION_RECIPES)
        .min(MAX_SUBSCRIPTION_RECIPES)
}

// ── Users ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    /// Media-relative path.
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
}

/// A user as seen by a (possibly anonymous) viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub user: User,
    pub is_subscribed: bool,
}

/// A followed author with a preview of their recipes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    pub profile: Profile,
    pub recipes: Vec<Recipe>,
    pub recipes_count: u64,
}

/// `true` when `username` only uses letters, digits and `.@+-_`.
pub fn is_valid_username(username: &str) -> bool {
    !username.is_empty()
        && username
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '.' | '@' | '+' | '-' | '_'))
}

// ── Catalog ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: i32,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient {
    pub id: i32,
    pub name: String,
    pub measurement_unit: String,
}

// ── Recipes ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    pub id: i32,
    pub author_id: i32,
    pub name: String,
    pub text: String,
    pub cooking_time: i32,
    /// Media-relative path.
    pub image: String,
    pub short_code: Option<String>,
}

/// One `(ingredient, amount)` pair of a recipe write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngredientLine {
    pub ingredient_id: i32,
    pub amount: i32,
}

/// Ingredient line joined with its reference row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeIngredient {
    pub id: i32,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecipe {
    pub author_id: i32,
    pub name: String,
    pub text: String,
    pub cooking_time: i32,
    pub image: String,
    pub tags: Vec<i32>,
    pub ingredients: Vec<IngredientLine>,
}

/// Full-replace update. `None` scalars keep their stored value; tags and
/// ingredient lines are always replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeChanges {
    pub name: Option<String>,
    pub text: Option<String>,
    pub cooking_time: Option<i32>,
    pub image: Option<String>,
    pub tags: Vec<i32>,
    pub ingredients: Vec<IngredientLine>,
}

/// Recipe read representation for a given viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeView {
    pub recipe: Recipe,
    pub author: Profile,
    pub tags: Vec<Tag>,
    pub ingredients: Vec<RecipeIngredient>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
}

/// List filters for `GET /api/recipes/`.
///
/// `tags` match by slug with OR semantics. `favorited_by` / `in_cart_of`
/// restrict to the viewer's marks and are only set for authenticated viewers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeFilter {
    pub author: Option<i32>,
    pub tags: Vec<String>,
    pub favorited_by: Option<i32>,
    pub in_cart_of: Option<i32>,
}

/// Per-user recipe relations sharing the `(user, recipe)` shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecipeMark {
    Favorite,
    ShoppingCart,
}

/// Outcome of a conditional short-code write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShortCodeAssignment {
    Assigned,
    /// The recipe already had a code (possibly set concurrently).
    AlreadyAssigned(String),
    /// Another recipe owns the code.
    Collision,
}

/// One ingredient line of one recipe in a user's cart, before aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}
