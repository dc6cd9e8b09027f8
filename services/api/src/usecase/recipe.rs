use std::collections::HashSet;

use foodgram_domain::pagination::{PageRequest, Paged};

use crate::domain::draft::{DraftMode, RecipeDraft, ValidDraft};
use crate::domain::image::ImageUpload;
use crate::domain::repository::{
    FollowRepository, IngredientRepository, MediaStore, RecipeMarkRepository, RecipeRepository,
    TagRepository, UserRepository,
};
use crate::domain::types::{NewRecipe, Recipe, RecipeChanges, RecipeFilter, RecipeView};
use crate::error::{FieldErrors, FoodgramError};
use crate::usecase::user::discard_media;
use crate::usecase::views::RecipeViews;

pub const RECIPE_IMAGE_FOLDER: &str = "recipes/images";

// ── Read side ────────────────────────────────────────────────────────────────

pub struct ListRecipesUseCase<R, U, F, M> {
    pub recipes: R,
    pub users: U,
    pub follows: F,
    pub marks: M,
}

impl<R, U, F, M> ListRecipesUseCase<R, U, F, M>
where
    R: RecipeRepository,
    U: UserRepository,
    F: FollowRepository,
    M: RecipeMarkRepository,
{
    pub async fn execute(
        &self,
        viewer: Option<i32>,
        filter: RecipeFilter,
        page: PageRequest,
    ) -> Result<Paged<RecipeView>, FoodgramError> {
        let Paged { items, count } = self.recipes.list(&filter, page).await?;
        let views = RecipeViews {
            recipes: &self.recipes,
            users: &self.users,
            follows: &self.follows,
            marks: &self.marks,
        };
        Ok(Paged::new(views.build(viewer, items).await?, count))
    }
}

/// Read representation of one recipe. Also renders the result of writes.
pub struct GetRecipeUseCase<R, U, F, M> {
    pub recipes: R,
    pub users: U,
    pub follows: F,
    pub marks: M,
}

impl<R, U, F, M> GetRecipeUseCase<R, U, F, M>
where
    R: RecipeRepository,
    U: UserRepository,
    F: FollowRepository,
    M: RecipeMarkRepository,
{
    pub async fn execute(&self, viewer: Option<i32>, id: i32) -> Result<RecipeView, FoodgramError> {
        let recipe = self
            .recipes
            .find_by_id(id)
            .await?
            .ok_or(FoodgramError::RecipeNotFound)?;
        RecipeViews {
            recipes: &self.recipes,
            users: &self.users,
            follows: &self.follows,
            marks: &self.marks,
        }
        .one(viewer, recipe)
        .await
    }
}

// ── Write side ───────────────────────────────────────────────────────────────

/// Every referenced tag and ingredient must exist.
async fn check_references<T, I>(
    tags: &T,
    ingredients: &I,
    draft: &ValidDraft,
) -> Result<(), FoodgramError>
where
    T: TagRepository,
    I: IngredientRepository,
{
    let mut errors = FieldErrors::new();

    let ingredient_ids: Vec<i32> = draft.ingredients.iter().map(|l| l.ingredient_id).collect();
    let known: HashSet<i32> = ingredients
        .existing_ids(&ingredient_ids)
        .await?
        .into_iter()
        .collect();
    for id in ingredient_ids.iter().filter(|id| !known.contains(id)) {
        errors.add("ingredients", format!("ingredient {id} does not exist"));
    }

    let known: HashSet<i32> = tags.existing_ids(&draft.tags).await?.into_iter().collect();
    for id in draft.tags.iter().filter(|id| !known.contains(id)) {
        errors.add("tags", format!("tag {id} does not exist"));
    }

    errors.into_result()
}

fn decode_image(data_url: Option<&str>) -> Result<Option<ImageUpload>, FoodgramError> {
    data_url
        .map(|url| {
            ImageUpload::from_data_url(url)
                .map_err(|e| FoodgramError::Validation(FieldErrors::single("image", e.to_string())))
        })
        .transpose()
}

// ── CreateRecipe ─────────────────────────────────────────────────────────────

pub struct CreateRecipeUseCase<R, T, I, S> {
    pub recipes: R,
    pub tags: T,
    pub ingredients: I,
    pub media: S,
}

impl<R, T, I, S> CreateRecipeUseCase<R, T, I, S>
where
    R: RecipeRepository,
    T: TagRepository,
    I: IngredientRepository,
    S: MediaStore,
{
    pub async fn execute(&self, author_id: i32, draft: RecipeDraft) -> Result<Recipe, FoodgramError> {
        let draft = draft
            .validate(DraftMode::Create)
            .map_err(FoodgramError::Validation)?;
        check_references(&self.tags, &self.ingredients, &draft).await?;
        let upload = decode_image(draft.image.as_deref())?.ok_or_else(|| {
            FoodgramError::Validation(FieldErrors::single("image", "this field is required"))
        })?;

        let (Some(name), Some(text), Some(cooking_time)) =
            (draft.name, draft.text, draft.cooking_time)
        else {
            return Err(anyhow::anyhow!("validated create draft lacks scalar fields").into());
        };

        let image = self.media.save(RECIPE_IMAGE_FOLDER, &upload).await?;
        let recipe = self
            .recipes
            .create(&NewRecipe {
                author_id,
                name,
                text,
                cooking_time,
                image: image.clone(),
                tags: draft.tags,
                ingredients: draft.ingredients,
            })
            .await;
        let recipe = match recipe {
            Ok(recipe) => recipe,
            Err(e) => {
                discard_media(&self.media, &image).await;
                return Err(e);
            }
        };
        tracing::info!(recipe_id = recipe.id, author_id, "created recipe");
        Ok(recipe)
    }
}

// ── UpdateRecipe ─────────────────────────────────────────────────────────────

pub struct UpdateRecipeUseCase<R, T, I, S> {
    pub recipes: R,
    pub tags: T,
    pub ingredients: I,
    pub media: S,
}

impl<R, T, I, S> UpdateRecipeUseCase<R, T, I, S>
where
    R: RecipeRepository,
    T: TagRepository,
    I: IngredientRepository,
    S: MediaStore,
{
    /// Full replace of tags and ingredient lines; scalars only when supplied.
    pub async fn execute(
        &self,
        actor_id: i32,
        recipe_id: i32,
        draft: RecipeDraft,
    ) -> Result<Recipe, FoodgramError> {
        let current = self
            .recipes
            .find_by_id(recipe_id)
            .await?
            .ok_or(FoodgramError::RecipeNotFound)?;
        if current.author_id != actor_id {
            return Err(FoodgramError::Forbidden);
        }

        let draft = draft
            .validate(DraftMode::Update)
            .map_err(FoodgramError::Validation)?;
        check_references(&self.tags, &self.ingredients, &draft).await?;
        let upload = decode_image(draft.image.as_deref())?;

        let image = match &upload {
            Some(upload) => Some(self.media.save(RECIPE_IMAGE_FOLDER, upload).await?),
            None => None,
        };
        let changes = RecipeChanges {
            name: draft.name,
            text: draft.text,
            cooking_time: draft.cooking_time,
            image: image.clone(),
            tags: draft.tags,
            ingredients: draft.ingredients,
        };
        let updated = match self.recipes.update(recipe_id, &changes).await {
            Ok(recipe) => recipe,
            Err(e) => {
                if let Some(new_image) = &image {
                    discard_media(&self.media, new_image).await;
                }
                return Err(e);
            }
        };
        if image.is_some() {
            discard_media(&self.media, &current.image).await;
        }
        tracing::info!(recipe_id, "updated recipe");
        Ok(updated)
    }
}

// ── DeleteRecipe ─────────────────────────────────────────────────────────────

pub struct DeleteRecipeUseCase<R: RecipeRepository, S: MediaStore> {
    pub recipes: R,
    pub media: S,
}

impl<R: RecipeRepository, S: MediaStore> DeleteRecipeUseCase<R, S> {
    pub async fn execute(&self, actor_id: i32, recipe_id: i32) -> Result<(), FoodgramError> {
        let recipe = self
            .recipes
            .find_by_id(recipe_id)
            .await?
            .ok_or(FoodgramError::RecipeNotFound)?;
        if recipe.author_id != actor_id {
            return Err(FoodgramError::Forbidden);
        }
        if !self.recipes.delete(recipe_id).await? {
            return Err(FoodgramError::RecipeNotFound);
        }
        discard_media(&self.media, &recipe.image).await;
        tracing::info!(recipe_id, "deleted recipe");
        Ok(())
    }
}
