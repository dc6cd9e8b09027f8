use foodgram_api::domain::draft::{DraftIngredient, RecipeDraft};
use foodgram_api::domain::types::RecipeFilter;
use foodgram_api::error::FoodgramError;
use foodgram_api::usecase::recipe::{
    CreateRecipeUseCase, DeleteRecipeUseCase, GetRecipeUseCase, ListRecipesUseCase,
    UpdateRecipeUseCase,
};
use foodgram_domain::pagination::PageRequest;

use crate::helpers::{MemoryStore, PNG_DATA_URL};

fn create_uc(
    store: &MemoryStore,
) -> CreateRecipeUseCase<MemoryStore, MemoryStore, MemoryStore, MemoryStore> {
    CreateRecipeUseCase {
        recipes: store.clone(),
        tags: store.clone(),
        ingredients: store.clone(),
        media: store.clone(),
    }
}

fn update_uc(
    store: &MemoryStore,
) -> UpdateRecipeUseCase<MemoryStore, MemoryStore, MemoryStore, MemoryStore> {
    UpdateRecipeUseCase {
        recipes: store.clone(),
        tags: store.clone(),
        ingredients: store.clone(),
        media: store.clone(),
    }
}

fn get_uc(store: &MemoryStore) -> GetRecipeUseCase<MemoryStore, MemoryStore, MemoryStore, MemoryStore> {
    GetRecipeUseCase {
        recipes: store.clone(),
        users: store.clone(),
        follows: store.clone(),
        marks: store.clone(),
    }
}

fn draft(ingredients: &[(i32, i64)], tags: &[i32]) -> RecipeDraft {
    RecipeDraft {
        name: Some("Omelette".into()),
        text: Some("Beat the eggs.".into()),
        cooking_time: Some(10),
        image: Some(PNG_DATA_URL.into()),
        ingredients: Some(
            ingredients
                .iter()
                .map(|&(id, amount)| DraftIngredient { id, amount })
                .collect(),
        ),
        tags: Some(tags.to_vec()),
    }
}

fn field_errors(result: Result<impl std::fmt::Debug, FoodgramError>) -> Vec<String> {
    match result {
        Err(FoodgramError::Validation(errors)) => errors.fields().map(str::to_owned).collect(),
        other => panic!("expected validation error, got {other:?}"),
    }
}

// ── CreateRecipe ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_create_recipe_with_lines_tags_and_image() {
    let store = MemoryStore::new();
    let author = store.add_user("chef");
    let breakfast = store.add_tag("Breakfast", "breakfast");
    let eggs = store.add_ingredient("Eggs", "pcs");
    let salt = store.add_ingredient("Salt", "g");

    let recipe = create_uc(&store)
        .execute(author.id, draft(&[(eggs.id, 3), (salt.id, 2)], &[breakfast.id]))
        .await
        .unwrap();

    assert_eq!(recipe.author_id, author.id);
    assert!(recipe.image.starts_with("recipes/images/"));
    assert!(store.data().media.contains_key(&recipe.image));

    let view = get_uc(&store).execute(Some(author.id), recipe.id).await.unwrap();
    assert_eq!(view.tags, vec![breakfast]);
    let lines: Vec<(i32, i32)> = view.ingredients.iter().map(|l| (l.id, l.amount)).collect();
    assert_eq!(lines, vec![(eggs.id, 3), (salt.id, 2)]);
    assert!(!view.is_favorited);
    assert!(!view.author.is_subscribed);
}

#[tokio::test]
async fn should_require_image_on_create() {
    let store = MemoryStore::new();
    let author = store.add_user("chef");
    let t1 = store.add_tag("Breakfast", "breakfast");
    let t2 = store.add_tag("Lunch", "lunch");
    let salt = store.add_ingredient("Salt", "g");

    let mut without_image = draft(&[(salt.id, 2)], &[t1.id, t2.id]);
    without_image.image = None;
    let result = create_uc(&store).execute(author.id, without_image).await;

    assert_eq!(field_errors(result), vec!["image"]);
    assert!(store.data().recipes.is_empty());
}

#[tokio::test]
async fn should_reject_duplicate_ingredients_before_storage() {
    let store = MemoryStore::new();
    let author = store.add_user("chef");
    let tag = store.add_tag("Breakfast", "breakfast");
    let salt = store.add_ingredient("Salt", "g");

    let result = create_uc(&store)
        .execute(author.id, draft(&[(salt.id, 2), (salt.id, 5)], &[tag.id]))
        .await;

    assert_eq!(field_errors(result), vec!["ingredients"]);
    assert!(store.data().recipes.is_empty());
    assert!(store.data().media.is_empty());
}

#[tokio::test]
async fn should_reject_unknown_references() {
    let store = MemoryStore::new();
    let author = store.add_user("chef");

    let result = create_uc(&store)
        .execute(author.id, draft(&[(900, 1)], &[901]))
        .await;

    assert_eq!(field_errors(result), vec!["ingredients", "tags"]);
}

// ── UpdateRecipe ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_replace_lines_and_keep_unsupplied_scalars() {
    let store = MemoryStore::new();
    let author = store.add_user("chef");
    let tag = store.add_tag("Dinner", "dinner");
    let salt = store.add_ingredient("Salt", "g");
    let pepper = store.add_ingredient("Pepper", "g");
    let recipe = store.add_recipe(author.id, "Stew", &[tag.id], &[(salt.id, 4)]);

    let changes = RecipeDraft {
        name: Some("Spicy stew".into()),
        ingredients: Some(vec![DraftIngredient {
            id: pepper.id,
            amount: 1,
        }]),
        tags: Some(vec![tag.id]),
        ..Default::default()
    };
    let updated = update_uc(&store)
        .execute(author.id, recipe.id, changes)
        .await
        .unwrap();

    assert_eq!(updated.name, "Spicy stew");
    assert_eq!(updated.text, recipe.text);
    assert_eq!(updated.image, recipe.image);
    let view = get_uc(&store).execute(None, recipe.id).await.unwrap();
    let lines: Vec<i32> = view.ingredients.iter().map(|l| l.id).collect();
    assert_eq!(lines, vec![pepper.id]);
}

#[tokio::test]
async fn should_forbid_update_by_other_user_before_validating() {
    let store = MemoryStore::new();
    let author = store.add_user("chef");
    let other = store.add_user("guest");
    let recipe = store.add_recipe(author.id, "Stew", &[], &[]);

    let result = update_uc(&store)
        .execute(other.id, recipe.id, RecipeDraft::default())
        .await;
    assert!(matches!(result, Err(FoodgramError::Forbidden)));

    let missing = update_uc(&store)
        .execute(author.id, 9999, RecipeDraft::default())
        .await;
    assert!(matches!(missing, Err(FoodgramError::RecipeNotFound)));
}

#[tokio::test]
async fn should_discard_previous_image_when_replaced() {
    let store = MemoryStore::new();
    let author = store.add_user("chef");
    let tag = store.add_tag("Dinner", "dinner");
    let salt = store.add_ingredient("Salt", "g");
    let recipe = create_uc(&store)
        .execute(author.id, draft(&[(salt.id, 1)], &[tag.id]))
        .await
        .unwrap();

    let updated = update_uc(&store)
        .execute(author.id, recipe.id, draft(&[(salt.id, 1)], &[tag.id]))
        .await
        .unwrap();

    assert_ne!(updated.image, recipe.image);
    let data = store.data();
    assert!(!data.media.contains_key(&recipe.image));
    assert!(data.media.contains_key(&updated.image));
}

// ── DeleteRecipe ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_delete_recipe_and_its_image() {
    let store = MemoryStore::new();
    let author = store.add_user("chef");
    let other = store.add_user("guest");
    let tag = store.add_tag("Dinner", "dinner");
    let salt = store.add_ingredient("Salt", "g");
    let recipe = create_uc(&store)
        .execute(author.id, draft(&[(salt.id, 1)], &[tag.id]))
        .await
        .unwrap();
    let uc = DeleteRecipeUseCase {
        recipes: store.clone(),
        media: store.clone(),
    };

    let forbidden = uc.execute(other.id, recipe.id).await;
    assert!(matches!(forbidden, Err(FoodgramError::Forbidden)));

    uc.execute(author.id, recipe.id).await.unwrap();
    assert!(store.data().recipes.is_empty());
    assert!(store.data().media.is_empty());

    let again = uc.execute(author.id, recipe.id).await;
    assert!(matches!(again, Err(FoodgramError::RecipeNotFound)));
}

// ── ListRecipes ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_filter_by_any_of_the_given_tags_newest_first() {
    let store = MemoryStore::new();
    let author = store.add_user("chef");
    let breakfast = store.add_tag("Breakfast", "breakfast");
    let lunch = store.add_tag("Lunch", "lunch");
    let dinner = store.add_tag("Dinner", "dinner");
    let first = store.add_recipe(author.id, "Porridge", &[breakfast.id], &[]);
    let second = store.add_recipe(author.id, "Salad", &[lunch.id, breakfast.id], &[]);
    store.add_recipe(author.id, "Steak", &[dinner.id], &[]);

    let uc = ListRecipesUseCase {
        recipes: store.clone(),
        users: store.clone(),
        follows: store.clone(),
        marks: store.clone(),
    };
    let filter = RecipeFilter {
        tags: vec!["breakfast".into(), "lunch".into()],
        ..Default::default()
    };
    let page = uc.execute(None, filter, PageRequest::default()).await.unwrap();

    assert_eq!(page.count, 2);
    let ids: Vec<i32> = page.items.iter().map(|v| v.recipe.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);
}

#[tokio::test]
async fn should_paginate_recipe_list() {
    let store = MemoryStore::new();
    let author = store.add_user("chef");
    for n in 0..8 {
        store.add_recipe(author.id, &format!("Recipe {n}"), &[], &[]);
    }
    let uc = ListRecipesUseCase {
        recipes: store.clone(),
        users: store.clone(),
        follows: store.clone(),
        marks: store.clone(),
    };

    let second = uc
        .execute(None, RecipeFilter::default(), PageRequest::new(Some(2), None))
        .await
        .unwrap();

    assert_eq!(second.count, 8);
    assert_eq!(second.items.len(), 2);
    assert_eq!(second.items[1].recipe.name, "Recipe 0");
}
