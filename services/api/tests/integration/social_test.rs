use foodgram_api::domain::types::{RecipeFilter, RecipeMark};
use foodgram_api::error::FoodgramError;
use foodgram_api::usecase::follow::{ListSubscriptionsUseCase, SubscribeUseCase};
use foodgram_api::usecase::mark::{AddRecipeMarkUseCase, RemoveRecipeMarkUseCase};
use foodgram_api::usecase::recipe::ListRecipesUseCase;
use foodgram_api::usecase::shopping_list::DownloadShoppingListUseCase;
use foodgram_api::usecase::user::GetUserUseCase;
use foodgram_domain::pagination::PageRequest;

use crate::helpers::MemoryStore;

fn add_uc(store: &MemoryStore) -> AddRecipeMarkUseCase<MemoryStore, MemoryStore> {
    AddRecipeMarkUseCase {
        recipes: store.clone(),
        marks: store.clone(),
    }
}

fn remove_uc(store: &MemoryStore) -> RemoveRecipeMarkUseCase<MemoryStore, MemoryStore> {
    RemoveRecipeMarkUseCase {
        recipes: store.clone(),
        marks: store.clone(),
    }
}

// ── Favorites / shopping cart ────────────────────────────────────────────────

#[tokio::test]
async fn should_add_favorite_once_and_remove_once() {
    let store = MemoryStore::new();
    let author = store.add_user("chef");
    let fan = store.add_user("fan");
    let recipe = store.add_recipe(author.id, "Pie", &[], &[]);

    let marked = add_uc(&store)
        .execute(RecipeMark::Favorite, fan.id, recipe.id)
        .await
        .unwrap();
    assert_eq!(marked.id, recipe.id);

    let again = add_uc(&store)
        .execute(RecipeMark::Favorite, fan.id, recipe.id)
        .await;
    assert!(matches!(again, Err(FoodgramError::AlreadyInFavorites)));

    remove_uc(&store)
        .execute(RecipeMark::Favorite, fan.id, recipe.id)
        .await
        .unwrap();
    let gone = remove_uc(&store)
        .execute(RecipeMark::Favorite, fan.id, recipe.id)
        .await;
    assert!(matches!(gone, Err(FoodgramError::NotInFavorites)));
}

#[tokio::test]
async fn should_keep_favorites_and_cart_independent() {
    let store = MemoryStore::new();
    let author = store.add_user("chef");
    let fan = store.add_user("fan");
    let recipe = store.add_recipe(author.id, "Pie", &[], &[]);

    add_uc(&store)
        .execute(RecipeMark::ShoppingCart, fan.id, recipe.id)
        .await
        .unwrap();
    let not_favorite = remove_uc(&store)
        .execute(RecipeMark::Favorite, fan.id, recipe.id)
        .await;
    assert!(matches!(not_favorite, Err(FoodgramError::NotInFavorites)));

    let duplicate = add_uc(&store)
        .execute(RecipeMark::ShoppingCart, fan.id, recipe.id)
        .await;
    assert!(matches!(duplicate, Err(FoodgramError::AlreadyInShoppingCart)));
}

#[tokio::test]
async fn should_report_missing_recipe_when_marking() {
    let store = MemoryStore::new();
    let fan = store.add_user("fan");
    let result = add_uc(&store)
        .execute(RecipeMark::ShoppingCart, fan.id, 404)
        .await;
    assert!(matches!(result, Err(FoodgramError::RecipeNotFound)));
}

#[tokio::test]
async fn should_reject_marks_from_removed_account() {
    let store = MemoryStore::new();
    let author = store.add_user("chef");
    let recipe = store.add_recipe(author.id, "Pie", &[], &[]);
    let result = add_uc(&store)
        .execute(RecipeMark::Favorite, 9999, recipe.id)
        .await;
    let err = result.unwrap_err();
    assert!(matches!(err, FoodgramError::UnknownAccount));
    assert_eq!(err.status(), axum::http::StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_reject_subscription_from_removed_account() {
    let store = MemoryStore::new();
    let author = store.add_user("chef");
    let result = SubscribeUseCase {
        users: store.clone(),
        follows: store.clone(),
        recipes: store.clone(),
    }
    .execute(9999, author.id, None)
    .await;
    assert!(matches!(result, Err(FoodgramError::UnknownAccount)));
}

#[tokio::test]
async fn should_embed_every_recipe_for_oversized_limit() {
    let store = MemoryStore::new();
    let reader = store.add_user("reader");
    let author = store.add_user("chef");
    for name in ["Pie", "Soup", "Stew", "Cake"] {
        store.add_recipe(author.id, name, &[], &[]);
    }
    let subscription = SubscribeUseCase {
        users: store.clone(),
        follows: store.clone(),
        recipes: store.clone(),
    }
    .execute(reader.id, author.id, Some(u64::MAX))
    .await
    .unwrap();
    assert_eq!(subscription.recipes.len(), 4);
    assert_eq!(subscription.recipes_count, 4);
}

#[tokio::test]
async fn should_flag_and_filter_favorites_for_viewer() {
    let store = MemoryStore::new();
    let author = store.add_user("chef");
    let fan = store.add_user("fan");
    let liked = store.add_recipe(author.id, "Pie", &[], &[]);
    store.add_recipe(author.id, "Soup", &[], &[]);
    add_uc(&store)
        .execute(RecipeMark::Favorite, fan.id, liked.id)
        .await
        .unwrap();

    let uc = ListRecipesUseCase {
        recipes: store.clone(),
        users: store.clone(),
        follows: store.clone(),
        marks: store.clone(),
    };
    let all = uc
        .execute(Some(fan.id), RecipeFilter::default(), PageRequest::default())
        .await
        .unwrap();
    let flags: Vec<(String, bool)> = all
        .items
        .iter()
        .map(|v| (v.recipe.name.clone(), v.is_favorited))
        .collect();
    assert_eq!(flags, vec![("Soup".to_owned(), false), ("Pie".to_owned(), true)]);

    let favorites = RecipeFilter {
        favorited_by: Some(fan.id),
        ..Default::default()
    };
    let only = uc
        .execute(Some(fan.id), favorites, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(only.count, 1);
    assert_eq!(only.items[0].recipe.id, liked.id);
}

// ── Shopping list ────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_sum_same_ingredient_across_cart() {
    let store = MemoryStore::new();
    let author = store.add_user("chef");
    let buyer = store.add_user("buyer");
    let salt = store.add_ingredient("Salt", "g");
    let flour = store.add_ingredient("Flour", "g");
    let bread = store.add_recipe(author.id, "Bread", &[], &[(salt.id, 5), (flour.id, 500)]);
    let soup = store.add_recipe(author.id, "Soup", &[], &[(salt.id, 10)]);
    for recipe in [&bread, &soup] {
        add_uc(&store)
            .execute(RecipeMark::ShoppingCart, buyer.id, recipe.id)
            .await
            .unwrap();
    }

    let list = DownloadShoppingListUseCase {
        recipes: store.clone(),
    }
    .execute(buyer.id)
    .await
    .unwrap();

    assert_eq!(list, "Shopping list:\n\nFlour - 500, g\nSalt - 15, g");
}

#[tokio::test]
async fn should_render_header_only_for_empty_cart() {
    let store = MemoryStore::new();
    let buyer = store.add_user("buyer");
    let list = DownloadShoppingListUseCase {
        recipes: store.clone(),
    }
    .execute(buyer.id)
    .await
    .unwrap();
    assert_eq!(list, "Shopping list:\n");
}

// ── Subscriptions ────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_reflect_subscription_in_profile() {
    let store = MemoryStore::new();
    let reader = store.add_user("reader");
    let author = store.add_user("chef");
    for n in 0..4 {
        store.add_recipe(author.id, &format!("Dish {n}"), &[], &[]);
    }

    let sub = SubscribeUseCase {
        users: store.clone(),
        follows: store.clone(),
        recipes: store.clone(),
    }
    .execute(reader.id, author.id, None)
    .await
    .unwrap();
    assert_eq!(sub.recipes_count, 4);
    assert_eq!(sub.recipes.len(), 3);
    assert_eq!(sub.recipes[0].name, "Dish 3");

    let get = GetUserUseCase {
        users: store.clone(),
        follows: store.clone(),
    };
    assert!(get.execute(Some(reader.id), author.id).await.unwrap().is_subscribed);
    assert!(!get.execute(None, author.id).await.unwrap().is_subscribed);
    assert!(!get.execute(Some(author.id), reader.id).await.unwrap().is_subscribed);
}

#[tokio::test]
async fn should_list_subscriptions_by_username() {
    let store = MemoryStore::new();
    let reader = store.add_user("reader");
    let zed = store.add_user("zed");
    let amy = store.add_user("amy");
    let subscribe = SubscribeUseCase {
        users: store.clone(),
        follows: store.clone(),
        recipes: store.clone(),
    };
    subscribe.execute(reader.id, zed.id, None).await.unwrap();
    subscribe.execute(reader.id, amy.id, None).await.unwrap();

    let page = ListSubscriptionsUseCase {
        follows: store.clone(),
        recipes: store.clone(),
    }
    .execute(reader.id, PageRequest::default(), Some(0))
    .await
    .unwrap();

    assert_eq!(page.count, 2);
    let names: Vec<&str> = page
        .items
        .iter()
        .map(|s| s.profile.user.username.as_str())
        .collect();
    assert_eq!(names, vec!["amy", "zed"]);
    assert!(page.items.iter().all(|s| s.recipes.is_empty()));
}
