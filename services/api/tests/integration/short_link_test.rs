use std::sync::atomic::{AtomicUsize, Ordering};

use foodgram_api::error::FoodgramError;
use foodgram_api::usecase::short_link::{GetShortLinkUseCase, ResolveShortLinkUseCase};

use crate::helpers::MemoryStore;

#[tokio::test]
async fn should_assign_code_once_and_resolve_it() {
    let store = MemoryStore::new();
    let author = store.add_user("chef");
    let recipe = store.add_recipe(author.id, "Pie", &[], &[]);
    let uc = GetShortLinkUseCase::new(store.clone());

    let first = uc.execute(recipe.id).await.unwrap();
    let second = uc.execute(recipe.id).await.unwrap();
    assert_eq!(first, second);
    assert!((3..=15).contains(&first.len()));
    assert!(first.chars().all(|c| c.is_ascii_alphanumeric()));

    let resolved = ResolveShortLinkUseCase {
        recipes: store.clone(),
    }
    .execute(&first)
    .await
    .unwrap();
    assert_eq!(resolved, recipe.id);
}

static TAKEN_THEN_FREE: AtomicUsize = AtomicUsize::new(0);

fn taken_then_free() -> String {
    const CODES: [&str; 2] = ["taken", "fresh"];
    let n = TAKEN_THEN_FREE.fetch_add(1, Ordering::SeqCst);
    CODES[n.min(CODES.len() - 1)].to_owned()
}

#[tokio::test]
async fn should_retry_when_generated_code_is_taken() {
    let store = MemoryStore::new();
    let author = store.add_user("chef");
    let holder = store.add_recipe(author.id, "Pie", &[], &[]);
    let recipe = store.add_recipe(author.id, "Soup", &[], &[]);
    store
        .data()
        .recipes
        .get_mut(&holder.id)
        .unwrap()
        .short_code = Some("taken".into());

    let uc = GetShortLinkUseCase {
        recipes: store.clone(),
        generate: taken_then_free,
    };
    assert_eq!(uc.execute(recipe.id).await.unwrap(), "fresh");
    assert_eq!(
        store.data().recipes[&holder.id].short_code.as_deref(),
        Some("taken")
    );
}

fn always_taken() -> String {
    "taken".to_owned()
}

#[tokio::test]
async fn should_give_up_after_bounded_attempts() {
    let store = MemoryStore::new();
    let author = store.add_user("chef");
    let holder = store.add_recipe(author.id, "Pie", &[], &[]);
    let recipe = store.add_recipe(author.id, "Soup", &[], &[]);
    store
        .data()
        .recipes
        .get_mut(&holder.id)
        .unwrap()
        .short_code = Some("taken".into());

    let uc = GetShortLinkUseCase {
        recipes: store.clone(),
        generate: always_taken,
    };
    let result = uc.execute(recipe.id).await;
    assert!(matches!(result, Err(FoodgramError::Internal(_))));
    assert_eq!(store.data().recipes[&recipe.id].short_code, None);
}

#[tokio::test]
async fn should_report_unknown_recipe_and_code() {
    let store = MemoryStore::new();
    let missing = GetShortLinkUseCase::new(store.clone()).execute(77).await;
    assert!(matches!(missing, Err(FoodgramError::RecipeNotFound)));

    let unknown = ResolveShortLinkUseCase {
        recipes: store.clone(),
    }
    .execute("nope")
    .await;
    assert!(matches!(unknown, Err(FoodgramError::ShortLinkNotFound)));
}
