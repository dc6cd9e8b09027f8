use foodgram_api::error::FoodgramError;
use foodgram_api::usecase::auth::{LoginInput, LoginUseCase};
use foodgram_api::usecase::catalog::{GetTagUseCase, SearchIngredientsUseCase};
use foodgram_api::usecase::follow::SubscribeUseCase;
use foodgram_api::usecase::user::{
    DeleteAvatarUseCase, ListUsersUseCase, RegisterUserInput, RegisterUserUseCase,
    SetAvatarUseCase,
};
use foodgram_auth_types::token::validate_token;
use foodgram_domain::pagination::PageRequest;

use crate::helpers::{MemoryStore, PNG_DATA_URL, TEST_JWT_SECRET, TEST_PASSWORD};

fn login_uc(store: &MemoryStore) -> LoginUseCase<MemoryStore> {
    LoginUseCase {
        users: store.clone(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
        token_ttl_secs: 3600,
    }
}

// ── Login ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_issue_token_for_registered_user() {
    let store = MemoryStore::new();
    let user = RegisterUserUseCase {
        users: store.clone(),
    }
    .execute(RegisterUserInput {
        email: "cook@example.com".into(),
        username: "cook".into(),
        first_name: "Ann".into(),
        last_name: "Cook".into(),
        password: "s3cret-pass".into(),
    })
    .await
    .unwrap();

    let token = login_uc(&store)
        .execute(LoginInput {
            email: "cook@example.com".into(),
            password: "s3cret-pass".into(),
        })
        .await
        .unwrap();

    let info = validate_token(&token, TEST_JWT_SECRET).unwrap();
    assert_eq!(info.user_id, user.id);
}

#[tokio::test]
async fn should_not_distinguish_unknown_email_from_wrong_password() {
    let store = MemoryStore::new();
    let user = store.add_user("cook");

    let wrong_password = login_uc(&store)
        .execute(LoginInput {
            email: user.email.clone(),
            password: "nope".into(),
        })
        .await;
    assert!(matches!(wrong_password, Err(FoodgramError::InvalidCredentials)));

    let unknown = login_uc(&store)
        .execute(LoginInput {
            email: "ghost@example.com".into(),
            password: TEST_PASSWORD.into(),
        })
        .await;
    assert!(matches!(unknown, Err(FoodgramError::InvalidCredentials)));
}

// ── Users ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_list_users_with_subscription_flags() {
    let store = MemoryStore::new();
    let viewer = store.add_user("viewer");
    let followed = store.add_user("followed");
    store.add_user("stranger");
    SubscribeUseCase {
        users: store.clone(),
        follows: store.clone(),
        recipes: store.clone(),
    }
    .execute(viewer.id, followed.id, None)
    .await
    .unwrap();

    let page = ListUsersUseCase {
        users: store.clone(),
        follows: store.clone(),
    }
    .execute(Some(viewer.id), PageRequest::new(Some(1), Some(2)))
    .await
    .unwrap();

    assert_eq!(page.count, 3);
    let flags: Vec<(i32, bool)> = page
        .items
        .iter()
        .map(|p| (p.user.id, p.is_subscribed))
        .collect();
    assert_eq!(flags, vec![(viewer.id, false), (followed.id, true)]);
}

#[tokio::test]
async fn should_replace_and_remove_avatar() {
    let store = MemoryStore::new();
    let user = store.add_user("cook");
    let set = SetAvatarUseCase {
        users: store.clone(),
        media: store.clone(),
    };

    let first = set.execute(user.id, Some(PNG_DATA_URL)).await.unwrap();
    let second = set.execute(user.id, Some(PNG_DATA_URL)).await.unwrap();
    assert!(second.starts_with("users/"));
    {
        let data = store.data();
        assert!(!data.media.contains_key(&first));
        assert_eq!(data.users[&user.id].avatar.as_deref(), Some(second.as_str()));
    }

    DeleteAvatarUseCase {
        users: store.clone(),
        media: store.clone(),
    }
    .execute(user.id)
    .await
    .unwrap();
    let data = store.data();
    assert!(data.media.is_empty());
    assert_eq!(data.users[&user.id].avatar, None);
}

#[tokio::test]
async fn should_require_avatar_payload() {
    let store = MemoryStore::new();
    let user = store.add_user("cook");
    let result = SetAvatarUseCase {
        users: store.clone(),
        media: store.clone(),
    }
    .execute(user.id, None)
    .await;
    match result {
        Err(FoodgramError::Validation(errors)) => assert!(errors.contains("avatar")),
        other => panic!("expected validation error, got {other:?}"),
    }
}

// ── Reference data ───────────────────────────────────────────────────────────

#[tokio::test]
async fn should_search_ingredients_by_case_insensitive_prefix() {
    let store = MemoryStore::new();
    store.add_ingredient("Sugar", "g");
    store.add_ingredient("salt", "g");
    store.add_ingredient("Pepper", "g");
    store.add_ingredient("Basil salt", "g");

    let found = SearchIngredientsUseCase {
        ingredients: store.clone(),
    }
    .execute(Some("S"))
    .await
    .unwrap();

    let names: Vec<&str> = found.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["Sugar", "salt"]);
}

#[tokio::test]
async fn should_report_missing_tag() {
    let store = MemoryStore::new();
    let result = GetTagUseCase {
        tags: store.clone(),
    }
    .execute(1)
    .await;
    assert!(matches!(result, Err(FoodgramError::TagNotFound)));
}
