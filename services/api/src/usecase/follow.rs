use foodgram_domain::pagination::{PageRequest, Paged};

use crate::domain::repository::{FollowRepository, RecipeRepository, UserRepository};
use crate::domain::types::{Profile, Subscription, User, subscription_recipes_limit};
use crate::error::FoodgramError;

async fn subscription<R: RecipeRepository>(
    recipes: &R,
    author: User,
    recipes_limit: Option<u64>,
) -> Result<Subscription, FoodgramError> {
    let limit = subscription_recipes_limit(recipes_limit);
    let Paged { items, count } = recipes.list_by_author(author.id, Some(limit)).await?;
    Ok(Subscription {
        profile: Profile {
            user: author,
            is_subscribed: true,
        },
        recipes: items,
        recipes_count: count,
    })
}

// ── Subscribe ────────────────────────────────────────────────────────────────

pub struct SubscribeUseCase<U, F, R>
where
    U: UserRepository,
    F: FollowRepository,
    R: RecipeRepository,
{
    pub users: U,
    pub follows: F,
    pub recipes: R,
}

impl<U, F, R> SubscribeUseCase<U, F, R>
where
    U: UserRepository,
    F: FollowRepository,
    R: RecipeRepository,
{
    pub async fn execute(
        &self,
        user_id: i32,
        target_id: i32,
        recipes_limit: Option<u64>,
    ) -> Result<Subscription, FoodgramError> {
        if user_id == target_id {
            return Err(FoodgramError::CannotSubscribeToSelf);
        }
        let target = self
            .users
            .find_by_id(target_id)
            .await?
            .ok_or(FoodgramError::UserNotFound)?;
        if !self.follows.add(user_id, target_id).await? {
            return Err(FoodgramError::AlreadySubscribed);
        }
        tracing::info!(user_id, target_id, "subscribed");
        subscription(&self.recipes, target, recipes_limit).await
    }
}

// ── Unsubscribe ──────────────────────────────────────────────────────────────

pub struct UnsubscribeUseCase<U: UserRepository, F: FollowRepository> {
    pub users: U,
    pub follows: F,
}

impl<U: UserRepository, F: FollowRepository> UnsubscribeUseCase<U, F> {
    pub async fn execute(&self, user_id: i32, target_id: i32) -> Result<(), FoodgramError> {
        if self.users.find_by_id(target_id).await?.is_none() {
            return Err(FoodgramError::UserNotFound);
        }
        if !self.follows.remove(user_id, target_id).await? {
            return Err(FoodgramError::NotSubscribed);
        }
        tracing::info!(user_id, target_id, "unsubscribed");
        Ok(())
    }
}

// ── ListSubscriptions ────────────────────────────────────────────────────────

pub struct ListSubscriptionsUseCase<F: FollowRepository, R: RecipeRepository> {
    pub follows: F,
    pub recipes: R,
}

impl<F: FollowRepository, R: RecipeRepository> ListSubscriptionsUseCase<F, R> {
    pub async fn execute(
        &self,
        user_id: i32,
        page: PageRequest,
        recipes_limit: Option<u64>,
    ) -> Result<Paged<Subscription>, FoodgramError> {
        let Paged { items, count } = self.follows.list_following(user_id, page).await?;
        let mut subscriptions = Vec::with_capacity(items.len());
        for author in items {
            subscriptions.push(subscription(&self.recipes, author, recipes_limit).await?);
        }
        Ok(Paged::new(subscriptions, count))
    }
}
