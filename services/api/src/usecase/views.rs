//! Read-model assembly shared by several use cases.

use std::collections::{HashMap, HashSet};

use anyhow::anyhow;

use crate::domain::repository::{
    FollowRepository, RecipeMarkRepository, RecipeRepository, UserRepository,
};
use crate::domain::types::{Profile, Recipe, RecipeMark, RecipeView, User};
use crate::error::FoodgramError;

/// Attach `is_subscribed` for `viewer` to each user, keeping order.
pub async fn profiles<F: FollowRepository>(
    follows: &F,
    viewer: Option<i32>,
    users: Vec<User>,
) -> Result<Vec<Profile>, FoodgramError> {
    let followed: HashSet<i32> = match viewer {
        Some(viewer) => {
            let ids: Vec<i32> = users.iter().map(|u| u.id).collect();
            follows
                .following_among(viewer, &ids)
                .await?
                .into_iter()
                .collect()
        }
        None => HashSet::new(),
    };
    Ok(users
        .into_iter()
        .map(|user| Profile {
            is_subscribed: followed.contains(&user.id),
            user,
        })
        .collect())
}

pub async fn profile<F: FollowRepository>(
    follows: &F,
    viewer: Option<i32>,
    user: User,
) -> Result<Profile, FoodgramError> {
    let mut list = profiles(follows, viewer, vec![user]).await?;
    list.pop()
        .ok_or_else(|| anyhow!("profile lookup returned nothing").into())
}

async fn marked<M: RecipeMarkRepository>(
    marks: &M,
    mark: RecipeMark,
    viewer: Option<i32>,
    ids: &[i32],
) -> Result<HashSet<i32>, FoodgramError> {
    match viewer {
        Some(viewer) => Ok(marks
            .marked_among(mark, viewer, ids)
            .await?
            .into_iter()
            .collect()),
        None => Ok(HashSet::new()),
    }
}

/// Builds [`RecipeView`]s for a viewer.
pub struct RecipeViews<'a, R, U, F, M> {
    pub recipes: &'a R,
    pub users: &'a U,
    pub follows: &'a F,
    pub marks: &'a M,
}

impl<R, U, F, M> RecipeViews<'_, R, U, F, M>
where
    R: RecipeRepository,
    U: UserRepository,
    F: FollowRepository,
    M: RecipeMarkRepository,
{
    pub async fn build(
        &self,
        viewer: Option<i32>,
        items: Vec<Recipe>,
    ) -> Result<Vec<RecipeView>, FoodgramError> {
        let recipe_ids: Vec<i32> = items.iter().map(|r| r.id).collect();
        let mut author_ids: Vec<i32> = items.iter().map(|r| r.author_id).collect();
        author_ids.sort_unstable();
        author_ids.dedup();

        let authors = self.users.find_many(&author_ids).await?;
        let authors: HashMap<i32, Profile> = profiles(self.follows, viewer, authors)
            .await?
            .into_iter()
            .map(|p| (p.user.id, p))
            .collect();
        let favorited = marked(self.marks, RecipeMark::Favorite, viewer, &recipe_ids).await?;
        let in_cart = marked(self.marks, RecipeMark::ShoppingCart, viewer, &recipe_ids).await?;

        let mut views = Vec::with_capacity(items.len());
        for recipe in items {
            let author = authors
                .get(&recipe.author_id)
                .cloned()
                .ok_or_else(|| anyhow!("author {} of recipe {} missing", recipe.author_id, recipe.id))?;
            let tags = self.recipes.tags_for(recipe.id).await?;
            let ingredients = self.recipes.ingredients_for(recipe.id).await?;
            views.push(RecipeView {
                is_favorited: favorited.contains(&recipe.id),
                is_in_shopping_cart: in_cart.contains(&recipe.id),
                author,
                tags,
                ingredients,
                recipe,
            });
        }
        Ok(views)
    }

    pub async fn one(
        &self,
        viewer: Option<i32>,
        recipe: Recipe,
    ) -> Result<RecipeView, FoodgramError> {
        let mut views = self.build(viewer, vec![recipe]).await?;
        views
            .pop()
            .ok_or_else(|| anyhow!("recipe view assembly returned nothing").into())
    }
}
