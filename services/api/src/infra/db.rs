use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, QueryTrait as _,
    TransactionError, TransactionTrait,
    sea_query::{Expr, Func, OnConflict, Query, SelectStatement},
};

use foodgram_api_schema::{
    favorites, follows, ingredients, recipe_ingredients, recipe_tags, recipes, shopping_carts,
    tags, users,
};
use foodgram_core::sea_ext::DbErrExt;
use foodgram_domain::pagination::{PageRequest, Paged};

use crate::domain::repository::{
    FollowRepository, IngredientRepository, RecipeMarkRepository, RecipeRepository,
    TagRepository, UserRepository,
};
use crate::domain::types::{
    CartLine, Ingredient, IngredientLine, NewRecipe, NewUser, Recipe, RecipeChanges,
    RecipeFilter, RecipeIngredient, RecipeMark, ShortCodeAssignment, Tag, User,
};
use crate::error::FoodgramError;

fn internal(e: DbErr, what: &'static str) -> FoodgramError {
    anyhow::Error::new(e).context(what).into()
}

/// Rows owned by the acting user reference `users`; a dangling reference
/// means the token outlived its account.
fn acting_user_write(e: DbErr, what: &'static str) -> FoodgramError {
    if e.is_foreign_key_violation() {
        FoodgramError::UnknownAccount
    } else {
        internal(e, what)
    }
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, FoodgramError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, FoodgramError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        Ok(model.map(user_from_model))
    }

    async fn find_many(&self, ids: &[i32]) -> Result<Vec<User>, FoodgramError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let models = users::Entity::find()
            .filter(users::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .context("find users by ids")?;
        Ok(models.into_iter().map(user_from_model).collect())
    }

    async fn list(&self, page: PageRequest) -> Result<Paged<User>, FoodgramError> {
        let page = page.clamped();
        let count = users::Entity::find()
            .count(&self.db)
            .await
            .context("count users")?;
        let models = users::Entity::find()
            .order_by_asc(users::Column::Id)
            .offset(page.offset())
            .limit(u64::from(page.limit))
            .all(&self.db)
            .await
            .context("list users")?;
        Ok(Paged::new(
            models.into_iter().map(user_from_model).collect(),
            count,
        ))
    }

    async fn create(&self, user: &NewUser) -> Result<User, FoodgramError> {
        let model = users::ActiveModel {
            email: Set(user.email.clone()),
            username: Set(user.username.clone()),
            first_name: Set(user.first_name.clone()),
            last_name: Set(user.last_name.clone()),
            password_hash: Set(user.password_hash.clone()),
            avatar: Set(None),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| {
            if e.is_unique_violation() {
                FoodgramError::UserAlreadyExists
            } else {
                internal(e, "create user")
            }
        })?;
        Ok(user_from_model(model))
    }

    async fn update_password(&self, id: i32, password_hash: &str) -> Result<(), FoodgramError> {
        users::ActiveModel {
            id: Set(id),
            password_hash: Set(password_hash.to_owned()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("update user password")?;
        Ok(())
    }

    async fn set_avatar(
        &self,
        id: i32,
        avatar: Option<&str>,
    ) -> Result<Option<String>, FoodgramError> {
        let avatar = avatar.map(str::to_owned);
        let previous = self
            .db
            .transaction::<_, Option<Option<String>>, DbErr>(|txn| {
                Box::pin(async move {
                    let Some(current) = users::Entity::find_by_id(id)
                        .lock_exclusive()
                        .one(txn)
                        .await?
                    else {
                        return Ok(None);
                    };
                    users::ActiveModel {
                        id: Set(id),
                        avatar: Set(avatar),
                        ..Default::default()
                    }
                    .update(txn)
                    .await?;
                    Ok(Some(current.avatar))
                })
            })
            .await
            .context("set user avatar")?;
        previous.ok_or(FoodgramError::UserNotFound)
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        email: model.email,
        username: model.username,
        first_name: model.first_name,
        last_name: model.last_name,
        password_hash: model.password_hash,
        avatar: model.avatar,
    }
}

// ── Follow repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbFollowRepository {
    pub db: DatabaseConnection,
}

impl FollowRepository for DbFollowRepository {
    async fn add(&self, user_id: i32, following_id: i32) -> Result<bool, FoodgramError> {
        let follow = follows::ActiveModel {
            user_id: Set(user_id),
            following_id: Set(following_id),
        };
        let inserted = follows::Entity::insert(follow)
            .on_conflict(
                OnConflict::columns([follows::Column::UserId, follows::Column::FollowingId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| acting_user_write(e, "insert follow"))?;
        Ok(inserted > 0)
    }

    async fn remove(&self, user_id: i32, following_id: i32) -> Result<bool, FoodgramError> {
        let result = follows::Entity::delete_many()
            .filter(follows::Column::UserId.eq(user_id))
            .filter(follows::Column::FollowingId.eq(following_id))
            .exec(&self.db)
            .await
            .context("delete follow")?;
        Ok(result.rows_affected > 0)
    }

    async fn following_among(
        &self,
        user_id: i32,
        candidates: &[i32],
    ) -> Result<Vec<i32>, FoodgramError> {
        if candidates.is_empty() {
            return Ok(vec![]);
        }
        let ids = follows::Entity::find()
            .select_only()
            .column(follows::Column::FollowingId)
            .filter(follows::Column::UserId.eq(user_id))
            .filter(follows::Column::FollowingId.is_in(candidates.iter().copied()))
            .into_tuple::<i32>()
            .all(&self.db)
            .await
            .context("find followed users")?;
        Ok(ids)
    }

    async fn list_following(
        &self,
        user_id: i32,
        page: PageRequest,
    ) -> Result<Paged<User>, FoodgramError> {
        let page = page.clamped();
        let followed = users::Entity::find().filter(
            users::Column::Id.in_subquery(
                Query::select()
                    .column(follows::Column::FollowingId)
                    .from(follows::Entity)
                    .and_where(Expr::col(follows::Column::UserId).eq(user_id))
                    .to_owned(),
            ),
        );
        let count = followed
            .clone()
            .count(&self.db)
            .await
            .context("count followed users")?;
        let models = followed
            .order_by_asc(users::Column::Username)
            .offset(page.offset())
            .limit(u64::from(page.limit))
            .all(&self.db)
            .await
            .context("list followed users")?;
        Ok(Paged::new(
            models.into_iter().map(user_from_model).collect(),
            count,
        ))
    }
}

// ── Tag repository ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbTagRepository {
    pub db: DatabaseConnection,
}

impl TagRepository for DbTagRepository {
    async fn list(&self) -> Result<Vec<Tag>, FoodgramError> {
        let models = tags::Entity::find()
            .order_by_asc(tags::Column::Id)
            .all(&self.db)
            .await
            .context("list tags")?;
        Ok(models.into_iter().map(tag_from_model).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Tag>, FoodgramError> {
        let model = tags::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find tag by id")?;
        Ok(model.map(tag_from_model))
    }

    async fn existing_ids(&self, ids: &[i32]) -> Result<Vec<i32>, FoodgramError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let found = tags::Entity::find()
            .select_only()
            .column(tags::Column::Id)
            .filter(tags::Column::Id.is_in(ids.iter().copied()))
            .into_tuple::<i32>()
            .all(&self.db)
            .await
            .context("find existing tag ids")?;
        Ok(found)
    }
}

fn tag_from_model(model: tags::Model) -> Tag {
    Tag {
        id: model.id,
        name: model.name,
        slug: model.slug,
    }
}

// ── Ingredient repository ────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbIngredientRepository {
    pub db: DatabaseConnection,
}

/// `LIKE` pattern matching names that start with `prefix`.
fn prefix_pattern(prefix: &str) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for c in prefix.to_lowercase().chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

impl IngredientRepository for DbIngredientRepository {
    async fn search(&self, prefix: Option<&str>) -> Result<Vec<Ingredient>, FoodgramError> {
        let mut query = ingredients::Entity::find();
        if let Some(prefix) = prefix {
            query = query.filter(
                Expr::expr(Func::lower(Expr::col(ingredients::Column::Name)))
                    .like(prefix_pattern(prefix)),
            );
        }
        let models = query
            .order_by_asc(ingredients::Column::Name)
            .order_by_asc(ingredients::Column::Id)
            .all(&self.db)
            .await
            .context("search ingredients")?;
        Ok(models.into_iter().map(ingredient_from_model).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Ingredient>, FoodgramError> {
        let model = ingredients::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find ingredient by id")?;
        Ok(model.map(ingredient_from_model))
    }

    async fn existing_ids(&self, ids: &[i32]) -> Result<Vec<i32>, FoodgramError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let found = ingredients::Entity::find()
            .select_only()
            .column(ingredients::Column::Id)
            .filter(ingredients::Column::Id.is_in(ids.iter().copied()))
            .into_tuple::<i32>()
            .all(&self.db)
            .await
            .context("find existing ingredient ids")?;
        Ok(found)
    }
}

fn ingredient_from_model(model: ingredients::Model) -> Ingredient {
    Ingredient {
        id: model.id,
        name: model.name,
        measurement_unit: model.measurement_unit,
    }
}

// ── Recipe repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbRecipeRepository {
    pub db: DatabaseConnection,
}

fn recipes_marked_by(mark: RecipeMark, user_id: i32) -> SelectStatement {
    match mark {
        RecipeMark::Favorite => Query::select()
            .column(favorites::Column::RecipeId)
            .from(favorites::Entity)
            .and_where(Expr::col(favorites::Column::UserId).eq(user_id))
            .to_owned(),
        RecipeMark::ShoppingCart => Query::select()
            .column(shopping_carts::Column::RecipeId)
            .from(shopping_carts::Entity)
            .and_where(Expr::col(shopping_carts::Column::UserId).eq(user_id))
            .to_owned(),
    }
}

fn recipes_tagged(slugs: &[String]) -> SelectStatement {
    Query::select()
        .column((recipe_tags::Entity, recipe_tags::Column::RecipeId))
        .from(recipe_tags::Entity)
        .inner_join(
            tags::Entity,
            Expr::col((tags::Entity, tags::Column::Id))
                .equals((recipe_tags::Entity, recipe_tags::Column::TagId)),
        )
        .and_where(Expr::col((tags::Entity, tags::Column::Slug)).is_in(slugs.iter().cloned()))
        .to_owned()
}

/// Insert tag rows and ingredient lines for `recipe_id`. Duplicate lines are
/// dropped by the primary key.
async fn insert_links<C: ConnectionTrait>(
    conn: &C,
    recipe_id: i32,
    tag_ids: &[i32],
    lines: &[IngredientLine],
) -> Result<(), DbErr> {
    if !tag_ids.is_empty() {
        recipe_tags::Entity::insert_many(tag_ids.iter().map(|&tag_id| recipe_tags::ActiveModel {
            recipe_id: Set(recipe_id),
            tag_id: Set(tag_id),
        }))
        .on_conflict(
            OnConflict::columns([recipe_tags::Column::RecipeId, recipe_tags::Column::TagId])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;
    }
    if !lines.is_empty() {
        recipe_ingredients::Entity::insert_many(lines.iter().map(|line| {
            recipe_ingredients::ActiveModel {
                recipe_id: Set(recipe_id),
                ingredient_id: Set(line.ingredient_id),
                amount: Set(line.amount),
            }
        }))
        .on_conflict(
            OnConflict::columns([
                recipe_ingredients::Column::RecipeId,
                recipe_ingredients::Column::IngredientId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;
    }
    Ok(())
}

impl RecipeRepository for DbRecipeRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Recipe>, FoodgramError> {
        let model = recipes::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find recipe by id")?;
        Ok(model.map(recipe_from_model))
    }

    async fn list(
        &self,
        filter: &RecipeFilter,
        page: PageRequest,
    ) -> Result<Paged<Recipe>, FoodgramError> {
        let page = page.clamped();
        let mut query = recipes::Entity::find();
        if let Some(author) = filter.author {
            query = query.filter(recipes::Column::AuthorId.eq(author));
        }
        if !filter.tags.is_empty() {
            query = query.filter(recipes::Column::Id.in_subquery(recipes_tagged(&filter.tags)));
        }
        if let Some(user_id) = filter.favorited_by {
            query = query.filter(
                recipes::Column::Id.in_subquery(recipes_marked_by(RecipeMark::Favorite, user_id)),
            );
        }
        if let Some(user_id) = filter.in_cart_of {
            query = query.filter(
                recipes::Column::Id
                    .in_subquery(recipes_marked_by(RecipeMark::ShoppingCart, user_id)),
            );
        }

        let count = query
            .clone()
            .count(&self.db)
            .await
            .context("count recipes")?;
        let models = query
            .order_by_desc(recipes::Column::Id)
            .offset(page.offset())
            .limit(u64::from(page.limit))
            .all(&self.db)
            .await
            .context("list recipes")?;
        Ok(Paged::new(
            models.into_iter().map(recipe_from_model).collect(),
            count,
        ))
    }

    async fn list_by_author(
        &self,
        author_id: i32,
        limit: Option<u64>,
    ) -> Result<Paged<Recipe>, FoodgramError> {
        let query = recipes::Entity::find().filter(recipes::Column::AuthorId.eq(author_id));
        let count = query
            .clone()
            .count(&self.db)
            .await
            .context("count author recipes")?;
        let models = query
            .order_by_desc(recipes::Column::Id)
            .apply_if(limit, |query, n| query.limit(n))
            .all(&self.db)
            .await
            .context("list author recipes")?;
        Ok(Paged::new(
            models.into_iter().map(recipe_from_model).collect(),
            count,
        ))
    }

    async fn tags_for(&self, recipe_id: i32) -> Result<Vec<Tag>, FoodgramError> {
        let models = tags::Entity::find()
            .inner_join(recipe_tags::Entity)
            .filter(recipe_tags::Column::RecipeId.eq(recipe_id))
            .order_by_asc(tags::Column::Id)
            .all(&self.db)
            .await
            .context("list recipe tags")?;
        Ok(models.into_iter().map(tag_from_model).collect())
    }

    async fn ingredients_for(
        &self,
        recipe_id: i32,
    ) -> Result<Vec<RecipeIngredient>, FoodgramError> {
        let rows = recipe_ingredients::Entity::find()
            .filter(recipe_ingredients::Column::RecipeId.eq(recipe_id))
            .find_also_related(ingredients::Entity)
            .order_by_asc(ingredients::Column::Name)
            .all(&self.db)
            .await
            .context("list recipe ingredients")?;
        Ok(rows
            .into_iter()
            .filter_map(|(line, ingredient)| {
                ingredient.map(|i| RecipeIngredient {
                    id: i.id,
                    name: i.name,
                    measurement_unit: i.measurement_unit,
                    amount: line.amount,
                })
            })
            .collect())
    }

    async fn create(&self, recipe: &NewRecipe) -> Result<Recipe, FoodgramError> {
        let recipe = recipe.clone();
        let model = self
            .db
            .transaction::<_, recipes::Model, DbErr>(|txn| {
                Box::pin(async move {
                    let model = recipes::ActiveModel {
                        author_id: Set(recipe.author_id),
                        name: Set(recipe.name),
                        text: Set(recipe.text),
                        cooking_time: Set(recipe.cooking_time),
                        image: Set(recipe.image),
                        short_code: Set(None),
                        created_at: Set(Utc::now()),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await?;
                    insert_links(txn, model.id, &recipe.tags, &recipe.ingredients).await?;
                    Ok(model)
                })
            })
            .await
            .map_err(|e| match e {
                TransactionError::Connection(e) | TransactionError::Transaction(e) => {
                    acting_user_write(e, "create recipe")
                }
            })?;
        Ok(recipe_from_model(model))
    }

    async fn update(&self, id: i32, changes: &RecipeChanges) -> Result<Recipe, FoodgramError> {
        let changes = changes.clone();
        let model = self
            .db
            .transaction::<_, Option<recipes::Model>, DbErr>(|txn| {
                Box::pin(async move {
                    let Some(current) = recipes::Entity::find_by_id(id)
                        .lock_exclusive()
                        .one(txn)
                        .await?
                    else {
                        return Ok(None);
                    };
                    let mut active: recipes::ActiveModel = current.clone().into();
                    if let Some(name) = changes.name {
                        active.name = Set(name);
                    }
                    if let Some(text) = changes.text {
                        active.text = Set(text);
                    }
                    if let Some(cooking_time) = changes.cooking_time {
                        active.cooking_time = Set(cooking_time);
                    }
                    if let Some(image) = changes.image {
                        active.image = Set(image);
                    }
                    let model = if active.is_changed() {
                        active.update(txn).await?
                    } else {
                        current
                    };

                    recipe_tags::Entity::delete_many()
                        .filter(recipe_tags::Column::RecipeId.eq(id))
                        .exec(txn)
                        .await?;
                    recipe_ingredients::Entity::delete_many()
                        .filter(recipe_ingredients::Column::RecipeId.eq(id))
                        .exec(txn)
                        .await?;
                    insert_links(txn, id, &changes.tags, &changes.ingredients).await?;
                    Ok(Some(model))
                })
            })
            .await
            .context("update recipe")?;
        model
            .map(recipe_from_model)
            .ok_or(FoodgramError::RecipeNotFound)
    }

    async fn delete(&self, id: i32) -> Result<bool, FoodgramError> {
        let result = recipes::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete recipe")?;
        Ok(result.rows_affected > 0)
    }

    async fn find_by_short_code(&self, code: &str) -> Result<Option<Recipe>, FoodgramError> {
        let model = recipes::Entity::find()
            .filter(recipes::Column::ShortCode.eq(code))
            .one(&self.db)
            .await
            .context("find recipe by short code")?;
        Ok(model.map(recipe_from_model))
    }

    async fn short_code_exists(&self, code: &str) -> Result<bool, FoodgramError> {
        let count = recipes::Entity::find()
            .filter(recipes::Column::ShortCode.eq(code))
            .count(&self.db)
            .await
            .context("check short code")?;
        Ok(count > 0)
    }

    async fn assign_short_code(
        &self,
        id: i32,
        code: &str,
    ) -> Result<ShortCodeAssignment, FoodgramError> {
        let result = recipes::Entity::update_many()
            .col_expr(recipes::Column::ShortCode, Expr::value(code))
            .filter(recipes::Column::Id.eq(id))
            .filter(recipes::Column::ShortCode.is_null())
            .exec(&self.db)
            .await;
        match result {
            Ok(r) if r.rows_affected > 0 => Ok(ShortCodeAssignment::Assigned),
            Ok(_) => {
                let current = self
                    .find_by_id(id)
                    .await?
                    .ok_or(FoodgramError::RecipeNotFound)?;
                let existing = current
                    .short_code
                    .ok_or_else(|| anyhow::anyhow!("short code update on recipe {id} was lost"))?;
                Ok(ShortCodeAssignment::AlreadyAssigned(existing))
            }
            Err(e) if e.is_unique_violation() => Ok(ShortCodeAssignment::Collision),
            Err(e) => Err(internal(e, "assign short code")),
        }
    }

    async fn cart_lines(&self, user_id: i32) -> Result<Vec<CartLine>, FoodgramError> {
        let rows = recipe_ingredients::Entity::find()
            .filter(
                recipe_ingredients::Column::RecipeId
                    .in_subquery(recipes_marked_by(RecipeMark::ShoppingCart, user_id)),
            )
            .find_also_related(ingredients::Entity)
            .all(&self.db)
            .await
            .context("list shopping cart lines")?;
        Ok(rows
            .into_iter()
            .filter_map(|(line, ingredient)| {
                ingredient.map(|i| CartLine {
                    name: i.name,
                    measurement_unit: i.measurement_unit,
                    amount: line.amount,
                })
            })
            .collect())
    }
}

fn recipe_from_model(model: recipes::Model) -> Recipe {
    Recipe {
        id: model.id,
        author_id: model.author_id,
        name: model.name,
        text: model.text,
        cooking_time: model.cooking_time,
        image: model.image,
        short_code: model.short_code,
    }
}

// ── Recipe mark repository ───────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbRecipeMarkRepository {
    pub db: DatabaseConnection,
}

impl RecipeMarkRepository for DbRecipeMarkRepository {
    async fn add(
        &self,
        mark: RecipeMark,
        user_id: i32,
        recipe_id: i32,
    ) -> Result<bool, FoodgramError> {
        let inserted = match mark {
            RecipeMark::Favorite => {
                favorites::Entity::insert(favorites::ActiveModel {
                    user_id: Set(user_id),
                    recipe_id: Set(recipe_id),
                })
                .on_conflict(
                    OnConflict::columns([favorites::Column::UserId, favorites::Column::RecipeId])
                        .do_nothing()
                        .to_owned(),
                )
                .exec_without_returning(&self.db)
                .await
            }
            RecipeMark::ShoppingCart => {
                shopping_carts::Entity::insert(shopping_carts::ActiveModel {
                    user_id: Set(user_id),
                    recipe_id: Set(recipe_id),
                })
                .on_conflict(
                    OnConflict::columns([
                        shopping_carts::Column::UserId,
                        shopping_carts::Column::RecipeId,
                    ])
                    .do_nothing()
                    .to_owned(),
                )
                .exec_without_returning(&self.db)
                .await
            }
        }
        .map_err(|e| acting_user_write(e, "insert recipe mark"))?;
        Ok(inserted > 0)
    }

    async fn remove(
        &self,
        mark: RecipeMark,
        user_id: i32,
        recipe_id: i32,
    ) -> Result<bool, FoodgramError> {
        let result = match mark {
            RecipeMark::Favorite => {
                favorites::Entity::delete_many()
                    .filter(favorites::Column::UserId.eq(user_id))
                    .filter(favorites::Column::RecipeId.eq(recipe_id))
                    .exec(&self.db)
                    .await
            }
            RecipeMark::ShoppingCart => {
                shopping_carts::Entity::delete_many()
                    .filter(shopping_carts::Column::UserId.eq(user_id))
                    .filter(shopping_carts::Column::RecipeId.eq(recipe_id))
                    .exec(&self.db)
                    .await
            }
        }
        .context("delete recipe mark")?;
        Ok(result.rows_affected > 0)
    }

    async fn marked_among(
        &self,
        mark: RecipeMark,
        user_id: i32,
        recipe_ids: &[i32],
    ) -> Result<Vec<i32>, FoodgramError> {
        if recipe_ids.is_empty() {
            return Ok(vec![]);
        }
        let ids = recipes::Entity::find()
            .select_only()
            .column(recipes::Column::Id)
            .filter(recipes::Column::Id.is_in(recipe_ids.iter().copied()))
            .filter(recipes::Column::Id.in_subquery(recipes_marked_by(mark, user_id)))
            .into_tuple::<i32>()
            .all(&self.db)
            .await
            .context("find marked recipes")?;
        Ok(ids)
    }
}
