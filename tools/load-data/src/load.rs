use std::collections::HashSet;

use anyhow::{Context, Result};
use sea_orm::{
    ActiveValue::Set, DatabaseConnection, EntityTrait, QuerySelect, sea_query::OnConflict,
};
use serde::Deserialize;

use foodgram_api_schema::{ingredients, tags};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IngredientRecord {
    pub name: String,
    pub measurement_unit: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TagRecord {
    pub name: String,
    pub slug: String,
}

pub fn parse_ingredients(json: &str) -> Result<Vec<IngredientRecord>> {
    serde_json::from_str(json).context("ingredients file is not a list of {name, measurement_unit}")
}

pub fn parse_tags(json: &str) -> Result<Vec<TagRecord>> {
    serde_json::from_str(json).context("tags file is not a list of {name, slug}")
}

/// Insert ingredients, skipping `(name, unit)` pairs that already exist.
pub async fn insert_ingredients(
    db: &DatabaseConnection,
    items: Vec<IngredientRecord>,
) -> Result<u64> {
    if items.is_empty() {
        return Ok(0);
    }
    let inserted = ingredients::Entity::insert_many(items.into_iter().map(|item| {
        ingredients::ActiveModel {
            name: Set(item.name),
            measurement_unit: Set(item.measurement_unit),
            ..Default::default()
        }
    }))
    .on_conflict(
        OnConflict::columns([
            ingredients::Column::Name,
            ingredients::Column::MeasurementUnit,
        ])
        .do_nothing()
        .to_owned(),
    )
    .exec_without_returning(db)
    .await
    .context("insert ingredients")?;
    tracing::info!(inserted, "loaded ingredients");
    Ok(inserted)
}

/// Drop records whose name or slug is already taken, in the table or earlier
/// in the batch.
pub fn fresh_tags(
    items: Vec<TagRecord>,
    mut names: HashSet<String>,
    mut slugs: HashSet<String>,
) -> Vec<TagRecord> {
    items
        .into_iter()
        .filter(|tag| {
            let fresh = !names.contains(&tag.name) && !slugs.contains(&tag.slug);
            if fresh {
                names.insert(tag.name.clone());
                slugs.insert(tag.slug.clone());
            }
            fresh
        })
        .collect()
}

/// Insert tags; name and slug are each unique, so existing ones are skipped.
pub async fn insert_tags(db: &DatabaseConnection, items: Vec<TagRecord>) -> Result<u64> {
    let existing: Vec<(String, String)> = tags::Entity::find()
        .select_only()
        .column(tags::Column::Name)
        .column(tags::Column::Slug)
        .into_tuple()
        .all(db)
        .await
        .context("list existing tags")?;
    let (names, slugs) = existing.into_iter().unzip();
    let items = fresh_tags(items, names, slugs);
    if items.is_empty() {
        return Ok(0);
    }
    let inserted = tags::Entity::insert_many(items.into_iter().map(|item| tags::ActiveModel {
        name: Set(item.name),
        slug: Set(item.slug),
        ..Default::default()
    }))
    .on_conflict(
        OnConflict::column(tags::Column::Slug).do_nothing().to_owned(),
    )
    .exec_without_returning(db)
    .await
    .context("insert tags")?;
    tracing::info!(inserted, "loaded tags");
    Ok(inserted)
}
