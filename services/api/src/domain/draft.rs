//! Structural validation of recipe writes.
//!
//! Checks run in a fixed order and the first failing stage wins, so clients
//! always see the same error for the same payload:
//!
//! 1. `ingredients` / `tags` missing or empty
//! 2. duplicate ingredient ids
//! 3. duplicate tag ids
//! 4. ingredient amount out of range (reported under `amount`)
//! 5. image missing on create
//! 6. scalar fields (`name`, `text`, `cooking_time`)
//!
//! Existence of referenced rows and image decoding are checked later by the
//! use case, against storage.

use std::collections::HashSet;

use crate::domain::types::{
    IngredientLine, MAX_AMOUNT, MAX_COOKING_TIME, MIN_AMOUNT, MIN_COOKING_TIME,
    RECIPE_NAME_MAX_LEN,
};
use crate::error::FieldErrors;

pub const REQUIRED: &str = "this field is required";

/// Raw recipe write as received from the client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeDraft {
    pub name: Option<String>,
    pub text: Option<String>,
    pub cooking_time: Option<i64>,
    /// Base64 data URL.
    pub image: Option<String>,
    pub ingredients: Option<Vec<DraftIngredient>>,
    pub tags: Option<Vec<i32>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DraftIngredient {
    pub id: i32,
    pub amount: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftMode {
    Create,
    Update,
}

/// Draft that passed structural validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidDraft {
    pub name: Option<String>,
    pub text: Option<String>,
    pub cooking_time: Option<i32>,
    pub image: Option<String>,
    pub tags: Vec<i32>,
    pub ingredients: Vec<IngredientLine>,
}

fn has_duplicates<T: Eq + std::hash::Hash>(items: impl IntoIterator<Item = T>) -> bool {
    let mut seen = HashSet::new();
    items.into_iter().any(|item| !seen.insert(item))
}

fn non_blank(value: Option<&String>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

impl RecipeDraft {
    pub fn validate(self, mode: DraftMode) -> Result<ValidDraft, FieldErrors> {
        let ingredients = self.ingredients.unwrap_or_default();
        let tags = self.tags.unwrap_or_default();

        let mut errors = FieldErrors::new();
        if ingredients.is_empty() {
            errors.add("ingredients", REQUIRED);
        }
        if tags.is_empty() {
            errors.add("tags", REQUIRED);
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        if has_duplicates(ingredients.iter().map(|i| i.id)) {
            return Err(FieldErrors::single(
                "ingredients",
                "ingredients must not repeat",
            ));
        }
        if has_duplicates(tags.iter().copied()) {
            return Err(FieldErrors::single("tags", "tags must not repeat"));
        }
        let amount_range = i64::from(MIN_AMOUNT)..=i64::from(MAX_AMOUNT);
        if ingredients
            .iter()
            .any(|i| !amount_range.contains(&i.amount))
        {
            return Err(FieldErrors::single(
                "amount",
                format!("amount must be between {MIN_AMOUNT} and {MAX_AMOUNT}"),
            ));
        }
        if mode == DraftMode::Create && !non_blank(self.image.as_ref()) {
            return Err(FieldErrors::single("image", REQUIRED));
        }

        let mut errors = FieldErrors::new();
        let required = mode == DraftMode::Create;
        check_text(&mut errors, "name", self.name.as_ref(), required);
        if let Some(name) = &self.name {
            if name.chars().count() > RECIPE_NAME_MAX_LEN {
                errors.add(
                    "name",
                    format!("ensure this field has no more than {RECIPE_NAME_MAX_LEN} characters"),
                );
            }
        }
        check_text(&mut errors, "text", self.text.as_ref(), required);
        let cooking_time = match self.cooking_time {
            None if required => {
                errors.add("cooking_time", REQUIRED);
                None
            }
            None => None,
            Some(minutes) => match i32::try_from(minutes) {
                Ok(m) if (MIN_COOKING_TIME..=MAX_COOKING_TIME).contains(&m) => Some(m),
                _ => {
                    errors.add(
                        "cooking_time",
                        format!(
                            "cooking time must be between {MIN_COOKING_TIME} and {MAX_COOKING_TIME}"
                        ),
                    );
                    None
                }
            },
        };
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ValidDraft {
            name: self.name,
            text: self.text,
            cooking_time,
            image: self.image.filter(|i| !i.trim().is_empty()),
            tags,
            ingredients: ingredients
                .into_iter()
                .map(|i| IngredientLine {
                    ingredient_id: i.id,
                    // range-checked above
                    amount: i.amount as i32,
                })
                .collect(),
        })
    }
}

fn check_text(errors: &mut FieldErrors, field: &str, value: Option<&String>, required: bool) {
    match value {
        None if required => errors.add(field, REQUIRED),
        Some(_) if !non_blank(value) => errors.add(field, "this field may not be blank"),
        _ => {}
    }
}
