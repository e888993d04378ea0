//! Favorite and shopping-cart toggling.
//!
//! Both relations are a set of (user, recipe) pairs with the same two-state
//! lifecycle, so one routine serves both; the relation picks the storage.

use uuid::Uuid;

use crate::error::CatalogError;
use crate::store::{CatalogStore, RecipeRelation};
use crate::types::RecipeSummary;

/// Put a recipe into one of the user's relation sets.
///
/// NotFound when the recipe does not exist, Conflict when it is already there.
pub fn add<S: CatalogStore>(
    store: &mut S,
    relation: RecipeRelation,
    user: Uuid,
    recipe_id: Uuid,
) -> Result<RecipeSummary, CatalogError> {
    let recipe = store
        .recipe(recipe_id)?
        .ok_or_else(|| CatalogError::not_found(format!("Recipe {} not found", recipe_id)))?;

    if !store.insert_relation(relation, user, recipe_id)? {
        return Err(CatalogError::conflict(format!(
            "Recipe is already in your {}",
            relation.label()
        )));
    }

    tracing::info!(
        user_id = %user,
        recipe_id = %recipe_id,
        relation = relation.label(),
        "added recipe to relation"
    );
    Ok(RecipeSummary::from(&recipe))
}

/// Take a recipe out of one of the user's relation sets.
///
/// NotFound when the recipe does not exist, Conflict when it was not there.
pub fn remove<S: CatalogStore>(
    store: &mut S,
    relation: RecipeRelation,
    user: Uuid,
    recipe_id: Uuid,
) -> Result<(), CatalogError> {
    if store.recipe(recipe_id)?.is_none() {
        return Err(CatalogError::not_found(format!(
            "Recipe {} not found",
            recipe_id
        )));
    }

    if !store.delete_relation(relation, user, recipe_id)? {
        return Err(CatalogError::conflict(format!(
            "Recipe is not in your {}",
            relation.label()
        )));
    }

    tracing::info!(
        user_id = %user,
        recipe_id = %recipe_id,
        relation = relation.label(),
        "removed recipe from relation"
    );
    Ok(())
}
