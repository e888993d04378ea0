//! Tags and ingredients: public reads, administrator writes.

use uuid::Uuid;

use crate::color::canonical_color;
use crate::error::CatalogError;
use crate::store::CatalogStore;
use crate::types::{Actor, Ingredient, NewTag, Tag};
use crate::validate;

fn require_admin(actor: &Actor) -> Result<(), CatalogError> {
    if !actor.is_admin {
        return Err(CatalogError::forbidden(
            "Only administrators can manage tags and ingredients",
        ));
    }
    Ok(())
}

pub fn list_tags<S: CatalogStore>(store: &mut S) -> Result<Vec<Tag>, CatalogError> {
    store.list_tags()
}

pub fn get_tag<S: CatalogStore>(store: &mut S, id: Uuid) -> Result<Tag, CatalogError> {
    store
        .tag(id)?
        .ok_or_else(|| CatalogError::not_found("Tag not found"))
}

/// Create a tag. `color` may be a hex triplet or a CSS3 colour name.
pub fn create_tag<S: CatalogStore>(
    store: &mut S,
    actor: &Actor,
    name: &str,
    color: &str,
    slug: &str,
) -> Result<Tag, CatalogError> {
    require_admin(actor)?;

    let name = name.trim();
    let slug = slug.trim();
    validate::tag_name(name)?;
    validate::slug(slug)?;
    let color = canonical_color(color)?;

    let tag = store.insert_tag(&NewTag {
        name: name.to_string(),
        color,
        slug: slug.to_string(),
    })?;
    tracing::info!(tag_id = %tag.id, slug = %tag.slug, "created tag");
    Ok(tag)
}

pub fn list_ingredients<S: CatalogStore>(
    store: &mut S,
    name_prefix: Option<&str>,
) -> Result<Vec<Ingredient>, CatalogError> {
    let prefix = name_prefix.map(str::trim).filter(|p| !p.is_empty());
    store.list_ingredients(prefix)
}

pub fn get_ingredient<S: CatalogStore>(
    store: &mut S,
    id: Uuid,
) -> Result<Ingredient, CatalogError> {
    store
        .ingredient(id)?
        .ok_or_else(|| CatalogError::not_found("Ingredient not found"))
}

pub fn create_ingredient<S: CatalogStore>(
    store: &mut S,
    actor: &Actor,
    name: &str,
    measurement_unit: &str,
) -> Result<Ingredient, CatalogError> {
    require_admin(actor)?;

    let name = name.trim();
    let measurement_unit = measurement_unit.trim();
    validate::ingredient_fields(name, measurement_unit)?;

    let ingredient = store.insert_ingredient(name, measurement_unit)?;
    tracing::info!(ingredient_id = %ingredient.id, name = %ingredient.name, "created ingredient");
    Ok(ingredient)
}

/// Delete an unused ingredient. Conflict while any recipe references it.
pub fn delete_ingredient<S: CatalogStore>(
    store: &mut S,
    actor: &Actor,
    id: Uuid,
) -> Result<(), CatalogError> {
    require_admin(actor)?;

    if !store.delete_ingredient(id)? {
        return Err(CatalogError::not_found("Ingredient not found"));
    }
    tracing::info!(ingredient_id = %id, "deleted ingredient");
    Ok(())
}
