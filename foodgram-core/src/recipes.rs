//! Recipe authoring and the viewer-relative recipe read model.

use std::collections::HashMap;
use uuid::Uuid;

use crate::error::CatalogError;
use crate::image::parse_image;
use crate::store::{CatalogStore, RecipeRelation};
use crate::types::{
    Actor, IngredientSpec, Page, Paginated, Recipe, RecipeImage, RecipeQuery, RecipeView,
    RecipeWrite,
};
use crate::users::views_for;
use crate::validate;

/// Fields of a new recipe as submitted by its author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecipe {
    pub name: String,
    pub text: String,
    pub cooking_time: i32,
    /// Data URI or an existing image reference
    pub image: Option<String>,
    pub tags: Vec<Uuid>,
    pub ingredients: Vec<IngredientSpec>,
}

/// A recipe update. Scalars left as `None` keep their stored value; `tags`
/// and `ingredients` are mandatory and replace the stored sets entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeUpdate {
    pub name: Option<String>,
    pub text: Option<String>,
    pub cooking_time: Option<i32>,
    pub image: Option<String>,
    pub tags: Option<Vec<Uuid>>,
    pub ingredients: Option<Vec<IngredientSpec>>,
}

/// Viewer-level list filter; relation flags are ignored for anonymous viewers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeFilter {
    pub author: Option<Uuid>,
    pub tags: Vec<String>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
}

impl RecipeFilter {
    fn into_query(self, viewer: Option<Uuid>) -> RecipeQuery {
        RecipeQuery {
            author: self.author,
            tag_slugs: self.tags,
            favorited_by: viewer.filter(|_| self.is_favorited),
            in_cart_of: viewer.filter(|_| self.is_in_shopping_cart),
        }
    }
}

fn validate_write(write: &RecipeWrite) -> Result<(), CatalogError> {
    validate::recipe_name(&write.name)?;
    validate::recipe_text(&write.text)?;
    validate::cooking_time(write.cooking_time)?;
    validate::tag_ids(&write.tags)?;
    validate::ingredient_specs(&write.ingredients)
}

/// Reject references to tags or ingredients that do not exist.
fn ensure_references<S: CatalogStore>(
    store: &mut S,
    write: &RecipeWrite,
) -> Result<(), CatalogError> {
    if let Some(id) = store.missing_tags(&write.tags)?.first() {
        return Err(CatalogError::validation(format!("Tag {} not found", id)));
    }

    let ingredient_ids: Vec<Uuid> = write.ingredients.iter().map(|s| s.id).collect();
    if let Some(id) = store.missing_ingredients(&ingredient_ids)?.first() {
        return Err(CatalogError::validation(format!(
            "Ingredient {} not found",
            id
        )));
    }
    Ok(())
}

fn authorize(actor: &Actor, recipe: &Recipe) -> Result<(), CatalogError> {
    if recipe.author_id != actor.id && !actor.is_admin {
        return Err(CatalogError::forbidden(
            "Only the author or an administrator can change this recipe",
        ));
    }
    Ok(())
}

pub fn create_recipe<S: CatalogStore>(
    store: &mut S,
    actor: &Actor,
    input: NewRecipe,
) -> Result<RecipeView, CatalogError> {
    let mut write = RecipeWrite {
        name: input.name.trim().to_string(),
        text: input.text,
        cooking_time: input.cooking_time,
        image: RecipeImage::Absent,
        tags: input.tags,
        ingredients: input.ingredients,
    };
    validate_write(&write)?;
    ensure_references(store, &write)?;
    write.image = parse_image(input.image.as_deref())?;

    let id = store.insert_recipe(actor.id, &write)?;
    tracing::info!(recipe_id = %id, author_id = %actor.id, "created recipe");

    get_recipe(store, Some(actor.id), id)
}

pub fn update_recipe<S: CatalogStore>(
    store: &mut S,
    actor: &Actor,
    id: Uuid,
    update: RecipeUpdate,
) -> Result<RecipeView, CatalogError> {
    let existing = store
        .recipe(id)?
        .ok_or_else(|| CatalogError::not_found("Recipe not found"))?;
    authorize(actor, &existing)?;

    let tags = update
        .tags
        .ok_or_else(|| CatalogError::validation("Tags are required to update a recipe"))?;
    let ingredients = update.ingredients.ok_or_else(|| {
        CatalogError::validation("Ingredients are required to update a recipe")
    })?;

    let mut write = RecipeWrite {
        name: update
            .name
            .map(|n| n.trim().to_string())
            .unwrap_or(existing.name),
        text: update.text.unwrap_or(existing.text),
        cooking_time: update.cooking_time.unwrap_or(existing.cooking_time),
        image: RecipeImage::stored(existing.image),
        tags,
        ingredients,
    };
    validate_write(&write)?;
    ensure_references(store, &write)?;
    if update.image.is_some() {
        write.image = parse_image(update.image.as_deref())?;
    }

    if !store.replace_recipe(id, &write)? {
        return Err(CatalogError::not_found("Recipe not found"));
    }
    tracing::info!(recipe_id = %id, actor_id = %actor.id, "updated recipe");

    get_recipe(store, Some(actor.id), id)
}

pub fn delete_recipe<S: CatalogStore>(
    store: &mut S,
    actor: &Actor,
    id: Uuid,
) -> Result<(), CatalogError> {
    let existing = store
        .recipe(id)?
        .ok_or_else(|| CatalogError::not_found("Recipe not found"))?;
    authorize(actor, &existing)?;

    if !store.delete_recipe(id)? {
        return Err(CatalogError::not_found("Recipe not found"));
    }
    tracing::info!(recipe_id = %id, actor_id = %actor.id, "deleted recipe");
    Ok(())
}

pub fn get_recipe<S: CatalogStore>(
    store: &mut S,
    viewer: Option<Uuid>,
    id: Uuid,
) -> Result<RecipeView, CatalogError> {
    let recipe = store
        .recipe(id)?
        .ok_or_else(|| CatalogError::not_found("Recipe not found"))?;
    let mut views = views_of(store, viewer, vec![recipe])?;
    views
        .pop()
        .ok_or_else(|| CatalogError::not_found("Recipe not found"))
}

pub fn list_recipes<S: CatalogStore>(
    store: &mut S,
    viewer: Option<Uuid>,
    filter: RecipeFilter,
    page: Page,
) -> Result<Paginated<RecipeView>, CatalogError> {
    let query = filter.into_query(viewer);
    let recipes = store.list_recipes(&query, page)?;
    let total = recipes.total;
    let items = views_of(store, viewer, recipes.items)?;
    Ok(Paginated { items, total })
}

/// Enrich recipes with their authors and the viewer's relation flags.
fn views_of<S: CatalogStore>(
    store: &mut S,
    viewer: Option<Uuid>,
    recipes: Vec<Recipe>,
) -> Result<Vec<RecipeView>, CatalogError> {
    if recipes.is_empty() {
        return Ok(Vec::new());
    }

    let mut author_ids: Vec<Uuid> = recipes.iter().map(|r| r.author_id).collect();
    author_ids.sort();
    author_ids.dedup();
    let accounts = store.accounts(&author_ids)?;
    let authors: HashMap<Uuid, _> = views_for(store, viewer, accounts)?
        .into_iter()
        .map(|view| (view.id, view))
        .collect();

    let recipe_ids: Vec<Uuid> = recipes.iter().map(|r| r.id).collect();
    let (favorited, in_cart) = match viewer {
        Some(viewer) => (
            store.related_recipes(RecipeRelation::Favorite, viewer, &recipe_ids)?,
            store.related_recipes(RecipeRelation::ShoppingCart, viewer, &recipe_ids)?,
        ),
        None => Default::default(),
    };

    recipes
        .into_iter()
        .map(|recipe| {
            let author = authors.get(&recipe.author_id).cloned().ok_or_else(|| {
                CatalogError::Storage(format!("Author of recipe {} is missing", recipe.id))
            })?;
            Ok(RecipeView {
                is_favorited: favorited.contains(&recipe.id),
                is_in_shopping_cart: in_cart.contains(&recipe.id),
                id: recipe.id,
                name: recipe.name,
                text: recipe.text,
                cooking_time: recipe.cooking_time,
                image: recipe.image,
                pub_date: recipe.pub_date,
                author,
                tags: recipe.tags,
                ingredients: recipe.ingredients,
            })
        })
        .collect()
}
