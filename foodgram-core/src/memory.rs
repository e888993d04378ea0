//! In-memory [`CatalogStore`] for tests.
//!
//! Enforces the same uniqueness, cascade and protection rules as the
//! relational schema. Every method mutates state only after all of its checks
//! have passed, so a failed write leaves nothing behind.

use chrono::{DateTime, Duration, Utc};
use std::collections::{BTreeSet, HashMap, HashSet};
use uuid::Uuid;

use crate::error::CatalogError;
use crate::image::{image_url, stored_image_id};
use crate::store::{CatalogStore, RecipeRelation};
use crate::types::{
    Account, CartLine, DecodedImage, Ingredient, IngredientSpec, NewAccount, NewTag, Page,
    Paginated, Recipe, RecipeImage, RecipeIngredient, RecipeQuery, RecipeSummary, RecipeWrite,
    Tag,
};

#[derive(Debug, Clone)]
struct RecipeRow {
    id: Uuid,
    author_id: Uuid,
    name: String,
    text: String,
    cooking_time: i32,
    image: Option<String>,
    pub_date: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    accounts: Vec<Account>,
    tags: Vec<Tag>,
    ingredients: Vec<Ingredient>,
    recipes: Vec<RecipeRow>,
    recipe_tags: BTreeSet<(Uuid, Uuid)>,
    recipe_ingredients: HashMap<(Uuid, Uuid), i32>,
    favorites: HashSet<(Uuid, Uuid)>,
    shopping_cart: HashSet<(Uuid, Uuid)>,
    subscriptions: HashSet<(Uuid, Uuid)>,
    images: HashMap<Uuid, DecodedImage>,
    clock: Option<DateTime<Utc>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored image by id.
    pub fn image(&self, id: Uuid) -> Option<&DecodedImage> {
        self.images.get(&id)
    }

    /// Number of stored images.
    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    /// Number of ingredient lines across all recipes.
    pub fn recipe_ingredient_rows(&self) -> usize {
        self.recipe_ingredients.len()
    }

    /// Number of (user, recipe) rows in a relation across all users.
    pub fn relation_rows(&self, relation: RecipeRelation) -> usize {
        match relation {
            RecipeRelation::Favorite => self.favorites.len(),
            RecipeRelation::ShoppingCart => self.shopping_cart.len(),
        }
    }

    /// Strictly increasing publication timestamps so recency order is stable.
    fn next_pub_date(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let next = match self.clock {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.clock = Some(next);
        next
    }

    fn relation_set(&mut self, relation: RecipeRelation) -> &mut HashSet<(Uuid, Uuid)> {
        match relation {
            RecipeRelation::Favorite => &mut self.favorites,
            RecipeRelation::ShoppingCart => &mut self.shopping_cart,
        }
    }

    fn check_references(&self, write: &RecipeWrite) -> Result<(), CatalogError> {
        if let Some(id) = write
            .tags
            .iter()
            .find(|id| !self.tags.iter().any(|t| t.id == **id))
        {
            return Err(CatalogError::validation(format!("Tag {} not found", id)));
        }
        if let Some(spec) = write
            .ingredients
            .iter()
            .find(|s| !self.ingredients.iter().any(|i| i.id == s.id))
        {
            return Err(CatalogError::validation(format!(
                "Ingredient {} not found",
                spec.id
            )));
        }
        let mut unique: HashSet<Uuid> = HashSet::new();
        if !write.ingredients.iter().all(|s| unique.insert(s.id)) {
            return Err(CatalogError::validation(
                "Recipe cannot reference the same ingredient twice",
            ));
        }
        Ok(())
    }

    fn store_image(&mut self, image: &RecipeImage) -> Option<String> {
        match image {
            RecipeImage::Absent => None,
            RecipeImage::Reference(reference) => Some(reference.clone()),
            RecipeImage::Upload(upload) => {
                let id = Uuid::new_v4();
                self.images.insert(id, upload.clone());
                Some(image_url(id))
            }
        }
    }

    /// Drop the stored image behind `reference` once no recipe points at it.
    fn release_image(&mut self, reference: Option<&str>) {
        let Some(reference) = reference else {
            return;
        };
        let Some(id) = stored_image_id(reference) else {
            return;
        };
        if !self
            .recipes
            .iter()
            .any(|r| r.image.as_deref() == Some(reference))
        {
            self.images.remove(&id);
        }
    }

    fn write_links(&mut self, recipe_id: Uuid, tags: &[Uuid], ingredients: &[IngredientSpec]) {
        self.recipe_tags.retain(|(r, _)| *r != recipe_id);
        self.recipe_ingredients.retain(|(r, _), _| *r != recipe_id);
        for tag in tags {
            self.recipe_tags.insert((recipe_id, *tag));
        }
        for spec in ingredients {
            self.recipe_ingredients
                .insert((recipe_id, spec.id), spec.amount);
        }
    }

    fn hydrate(&self, row: &RecipeRow) -> Recipe {
        let mut tags: Vec<Tag> = self
            .recipe_tags
            .iter()
            .filter(|(r, _)| *r == row.id)
            .filter_map(|(_, t)| self.tags.iter().find(|tag| tag.id == *t).cloned())
            .collect();
        tags.sort_by(|a, b| a.name.cmp(&b.name));

        let mut ingredients: Vec<RecipeIngredient> = self
            .recipe_ingredients
            .iter()
            .filter(|((r, _), _)| *r == row.id)
            .filter_map(|((_, i), amount)| {
                self.ingredients
                    .iter()
                    .find(|ing| ing.id == *i)
                    .map(|ing| RecipeIngredient {
                        id: ing.id,
                        name: ing.name.clone(),
                        measurement_unit: ing.measurement_unit.clone(),
                        amount: *amount,
                    })
            })
            .collect();
        ingredients.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));

        Recipe {
            id: row.id,
            author_id: row.author_id,
            name: row.name.clone(),
            text: row.text.clone(),
            cooking_time: row.cooking_time,
            image: row.image.clone(),
            pub_date: row.pub_date,
            tags,
            ingredients,
        }
    }

    fn newest_first(&self) -> Vec<&RecipeRow> {
        let mut rows: Vec<&RecipeRow> = self.recipes.iter().collect();
        rows.sort_by(|a, b| b.pub_date.cmp(&a.pub_date));
        rows
    }
}

fn paginate<T: Clone>(items: &[T], page: Page) -> Paginated<T> {
    let offset = usize::try_from(page.offset).unwrap_or(0);
    let limit = usize::try_from(page.limit).unwrap_or(0);
    Paginated {
        items: items.iter().skip(offset).take(limit).cloned().collect(),
        total: items.len() as i64,
    }
}

impl CatalogStore for MemoryStore {
    fn insert_account(&mut self, account: &NewAccount<'_>) -> Result<Account, CatalogError> {
        if self.accounts.iter().any(|a| a.email == account.email) {
            return Err(CatalogError::conflict("This email is already in use"));
        }
        if self.accounts.iter().any(|a| a.username == account.username) {
            return Err(CatalogError::conflict("This username is already taken"));
        }
        let stored = Account {
            id: Uuid::new_v4(),
            email: account.email.to_string(),
            username: account.username.to_string(),
            first_name: account.first_name.to_string(),
            last_name: account.last_name.to_string(),
            is_admin: account.is_admin,
        };
        self.accounts.push(stored.clone());
        Ok(stored)
    }

    fn account(&mut self, id: Uuid) -> Result<Option<Account>, CatalogError> {
        Ok(self.accounts.iter().find(|a| a.id == id).cloned())
    }

    fn accounts(&mut self, ids: &[Uuid]) -> Result<Vec<Account>, CatalogError> {
        Ok(self
            .accounts
            .iter()
            .filter(|a| ids.contains(&a.id))
            .cloned()
            .collect())
    }

    fn list_accounts(&mut self, page: Page) -> Result<Paginated<Account>, CatalogError> {
        let mut sorted = self.accounts.clone();
        sorted.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(paginate(&sorted, page))
    }

    fn list_tags(&mut self) -> Result<Vec<Tag>, CatalogError> {
        let mut tags = self.tags.clone();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }

    fn tag(&mut self, id: Uuid) -> Result<Option<Tag>, CatalogError> {
        Ok(self.tags.iter().find(|t| t.id == id).cloned())
    }

    fn insert_tag(&mut self, tag: &NewTag) -> Result<Tag, CatalogError> {
        if self.tags.iter().any(|t| t.name == tag.name) {
            return Err(CatalogError::conflict("A tag with this name already exists"));
        }
        if self.tags.iter().any(|t| t.color == tag.color) {
            return Err(CatalogError::conflict("A tag with this colour already exists"));
        }
        if self.tags.iter().any(|t| t.slug == tag.slug) {
            return Err(CatalogError::conflict("A tag with this slug already exists"));
        }
        let stored = Tag {
            id: Uuid::new_v4(),
            name: tag.name.clone(),
            color: tag.color.clone(),
            slug: tag.slug.clone(),
        };
        self.tags.push(stored.clone());
        Ok(stored)
    }

    fn missing_tags(&mut self, ids: &[Uuid]) -> Result<Vec<Uuid>, CatalogError> {
        Ok(ids
            .iter()
            .filter(|id| !self.tags.iter().any(|t| t.id == **id))
            .copied()
            .collect())
    }

    fn list_ingredients(
        &mut self,
        name_prefix: Option<&str>,
    ) -> Result<Vec<Ingredient>, CatalogError> {
        let prefix = name_prefix.map(str::to_lowercase);
        let mut found: Vec<Ingredient> = self
            .ingredients
            .iter()
            .filter(|i| match &prefix {
                Some(p) => i.name.to_lowercase().starts_with(p.as_str()),
                None => true,
            })
            .cloned()
            .collect();
        found.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(found)
    }

    fn ingredient(&mut self, id: Uuid) -> Result<Option<Ingredient>, CatalogError> {
        Ok(self.ingredients.iter().find(|i| i.id == id).cloned())
    }

    fn insert_ingredient(
        &mut self,
        name: &str,
        measurement_unit: &str,
    ) -> Result<Ingredient, CatalogError> {
        let stored = Ingredient {
            id: Uuid::new_v4(),
            name: name.to_string(),
            measurement_unit: measurement_unit.to_string(),
        };
        self.ingredients.push(stored.clone());
        Ok(stored)
    }

    fn delete_ingredient(&mut self, id: Uuid) -> Result<bool, CatalogError> {
        if !self.ingredients.iter().any(|i| i.id == id) {
            return Ok(false);
        }
        if self.recipe_ingredients.keys().any(|(_, i)| *i == id) {
            return Err(CatalogError::conflict(
                "Ingredient is used by at least one recipe",
            ));
        }
        self.ingredients.retain(|i| i.id != id);
        Ok(true)
    }

    fn missing_ingredients(&mut self, ids: &[Uuid]) -> Result<Vec<Uuid>, CatalogError> {
        Ok(ids
            .iter()
            .filter(|id| !self.ingredients.iter().any(|i| i.id == **id))
            .copied()
            .collect())
    }

    fn insert_recipe(&mut self, author: Uuid, recipe: &RecipeWrite) -> Result<Uuid, CatalogError> {
        if !self.accounts.iter().any(|a| a.id == author) {
            return Err(CatalogError::validation("Author does not exist"));
        }
        self.check_references(recipe)?;

        let id = Uuid::new_v4();
        let pub_date = self.next_pub_date();
        let image = self.store_image(&recipe.image);
        self.recipes.push(RecipeRow {
            id,
            author_id: author,
            name: recipe.name.clone(),
            text: recipe.text.clone(),
            cooking_time: recipe.cooking_time,
            image,
            pub_date,
        });
        self.write_links(id, &recipe.tags, &recipe.ingredients);
        Ok(id)
    }

    fn replace_recipe(&mut self, id: Uuid, recipe: &RecipeWrite) -> Result<bool, CatalogError> {
        let Some(previous) = self
            .recipes
            .iter()
            .find(|r| r.id == id)
            .map(|r| r.image.clone())
        else {
            return Ok(false);
        };
        self.check_references(recipe)?;

        let image = self.store_image(&recipe.image);
        if let Some(row) = self.recipes.iter_mut().find(|r| r.id == id) {
            row.name = recipe.name.clone();
            row.text = recipe.text.clone();
            row.cooking_time = recipe.cooking_time;
            row.image = image.clone();
        }
        self.write_links(id, &recipe.tags, &recipe.ingredients);
        if previous != image {
            self.release_image(previous.as_deref());
        }
        Ok(true)
    }

    fn delete_recipe(&mut self, id: Uuid) -> Result<bool, CatalogError> {
        let Some(position) = self.recipes.iter().position(|r| r.id == id) else {
            return Ok(false);
        };
        let removed = self.recipes.remove(position);
        self.release_image(removed.image.as_deref());
        self.recipe_tags.retain(|(r, _)| *r != id);
        self.recipe_ingredients.retain(|(r, _), _| *r != id);
        self.favorites.retain(|(_, r)| *r != id);
        self.shopping_cart.retain(|(_, r)| *r != id);
        Ok(true)
    }

    fn recipe(&mut self, id: Uuid) -> Result<Option<Recipe>, CatalogError> {
        Ok(self
            .recipes
            .iter()
            .find(|r| r.id == id)
            .map(|row| self.hydrate(row)))
    }

    fn list_recipes(
        &mut self,
        query: &RecipeQuery,
        page: Page,
    ) -> Result<Paginated<Recipe>, CatalogError> {
        let slug_tags: HashSet<Uuid> = self
            .tags
            .iter()
            .filter(|t| query.tag_slugs.contains(&t.slug))
            .map(|t| t.id)
            .collect();

        let matching: Vec<Recipe> = self
            .newest_first()
            .into_iter()
            .filter(|r| query.author.map_or(true, |a| r.author_id == a))
            .filter(|r| {
                query.tag_slugs.is_empty()
                    || self
                        .recipe_tags
                        .iter()
                        .any(|(rid, tid)| *rid == r.id && slug_tags.contains(tid))
            })
            .filter(|r| {
                query
                    .favorited_by
                    .map_or(true, |u| self.favorites.contains(&(u, r.id)))
            })
            .filter(|r| {
                query
                    .in_cart_of
                    .map_or(true, |u| self.shopping_cart.contains(&(u, r.id)))
            })
            .map(|row| self.hydrate(row))
            .collect();

        Ok(paginate(&matching, page))
    }

    fn author_recipes(
        &mut self,
        author: Uuid,
        limit: Option<usize>,
    ) -> Result<Vec<RecipeSummary>, CatalogError> {
        Ok(self
            .newest_first()
            .into_iter()
            .filter(|r| r.author_id == author)
            .take(limit.unwrap_or(usize::MAX))
            .map(|r| RecipeSummary {
                id: r.id,
                name: r.name.clone(),
                image: r.image.clone(),
                cooking_time: r.cooking_time,
            })
            .collect())
    }

    fn count_author_recipes(&mut self, author: Uuid) -> Result<i64, CatalogError> {
        Ok(self.recipes.iter().filter(|r| r.author_id == author).count() as i64)
    }

    fn insert_relation(
        &mut self,
        relation: RecipeRelation,
        user: Uuid,
        recipe: Uuid,
    ) -> Result<bool, CatalogError> {
        if !self.recipes.iter().any(|r| r.id == recipe) {
            return Err(CatalogError::not_found(format!(
                "Recipe {} not found",
                recipe
            )));
        }
        Ok(self.relation_set(relation).insert((user, recipe)))
    }

    fn delete_relation(
        &mut self,
        relation: RecipeRelation,
        user: Uuid,
        recipe: Uuid,
    ) -> Result<bool, CatalogError> {
        Ok(self.relation_set(relation).remove(&(user, recipe)))
    }

    fn related_recipes(
        &mut self,
        relation: RecipeRelation,
        user: Uuid,
        recipes: &[Uuid],
    ) -> Result<HashSet<Uuid>, CatalogError> {
        let set = self.relation_set(relation);
        Ok(recipes
            .iter()
            .filter(|r| set.contains(&(user, **r)))
            .copied()
            .collect())
    }

    fn cart_lines(&mut self, user: Uuid) -> Result<Vec<CartLine>, CatalogError> {
        let cart: HashSet<Uuid> = self
            .shopping_cart
            .iter()
            .filter(|(u, _)| *u == user)
            .map(|(_, r)| *r)
            .collect();

        Ok(self
            .recipe_ingredients
            .iter()
            .filter(|((r, _), _)| cart.contains(r))
            .filter_map(|((_, i), amount)| {
                self.ingredients
                    .iter()
                    .find(|ing| ing.id == *i)
                    .map(|ing| CartLine {
                        name: ing.name.clone(),
                        measurement_unit: ing.measurement_unit.clone(),
                        amount: *amount,
                    })
            })
            .collect())
    }

    fn insert_subscription(&mut self, follower: Uuid, author: Uuid) -> Result<bool, CatalogError> {
        if follower == author {
            return Err(CatalogError::validation("You cannot subscribe to yourself"));
        }
        if !self.accounts.iter().any(|a| a.id == author) {
            return Err(CatalogError::not_found("User not found"));
        }
        Ok(self.subscriptions.insert((follower, author)))
    }

    fn delete_subscription(&mut self, follower: Uuid, author: Uuid) -> Result<bool, CatalogError> {
        Ok(self.subscriptions.remove(&(follower, author)))
    }

    fn followed_among(
        &mut self,
        follower: Uuid,
        authors: &[Uuid],
    ) -> Result<HashSet<Uuid>, CatalogError> {
        Ok(authors
            .iter()
            .filter(|a| self.subscriptions.contains(&(follower, **a)))
            .copied()
            .collect())
    }

    fn followed_authors(
        &mut self,
        follower: Uuid,
        page: Page,
    ) -> Result<Paginated<Account>, CatalogError> {
        let mut followed: Vec<Account> = self
            .accounts
            .iter()
            .filter(|a| self.subscriptions.contains(&(follower, a.id)))
            .cloned()
            .collect();
        followed.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(paginate(&followed, page))
    }
}
