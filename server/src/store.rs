//! PostgreSQL implementation of [`CatalogStore`].
//!
//! Uniqueness, cascades and delete protection are enforced by the schema's
//! constraints; this module translates their violations into catalog errors.

use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

use foodgram_core::image::{image_url, stored_image_id};
use foodgram_core::{
    Account, CartLine, CatalogError, CatalogStore, Ingredient, NewAccount, NewTag, Page,
    Paginated, Recipe, RecipeImage, RecipeIngredient, RecipeQuery, RecipeRelation, RecipeSummary,
    RecipeWrite, Tag,
};

use crate::models::{
    IngredientRow, NewImage, NewIngredient, NewRecipeIngredient, NewRecipeRow, NewRecipeTag,
    NewTagRow, NewUser, RecipeChanges, RecipeRow, TagRow, User,
};
use crate::raw_sql::{count_over, escape_like};
use crate::schema::{
    images, ingredients, recipe_ingredients, recipe_tags, recipes, subscriptions, tags, users,
};

/// Run `$body` with `$table` bound to the schema module of the relation.
/// Both relation tables share the `user_id`/`recipe_id` layout.
macro_rules! with_relation_table {
    ($relation:expr, $table:ident => $body:expr) => {
        match $relation {
            RecipeRelation::Favorite => {
                use crate::schema::favorites as $table;
                $body
            }
            RecipeRelation::ShoppingCart => {
                use crate::schema::shopping_cart_entries as $table;
                $body
            }
        }
    };
}

pub struct PgStore<'a> {
    conn: &'a mut PgConnection,
}

impl<'a> PgStore<'a> {
    pub fn new(conn: &'a mut PgConnection) -> Self {
        Self { conn }
    }

    fn hydrate(&mut self, rows: Vec<RecipeRow>) -> QueryResult<Vec<Recipe>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();

        let tag_rows: Vec<(Uuid, TagRow)> = recipe_tags::table
            .inner_join(tags::table)
            .filter(recipe_tags::recipe_id.eq_any(&ids))
            .order(tags::name.asc())
            .select((recipe_tags::recipe_id, TagRow::as_select()))
            .load(self.conn)?;

        let ingredient_rows: Vec<(Uuid, IngredientRow, i32)> = recipe_ingredients::table
            .inner_join(ingredients::table)
            .filter(recipe_ingredients::recipe_id.eq_any(&ids))
            .order((ingredients::name.asc(), ingredients::id.asc()))
            .select((
                recipe_ingredients::recipe_id,
                IngredientRow::as_select(),
                recipe_ingredients::amount,
            ))
            .load(self.conn)?;

        let mut tags_by_recipe: HashMap<Uuid, Vec<Tag>> = HashMap::new();
        for (recipe_id, row) in tag_rows {
            tags_by_recipe.entry(recipe_id).or_default().push(row.into());
        }

        let mut ingredients_by_recipe: HashMap<Uuid, Vec<RecipeIngredient>> = HashMap::new();
        for (recipe_id, row, amount) in ingredient_rows {
            ingredients_by_recipe
                .entry(recipe_id)
                .or_default()
                .push(RecipeIngredient {
                    id: row.id,
                    name: row.name,
                    measurement_unit: row.measurement_unit,
                    amount,
                });
        }

        Ok(rows
            .into_iter()
            .map(|row| Recipe {
                tags: tags_by_recipe.remove(&row.id).unwrap_or_default(),
                ingredients: ingredients_by_recipe.remove(&row.id).unwrap_or_default(),
                id: row.id,
                author_id: row.author_id,
                name: row.name,
                text: row.text,
                cooking_time: row.cooking_time,
                image: row.image,
                pub_date: row.pub_date,
            })
            .collect())
    }
}

/// Recipes matching every populated field of `query`.
fn filtered_recipes(query: &RecipeQuery) -> recipes::BoxedQuery<'_, Pg> {
    let mut boxed = recipes::table.into_boxed();

    if let Some(author) = query.author {
        boxed = boxed.filter(recipes::author_id.eq(author));
    }

    // Any of the slugs (OR semantics)
    if !query.tag_slugs.is_empty() {
        boxed = boxed.filter(
            recipes::id.eq_any(
                recipe_tags::table
                    .inner_join(tags::table)
                    .filter(tags::slug.eq_any(&query.tag_slugs))
                    .select(recipe_tags::recipe_id),
            ),
        );
    }

    if let Some(user) = query.favorited_by {
        use crate::schema::favorites;
        boxed = boxed.filter(
            recipes::id.eq_any(
                favorites::table
                    .filter(favorites::user_id.eq(user))
                    .select(favorites::recipe_id),
            ),
        );
    }

    if let Some(user) = query.in_cart_of {
        use crate::schema::shopping_cart_entries;
        boxed = boxed.filter(
            recipes::id.eq_any(
                shopping_cart_entries::table
                    .filter(shopping_cart_entries::user_id.eq(user))
                    .select(shopping_cart_entries::recipe_id),
            ),
        );
    }

    boxed
}

fn link_rows(
    recipe_id: Uuid,
    write: &RecipeWrite,
) -> (Vec<NewRecipeTag>, Vec<NewRecipeIngredient>) {
    let tags = write
        .tags
        .iter()
        .map(|tag_id| NewRecipeTag {
            recipe_id,
            tag_id: *tag_id,
        })
        .collect();
    let ingredients = write
        .ingredients
        .iter()
        .map(|spec| NewRecipeIngredient {
            recipe_id,
            ingredient_id: spec.id,
            amount: spec.amount,
        })
        .collect();
    (tags, ingredients)
}

/// Resolve the reference written to `recipes.image`, inserting an upload.
fn store_image(conn: &mut PgConnection, image: &RecipeImage) -> QueryResult<Option<String>> {
    match image {
        RecipeImage::Absent => Ok(None),
        RecipeImage::Reference(reference) => Ok(Some(reference.clone())),
        RecipeImage::Upload(upload) => {
            let id: Uuid = diesel::insert_into(images::table)
                .values(&NewImage {
                    content_type: &upload.content_type,
                    data: &upload.data,
                })
                .returning(images::id)
                .get_result(conn)?;
            tracing::debug!(
                image_id = %id,
                content_type = %upload.content_type,
                bytes = upload.data.len(),
                "stored recipe image"
            );
            Ok(Some(image_url(id)))
        }
    }
}

/// Drop the stored image behind `reference` once no recipe points at it.
fn release_image(conn: &mut PgConnection, reference: Option<&str>) -> QueryResult<()> {
    let Some(reference) = reference else {
        return Ok(());
    };
    let Some(image_id) = stored_image_id(reference) else {
        return Ok(());
    };

    let still_used: bool = diesel::select(diesel::dsl::exists(
        recipes::table.filter(recipes::image.eq(reference)),
    ))
    .get_result(conn)?;
    if !still_used {
        diesel::delete(images::table.find(image_id)).execute(conn)?;
    }
    Ok(())
}

fn unique_message(constraint: Option<&str>) -> &'static str {
    match constraint {
        Some("users_email_key") => "This email is already in use",
        Some("users_username_key") => "This username is already taken",
        Some("tags_name_key") => "A tag with this name already exists",
        Some("tags_color_key") => "A tag with this colour already exists",
        Some("tags_slug_key") => "A tag with this slug already exists",
        Some("recipe_tags_pkey") => "Recipe cannot reference the same tag twice",
        Some("recipe_ingredients_pkey") => "Recipe cannot reference the same ingredient twice",
        _ => "Entry already exists",
    }
}

fn foreign_key_message(constraint: Option<&str>) -> &'static str {
    match constraint {
        Some("recipe_tags_tag_id_fkey") => "Tag not found",
        Some("recipe_ingredients_ingredient_id_fkey") => "Ingredient not found",
        Some("recipes_author_id_fkey") => "Author does not exist",
        _ => "Referenced entity does not exist",
    }
}

/// Translate a diesel error into a catalog error.
fn db_error(e: DieselError) -> CatalogError {
    match &e {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            CatalogError::conflict(unique_message(info.constraint_name()))
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
            CatalogError::validation(foreign_key_message(info.constraint_name()))
        }
        DieselError::DatabaseError(DatabaseErrorKind::CheckViolation, info) => {
            CatalogError::validation(info.message().to_string())
        }
        _ => {
            tracing::error!("Database error: {}", e);
            CatalogError::Storage(e.to_string())
        }
    }
}

fn is_foreign_key_violation(e: &DieselError) -> bool {
    matches!(
        e,
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _)
    )
}

/// Ids from `wanted` that are not in `found`, in input order.
fn missing(wanted: &[Uuid], found: Vec<Uuid>) -> Vec<Uuid> {
    let found: HashSet<Uuid> = found.into_iter().collect();
    wanted
        .iter()
        .filter(|id| !found.contains(id))
        .copied()
        .collect()
}

fn paginated<T>(rows: Vec<(T, i64)>) -> Paginated<T> {
    let total = rows.first().map(|(_, total)| *total).unwrap_or(0);
    Paginated {
        items: rows.into_iter().map(|(item, _)| item).collect(),
        total,
    }
}

impl CatalogStore for PgStore<'_> {
    fn insert_account(&mut self, account: &NewAccount<'_>) -> Result<Account, CatalogError> {
        let new_user = NewUser {
            email: account.email,
            username: account.username,
            first_name: account.first_name,
            last_name: account.last_name,
            password_hash: account.password_hash,
            is_admin: account.is_admin,
        };

        let user: User = diesel::insert_into(users::table)
            .values(&new_user)
            .returning(User::as_returning())
            .get_result(self.conn)
            .map_err(db_error)?;
        Ok(user.into())
    }

    fn account(&mut self, id: Uuid) -> Result<Option<Account>, CatalogError> {
        let user: Option<User> = users::table
            .find(id)
            .select(User::as_select())
            .first(self.conn)
            .optional()
            .map_err(db_error)?;
        Ok(user.map(Account::from))
    }

    fn accounts(&mut self, ids: &[Uuid]) -> Result<Vec<Account>, CatalogError> {
        let found: Vec<User> = users::table
            .filter(users::id.eq_any(ids))
            .select(User::as_select())
            .load(self.conn)
            .map_err(db_error)?;
        Ok(found.into_iter().map(Account::from).collect())
    }

    fn list_accounts(&mut self, page: Page) -> Result<Paginated<Account>, CatalogError> {
        let rows: Vec<(User, i64)> = users::table
            .order((users::username.asc(), users::id.asc()))
            .select((User::as_select(), count_over()))
            .limit(page.limit)
            .offset(page.offset)
            .load(self.conn)
            .map_err(db_error)?;

        let mut result = paginated(rows).map(Account::from);
        if result.items.is_empty() && page.offset > 0 {
            result.total = users::table
                .count()
                .get_result(self.conn)
                .map_err(db_error)?;
        }
        Ok(result)
    }

    fn list_tags(&mut self) -> Result<Vec<Tag>, CatalogError> {
        let rows: Vec<TagRow> = tags::table
            .order(tags::name.asc())
            .select(TagRow::as_select())
            .load(self.conn)
            .map_err(db_error)?;
        Ok(rows.into_iter().map(Tag::from).collect())
    }

    fn tag(&mut self, id: Uuid) -> Result<Option<Tag>, CatalogError> {
        let row: Option<TagRow> = tags::table
            .find(id)
            .select(TagRow::as_select())
            .first(self.conn)
            .optional()
            .map_err(db_error)?;
        Ok(row.map(Tag::from))
    }

    fn insert_tag(&mut self, tag: &NewTag) -> Result<Tag, CatalogError> {
        let row: TagRow = diesel::insert_into(tags::table)
            .values(&NewTagRow {
                name: &tag.name,
                color: &tag.color,
                slug: &tag.slug,
            })
            .returning(TagRow::as_returning())
            .get_result(self.conn)
            .map_err(db_error)?;
        Ok(row.into())
    }

    fn missing_tags(&mut self, ids: &[Uuid]) -> Result<Vec<Uuid>, CatalogError> {
        let found: Vec<Uuid> = tags::table
            .filter(tags::id.eq_any(ids))
            .select(tags::id)
            .load(self.conn)
            .map_err(db_error)?;
        Ok(missing(ids, found))
    }

    fn list_ingredients(
        &mut self,
        name_prefix: Option<&str>,
    ) -> Result<Vec<Ingredient>, CatalogError> {
        let mut query = ingredients::table.into_boxed();
        if let Some(prefix) = name_prefix {
            query = query.filter(ingredients::name.ilike(format!("{}%", escape_like(prefix))));
        }

        let rows: Vec<IngredientRow> = query
            .order((ingredients::name.asc(), ingredients::measurement_unit.asc()))
            .select(IngredientRow::as_select())
            .load(self.conn)
            .map_err(db_error)?;
        Ok(rows.into_iter().map(Ingredient::from).collect())
    }

    fn ingredient(&mut self, id: Uuid) -> Result<Option<Ingredient>, CatalogError> {
        let row: Option<IngredientRow> = ingredients::table
            .find(id)
            .select(IngredientRow::as_select())
            .first(self.conn)
            .optional()
            .map_err(db_error)?;
        Ok(row.map(Ingredient::from))
    }

    fn insert_ingredient(
        &mut self,
        name: &str,
        measurement_unit: &str,
    ) -> Result<Ingredient, CatalogError> {
        let row: IngredientRow = diesel::insert_into(ingredients::table)
            .values(&NewIngredient {
                name,
                measurement_unit,
            })
            .returning(IngredientRow::as_returning())
            .get_result(self.conn)
            .map_err(db_error)?;
        Ok(row.into())
    }

    fn delete_ingredient(&mut self, id: Uuid) -> Result<bool, CatalogError> {
        match diesel::delete(ingredients::table.find(id)).execute(self.conn) {
            Ok(deleted) => Ok(deleted > 0),
            // recipe_ingredients.ingredient_id is ON DELETE RESTRICT
            Err(e) if is_foreign_key_violation(&e) => Err(CatalogError::conflict(
                "Ingredient is used by at least one recipe",
            )),
            Err(e) => Err(db_error(e)),
        }
    }

    fn missing_ingredients(&mut self, ids: &[Uuid]) -> Result<Vec<Uuid>, CatalogError> {
        let found: Vec<Uuid> = ingredients::table
            .filter(ingredients::id.eq_any(ids))
            .select(ingredients::id)
            .load(self.conn)
            .map_err(db_error)?;
        Ok(missing(ids, found))
    }

    fn insert_recipe(&mut self, author: Uuid, recipe: &RecipeWrite) -> Result<Uuid, CatalogError> {
        self.conn
            .transaction::<_, DieselError, _>(|conn| {
                let image = store_image(conn, &recipe.image)?;
                let id: Uuid = diesel::insert_into(recipes::table)
                    .values(&NewRecipeRow {
                        author_id: author,
                        name: &recipe.name,
                        text: &recipe.text,
                        cooking_time: recipe.cooking_time,
                        image: image.as_deref(),
                    })
                    .returning(recipes::id)
                    .get_result(conn)?;

                let (tag_links, ingredient_lines) = link_rows(id, recipe);
                diesel::insert_into(recipe_tags::table)
                    .values(&tag_links)
                    .execute(conn)?;
                diesel::insert_into(recipe_ingredients::table)
                    .values(&ingredient_lines)
                    .execute(conn)?;

                Ok(id)
            })
            .map_err(db_error)
    }

    fn replace_recipe(&mut self, id: Uuid, recipe: &RecipeWrite) -> Result<bool, CatalogError> {
        self.conn
            .transaction::<_, DieselError, _>(|conn| {
                let previous: Option<Option<String>> = recipes::table
                    .find(id)
                    .select(recipes::image)
                    .for_update()
                    .first(conn)
                    .optional()?;
                let Some(previous) = previous else {
                    return Ok(false);
                };

                let image = store_image(conn, &recipe.image)?;
                diesel::update(recipes::table.find(id))
                    .set(&RecipeChanges {
                        name: &recipe.name,
                        text: &recipe.text,
                        cooking_time: recipe.cooking_time,
                        image: image.as_deref(),
                    })
                    .execute(conn)?;

                diesel::delete(recipe_tags::table.filter(recipe_tags::recipe_id.eq(id)))
                    .execute(conn)?;
                diesel::delete(
                    recipe_ingredients::table.filter(recipe_ingredients::recipe_id.eq(id)),
                )
                .execute(conn)?;

                let (tag_links, ingredient_lines) = link_rows(id, recipe);
                diesel::insert_into(recipe_tags::table)
                    .values(&tag_links)
                    .execute(conn)?;
                diesel::insert_into(recipe_ingredients::table)
                    .values(&ingredient_lines)
                    .execute(conn)?;

                if previous != image {
                    release_image(conn, previous.as_deref())?;
                }
                Ok(true)
            })
            .map_err(db_error)
    }

    fn delete_recipe(&mut self, id: Uuid) -> Result<bool, CatalogError> {
        self.conn
            .transaction::<_, DieselError, _>(|conn| {
                // Tag links, ingredient lines, favorites and cart entries cascade.
                let removed: Option<Option<String>> = diesel::delete(recipes::table.find(id))
                    .returning(recipes::image)
                    .get_result(conn)
                    .optional()?;
                let Some(image) = removed else {
                    return Ok(false);
                };
                release_image(conn, image.as_deref())?;
                Ok(true)
            })
            .map_err(db_error)
    }

    fn recipe(&mut self, id: Uuid) -> Result<Option<Recipe>, CatalogError> {
        let row: Option<RecipeRow> = recipes::table
            .find(id)
            .select(RecipeRow::as_select())
            .first(self.conn)
            .optional()
            .map_err(db_error)?;

        match row {
            Some(row) => Ok(self.hydrate(vec![row]).map_err(db_error)?.pop()),
            None => Ok(None),
        }
    }

    fn list_recipes(
        &mut self,
        query: &RecipeQuery,
        page: Page,
    ) -> Result<Paginated<Recipe>, CatalogError> {
        let rows: Vec<(RecipeRow, i64)> = filtered_recipes(query)
            .order((recipes::pub_date.desc(), recipes::id.desc()))
            .select((RecipeRow::as_select(), count_over()))
            .limit(page.limit)
            .offset(page.offset)
            .load(self.conn)
            .map_err(db_error)?;

        let page_rows = paginated(rows);
        let mut total = page_rows.total;
        if page_rows.items.is_empty() && page.offset > 0 {
            total = filtered_recipes(query)
                .count()
                .get_result(self.conn)
                .map_err(db_error)?;
        }

        let items = self.hydrate(page_rows.items).map_err(db_error)?;
        Ok(Paginated { items, total })
    }

    fn author_recipes(
        &mut self,
        author: Uuid,
        limit: Option<usize>,
    ) -> Result<Vec<RecipeSummary>, CatalogError> {
        let mut query = recipes::table
            .filter(recipes::author_id.eq(author))
            .order((recipes::pub_date.desc(), recipes::id.desc()))
            .select(RecipeRow::as_select())
            .into_boxed();
        if let Some(limit) = limit {
            query = query.limit(i64::try_from(limit).unwrap_or(i64::MAX));
        }

        let rows: Vec<RecipeRow> = query.load(self.conn).map_err(db_error)?;
        Ok(rows.into_iter().map(RecipeSummary::from).collect())
    }

    fn count_author_recipes(&mut self, author: Uuid) -> Result<i64, CatalogError> {
        recipes::table
            .filter(recipes::author_id.eq(author))
            .count()
            .get_result(self.conn)
            .map_err(db_error)
    }

    fn insert_relation(
        &mut self,
        relation: RecipeRelation,
        user: Uuid,
        recipe: Uuid,
    ) -> Result<bool, CatalogError> {
        let inserted = with_relation_table!(relation, t => {
            diesel::insert_into(t::table)
                .values((t::user_id.eq(user), t::recipe_id.eq(recipe)))
                .on_conflict_do_nothing()
                .execute(self.conn)
        });

        match inserted {
            Ok(rows) => Ok(rows > 0),
            Err(e) if is_foreign_key_violation(&e) => Err(CatalogError::not_found(format!(
                "Recipe {} not found",
                recipe
            ))),
            Err(e) => Err(db_error(e)),
        }
    }

    fn delete_relation(
        &mut self,
        relation: RecipeRelation,
        user: Uuid,
        recipe: Uuid,
    ) -> Result<bool, CatalogError> {
        let deleted = with_relation_table!(relation, t => {
            diesel::delete(
                t::table
                    .filter(t::user_id.eq(user))
                    .filter(t::recipe_id.eq(recipe)),
            )
            .execute(self.conn)
        })
        .map_err(db_error)?;
        Ok(deleted > 0)
    }

    fn related_recipes(
        &mut self,
        relation: RecipeRelation,
        user: Uuid,
        recipes: &[Uuid],
    ) -> Result<HashSet<Uuid>, CatalogError> {
        let found: Vec<Uuid> = with_relation_table!(relation, t => {
            t::table
                .filter(t::user_id.eq(user))
                .filter(t::recipe_id.eq_any(recipes))
                .select(t::recipe_id)
                .load(self.conn)
        })
        .map_err(db_error)?;
        Ok(found.into_iter().collect())
    }

    fn cart_lines(&mut self, user: Uuid) -> Result<Vec<CartLine>, CatalogError> {
        use crate::schema::shopping_cart_entries;

        let rows: Vec<(String, String, i32)> = recipe_ingredients::table
            .inner_join(ingredients::table)
            .filter(
                recipe_ingredients::recipe_id.eq_any(
                    shopping_cart_entries::table
                        .filter(shopping_cart_entries::user_id.eq(user))
                        .select(shopping_cart_entries::recipe_id),
                ),
            )
            .select((
                ingredients::name,
                ingredients::measurement_unit,
                recipe_ingredients::amount,
            ))
            .load(self.conn)
            .map_err(db_error)?;

        Ok(rows
            .into_iter()
            .map(|(name, measurement_unit, amount)| CartLine {
                name,
                measurement_unit,
                amount,
            })
            .collect())
    }

    fn insert_subscription(&mut self, follower: Uuid, author: Uuid) -> Result<bool, CatalogError> {
        let inserted = diesel::insert_into(subscriptions::table)
            .values((
                subscriptions::user_id.eq(follower),
                subscriptions::author_id.eq(author),
            ))
            .on_conflict_do_nothing()
            .execute(self.conn);

        match inserted {
            Ok(rows) => Ok(rows > 0),
            Err(e) if is_foreign_key_violation(&e) => {
                Err(CatalogError::not_found("User not found"))
            }
            Err(DieselError::DatabaseError(DatabaseErrorKind::CheckViolation, _)) => Err(
                CatalogError::validation("You cannot subscribe to yourself"),
            ),
            Err(e) => Err(db_error(e)),
        }
    }

    fn delete_subscription(&mut self, follower: Uuid, author: Uuid) -> Result<bool, CatalogError> {
        let deleted = diesel::delete(
            subscriptions::table
                .filter(subscriptions::user_id.eq(follower))
                .filter(subscriptions::author_id.eq(author)),
        )
        .execute(self.conn)
        .map_err(db_error)?;
        Ok(deleted > 0)
    }

    fn followed_among(
        &mut self,
        follower: Uuid,
        authors: &[Uuid],
    ) -> Result<HashSet<Uuid>, CatalogError> {
        let found: Vec<Uuid> = subscriptions::table
            .filter(subscriptions::user_id.eq(follower))
            .filter(subscriptions::author_id.eq_any(authors))
            .select(subscriptions::author_id)
            .load(self.conn)
            .map_err(db_error)?;
        Ok(found.into_iter().collect())
    }

    fn followed_authors(
        &mut self,
        follower: Uuid,
        page: Page,
    ) -> Result<Paginated<Account>, CatalogError> {
        let rows: Vec<(User, i64)> = users::table
            .inner_join(subscriptions::table)
            .filter(subscriptions::user_id.eq(follower))
            .order((users::username.asc(), users::id.asc()))
            .select((User::as_select(), count_over()))
            .limit(page.limit)
            .offset(page.offset)
            .load(self.conn)
            .map_err(db_error)?;

        let mut result = paginated(rows).map(Account::from);
        if result.items.is_empty() && page.offset > 0 {
            result.total = subscriptions::table
                .filter(subscriptions::user_id.eq(follower))
                .count()
                .get_result(self.conn)
                .map_err(db_error)?;
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_preserves_input_order() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let c = Uuid::new_v4();
        assert_eq!(missing(&[c, a, b], vec![a]), vec![c, b]);
        assert!(missing(&[a], vec![a]).is_empty());
    }

    #[test]
    fn test_constraint_messages() {
        assert_eq!(
            unique_message(Some("tags_slug_key")),
            "A tag with this slug already exists"
        );
        assert_eq!(unique_message(None), "Entry already exists");
        assert_eq!(
            foreign_key_message(Some("recipe_ingredients_ingredient_id_fkey")),
            "Ingredient not found"
        );
    }

    #[test]
    fn test_paginated_takes_total_from_window() {
        let page = paginated(vec![("a", 7), ("b", 7)]);
        assert_eq!(page.total, 7);
        assert_eq!(page.items, vec!["a", "b"]);

        let empty: Paginated<&str> = paginated(Vec::new());
        assert_eq!(empty.total, 0);
    }
}
