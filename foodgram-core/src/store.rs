//! Storage abstraction for the recipe catalog.
//!
//! Implementations must enforce the uniqueness rules themselves (tag
//! name/colour/slug, one row per (user, recipe) in each relation, one row per
//! (follower, author), one row per (recipe, ingredient)), cascade recipe
//! deletion to its ingredient lines and relation rows, and refuse to delete an
//! ingredient that any recipe still uses. Multi-row writes of a recipe, including
//! its uploaded image, must be atomic.

use std::collections::HashSet;
use uuid::Uuid;

use crate::error::CatalogError;
use crate::types::{
    Account, CartLine, Ingredient, NewAccount, NewTag, Page, Paginated, Recipe, RecipeQuery,
    RecipeSummary, RecipeWrite, Tag,
};

/// A per-user set of recipes with add/remove semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecipeRelation {
    Favorite,
    ShoppingCart,
}

impl RecipeRelation {
    pub fn label(&self) -> &'static str {
        match self {
            RecipeRelation::Favorite => "favorites",
            RecipeRelation::ShoppingCart => "shopping cart",
        }
    }
}

pub trait CatalogStore {
    /// Conflict when the email or username is taken.
    fn insert_account(&mut self, account: &NewAccount<'_>) -> Result<Account, CatalogError>;
    fn account(&mut self, id: Uuid) -> Result<Option<Account>, CatalogError>;
    fn accounts(&mut self, ids: &[Uuid]) -> Result<Vec<Account>, CatalogError>;
    /// Ordered by username.
    fn list_accounts(&mut self, page: Page) -> Result<Paginated<Account>, CatalogError>;

    /// Ordered by name.
    fn list_tags(&mut self) -> Result<Vec<Tag>, CatalogError>;
    fn tag(&mut self, id: Uuid) -> Result<Option<Tag>, CatalogError>;
    /// Conflict when the name, colour or slug is taken.
    fn insert_tag(&mut self, tag: &NewTag) -> Result<Tag, CatalogError>;
    /// The subset of `ids` with no stored tag, in input order.
    fn missing_tags(&mut self, ids: &[Uuid]) -> Result<Vec<Uuid>, CatalogError>;

    /// Ordered by name; `name_prefix` matches case-insensitively.
    fn list_ingredients(&mut self, name_prefix: Option<&str>)
        -> Result<Vec<Ingredient>, CatalogError>;
    fn ingredient(&mut self, id: Uuid) -> Result<Option<Ingredient>, CatalogError>;
    fn insert_ingredient(
        &mut self,
        name: &str,
        measurement_unit: &str,
    ) -> Result<Ingredient, CatalogError>;
    /// `Ok(false)` when absent; Conflict when any recipe uses it.
    fn delete_ingredient(&mut self, id: Uuid) -> Result<bool, CatalogError>;
    /// The subset of `ids` with no stored ingredient, in input order.
    fn missing_ingredients(&mut self, ids: &[Uuid]) -> Result<Vec<Uuid>, CatalogError>;

    /// Writes the recipe row, its ingredient lines, tag links and any
    /// uploaded image as one unit.
    fn insert_recipe(&mut self, author: Uuid, recipe: &RecipeWrite) -> Result<Uuid, CatalogError>;
    /// Replaces scalar fields, tag links and ingredient lines as one unit.
    /// A stored image the recipe no longer points at is dropped unless
    /// another recipe still references it. `Ok(false)` when the recipe does
    /// not exist.
    fn replace_recipe(&mut self, id: Uuid, recipe: &RecipeWrite) -> Result<bool, CatalogError>;
    /// Drops the recipe's stored image under the same rule as
    /// [`replace_recipe`](Self::replace_recipe). `Ok(false)` when the recipe
    /// does not exist.
    fn delete_recipe(&mut self, id: Uuid) -> Result<bool, CatalogError>;
    fn recipe(&mut self, id: Uuid) -> Result<Option<Recipe>, CatalogError>;
    /// Newest publication first.
    fn list_recipes(
        &mut self,
        query: &RecipeQuery,
        page: Page,
    ) -> Result<Paginated<Recipe>, CatalogError>;
    /// Newest publication first, at most `limit` entries when given.
    fn author_recipes(
        &mut self,
        author: Uuid,
        limit: Option<usize>,
    ) -> Result<Vec<RecipeSummary>, CatalogError>;
    fn count_author_recipes(&mut self, author: Uuid) -> Result<i64, CatalogError>;

    /// `Ok(false)` when the pair is already present. Must be decided by the
    /// store's uniqueness guarantee so concurrent inserts cannot both succeed.
    fn insert_relation(
        &mut self,
        relation: RecipeRelation,
        user: Uuid,
        recipe: Uuid,
    ) -> Result<bool, CatalogError>;
    /// `Ok(false)` when the pair was absent.
    fn delete_relation(
        &mut self,
        relation: RecipeRelation,
        user: Uuid,
        recipe: Uuid,
    ) -> Result<bool, CatalogError>;
    /// Which of `recipes` the user holds in the relation.
    fn related_recipes(
        &mut self,
        relation: RecipeRelation,
        user: Uuid,
        recipes: &[Uuid],
    ) -> Result<HashSet<Uuid>, CatalogError>;
    /// Every ingredient line of every recipe in the user's shopping cart.
    fn cart_lines(&mut self, user: Uuid) -> Result<Vec<CartLine>, CatalogError>;

    /// `Ok(false)` when the subscription already exists.
    fn insert_subscription(&mut self, follower: Uuid, author: Uuid) -> Result<bool, CatalogError>;
    /// `Ok(false)` when there was no subscription.
    fn delete_subscription(&mut self, follower: Uuid, author: Uuid) -> Result<bool, CatalogError>;
    /// Which of `authors` the follower is subscribed to.
    fn followed_among(
        &mut self,
        follower: Uuid,
        authors: &[Uuid],
    ) -> Result<HashSet<Uuid>, CatalogError>;
    /// Followed authors ordered by username.
    fn followed_authors(
        &mut self,
        follower: Uuid,
        page: Page,
    ) -> Result<Paginated<Account>, CatalogError>;
}
