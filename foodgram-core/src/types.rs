//! Domain records shared by the store implementations and the API layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// The identified user on whose behalf an operation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: Uuid,
    pub is_admin: bool,
}

/// A stored user account, without credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub is_admin: bool,
}

impl Account {
    pub fn actor(&self) -> Actor {
        Actor {
            id: self.id,
            is_admin: self.is_admin,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewAccount<'a> {
    pub email: &'a str,
    pub username: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub password_hash: &'a str,
    pub is_admin: bool,
}

/// A user as seen by a particular viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct UserView {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    /// Whether the viewer follows this user. Always false for anonymous viewers.
    pub is_subscribed: bool,
}

impl UserView {
    pub fn new(account: Account, is_subscribed: bool) -> Self {
        UserView {
            id: account.id,
            email: account.email,
            username: account.username,
            first_name: account.first_name,
            last_name: account.last_name,
            is_subscribed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
    /// CSS3 colour name (e.g. "seagreen").
    pub color: String,
    pub slug: String,
}

/// A tag ready to be stored; `color` is already canonical.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTag {
    pub name: String,
    pub color: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Ingredient {
    pub id: Uuid,
    pub name: String,
    pub measurement_unit: String,
}

/// One requested ingredient of a recipe being written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
pub struct IngredientSpec {
    /// Ingredient ID
    pub id: Uuid,
    /// Quantity in the ingredient's measurement unit, at least 1
    pub amount: i32,
}

/// An ingredient line of a stored recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct RecipeIngredient {
    /// Ingredient ID
    pub id: Uuid,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

/// A stored recipe with its relations loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    pub id: Uuid,
    pub author_id: Uuid,
    pub name: String,
    pub text: String,
    pub cooking_time: i32,
    pub image: Option<String>,
    pub pub_date: DateTime<Utc>,
    pub tags: Vec<Tag>,
    pub ingredients: Vec<RecipeIngredient>,
}

/// The complete row set written for a recipe on create or full replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeWrite {
    pub name: String,
    pub text: String,
    pub cooking_time: i32,
    pub image: RecipeImage,
    pub tags: Vec<Uuid>,
    pub ingredients: Vec<IngredientSpec>,
}

/// The image half of a recipe write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipeImage {
    Absent,
    /// Reference kept exactly as given.
    Reference(String),
    /// Inline upload; stored in the same transaction as the recipe rows.
    Upload(DecodedImage),
}

impl RecipeImage {
    /// Wrap a stored reference, as read back from a recipe.
    pub fn stored(reference: Option<String>) -> Self {
        reference.map_or(RecipeImage::Absent, RecipeImage::Reference)
    }
}

/// Full recipe representation for a particular viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct RecipeView {
    pub id: Uuid,
    pub name: String,
    pub text: String,
    /// Cooking time in minutes
    pub cooking_time: i32,
    pub image: Option<String>,
    pub pub_date: DateTime<Utc>,
    pub author: UserView,
    pub tags: Vec<Tag>,
    pub ingredients: Vec<RecipeIngredient>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
}

/// Compact recipe projection returned by favorite/cart toggles and
/// subscription listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct RecipeSummary {
    pub id: Uuid,
    pub name: String,
    pub image: Option<String>,
    pub cooking_time: i32,
}

impl From<&Recipe> for RecipeSummary {
    fn from(recipe: &Recipe) -> Self {
        RecipeSummary {
            id: recipe.id,
            name: recipe.name.clone(),
            image: recipe.image.clone(),
            cooking_time: recipe.cooking_time,
        }
    }
}

/// Store-level recipe filter. Every populated field narrows the result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeQuery {
    pub author: Option<Uuid>,
    /// Recipes carrying any of these tag slugs. Empty means no tag filter.
    pub tag_slugs: Vec<String>,
    pub favorited_by: Option<Uuid>,
    pub in_cart_of: Option<Uuid>,
}

/// One RecipeIngredient row of a recipe in somebody's shopping cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ShoppingListItem {
    pub name: String,
    pub measurement_unit: String,
    pub total_amount: i64,
}

/// A followed author with their recipes, as listed for the follower.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct SubscriptionView {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub is_subscribed: bool,
    /// Most recent first, optionally truncated by `recipes_limit`
    pub recipes: Vec<RecipeSummary>,
    /// Total number of recipes by this author, never truncated
    pub recipes_count: i64,
}

/// Decoded image bytes waiting to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Offset-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

impl Page {
    pub fn new(limit: i64, offset: i64) -> Self {
        Page {
            limit: limit.max(1),
            offset: offset.max(0),
        }
    }
}

/// One page of results plus the total number of matching items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: i64,
}

impl<T> Paginated<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}
