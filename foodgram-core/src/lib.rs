//! Recipe catalog and per-user relation rules for Foodgram.
//!
//! Operations take the acting user explicitly and run against any
//! [`CatalogStore`]; the server crate provides the PostgreSQL store and
//! [`MemoryStore`] backs the test suite.

pub mod catalog;
pub mod color;
pub mod error;
pub mod image;
pub mod memory;
pub mod recipes;
pub mod relations;
pub mod shopping_list;
pub mod store;
pub mod subscriptions;
pub mod types;
pub mod users;
pub mod validate;

pub use error::CatalogError;
pub use memory::MemoryStore;
pub use recipes::{NewRecipe, RecipeFilter, RecipeUpdate};
pub use shopping_list::{PlainTextRenderer, ShoppingListRenderer};
pub use store::{CatalogStore, RecipeRelation};
pub use types::{
    Account, Actor, CartLine, DecodedImage, Ingredient, IngredientSpec, NewAccount, NewTag, Page,
    Paginated, Recipe, RecipeImage, RecipeIngredient, RecipeQuery, RecipeSummary, RecipeView,
    RecipeWrite, ShoppingListItem, SubscriptionView, Tag, UserView,
};
pub use users::Registration;
