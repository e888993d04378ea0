pub mod create;
pub mod delete;
pub mod download;
pub mod favorite;
pub mod get;
pub mod list;
pub mod shopping_cart;
pub mod update;

use crate::api::catalog_error;
use crate::db::DbPool;
use crate::get_conn;
use crate::store::PgStore;
use crate::AppState;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use foodgram_core::image::MAX_FILE_SIZE;
use foodgram_core::{relations, RecipeRelation};
use utoipa::OpenApi;
use uuid::Uuid;

/// Request body cap for recipe writes: a base64 data URI of the largest
/// accepted image plus room for the rest of the JSON document.
pub const RECIPE_BODY_LIMIT: usize = MAX_FILE_SIZE.div_ceil(3) * 4 + 1024 * 1024;

fn recipe_body_limit() -> DefaultBodyLimit {
    DefaultBodyLimit::max(RECIPE_BODY_LIMIT)
}

/// Returns the router for /api/recipes endpoints (mounted at /api/recipes)
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list::list_recipes)
                .post(create::create_recipe)
                .layer(recipe_body_limit()),
        )
        .route(
            "/download_shopping_cart",
            get(download::download_shopping_cart),
        )
        .route(
            "/{id}",
            get(get::get_recipe)
                .patch(update::update_recipe)
                .put(update::update_recipe)
                .delete(delete::delete_recipe)
                .layer(recipe_body_limit()),
        )
        .route(
            "/{id}/favorite",
            post(favorite::add_favorite).delete(favorite::remove_favorite),
        )
        .route(
            "/{id}/shopping_cart",
            post(shopping_cart::add_to_cart).delete(shopping_cart::remove_from_cart),
        )
}

/// Add a recipe to one of the user's relation sets, answering with its summary.
fn add_to_relation(
    pool: &DbPool,
    relation: RecipeRelation,
    user_id: Uuid,
    recipe_id: Uuid,
) -> Response {
    let mut conn = get_conn!(pool);

    match relations::add(&mut PgStore::new(&mut conn), relation, user_id, recipe_id) {
        Ok(summary) => (StatusCode::CREATED, Json(summary)).into_response(),
        Err(e) => catalog_error(e),
    }
}

fn remove_from_relation(
    pool: &DbPool,
    relation: RecipeRelation,
    user_id: Uuid,
    recipe_id: Uuid,
) -> Response {
    let mut conn = get_conn!(pool);

    match relations::remove(&mut PgStore::new(&mut conn), relation, user_id, recipe_id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => catalog_error(e),
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list::list_recipes,
        create::create_recipe,
        get::get_recipe,
        update::update_recipe,
        delete::delete_recipe,
        favorite::add_favorite,
        favorite::remove_favorite,
        shopping_cart::add_to_cart,
        shopping_cart::remove_from_cart,
        download::download_shopping_cart,
    ),
    components(schemas(
        list::ListRecipesResponse,
        create::CreateRecipeRequest,
        update::UpdateRecipeRequest,
    ))
)]
pub struct ApiDoc;
