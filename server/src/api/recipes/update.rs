use crate::api::{catalog_error, ErrorResponse};
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::store::PgStore;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use foodgram_core::{recipes, IngredientSpec, RecipeUpdate, RecipeView};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

/// Omitted scalar fields keep their stored value. `tags` and `ingredients`
/// are required and replace the stored sets.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateRecipeRequest {
    pub name: Option<String>,
    pub text: Option<String>,
    pub cooking_time: Option<i32>,
    pub image: Option<String>,
    pub tags: Option<Vec<Uuid>>,
    pub ingredients: Option<Vec<IngredientSpec>>,
}

impl From<UpdateRecipeRequest> for RecipeUpdate {
    fn from(req: UpdateRecipeRequest) -> Self {
        RecipeUpdate {
            name: req.name,
            text: req.text,
            cooking_time: req.cooking_time,
            image: req.image,
            tags: req.tags,
            ingredients: req.ingredients,
        }
    }
}

#[utoipa::path(
    patch,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    request_body = UpdateRecipeRequest,
    responses(
        (status = 200, description = "Recipe updated", body = RecipeView),
        (status = 400, description = "Invalid recipe", body = ErrorResponse),
        (status = 403, description = "Not the author", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_recipe(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateRecipeRequest>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    match recipes::update_recipe(&mut PgStore::new(&mut conn), &user.actor(), id, req.into()) {
        Ok(recipe) => (StatusCode::OK, Json(recipe)).into_response(),
        Err(e) => catalog_error(e),
    }
}
