use crate::api::{catalog_error, ErrorResponse};
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::store::PgStore;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use foodgram_core::{recipes, IngredientSpec, NewRecipe, RecipeView};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

/// Missing fields default to empty values and fail validation.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateRecipeRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub text: String,
    /// Minutes, at least 1
    #[serde(default)]
    pub cooking_time: i32,
    /// `data:image/<fmt>;base64,...` payload or an existing image reference
    pub image: Option<String>,
    /// Tag IDs, at least one
    #[serde(default)]
    pub tags: Vec<Uuid>,
    /// At least one, each ingredient at most once
    #[serde(default)]
    pub ingredients: Vec<IngredientSpec>,
}

impl From<CreateRecipeRequest> for NewRecipe {
    fn from(req: CreateRecipeRequest) -> Self {
        NewRecipe {
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
    post,
    path = "/api/recipes",
    tag = "recipes",
    request_body = CreateRecipeRequest,
    responses(
        (status = 201, description = "Recipe created", body = RecipeView),
        (status = 400, description = "Invalid recipe", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_recipe(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Json(req): Json<CreateRecipeRequest>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    match recipes::create_recipe(&mut PgStore::new(&mut conn), &user.actor(), req.into()) {
        Ok(recipe) => (StatusCode::CREATED, Json(recipe)).into_response(),
        Err(e) => catalog_error(e),
    }
}
