use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use foodgram_core::{RecipeRelation, RecipeSummary};
use std::sync::Arc;
use uuid::Uuid;

use super::{add_to_relation, remove_from_relation};

#[utoipa::path(
    post,
    path = "/api/recipes/{id}/shopping_cart",
    tag = "shopping_carts",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    responses(
        (status = 201, description = "Added to shopping_carts", body = RecipeSummary),
        (status = 404, description = "Recipe not found", body = ErrorResponse),
        (status = 409, description = "Already in shopping_carts", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn add_to_cart(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    add_to_relation(&pool, RecipeRelation::ShoppingCart, user.id, id)
}

#[utoipa::path(
    delete,
    path = "/api/recipes/{id}/shopping_cart",
    tag = "shopping_carts",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    responses(
        (status = 204, description = "Removed from shopping_carts"),
        (status = 404, description = "Recipe not found", body = ErrorResponse),
        (status = 409, description = "Not in shopping_carts", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn remove_from_cart(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    remove_from_relation(&pool, RecipeRelation::ShoppingCart, user.id, id)
}
