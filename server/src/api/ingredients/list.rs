use crate::api::{catalog_error, ErrorResponse};
use crate::db::DbPool;
use crate::get_conn;
use crate::store::PgStore;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use foodgram_core::{catalog, Ingredient};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListIngredientsParams {
    /// Case-insensitive name prefix
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct IngredientsListResponse {
    pub ingredients: Vec<Ingredient>,
}

#[utoipa::path(
    get,
    path = "/api/ingredients",
    tag = "ingredients",
    params(ListIngredientsParams),
    responses(
        (status = 200, description = "Ingredients ordered by name", body = IngredientsListResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn list_ingredients(
    State(pool): State<Arc<DbPool>>,
    Query(params): Query<ListIngredientsParams>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    match catalog::list_ingredients(&mut PgStore::new(&mut conn), params.name.as_deref()) {
        Ok(ingredients) => {
            (StatusCode::OK, Json(IngredientsListResponse { ingredients })).into_response()
        }
        Err(e) => catalog_error(e),
    }
}
