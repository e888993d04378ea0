use crate::api::{catalog_error, ErrorResponse};
use crate::db::DbPool;
use crate::get_conn;
use crate::store::PgStore;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use foodgram_core::{catalog, Ingredient};
use std::sync::Arc;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/api/ingredients/{id}",
    tag = "ingredients",
    params(
        ("id" = Uuid, Path, description = "Ingredient ID")
    ),
    responses(
        (status = 200, description = "Ingredient", body = Ingredient),
        (status = 404, description = "Ingredient not found", body = ErrorResponse)
    )
)]
pub async fn get_ingredient(
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    match catalog::get_ingredient(&mut PgStore::new(&mut conn), id) {
        Ok(ingredient) => (StatusCode::OK, Json(ingredient)).into_response(),
        Err(e) => catalog_error(e),
    }
}
