use crate::api::{catalog_error, ErrorResponse};
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::store::PgStore;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use foodgram_core::{catalog, Ingredient};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateIngredientRequest {
    pub name: String,
    /// e.g. "g", "ml", "pc"
    pub measurement_unit: String,
}

#[utoipa::path(
    post,
    path = "/api/ingredients",
    tag = "ingredients",
    request_body(content = CreateIngredientRequest, example = json!({"name": "flour", "measurement_unit": "g"})),
    responses(
        (status = 201, description = "Ingredient created", body = Ingredient),
        (status = 400, description = "Invalid name or unit", body = ErrorResponse),
        (status = 403, description = "Administrators only", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_ingredient(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Json(req): Json<CreateIngredientRequest>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    match catalog::create_ingredient(
        &mut PgStore::new(&mut conn),
        &user.actor(),
        &req.name,
        &req.measurement_unit,
    ) {
        Ok(ingredient) => (StatusCode::CREATED, Json(ingredient)).into_response(),
        Err(e) => catalog_error(e),
    }
}
