use crate::api::{catalog_error, ErrorResponse};
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::store::PgStore;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use foodgram_core::{catalog, Tag};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateTagRequest {
    pub name: String,
    /// Hex colour (`#RRGGBB` or `#RGB`) or a CSS3 colour name
    pub color: String,
    pub slug: String,
}

#[utoipa::path(
    post,
    path = "/api/tags",
    tag = "tags",
    request_body(content = CreateTagRequest, example = json!({"name": "Breakfast", "color": "#FF0000", "slug": "breakfast"})),
    responses(
        (status = 201, description = "Tag created", body = Tag),
        (status = 400, description = "Invalid name, slug or colour", body = ErrorResponse),
        (status = 403, description = "Administrators only", body = ErrorResponse),
        (status = 409, description = "Name, colour or slug already used", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_tag(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Json(req): Json<CreateTagRequest>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    match catalog::create_tag(
        &mut PgStore::new(&mut conn),
        &user.actor(),
        &req.name,
        &req.color,
        &req.slug,
    ) {
        Ok(tag) => (StatusCode::CREATED, Json(tag)).into_response(),
        Err(e) => catalog_error(e),
    }
}
