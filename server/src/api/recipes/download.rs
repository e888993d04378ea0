use crate::api::{catalog_error, ErrorResponse};
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::store::PgStore;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
};
use foodgram_core::{shopping_list, PlainTextRenderer, ShoppingListRenderer};
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/recipes/download_shopping_cart",
    tag = "shopping_carts",
    responses(
        (status = 200, description = "Aggregated shopping list", content_type = "text/plain", body = String),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn download_shopping_cart(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    let items = match shopping_list::aggregate(&mut PgStore::new(&mut conn), user.id) {
        Ok(items) => items,
        Err(e) => return catalog_error(e),
    };

    let renderer = PlainTextRenderer;
    tracing::info!(user_id = %user.id, items = items.len(), "rendered shopping list");

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, renderer.content_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", renderer.file_name()),
            ),
        ],
        renderer.render(&items),
    )
        .into_response()
}
