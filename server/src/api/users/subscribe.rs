use crate::api::{catalog_error, ErrorResponse};
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::store::PgStore;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use foodgram_core::{subscriptions, SubscriptionView};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;
use uuid::Uuid;

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct RecipesLimitParams {
    /// Show at most this many recipes per author (digits only; anything else is ignored)
    pub recipes_limit: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/users/{id}/subscribe",
    tag = "subscriptions",
    params(
        ("id" = Uuid, Path, description = "Author ID"),
        RecipesLimitParams
    ),
    responses(
        (status = 201, description = "Subscribed", body = SubscriptionView),
        (status = 400, description = "Cannot subscribe to yourself", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 409, description = "Already subscribed", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn subscribe(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<Uuid>,
    Query(params): Query<RecipesLimitParams>,
) -> impl IntoResponse {
    let recipes_limit = subscriptions::parse_recipes_limit(params.recipes_limit.as_deref());
    let mut conn = get_conn!(pool);

    match subscriptions::subscribe(&mut PgStore::new(&mut conn), user.id, id, recipes_limit) {
        Ok(view) => (StatusCode::CREATED, Json(view)).into_response(),
        Err(e) => catalog_error(e),
    }
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}/subscribe",
    tag = "subscriptions",
    params(
        ("id" = Uuid, Path, description = "Author ID")
    ),
    responses(
        (status = 204, description = "Unsubscribed"),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 409, description = "Not subscribed", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn unsubscribe(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    match subscriptions::unsubscribe(&mut PgStore::new(&mut conn), user.id, id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => catalog_error(e),
    }
}
