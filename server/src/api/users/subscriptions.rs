use crate::api::{catalog_error, ErrorResponse, PaginationMetadata};
use crate::auth::AuthUser;
use crate::config::ServerConfig;
use crate::db::DbPool;
use crate::get_conn;
use crate::store::PgStore;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use foodgram_core::{subscriptions, SubscriptionView};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListSubscriptionsParams {
    /// Number of authors to return (default: server page size, max: 100)
    pub limit: Option<i64>,
    /// Number of authors to skip (default: 0)
    pub offset: Option<i64>,
    /// 1-based page number, used when `offset` is absent
    pub page: Option<i64>,
    /// Show at most this many recipes per author (digits only; anything else is ignored)
    pub recipes_limit: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ListSubscriptionsResponse {
    pub subscriptions: Vec<SubscriptionView>,
    pub pagination: PaginationMetadata,
}

#[utoipa::path(
    get,
    path = "/api/users/subscriptions",
    tag = "subscriptions",
    params(ListSubscriptionsParams),
    responses(
        (status = 200, description = "Followed authors ordered by username", body = ListSubscriptionsResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_subscriptions(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    State(config): State<Arc<ServerConfig>>,
    Query(params): Query<ListSubscriptionsParams>,
) -> impl IntoResponse {
    let page = config.page(params.limit, params.offset, params.page);
    let recipes_limit = subscriptions::parse_recipes_limit(params.recipes_limit.as_deref());
    let mut conn = get_conn!(pool);

    match subscriptions::list_subscriptions(
        &mut PgStore::new(&mut conn),
        user.id,
        page,
        recipes_limit,
    ) {
        Ok(result) => (
            StatusCode::OK,
            Json(ListSubscriptionsResponse {
                pagination: PaginationMetadata::new(page, result.total),
                subscriptions: result.items,
            }),
        )
            .into_response(),
        Err(e) => catalog_error(e),
    }
}
