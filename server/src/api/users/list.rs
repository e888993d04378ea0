use crate::api::{catalog_error, ErrorResponse, PageParams, PaginationMetadata};
use crate::auth::MaybeAuthUser;
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
use foodgram_core::{users, UserView};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ListUsersResponse {
    pub users: Vec<UserView>,
    pub pagination: PaginationMetadata,
}

#[utoipa::path(
    get,
    path = "/api/users",
    tag = "users",
    params(PageParams),
    responses(
        (status = 200, description = "Users ordered by username", body = ListUsersResponse),
        (status = 401, description = "Invalid token", body = ErrorResponse)
    )
)]
pub async fn list_users(
    MaybeAuthUser(viewer): MaybeAuthUser,
    State(pool): State<Arc<DbPool>>,
    State(config): State<Arc<ServerConfig>>,
    Query(params): Query<PageParams>,
) -> impl IntoResponse {
    let page = config.page(params.limit, params.offset, params.page);
    let mut conn = get_conn!(pool);

    match users::list_users(&mut PgStore::new(&mut conn), viewer.map(|u| u.id), page) {
        Ok(result) => (
            StatusCode::OK,
            Json(ListUsersResponse {
                pagination: PaginationMetadata::new(page, result.total),
                users: result.items,
            }),
        )
            .into_response(),
        Err(e) => catalog_error(e),
    }
}
