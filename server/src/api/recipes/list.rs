use crate::api::{bad_request, catalog_error, ErrorResponse, PaginationMetadata};
use crate::auth::MaybeAuthUser;
use crate::config::ServerConfig;
use crate::db::DbPool;
use crate::get_conn;
use crate::store::PgStore;
use axum::{
    extract::{RawQuery, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use foodgram_core::{recipes, RecipeFilter, RecipeView};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// Query parameters of the recipe list. `tags` may repeat, so the query
/// string is parsed by hand; this struct only documents the parameters.
#[derive(Debug, Deserialize, IntoParams)]
#[allow(dead_code)]
pub struct ListRecipesParams {
    /// Number of items to return (default: server page size, max: 100)
    pub limit: Option<i64>,
    /// Number of items to skip (default: 0)
    pub offset: Option<i64>,
    /// 1-based page number, used when `offset` is absent
    pub page: Option<i64>,
    /// Only recipes by this author
    pub author: Option<Uuid>,
    /// Tag slugs; a recipe matches if it has any of them.
    /// Repeat the parameter or separate slugs with commas.
    pub tags: Option<Vec<String>>,
    /// `1` or `true`: only recipes in the caller's favorites
    pub is_favorited: Option<String>,
    /// `1` or `true`: only recipes in the caller's shopping cart
    pub is_in_shopping_cart: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ListRecipesResponse {
    pub recipes: Vec<RecipeView>,
    pub pagination: PaginationMetadata,
}

/// Parsed list query
#[derive(Debug, Default, PartialEq, Eq)]
struct ListQuery {
    filter: RecipeFilter,
    limit: Option<i64>,
    offset: Option<i64>,
    page: Option<i64>,
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true")
}

fn parse_number(key: &str, value: &str) -> Result<i64, String> {
    value
        .trim()
        .parse()
        .map_err(|_| format!("Invalid {}: {}", key, value))
}

fn parse_list_query(raw: Option<&str>) -> Result<ListQuery, String> {
    let pairs: Vec<(String, String)> = match raw {
        Some(raw) => serde_urlencoded::from_str(raw)
            .map_err(|e| format!("Invalid query string: {}", e))?,
        None => Vec::new(),
    };

    let mut query = ListQuery::default();
    for (key, value) in pairs {
        match key.as_str() {
            "author" => {
                let author = value
                    .trim()
                    .parse::<Uuid>()
                    .map_err(|_| format!("Invalid author id: {}", value))?;
                query.filter.author = Some(author);
            }
            "tags" => {
                for slug in value.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                    if !query.filter.tags.iter().any(|t| t == slug) {
                        query.filter.tags.push(slug.to_string());
                    }
                }
            }
            "is_favorited" => query.filter.is_favorited = parse_flag(&value),
            "is_in_shopping_cart" => query.filter.is_in_shopping_cart = parse_flag(&value),
            "limit" => query.limit = Some(parse_number("limit", &value)?),
            "offset" => query.offset = Some(parse_number("offset", &value)?),
            "page" => query.page = Some(parse_number("page", &value)?),
            _ => {}
        }
    }

    Ok(query)
}

#[utoipa::path(
    get,
    path = "/api/recipes",
    tag = "recipes",
    params(ListRecipesParams),
    responses(
        (status = 200, description = "Recipes, newest first", body = ListRecipesResponse),
        (status = 400, description = "Invalid parameters", body = ErrorResponse),
        (status = 401, description = "Invalid token", body = ErrorResponse)
    )
)]
pub async fn list_recipes(
    MaybeAuthUser(viewer): MaybeAuthUser,
    State(pool): State<Arc<DbPool>>,
    State(config): State<Arc<ServerConfig>>,
    RawQuery(raw): RawQuery,
) -> impl IntoResponse {
    let query = match parse_list_query(raw.as_deref()) {
        Ok(q) => q,
        Err(message) => return bad_request(message),
    };
    let page = config.page(query.limit, query.offset, query.page);

    let mut conn = get_conn!(pool);

    match recipes::list_recipes(
        &mut PgStore::new(&mut conn),
        viewer.map(|u| u.id),
        query.filter,
        page,
    ) {
        Ok(result) => (
            StatusCode::OK,
            Json(ListRecipesResponse {
                pagination: PaginationMetadata::new(page, result.total),
                recipes: result.items,
            }),
        )
            .into_response(),
        Err(e) => catalog_error(e),
    }
}
