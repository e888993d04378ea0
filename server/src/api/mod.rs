pub mod auth;
pub mod images;
pub mod ingredients;
pub mod recipes;
pub mod tags;
pub mod users;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use foodgram_core::{
    CatalogError, Ingredient, IngredientSpec, Page, RecipeIngredient, RecipeSummary, RecipeView,
    SubscriptionView, Tag, UserView,
};
use serde::{Deserialize, Serialize};
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{IntoParams, OpenApi, ToSchema};

/// Shared error response used by all endpoints
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Render a catalog error with its HTTP status.
pub fn catalog_error(e: CatalogError) -> Response {
    let status = match &e {
        CatalogError::Validation(_) => StatusCode::BAD_REQUEST,
        CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
        CatalogError::Conflict(_) => StatusCode::CONFLICT,
        CatalogError::Forbidden(_) => StatusCode::FORBIDDEN,
        CatalogError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let error = match e {
        CatalogError::Storage(detail) => {
            tracing::error!("Storage failure: {}", detail);
            "Internal server error".to_string()
        }
        other => other.to_string(),
    };

    (status, Json(ErrorResponse { error })).into_response()
}

/// Shorthand for a 400 with a message.
pub fn bad_request(message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct PageParams {
    /// Number of items to return (default: server page size, max: 100)
    pub limit: Option<i64>,
    /// Number of items to skip (default: 0)
    pub offset: Option<i64>,
    /// 1-based page number, used when `offset` is absent
    pub page: Option<i64>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaginationMetadata {
    /// Total number of items available
    pub total: i64,
    /// Number of items requested (limit)
    pub limit: i64,
    /// Number of items skipped (offset)
    pub offset: i64,
}

impl PaginationMetadata {
    pub fn new(page: Page, total: i64) -> Self {
        Self {
            total,
            limit: page.limit,
            offset: page.offset,
        }
    }
}

/// Generate the complete OpenAPI spec by merging all module specs
pub fn openapi() -> utoipa::openapi::OpenApi {
    // Base spec with shared components and security
    #[derive(OpenApi)]
    #[openapi(
        info(title = "Foodgram", description = "Recipe sharing API"),
        components(schemas(
            ErrorResponse,
            PaginationMetadata,
            UserView,
            Tag,
            Ingredient,
            IngredientSpec,
            RecipeIngredient,
            RecipeView,
            RecipeSummary,
            SubscriptionView,
        ))
    )]
    struct BaseApi;

    let mut spec = BaseApi::openapi();

    // Add security scheme
    if let Some(components) = spec.components.as_mut() {
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }

    // Merge in each module's spec
    let modules: Vec<utoipa::openapi::OpenApi> = vec![
        auth::ApiDoc::openapi(),
        users::ApiDoc::openapi(),
        tags::ApiDoc::openapi(),
        ingredients::ApiDoc::openapi(),
        recipes::ApiDoc::openapi(),
        images::ApiDoc::openapi(),
    ];

    for module_spec in modules {
        // Merge paths
        spec.paths.paths.extend(module_spec.paths.paths);

        // Merge components (schemas)
        if let Some(module_components) = module_spec.components {
            if let Some(spec_components) = spec.components.as_mut() {
                spec_components.schemas.extend(module_components.schemas);
            }
        }
    }

    spec
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_error_statuses() {
        let cases = [
            (CatalogError::validation("bad"), StatusCode::BAD_REQUEST),
            (CatalogError::not_found("gone"), StatusCode::NOT_FOUND),
            (CatalogError::conflict("dup"), StatusCode::CONFLICT),
            (CatalogError::forbidden("no"), StatusCode::FORBIDDEN),
            (
                CatalogError::Storage("disk".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (error, status) in cases {
            assert_eq!(catalog_error(error).status(), status);
        }
    }

    #[test]
    fn test_openapi_lists_every_module() {
        let spec = openapi();
        for path in [
            "/api/auth/token/login",
            "/api/users",
            "/api/users/{id}/subscribe",
            "/api/tags",
            "/api/ingredients/{id}",
            "/api/recipes",
            "/api/recipes/download_shopping_cart",
            "/api/recipes/{id}/favorite",
            "/api/images/{id}",
        ] {
            assert!(spec.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}
