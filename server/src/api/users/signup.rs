use crate::api::{catalog_error, ErrorResponse};
use crate::auth::hash_password;
use crate::config::ServerConfig;
use crate::db::DbPool;
use crate::get_conn;
use crate::store::PgStore;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use foodgram_core::users::{self, Registration};
use foodgram_core::{NewAccount, UserView};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SignupRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub password: String,
}

#[utoipa::path(
    post,
    path = "/api/users",
    tag = "users",
    request_body(content = SignupRequest, example = json!({
        "email": "cook@example.com",
        "username": "cook",
        "first_name": "Anna",
        "last_name": "Cook",
        "password": "password"
    })),
    responses(
        (status = 201, description = "User created successfully", body = UserView),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 409, description = "Email or username already taken", body = ErrorResponse)
    )
)]
pub async fn signup(
    State(pool): State<Arc<DbPool>>,
    State(config): State<Arc<ServerConfig>>,
    Json(req): Json<SignupRequest>,
) -> impl IntoResponse {
    let email = req.email.trim().to_lowercase();
    let registration = Registration {
        email: &email,
        username: req.username.trim(),
        first_name: req.first_name.trim(),
        last_name: req.last_name.trim(),
        password: &req.password,
    };
    if let Err(e) = users::validate_registration(&registration) {
        return catalog_error(e);
    }

    let password_hash = match hash_password(registration.password) {
        Ok(h) => h,
        Err(e) => {
            tracing::error!("Failed to hash password: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to hash password".to_string(),
                }),
            )
                .into_response();
        }
    };

    let account = NewAccount {
        email: registration.email,
        username: registration.username,
        first_name: registration.first_name,
        last_name: registration.last_name,
        password_hash: &password_hash,
        is_admin: config.is_admin_email(registration.email),
    };

    let mut conn = get_conn!(pool);
    match users::register(&mut PgStore::new(&mut conn), &account) {
        Ok(user) => (StatusCode::CREATED, Json::<UserView>(user)).into_response(),
        Err(e) => catalog_error(e),
    }
}
