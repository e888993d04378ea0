pub mod get;
pub mod list;
pub mod me;
pub mod set_password;
pub mod signup;
pub mod subscribe;
pub mod subscriptions;

use crate::AppState;
use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /api/users endpoints (mounted at /api/users)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::list_users).post(signup::signup))
        .route("/me", get(me::me))
        .route("/set_password", post(set_password::set_password))
        .route("/subscriptions", get(subscriptions::list_subscriptions))
        .route("/{id}", get(get::get_user))
        .route(
            "/{id}/subscribe",
            post(subscribe::subscribe).delete(subscribe::unsubscribe),
        )
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list::list_users,
        signup::signup,
        me::me,
        set_password::set_password,
        subscriptions::list_subscriptions,
        get::get_user,
        subscribe::subscribe,
        subscribe::unsubscribe,
    ),
    components(schemas(
        list::ListUsersResponse,
        signup::SignupRequest,
        set_password::SetPasswordRequest,
        subscriptions::ListSubscriptionsResponse,
    ))
)]
pub struct ApiDoc;
