use crate::db::DbPool;
use crate::models::{NewSession, User};
use crate::schema::{sessions, users};
use chrono::{Duration, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::crypto::{generate_token, hash_token};

/// Open a session for `user_id` and return its bearer token.
pub fn create_session(
    conn: &mut PgConnection,
    user_id: Uuid,
    lifetime_days: i64,
) -> Result<String, diesel::result::Error> {
    let token = generate_token();
    let token_hash = hash_token(&token);
    let expires_at = Utc::now() + Duration::days(lifetime_days);

    let new_session = NewSession {
        user_id,
        token_hash: &token_hash,
        expires_at,
    };

    diesel::insert_into(sessions::table)
        .values(&new_session)
        .execute(conn)?;

    Ok(token)
}

/// Revoke the session identified by `token`. Returns whether one existed.
pub fn delete_session(conn: &mut PgConnection, token: &str) -> Result<bool, diesel::result::Error> {
    let token_hash = hash_token(token);
    let deleted = diesel::delete(sessions::table.filter(sessions::token_hash.eq(&token_hash)))
        .execute(conn)?;
    Ok(deleted > 0)
}

pub async fn get_user_from_token(pool: &DbPool, token: &str) -> Option<User> {
    let mut conn = match pool.get() {
        Ok(conn) => conn,
        Err(e) => {
            tracing::error!("Failed to get database connection: {}", e);
            return None;
        }
    };
    let token_hash = hash_token(token);

    sessions::table
        .inner_join(users::table)
        .filter(sessions::token_hash.eq(&token_hash))
        .filter(sessions::expires_at.gt(Utc::now()))
        .select(User::as_select())
        .first(&mut conn)
        .ok()
}
