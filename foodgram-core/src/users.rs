//! Account registration and viewer-relative user representations.

use uuid::Uuid;

use crate::error::CatalogError;
use crate::store::CatalogStore;
use crate::types::{Account, NewAccount, Page, Paginated, UserView};
use crate::validate;

/// Registration fields as submitted, before the password is hashed.
#[derive(Debug, Clone)]
pub struct Registration<'a> {
    pub email: &'a str,
    pub username: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub password: &'a str,
}

pub fn validate_registration(registration: &Registration<'_>) -> Result<(), CatalogError> {
    validate::email(registration.email)?;
    validate::username(registration.username)?;
    validate::person_name("First name", registration.first_name)?;
    validate::person_name("Last name", registration.last_name)?;
    validate::password(registration.password)
}

/// Store a new account. The caller validates and hashes beforehand.
pub fn register<S: CatalogStore>(
    store: &mut S,
    account: &NewAccount<'_>,
) -> Result<UserView, CatalogError> {
    let account = store.insert_account(account)?;
    tracing::info!(user_id = %account.id, username = %account.username, "registered user");
    Ok(UserView::new(account, false))
}

/// Attach `is_subscribed` for `viewer` to each account, preserving order.
pub fn views_for<S: CatalogStore>(
    store: &mut S,
    viewer: Option<Uuid>,
    accounts: Vec<Account>,
) -> Result<Vec<UserView>, CatalogError> {
    let followed = match viewer {
        Some(viewer) => {
            let ids: Vec<Uuid> = accounts.iter().map(|a| a.id).collect();
            store.followed_among(viewer, &ids)?
        }
        None => Default::default(),
    };

    Ok(accounts
        .into_iter()
        .map(|account| {
            let is_subscribed = followed.contains(&account.id);
            UserView::new(account, is_subscribed)
        })
        .collect())
}

pub fn get_user<S: CatalogStore>(
    store: &mut S,
    viewer: Option<Uuid>,
    id: Uuid,
) -> Result<UserView, CatalogError> {
    let account = store
        .account(id)?
        .ok_or_else(|| CatalogError::not_found("User not found"))?;
    let mut views = views_for(store, viewer, vec![account])?;
    views
        .pop()
        .ok_or_else(|| CatalogError::not_found("User not found"))
}

pub fn list_users<S: CatalogStore>(
    store: &mut S,
    viewer: Option<Uuid>,
    page: Page,
) -> Result<Paginated<UserView>, CatalogError> {
    let accounts = store.list_accounts(page)?;
    let total = accounts.total;
    let items = views_for(store, viewer, accounts.items)?;
    Ok(Paginated { items, total })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration<'a>(email: &'a str, username: &'a str) -> Registration<'a> {
        Registration {
            email,
            username,
            first_name: "Anna",
            last_name: "Cook",
            password: "secret",
        }
    }

    #[test]
    fn test_validate_registration() {
        assert!(validate_registration(&registration("anna@example.com", "anna")).is_ok());
        assert!(validate_registration(&registration("anna", "anna")).is_err());
        assert!(validate_registration(&registration("anna@example.com", "an na")).is_err());

        let mut missing_name = registration("anna@example.com", "anna");
        missing_name.last_name = " ";
        assert!(validate_registration(&missing_name).is_err());
    }
}
