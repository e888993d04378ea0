//! Following authors and listing them with their recipes.

use uuid::Uuid;

use crate::error::CatalogError;
use crate::store::CatalogStore;
use crate::types::{Account, Page, Paginated, SubscriptionView};

/// Parse the `recipes_limit` query value. Anything but an all-digit string is
/// ignored, meaning no truncation.
pub fn parse_recipes_limit(raw: Option<&str>) -> Option<usize> {
    let raw = raw?.trim();
    if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

fn subscription_view<S: CatalogStore>(
    store: &mut S,
    author: Account,
    recipes_limit: Option<usize>,
) -> Result<SubscriptionView, CatalogError> {
    let recipes = store.author_recipes(author.id, recipes_limit)?;
    let recipes_count = store.count_author_recipes(author.id)?;
    Ok(SubscriptionView {
        id: author.id,
        email: author.email,
        username: author.username,
        first_name: author.first_name,
        last_name: author.last_name,
        is_subscribed: true,
        recipes,
        recipes_count,
    })
}

/// Follow an author. Following oneself is always a ValidationError.
pub fn subscribe<S: CatalogStore>(
    store: &mut S,
    follower: Uuid,
    author_id: Uuid,
    recipes_limit: Option<usize>,
) -> Result<SubscriptionView, CatalogError> {
    if follower == author_id {
        return Err(CatalogError::validation("You cannot subscribe to yourself"));
    }

    let author = store
        .account(author_id)?
        .ok_or_else(|| CatalogError::not_found("User not found"))?;

    if !store.insert_subscription(follower, author_id)? {
        return Err(CatalogError::conflict(
            "You are already subscribed to this user",
        ));
    }
    tracing::info!(follower_id = %follower, author_id = %author_id, "subscribed");

    subscription_view(store, author, recipes_limit)
}

pub fn unsubscribe<S: CatalogStore>(
    store: &mut S,
    follower: Uuid,
    author_id: Uuid,
) -> Result<(), CatalogError> {
    if store.account(author_id)?.is_none() {
        return Err(CatalogError::not_found("User not found"));
    }

    if !store.delete_subscription(follower, author_id)? {
        return Err(CatalogError::conflict("You are not subscribed to this user"));
    }
    tracing::info!(follower_id = %follower, author_id = %author_id, "unsubscribed");
    Ok(())
}

pub fn list_subscriptions<S: CatalogStore>(
    store: &mut S,
    follower: Uuid,
    page: Page,
    recipes_limit: Option<usize>,
) -> Result<Paginated<SubscriptionView>, CatalogError> {
    let authors = store.followed_authors(follower, page)?;
    let total = authors.total;
    let items = authors
        .items
        .into_iter()
        .map(|author| subscription_view(store, author, recipes_limit))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Paginated { items, total })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_recipes_limit() {
        assert_eq!(parse_recipes_limit(None), None);
        assert_eq!(parse_recipes_limit(Some("3")), Some(3));
        assert_eq!(parse_recipes_limit(Some("0")), Some(0));
        assert_eq!(parse_recipes_limit(Some("-1")), None);
        assert_eq!(parse_recipes_limit(Some("2.5")), None);
        assert_eq!(parse_recipes_limit(Some("abc")), None);
        assert_eq!(parse_recipes_limit(Some("")), None);
    }
}
