//! Input checks shared by the catalog operations.

use std::collections::HashSet;
use uuid::Uuid;

use crate::error::CatalogError;
use crate::types::IngredientSpec;

pub const MAX_NAME_LEN: usize = 200;
pub const MAX_SLUG_LEN: usize = 50;
pub const MAX_UNIT_LEN: usize = 10;
pub const MAX_USER_FIELD_LEN: usize = 150;
pub const MAX_EMAIL_LEN: usize = 254;

fn bounded(field: &str, value: &str, max: usize) -> Result<(), CatalogError> {
    if value.trim().is_empty() {
        return Err(CatalogError::validation(format!("{} cannot be empty", field)));
    }
    if value.chars().count() > max {
        return Err(CatalogError::validation(format!(
            "{} must be at most {} characters",
            field, max
        )));
    }
    Ok(())
}

pub fn recipe_name(name: &str) -> Result<(), CatalogError> {
    bounded("Recipe name", name, MAX_NAME_LEN)
}

pub fn recipe_text(text: &str) -> Result<(), CatalogError> {
    if text.trim().is_empty() {
        return Err(CatalogError::validation("Recipe text cannot be empty"));
    }
    Ok(())
}

pub fn cooking_time(minutes: i32) -> Result<(), CatalogError> {
    if minutes < 1 {
        return Err(CatalogError::validation(
            "Cooking time must be at least 1 minute",
        ));
    }
    Ok(())
}

pub fn tag_ids(ids: &[Uuid]) -> Result<(), CatalogError> {
    if ids.is_empty() {
        return Err(CatalogError::validation("Add at least one tag"));
    }
    let mut seen = HashSet::with_capacity(ids.len());
    for id in ids {
        if !seen.insert(id) {
            return Err(CatalogError::validation(format!(
                "Tag {} is listed more than once",
                id
            )));
        }
    }
    Ok(())
}

pub fn ingredient_specs(specs: &[IngredientSpec]) -> Result<(), CatalogError> {
    if specs.is_empty() {
        return Err(CatalogError::validation("Add at least one ingredient"));
    }
    let mut seen = HashSet::with_capacity(specs.len());
    for spec in specs {
        if spec.amount < 1 {
            return Err(CatalogError::validation(format!(
                "Amount of ingredient {} must be at least 1",
                spec.id
            )));
        }
        if !seen.insert(spec.id) {
            return Err(CatalogError::validation(format!(
                "Ingredient {} is listed more than once",
                spec.id
            )));
        }
    }
    Ok(())
}

pub fn tag_name(name: &str) -> Result<(), CatalogError> {
    bounded("Tag name", name, MAX_NAME_LEN)
}

pub fn slug(slug: &str) -> Result<(), CatalogError> {
    bounded("Slug", slug, MAX_SLUG_LEN)?;
    if !slug
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(CatalogError::validation(
            "Slug may only contain letters, digits, hyphens and underscores",
        ));
    }
    Ok(())
}

pub fn ingredient_fields(name: &str, measurement_unit: &str) -> Result<(), CatalogError> {
    bounded("Ingredient name", name, MAX_NAME_LEN)?;
    bounded("Measurement unit", measurement_unit, MAX_UNIT_LEN)
}

pub fn email(email: &str) -> Result<(), CatalogError> {
    bounded("Email", email, MAX_EMAIL_LEN)?;
    match email.split_once('@') {
        Some((local, domain))
            if !local.is_empty() && domain.contains('.') && !domain.contains('@') =>
        {
            Ok(())
        }
        _ => Err(CatalogError::validation("Enter a valid email address")),
    }
}

pub fn username(username: &str) -> Result<(), CatalogError> {
    bounded("Username", username, MAX_USER_FIELD_LEN)?;
    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '.' | '@' | '+' | '-' | '_'))
    {
        return Err(CatalogError::validation(
            "Username may only contain letters, digits and @/./+/-/_",
        ));
    }
    Ok(())
}

pub fn person_name(field: &str, value: &str) -> Result<(), CatalogError> {
    bounded(field, value, MAX_USER_FIELD_LEN)
}

pub fn password(password: &str) -> Result<(), CatalogError> {
    if password.is_empty() {
        return Err(CatalogError::validation("Password cannot be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(id: Uuid, amount: i32) -> IngredientSpec {
        IngredientSpec { id, amount }
    }

    #[test]
    fn test_cooking_time_bounds() {
        assert!(cooking_time(0).is_err());
        assert!(cooking_time(-5).is_err());
        assert!(cooking_time(1).is_ok());
    }

    #[test]
    fn test_tag_ids_rejects_empty_and_duplicates() {
        let id = Uuid::new_v4();
        assert!(matches!(tag_ids(&[]), Err(CatalogError::Validation(_))));
        assert!(matches!(tag_ids(&[id, id]), Err(CatalogError::Validation(_))));
        assert!(tag_ids(&[id, Uuid::new_v4()]).is_ok());
    }

    #[test]
    fn test_ingredient_specs() {
        let id = Uuid::new_v4();
        assert!(ingredient_specs(&[]).is_err());
        assert!(ingredient_specs(&[spec(id, 0)]).is_err());
        assert!(ingredient_specs(&[spec(id, 2), spec(id, 3)]).is_err());
        assert!(ingredient_specs(&[spec(id, 2), spec(Uuid::new_v4(), 3)]).is_ok());
    }

    #[test]
    fn test_duplicate_ingredient_message_names_id() {
        let id = Uuid::new_v4();
        let err = ingredient_specs(&[spec(id, 1), spec(id, 1)]).unwrap_err();
        assert!(err.to_string().contains(&id.to_string()));
    }

    #[test]
    fn test_slug() {
        assert!(slug("breakfast").is_ok());
        assert!(slug("late-night_snack2").is_ok());
        assert!(slug("with space").is_err());
        assert!(slug("").is_err());
        assert!(slug(&"a".repeat(51)).is_err());
    }

    #[test]
    fn test_name_length_counts_chars() {
        assert!(recipe_name(&"é".repeat(200)).is_ok());
        assert!(recipe_name(&"é".repeat(201)).is_err());
        assert!(recipe_name("   ").is_err());
    }

    #[test]
    fn test_email() {
        assert!(email("cook@example.com").is_ok());
        assert!(email("cook@localhost").is_err());
        assert!(email("@example.com").is_err());
        assert!(email("no-at-sign").is_err());
    }

    #[test]
    fn test_username() {
        assert!(username("chef.anna+1").is_ok());
        assert!(username("chef anna").is_err());
    }
}
