//! Shopping-list aggregation over the recipes in a user's cart.

use std::collections::BTreeMap;
use std::fmt::Write;
use uuid::Uuid;

use crate::error::CatalogError;
use crate::store::CatalogStore;
use crate::types::{CartLine, ShoppingListItem};

/// Sum amounts per (ingredient name, measurement unit).
///
/// The result is sorted by name using ordinal (byte-wise, case-sensitive)
/// string order, with ties broken by unit in the same order.
pub fn aggregate_lines(lines: impl IntoIterator<Item = CartLine>) -> Vec<ShoppingListItem> {
    let mut totals: BTreeMap<(String, String), i64> = BTreeMap::new();
    for line in lines {
        *totals
            .entry((line.name, line.measurement_unit))
            .or_insert(0) += i64::from(line.amount);
    }

    totals
        .into_iter()
        .map(|((name, measurement_unit), total_amount)| ShoppingListItem {
            name,
            measurement_unit,
            total_amount,
        })
        .collect()
}

/// Aggregated shopping list of the user's cart. Empty cart yields an empty list.
pub fn aggregate<S: CatalogStore>(
    store: &mut S,
    user: Uuid,
) -> Result<Vec<ShoppingListItem>, CatalogError> {
    let lines = store.cart_lines(user)?;
    Ok(aggregate_lines(lines))
}

/// Turns an aggregated shopping list into a downloadable document.
pub trait ShoppingListRenderer {
    fn content_type(&self) -> &'static str;
    fn file_name(&self) -> &'static str;
    fn render(&self, items: &[ShoppingListItem]) -> Vec<u8>;
}

/// Numbered UTF-8 text document, one ingredient per line.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextRenderer;

impl ShoppingListRenderer for PlainTextRenderer {
    fn content_type(&self) -> &'static str {
        "text/plain; charset=utf-8"
    }

    fn file_name(&self) -> &'static str {
        "shopping-list.txt"
    }

    fn render(&self, items: &[ShoppingListItem]) -> Vec<u8> {
        let mut out = String::from("Shopping list\n\n");
        if items.is_empty() {
            out.push_str("Your shopping cart is empty.\n");
        }
        for (number, item) in items.iter().enumerate() {
            // Writing into a String cannot fail.
            let _ = writeln!(
                out,
                "{}. {} - {} {}",
                number + 1,
                item.name,
                item.total_amount,
                item.measurement_unit
            );
        }
        out.into_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(name: &str, unit: &str, amount: i32) -> CartLine {
        CartLine {
            name: name.to_string(),
            measurement_unit: unit.to_string(),
            amount,
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(aggregate_lines(Vec::new()).is_empty());
    }

    #[test]
    fn test_sums_same_name_and_unit() {
        let items = aggregate_lines(vec![line("flour", "g", 500), line("flour", "g", 300)]);
        assert_eq!(
            items,
            vec![ShoppingListItem {
                name: "flour".to_string(),
                measurement_unit: "g".to_string(),
                total_amount: 800,
            }]
        );
    }

    #[test]
    fn test_units_are_distinct_groups() {
        let items = aggregate_lines(vec![line("milk", "ml", 200), line("milk", "cup", 1)]);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].measurement_unit, "cup");
        assert_eq!(items[1].measurement_unit, "ml");
    }

    #[test]
    fn test_ordinal_sort_is_case_sensitive() {
        let items = aggregate_lines(vec![
            line("sugar", "g", 1),
            line("Salt", "g", 1),
            line("apple", "pc", 1),
        ]);
        let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Salt", "apple", "sugar"]);
    }

    #[test]
    fn test_totals_do_not_overflow_i32() {
        let items = aggregate_lines(vec![line("water", "ml", i32::MAX), line("water", "ml", 1)]);
        assert_eq!(items[0].total_amount, i64::from(i32::MAX) + 1);
    }

    #[test]
    fn test_plain_text_rendering() {
        let items = aggregate_lines(vec![line("flour", "g", 800), line("eggs", "pc", 3)]);
        let text = String::from_utf8(PlainTextRenderer.render(&items)).unwrap();
        assert!(text.contains("1. eggs - 3 pc"));
        assert!(text.contains("2. flour - 800 g"));
    }

    #[test]
    fn test_plain_text_empty_cart() {
        let text = String::from_utf8(PlainTextRenderer.render(&[])).unwrap();
        assert!(text.contains("empty"));
    }
}
