//! Behavioural tests for the catalog operations, run against `MemoryStore`.

use foodgram_core::catalog;
use foodgram_core::image::{parse_image, stored_image_id};
use foodgram_core::recipes::{self, NewRecipe, RecipeFilter, RecipeUpdate};
use foodgram_core::relations;
use foodgram_core::shopping_list;
use foodgram_core::subscriptions;
use foodgram_core::users;
use foodgram_core::{
    Actor, CatalogError, CatalogStore, Ingredient, IngredientSpec, MemoryStore, NewAccount, Page,
    RecipeRelation, RecipeWrite, ShoppingListItem, Tag,
};
use std::collections::HashSet;
use uuid::Uuid;

struct Fixture {
    store: MemoryStore,
    admin: Actor,
    alice: Actor,
    bob: Actor,
}

fn account(store: &mut MemoryStore, name: &str, is_admin: bool) -> Actor {
    let email = format!("{}@example.com", name);
    store
        .insert_account(&NewAccount {
            email: &email,
            username: name,
            first_name: name,
            last_name: "Tester",
            password_hash: "x",
            is_admin,
        })
        .unwrap()
        .actor()
}

fn fixture() -> Fixture {
    let mut store = MemoryStore::new();
    let admin = account(&mut store, "admin", true);
    let alice = account(&mut store, "alice", false);
    let bob = account(&mut store, "bob", false);
    Fixture {
        store,
        admin,
        alice,
        bob,
    }
}

impl Fixture {
    fn tag(&mut self, name: &str, color: &str) -> Tag {
        catalog::create_tag(&mut self.store, &self.admin, name, color, name).unwrap()
    }

    fn ingredient(&mut self, name: &str, unit: &str) -> Ingredient {
        catalog::create_ingredient(&mut self.store, &self.admin, name, unit).unwrap()
    }

    fn recipe(
        &mut self,
        author: Actor,
        name: &str,
        tags: &[&Tag],
        ingredients: &[(&Ingredient, i32)],
    ) -> Uuid {
        let input = new_recipe(name, tags, ingredients);
        recipes::create_recipe(&mut self.store, &author, input)
            .unwrap()
            .id
    }
}

fn new_recipe(name: &str, tags: &[&Tag], ingredients: &[(&Ingredient, i32)]) -> NewRecipe {
    NewRecipe {
        name: name.to_string(),
        text: format!("How to make {}", name),
        cooking_time: 15,
        image: None,
        tags: tags.iter().map(|t| t.id).collect(),
        ingredients: ingredients
            .iter()
            .map(|(i, amount)| IngredientSpec {
                id: i.id,
                amount: *amount,
            })
            .collect(),
    }
}

fn page() -> Page {
    Page::new(100, 0)
}

// ---------------------------------------------------------------------------
// Recipe authoring
// ---------------------------------------------------------------------------

#[test]
fn test_create_then_read_back_matches_input() {
    let mut f = fixture();
    let breakfast = f.tag("breakfast", "#ff0000");
    let quick = f.tag("quick", "#0000ff");
    let flour = f.ingredient("flour", "g");
    let eggs = f.ingredient("eggs", "pc");

    let input = new_recipe("Pancakes", &[&quick, &breakfast], &[(&flour, 250), (&eggs, 2)]);
    let created = recipes::create_recipe(&mut f.store, &f.alice, input).unwrap();
    let read = recipes::get_recipe(&mut f.store, None, created.id).unwrap();

    let tag_ids: HashSet<Uuid> = read.tags.iter().map(|t| t.id).collect();
    assert_eq!(tag_ids, HashSet::from([breakfast.id, quick.id]));

    let lines: HashSet<(Uuid, i32)> = read.ingredients.iter().map(|i| (i.id, i.amount)).collect();
    assert_eq!(lines, HashSet::from([(flour.id, 250), (eggs.id, 2)]));

    assert_eq!(read.author.id, f.alice.id);
    assert_eq!(read.cooking_time, 15);
    assert!(!read.is_favorited);
    assert!(!read.is_in_shopping_cart);
}

#[test]
fn test_create_rejects_invalid_input() {
    let mut f = fixture();
    let tag = f.tag("dinner", "#008000");
    let salt = f.ingredient("salt", "g");

    let mut zero_time = new_recipe("Soup", &[&tag], &[(&salt, 1)]);
    zero_time.cooking_time = 0;
    let no_tags = new_recipe("Soup", &[], &[(&salt, 1)]);
    let no_ingredients = new_recipe("Soup", &[&tag], &[]);
    let repeated = new_recipe("Soup", &[&tag], &[(&salt, 1), (&salt, 2)]);
    let zero_amount = new_recipe("Soup", &[&tag], &[(&salt, 0)]);
    let repeated_tag = new_recipe("Soup", &[&tag, &tag], &[(&salt, 1)]);

    for input in [
        zero_time,
        no_tags,
        no_ingredients,
        repeated,
        zero_amount,
        repeated_tag,
    ] {
        let result = recipes::create_recipe(&mut f.store, &f.alice, input);
        assert!(
            matches!(result, Err(CatalogError::Validation(_))),
            "expected validation error, got {:?}",
            result
        );
    }

    let all = recipes::list_recipes(&mut f.store, None, RecipeFilter::default(), page()).unwrap();
    assert_eq!(all.total, 0);
    assert_eq!(f.store.recipe_ingredient_rows(), 0);
}

#[test]
fn test_unknown_ingredient_is_named_and_nothing_is_written() {
    let mut f = fixture();
    let tag = f.tag("dinner", "#008000");
    let salt = f.ingredient("salt", "g");
    let ghost = Uuid::new_v4();

    let mut input = new_recipe("Soup", &[&tag], &[(&salt, 1)]);
    input.ingredients.push(IngredientSpec {
        id: ghost,
        amount: 3,
    });

    match recipes::create_recipe(&mut f.store, &f.alice, input) {
        Err(CatalogError::Validation(message)) => assert!(message.contains(&ghost.to_string())),
        other => panic!("expected validation error, got {:?}", other),
    }
    assert_eq!(f.store.recipe_ingredient_rows(), 0);
    assert_eq!(f.store.count_author_recipes(f.alice.id).unwrap(), 0);
}

#[test]
fn test_unknown_tag_is_rejected() {
    let mut f = fixture();
    let salt = f.ingredient("salt", "g");
    let mut input = new_recipe("Soup", &[], &[(&salt, 1)]);
    input.tags.push(Uuid::new_v4());

    let result = recipes::create_recipe(&mut f.store, &f.alice, input);
    assert!(matches!(result, Err(CatalogError::Validation(_))));
}

#[test]
fn test_update_replaces_tags_and_ingredients() {
    let mut f = fixture();
    let lunch = f.tag("lunch", "#ffa500");
    let dinner = f.tag("dinner", "#008000");
    let rice = f.ingredient("rice", "g");
    let beans = f.ingredient("beans", "g");
    let id = f.recipe(f.alice, "Rice bowl", &[&lunch], &[(&rice, 200)]);

    let updated = recipes::update_recipe(
        &mut f.store,
        &f.alice,
        id,
        RecipeUpdate {
            cooking_time: Some(40),
            tags: Some(vec![dinner.id]),
            ingredients: Some(vec![IngredientSpec {
                id: beans.id,
                amount: 150,
            }]),
            ..Default::default()
        },
    )
    .unwrap();

    assert_eq!(updated.name, "Rice bowl");
    assert_eq!(updated.cooking_time, 40);
    assert_eq!(updated.tags, vec![dinner]);
    assert_eq!(updated.ingredients.len(), 1);
    assert_eq!(updated.ingredients[0].id, beans.id);
    assert_eq!(updated.ingredients[0].amount, 150);
}

#[test]
fn test_update_without_tags_leaves_recipe_unchanged() {
    let mut f = fixture();
    let lunch = f.tag("lunch", "#ffa500");
    let rice = f.ingredient("rice", "g");
    let id = f.recipe(f.alice, "Rice bowl", &[&lunch], &[(&rice, 200)]);

    let result = recipes::update_recipe(
        &mut f.store,
        &f.alice,
        id,
        RecipeUpdate {
            name: Some("Renamed".to_string()),
            tags: None,
            ingredients: Some(vec![IngredientSpec {
                id: rice.id,
                amount: 1,
            }]),
            ..Default::default()
        },
    );
    assert!(matches!(result, Err(CatalogError::Validation(_))));

    let stored = recipes::get_recipe(&mut f.store, None, id).unwrap();
    assert_eq!(stored.name, "Rice bowl");
    assert_eq!(stored.tags, vec![lunch]);
    assert_eq!(stored.ingredients[0].amount, 200);
}

#[test]
fn test_update_without_ingredients_is_rejected() {
    let mut f = fixture();
    let lunch = f.tag("lunch", "#ffa500");
    let rice = f.ingredient("rice", "g");
    let id = f.recipe(f.alice, "Rice bowl", &[&lunch], &[(&rice, 200)]);

    let result = recipes::update_recipe(
        &mut f.store,
        &f.alice,
        id,
        RecipeUpdate {
            tags: Some(vec![lunch.id]),
            ..Default::default()
        },
    );
    assert!(matches!(result, Err(CatalogError::Validation(_))));
}

#[test]
fn test_only_author_or_admin_may_change_a_recipe() {
    let mut f = fixture();
    let lunch = f.tag("lunch", "#ffa500");
    let rice = f.ingredient("rice", "g");
    let id = f.recipe(f.alice, "Rice bowl", &[&lunch], &[(&rice, 200)]);

    let update = RecipeUpdate {
        name: Some("Bob's bowl".to_string()),
        tags: Some(vec![lunch.id]),
        ingredients: Some(vec![IngredientSpec {
            id: rice.id,
            amount: 100,
        }]),
        ..Default::default()
    };

    let result = recipes::update_recipe(&mut f.store, &f.bob, id, update.clone());
    assert!(matches!(result, Err(CatalogError::Forbidden(_))));
    let result = recipes::delete_recipe(&mut f.store, &f.bob, id);
    assert!(matches!(result, Err(CatalogError::Forbidden(_))));

    // Authorization is checked before validation.
    let result = recipes::update_recipe(&mut f.store, &f.bob, id, RecipeUpdate::default());
    assert!(matches!(result, Err(CatalogError::Forbidden(_))));

    let updated = recipes::update_recipe(&mut f.store, &f.admin, id, update).unwrap();
    assert_eq!(updated.name, "Bob's bowl");
    recipes::delete_recipe(&mut f.store, &f.admin, id).unwrap();
}

#[test]
fn test_missing_recipe_is_not_found() {
    let mut f = fixture();
    let missing = Uuid::new_v4();
    assert!(matches!(
        recipes::get_recipe(&mut f.store, None, missing),
        Err(CatalogError::NotFound(_))
    ));
    assert!(matches!(
        recipes::delete_recipe(&mut f.store, &f.alice, missing),
        Err(CatalogError::NotFound(_))
    ));
}

fn png_data_uri() -> String {
    use base64::Engine;
    use std::io::Cursor;

    let mut png = Cursor::new(Vec::new());
    image::RgbImage::new(1, 1)
        .write_to(&mut png, image::ImageFormat::Png)
        .unwrap();
    let encoded = base64::engine::general_purpose::STANDARD.encode(png.get_ref());
    format!("data:image/png;base64,{}", encoded)
}

fn full_update(input: &NewRecipe, image: Option<String>) -> RecipeUpdate {
    RecipeUpdate {
        image,
        tags: Some(input.tags.clone()),
        ingredients: Some(input.ingredients.clone()),
        ..RecipeUpdate::default()
    }
}

#[test]
fn test_data_uri_image_is_stored_and_referenced() {
    let mut f = fixture();
    let tag = f.tag("dessert", "#ffc0cb");
    let sugar = f.ingredient("sugar", "g");

    let mut input = new_recipe("Fudge", &[&tag], &[(&sugar, 100)]);
    input.image = Some(png_data_uri());
    let created = recipes::create_recipe(&mut f.store, &f.alice, input).unwrap();

    let reference = created.image.unwrap();
    let image_id = stored_image_id(&reference).unwrap();
    assert_eq!(f.store.image(image_id).unwrap().content_type, "image/png");
}

#[test]
fn test_failed_recipe_write_keeps_no_image() {
    let mut f = fixture();
    let tag = f.tag("dessert", "#ffc0cb");

    let write = RecipeWrite {
        name: "Ghost".to_string(),
        text: "Never stored".to_string(),
        cooking_time: 5,
        image: parse_image(Some(&png_data_uri())).unwrap(),
        tags: vec![tag.id],
        ingredients: vec![IngredientSpec {
            id: Uuid::new_v4(),
            amount: 1,
        }],
    };
    assert!(matches!(
        f.store.insert_recipe(f.alice.id, &write),
        Err(CatalogError::Validation(_))
    ));
    assert_eq!(f.store.image_count(), 0);
}

#[test]
fn test_overlong_image_reference_is_a_validation_error() {
    let mut f = fixture();
    let tag = f.tag("dessert", "#ffc0cb");
    let sugar = f.ingredient("sugar", "g");

    let mut input = new_recipe("Fudge", &[&tag], &[(&sugar, 100)]);
    input.image = Some(format!("https://cdn.example.com/{}.png", "x".repeat(280)));
    assert!(matches!(
        recipes::create_recipe(&mut f.store, &f.alice, input),
        Err(CatalogError::Validation(_))
    ));
    assert!(recipes::list_recipes(&mut f.store, None, RecipeFilter::default(), page())
        .unwrap()
        .items
        .is_empty());
}

#[test]
fn test_replaced_and_deleted_images_are_released() {
    let mut f = fixture();
    let tag = f.tag("dessert", "#ffc0cb");
    let sugar = f.ingredient("sugar", "g");

    let mut input = new_recipe("Fudge", &[&tag], &[(&sugar, 100)]);
    input.image = Some(png_data_uri());
    let created = recipes::create_recipe(&mut f.store, &f.alice, input.clone()).unwrap();
    let first = stored_image_id(created.image.as_deref().unwrap()).unwrap();

    // Keeping the image untouched leaves it in place.
    let kept = recipes::update_recipe(
        &mut f.store,
        &f.alice,
        created.id,
        full_update(&input, None),
    )
    .unwrap();
    assert_eq!(kept.image, created.image);
    assert_eq!(f.store.image_count(), 1);

    let replaced = recipes::update_recipe(
        &mut f.store,
        &f.alice,
        created.id,
        full_update(&input, Some(png_data_uri())),
    )
    .unwrap();
    let second = stored_image_id(replaced.image.as_deref().unwrap()).unwrap();
    assert_ne!(first, second);
    assert!(f.store.image(first).is_none());
    assert_eq!(f.store.image_count(), 1);

    recipes::delete_recipe(&mut f.store, &f.alice, created.id).unwrap();
    assert_eq!(f.store.image_count(), 0);
}

#[test]
fn test_shared_image_survives_until_last_recipe_goes() {
    let mut f = fixture();
    let tag = f.tag("dessert", "#ffc0cb");
    let sugar = f.ingredient("sugar", "g");

    let mut input = new_recipe("Fudge", &[&tag], &[(&sugar, 100)]);
    input.image = Some(png_data_uri());
    let original = recipes::create_recipe(&mut f.store, &f.alice, input).unwrap();

    let mut copy = new_recipe("Fudge again", &[&tag], &[(&sugar, 120)]);
    copy.image = original.image.clone();
    let copy = recipes::create_recipe(&mut f.store, &f.bob, copy).unwrap();

    recipes::delete_recipe(&mut f.store, &f.alice, original.id).unwrap();
    assert_eq!(f.store.image_count(), 1);

    recipes::delete_recipe(&mut f.store, &f.bob, copy.id).unwrap();
    assert_eq!(f.store.image_count(), 0);
}

// ---------------------------------------------------------------------------
// Listing and filtering
// ---------------------------------------------------------------------------

#[test]
fn test_list_filters() {
    let mut f = fixture();
    let breakfast = f.tag("breakfast", "#ff0000");
    let dinner = f.tag("dinner", "#008000");
    let oats = f.ingredient("oats", "g");

    let porridge = f.recipe(f.alice, "Porridge", &[&breakfast], &[(&oats, 50)]);
    let stew = f.recipe(f.alice, "Stew", &[&dinner], &[(&oats, 10)]);
    let granola = f.recipe(f.bob, "Granola", &[&breakfast, &dinner], &[(&oats, 80)]);

    let ids = |store: &mut MemoryStore, viewer: Option<Uuid>, filter: RecipeFilter| {
        recipes::list_recipes(store, viewer, filter, page())
            .unwrap()
            .items
            .into_iter()
            .map(|r| r.id)
            .collect::<Vec<_>>()
    };

    // Newest first.
    assert_eq!(
        ids(&mut f.store, None, RecipeFilter::default()),
        vec![granola, stew, porridge]
    );

    let by_alice = RecipeFilter {
        author: Some(f.alice.id),
        ..Default::default()
    };
    assert_eq!(ids(&mut f.store, None, by_alice), vec![stew, porridge]);

    let breakfast_only = RecipeFilter {
        tags: vec!["breakfast".to_string()],
        ..Default::default()
    };
    assert_eq!(ids(&mut f.store, None, breakfast_only), vec![granola, porridge]);

    let either = RecipeFilter {
        tags: vec!["breakfast".to_string(), "dinner".to_string()],
        ..Default::default()
    };
    assert_eq!(ids(&mut f.store, None, either), vec![granola, stew, porridge]);

    relations::add(&mut f.store, RecipeRelation::Favorite, f.bob.id, stew).unwrap();
    relations::add(&mut f.store, RecipeRelation::ShoppingCart, f.bob.id, porridge).unwrap();

    let favorites = RecipeFilter {
        is_favorited: true,
        ..Default::default()
    };
    assert_eq!(ids(&mut f.store, Some(f.bob.id), favorites.clone()), vec![stew]);
    // Anonymous viewers get the unfiltered list.
    assert_eq!(ids(&mut f.store, None, favorites).len(), 3);

    let cart = RecipeFilter {
        is_in_shopping_cart: true,
        ..Default::default()
    };
    assert_eq!(ids(&mut f.store, Some(f.bob.id), cart), vec![porridge]);
}

#[test]
fn test_list_marks_viewer_relations_and_subscriptions() {
    let mut f = fixture();
    let tag = f.tag("snack", "#ffff00");
    let nuts = f.ingredient("nuts", "g");
    let id = f.recipe(f.alice, "Trail mix", &[&tag], &[(&nuts, 100)]);

    relations::add(&mut f.store, RecipeRelation::Favorite, f.bob.id, id).unwrap();
    subscriptions::subscribe(&mut f.store, f.bob.id, f.alice.id, None).unwrap();

    let as_bob = recipes::get_recipe(&mut f.store, Some(f.bob.id), id).unwrap();
    assert!(as_bob.is_favorited);
    assert!(!as_bob.is_in_shopping_cart);
    assert!(as_bob.author.is_subscribed);

    let anonymous = recipes::get_recipe(&mut f.store, None, id).unwrap();
    assert!(!anonymous.is_favorited);
    assert!(!anonymous.author.is_subscribed);
}

#[test]
fn test_pagination_reports_total() {
    let mut f = fixture();
    let tag = f.tag("snack", "#ffff00");
    let nuts = f.ingredient("nuts", "g");
    for n in 0..5 {
        f.recipe(f.alice, &format!("Mix {}", n), &[&tag], &[(&nuts, 10)]);
    }

    let second =
        recipes::list_recipes(&mut f.store, None, RecipeFilter::default(), Page::new(2, 2))
            .unwrap();
    assert_eq!(second.total, 5);
    let names: Vec<String> = second.items.into_iter().map(|r| r.name).collect();
    assert_eq!(names, vec!["Mix 2", "Mix 1"]);
}

// ---------------------------------------------------------------------------
// Favorite / shopping cart toggles
// ---------------------------------------------------------------------------

#[test]
fn test_toggle_lifecycle_for_both_relations() {
    for relation in [RecipeRelation::Favorite, RecipeRelation::ShoppingCart] {
        let mut f = fixture();
        let tag = f.tag("lunch", "#ffa500");
        let rice = f.ingredient("rice", "g");
        let id = f.recipe(f.alice, "Rice bowl", &[&tag], &[(&rice, 200)]);

        let summary = relations::add(&mut f.store, relation, f.bob.id, id).unwrap();
        assert_eq!(summary.id, id);
        assert_eq!(summary.name, "Rice bowl");
        assert_eq!(summary.cooking_time, 15);

        assert!(matches!(
            relations::add(&mut f.store, relation, f.bob.id, id),
            Err(CatalogError::Conflict(_))
        ));

        relations::remove(&mut f.store, relation, f.bob.id, id).unwrap();
        assert!(matches!(
            relations::remove(&mut f.store, relation, f.bob.id, id),
            Err(CatalogError::Conflict(_))
        ));
    }
}

#[test]
fn test_relations_are_independent() {
    let mut f = fixture();
    let tag = f.tag("lunch", "#ffa500");
    let rice = f.ingredient("rice", "g");
    let id = f.recipe(f.alice, "Rice bowl", &[&tag], &[(&rice, 200)]);

    relations::add(&mut f.store, RecipeRelation::Favorite, f.bob.id, id).unwrap();
    relations::add(&mut f.store, RecipeRelation::ShoppingCart, f.bob.id, id).unwrap();
    relations::add(&mut f.store, RecipeRelation::Favorite, f.alice.id, id).unwrap();

    assert_eq!(f.store.relation_rows(RecipeRelation::Favorite), 2);
    assert_eq!(f.store.relation_rows(RecipeRelation::ShoppingCart), 1);
}

#[test]
fn test_toggle_on_missing_recipe_is_not_found() {
    let mut f = fixture();
    let missing = Uuid::new_v4();
    assert!(matches!(
        relations::add(&mut f.store, RecipeRelation::Favorite, f.bob.id, missing),
        Err(CatalogError::NotFound(_))
    ));
    assert!(matches!(
        relations::remove(&mut f.store, RecipeRelation::ShoppingCart, f.bob.id, missing),
        Err(CatalogError::NotFound(_))
    ));
}

// ---------------------------------------------------------------------------
// Shopping list
// ---------------------------------------------------------------------------

#[test]
fn test_empty_cart_yields_empty_list() {
    let mut f = fixture();
    assert!(shopping_list::aggregate(&mut f.store, f.bob.id)
        .unwrap()
        .is_empty());
}

#[test]
fn test_aggregates_across_recipes_in_cart() {
    let mut f = fixture();
    let tag = f.tag("baking", "#d2691e");
    let flour = f.ingredient("flour", "g");
    let butter = f.ingredient("butter", "g");
    let a = f.recipe(f.alice, "Bread", &[&tag], &[(&flour, 500)]);
    let b = f.recipe(f.alice, "Cake", &[&tag], &[(&flour, 300), (&butter, 100)]);
    let c = f.recipe(f.alice, "Cookies", &[&tag], &[(&flour, 1000)]);

    relations::add(&mut f.store, RecipeRelation::ShoppingCart, f.bob.id, a).unwrap();
    relations::add(&mut f.store, RecipeRelation::ShoppingCart, f.bob.id, b).unwrap();
    // In alice's cart only.
    relations::add(&mut f.store, RecipeRelation::ShoppingCart, f.alice.id, c).unwrap();

    let list = shopping_list::aggregate(&mut f.store, f.bob.id).unwrap();
    assert_eq!(
        list,
        vec![
            ShoppingListItem {
                name: "butter".to_string(),
                measurement_unit: "g".to_string(),
                total_amount: 100,
            },
            ShoppingListItem {
                name: "flour".to_string(),
                measurement_unit: "g".to_string(),
                total_amount: 800,
            },
        ]
    );
}

#[test]
fn test_same_name_different_units_stay_separate() {
    let mut f = fixture();
    let tag = f.tag("drinks", "#add8e6");
    let milk_ml = f.ingredient("milk", "ml");
    let milk_cup = f.ingredient("milk", "cup");
    let a = f.recipe(f.alice, "Latte", &[&tag], &[(&milk_ml, 200)]);
    let b = f.recipe(f.alice, "Cocoa", &[&tag], &[(&milk_cup, 1)]);

    relations::add(&mut f.store, RecipeRelation::ShoppingCart, f.bob.id, a).unwrap();
    relations::add(&mut f.store, RecipeRelation::ShoppingCart, f.bob.id, b).unwrap();

    let list = shopping_list::aggregate(&mut f.store, f.bob.id).unwrap();
    assert_eq!(list.len(), 2);
    assert!(list.iter().all(|item| item.name == "milk"));
}

// ---------------------------------------------------------------------------
// Deletion rules
// ---------------------------------------------------------------------------

#[test]
fn test_ingredient_in_use_cannot_be_deleted() {
    let mut f = fixture();
    let tag = f.tag("lunch", "#ffa500");
    let rice = f.ingredient("rice", "g");
    let unused = f.ingredient("saffron", "g");
    f.recipe(f.alice, "Rice bowl", &[&tag], &[(&rice, 200)]);

    assert!(matches!(
        catalog::delete_ingredient(&mut f.store, &f.admin, rice.id),
        Err(CatalogError::Conflict(_))
    ));
    assert!(catalog::get_ingredient(&mut f.store, rice.id).is_ok());

    catalog::delete_ingredient(&mut f.store, &f.admin, unused.id).unwrap();
    assert!(matches!(
        catalog::delete_ingredient(&mut f.store, &f.admin, unused.id),
        Err(CatalogError::NotFound(_))
    ));
}

#[test]
fn test_deleting_recipe_cascades() {
    let mut f = fixture();
    let tag = f.tag("lunch", "#ffa500");
    let rice = f.ingredient("rice", "g");
    let beans = f.ingredient("beans", "g");
    let id = f.recipe(f.alice, "Rice bowl", &[&tag], &[(&rice, 200), (&beans, 50)]);

    relations::add(&mut f.store, RecipeRelation::Favorite, f.bob.id, id).unwrap();
    relations::add(&mut f.store, RecipeRelation::ShoppingCart, f.bob.id, id).unwrap();
    assert_eq!(f.store.recipe_ingredient_rows(), 2);

    recipes::delete_recipe(&mut f.store, &f.alice, id).unwrap();

    assert_eq!(f.store.recipe_ingredient_rows(), 0);
    assert_eq!(f.store.relation_rows(RecipeRelation::Favorite), 0);
    assert_eq!(f.store.relation_rows(RecipeRelation::ShoppingCart), 0);
    assert!(shopping_list::aggregate(&mut f.store, f.bob.id)
        .unwrap()
        .is_empty());

    // The ingredient is free again.
    catalog::delete_ingredient(&mut f.store, &f.admin, rice.id).unwrap();
}

// ---------------------------------------------------------------------------
// Subscriptions
// ---------------------------------------------------------------------------

#[test]
fn test_cannot_follow_self() {
    let mut f = fixture();
    assert!(matches!(
        subscriptions::subscribe(&mut f.store, f.alice.id, f.alice.id, None),
        Err(CatalogError::Validation(_))
    ));

    subscriptions::subscribe(&mut f.store, f.alice.id, f.bob.id, None).unwrap();
    assert!(matches!(
        subscriptions::subscribe(&mut f.store, f.alice.id, f.alice.id, None),
        Err(CatalogError::Validation(_))
    ));
}

#[test]
fn test_subscription_lifecycle() {
    let mut f = fixture();

    let view = subscriptions::subscribe(&mut f.store, f.bob.id, f.alice.id, None).unwrap();
    assert_eq!(view.id, f.alice.id);
    assert!(view.is_subscribed);

    assert!(matches!(
        subscriptions::subscribe(&mut f.store, f.bob.id, f.alice.id, None),
        Err(CatalogError::Conflict(_))
    ));

    subscriptions::unsubscribe(&mut f.store, f.bob.id, f.alice.id).unwrap();
    assert!(matches!(
        subscriptions::unsubscribe(&mut f.store, f.bob.id, f.alice.id),
        Err(CatalogError::Conflict(_))
    ));

    assert!(matches!(
        subscriptions::subscribe(&mut f.store, f.bob.id, Uuid::new_v4(), None),
        Err(CatalogError::NotFound(_))
    ));
}

#[test]
fn test_list_subscriptions_truncates_recipes_but_not_count() {
    let mut f = fixture();
    let tag = f.tag("snack", "#ffff00");
    let nuts = f.ingredient("nuts", "g");
    let first = f.recipe(f.alice, "First", &[&tag], &[(&nuts, 1)]);
    let second = f.recipe(f.alice, "Second", &[&tag], &[(&nuts, 1)]);
    let third = f.recipe(f.alice, "Third", &[&tag], &[(&nuts, 1)]);
    f.recipe(f.admin, "Admin snack", &[&tag], &[(&nuts, 1)]);

    subscriptions::subscribe(&mut f.store, f.bob.id, f.alice.id, None).unwrap();
    subscriptions::subscribe(&mut f.store, f.bob.id, f.admin.id, None).unwrap();

    let limited = subscriptions::list_subscriptions(&mut f.store, f.bob.id, page(), Some(2)).unwrap();
    assert_eq!(limited.total, 2);
    // Ordered by username: admin, alice.
    assert_eq!(limited.items[0].id, f.admin.id);
    let alice = &limited.items[1];
    assert_eq!(alice.id, f.alice.id);
    assert_eq!(alice.recipes_count, 3);
    let recent: Vec<Uuid> = alice.recipes.iter().map(|r| r.id).collect();
    assert_eq!(recent, vec![third, second]);

    let unlimited = subscriptions::list_subscriptions(&mut f.store, f.bob.id, page(), None).unwrap();
    let all: Vec<Uuid> = unlimited.items[1].recipes.iter().map(|r| r.id).collect();
    assert_eq!(all, vec![third, second, first]);

    let none_of_them =
        subscriptions::list_subscriptions(&mut f.store, f.bob.id, page(), Some(0)).unwrap();
    assert!(none_of_them.items[1].recipes.is_empty());
    assert_eq!(none_of_them.items[1].recipes_count, 3);
}

// ---------------------------------------------------------------------------
// Tags, ingredients and accounts
// ---------------------------------------------------------------------------

#[test]
fn test_tag_uniqueness_and_admin_only() {
    let mut f = fixture();
    let tag = f.tag("breakfast", "#FF0000");
    assert_eq!(tag.color, "red");

    assert!(matches!(
        catalog::create_tag(&mut f.store, &f.admin, "brunch", "red", "brunch"),
        Err(CatalogError::Conflict(_))
    ));
    assert!(matches!(
        catalog::create_tag(&mut f.store, &f.admin, "breakfast", "#0000ff", "other"),
        Err(CatalogError::Conflict(_))
    ));
    assert!(matches!(
        catalog::create_tag(&mut f.store, &f.admin, "other", "#0000ff", "breakfast"),
        Err(CatalogError::Conflict(_))
    ));
    assert!(matches!(
        catalog::create_tag(&mut f.store, &f.alice, "lunch", "#ffa500", "lunch"),
        Err(CatalogError::Forbidden(_))
    ));
    assert!(matches!(
        catalog::create_ingredient(&mut f.store, &f.alice, "salt", "g"),
        Err(CatalogError::Forbidden(_))
    ));
}

#[test]
fn test_colour_aliases_share_one_stored_value() {
    let mut f = fixture();
    let sea = f.tag("seafood", "cyan");
    assert_eq!(sea.color, "aqua");

    assert!(matches!(
        catalog::create_tag(&mut f.store, &f.admin, "pool", "#00FFFF", "pool"),
        Err(CatalogError::Conflict(_))
    ));

    let long = f.tag("citrus", "#fafad2");
    assert_eq!(long.color, "lightgoldenrodyellow");
}

#[test]
fn test_ingredient_prefix_filter_is_case_insensitive() {
    let mut f = fixture();
    f.ingredient("Sugar", "g");
    f.ingredient("sunflower oil", "ml");
    f.ingredient("salt", "g");
    f.ingredient("brown sugar", "g");

    let found = catalog::list_ingredients(&mut f.store, Some("SU")).unwrap();
    let names: Vec<&str> = found.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["Sugar", "sunflower oil"]);

    assert_eq!(catalog::list_ingredients(&mut f.store, None).unwrap().len(), 4);
    assert_eq!(catalog::list_ingredients(&mut f.store, Some("  ")).unwrap().len(), 4);
}

#[test]
fn test_duplicate_accounts_conflict() {
    let mut f = fixture();
    let duplicate_email = NewAccount {
        email: "alice@example.com",
        username: "alice2",
        first_name: "A",
        last_name: "B",
        password_hash: "x",
        is_admin: false,
    };
    assert!(matches!(
        users::register(&mut f.store, &duplicate_email),
        Err(CatalogError::Conflict(_))
    ));

    let users = users::list_users(&mut f.store, Some(f.bob.id), page()).unwrap();
    assert_eq!(users.total, 3);
    assert!(users.items.iter().all(|u| !u.is_subscribed));
}
