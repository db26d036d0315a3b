//! Integration tests for the catalog repositories: organizations, their
//! location, categories, menu items, and variants.

use menuboard_core::sync::snapshot::OpeningHours;
use menuboard_db::models::category::CreateCategory;
use menuboard_db::models::location::{CreateLocation, UpdateLocation};
use menuboard_db::models::menu::CreateMenu;
use menuboard_db::models::menu_item::{CreateMenuItem, CreateVariant};
use menuboard_db::models::organization::CreateOrganization;
use menuboard_db::repositories::{CategoryRepo, LocationRepo, MenuItemRepo, MenuRepo, OrganizationRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn new_organization(pool: &PgPool) -> i64 {
    OrganizationRepo::create(
        pool,
        &CreateOrganization {
            name: "Osteria".to_string(),
            logo_url: None,
            banner_url: None,
            billing_email: None,
        },
    )
    .await
    .unwrap()
    .id
}

fn hours(day: u8, opens: &str, closes: &str) -> OpeningHours {
    OpeningHours {
        day,
        opens: opens.to_string(),
        closes: closes.to_string(),
    }
}

fn new_item(
    organization_id: i64,
    category_id: Option<i64>,
    name: &str,
    position: i32,
) -> CreateMenuItem {
    CreateMenuItem {
        organization_id,
        category_id,
        name: name.to_string(),
        description: None,
        price_cents: Some(1000),
        image_url: None,
        is_featured: None,
        position: Some(position),
    }
}

// ---------------------------------------------------------------------------
// Locations
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_location_round_trip(pool: PgPool) {
    let org = new_organization(&pool).await;
    let created = LocationRepo::create(
        &pool,
        &CreateLocation {
            organization_id: org,
            address: Some("Via Roma 1".to_string()),
            phone: Some("+39 06 123".to_string()),
            hours: vec![hours(1, "12:00", "15:00"), hours(1, "19:00", "23:00")],
            dine_in: Some(true),
            takeout: None,
            delivery: None,
        },
    )
    .await
    .unwrap();

    assert!(created.dine_in);
    assert!(!created.takeout);

    let found = LocationRepo::find_by_id(&pool, created.id).await.unwrap().unwrap();
    assert_eq!(found.hours.0, created.hours.0);
    assert_eq!(found.hours.0.len(), 2);
    assert_eq!(found.hours.0[1].opens, "19:00");

    let by_org = LocationRepo::find_by_organization(&pool, org).await.unwrap().unwrap();
    assert_eq!(by_org.id, created.id);

    let updated = LocationRepo::update(
        &pool,
        created.id,
        &UpdateLocation {
            hours: Some(vec![hours(2, "18:00", "22:00")]),
            ..UpdateLocation::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.hours.0, vec![hours(2, "18:00", "22:00")]);
    assert_eq!(updated.phone.as_deref(), Some("+39 06 123"));

    assert!(LocationRepo::delete(&pool, created.id).await.unwrap());
    assert!(!LocationRepo::delete(&pool, created.id).await.unwrap());
    assert!(LocationRepo::find_by_organization(&pool, org).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_second_location_rejected(pool: PgPool) {
    let org = new_organization(&pool).await;
    let input = CreateLocation {
        organization_id: org,
        address: None,
        phone: None,
        hours: Vec::new(),
        dine_in: None,
        takeout: None,
        delivery: None,
    };
    LocationRepo::create(&pool, &input).await.unwrap();

    let err = LocationRepo::create(&pool, &input).await.unwrap_err();
    let db_err = err.as_database_error().expect("expected a database error");
    assert_eq!(db_err.code().as_deref(), Some("23505"));
    assert_eq!(db_err.constraint(), Some("uq_locations_organization_id"));
}

// ---------------------------------------------------------------------------
// Categories and items
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_items_by_category(pool: PgPool) {
    let org = new_organization(&pool).await;
    let category = CategoryRepo::create(
        &pool,
        &CreateCategory {
            organization_id: org,
            name: "Pasta".to_string(),
            description: None,
            position: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(
        CategoryRepo::find_by_id(&pool, category.id).await.unwrap().unwrap().name,
        "Pasta"
    );

    let second = MenuItemRepo::create(&pool, &new_item(org, Some(category.id), "Carbonara", 2))
        .await
        .unwrap();
    let first = MenuItemRepo::create(&pool, &new_item(org, Some(category.id), "Amatriciana", 1))
        .await
        .unwrap();
    MenuItemRepo::create(&pool, &new_item(org, None, "Focaccia", 0))
        .await
        .unwrap();

    let ids: Vec<i64> = MenuItemRepo::list_by_category(&pool, category.id)
        .await
        .unwrap()
        .iter()
        .map(|i| i.id)
        .collect();
    assert_eq!(ids, vec![first.id, second.id]);

    let found = MenuItemRepo::find_by_id(&pool, first.id).await.unwrap().unwrap();
    assert_eq!(found.category_id, Some(category.id));

    // Deleting the category leaves its items uncategorized.
    assert!(CategoryRepo::delete(&pool, category.id).await.unwrap());
    assert!(CategoryRepo::find_by_id(&pool, category.id).await.unwrap().is_none());
    let orphan = MenuItemRepo::find_by_id(&pool, first.id).await.unwrap().unwrap();
    assert_eq!(orphan.category_id, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_item_delete_takes_variants(pool: PgPool) {
    let org = new_organization(&pool).await;
    let item = MenuItemRepo::create(&pool, &new_item(org, None, "Pizza", 1))
        .await
        .unwrap();
    let small = MenuItemRepo::create_variant(
        &pool,
        &CreateVariant {
            menu_item_id: item.id,
            name: "Small".to_string(),
            price_cents: 800,
        },
    )
    .await
    .unwrap();
    MenuItemRepo::create_variant(
        &pool,
        &CreateVariant {
            menu_item_id: item.id,
            name: "Large".to_string(),
            price_cents: 1200,
        },
    )
    .await
    .unwrap();

    assert!(MenuItemRepo::delete_variant(&pool, small.id).await.unwrap());
    assert!(!MenuItemRepo::delete_variant(&pool, small.id).await.unwrap());
    let variants = MenuItemRepo::list_variants_by_organization(&pool, org).await.unwrap();
    assert_eq!(variants.len(), 1);
    assert_eq!(variants[0].name, "Large");

    assert!(MenuItemRepo::delete(&pool, item.id).await.unwrap());
    assert!(MenuItemRepo::find_by_id(&pool, item.id).await.unwrap().is_none());
    assert!(MenuItemRepo::list_variants_by_organization(&pool, org)
        .await
        .unwrap()
        .is_empty());
}

// ---------------------------------------------------------------------------
// Deletion
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_menu_delete(pool: PgPool) {
    let org = new_organization(&pool).await;
    let menu = MenuRepo::create(
        &pool,
        &CreateMenu {
            organization_id: org,
            name: "Lunch".to_string(),
            serial_data: None,
        },
    )
    .await
    .unwrap();

    assert!(MenuRepo::delete(&pool, menu.id).await.unwrap());
    assert!(MenuRepo::find_by_id(&pool, menu.id).await.unwrap().is_none());
    assert!(!MenuRepo::delete(&pool, menu.id).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_organization_delete_cascades(pool: PgPool) {
    let org = new_organization(&pool).await;
    let item = MenuItemRepo::create(&pool, &new_item(org, None, "Tiramisu", 1))
        .await
        .unwrap();
    let menu = MenuRepo::create(
        &pool,
        &CreateMenu {
            organization_id: org,
            name: "Dinner".to_string(),
            serial_data: None,
        },
    )
    .await
    .unwrap();

    assert!(OrganizationRepo::delete(&pool, org).await.unwrap());
    assert!(OrganizationRepo::find_by_id(&pool, org).await.unwrap().is_none());
    assert!(MenuItemRepo::find_by_id(&pool, item.id).await.unwrap().is_none());
    assert!(MenuRepo::find_by_id(&pool, menu.id).await.unwrap().is_none());
}
