//! HTTP-level integration tests for menu endpoints.
//!
//! Prerequisite entities (organization, catalog, menus) are created via the
//! repository layer to keep tests focused on HTTP behaviour.

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use common::{body_json, build_test_app, build_test_app_with_source, get, post, post_json, put_json};
use menuboard_core::document::block::{CategoryProps, HeaderProps, TextProps};
use menuboard_core::document::{apply_all, serialize, Block, Document, Mutation};
use menuboard_core::error::CoreError;
use menuboard_core::sync::snapshot::LiveData;
use menuboard_core::sync::LiveDataSource;
use menuboard_core::types::DbId;
use menuboard_db::models::category::CreateCategory;
use menuboard_db::models::menu::{CreateMenu, Menu};
use menuboard_db::models::menu_item::{CreateMenuItem, UpdateMenuItem};
use menuboard_db::models::organization::CreateOrganization;
use menuboard_db::repositories::{
    CategoryRepo, LiveDataRepo, MenuItemRepo, MenuRepo, OrganizationRepo,
};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

struct DownSource;

#[async_trait]
impl LiveDataSource for DownSource {
    async fn fetch_live_data(&self, _organization_id: DbId) -> Result<LiveData, CoreError> {
        Err(CoreError::Internal("catalog database offline".into()))
    }
}

async fn new_organization(pool: &PgPool, name: &str) -> DbId {
    OrganizationRepo::create(
        pool,
        &CreateOrganization {
            name: name.to_string(),
            logo_url: None,
            banner_url: None,
            billing_email: None,
        },
    )
    .await
    .unwrap()
    .id
}

/// Seed one category with one item; returns the item id.
async fn seed_catalog(pool: &PgPool, organization_id: DbId) -> DbId {
    let category = CategoryRepo::create(
        pool,
        &CreateCategory {
            organization_id,
            name: "Mains".to_string(),
            description: None,
            position: None,
        },
    )
    .await
    .unwrap();
    MenuItemRepo::create(
        pool,
        &CreateMenuItem {
            organization_id,
            category_id: Some(category.id),
            name: "Lasagna".to_string(),
            description: None,
            price_cents: Some(1450),
            image_url: None,
            is_featured: None,
            position: None,
        },
    )
    .await
    .unwrap()
    .id
}

fn create(id: &str, parent: &str, block: Block) -> Mutation {
    Mutation::CreateNode {
        id: id.into(),
        parent: parent.into(),
        index: None,
        block,
    }
}

/// Header plus one category block bound to the current live data.
async fn bound_blob(pool: &PgPool, organization_id: DbId) -> String {
    let live = LiveDataRepo::load(pool, organization_id).await.unwrap();
    let category = &live.categories[0];
    let doc = apply_all(
        &Document::new(),
        vec![
            create(
                "header",
                "ROOT",
                Block::Header(HeaderProps {
                    organization: live.organization.clone(),
                    ..HeaderProps::default()
                }),
            ),
            create(
                "mains",
                "ROOT",
                Block::Category(CategoryProps {
                    data: Some(category.category.clone()),
                    menu_items: category.items.clone(),
                    ..CategoryProps::default()
                }),
            ),
        ],
    )
    .unwrap();
    serialize(&doc).unwrap()
}

async fn new_menu(pool: &PgPool, organization_id: DbId, serial_data: Option<String>) -> Menu {
    MenuRepo::create(
        pool,
        &CreateMenu {
            organization_id,
            name: "Dinner".to_string(),
            serial_data,
        },
    )
    .await
    .unwrap()
}

// ---------------------------------------------------------------------------
// Menu collection
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_menu_returns_201_draft(pool: PgPool) {
    let org = new_organization(&pool, "Osteria").await;
    let app = build_test_app(pool);

    let response = post_json(
        app,
        &format!("/api/v1/organizations/{org}/menus"),
        json!({ "name": "Brunch" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Brunch");
    assert_eq!(json["data"]["status_id"], 1);
    assert_eq!(json["data"]["organization_id"], org);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_menu_rejects_empty_name(pool: PgPool) {
    let org = new_organization(&pool, "Osteria").await;
    let app = build_test_app(pool);

    let response = post_json(
        app,
        &format!("/api/v1/organizations/{org}/menus"),
        json!({ "name": "" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_menu_rejects_corrupt_blob(pool: PgPool) {
    let org = new_organization(&pool, "Osteria").await;
    let app = build_test_app(pool.clone());

    let response = post_json(
        app,
        &format!("/api/v1/organizations/{org}/menus"),
        json!({ "name": "Broken", "serial_data": "not-a-document" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(MenuRepo::list_by_organization(&pool, org)
        .await
        .unwrap()
        .is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_menu_unknown_organization_returns_404(pool: PgPool) {
    let app = build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/organizations/999999/menus",
        json!({ "name": "Ghost" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_menus_is_scoped_to_organization(pool: PgPool) {
    let org = new_organization(&pool, "Osteria").await;
    let other = new_organization(&pool, "Taverna").await;
    new_menu(&pool, org, None).await;
    new_menu(&pool, other, None).await;
    let app = build_test_app(pool);

    let response = get(app, &format!("/api/v1/organizations/{org}/menus")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// Document load / save
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn unsaved_menu_loads_template(pool: PgPool) {
    let org = new_organization(&pool, "Osteria").await;
    let menu = new_menu(&pool, org, None).await;
    let app = build_test_app(pool);

    let response = get(app, &format!("/api/v1/menus/{}/document", menu.id)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["recovered"], false);
    assert_eq!(
        json["data"]["document"]["ROOT"]["type"]["resolvedName"],
        "Container"
    );
    assert_eq!(
        json["data"]["document"]["header"]["type"]["resolvedName"],
        "Header"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn corrupt_blob_loads_template_and_is_kept(pool: PgPool) {
    let org = new_organization(&pool, "Osteria").await;
    let menu = new_menu(&pool, org, Some("%%% garbage %%%".to_string())).await;
    let app = build_test_app(pool.clone());

    let response = get(app, &format!("/api/v1/menus/{}/document", menu.id)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["recovered"], true);
    assert!(json["data"]["error"].is_string());

    let stored = MenuRepo::find_by_id(&pool, menu.id).await.unwrap().unwrap();
    assert_eq!(stored.serial_data.as_deref(), Some("%%% garbage %%%"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn save_document_round_trips(pool: PgPool) {
    let org = new_organization(&pool, "Osteria").await;
    let menu = new_menu(&pool, org, None).await;
    let uri = format!("/api/v1/menus/{}/document", menu.id);

    // Load the template, add a text block in JSON form, and save it back.
    let json = body_json(get(build_test_app(pool.clone()), &uri).await).await;
    let mut document = json["data"]["document"].clone();
    document["ROOT"]["nodes"]
        .as_array_mut()
        .unwrap()
        .push(json!("welcome"));
    document["welcome"] = json!({
        "type": { "resolvedName": "Text" },
        "props": { "text": "Welcome!" },
        "parent": "ROOT"
    });

    let response = put_json(
        build_test_app(pool.clone()),
        &uri,
        json!({ "document": document }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(get(build_test_app(pool), &uri).await).await;
    assert_eq!(json["data"]["document"]["welcome"]["props"]["text"], "Welcome!");
    assert_eq!(json["data"]["document"]["welcome"]["props"]["fontSize"], 16);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn save_document_rejects_corrupt_blob(pool: PgPool) {
    let org = new_organization(&pool, "Osteria").await;
    let good = serialize(&Document::template()).unwrap();
    let menu = new_menu(&pool, org, Some(good.clone())).await;
    let app = build_test_app(pool.clone());

    let response = put_json(
        app,
        &format!("/api/v1/menus/{}/document", menu.id),
        json!({ "serial_data": "bm90IHpsaWI=" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let stored = MenuRepo::find_by_id(&pool, menu.id).await.unwrap().unwrap();
    assert_eq!(stored.serial_data, Some(good));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn save_document_rejects_inconsistent_tree(pool: PgPool) {
    let org = new_organization(&pool, "Osteria").await;
    let menu = new_menu(&pool, org, None).await;
    let app = build_test_app(pool);

    // "orphan" names a parent that does not list it.
    let document = json!({
        "ROOT": { "type": { "resolvedName": "Container" }, "nodes": [] },
        "orphan": {
            "type": { "resolvedName": "Text" },
            "props": { "text": "lost" },
            "parent": "ROOT"
        }
    });
    let response = put_json(
        app,
        &format!("/api/v1/menus/{}/document", menu.id),
        json!({ "document": document }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn save_document_requires_exactly_one_field(pool: PgPool) {
    let org = new_organization(&pool, "Osteria").await;
    let menu = new_menu(&pool, org, None).await;
    let app = build_test_app(pool);

    let response = put_json(app, &format!("/api/v1/menus/{}/document", menu.id), json!({})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

// ---------------------------------------------------------------------------
// Sync
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn sync_check_tracks_catalog_edits(pool: PgPool) {
    let org = new_organization(&pool, "Osteria").await;
    let item_id = seed_catalog(&pool, org).await;
    let blob = bound_blob(&pool, org).await;
    let menu = new_menu(&pool, org, Some(blob)).await;
    let sync_uri = format!("/api/v1/menus/{}/sync", menu.id);

    let json = body_json(get(build_test_app(pool.clone()), &sync_uri).await).await;
    assert_eq!(json["data"]["in_sync"], true);
    assert_eq!(json["data"]["verdict"], "in_sync");
    assert_eq!(json["data"]["recovered"], false);

    MenuItemRepo::update(
        &pool,
        item_id,
        &UpdateMenuItem {
            price_cents: Some(1550),
            ..UpdateMenuItem::default()
        },
    )
    .await
    .unwrap();

    let json = body_json(get(build_test_app(pool.clone()), &sync_uri).await).await;
    assert_eq!(json["data"]["in_sync"], false);

    // Reconcile: the result comes back but storage is untouched.
    let response = post(build_test_app(pool.clone()), &sync_uri).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["changed"], true);
    assert_eq!(
        json["data"]["document"]["mains"]["props"]["menuItems"][0]["priceCents"],
        1550
    );
    let repaired = json["data"]["serial_data"].as_str().unwrap().to_string();

    let json = body_json(get(build_test_app(pool.clone()), &sync_uri).await).await;
    assert_eq!(json["data"]["in_sync"], false);

    // Saving the repaired blob brings the stored document back in sync.
    let response = put_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/menus/{}/document", menu.id),
        json!({ "serial_data": repaired }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(get(build_test_app(pool.clone()), &sync_uri).await).await;
    assert_eq!(json["data"]["in_sync"], true);

    let json = body_json(post(build_test_app(pool), &sync_uri).await).await;
    assert_eq!(json["data"]["changed"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn sync_reports_503_when_live_data_unavailable(pool: PgPool) {
    let org = new_organization(&pool, "Osteria").await;
    seed_catalog(&pool, org).await;
    let blob = bound_blob(&pool, org).await;
    let menu = new_menu(&pool, org, Some(blob.clone())).await;
    let sync_uri = format!("/api/v1/menus/{}/sync", menu.id);

    let app = build_test_app_with_source(pool.clone(), Arc::new(DownSource));
    let response = get(app, &sync_uri).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAVAILABLE");

    let app = build_test_app_with_source(pool.clone(), Arc::new(DownSource));
    let response = post(app, &sync_uri).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let stored = MenuRepo::find_by_id(&pool, menu.id).await.unwrap().unwrap();
    assert_eq!(stored.serial_data, Some(blob));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn sync_on_corrupt_blob_is_flagged_recovered(pool: PgPool) {
    let org = new_organization(&pool, "Osteria").await;
    let menu = new_menu(&pool, org, Some("%%% garbage %%%".to_string())).await;
    let sync_uri = format!("/api/v1/menus/{}/sync", menu.id);

    let json = body_json(get(build_test_app(pool.clone()), &sync_uri).await).await;
    assert_eq!(json["data"]["recovered"], true);

    let json = body_json(post(build_test_app(pool.clone()), &sync_uri).await).await;
    assert_eq!(json["data"]["recovered"], true);

    let stored = MenuRepo::find_by_id(&pool, menu.id).await.unwrap().unwrap();
    assert_eq!(stored.serial_data.as_deref(), Some("%%% garbage %%%"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn sync_unknown_menu_returns_404(pool: PgPool) {
    let app = build_test_app(pool);
    let response = get(app, "/api/v1/menus/999999/sync").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Publication
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn publish_swaps_published_menu(pool: PgPool) {
    let org = new_organization(&pool, "Osteria").await;
    let a = new_menu(&pool, org, None).await;
    let b = new_menu(&pool, org, None).await;

    let response = post(build_test_app(pool.clone()), &format!("/api/v1/menus/{}/publish", a.id)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = post(build_test_app(pool.clone()), &format!("/api/v1/menus/{}/publish", b.id)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status_id"], 2);

    let json = body_json(get(build_test_app(pool.clone()), &format!("/api/v1/menus/{}", a.id)).await).await;
    assert_eq!(json["data"]["status_id"], 1);

    let response = post(build_test_app(pool.clone()), &format!("/api/v1/menus/{}/unpublish", b.id)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status_id"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn publish_unknown_menu_returns_404(pool: PgPool) {
    let app = build_test_app(pool);
    let response = post(app, "/api/v1/menus/999999/publish").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn public_menu_hides_hidden_blocks(pool: PgPool) {
    let org = new_organization(&pool, "Osteria").await;
    let doc = apply_all(
        &Document::template(),
        vec![
            create(
                "hello",
                "ROOT",
                Block::Text(TextProps {
                    text: "Hello".into(),
                    ..TextProps::default()
                }),
            ),
            create(
                "draft-note",
                "ROOT",
                Block::Text(TextProps {
                    text: "Not ready".into(),
                    ..TextProps::default()
                }),
            ),
            Mutation::SetHidden {
                id: "draft-note".into(),
                hidden: true,
            },
        ],
    )
    .unwrap();
    let menu = new_menu(&pool, org, Some(serialize(&doc).unwrap())).await;
    let public_uri = format!("/api/v1/public/organizations/{org}/menu");

    let response = get(build_test_app(pool.clone()), &public_uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    post(build_test_app(pool.clone()), &format!("/api/v1/menus/{}/publish", menu.id)).await;

    let response = get(build_test_app(pool), &public_uri).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["menu_id"], menu.id);

    let ids: Vec<&str> = json["data"]["blocks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["ROOT", "header", "hello"]);
}
