#![allow(clippy::unwrap_used)]
// End-to-end load tests for `Catalog` against a wiremock API.

use serde_json::{Value, json};
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use stocklist_core::{
    Availability, Catalog, CatalogConfig, Category, LoadFailure, LoadPhase, ProductId, StockLevel,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Catalog) {
    let server = MockServer::start().await;
    let config = CatalogConfig::new(Url::parse(&server.uri()).unwrap());
    let catalog = Catalog::new(config).unwrap();
    (server, catalog)
}

fn product(id: &str, name: &str, category: &str, manufacturer: &str) -> Value {
    json!({
        "id": id,
        "type": category,
        "name": name,
        "color": ["black"],
        "price": 42,
        "manufacturer": manufacturer
    })
}

fn payload(status: &str) -> String {
    format!(
        "<AVAILABILITY>\n  <CODE>200</CODE>\n  <INSTOCKVALUE>{status}</INSTOCKVALUE>\n</AVAILABILITY>"
    )
}

async fn mount_products(server: &MockServer, category: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/products/{category}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_availability(server: &MockServer, manufacturer: &str, response: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/availability/{manufacturer}")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "code": 200, "response": response })),
        )
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_happy_catalog(server: &MockServer) {
    mount_products(
        server,
        "jackets",
        json!([
            product("j1", "BEAUTY", "jackets", "reps"),
            product("j2", "ALPHA", "jackets", "reps")
        ]),
    )
    .await;
    mount_products(
        server,
        "shirts",
        json!([product("s1", "SHIRTY", "shirts", "abiplos")]),
    )
    .await;
    mount_products(
        server,
        "accessories",
        json!([
            product("a1", "ANKLET", "accessories", "reps"),
            product("a2", "AMULET", "accessories", "abiplos"),
            product("a3", "ARMBAND", "accessories", "reps")
        ]),
    )
    .await;
    mount_availability(
        server,
        "reps",
        json!([
            { "id": "J1", "DATAPAYLOAD": payload("INSTOCK") },
            { "id": "J2", "DATAPAYLOAD": payload("LESSTHAN10") },
            { "id": "A1", "DATAPAYLOAD": payload("OUTOFSTOCK") }
        ]),
    )
    .await;
    mount_availability(
        server,
        "abiplos",
        json!([
            { "id": "S1", "DATAPAYLOAD": payload("INSTOCK") },
            { "id": "A2", "DATAPAYLOAD": payload("INSTOCK") },
            { "id": "ZZ", "DATAPAYLOAD": payload("INSTOCK") }
        ]),
    )
    .await;
}

// ── Load tests ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_full_load_groups_and_merges() {
    let (server, catalog) = setup().await;
    mount_happy_catalog(&server).await;

    let report = catalog.load().await;

    assert!(report.is_complete(), "unexpected failures: {report:?}");
    assert_eq!(
        report.categories,
        vec![Category::Jackets, Category::Shirts, Category::Accessories]
    );
    assert_eq!(catalog.manufacturers().as_slice(), ["reps", "abiplos"]);
    assert_eq!(catalog.failure(), None);
    assert_eq!(catalog.phase(), LoadPhase::Loaded);

    let jackets = catalog.grouped(Category::Jackets).unwrap();
    assert_eq!(jackets.letters(), vec!['A', 'B']);

    let table = catalog.availability();
    let alpha = table.lookup("reps", &ProductId::from("j2"));
    assert_eq!(alpha.level(), Some(StockLevel::LessThan10));
    let shirt = table.lookup("abiplos", &ProductId::from("s1"));
    assert_eq!(shirt.level(), Some(StockLevel::InStock));
    // Loaded manufacturer that does not list the product
    assert_eq!(
        table.lookup("reps", &ProductId::from("a3")),
        Availability::NotListed
    );
}

#[tokio::test]
async fn test_category_failure_sets_data_flag_and_keeps_others() {
    let (server, catalog) = setup().await;
    mount_products(&server, "jackets", json!([product("j1", "BEAUTY", "jackets", "reps")])).await;
    Mock::given(method("GET"))
        .and(path("/products/shirts"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_products(
        &server,
        "accessories",
        json!([product("a1", "ANKLET", "accessories", "reps")]),
    )
    .await;
    mount_availability(&server, "reps", json!([{ "id": "A1", "DATAPAYLOAD": payload("INSTOCK") }]))
        .await;

    let mut report = catalog.load().await;

    assert_eq!(catalog.failure(), Some(LoadFailure::Data));
    assert!(catalog.grouped(Category::Shirts).is_none());
    assert!(catalog.grouped(Category::Jackets).is_some());
    assert!(report.take_category_error(Category::Shirts).is_some());
    assert_eq!(report.manufacturers, vec!["reps"]);
}

#[tokio::test]
async fn test_sentinel_sets_availability_flag() {
    let (server, catalog) = setup().await;
    mount_products(&server, "jackets", json!([])).await;
    mount_products(&server, "shirts", json!([])).await;
    mount_products(
        &server,
        "accessories",
        json!([
            product("a1", "ANKLET", "accessories", "reps"),
            product("a2", "AMULET", "accessories", "okkau")
        ]),
    )
    .await;
    mount_availability(&server, "reps", json!("[]")).await;
    mount_availability(&server, "okkau", json!([{ "id": "A2", "DATAPAYLOAD": payload("INSTOCK") }]))
        .await;

    let report = catalog.load().await;

    assert_eq!(report.sentinels, vec!["reps"]);
    assert_eq!(catalog.failure(), Some(LoadFailure::Availability));

    let table = catalog.availability();
    // Sentinel merges an empty table, so the manufacturer reads as loaded
    assert!(table.is_loaded("reps"));
    assert_eq!(
        table.lookup("reps", &ProductId::from("a1")),
        Availability::NotListed
    );
    assert_eq!(
        table.lookup("okkau", &ProductId::from("A2")).level(),
        Some(StockLevel::InStock)
    );
}

#[tokio::test]
async fn test_failed_manufacturer_reads_as_loading() {
    let (server, catalog) = setup().await;
    mount_products(&server, "jackets", json!([])).await;
    mount_products(&server, "shirts", json!([])).await;
    mount_products(
        &server,
        "accessories",
        json!([product("a1", "ANKLET", "accessories", "reps")]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/availability/reps"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let report = catalog.load().await;

    assert_eq!(report.errors.len(), 1);
    assert_eq!(catalog.failure(), Some(LoadFailure::Data));
    assert_eq!(
        catalog
            .availability()
            .lookup("reps", &ProductId::from("a1")),
        Availability::Loading
    );
}

#[tokio::test]
async fn test_accessories_failure_skips_availability() {
    let (server, catalog) = setup().await;
    mount_products(&server, "jackets", json!([])).await;
    mount_products(&server, "shirts", json!([])).await;
    Mock::given(method("GET"))
        .and(path("/products/accessories"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let report = catalog.load().await;

    assert!(report.manufacturers.is_empty());
    assert!(catalog.manufacturers().is_empty());
    assert_eq!(catalog.failure(), Some(LoadFailure::Data));
}

#[tokio::test]
async fn test_reload_clears_failure() {
    let (server, catalog) = setup().await;
    mount_happy_catalog(&server).await;

    catalog.load().await;
    assert_eq!(catalog.failure(), None);

    // Second round of availability calls after the reload
    server.reset().await;
    mount_happy_catalog(&server).await;
    let report = catalog.reload().await;

    assert!(report.is_complete());
    assert_eq!(catalog.failure(), None);
    assert_eq!(catalog.grouped(Category::Shirts).unwrap().len(), 1);
}

#[tokio::test]
async fn test_find_product_across_categories() {
    let (server, catalog) = setup().await;
    mount_happy_catalog(&server).await;
    catalog.load().await;

    let (category, product) = catalog.find_product("A2").unwrap();
    assert_eq!(category, Category::Accessories);
    assert_eq!(product.name, "AMULET");
    assert_eq!(product.price_label(), "42$");
    assert!(catalog.find_product("missing").is_none());
}
