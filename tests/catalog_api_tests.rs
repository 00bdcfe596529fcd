//! Catalog API integration tests
//!
//! Tests for the public HTTP endpoints (listing, detail, autocomplete,
//! locations, health) against a temporary SQLite database.

use std::sync::{Arc, Once};

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use chrono::Utc;
use rust_decimal::Decimal;
use serde_json::Value;
use tempfile::TempDir;

use rental_catalog::api::middleware::{REQUEST_ID_HEADER, RequestIdMiddleware};
use rental_catalog::api::services::{
    AppStartTime, ErrorCode, MediaContext, catalog_routes, health_routes,
};
use rental_catalog::config::init_config;
use rental_catalog::services::{CatalogService, CatalogSettings, ImageResolver};
use rental_catalog::storage::backend::SeaOrmStorage;
use rental_catalog::storage::{Location, Property, PropertyImage, PropertyType};

// =============================================================================
// Test Setup
// =============================================================================

static INIT: Once = Once::new();

fn init_static_config() {
    INIT.call_once(|| {
        init_config();
    });
}

struct TestEnv {
    storage: Arc<SeaOrmStorage>,
    catalog: Arc<CatalogService>,
    _dir: TempDir,
}

fn location(id: &str, name: &str, city: &str, state: &str) -> Location {
    Location {
        id: id.to_string(),
        name: name.to_string(),
        city: city.to_string(),
        state: state.to_string(),
        country: "USA".to_string(),
        zip: "81611".to_string(),
        latitude: Decimal::new(39_191_100, 6),
        longitude: Decimal::new(-106_817_500, 6),
        description: "Mountain town".to_string(),
    }
}

fn property(id: &str, name: &str, location_id: &str) -> Property {
    Property {
        id: id.to_string(),
        name: name.to_string(),
        property_type: PropertyType::Chalet,
        bedrooms: 4,
        bathrooms: Decimal::new(30, 1),
        max_guests: 8,
        price_per_night: Decimal::new(72500, 2),
        description: String::new(),
        location_id: location_id.to_string(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

async fn init_test_env() -> TestEnv {
    init_static_config();

    let dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = dir.path().join("catalog_api_test.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    let storage = Arc::new(
        SeaOrmStorage::new(&db_url, "sqlite")
            .await
            .expect("Failed to create storage"),
    );

    let mut properties: Vec<Property> = (1..=10)
        .map(|i| property(&format!("P{:02}", i), &format!("Lodge {}", i), "L1"))
        .collect();
    properties.push(property("P11", "Villa Sunset", "L2"));
    properties.push(property("P12", "Mountain Villa", "L1"));

    let images = vec![
        PropertyImage {
            id: "B".to_string(),
            property_id: "P11".to_string(),
            image_file: None,
            image_url: Some("https://cdn.example.com/b.jpg".to_string()),
            caption: "Pool".to_string(),
            order: 3,
        },
        PropertyImage {
            id: "C".to_string(),
            property_id: "P11".to_string(),
            image_file: Some("properties/c.jpg".to_string()),
            image_url: Some("https://cdn.example.com/c.jpg".to_string()),
            caption: "Front".to_string(),
            order: 1,
        },
        PropertyImage {
            id: "A".to_string(),
            property_id: "P11".to_string(),
            image_file: None,
            image_url: None,
            caption: String::new(),
            order: 2,
        },
    ];

    storage
        .replace_catalog(
            &[
                location("L1", "Powder Lodge", "Aspen", "CO"),
                location("L2", "Ocean Front", "Miami", "FL"),
            ],
            &properties,
            &images,
        )
        .await
        .expect("Failed to seed catalog");

    let catalog = Arc::new(CatalogService::new(
        storage.clone(),
        CatalogSettings::default(),
    ));

    TestEnv {
        storage,
        catalog,
        _dir: dir,
    }
}

fn relative_media() -> MediaContext {
    MediaContext::new(ImageResolver::default(), false)
}

async fn body_json(resp: actix_web::dev::ServiceResponse) -> Value {
    let body = test::read_body(resp).await;
    serde_json::from_slice(&body).expect("response is not JSON")
}

// =============================================================================
// Property listing
// =============================================================================

#[actix_rt::test]
async fn test_list_properties_envelope_and_pagination() {
    let env = init_test_env().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(env.catalog.clone()))
            .app_data(web::Data::new(relative_media()))
            .service(catalog_routes("/api")),
    )
    .await;

    let req = TestRequest::get().uri("/api/properties?page=2").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_json(resp).await;
    assert_eq!(body["code"], 0);
    assert_eq!(body["data"].as_array().unwrap().len(), 5);
    assert_eq!(body["pagination"]["page"], 2);
    assert_eq!(body["pagination"]["page_size"], 5);
    assert_eq!(body["pagination"]["total"], 12);
    assert_eq!(body["pagination"]["total_pages"], 3);
    assert_eq!(body["pagination"]["next_page"], 3);
    assert_eq!(body["pagination"]["previous_page"], 1);
}

#[actix_rt::test]
async fn test_list_properties_invalid_page_is_empty_not_error() {
    let env = init_test_env().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(env.catalog.clone()))
            .app_data(web::Data::new(relative_media()))
            .service(catalog_routes("/api")),
    )
    .await;

    for uri in [
        "/api/properties?page=99",
        "/api/properties?page=abc",
        "/api/properties?page=0",
    ] {
        let resp = test::call_service(&app, TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK, "{}", uri);
        let body = body_json(resp).await;
        assert!(body["data"].as_array().unwrap().is_empty());
        assert_eq!(body["pagination"]["total"], 12);
        assert!(body["pagination"]["previous_page"].is_null());
        assert!(body["pagination"]["next_page"].is_null());
    }
}

#[actix_rt::test]
async fn test_list_properties_filters() {
    let env = init_test_env().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(env.catalog.clone()))
            .app_data(web::Data::new(relative_media()))
            .service(catalog_routes("/api")),
    )
    .await;

    let req = TestRequest::get()
        .uri("/api/properties?search=villa&page_size=50")
        .to_request();
    let body = body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["pagination"]["total"], 2);

    let req = TestRequest::get()
        .uri("/api/properties?search=villa&location=miami")
        .to_request();
    let body = body_json(test::call_service(&app, req).await).await;
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["id"], "P11");
    assert_eq!(data[0]["location"], "L2");
    assert_eq!(data[0]["location_city"], "Miami");
}

#[actix_rt::test]
async fn test_page_size_clamped() {
    let env = init_test_env().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(env.catalog.clone()))
            .app_data(web::Data::new(relative_media()))
            .service(catalog_routes("/api")),
    )
    .await;

    let req = TestRequest::get()
        .uri("/api/properties?page_size=1000")
        .to_request();
    let body = body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["pagination"]["page_size"], 100);
    assert_eq!(body["data"].as_array().unwrap().len(), 12);
}

// =============================================================================
// Property detail
// =============================================================================

#[actix_rt::test]
async fn test_get_property_serialization() {
    let env = init_test_env().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(env.catalog.clone()))
            .app_data(web::Data::new(relative_media()))
            .service(catalog_routes("/api")),
    )
    .await;

    let req = TestRequest::get().uri("/api/properties/P11").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_json(resp).await;
    let data = &body["data"];
    assert_eq!(data["name"], "Villa Sunset");
    assert_eq!(data["type"], "Chalet");
    assert_eq!(data["bathrooms"], "3.0");
    assert_eq!(data["price_per_night"], "725.00");
    assert_eq!(data["location_name"], "Ocean Front");
    assert!(data["created_at"].as_str().unwrap().contains('T'));

    let images = data["images"].as_array().unwrap();
    let ids: Vec<&str> = images.iter().map(|i| i["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["C", "A", "B"]);
    // 上传文件优先于外部 URL；两者都没有时为空串
    assert_eq!(images[0]["display_url"], "/media/properties/c.jpg");
    assert_eq!(images[1]["display_url"], "");
    assert_eq!(images[2]["display_url"], "https://cdn.example.com/b.jpg");
}

#[actix_rt::test]
async fn test_get_property_absolute_media_url() {
    let env = init_test_env().await;
    let media = MediaContext::new(ImageResolver::default(), true);
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(env.catalog.clone()))
            .app_data(web::Data::new(media))
            .service(catalog_routes("/api")),
    )
    .await;

    let req = TestRequest::get()
        .uri("/api/properties/P11")
        .insert_header(("Host", "rentals.example.com"))
        .to_request();
    let body = body_json(test::call_service(&app, req).await).await;
    assert_eq!(
        body["data"]["images"][0]["display_url"],
        "http://rentals.example.com/media/properties/c.jpg"
    );
}

#[actix_rt::test]
async fn test_get_property_not_found() {
    let env = init_test_env().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(env.catalog.clone()))
            .app_data(web::Data::new(relative_media()))
            .service(catalog_routes("/api")),
    )
    .await;

    let req = TestRequest::get().uri("/api/properties/NOPE").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body = body_json(resp).await;
    assert_eq!(body["code"], ErrorCode::PropertyNotFound as i32);
    assert!(body["data"].is_null());
}

// =============================================================================
// Autocomplete
// =============================================================================

#[actix_rt::test]
async fn test_property_autocomplete() {
    let env = init_test_env().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(env.catalog.clone()))
            .service(catalog_routes("/api")),
    )
    .await;

    let req = TestRequest::get()
        .uri("/api/property-autocomplete?q=Vil")
        .to_request();
    let body = body_json(test::call_service(&app, req).await).await;
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["name"], "Mountain Villa");
    assert_eq!(data[0]["location"], "Aspen, CO");
    assert_eq!(data[1]["name"], "Villa Sunset");

    // 匹配超过上限时截断到 5 条
    let req = TestRequest::get()
        .uri("/api/property-autocomplete?q=lodge")
        .to_request();
    let body = body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 5);
}

#[actix_rt::test]
async fn test_short_autocomplete_query_returns_empty_list() {
    let env = init_test_env().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(env.catalog.clone()))
            .service(catalog_routes("/api")),
    )
    .await;

    for uri in [
        "/api/property-autocomplete?q=V",
        "/api/property-autocomplete",
        "/api/location-autocomplete?q=a",
    ] {
        let resp = test::call_service(&app, TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["data"], serde_json::json!([]));
    }
}

#[actix_rt::test]
async fn test_location_autocomplete() {
    let env = init_test_env().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(env.catalog.clone()))
            .service(catalog_routes("/api")),
    )
    .await;

    let req = TestRequest::get()
        .uri("/api/location-autocomplete?q=asp")
        .to_request();
    let body = body_json(test::call_service(&app, req).await).await;
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["display"], "Aspen, CO");
    assert_eq!(data[0]["full_display"], "Powder Lodge - Aspen, CO");
    assert_eq!(data[0]["property_count"], 11);
}

// =============================================================================
// Locations
// =============================================================================

#[actix_rt::test]
async fn test_locations_endpoints() {
    let env = init_test_env().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(env.catalog.clone()))
            .service(catalog_routes("/api")),
    )
    .await;

    let body = body_json(
        test::call_service(&app, TestRequest::get().uri("/api/locations").to_request()).await,
    )
    .await;
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Ocean Front", "Powder Lodge"]);

    let body = body_json(
        test::call_service(&app, TestRequest::get().uri("/api/locations/L1").to_request())
            .await,
    )
    .await;
    assert_eq!(body["data"]["latitude"], "39.191100");

    let resp =
        test::call_service(&app, TestRequest::get().uri("/api/locations/LX").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(resp).await["code"],
        ErrorCode::LocationNotFound as i32
    );
}

// =============================================================================
// Middleware & health
// =============================================================================

#[actix_rt::test]
async fn test_responses_carry_request_id() {
    let env = init_test_env().await;
    let app = test::init_service(
        App::new()
            .wrap(RequestIdMiddleware)
            .app_data(web::Data::new(env.catalog.clone()))
            .app_data(web::Data::new(relative_media()))
            .service(catalog_routes("/api")),
    )
    .await;

    let resp =
        test::call_service(&app, TestRequest::get().uri("/api/properties").to_request()).await;
    assert!(resp.headers().get(REQUEST_ID_HEADER).is_some());

    let resp = test::call_service(
        &app,
        TestRequest::get().uri("/api/properties/NOPE").to_request(),
    )
    .await;
    assert!(resp.headers().get(REQUEST_ID_HEADER).is_some());
}

#[actix_rt::test]
async fn test_health_endpoints() {
    let env = init_test_env().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(env.storage.clone()))
            .app_data(web::Data::new(AppStartTime::now()))
            .service(health_routes("/health")),
    )
    .await;

    let resp = test::call_service(&app, TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["data"]["status"], "healthy");
    assert_eq!(body["data"]["checks"]["storage"]["backend"], "sqlite");
    assert_eq!(body["data"]["checks"]["storage"]["counts"]["properties"], 12);
    assert_eq!(body["data"]["checks"]["storage"]["counts"]["images"], 3);

    let resp =
        test::call_service(&app, TestRequest::get().uri("/health/ready").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp =
        test::call_service(&app, TestRequest::get().uri("/health/live").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}
