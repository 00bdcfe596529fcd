//! Catalog API 路由配置

use actix_web::web;

use super::autocomplete::{location_autocomplete, property_autocomplete};
use super::locations::{get_location, list_locations};
use super::properties::{get_property, list_properties};

/// 房源路由 `/properties`
///
/// 包含：
/// - GET/HEAD /properties - 分页列表（search / location 过滤）
/// - GET/HEAD /properties/{id} - 单个房源
pub fn properties_routes() -> actix_web::Scope {
    web::scope("/properties")
        .route("", web::get().to(list_properties))
        .route("", web::head().to(list_properties))
        .route("/{id}", web::get().to(get_property))
        .route("/{id}", web::head().to(get_property))
}

/// 位置路由 `/locations`
pub fn locations_routes() -> actix_web::Scope {
    web::scope("/locations")
        .route("", web::get().to(list_locations))
        .route("/{id}", web::get().to(get_location))
}

/// 挂载在 `prefix`（默认 `/api`）下的全部目录路由
pub fn catalog_routes(prefix: &str) -> actix_web::Scope {
    web::scope(prefix)
        .service(properties_routes())
        .service(locations_routes())
        .route(
            "/property-autocomplete",
            web::get().to(property_autocomplete),
        )
        .route(
            "/location-autocomplete",
            web::get().to(location_autocomplete),
        )
}
