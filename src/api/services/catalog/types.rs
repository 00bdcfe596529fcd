//! Catalog API 类型定义

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::services::{ImageResolver, Page, PropertySuggestion};
use crate::storage::{
    CatalogStats, Location, LocationWithCount, PropertyImage, PropertyListing, PropertyType,
};

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub message: String,
    pub data: Option<T>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PaginatedResponse<T> {
    pub code: i32,
    pub message: String,
    pub data: T,
    pub pagination: PaginationInfo,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PaginationInfo {
    pub page: u64,
    pub page_size: u64,
    pub total: u64,
    pub total_pages: u64,
    pub next_page: Option<u64>,
    pub previous_page: Option<u64>,
}

impl<T> From<&Page<T>> for PaginationInfo {
    fn from(page: &Page<T>) -> Self {
        Self {
            page: page.page,
            page_size: page.page_size,
            total: page.total,
            total_pages: page.total_pages,
            next_page: page.next_page,
            previous_page: page.previous_page,
        }
    }
}

/// 房源列表查询参数
///
/// 数值参数按字符串接收，非法值走默认/空页逻辑而不是 400。
#[derive(Deserialize, Clone, Debug, Default)]
pub struct PropertyListQuery {
    pub search: Option<String>,
    pub location: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct AutocompleteQuery {
    pub q: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LocationResponse {
    pub id: String,
    pub name: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub zip: String,
    pub latitude: Decimal,
    pub longitude: Decimal,
    pub description: String,
}

impl From<Location> for LocationResponse {
    fn from(location: Location) -> Self {
        Self {
            id: location.id,
            name: location.name,
            city: location.city,
            state: location.state,
            country: location.country,
            zip: location.zip,
            latitude: location.latitude,
            longitude: location.longitude,
            description: location.description,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PropertyImageResponse {
    pub id: String,
    pub display_url: String,
    pub caption: String,
    pub order: i32,
}

impl PropertyImageResponse {
    pub fn from_image(image: PropertyImage, resolver: &ImageResolver) -> Self {
        Self {
            display_url: resolver.display_url(&image),
            id: image.id,
            caption: image.caption,
            order: image.order,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PropertyResponse {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    pub bedrooms: u32,
    pub bathrooms: Decimal,
    pub max_guests: u32,
    pub price_per_night: Decimal,
    pub description: String,
    /// 位置 id
    pub location: String,
    pub location_name: String,
    pub location_city: String,
    pub images: Vec<PropertyImageResponse>,
    pub created_at: String,
}

impl PropertyResponse {
    pub fn from_listing(listing: PropertyListing, resolver: &ImageResolver) -> Self {
        let PropertyListing {
            property,
            location,
            images,
        } = listing;

        Self {
            id: property.id,
            name: property.name,
            property_type: property.property_type,
            bedrooms: property.bedrooms,
            bathrooms: property.bathrooms,
            max_guests: property.max_guests,
            price_per_night: property.price_per_night,
            description: property.description,
            location: location.id,
            location_name: location.name,
            location_city: location.city,
            images: images
                .into_iter()
                .map(|image| PropertyImageResponse::from_image(image, resolver))
                .collect(),
            created_at: property.created_at.to_rfc3339(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PropertySuggestionResponse {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    pub location: String,
}

impl From<PropertySuggestion> for PropertySuggestionResponse {
    fn from(s: PropertySuggestion) -> Self {
        Self {
            id: s.id,
            name: s.name,
            property_type: s.property_type,
            location: s.location,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct LocationSuggestionResponse {
    pub id: String,
    pub name: String,
    pub city: String,
    pub state: String,
    pub display: String,
    pub full_display: String,
    pub property_count: u64,
}

impl From<LocationWithCount> for LocationSuggestionResponse {
    fn from(item: LocationWithCount) -> Self {
        let display = item.location.display();
        let full_display = item.location.full_display();
        let Location {
            id,
            name,
            city,
            state,
            ..
        } = item.location;

        Self {
            id,
            name,
            city,
            state,
            display,
            full_display,
            property_count: item.property_count,
        }
    }
}

// ============ Health ============

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct HealthStorageCheck {
    pub status: String,
    pub backend: String,
    pub counts: Option<CatalogStats>,
    pub error: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct HealthChecks {
    pub storage: HealthStorageCheck,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub uptime: u64,
    pub checks: HealthChecks,
    pub response_time_ms: u64,
}
