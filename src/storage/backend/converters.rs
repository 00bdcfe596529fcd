use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::warn;

use crate::storage::models::{Location, Property, PropertyImage, PropertyType};
use migration::entities::{location, property, property_image};

/// 小数位数（与表结构一致）
pub const COORDINATE_SCALE: u32 = 6;
pub const BATHROOMS_SCALE: u32 = 1;
pub const PRICE_SCALE: u32 = 2;

/// 固定小数位数
///
/// SQLite 以浮点读回 DECIMAL，这里统一 rescale，保证 "249.90" 而不是 "249.9"。
pub fn fixed(mut value: Decimal, scale: u32) -> Decimal {
    value.rescale(scale);
    value
}

/// 空字符串视为未设置
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

pub fn model_to_location(model: location::Model) -> Location {
    Location {
        id: model.id,
        name: model.name,
        city: model.city,
        state: model.state,
        country: model.country,
        zip: model.zip,
        latitude: fixed(model.latitude, COORDINATE_SCALE),
        longitude: fixed(model.longitude, COORDINATE_SCALE),
        description: model.description,
    }
}

pub fn location_to_active_model(location: &Location) -> location::ActiveModel {
    use sea_orm::ActiveValue::*;

    location::ActiveModel {
        id: Set(location.id.clone()),
        name: Set(location.name.clone()),
        city: Set(location.city.clone()),
        state: Set(location.state.clone()),
        country: Set(location.country.clone()),
        zip: Set(location.zip.clone()),
        latitude: Set(fixed(location.latitude, COORDINATE_SCALE)),
        longitude: Set(fixed(location.longitude, COORDINATE_SCALE)),
        description: Set(location.description.clone()),
    }
}

pub fn model_to_property(model: property::Model) -> Property {
    let property_type = PropertyType::from_str(&model.property_type).unwrap_or_else(|_| {
        warn!(
            "Unknown property type '{}' for property '{}', falling back to House",
            model.property_type, model.id
        );
        PropertyType::House
    });

    Property {
        id: model.id,
        name: model.name,
        property_type,
        bedrooms: model.bedrooms.max(0) as u32,
        bathrooms: fixed(model.bathrooms, BATHROOMS_SCALE),
        max_guests: model.max_guests.max(0) as u32,
        price_per_night: fixed(model.price_per_night, PRICE_SCALE),
        description: model.description,
        location_id: model.location_id,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

/// 将 Property 转换为 ActiveModel（用于插入/更新）
///
/// 时间戳由存储层决定：新建时 created_at = updated_at = now，
/// 更新时只刷新 updated_at。
pub fn property_to_active_model(
    property: &Property,
    is_new: bool,
    now: DateTime<Utc>,
) -> property::ActiveModel {
    use sea_orm::ActiveValue::*;

    property::ActiveModel {
        id: Set(property.id.clone()),
        name: Set(property.name.clone()),
        property_type: Set(property.property_type.to_string()),
        bedrooms: Set(property.bedrooms.min(i32::MAX as u32) as i32),
        bathrooms: Set(fixed(property.bathrooms, BATHROOMS_SCALE)),
        max_guests: Set(property.max_guests.min(i32::MAX as u32) as i32),
        price_per_night: Set(fixed(property.price_per_night, PRICE_SCALE)),
        description: Set(property.description.clone()),
        location_id: Set(property.location_id.clone()),
        created_at: if is_new { Set(now) } else { NotSet },
        updated_at: Set(now),
    }
}

pub fn model_to_image(model: property_image::Model) -> PropertyImage {
    PropertyImage {
        id: model.id,
        property_id: model.property_id,
        image_file: non_empty(model.image_file),
        image_url: non_empty(model.image_url),
        caption: model.caption,
        order: model.image_order,
    }
}

pub fn image_to_active_model(image: &PropertyImage) -> property_image::ActiveModel {
    use sea_orm::ActiveValue::*;

    property_image::ActiveModel {
        id: Set(image.id.clone()),
        property_id: Set(image.property_id.clone()),
        image_file: Set(non_empty(image.image_file.clone())),
        image_url: Set(non_empty(image.image_url.clone())),
        caption: Set(image.caption.clone()),
        image_order: Set(image.order),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::ActiveValue;

    fn create_test_property_model() -> property::Model {
        property::Model {
            id: "PROP001".to_string(),
            name: "Villa Sunset".to_string(),
            property_type: "Villa".to_string(),
            bedrooms: 4,
            bathrooms: Decimal::new(25, 1),
            max_guests: 8,
            price_per_night: Decimal::new(4500, 1),
            description: "Ocean view".to_string(),
            location_id: "LOC001".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_fixed_pads_scale() {
        assert_eq!(fixed(Decimal::new(4500, 1), 2).to_string(), "450.00");
        assert_eq!(fixed(Decimal::new(2, 0), 1).to_string(), "2.0");
    }

    #[test]
    fn test_fixed_rounds_float_noise() {
        let noisy = Decimal::from_str("249.98999999999998").unwrap();
        assert_eq!(fixed(noisy, 2).to_string(), "249.99");
    }

    #[test]
    fn test_model_to_property_basic() {
        let property = model_to_property(create_test_property_model());

        assert_eq!(property.id, "PROP001");
        assert_eq!(property.property_type, PropertyType::Villa);
        assert_eq!(property.bedrooms, 4);
        assert_eq!(property.bathrooms.to_string(), "2.5");
        assert_eq!(property.price_per_night.to_string(), "450.00");
    }

    #[test]
    fn test_model_to_property_negative_counts_clamped() {
        let mut model = create_test_property_model();
        model.bedrooms = -1;
        model.max_guests = -3;

        let property = model_to_property(model);
        assert_eq!(property.bedrooms, 0);
        assert_eq!(property.max_guests, 0);
    }

    #[test]
    fn test_property_to_active_model_new_sets_timestamps() {
        let property = model_to_property(create_test_property_model());
        let now = Utc::now();
        let active = property_to_active_model(&property, true, now);

        assert!(matches!(active.created_at, ActiveValue::Set(t) if t == now));
        assert!(matches!(active.updated_at, ActiveValue::Set(t) if t == now));
        if let ActiveValue::Set(kind) = active.property_type {
            assert_eq!(kind, "Villa");
        }
    }

    #[test]
    fn test_property_to_active_model_update_keeps_created_at() {
        let property = model_to_property(create_test_property_model());
        let active = property_to_active_model(&property, false, Utc::now());

        assert!(matches!(active.created_at, ActiveValue::NotSet));
        assert!(matches!(active.updated_at, ActiveValue::Set(_)));
    }

    #[test]
    fn test_model_to_image_blank_sources_become_none() {
        let image = model_to_image(property_image::Model {
            id: "IMG001".to_string(),
            property_id: "PROP001".to_string(),
            image_file: Some(String::new()),
            image_url: Some("  ".to_string()),
            caption: "Pool".to_string(),
            image_order: 1,
        });

        assert!(image.image_file.is_none());
        assert!(image.image_url.is_none());
        assert_eq!(image.order, 1);
    }
}
