use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// 房源类型
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum PropertyType {
    Villa,
    Condo,
    Chalet,
    Cabin,
    Loft,
    Penthouse,
    House,
    Townhouse,
    Suite,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
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

impl Location {
    /// "city, state"
    pub fn display(&self) -> String {
        format!("{}, {}", self.city, self.state)
    }

    /// "name - city, state"
    pub fn full_display(&self) -> String {
        format!("{} - {}, {}", self.name, self.city, self.state)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: String,
    pub name: String,
    pub property_type: PropertyType,
    pub bedrooms: u32,
    pub bathrooms: Decimal,
    pub max_guests: u32,
    pub price_per_night: Decimal,
    pub description: String,
    pub location_id: String,
    /// Set by the store on insert; ignored on write.
    pub created_at: DateTime<Utc>,
    /// Set by the store on every write; ignored on write.
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyImage {
    pub id: String,
    pub property_id: String,
    pub image_file: Option<String>,
    pub image_url: Option<String>,
    pub caption: String,
    pub order: i32,
}

/// 新建图片；`id` 为空时由存储层生成
#[derive(Debug, Clone, Default)]
pub struct NewPropertyImage {
    pub id: Option<String>,
    pub property_id: String,
    pub image_file: Option<String>,
    pub image_url: Option<String>,
    pub caption: String,
    pub order: i32,
}

/// 房源及其预加载的位置和图片
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyListing {
    pub property: Property,
    pub location: Location,
    /// Ordered by `order`, then `id`
    pub images: Vec<PropertyImage>,
}

/// 位置及其房源数量
#[derive(Debug, Clone, PartialEq)]
pub struct LocationWithCount {
    pub location: Location,
    pub property_count: u64,
}

/// 各实体总数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogStats {
    pub locations: u64,
    pub properties: u64,
    pub images: u64,
}

/// 单个房源的图片数量汇总
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageCount {
    pub property_id: String,
    pub property_name: String,
    pub images: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    fn sample_location() -> Location {
        Location {
            id: "LOC001".to_string(),
            name: "Sunset Bay".to_string(),
            city: "Malibu".to_string(),
            state: "CA".to_string(),
            country: "USA".to_string(),
            zip: "90265".to_string(),
            latitude: Decimal::new(34_025_922, 6),
            longitude: Decimal::new(-118_779_757, 6),
            description: "Beachfront".to_string(),
        }
    }

    #[test]
    fn test_location_display_strings() {
        let location = sample_location();
        assert_eq!(location.display(), "Malibu, CA");
        assert_eq!(location.full_display(), "Sunset Bay - Malibu, CA");
    }

    #[test]
    fn test_property_type_parse_is_case_insensitive() {
        assert_eq!(PropertyType::from_str("Villa").unwrap(), PropertyType::Villa);
        assert_eq!(
            PropertyType::from_str("penthouse").unwrap(),
            PropertyType::Penthouse
        );
        assert!(PropertyType::from_str("Castle").is_err());
    }

    #[test]
    fn test_property_type_display_roundtrip() {
        for kind in PropertyType::iter() {
            let text = kind.to_string();
            assert_eq!(PropertyType::from_str(&text).unwrap(), kind);
        }
        assert_eq!(PropertyType::iter().count(), 9);
    }
}
