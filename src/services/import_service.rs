//! Destructive CSV catalog import
//!
//! The whole file is validated and planned in memory first. Only a clean
//! plan reaches the store, where clearing and inserting share one
//! transaction: a failed import leaves the previous catalog untouched.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use crate::errors::{CatalogError, Result};
use crate::storage::{Location, Property, PropertyImage, PropertyType, SeaOrmStorage};
use crate::storage::backend::MAX_IMAGE_ID_ATTEMPTS;
use crate::utils::csv_handler::{NumberedRow, read_catalog_csv, split_list};
use crate::utils::generate_image_id;

/// 位置 / 房源 / 图片 id 的最大长度（与表结构一致）
pub const MAX_ID_LEN: usize = 20;

// ============ Report ============

/// 单行处理结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RowOutcome {
    Created {
        location_created: bool,
        images: usize,
    },
    /// 房源 id 重复，整行（含图片）跳过
    SkippedDuplicate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowReport {
    pub line: usize,
    pub location_id: String,
    pub property_id: String,
    pub property_name: String,
    pub outcome: RowOutcome,
}

impl RowReport {
    /// CLI 输出的一行描述
    pub fn describe(&self) -> String {
        match &self.outcome {
            RowOutcome::Created {
                location_created,
                images,
            } => format!(
                "Row {}: {} location {}, created property {} ({}) with {} image(s)",
                self.line,
                if *location_created { "created" } else { "reused" },
                self.location_id,
                self.property_id,
                self.property_name,
                images
            ),
            RowOutcome::SkippedDuplicate => format!(
                "Row {}: skipped duplicate property {}",
                self.line, self.property_id
            ),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub rows: Vec<RowReport>,
    pub locations: usize,
    pub properties: usize,
    pub images: usize,
}

impl ImportReport {
    pub fn skipped(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| r.outcome == RowOutcome::SkippedDuplicate)
            .count()
    }
}

// ============ Plan ============

/// 校验通过、待写入的完整数据
#[derive(Debug, Clone, Default)]
pub struct ImportPlan {
    pub locations: Vec<Location>,
    pub properties: Vec<Property>,
    pub images: Vec<PropertyImage>,
    pub rows: Vec<RowReport>,
}

impl ImportPlan {
    pub fn report(&self) -> ImportReport {
        ImportReport {
            rows: self.rows.clone(),
            locations: self.locations.len(),
            properties: self.properties.len(),
            images: self.images.len(),
        }
    }
}

fn row_error(line: usize, msg: impl std::fmt::Display) -> CatalogError {
    CatalogError::validation(format!("Row {}: {}", line, msg))
}

fn required<'a>(line: usize, field: &str, value: &'a str) -> Result<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(row_error(line, format!("{} is required", field)));
    }
    Ok(value)
}

fn parse_decimal(line: usize, field: &str, value: &str) -> Result<Decimal> {
    Decimal::from_str(value.trim())
        .map_err(|_| row_error(line, format!("{} is not a valid number: '{}'", field, value)))
}

fn parse_non_negative_decimal(line: usize, field: &str, value: &str) -> Result<Decimal> {
    let parsed = parse_decimal(line, field, value)?;
    if parsed.is_sign_negative() && !parsed.is_zero() {
        return Err(row_error(line, format!("{} must not be negative", field)));
    }
    Ok(parsed)
}

fn parse_count(line: usize, field: &str, value: &str) -> Result<u32> {
    let parsed: i64 = value
        .trim()
        .parse()
        .map_err(|_| row_error(line, format!("{} is not a valid integer: '{}'", field, value)))?;
    if parsed < 0 {
        return Err(row_error(line, format!("{} must not be negative", field)));
    }
    u32::try_from(parsed).map_err(|_| row_error(line, format!("{} is too large", field)))
}

fn check_id_len(line: usize, field: &str, id: &str) -> Result<()> {
    if id.chars().count() > MAX_ID_LEN {
        return Err(row_error(
            line,
            format!("{} '{}' exceeds {} characters", field, id, MAX_ID_LEN),
        ));
    }
    Ok(())
}

fn fresh_image_id(used: &HashMap<String, usize>) -> Result<String> {
    for _ in 0..MAX_IMAGE_ID_ATTEMPTS {
        let id = generate_image_id();
        if !used.contains_key(&id) {
            return Ok(id);
        }
    }
    Err(CatalogError::database_operation(format!(
        "生成唯一图片 id 失败（{} 次尝试）",
        MAX_IMAGE_ID_ATTEMPTS
    )))
}

/// 校验整份文件并生成写入计划（纯函数，不触碰存储）
///
/// - 每个 location_id 只建一个位置，以首次出现的行为准（重复房源行中的新位置同样会建）
/// - 重复的 property_id 跳过其房源和图片
/// - 图片三列按位置配对，取最短列表长度；order 从 1 开始
pub fn plan_import(rows: &[NumberedRow]) -> Result<ImportPlan> {
    let mut plan = ImportPlan::default();
    let mut location_index: HashSet<String> = HashSet::new();
    let mut property_index: HashSet<String> = HashSet::new();
    let mut image_owner: HashMap<String, usize> = HashMap::new();
    let now = Utc::now();

    for NumberedRow { line, row } in rows {
        let line = *line;
        let location_id = required(line, "location_id", &row.location_id)?;
        let property_id = required(line, "property_id", &row.property_id)?;

        check_id_len(line, "location_id", location_id)?;
        check_id_len(line, "property_id", property_id)?;

        let location_created = location_index.insert(location_id.to_string());
        if location_created {
            plan.locations.push(Location {
                id: location_id.to_string(),
                name: row.location_name.clone(),
                city: row.location_city.clone(),
                state: row.location_state.clone(),
                country: row.location_country.clone(),
                zip: row.location_zip.clone(),
                latitude: parse_decimal(line, "location_latitude", &row.location_latitude)?,
                longitude: parse_decimal(line, "location_longitude", &row.location_longitude)?,
                description: row.location_description.clone(),
            });
        }

        if property_index.contains(property_id) {
            plan.rows.push(RowReport {
                line,
                location_id: location_id.to_string(),
                property_id: property_id.to_string(),
                property_name: row.property_name.clone(),
                outcome: RowOutcome::SkippedDuplicate,
            });
            continue;
        }

        let property_type = PropertyType::from_str(row.property_type.trim()).map_err(|_| {
            row_error(
                line,
                format!("unknown property_type '{}'", row.property_type),
            )
        })?;

        plan.properties.push(Property {
            id: property_id.to_string(),
            name: row.property_name.clone(),
            property_type,
            bedrooms: parse_count(line, "bedrooms", &row.bedrooms)?,
            bathrooms: parse_non_negative_decimal(line, "bathrooms", &row.bathrooms)?,
            max_guests: parse_count(line, "max_guests", &row.max_guests)?,
            price_per_night: parse_non_negative_decimal(
                line,
                "price_per_night",
                &row.price_per_night,
            )?,
            description: row.property_description.clone(),
            location_id: location_id.to_string(),
            created_at: now,
            updated_at: now,
        });
        property_index.insert(property_id.to_string());

        let ids = split_list(&row.image_ids);
        let urls = split_list(&row.image_urls);
        let captions = split_list(&row.image_captions);

        let mut pending: Vec<(usize, String, String, String)> = Vec::new();
        for (position, ((id, url), caption)) in ids
            .into_iter()
            .zip(urls)
            .zip(captions)
            .enumerate()
        {
            if id.is_empty() && url.is_empty() && caption.is_empty() {
                continue;
            }
            if !id.is_empty() {
                check_id_len(line, "image id", &id)?;
                if let Some(first_line) = image_owner.get(&id) {
                    return Err(row_error(
                        line,
                        format!("duplicate image id '{}' (first seen on row {})", id, first_line),
                    ));
                }
                image_owner.insert(id.clone(), line);
            }
            pending.push((position, id, url, caption));
        }

        let mut images_created = 0;
        for (position, id, url, caption) in pending {
            let id = if id.is_empty() {
                let generated = fresh_image_id(&image_owner)?;
                image_owner.insert(generated.clone(), line);
                generated
            } else {
                id
            };

            plan.images.push(PropertyImage {
                id,
                property_id: property_id.to_string(),
                image_file: None,
                image_url: (!url.is_empty()).then_some(url),
                caption,
                order: i32::try_from(position + 1).unwrap_or(i32::MAX),
            });
            images_created += 1;
        }

        plan.rows.push(RowReport {
            line,
            location_id: location_id.to_string(),
            property_id: property_id.to_string(),
            property_name: row.property_name.clone(),
            outcome: RowOutcome::Created {
                location_created,
                images: images_created,
            },
        });
    }

    Ok(plan)
}

// ============ Service ============

pub struct ImportService {
    storage: Arc<SeaOrmStorage>,
}

impl ImportService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    /// 从 CSV 文件导入（替换全部现有数据）
    pub async fn import_file<P: AsRef<Path>>(&self, path: P) -> Result<ImportReport> {
        let rows = read_catalog_csv(path.as_ref())?;
        info!(
            "Read {} rows from {}",
            rows.len(),
            path.as_ref().display()
        );
        self.import_rows(&rows).await
    }

    pub async fn import_rows(&self, rows: &[NumberedRow]) -> Result<ImportReport> {
        let plan = plan_import(rows)?;

        self.storage
            .replace_catalog(&plan.locations, &plan.properties, &plan.images)
            .await?;

        let report = plan.report();
        info!(
            "Import finished: {} locations, {} properties, {} images ({} duplicate rows skipped)",
            report.locations,
            report.properties,
            report.images,
            report.skipped()
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::csv_handler::CsvCatalogRow;

    fn row(line: usize, location_id: &str, property_id: &str, name: &str) -> NumberedRow {
        NumberedRow {
            line,
            row: CsvCatalogRow {
                location_id: location_id.to_string(),
                location_name: "Sunset Bay".to_string(),
                location_city: "Malibu".to_string(),
                location_state: "CA".to_string(),
                location_country: "USA".to_string(),
                location_zip: "90265".to_string(),
                location_latitude: "34.025922".to_string(),
                location_longitude: "-118.779757".to_string(),
                location_description: "Beach".to_string(),
                property_id: property_id.to_string(),
                property_name: name.to_string(),
                property_type: "Villa".to_string(),
                bedrooms: "4".to_string(),
                bathrooms: "2.5".to_string(),
                max_guests: "8".to_string(),
                price_per_night: "450.00".to_string(),
                property_description: "Nice".to_string(),
                image_ids: String::new(),
                image_urls: String::new(),
                image_captions: String::new(),
            },
        }
    }

    #[test]
    fn test_shared_location_created_once() {
        let mut first = row(2, "LOC1", "P1", "Villa Sunset");
        first.row.image_ids = "I1, I2".into();
        first.row.image_urls = "http://a, http://b".into();
        first.row.image_captions = "Pool, View".into();
        let mut second = row(3, "LOC1", "P2", "Ocean Condo");
        second.row.image_ids = "I3".into();
        second.row.image_urls = "http://c".into();
        second.row.image_captions = "Deck".into();

        let plan = plan_import(&[first, second]).unwrap();
        assert_eq!(plan.locations.len(), 1);
        assert_eq!(plan.properties.len(), 2);
        assert_eq!(plan.images.len(), 3);
        assert_eq!(
            plan.rows[1].outcome,
            RowOutcome::Created {
                location_created: false,
                images: 1
            }
        );

        let orders: Vec<i32> = plan.images.iter().map(|i| i.order).collect();
        assert_eq!(orders, vec![1, 2, 1]);
        assert_eq!(plan.images[1].caption, "View");
        assert_eq!(plan.images[1].image_url.as_deref(), Some("http://b"));
    }

    #[test]
    fn test_duplicate_property_row_skipped_with_images() {
        let first = row(2, "LOC1", "P1", "Villa Sunset");
        let mut dup = row(3, "LOC1", "P1", "Villa Sunset Again");
        dup.row.image_ids = "I9".into();
        dup.row.image_urls = "http://z".into();
        dup.row.image_captions = "Z".into();

        let plan = plan_import(&[first, dup]).unwrap();
        assert_eq!(plan.properties.len(), 1);
        assert!(plan.images.is_empty());
        assert_eq!(plan.rows[1].outcome, RowOutcome::SkippedDuplicate);
        assert_eq!(plan.report().skipped(), 1);
    }

    #[test]
    fn test_duplicate_property_row_still_creates_new_location() {
        let first = row(2, "LOC1", "P1", "Villa Sunset");
        let dup = row(3, "LOC2", "P1", "Villa Sunset Again");

        let plan = plan_import(&[first, dup]).unwrap();
        let ids: Vec<&str> = plan.locations.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["LOC1", "LOC2"]);
        assert_eq!(plan.properties.len(), 1);
        assert_eq!(plan.properties[0].location_id, "LOC1");
        assert_eq!(plan.rows[1].outcome, RowOutcome::SkippedDuplicate);
    }

    #[test]
    fn test_over_long_ids_rejected_with_row_number() {
        let long = "X".repeat(MAX_ID_LEN + 1);

        let err = plan_import(&[row(2, "LOC1", &long, "A")]).unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
        assert!(err.message().starts_with("Row 2:"));
        assert!(err.message().contains("property_id"));

        let mut r = row(4, "LOC1", "P1", "A");
        r.row.image_ids = long.clone();
        r.row.image_urls = "http://a".into();
        r.row.image_captions = "A".into();
        let err = plan_import(&[r]).unwrap_err();
        assert!(err.message().starts_with("Row 4:"));
        assert!(err.message().contains("image id"));

        let edge = "Y".repeat(MAX_ID_LEN);
        assert!(plan_import(&[row(2, &edge, &edge, "A")]).is_ok());
    }

    #[test]
    fn test_lists_zip_to_shortest() {
        let mut r = row(2, "LOC1", "P1", "Villa Sunset");
        r.row.image_ids = "I1,I2,I3".into();
        r.row.image_urls = "http://a,http://b".into();
        r.row.image_captions = "A,B,C".into();

        let plan = plan_import(&[r]).unwrap();
        assert_eq!(plan.images.len(), 2);
    }

    #[test]
    fn test_empty_id_generated_and_blank_entry_skipped() {
        let mut r = row(2, "LOC1", "P1", "Villa Sunset");
        r.row.image_ids = ",,I3".into();
        r.row.image_urls = "http://a,,http://c".into();
        r.row.image_captions = "A,,C".into();

        let plan = plan_import(&[r]).unwrap();
        assert_eq!(plan.images.len(), 2);
        assert!(plan.images[0].id.starts_with("IMG"));
        assert_eq!(plan.images[0].order, 1);
        assert_eq!(plan.images[1].id, "I3");
        assert_eq!(plan.images[1].order, 3);
    }

    #[test]
    fn test_duplicate_image_id_rejected() {
        let mut a = row(2, "LOC1", "P1", "A");
        a.row.image_ids = "I1".into();
        a.row.image_urls = "http://a".into();
        a.row.image_captions = "A".into();
        let mut b = row(3, "LOC1", "P2", "B");
        b.row.image_ids = "I1".into();
        b.row.image_urls = "http://b".into();
        b.row.image_captions = "B".into();

        let err = plan_import(&[a, b]).unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
        assert!(err.message().starts_with("Row 3:"));
    }

    #[test]
    fn test_validation_errors_name_the_row() {
        let mut bad_type = row(2, "LOC1", "P1", "A");
        bad_type.row.property_type = "Castle".into();
        let err = plan_import(&[bad_type]).unwrap_err();
        assert!(err.message().contains("Row 2"));
        assert!(err.message().contains("Castle"));

        let mut negative = row(4, "LOC1", "P1", "A");
        negative.row.bedrooms = "-1".into();
        let err = plan_import(&[negative]).unwrap_err();
        assert!(err.message().contains("Row 4"));
        assert!(err.message().contains("bedrooms"));

        let mut bad_price = row(5, "LOC1", "P1", "A");
        bad_price.row.price_per_night = "cheap".into();
        assert!(plan_import(&[bad_price]).is_err());

        let missing = row(6, "", "P1", "A");
        assert!(
            plan_import(&[missing])
                .unwrap_err()
                .message()
                .contains("location_id")
        );

        let long_id = row(7, "LOCATION-ID-THAT-IS-TOO-LONG", "P1", "A");
        assert!(plan_import(&[long_id]).is_err());
    }

    #[test]
    fn test_property_type_case_insensitive() {
        let mut r = row(2, "LOC1", "P1", "A");
        r.row.property_type = "penthouse".into();
        let plan = plan_import(&[r]).unwrap();
        assert_eq!(plan.properties[0].property_type, PropertyType::Penthouse);
    }

    #[test]
    fn test_describe_rows() {
        let plan = plan_import(&[row(2, "LOC1", "P1", "Villa Sunset")]).unwrap();
        let line = plan.rows[0].describe();
        assert!(line.contains("created location LOC1"));
        assert!(line.contains("P1"));
    }
}
