//! 目录 CSV 读取
//!
//! 每行同时携带位置、房源和图片列表；字段一律按字符串读入，
//! 类型校验交给导入服务，以便报告出错的行号。

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};

use crate::errors::{CatalogError, Result};

/// 导入文件必需的表头
pub const CSV_HEADERS: [&str; 20] = [
    "location_id",
    "location_name",
    "location_city",
    "location_state",
    "location_country",
    "location_zip",
    "location_latitude",
    "location_longitude",
    "location_description",
    "property_id",
    "property_name",
    "property_type",
    "bedrooms",
    "bathrooms",
    "max_guests",
    "price_per_night",
    "property_description",
    "image_ids",
    "image_urls",
    "image_captions",
];

/// CSV 行数据结构
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CsvCatalogRow {
    #[serde(default)]
    pub location_id: String,
    #[serde(default)]
    pub location_name: String,
    #[serde(default)]
    pub location_city: String,
    #[serde(default)]
    pub location_state: String,
    #[serde(default)]
    pub location_country: String,
    #[serde(default)]
    pub location_zip: String,
    #[serde(default)]
    pub location_latitude: String,
    #[serde(default)]
    pub location_longitude: String,
    #[serde(default)]
    pub location_description: String,
    #[serde(default)]
    pub property_id: String,
    #[serde(default)]
    pub property_name: String,
    #[serde(default)]
    pub property_type: String,
    #[serde(default)]
    pub bedrooms: String,
    #[serde(default)]
    pub bathrooms: String,
    #[serde(default)]
    pub max_guests: String,
    #[serde(default)]
    pub price_per_night: String,
    #[serde(default)]
    pub property_description: String,
    #[serde(default)]
    pub image_ids: String,
    #[serde(default)]
    pub image_urls: String,
    #[serde(default)]
    pub image_captions: String,
}

/// 带行号的 CSV 行（行号 1-based，含表头）
#[derive(Debug, Clone, PartialEq)]
pub struct NumberedRow {
    pub line: usize,
    pub row: CsvCatalogRow,
}

/// 从 CSV 文件读取目录数据
pub fn read_catalog_csv<P: AsRef<Path>>(path: P) -> Result<Vec<NumberedRow>> {
    let file = File::open(path.as_ref()).map_err(|e| {
        CatalogError::file_operation(format!(
            "Failed to open {}: {}",
            path.as_ref().display(),
            e
        ))
    })?;
    read_catalog_from(BufReader::new(file))
}

/// 从任意 reader 读取目录数据
pub fn read_catalog_from<R: Read>(reader: R) -> Result<Vec<NumberedRow>> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| CatalogError::serialization(format!("Failed to read CSV header: {}", e)))?
        .clone();
    let missing: Vec<&str> = CSV_HEADERS
        .iter()
        .copied()
        .filter(|h| !headers.iter().any(|actual| actual == *h))
        .collect();
    if !missing.is_empty() {
        return Err(CatalogError::validation(format!(
            "CSV header is missing columns: {}",
            missing.join(", ")
        )));
    }

    let mut rows = Vec::new();
    for (row_idx, result) in csv_reader.deserialize::<CsvCatalogRow>().enumerate() {
        let line = row_idx + 2; // CSV 行号（1-based，跳过 header）
        let row = result
            .map_err(|e| CatalogError::validation(format!("Row {}: CSV parse error: {}", line, e)))?;
        rows.push(NumberedRow { line, row });
    }

    Ok(rows)
}

/// 拆分逗号分隔的列表字段，逐项去空白
pub fn split_list(field: &str) -> Vec<String> {
    if field.trim().is_empty() {
        return Vec::new();
    }
    field.split(',').map(|s| s.trim().to_string()).collect()
}
