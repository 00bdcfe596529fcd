//! SeaORM storage backend
//!
//! This module provides database storage using SeaORM,
//! supporting SQLite, MySQL/MariaDB, and PostgreSQL.

mod connection;
mod converters;
mod mutations;
mod query;

use sea_orm::DatabaseConnection;
use tracing::info;

use crate::errors::{CatalogError, Result};

pub use connection::{connect_generic, connect_sqlite, run_migrations};
pub use converters::{
    fixed, image_to_active_model, location_to_active_model, model_to_image, model_to_location,
    model_to_property, property_to_active_model,
};
pub use mutations::MAX_IMAGE_ID_ATTEMPTS;
pub use query::escape_like;

/// 从数据库 URL 推断数据库类型
pub fn infer_backend_from_url(database_url: &str) -> Result<String> {
    if database_url.starts_with("sqlite://")
        || database_url.starts_with("sqlite:")
        || database_url.ends_with(".db")
        || database_url.ends_with(".sqlite")
        || database_url == ":memory:"
    {
        Ok("sqlite".to_string())
    } else if database_url.starts_with("mysql://") || database_url.starts_with("mariadb://") {
        Ok("mysql".to_string())
    } else if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        Ok("postgres".to_string())
    } else {
        Err(CatalogError::database_config(format!(
            "无法从 URL 推断数据库类型: {}. 支持的 URL 格式: sqlite://, mysql://, mariadb://, postgres://",
            database_url
        )))
    }
}

/// 规范化 backend 名称
pub fn normalize_backend_name(backend: &str) -> String {
    match backend {
        "mariadb" => "mysql".to_string(),
        other => other.to_string(),
    }
}

/// 房源过滤条件
///
/// 空白字符串视为未设置；两个条件同时存在时取交集。
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct PropertyFilter {
    /// 名称包含（不区分大小写）
    pub search: Option<String>,
    /// 所属位置的 city / state / name 任一包含（不区分大小写）
    pub location: Option<String>,
}

impl PropertyFilter {
    pub fn new(search: Option<&str>, location: Option<&str>) -> Self {
        Self {
            search: normalize_term(search),
            location: normalize_term(location),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.search.is_none() && self.location.is_none()
    }
}

fn normalize_term(term: Option<&str>) -> Option<String> {
    term.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

/// 搜索词的大小写折叠方式，需与后端 `LOWER()` 保持一致
///
/// SQLite 内置的 `LOWER()` 只折叠 ASCII 字母；MySQL / PostgreSQL 按 Unicode 折叠。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaseFold {
    Ascii,
    Unicode,
}

impl CaseFold {
    pub fn for_backend(backend_name: &str) -> Self {
        match backend_name {
            "sqlite" => CaseFold::Ascii,
            _ => CaseFold::Unicode,
        }
    }

    pub fn apply(self, term: &str) -> String {
        match self {
            CaseFold::Ascii => term.to_ascii_lowercase(),
            CaseFold::Unicode => term.to_lowercase(),
        }
    }
}

/// SeaORM-based storage backend
#[derive(Clone)]
pub struct SeaOrmStorage {
    db: DatabaseConnection,
    backend_name: String,
    case_fold: CaseFold,
}

impl SeaOrmStorage {
    pub async fn new(database_url: &str, backend_name: &str) -> Result<Self> {
        if database_url.is_empty() {
            return Err(CatalogError::database_config(
                "DATABASE_URL 未设置".to_string(),
            ));
        }

        let backend_name = normalize_backend_name(backend_name);

        // 根据不同数据库类型配置连接选项
        let db = if backend_name == "sqlite" {
            connect_sqlite(database_url).await?
        } else {
            connect_generic(database_url, &backend_name).await?
        };

        let storage = SeaOrmStorage {
            db,
            case_fold: CaseFold::for_backend(&backend_name),
            backend_name,
        };

        // 运行迁移
        run_migrations(&storage.db).await?;

        info!(
            "{} Storage initialized.",
            storage.backend_name.to_uppercase()
        );
        Ok(storage)
    }

    pub fn backend_name(&self) -> &str {
        &self.backend_name
    }

    /// 获取数据库连接
    pub fn get_db(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_backend_from_url() {
        assert_eq!(infer_backend_from_url("rentals.db").unwrap(), "sqlite");
        assert_eq!(
            infer_backend_from_url("sqlite://data/rentals.db?mode=rwc").unwrap(),
            "sqlite"
        );
        assert_eq!(infer_backend_from_url(":memory:").unwrap(), "sqlite");
        assert_eq!(
            infer_backend_from_url("mariadb://u:p@localhost/rentals").unwrap(),
            "mysql"
        );
        assert_eq!(
            infer_backend_from_url("postgresql://localhost/rentals").unwrap(),
            "postgres"
        );
        assert!(infer_backend_from_url("ftp://nowhere").is_err());
    }

    #[test]
    fn test_normalize_backend_name() {
        assert_eq!(normalize_backend_name("mariadb"), "mysql");
        assert_eq!(normalize_backend_name("sqlite"), "sqlite");
    }

    #[test]
    fn test_property_filter_ignores_blank_terms() {
        let filter = PropertyFilter::new(Some("   "), Some(""));
        assert!(filter.is_empty());

        let filter = PropertyFilter::new(Some("  villa "), None);
        assert_eq!(filter.search.as_deref(), Some("villa"));
        assert!(filter.location.is_none());
    }

    #[test]
    fn test_case_fold_for_backend() {
        assert_eq!(CaseFold::for_backend("sqlite"), CaseFold::Ascii);
        assert_eq!(CaseFold::for_backend("postgres"), CaseFold::Unicode);
        assert_eq!(CaseFold::for_backend("mysql"), CaseFold::Unicode);
    }

    #[test]
    fn test_case_fold_apply() {
        assert_eq!(CaseFold::Ascii.apply("ÉTÉ Villa"), "ÉtÉ villa");
        assert_eq!(CaseFold::Unicode.apply("ÉTÉ Villa"), "été villa");
    }
}
