use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone)]
pub enum CatalogError {
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    FileOperation(String),
    Validation(String),
    NotFound(String),
    Serialization(String),
}

impl CatalogError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            CatalogError::DatabaseConfig(_) => "E001",
            CatalogError::DatabaseConnection(_) => "E002",
            CatalogError::DatabaseOperation(_) => "E003",
            CatalogError::FileOperation(_) => "E004",
            CatalogError::Validation(_) => "E005",
            CatalogError::NotFound(_) => "E006",
            CatalogError::Serialization(_) => "E007",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            CatalogError::DatabaseConfig(_) => "Database Configuration Error",
            CatalogError::DatabaseConnection(_) => "Database Connection Error",
            CatalogError::DatabaseOperation(_) => "Database Operation Error",
            CatalogError::FileOperation(_) => "File Operation Error",
            CatalogError::Validation(_) => "Validation Error",
            CatalogError::NotFound(_) => "Resource Not Found",
            CatalogError::Serialization(_) => "Serialization Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            CatalogError::DatabaseConfig(msg) => msg,
            CatalogError::DatabaseConnection(msg) => msg,
            CatalogError::DatabaseOperation(msg) => msg,
            CatalogError::FileOperation(msg) => msg,
            CatalogError::Validation(msg) => msg,
            CatalogError::NotFound(msg) => msg,
            CatalogError::Serialization(msg) => msg,
        }
    }

    /// 映射到 HTTP 状态码
    ///
    /// 存储层故障一律视为 5xx，不在本层重试。
    pub fn http_status(&self) -> StatusCode {
        match self {
            CatalogError::Validation(_) => StatusCode::BAD_REQUEST,
            CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
            CatalogError::DatabaseConnection(_) => StatusCode::SERVICE_UNAVAILABLE,
            CatalogError::DatabaseConfig(_)
            | CatalogError::DatabaseOperation(_)
            | CatalogError::FileOperation(_)
            | CatalogError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 格式化为彩色输出（用于 Server 模式）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出（用于 CLI 模式）
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 默认使用简洁格式
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CatalogError {}

// 便捷的构造函数
impl CatalogError {
    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        CatalogError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        CatalogError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        CatalogError::DatabaseOperation(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        CatalogError::FileOperation(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        CatalogError::Validation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        CatalogError::NotFound(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        CatalogError::Serialization(msg.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound(_))
    }
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for CatalogError {
    fn from(err: sea_orm::DbErr) -> Self {
        match err {
            sea_orm::DbErr::Conn(_) | sea_orm::DbErr::ConnectionAcquire(_) => {
                CatalogError::DatabaseConnection(err.to_string())
            }
            other => CatalogError::DatabaseOperation(other.to_string()),
        }
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        CatalogError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Serialization(err.to_string())
    }
}

impl From<csv::Error> for CatalogError {
    fn from(err: csv::Error) -> Self {
        CatalogError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
