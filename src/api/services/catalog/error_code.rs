//! 统一 API 错误码定义

use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::errors::CatalogError;

/// API 错误码枚举
///
/// 使用 serde_repr 序列化为数字。
/// 按千位分域：
/// - 0: 成功
/// - 1000-1099: 通用错误
/// - 3000-3099: 目录资源错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(i32)]
pub enum ErrorCode {
    // 成功
    Success = 0,

    // 通用错误 1000-1099
    BadRequest = 1000,
    NotFound = 1004,
    InternalServerError = 1005,
    ServiceUnavailable = 1030,

    // 目录资源错误 3000-3099
    PropertyNotFound = 3000,
    LocationNotFound = 3001,
    CatalogDatabaseError = 3005,
}

impl From<&CatalogError> for ErrorCode {
    fn from(err: &CatalogError) -> Self {
        match err {
            CatalogError::Validation(_) => ErrorCode::BadRequest,
            CatalogError::NotFound(_) => ErrorCode::NotFound,
            CatalogError::DatabaseConnection(_) => ErrorCode::ServiceUnavailable,
            CatalogError::DatabaseOperation(_) => ErrorCode::CatalogDatabaseError,
            CatalogError::DatabaseConfig(_)
            | CatalogError::FileOperation(_)
            | CatalogError::Serialization(_) => ErrorCode::InternalServerError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_number() {
        assert_eq!(
            serde_json::to_string(&ErrorCode::PropertyNotFound).unwrap(),
            "3000"
        );
        assert_eq!(serde_json::to_string(&ErrorCode::Success).unwrap(), "0");
    }

    #[test]
    fn test_from_catalog_error() {
        assert_eq!(
            ErrorCode::from(&CatalogError::validation("x")),
            ErrorCode::BadRequest
        );
        assert_eq!(
            ErrorCode::from(&CatalogError::database_operation("x")),
            ErrorCode::CatalogDatabaseError
        );
        assert_eq!(
            ErrorCode::from(&CatalogError::database_connection("x")),
            ErrorCode::ServiceUnavailable
        );
    }
}
