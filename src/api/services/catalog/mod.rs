//! Catalog API 服务模块
//!
//! 对外只读端点：
//! - 房源分页列表与详情
//! - 位置列表与详情
//! - 房源 / 位置自动补全

mod autocomplete;
pub mod error_code;
mod helpers;
mod locations;
mod properties;
pub mod routes;
mod types;

// 重新导出类型
pub use types::*;

// 重新导出帮助函数
pub use helpers::{
    MediaContext, api_result, error_from_catalog, error_response, error_with_not_found,
    json_response, paginated_response, success_response,
};

// 重新导出错误码
pub use error_code::ErrorCode;

pub use autocomplete::{location_autocomplete, property_autocomplete};
pub use locations::{get_location, list_locations};
pub use properties::{get_property, list_properties};
pub use routes::catalog_routes;
