//! Catalog API 帮助函数

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};
use serde::Serialize;

use crate::config::ApiConfig;
use crate::errors::CatalogError;
use crate::services::{ImageResolver, Page};

use super::error_code::ErrorCode;
use super::types::{ApiResponse, PaginatedResponse, PaginationInfo};

/// 构建 JSON 响应
pub fn json_response<T: Serialize>(
    status: StatusCode,
    code: ErrorCode,
    message: impl Into<String>,
    data: Option<T>,
) -> HttpResponse {
    HttpResponse::build(status)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(ApiResponse {
            code: code as i32,
            message: message.into(),
            data,
        })
}

/// 构建成功响应
pub fn success_response<T: Serialize>(data: T) -> HttpResponse {
    json_response(StatusCode::OK, ErrorCode::Success, "OK", Some(data))
}

/// 构建分页响应
pub fn paginated_response<T: Serialize>(page: Page<T>) -> HttpResponse {
    let pagination = PaginationInfo::from(&page);
    HttpResponse::Ok()
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(PaginatedResponse {
            code: ErrorCode::Success as i32,
            message: "OK".to_string(),
            data: page.items,
            pagination,
        })
}

/// 构建错误响应
pub fn error_response(status: StatusCode, error_code: ErrorCode, message: &str) -> HttpResponse {
    json_response::<()>(status, error_code, message, None)
}

/// 从 CatalogError 构建错误响应（自动映射 HTTP 状态码和 ErrorCode）
pub fn error_from_catalog(err: &CatalogError) -> HttpResponse {
    let status = err.http_status();
    let error_code = ErrorCode::from(err);
    if status.is_server_error() {
        tracing::error!("Catalog API error: {}", err);
    }
    error_response(status, error_code, err.message())
}

/// 与 `error_from_catalog` 相同，但 NotFound 使用指定的资源错误码
pub fn error_with_not_found(err: &CatalogError, not_found: ErrorCode) -> HttpResponse {
    if err.is_not_found() {
        error_response(StatusCode::NOT_FOUND, not_found, err.message())
    } else {
        error_from_catalog(err)
    }
}

/// 统一 Result → HttpResponse 转换
///
/// 成功时返回 200 OK + JSON 数据，失败时自动映射 CatalogError。
pub fn api_result<T, E>(result: Result<T, E>) -> HttpResponse
where
    T: Serialize,
    E: Into<CatalogError>,
{
    match result {
        Ok(data) => success_response(data),
        Err(e) => {
            let err: CatalogError = e.into();
            error_from_catalog(&err)
        }
    }
}

/// 图片 URL 上下文
///
/// 配置了 `media_base_url` 时始终使用它；否则在 `absolute_media_urls`
/// 开启时按请求的 scheme://host 生成绝对地址。
#[derive(Debug, Clone)]
pub struct MediaContext {
    resolver: ImageResolver,
    absolute_from_request: bool,
}

impl MediaContext {
    pub fn new(resolver: ImageResolver, absolute_from_request: bool) -> Self {
        Self {
            resolver,
            absolute_from_request,
        }
    }

    pub fn from_config(api: &ApiConfig) -> Self {
        Self::new(ImageResolver::from_config(api), api.absolute_media_urls)
    }

    /// 当前请求使用的解析器
    pub fn resolver_for(&self, req: &HttpRequest) -> ImageResolver {
        if self.resolver.base_url().is_some() || !self.absolute_from_request {
            return self.resolver.clone();
        }

        let info = req.connection_info();
        self.resolver
            .with_base_url(Some(format!("{}://{}", info.scheme(), info.host())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_success_response() {
        let response = success_response("success_data");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_error_from_catalog_status() {
        let response = error_from_catalog(&CatalogError::validation("bad"));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = error_from_catalog(&CatalogError::database_operation("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_with_not_found_keeps_status() {
        let response = error_with_not_found(
            &CatalogError::not_found("property X"),
            ErrorCode::PropertyNotFound,
        );
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_resolver_for_request_host() {
        let media = MediaContext::new(ImageResolver::default(), true);
        let req = TestRequest::default()
            .insert_header(("Host", "rentals.example.com"))
            .to_http_request();

        let resolver = media.resolver_for(&req);
        assert_eq!(
            resolver.file_url("a.jpg"),
            "http://rentals.example.com/media/a.jpg"
        );
    }

    #[test]
    fn test_resolver_for_relative_when_disabled() {
        let media = MediaContext::new(ImageResolver::default(), false);
        let req = TestRequest::default().to_http_request();
        assert_eq!(media.resolver_for(&req).file_url("a.jpg"), "/media/a.jpg");
    }

    #[test]
    fn test_configured_base_wins() {
        let mut api = ApiConfig::default();
        api.media_base_url = Some("https://static.example.com".into());
        let media = MediaContext::from_config(&api);
        let req = TestRequest::default()
            .insert_header(("Host", "rentals.example.com"))
            .to_http_request();
        assert_eq!(
            media.resolver_for(&req).file_url("a.jpg"),
            "https://static.example.com/media/a.jpg"
        );
    }
}
