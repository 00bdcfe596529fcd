//! 位置端点

use actix_web::{HttpResponse, Result as ActixResult, web};
use std::sync::Arc;
use tracing::trace;

use crate::services::CatalogService;

use super::error_code::ErrorCode;
use super::helpers::{api_result, error_with_not_found, success_response};
use super::types::LocationResponse;

/// GET /locations
pub async fn list_locations(catalog: web::Data<Arc<CatalogService>>) -> ActixResult<HttpResponse> {
    trace!("Catalog API: list locations");

    let result = catalog.list_locations().await.map(|locations| {
        locations
            .into_iter()
            .map(LocationResponse::from)
            .collect::<Vec<_>>()
    });
    Ok(api_result(result))
}

/// GET /locations/{id}
pub async fn get_location(
    id: web::Path<String>,
    catalog: web::Data<Arc<CatalogService>>,
) -> ActixResult<HttpResponse> {
    trace!("Catalog API: get location {}", id);

    match catalog.get_location(&id).await {
        Ok(location) => Ok(success_response(LocationResponse::from(location))),
        Err(e) => Ok(error_with_not_found(&e, ErrorCode::LocationNotFound)),
    }
}
