//! 房源列表与详情端点

use actix_web::{HttpRequest, HttpResponse, Responder, Result as ActixResult, web};
use std::sync::Arc;
use tracing::{info, trace};

use crate::services::{CatalogService, PageRequest};
use crate::storage::PropertyFilter;

use super::error_code::ErrorCode;
use super::helpers::{
    MediaContext, error_from_catalog, error_with_not_found, paginated_response, success_response,
};
use super::types::{PropertyListQuery, PropertyResponse};

/// GET /properties?search=&location=&page=&page_size=
pub async fn list_properties(
    req: HttpRequest,
    query: web::Query<PropertyListQuery>,
    catalog: web::Data<Arc<CatalogService>>,
    media: web::Data<MediaContext>,
) -> ActixResult<impl Responder> {
    trace!("Catalog API: list properties with {:?}", query);

    let filter = PropertyFilter::new(query.search.as_deref(), query.location.as_deref());
    let request = PageRequest::parse(
        query.page.as_deref(),
        query.page_size.as_deref(),
        catalog.settings(),
    );

    let page = match catalog.list_properties(filter, request).await {
        Ok(page) => page,
        Err(e) => return Ok(error_from_catalog(&e)),
    };

    let resolver = media.resolver_for(&req);
    let page = page.map(|listing| PropertyResponse::from_listing(listing, &resolver));

    info!(
        "Catalog API: returning {} properties (page {} of {}, total: {})",
        page.items.len(),
        page.page,
        page.total_pages,
        page.total
    );

    Ok(paginated_response(page))
}

/// GET /properties/{id}
pub async fn get_property(
    req: HttpRequest,
    id: web::Path<String>,
    catalog: web::Data<Arc<CatalogService>>,
    media: web::Data<MediaContext>,
) -> ActixResult<HttpResponse> {
    trace!("Catalog API: get property {}", id);

    match catalog.get_property(&id).await {
        Ok(listing) => {
            let resolver = media.resolver_for(&req);
            Ok(success_response(PropertyResponse::from_listing(
                listing, &resolver,
            )))
        }
        Err(e) => Ok(error_with_not_found(&e, ErrorCode::PropertyNotFound)),
    }
}
