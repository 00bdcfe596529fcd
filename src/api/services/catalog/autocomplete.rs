//! 自动补全端点
//!
//! 查询过短时返回空数组，不视为错误。

use actix_web::{HttpResponse, Result as ActixResult, web};
use std::sync::Arc;
use tracing::trace;

use crate::services::CatalogService;

use super::helpers::api_result;
use super::types::{AutocompleteQuery, LocationSuggestionResponse, PropertySuggestionResponse};

/// GET /property-autocomplete?q=
pub async fn property_autocomplete(
    query: web::Query<AutocompleteQuery>,
    catalog: web::Data<Arc<CatalogService>>,
) -> ActixResult<HttpResponse> {
    trace!("Catalog API: property autocomplete q={:?}", query.q);

    let result = catalog
        .property_autocomplete(query.q.as_deref())
        .await
        .map(|items| {
            items
                .into_iter()
                .map(PropertySuggestionResponse::from)
                .collect::<Vec<_>>()
        });
    Ok(api_result(result))
}

/// GET /location-autocomplete?q=
pub async fn location_autocomplete(
    query: web::Query<AutocompleteQuery>,
    catalog: web::Data<Arc<CatalogService>>,
) -> ActixResult<HttpResponse> {
    trace!("Catalog API: location autocomplete q={:?}", query.q);

    let result = catalog
        .location_autocomplete(query.q.as_deref())
        .await
        .map(|items| {
            items
                .into_iter()
                .map(LocationSuggestionResponse::from)
                .collect::<Vec<_>>()
        });
    Ok(api_result(result))
}
