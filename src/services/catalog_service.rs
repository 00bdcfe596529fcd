//! Catalog query service
//!
//! Read-side business logic shared by the HTTP handlers and the CLI:
//! paginated listing, detail lookups, autocomplete and admin deletes.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::config::ApiConfig;
use crate::errors::{CatalogError, Result};
use crate::storage::{
    CatalogStats, ImageCount, Location, LocationWithCount, PropertyFilter, PropertyListing,
    PropertyType, SeaOrmStorage,
};
use crate::utils::char_len;

// ============ Settings ============

/// 分页与自动补全参数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogSettings {
    pub default_page_size: u64,
    pub max_page_size: u64,
    pub autocomplete_limit: u64,
    pub autocomplete_min_chars: usize,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            default_page_size: 5,
            max_page_size: 100,
            autocomplete_limit: 5,
            autocomplete_min_chars: 2,
        }
    }
}

impl CatalogSettings {
    pub fn from_config(api: &ApiConfig) -> Self {
        let max_page_size = api.max_page_size.max(1);
        Self {
            default_page_size: api.default_page_size.clamp(1, max_page_size),
            max_page_size,
            autocomplete_limit: api.autocomplete_limit.max(1),
            autocomplete_min_chars: api.autocomplete_min_chars,
        }
    }
}

// ============ Pagination ============

/// 规范化后的分页请求
///
/// `page` 为 `None` 表示页码无法解析；之后的越界检查在拿到总数后进行。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: Option<u64>,
    pub page_size: u64,
}

impl PageRequest {
    /// 解析原始查询参数
    ///
    /// - page 缺失/空白 → 1；无法解析 → None
    /// - page_size 缺失/无法解析/0 → 默认值；超过上限 → 上限
    pub fn parse(page: Option<&str>, page_size: Option<&str>, settings: &CatalogSettings) -> Self {
        let page = match page.map(str::trim).filter(|p| !p.is_empty()) {
            None => Some(1),
            Some(raw) => raw.parse::<u64>().ok(),
        };

        let page_size = page_size
            .map(str::trim)
            .and_then(|raw| raw.parse::<u64>().ok())
            .filter(|size| *size > 0)
            .unwrap_or(settings.default_page_size)
            .min(settings.max_page_size);

        Self { page, page_size }
    }

    pub fn first(page_size: u64) -> Self {
        Self {
            page: Some(1),
            page_size: page_size.max(1),
        }
    }
}

/// 一页数据及分页信息
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    /// 请求的页码（无法解析时为 0）
    pub page: u64,
    pub page_size: u64,
    pub total_pages: u64,
    pub next_page: Option<u64>,
    pub previous_page: Option<u64>,
}

/// 总页数；没有数据时仍有 1 页（空页）
pub fn total_pages(total: u64, page_size: u64) -> u64 {
    total.div_ceil(page_size.max(1)).max(1)
}

impl<T> Page<T> {
    /// 页码是否落在 [1, total_pages] 内
    pub fn is_valid(request: &PageRequest, total: u64) -> bool {
        matches!(request.page, Some(p) if p >= 1 && p <= total_pages(total, request.page_size))
    }

    pub fn new(items: Vec<T>, total: u64, request: &PageRequest) -> Self {
        let pages = total_pages(total, request.page_size);
        let valid = Self::is_valid(request, total);
        let page = request.page.unwrap_or(0);

        Self {
            items,
            total,
            page,
            page_size: request.page_size,
            total_pages: pages,
            next_page: (valid && page < pages).then(|| page + 1),
            previous_page: (valid && page > 1).then(|| page - 1),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            page_size: self.page_size,
            total_pages: self.total_pages,
            next_page: self.next_page,
            previous_page: self.previous_page,
        }
    }
}

// ============ DTOs ============

/// 房源自动补全条目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertySuggestion {
    pub id: String,
    pub name: String,
    pub property_type: PropertyType,
    /// "city, state"
    pub location: String,
}

// ============ Service ============

pub struct CatalogService {
    storage: Arc<SeaOrmStorage>,
    settings: CatalogSettings,
}

impl CatalogService {
    pub fn new(storage: Arc<SeaOrmStorage>, settings: CatalogSettings) -> Self {
        Self { storage, settings }
    }

    pub fn settings(&self) -> &CatalogSettings {
        &self.settings
    }

    pub fn storage(&self) -> &Arc<SeaOrmStorage> {
        &self.storage
    }

    /// 分页列出房源（最新在前）
    ///
    /// 无效页码返回空列表和真实总数，不报错。
    pub async fn list_properties(
        &self,
        filter: PropertyFilter,
        request: PageRequest,
    ) -> Result<Page<PropertyListing>> {
        let total = self.storage.count_properties(&filter).await?;

        if !Page::<PropertyListing>::is_valid(&request, total) {
            debug!(
                "Out-of-range page {:?} (total={}, page_size={})",
                request.page, total, request.page_size
            );
            return Ok(Page::new(Vec::new(), total, &request));
        }

        let page = request.page.unwrap_or(1);
        let offset = (page - 1) * request.page_size;
        let items = self
            .storage
            .load_properties(&filter, offset, request.page_size)
            .await?;

        Ok(Page::new(items, total, &request))
    }

    pub async fn get_property(&self, id: &str) -> Result<PropertyListing> {
        self.storage
            .get_property(id)
            .await?
            .ok_or_else(|| CatalogError::not_found(format!("property {}", id)))
    }

    /// 查询过短时返回空列表
    ///
    /// 先去掉首尾空白再按字符数判断，`" a "` 只算 1 个字符，返回 `None`；
    /// 空白不计入最小长度。
    fn autocomplete_term<'a>(&self, q: Option<&'a str>) -> Option<&'a str> {
        q.map(str::trim)
            .filter(|term| char_len(term) >= self.settings.autocomplete_min_chars.max(1))
    }

    pub async fn property_autocomplete(&self, q: Option<&str>) -> Result<Vec<PropertySuggestion>> {
        let Some(term) = self.autocomplete_term(q) else {
            return Ok(Vec::new());
        };

        let rows = self
            .storage
            .property_suggestions(term, self.settings.autocomplete_limit)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(property, location)| PropertySuggestion {
                id: property.id,
                name: property.name,
                property_type: property.property_type,
                location: location.display(),
            })
            .collect())
    }

    pub async fn location_autocomplete(&self, q: Option<&str>) -> Result<Vec<LocationWithCount>> {
        let Some(term) = self.autocomplete_term(q) else {
            return Ok(Vec::new());
        };

        self.storage
            .location_suggestions(term, self.settings.autocomplete_limit)
            .await
    }

    pub async fn list_locations(&self) -> Result<Vec<Location>> {
        self.storage.list_locations().await
    }

    pub async fn get_location(&self, id: &str) -> Result<Location> {
        self.storage
            .get_location(id)
            .await?
            .ok_or_else(|| CatalogError::not_found(format!("location {}", id)))
    }

    pub async fn stats(&self) -> Result<CatalogStats> {
        self.storage.stats().await
    }

    /// 管理端：每个房源的图片数量
    pub async fn image_counts(&self) -> Result<Vec<ImageCount>> {
        self.storage.image_counts().await
    }

    pub async fn remove_location(&self, id: &str) -> Result<()> {
        self.storage.delete_location(id).await?;
        info!("Removed location {} and its properties", id);
        Ok(())
    }

    pub async fn remove_property(&self, id: &str) -> Result<()> {
        self.storage.delete_property(id).await?;
        info!("Removed property {} and its images", id);
        Ok(())
    }

    pub async fn remove_image(&self, id: &str) -> Result<()> {
        self.storage.delete_image(id).await
    }
}
