//! Query operations for SeaOrmStorage
//!
//! This module contains all read-only database operations.

use std::collections::HashMap;

use sea_orm::{
    ColumnTrait, Condition, EntityTrait, ExprTrait, FromQueryResult, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
    sea_query::{Expr, Func, IntoColumnRef, LikeExpr},
};
use tracing::trace;

use super::converters::{model_to_image, model_to_location, model_to_property};
use super::{CaseFold, PropertyFilter, SeaOrmStorage};
use crate::errors::{CatalogError, Result};
use crate::storage::models::{
    CatalogStats, ImageCount, Location, LocationWithCount, Property, PropertyImage,
    PropertyListing,
};

use migration::entities::{location, property, property_image};

/// 分组计数结果
#[derive(Debug, FromQueryResult)]
struct GroupCount {
    key: String,
    total: i64,
}

/// 转义 LIKE 通配符，使用户输入按字面匹配
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// `LOWER(col) LIKE '%term%'`
///
/// 搜索词按后端 `LOWER()` 的规则折叠，两侧一致；SQLite 上非 ASCII 字母区分大小写。
fn contains_ci<C: IntoColumnRef>(col: C, term: &str, fold: CaseFold) -> Condition {
    let pattern = format!("%{}%", escape_like(&fold.apply(term)));
    Condition::all().add(
        Expr::expr(Func::lower(Expr::col(col))).like(LikeExpr::new(pattern).escape('\\')),
    )
}

/// 位置的 city / state / name 任一匹配
fn location_matches(term: &str, fold: CaseFold) -> Condition {
    Condition::any()
        .add(contains_ci((location::Entity, location::Column::City), term, fold))
        .add(contains_ci((location::Entity, location::Column::State), term, fold))
        .add(contains_ci((location::Entity, location::Column::Name), term, fold))
}

fn property_condition(filter: &PropertyFilter, fold: CaseFold) -> Condition {
    let mut condition = Condition::all();

    if let Some(ref search) = filter.search {
        condition = condition.add(contains_ci(
            (property::Entity, property::Column::Name),
            search,
            fold,
        ));
    }

    if let Some(ref term) = filter.location {
        condition = condition.add(location_matches(term, fold));
    }

    condition
}

fn to_u64(value: i64) -> u64 {
    u64::try_from(value).unwrap_or(0)
}

impl SeaOrmStorage {
    /// 满足过滤条件的房源总数，每次请求都查询
    pub async fn count_properties(&self, filter: &PropertyFilter) -> Result<u64> {
        let count = property::Entity::find()
            .inner_join(location::Entity)
            .filter(property_condition(filter, self.case_fold))
            .count(&self.db)
            .await?;

        trace!("count_properties: filter={:?}, count={}", filter, count);
        Ok(count)
    }

    /// 加载一页房源，位置随页查询 JOIN，图片整页一次批量加载
    pub async fn load_properties(
        &self,
        filter: &PropertyFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<PropertyListing>> {
        let rows = property::Entity::find()
            .find_also_related(location::Entity)
            .filter(property_condition(filter, self.case_fold))
            .order_by_desc(property::Column::CreatedAt)
            .order_by_asc(property::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await?;

        trace!(
            "load_properties: offset={}, limit={}, rows={}",
            offset,
            limit,
            rows.len()
        );

        self.attach_images(rows).await
    }

    /// 单个房源（含位置和有序图片）
    pub async fn get_property(&self, id: &str) -> Result<Option<PropertyListing>> {
        let row = property::Entity::find_by_id(id.to_string())
            .find_also_related(location::Entity)
            .one(&self.db)
            .await?;

        match row {
            Some(row) => Ok(self.attach_images(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    /// 名称包含 `term` 的房源，按名称、id 排序
    pub async fn property_suggestions(
        &self,
        term: &str,
        limit: u64,
    ) -> Result<Vec<(Property, Location)>> {
        let rows = property::Entity::find()
            .find_also_related(location::Entity)
            .filter(contains_ci(
                (property::Entity, property::Column::Name),
                term,
                self.case_fold,
            ))
            .order_by_asc(property::Column::Name)
            .order_by_asc(property::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await?;

        rows.into_iter()
            .map(|(model, loc)| {
                let loc = loc.ok_or_else(|| dangling_location(&model))?;
                Ok((model_to_property(model), model_to_location(loc)))
            })
            .collect()
    }

    /// city / state / name 匹配 `term` 的位置，附带房源数量
    pub async fn location_suggestions(
        &self,
        term: &str,
        limit: u64,
    ) -> Result<Vec<LocationWithCount>> {
        let locations = location::Entity::find()
            .filter(location_matches(term, self.case_fold))
            .order_by_asc(location::Column::Name)
            .order_by_asc(location::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await?;

        if locations.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<String> = locations.iter().map(|l| l.id.clone()).collect();
        let counts = self.property_counts_for(ids).await?;

        Ok(locations
            .into_iter()
            .map(|model| {
                let property_count = counts.get(&model.id).copied().unwrap_or(0);
                LocationWithCount {
                    location: model_to_location(model),
                    property_count,
                }
            })
            .collect())
    }

    /// 全部位置，按名称排序
    pub async fn list_locations(&self) -> Result<Vec<Location>> {
        let models = location::Entity::find()
            .order_by_asc(location::Column::Name)
            .order_by_asc(location::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(model_to_location).collect())
    }

    pub async fn get_location(&self, id: &str) -> Result<Option<Location>> {
        let model = location::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await?;
        Ok(model.map(model_to_location))
    }

    /// 单个房源的有序图片
    pub async fn images_for_property(&self, property_id: &str) -> Result<Vec<PropertyImage>> {
        let models = property_image::Entity::find()
            .filter(property_image::Column::PropertyId.eq(property_id))
            .order_by_asc(property_image::Column::ImageOrder)
            .order_by_asc(property_image::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(model_to_image).collect())
    }

    /// 各实体总数
    pub async fn stats(&self) -> Result<CatalogStats> {
        let locations = location::Entity::find().count(&self.db).await?;
        let properties = property::Entity::find().count(&self.db).await?;
        let images = property_image::Entity::find().count(&self.db).await?;

        Ok(CatalogStats {
            locations,
            properties,
            images,
        })
    }

    /// 每个房源的图片数量，按房源名称排序
    pub async fn image_counts(&self) -> Result<Vec<ImageCount>> {
        let properties: Vec<(String, String)> = property::Entity::find()
            .select_only()
            .column(property::Column::Id)
            .column(property::Column::Name)
            .order_by_asc(property::Column::Name)
            .order_by_asc(property::Column::Id)
            .into_tuple()
            .all(&self.db)
            .await?;

        let counts: HashMap<String, u64> = property_image::Entity::find()
            .select_only()
            .column_as(property_image::Column::PropertyId, "key")
            .column_as(property_image::Column::Id.count(), "total")
            .group_by(property_image::Column::PropertyId)
            .into_model::<GroupCount>()
            .all(&self.db)
            .await?
            .into_iter()
            .map(|row| (row.key, to_u64(row.total)))
            .collect();

        Ok(properties
            .into_iter()
            .map(|(property_id, property_name)| {
                let images = counts.get(&property_id).copied().unwrap_or(0);
                ImageCount {
                    property_id,
                    property_name,
                    images,
                }
            })
            .collect())
    }

    /// 一次 GROUP BY 查询给定位置的房源数量
    async fn property_counts_for(&self, location_ids: Vec<String>) -> Result<HashMap<String, u64>> {
        let rows = property::Entity::find()
            .select_only()
            .column_as(property::Column::LocationId, "key")
            .column_as(property::Column::Id.count(), "total")
            .filter(property::Column::LocationId.is_in(location_ids))
            .group_by(property::Column::LocationId)
            .into_model::<GroupCount>()
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| (row.key, to_u64(row.total)))
            .collect())
    }

    /// 为一批房源批量加载图片（单次查询）
    async fn attach_images(
        &self,
        rows: Vec<(property::Model, Option<location::Model>)>,
    ) -> Result<Vec<PropertyListing>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<String> = rows.iter().map(|(p, _)| p.id.clone()).collect();
        let mut images: HashMap<String, Vec<PropertyImage>> = HashMap::new();

        let models = property_image::Entity::find()
            .filter(property_image::Column::PropertyId.is_in(ids))
            .order_by_asc(property_image::Column::ImageOrder)
            .order_by_asc(property_image::Column::Id)
            .all(&self.db)
            .await?;

        for model in models {
            let image = model_to_image(model);
            images
                .entry(image.property_id.clone())
                .or_default()
                .push(image);
        }

        rows.into_iter()
            .map(|(model, loc)| {
                let loc = loc.ok_or_else(|| dangling_location(&model))?;
                let images = images.remove(&model.id).unwrap_or_default();
                Ok(PropertyListing {
                    property: model_to_property(model),
                    location: model_to_location(loc),
                    images,
                })
            })
            .collect()
    }
}

fn dangling_location(model: &property::Model) -> CatalogError {
    CatalogError::database_operation(format!(
        "房源 {} 引用的位置 {} 不存在",
        model.id, model.location_id
    ))
}
