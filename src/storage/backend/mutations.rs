//! Mutation operations for SeaOrmStorage
//!
//! This module contains all write database operations.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ConnectionTrait, DbErr, EntityTrait, SqlErr, TransactionTrait};
use tracing::{info, warn};

use super::SeaOrmStorage;
use super::converters::{
    image_to_active_model, location_to_active_model, model_to_image, model_to_location,
    model_to_property, property_to_active_model,
};
use crate::errors::{CatalogError, Result};
use crate::storage::models::{Location, NewPropertyImage, Property, PropertyImage};
use crate::utils::generate_image_id;

use migration::entities::{location, property, property_image};

/// 生成图片 id 冲突时的最大尝试次数
pub const MAX_IMAGE_ID_ATTEMPTS: usize = 5;

/// 批量插入分块大小（避开 SQLite 绑定参数上限）
const INSERT_CHUNK_SIZE: usize = 100;

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

impl SeaOrmStorage {
    pub async fn insert_location(&self, location: &Location) -> Result<Location> {
        let model = location_to_active_model(location)
            .insert(&self.db)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    CatalogError::validation(format!("位置已存在: {}", location.id))
                } else {
                    e.into()
                }
            })?;

        Ok(model_to_location(model))
    }

    pub async fn update_location(&self, location: &Location) -> Result<Location> {
        if location::Entity::find_by_id(location.id.clone())
            .one(&self.db)
            .await?
            .is_none()
        {
            return Err(CatalogError::not_found(format!(
                "位置不存在: {}",
                location.id
            )));
        }

        let model = location_to_active_model(location).update(&self.db).await?;

        Ok(model_to_location(model))
    }

    /// 新建房源，created_at / updated_at 由存储层设置
    pub async fn insert_property(&self, property: &Property) -> Result<Property> {
        let now = Utc::now();
        let model = property_to_active_model(property, true, now)
            .insert(&self.db)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    CatalogError::validation(format!("房源已存在: {}", property.id))
                } else {
                    e.into()
                }
            })?;

        Ok(model_to_property(model))
    }

    /// 更新房源，只刷新 updated_at
    pub async fn update_property(&self, property: &Property) -> Result<Property> {
        if property::Entity::find_by_id(property.id.clone())
            .one(&self.db)
            .await?
            .is_none()
        {
            return Err(CatalogError::not_found(format!(
                "房源不存在: {}",
                property.id
            )));
        }

        let model = property_to_active_model(property, false, Utc::now())
            .update(&self.db)
            .await?;

        Ok(model_to_property(model))
    }

    /// 新建图片；未提供 id 时生成 "IMG" + 6 位十六进制，冲突则重新生成
    pub async fn insert_image(&self, image: NewPropertyImage) -> Result<PropertyImage> {
        let explicit_id = image
            .id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string);

        let mut record = PropertyImage {
            id: explicit_id.clone().unwrap_or_else(generate_image_id),
            property_id: image.property_id,
            image_file: image.image_file,
            image_url: image.image_url,
            caption: image.caption,
            order: image.order,
        };

        for attempt in 1..=MAX_IMAGE_ID_ATTEMPTS {
            match image_to_active_model(&record).insert(&self.db).await {
                Ok(model) => return Ok(model_to_image(model)),
                Err(e) if is_unique_violation(&e) => {
                    if explicit_id.is_some() {
                        return Err(CatalogError::validation(format!(
                            "图片 id 已存在: {}",
                            record.id
                        )));
                    }
                    warn!(
                        "Generated image id {} collided (attempt {}/{})",
                        record.id, attempt, MAX_IMAGE_ID_ATTEMPTS
                    );
                    record.id = generate_image_id();
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(CatalogError::database_operation(format!(
            "生成唯一图片 id 失败（{} 次尝试）",
            MAX_IMAGE_ID_ATTEMPTS
        )))
    }

    /// 删除位置（级联删除其房源和图片）
    pub async fn delete_location(&self, id: &str) -> Result<()> {
        let result = location::Entity::delete_by_id(id.to_string())
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(CatalogError::not_found(format!("位置不存在: {}", id)));
        }

        info!("Location deleted: {}", id);
        Ok(())
    }

    /// 删除房源（级联删除其图片）
    pub async fn delete_property(&self, id: &str) -> Result<()> {
        let result = property::Entity::delete_by_id(id.to_string())
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(CatalogError::not_found(format!("房源不存在: {}", id)));
        }

        info!("Property deleted: {}", id);
        Ok(())
    }

    pub async fn delete_image(&self, id: &str) -> Result<()> {
        let result = property_image::Entity::delete_by_id(id.to_string())
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(CatalogError::not_found(format!("图片不存在: {}", id)));
        }

        info!("Property image deleted: {}", id);
        Ok(())
    }

    /// 清空全部数据
    pub async fn clear_all(&self) -> Result<()> {
        let txn = self.db.begin().await?;
        clear_tables(&txn).await?;
        txn.commit().await?;

        info!("Catalog cleared");
        Ok(())
    }

    /// 在一个事务内清空并写入全部数据；失败时回滚，原数据保持不变
    pub async fn replace_catalog(
        &self,
        locations: &[Location],
        properties: &[Property],
        images: &[PropertyImage],
    ) -> Result<()> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CatalogError::database_operation(format!("开始事务失败: {}", e)))?;

        clear_tables(&txn).await?;

        let now = Utc::now();

        for chunk in locations.chunks(INSERT_CHUNK_SIZE) {
            location::Entity::insert_many(chunk.iter().map(location_to_active_model))
                .exec(&txn)
                .await
                .map_err(|e| CatalogError::database_operation(format!("写入位置失败: {}", e)))?;
        }

        for chunk in properties.chunks(INSERT_CHUNK_SIZE) {
            property::Entity::insert_many(
                chunk
                    .iter()
                    .map(|p| property_to_active_model(p, true, now)),
            )
            .exec(&txn)
            .await
            .map_err(|e| CatalogError::database_operation(format!("写入房源失败: {}", e)))?;
        }

        for chunk in images.chunks(INSERT_CHUNK_SIZE) {
            property_image::Entity::insert_many(chunk.iter().map(image_to_active_model))
                .exec(&txn)
                .await
                .map_err(|e| CatalogError::database_operation(format!("写入图片失败: {}", e)))?;
        }

        txn.commit()
            .await
            .map_err(|e| CatalogError::database_operation(format!("提交事务失败: {}", e)))?;

        info!(
            "Catalog replaced: {} locations, {} properties, {} images",
            locations.len(),
            properties.len(),
            images.len()
        );
        Ok(())
    }
}

/// 按依赖顺序清表（不依赖级联）
async fn clear_tables<C: ConnectionTrait>(conn: &C) -> Result<()> {
    property_image::Entity::delete_many().exec(conn).await?;
    property::Entity::delete_many().exec(conn).await?;
    location::Entity::delete_many().exec(conn).await?;
    Ok(())
}
