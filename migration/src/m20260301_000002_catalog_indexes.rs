use sea_orm_migration::prelude::*;

use crate::m20260301_000001_catalog_tables::{Location, Property, PropertyImage};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 默认排序：locations 按名称
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_locations_name")
                    .table(Location::Table)
                    .col(Location::Name)
                    .to_owned(),
            )
            .await?;

        // 默认排序：properties 按创建时间倒序
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_properties_created_at")
                    .table(Property::Table)
                    .col(Property::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_properties_location_id")
                    .table(Property::Table)
                    .col(Property::LocationId)
                    .to_owned(),
            )
            .await?;

        // 图片按 (property_id, image_order) 批量加载
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_property_images_property_order")
                    .table(PropertyImage::Table)
                    .col(PropertyImage::PropertyId)
                    .col(PropertyImage::ImageOrder)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_property_images_property_order")
                    .table(PropertyImage::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_properties_location_id")
                    .table(Property::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_properties_created_at")
                    .table(Property::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_locations_name")
                    .table(Location::Table)
                    .to_owned(),
            )
            .await
    }
}
