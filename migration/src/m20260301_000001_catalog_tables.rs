use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建 locations 表
        manager
            .create_table(
                Table::create()
                    .table(Location::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Location::Id)
                            .string_len(20)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Location::Name).string_len(200).not_null())
                    .col(ColumnDef::new(Location::City).string_len(100).not_null())
                    .col(ColumnDef::new(Location::State).string_len(100).not_null())
                    .col(ColumnDef::new(Location::Country).string_len(100).not_null())
                    .col(ColumnDef::new(Location::Zip).string_len(20).not_null())
                    .col(
                        ColumnDef::new(Location::Latitude)
                            .decimal_len(9, 6)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Location::Longitude)
                            .decimal_len(9, 6)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Location::Description).text().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建 properties 表，删除 location 时级联删除
        manager
            .create_table(
                Table::create()
                    .table(Property::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Property::Id)
                            .string_len(20)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Property::Name).string_len(200).not_null())
                    .col(
                        ColumnDef::new(Property::PropertyType)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Property::Bedrooms).integer().not_null())
                    .col(
                        ColumnDef::new(Property::Bathrooms)
                            .decimal_len(3, 1)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Property::MaxGuests).integer().not_null())
                    .col(
                        ColumnDef::new(Property::PricePerNight)
                            .decimal_len(10, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Property::Description).text().not_null())
                    .col(
                        ColumnDef::new(Property::LocationId)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Property::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Property::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_properties_location")
                            .from(Property::Table, Property::LocationId)
                            .to(Location::Table, Location::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建 property_images 表，删除 property 时级联删除
        manager
            .create_table(
                Table::create()
                    .table(PropertyImage::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PropertyImage::Id)
                            .string_len(20)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PropertyImage::PropertyId)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PropertyImage::ImageFile)
                            .string_len(255)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(PropertyImage::ImageUrl)
                            .string_len(500)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(PropertyImage::Caption)
                            .string_len(300)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(PropertyImage::ImageOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_property_images_property")
                            .from(PropertyImage::Table, PropertyImage::PropertyId)
                            .to(Property::Table, Property::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PropertyImage::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Property::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Location::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Location {
    #[sea_orm(iden = "locations")]
    Table,
    Id,
    Name,
    City,
    State,
    Country,
    Zip,
    Latitude,
    Longitude,
    Description,
}

#[derive(DeriveIden)]
pub(crate) enum Property {
    #[sea_orm(iden = "properties")]
    Table,
    Id,
    Name,
    PropertyType,
    Bedrooms,
    Bathrooms,
    MaxGuests,
    PricePerNight,
    Description,
    LocationId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum PropertyImage {
    #[sea_orm(iden = "property_images")]
    Table,
    Id,
    PropertyId,
    ImageFile,
    ImageUrl,
    Caption,
    ImageOrder,
}
