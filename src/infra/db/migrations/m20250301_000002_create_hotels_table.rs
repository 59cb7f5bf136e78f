//! Migration: Create hotels table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Table and column identifiers for Hotels
#[derive(Iden)]
enum Hotels {
    Table,
    Id,
    OwnerId,
    Name,
    Description,
    City,
    State,
    Address,
    PricePerNight,
    Amenities,
    Images,
    Rating,
    TotalReviews,
    IsApproved,
    CreatedAt,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Hotels::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Hotels::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Hotels::OwnerId).uuid().not_null())
                    .col(ColumnDef::new(Hotels::Name).string().not_null())
                    .col(ColumnDef::new(Hotels::Description).text().not_null())
                    .col(ColumnDef::new(Hotels::City).string().not_null())
                    .col(ColumnDef::new(Hotels::State).string().not_null())
                    .col(ColumnDef::new(Hotels::Address).string().not_null())
                    .col(
                        ColumnDef::new(Hotels::PricePerNight)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Hotels::Amenities).json_binary().not_null())
                    .col(ColumnDef::new(Hotels::Images).json_binary().not_null())
                    .col(
                        ColumnDef::new(Hotels::Rating)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Hotels::TotalReviews)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Hotels::IsApproved)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Hotels::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Hotels::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Owner dashboards list hotels by owner
        manager
            .create_index(
                Index::create()
                    .name("idx_hotels_owner_id")
                    .table(Hotels::Table)
                    .col(Hotels::OwnerId)
                    .to_owned(),
            )
            .await?;

        // Catalogue search filters on city
        manager
            .create_index(
                Index::create()
                    .name("idx_hotels_city")
                    .table(Hotels::Table)
                    .col(Hotels::City)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Hotels::Table).to_owned())
            .await
    }
}
