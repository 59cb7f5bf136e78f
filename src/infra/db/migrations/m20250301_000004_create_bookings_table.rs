//! Migration: Create bookings table.
//!
//! Bookings intentionally carry no foreign keys: a booking is a
//! financial record and must survive the deletion of the hotel or
//! room it referenced. Readers treat dangling references as absent.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Table and column identifiers for Bookings
#[derive(Iden)]
enum Bookings {
    Table,
    Id,
    UserId,
    HotelId,
    RoomId,
    CheckInDate,
    CheckOutDate,
    TotalAmount,
    PaymentStatus,
    BookingStatus,
    GatewayOrderId,
    GatewayPaymentId,
    CreatedAt,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bookings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Bookings::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Bookings::UserId).uuid().not_null())
                    .col(ColumnDef::new(Bookings::HotelId).uuid().not_null())
                    .col(ColumnDef::new(Bookings::RoomId).uuid().not_null())
                    .col(ColumnDef::new(Bookings::CheckInDate).date().not_null())
                    .col(ColumnDef::new(Bookings::CheckOutDate).date().not_null())
                    .col(
                        ColumnDef::new(Bookings::TotalAmount)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Bookings::PaymentStatus).string().not_null())
                    .col(ColumnDef::new(Bookings::BookingStatus).string().not_null())
                    .col(ColumnDef::new(Bookings::GatewayOrderId).string().null())
                    .col(ColumnDef::new(Bookings::GatewayPaymentId).string().null())
                    .col(
                        ColumnDef::new(Bookings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Bookings::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Guests list their own bookings
        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_user_id")
                    .table(Bookings::Table)
                    .col(Bookings::UserId)
                    .to_owned(),
            )
            .await?;

        // Owners list bookings per hotel
        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_hotel_id")
                    .table(Bookings::Table)
                    .col(Bookings::HotelId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Bookings::Table).to_owned())
            .await
    }
}
