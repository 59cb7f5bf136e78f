//! Booking database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{Booking, BookingStatus, PaymentStatus};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub hotel_id: Uuid,
    pub room_id: Uuid,
    pub check_in_date: Date,
    pub check_out_date: Date,
    pub total_amount: i64,
    pub payment_status: String,
    pub booking_status: String,
    pub gateway_order_id: Option<String>,
    pub gateway_payment_id: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::hotel::Entity",
        from = "Column::HotelId",
        to = "super::hotel::Column::Id"
    )]
    Hotel,
    #[sea_orm(
        belongs_to = "super::room::Entity",
        from = "Column::RoomId",
        to = "super::room::Column::Id"
    )]
    Room,
}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for Booking {
    fn from(model: Model) -> Self {
        Booking {
            id: model.id,
            user_id: model.user_id,
            hotel_id: model.hotel_id,
            room_id: model.room_id,
            check_in_date: model.check_in_date,
            check_out_date: model.check_out_date,
            total_amount: model.total_amount,
            payment_status: PaymentStatus::from(model.payment_status.as_str()),
            booking_status: BookingStatus::from(model.booking_status.as_str()),
            gateway_order_id: model.gateway_order_id,
            gateway_payment_id: model.gateway_payment_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Convert domain entity to a fully-set active model
impl From<&Booking> for ActiveModel {
    fn from(booking: &Booking) -> Self {
        use sea_orm::Set;

        ActiveModel {
            id: Set(booking.id),
            user_id: Set(booking.user_id),
            hotel_id: Set(booking.hotel_id),
            room_id: Set(booking.room_id),
            check_in_date: Set(booking.check_in_date),
            check_out_date: Set(booking.check_out_date),
            total_amount: Set(booking.total_amount),
            payment_status: Set(booking.payment_status.to_string()),
            booking_status: Set(booking.booking_status.to_string()),
            gateway_order_id: Set(booking.gateway_order_id.clone()),
            gateway_payment_id: Set(booking.gateway_payment_id.clone()),
            created_at: Set(booking.created_at),
            updated_at: Set(booking.updated_at),
        }
    }
}
