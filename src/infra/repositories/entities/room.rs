//! Room database entity for SeaORM.

use sea_orm::entity::prelude::*;

use super::{json_to_strings, strings_to_json};
use crate::domain::Room;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "rooms")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub hotel_id: Uuid,
    pub room_type: String,
    pub price: i64,
    pub capacity: i32,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub images: Json,
    pub is_available: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::hotel::Entity",
        from = "Column::HotelId",
        to = "super::hotel::Column::Id"
    )]
    Hotel,
}

impl Related<super::hotel::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Hotel.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for Room {
    fn from(model: Model) -> Self {
        Room {
            id: model.id,
            hotel_id: model.hotel_id,
            room_type: model.room_type,
            price: model.price,
            capacity: model.capacity,
            description: model.description,
            images: json_to_strings(&model.images),
            is_available: model.is_available,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Convert domain entity to a fully-set active model
impl From<&Room> for ActiveModel {
    fn from(room: &Room) -> Self {
        use sea_orm::Set;

        ActiveModel {
            id: Set(room.id),
            hotel_id: Set(room.hotel_id),
            room_type: Set(room.room_type.clone()),
            price: Set(room.price),
            capacity: Set(room.capacity),
            description: Set(room.description.clone()),
            images: Set(strings_to_json(&room.images)),
            is_available: Set(room.is_available),
            created_at: Set(room.created_at),
            updated_at: Set(room.updated_at),
        }
    }
}
