//! Hotel database entity for SeaORM.

use sea_orm::entity::prelude::*;

use super::{json_to_strings, strings_to_json};
use crate::domain::Hotel;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "hotels")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub price_per_night: i64,
    #[sea_orm(column_type = "JsonBinary")]
    pub amenities: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub images: Json,
    #[sea_orm(column_type = "Double")]
    pub rating: f64,
    pub total_reviews: i32,
    pub is_approved: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::OwnerId",
        to = "super::user::Column::Id"
    )]
    Owner,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for Hotel {
    fn from(model: Model) -> Self {
        Hotel {
            id: model.id,
            owner_id: model.owner_id,
            name: model.name,
            description: model.description,
            city: model.city,
            state: model.state,
            address: model.address,
            price_per_night: model.price_per_night,
            amenities: json_to_strings(&model.amenities),
            images: json_to_strings(&model.images),
            rating: model.rating,
            total_reviews: model.total_reviews,
            is_approved: model.is_approved,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Convert domain entity to a fully-set active model
impl From<&Hotel> for ActiveModel {
    fn from(hotel: &Hotel) -> Self {
        use sea_orm::Set;

        ActiveModel {
            id: Set(hotel.id),
            owner_id: Set(hotel.owner_id),
            name: Set(hotel.name.clone()),
            description: Set(hotel.description.clone()),
            city: Set(hotel.city.clone()),
            state: Set(hotel.state.clone()),
            address: Set(hotel.address.clone()),
            price_per_night: Set(hotel.price_per_night),
            amenities: Set(strings_to_json(&hotel.amenities)),
            images: Set(strings_to_json(&hotel.images)),
            rating: Set(hotel.rating),
            total_reviews: Set(hotel.total_reviews),
            is_approved: Set(hotel.is_approved),
            created_at: Set(hotel.created_at),
            updated_at: Set(hotel.updated_at),
        }
    }
}
