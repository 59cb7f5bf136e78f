//! Room domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Room domain entity
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: Uuid,
    pub hotel_id: Uuid,
    /// Free-form label such as "Deluxe" or "Suite"
    #[serde(rename = "type")]
    pub room_type: String,
    /// Price per night, in rupees
    pub price: i64,
    /// Maximum number of guests
    pub capacity: i32,
    pub description: String,
    pub images: Vec<String>,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Room {
    /// Create a new room; rooms start available.
    pub fn new(id: Uuid, draft: RoomDraft) -> Self {
        let now = Utc::now();
        Self {
            id,
            hotel_id: draft.hotel_id,
            room_type: draft.room_type,
            price: draft.price,
            capacity: draft.capacity,
            description: draft.description,
            images: draft.images,
            is_available: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update; `None` leaves a field untouched.
    pub fn apply(&mut self, patch: RoomPatch) {
        if let Some(room_type) = patch.room_type {
            self.room_type = room_type;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(capacity) = patch.capacity {
            self.capacity = capacity;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(images) = patch.images {
            self.images = images;
        }
        if let Some(available) = patch.is_available {
            self.is_available = available;
        }
        self.updated_at = Utc::now();
    }
}

/// New room data (service input)
#[derive(Debug, Clone)]
pub struct RoomDraft {
    pub hotel_id: Uuid,
    pub room_type: String,
    pub price: i64,
    pub capacity: i32,
    pub description: String,
    pub images: Vec<String>,
}

/// Partial room update (service input)
#[derive(Debug, Clone, Default)]
pub struct RoomPatch {
    pub room_type: Option<String>,
    pub price: Option<i64>,
    pub capacity: Option<i32>,
    pub description: Option<String>,
    pub images: Option<Vec<String>>,
    pub is_available: Option<bool>,
}

/// Minimal room projection embedded in booking payloads
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummary {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub room_type: String,
    pub price: i64,
}

impl From<&Room> for RoomSummary {
    fn from(room: &Room) -> Self {
        Self {
            id: room.id,
            room_type: room.room_type.clone(),
            price: room.price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_type_serializes_as_type() {
        let room = Room::new(
            Uuid::new_v4(),
            RoomDraft {
                hotel_id: Uuid::new_v4(),
                room_type: "Deluxe".into(),
                price: 6000,
                capacity: 2,
                description: "Sea view".into(),
                images: vec![],
            },
        );
        let json = serde_json::to_value(&room).unwrap();
        assert_eq!(json["type"], "Deluxe");
        assert!(json.get("roomType").is_none());
        assert_eq!(json["isAvailable"], true);
    }
}
