//! Hotel domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Hotel domain entity
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    pub id: Uuid,
    /// Owning user; stamped from the authenticated caller at creation
    pub owner_id: Uuid,
    pub name: String,
    pub description: String,
    pub city: String,
    pub state: String,
    pub address: String,
    /// Starting price per night, in rupees
    pub price_per_night: i64,
    pub amenities: Vec<String>,
    /// Ordered image URLs, first one is the cover
    pub images: Vec<String>,
    /// Average review rating rounded to one decimal; 0 when unreviewed
    pub rating: f64,
    pub total_reviews: i32,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Hotel {
    /// Create a new hotel listing. New listings are live immediately;
    /// approval can only be revoked later by an admin.
    pub fn new(id: Uuid, owner_id: Uuid, draft: HotelDraft) -> Self {
        let now = Utc::now();
        Self {
            id,
            owner_id,
            name: draft.name,
            description: draft.description,
            city: draft.city,
            state: draft.state,
            address: draft.address,
            price_per_night: draft.price_per_night,
            amenities: draft.amenities,
            images: draft.images,
            rating: 0.0,
            total_reviews: 0,
            is_approved: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update. `is_approved` is accepted here only after the
    /// caller has checked the admin gate.
    pub fn apply(&mut self, patch: HotelPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(city) = patch.city {
            self.city = city;
        }
        if let Some(state) = patch.state {
            self.state = state;
        }
        if let Some(address) = patch.address {
            self.address = address;
        }
        if let Some(price) = patch.price_per_night {
            self.price_per_night = price;
        }
        if let Some(amenities) = patch.amenities {
            self.amenities = amenities;
        }
        if let Some(images) = patch.images {
            self.images = images;
        }
        if let Some(approved) = patch.is_approved {
            self.is_approved = approved;
        }
        self.updated_at = Utc::now();
    }

    /// Overwrite the review aggregates. Only the review aggregation path
    /// calls this.
    pub fn set_rating(&mut self, rating: f64, total_reviews: i32) {
        self.rating = rating;
        self.total_reviews = total_reviews;
        self.updated_at = Utc::now();
    }
}

/// New hotel data (service input)
#[derive(Debug, Clone)]
pub struct HotelDraft {
    pub name: String,
    pub description: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub price_per_night: i64,
    pub amenities: Vec<String>,
    pub images: Vec<String>,
}

/// Partial hotel update (service input); `None` leaves a field untouched
#[derive(Debug, Clone, Default)]
pub struct HotelPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub address: Option<String>,
    pub price_per_night: Option<i64>,
    pub amenities: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
    pub is_approved: Option<bool>,
}

/// Search filters for the public hotel listing
#[derive(Debug, Clone, Default)]
pub struct HotelFilters {
    pub city: Option<String>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub min_rating: Option<f64>,
    /// Free-text search over name, city and description
    pub search: Option<String>,
    pub owner_id: Option<Uuid>,
}

/// Owner contact details denormalized into hotel listings
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OwnerSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Hotel with its owner attached (search results, admin listing)
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HotelWithOwner {
    #[serde(flatten)]
    pub hotel: Hotel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<OwnerSummary>,
}

/// Minimal hotel projection embedded in booking payloads
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HotelSummary {
    pub id: Uuid,
    pub name: String,
    pub city: String,
    pub images: Vec<String>,
}

impl From<&Hotel> for HotelSummary {
    fn from(hotel: &Hotel) -> Self {
        Self {
            id: hotel.id,
            name: hotel.name.clone(),
            city: hotel.city.clone(),
            images: hotel.images.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> HotelDraft {
        HotelDraft {
            name: "Test Inn".into(),
            description: "A quiet place".into(),
            city: "Jaipur".into(),
            state: "Rajasthan".into(),
            address: "1 Fort Road".into(),
            price_per_night: 4500,
            amenities: vec!["wifi".into()],
            images: vec![],
        }
    }

    #[test]
    fn new_hotel_starts_approved_and_unrated() {
        let hotel = Hotel::new(Uuid::new_v4(), Uuid::new_v4(), draft());
        assert!(hotel.is_approved);
        assert_eq!(hotel.rating, 0.0);
        assert_eq!(hotel.total_reviews, 0);
    }

    #[test]
    fn patch_leaves_unset_fields_alone() {
        let mut hotel = Hotel::new(Uuid::new_v4(), Uuid::new_v4(), draft());
        hotel.apply(HotelPatch {
            price_per_night: Some(5000),
            ..Default::default()
        });
        assert_eq!(hotel.price_per_night, 5000);
        assert_eq!(hotel.name, "Test Inn");
        assert_eq!(hotel.city, "Jaipur");
    }
}
