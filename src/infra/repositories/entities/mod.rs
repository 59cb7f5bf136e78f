//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.
//! String-list columns (amenities, images) are stored as JSONB arrays.

pub mod booking;
pub mod hotel;
pub mod review;
pub mod room;
pub mod user;

use sea_orm::entity::prelude::Json;

/// Encode a string list as a JSON array column value
pub(crate) fn strings_to_json(values: &[String]) -> Json {
    Json::Array(values.iter().cloned().map(Json::String).collect())
}

/// Decode a JSON array column value back into a string list.
/// Non-string elements are skipped rather than failing the row.
pub(crate) fn json_to_strings(value: &Json) -> Vec<String> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_owned))
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_lists_round_trip_through_json() {
        let values = vec!["WiFi".to_string(), "Pool".to_string()];
        assert_eq!(json_to_strings(&strings_to_json(&values)), values);
    }

    #[test]
    fn malformed_json_decodes_to_empty() {
        assert!(json_to_strings(&Json::Null).is_empty());
        assert!(json_to_strings(&Json::String("oops".into())).is_empty());
    }
}
