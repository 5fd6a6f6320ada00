use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ListingError;

/// Identifier assigned to a listing when it is created
pub type PropertyId = u64;

/// Sale status of a listing
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PropertyStatus {
    Available,
    #[serde(rename = "Under Contract")]
    UnderContract,
    Sold,
}

impl PropertyStatus {
    pub const ALL: [PropertyStatus; 3] = [
        PropertyStatus::Available,
        PropertyStatus::UnderContract,
        PropertyStatus::Sold,
    ];

    /// Label shown to users and used on the wire
    pub fn label(self) -> &'static str {
        match self {
            PropertyStatus::Available => "Available",
            PropertyStatus::UnderContract => "Under Contract",
            PropertyStatus::Sold => "Sold",
        }
    }

    /// Text color token used when rendering this status
    pub fn color(self) -> &'static str {
        crate::format::status_color(self.label())
    }
}

impl fmt::Display for PropertyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PropertyStatus {
    type Err = ListingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ListingError::InvalidLabel {
                kind: "status",
                value: s.to_string(),
            })
    }
}

/// Core property listing record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: PropertyId,
    pub name: String,
    pub address: String,
    pub price: f64,
    pub description: String,
    pub status: PropertyStatus,
    pub image: String,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Property {
    /// Build a fresh, non-deleted record from creation input
    pub fn from_input(id: PropertyId, input: CreatePropertyInput, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: input.name,
            address: input.address,
            price: input.price,
            description: input.description,
            status: input.status,
            image: input.image,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge the fields present in `changes` and refresh `updated_at`
    pub fn apply(&mut self, changes: UpdatePropertyInput, now: DateTime<Utc>) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(address) = changes.address {
            self.address = address;
        }
        if let Some(price) = changes.price {
            self.price = price;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(status) = changes.status {
            self.status = status;
        }
        if let Some(image) = changes.image {
            self.image = image;
        }
        self.touch(now);
    }

    /// Flag the record as deleted without removing it
    pub fn mark_deleted(&mut self, now: DateTime<Utc>) {
        self.is_deleted = true;
        self.touch(now);
    }

    // updated_at only ever moves forward, even if the wall clock does not
    fn touch(&mut self, now: DateTime<Utc>) {
        let floor = self.updated_at + Duration::microseconds(1);
        self.updated_at = now.max(floor);
    }

    /// Case-insensitive substring match over name, address and description.
    /// `needle` must already be lowercase.
    pub fn matches_query(&self, needle: &str) -> bool {
        [&self.name, &self.address, &self.description]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

/// Fields supplied when creating a listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreatePropertyInput {
    pub name: String,
    pub address: String,
    pub price: f64,
    pub description: String,
    pub status: PropertyStatus,
    pub image: String,
}

/// Partial update; `None` leaves the stored value untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePropertyInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PropertyStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl UpdatePropertyInput {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Property {
        let input = CreatePropertyInput {
            name: "Harbor Loft".to_string(),
            address: "12 Pier Road".to_string(),
            price: 420_000.0,
            description: "Open-plan loft by the water".to_string(),
            status: PropertyStatus::Available,
            image: "https://example.com/loft.jpg".to_string(),
        };
        Property::from_input(1, input, Utc::now())
    }

    #[test]
    fn status_labels_round_trip_through_serde() {
        let json = serde_json::to_string(&PropertyStatus::UnderContract).unwrap();
        assert_eq!(json, "\"Under Contract\"");
        let back: PropertyStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, PropertyStatus::UnderContract);
    }

    #[test]
    fn status_parses_labels_case_insensitively() {
        assert_eq!("sold".parse::<PropertyStatus>().unwrap(), PropertyStatus::Sold);
        assert_eq!(
            " Under Contract ".parse::<PropertyStatus>().unwrap(),
            PropertyStatus::UnderContract
        );
        assert!("Pending".parse::<PropertyStatus>().is_err());
    }

    #[test]
    fn property_serializes_with_camel_case_keys() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["isDeleted"], false);
        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_some());
    }

    #[test]
    fn apply_merges_only_present_fields() {
        let mut property = sample();
        let before = property.clone();
        property.apply(
            UpdatePropertyInput {
                name: Some("X".to_string()),
                ..Default::default()
            },
            Utc::now(),
        );

        assert_eq!(property.name, "X");
        assert_eq!(property.address, before.address);
        assert_eq!(property.price, before.price);
        assert!(property.updated_at > before.updated_at);
        assert_eq!(property.created_at, before.created_at);
    }

    #[test]
    fn updated_at_never_moves_backwards() {
        let mut property = sample();
        let earlier = property.created_at - Duration::hours(1);
        property.mark_deleted(earlier);

        assert!(property.is_deleted);
        assert!(property.updated_at > property.created_at);
    }

    #[test]
    fn query_matching_is_case_insensitive_across_fields() {
        let property = sample();
        assert!(property.matches_query("harbor"));
        assert!(property.matches_query("pier"));
        assert!(property.matches_query("water"));
        assert!(!property.matches_query("mountain"));
    }
}
