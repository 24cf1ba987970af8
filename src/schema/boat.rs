use serde::Serialize;
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

use crate::types::{id::BoatId, Timestamp};

/// A catalog entry as it is persisted.
///
/// `created_at` is assigned once by the service and never touched
/// again, `updated_at` moves forward on every mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Boat {
    pub id: BoatId,
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub boat_type: BoatType,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A boat that has not been given an id by the store yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBoat {
    pub name: String,
    pub description: Option<String>,
    pub boat_type: BoatType,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl NewBoat {
    #[must_use]
    pub fn into_boat(self, id: BoatId) -> Boat {
        Boat {
            id,
            name: self.name,
            description: self.description,
            boat_type: self.boat_type,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BoatType {
    Sailboat,
    Motorboat,
    Yacht,
    Speedboat,
    FishingBoat,
    Other,
}

impl BoatType {
    pub const ALL: [BoatType; 6] = [
        BoatType::Sailboat,
        BoatType::Motorboat,
        BoatType::Yacht,
        BoatType::Speedboat,
        BoatType::FishingBoat,
        BoatType::Other,
    ];

    /// Canonical name, as stored and as sent over the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            BoatType::Sailboat => "SAILBOAT",
            BoatType::Motorboat => "MOTORBOAT",
            BoatType::Yacht => "YACHT",
            BoatType::Speedboat => "SPEEDBOAT",
            BoatType::FishingBoat => "FISHING_BOAT",
            BoatType::Other => "OTHER",
        }
    }

    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            BoatType::Sailboat => "Sailboat",
            BoatType::Motorboat => "Motorboat",
            BoatType::Yacht => "Yacht",
            BoatType::Speedboat => "Speedboat",
            BoatType::FishingBoat => "Fishing Boat",
            BoatType::Other => "Other",
        }
    }

    /// Trims and uppercases `value` before looking it up, so
    /// `"  Motorboat "` and `"MOTORBOAT"` are the same type.
    #[must_use]
    pub fn coerce(value: &str) -> Option<Self> {
        let value = value.trim().to_uppercase();
        Self::ALL.into_iter().find(|v| v.as_str() == value)
    }
}

impl Display for BoatType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown boat type")]
pub struct UnknownBoatType;

/// Strict parsing of the canonical name, used for stored values.
impl FromStr for BoatType {
    type Err = UnknownBoatType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or(UnknownBoatType)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce() {
        for value in ["motorboat", "MOTORBOAT", "  Motorboat ", "\tmotorBoat\n"] {
            assert_eq!(BoatType::coerce(value), Some(BoatType::Motorboat));
        }
        assert_eq!(BoatType::coerce("fishing_boat"), Some(BoatType::FishingBoat));
        assert_eq!(BoatType::coerce("INVALID_TYPE"), None);
        assert_eq!(BoatType::coerce("fishing boat"), None);
        assert_eq!(BoatType::coerce(""), None);
    }

    #[test]
    fn test_from_str_is_strict() {
        assert_eq!("YACHT".parse::<BoatType>().ok(), Some(BoatType::Yacht));
        assert!("yacht".parse::<BoatType>().is_err());
        assert!(" YACHT".parse::<BoatType>().is_err());
    }

    #[test]
    fn test_names() {
        assert_eq!(BoatType::FishingBoat.to_string(), "FISHING_BOAT");
        assert_eq!(BoatType::FishingBoat.display_name(), "Fishing Boat");
        assert_eq!(
            serde_json::to_value(BoatType::FishingBoat).unwrap(),
            serde_json::json!("FISHING_BOAT")
        );
        for value in BoatType::ALL {
            assert_eq!(value.as_str().parse::<BoatType>().ok(), Some(value));
        }
    }

    #[test]
    fn test_boat_json() {
        let now = Timestamp::now();
        let boat = NewBoat {
            name: "The Black Pearl".into(),
            description: None,
            boat_type: BoatType::Sailboat,
            created_at: now,
            updated_at: now,
        }
        .into_boat(BoatId::new(7));

        let json = serde_json::to_value(&boat).unwrap();
        assert_eq!(json["id"], serde_json::json!(7));
        assert_eq!(json["type"], "SAILBOAT");
        assert!(json["description"].is_null());
        assert_eq!(json["createdAt"], json["updatedAt"]);
    }
}
