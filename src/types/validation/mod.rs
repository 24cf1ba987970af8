//! Input validation shared by forms, services and configuration.
//!
//! Rules are plain functions so every caller states which rule applies
//! to which field. [`ValidateError`] collects their results per field.
use crate::schema::{BoatType, SortDirection, SortField};

mod error;
pub use error::{FieldBuilder, MessageBuilder, ValidateError};

pub const NAME_MAX_LEN: usize = 100;
pub const DESCRIPTION_MAX_LEN: usize = 500;

pub const PAGE_SIZE_MIN: i64 = 1;
pub const PAGE_SIZE_MAX: i64 = 50;
pub const PAGE_SIZE_DEFAULT: u32 = 10;

pub const NAME_REQUIRED: &str = "Boat name is required";
pub const NAME_TOO_LONG: &str = "Boat name must not exceed 100 characters";
pub const NAME_TAKEN: &str = "Boat name is already taken";
pub const DESCRIPTION_TOO_LONG: &str = "Description must not exceed 500 characters";
pub const TYPE_REQUIRED: &str = "Boat type is required";
pub const TYPE_INVALID: &str =
    "Invalid boat type. Must be one of: SAILBOAT, MOTORBOAT, YACHT, SPEEDBOAT, FISHING_BOAT, OTHER";
pub const SORT_FIELD_INVALID: &str =
    "Invalid sortBy field. Allowed values are: id, name, description, boatType";
pub const SORT_DIRECTION_INVALID: &str = "Invalid sortDirection. Allowed values are: asc, desc";

pub trait Validate {
    fn validate(&self) -> Result<(), ValidateError>;
}

/// Accepts missing or blank values, required-ness is checked elsewhere.
#[must_use]
pub fn is_valid_boat_type(value: Option<&str>) -> bool {
    match value {
        Some(value) if !value.trim().is_empty() => BoatType::coerce(value).is_some(),
        _ => true,
    }
}

/// Exact, case-sensitive match. `"ID"` is rejected.
#[must_use]
pub fn is_valid_sort_field(value: Option<&str>) -> bool {
    value.map_or(true, |v| SortField::parse(v).is_some())
}

#[must_use]
pub fn is_valid_sort_direction(value: Option<&str>) -> bool {
    value.map_or(true, |v| SortDirection::parse(v).is_some())
}

/// Name must be present, not blank and at most [`NAME_MAX_LEN`] characters.
pub fn check_name(value: Option<&str>, messages: &mut MessageBuilder) {
    match value {
        Some(name) if !name.trim().is_empty() => {
            if name.chars().count() > NAME_MAX_LEN {
                messages.insert(NAME_TOO_LONG);
            }
        }
        _ => messages.insert(NAME_REQUIRED),
    }
}

pub fn check_description(value: Option<&str>, messages: &mut MessageBuilder) {
    if value.is_some_and(|v| v.chars().count() > DESCRIPTION_MAX_LEN) {
        messages.insert(DESCRIPTION_TOO_LONG);
    }
}

/// Type must be present and coerce into one of the [`BoatType`] values.
pub fn check_boat_type(value: Option<&str>, messages: &mut MessageBuilder) {
    match value {
        Some(value) if !value.trim().is_empty() => {
            if !is_valid_boat_type(Some(value)) {
                messages.insert(TYPE_INVALID);
            }
        }
        _ => messages.insert(TYPE_REQUIRED),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(check: fn(Option<&str>, &mut MessageBuilder), value: Option<&str>) -> ValidateError {
        let mut builder = MessageBuilder::new();
        check(value, &mut builder);
        builder.build()
    }

    #[test]
    fn test_boat_type_validator() {
        assert!(is_valid_boat_type(None));
        assert!(is_valid_boat_type(Some("")));
        assert!(is_valid_boat_type(Some("   ")));

        for value in ["SAILBOAT", "motorboat", "  Yacht ", "speedBoat", "fishing_boat", "Other"] {
            assert!(is_valid_boat_type(Some(value)), "{value:?} must be accepted");
        }

        for value in ["INVALID_TYPE", "SAIL", "SAILBOAT1", "FISHING BOAT", "123"] {
            assert!(!is_valid_boat_type(Some(value)), "{value:?} must be rejected");
        }
    }

    #[test]
    fn test_sort_field_validator() {
        assert!(is_valid_sort_field(None));
        for value in ["id", "name", "description", "boatType"] {
            assert!(is_valid_sort_field(Some(value)));
        }
        for value in ["", "ID", "Name", " name", "boattype", "type", "createdAt"] {
            assert!(!is_valid_sort_field(Some(value)), "{value:?} must be rejected");
        }
    }

    #[test]
    fn test_sort_direction_validator() {
        assert!(is_valid_sort_direction(None));
        for value in ["asc", "desc", "ASC", "Desc"] {
            assert!(is_valid_sort_direction(Some(value)));
        }
        for value in ["", "ascending", "up", " asc"] {
            assert!(!is_valid_sort_direction(Some(value)), "{value:?} must be rejected");
        }
    }

    #[test]
    fn test_check_name() {
        assert!(messages(check_name, Some("The Black Pearl")).is_empty());
        assert!(messages(check_name, Some(&"a".repeat(NAME_MAX_LEN))).is_empty());
        // counted in characters, not bytes
        assert!(messages(check_name, Some(&"ä".repeat(NAME_MAX_LEN))).is_empty());

        assert_eq!(
            messages(check_name, None),
            ValidateError::Messages(vec![NAME_REQUIRED.into()])
        );
        assert_eq!(
            messages(check_name, Some("  ")),
            ValidateError::Messages(vec![NAME_REQUIRED.into()])
        );
        assert_eq!(
            messages(check_name, Some(&"a".repeat(NAME_MAX_LEN + 1))),
            ValidateError::Messages(vec![NAME_TOO_LONG.into()])
        );
    }

    #[test]
    fn test_check_description() {
        assert!(messages(check_description, None).is_empty());
        assert!(messages(check_description, Some("")).is_empty());
        assert!(messages(check_description, Some(&"d".repeat(DESCRIPTION_MAX_LEN))).is_empty());
        assert_eq!(
            messages(check_description, Some(&"d".repeat(DESCRIPTION_MAX_LEN + 1))),
            ValidateError::Messages(vec![DESCRIPTION_TOO_LONG.into()])
        );
    }

    #[test]
    fn test_check_boat_type() {
        assert!(messages(check_boat_type, Some(" yacht ")).is_empty());
        assert_eq!(
            messages(check_boat_type, None),
            ValidateError::Messages(vec![TYPE_REQUIRED.into()])
        );
        assert_eq!(
            messages(check_boat_type, Some("")),
            ValidateError::Messages(vec![TYPE_REQUIRED.into()])
        );
        assert_eq!(
            messages(check_boat_type, Some("submarine")),
            ValidateError::Messages(vec![TYPE_INVALID.into()])
        );
    }
}
