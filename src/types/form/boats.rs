use serde::Deserialize;

use crate::schema::{PageRequest, Sort, SortDirection, SortField};
use crate::types::validation::{self, Validate, ValidateError};

/// Boat body as it arrives over the wire. Every field is optional so
/// the same body serves creation and each partial update.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoatForm {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "type", alias = "boatType")]
    pub boat_type: Option<String>,
}

impl BoatForm {
    #[must_use]
    pub fn as_input(&self) -> BoatInput<'_> {
        BoatInput {
            name: self.name.as_deref(),
            description: self.description.as_deref(),
            boat_type: self.boat_type.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoatField {
    Name,
    Description,
    Type,
}

impl BoatField {
    pub const ALL: [BoatField; 3] = [BoatField::Name, BoatField::Description, BoatField::Type];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            BoatField::Name => "name",
            BoatField::Description => "description",
            BoatField::Type => "type",
        }
    }
}

/// Borrowed, untrusted boat fields.
///
/// Creation validates all of them, partial updates only the field
/// they target, through the same [`BoatInput::validate_fields`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoatInput<'a> {
    pub name: Option<&'a str>,
    pub description: Option<&'a str>,
    pub boat_type: Option<&'a str>,
}

impl<'a> BoatInput<'a> {
    #[must_use]
    pub fn name(name: Option<&'a str>) -> Self {
        Self {
            name,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn description(description: Option<&'a str>) -> Self {
        Self {
            description,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn boat_type(boat_type: Option<&'a str>) -> Self {
        Self {
            boat_type,
            ..Default::default()
        }
    }

    pub fn validate_fields(&self, fields: &[BoatField]) -> Result<(), ValidateError> {
        let mut errors = ValidateError::field_builder();
        for field in fields {
            let mut messages = ValidateError::msg_builder();
            match field {
                BoatField::Name => validation::check_name(self.name, &mut messages),
                BoatField::Description => {
                    validation::check_description(self.description, &mut messages);
                }
                BoatField::Type => validation::check_boat_type(self.boat_type, &mut messages),
            }
            errors.insert(field.as_str(), messages.build());
        }
        errors.build().into_result()
    }
}

impl Validate for BoatInput<'_> {
    fn validate(&self) -> Result<(), ValidateError> {
        self.validate_fields(&BoatField::ALL)
    }
}

// ---------------------------------------------------- //

pub const PAGE_REQUIRED: &str = "Page is required";
pub const PAGE_NEGATIVE: &str = "Page must not be less than zero";
pub const PAGE_TOO_LARGE: &str = "Page is too large";
pub const SIZE_OUT_OF_RANGE: &str = "Page size must be between 1 and 50";

/// Query string of a boat listing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListBoats {
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub size: Option<i64>,
    #[serde(default)]
    pub sort_by: Option<String>,
    #[serde(default)]
    pub sort_direction: Option<String>,
}

impl ListBoats {
    /// Turns the query into a [`PageRequest`], or reports every
    /// offending parameter at once.
    pub fn to_page_request(&self) -> Result<PageRequest, ValidateError> {
        let mut errors = ValidateError::field_builder();

        let page = match self.page {
            None => {
                errors.insert_msg("page", PAGE_REQUIRED);
                None
            }
            Some(page) => match u32::try_from(page) {
                Ok(page) => Some(page),
                Err(..) if page < 0 => {
                    errors.insert_msg("page", PAGE_NEGATIVE);
                    None
                }
                Err(..) => {
                    errors.insert_msg("page", PAGE_TOO_LARGE);
                    None
                }
            },
        };

        let size = match self.size {
            None => Some(validation::PAGE_SIZE_DEFAULT),
            Some(size) if (validation::PAGE_SIZE_MIN..=validation::PAGE_SIZE_MAX).contains(&size) => {
                u32::try_from(size).ok()
            }
            Some(..) => {
                errors.insert_msg("size", SIZE_OUT_OF_RANGE);
                None
            }
        };

        let sort_by = self.sort_by.as_deref();
        if !validation::is_valid_sort_field(sort_by) {
            errors.insert_msg("sortBy", validation::SORT_FIELD_INVALID);
        }

        let sort_direction = self.sort_direction.as_deref();
        if !validation::is_valid_sort_direction(sort_direction) {
            errors.insert_msg("sortDirection", validation::SORT_DIRECTION_INVALID);
        }

        errors.build().into_result()?;

        let (Some(page), Some(size)) = (page, size) else {
            // every None above has an error recorded with it
            return Err(ValidateError::field("page", PAGE_REQUIRED));
        };

        Ok(PageRequest {
            page,
            size,
            sort: Sort {
                field: sort_by.and_then(SortField::parse).unwrap_or_default(),
                direction: sort_direction
                    .and_then(SortDirection::parse)
                    .unwrap_or_default(),
            },
        })
    }
}
