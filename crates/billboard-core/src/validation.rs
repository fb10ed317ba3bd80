//! Validation utilities.

use crate::BillboardError;
use validator::{Validate, ValidationErrors};

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Validates the struct and returns a `BillboardError` on failure.
    fn validate_request(&self) -> Result<(), BillboardError> {
        self.validate().map_err(validation_errors_to_billboard_error)
    }
}

impl<T: Validate> ValidateExt for T {}

/// Converts `validator::ValidationErrors` into a single validation error.
///
/// Field messages are joined as `field: message` pairs, sorted by field name
/// so the output is stable.
#[must_use]
pub fn validation_errors_to_billboard_error(errors: ValidationErrors) -> BillboardError {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let message = fields
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                let detail = error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), ToString::to_string);
                format!("{field}: {detail}")
            })
        })
        .collect::<Vec<_>>()
        .join("; ");

    BillboardError::Validation(message)
}

/// Common validation functions.
pub mod rules {
    use validator::ValidationError;

    /// Validates a `YYYY-MM-DD` calendar date.
    pub fn iso_date(value: &str) -> Result<(), ValidationError> {
        chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map(|_| ())
            .map_err(|_| ValidationError::new("iso_date"))
    }
}
