//! Validation error types

use std::fmt;

/// Validation error for request input and domain models
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required fields are absent (all of them are listed)
    Missing { fields: Vec<&'static str> },

    /// None of the fields were supplied, at least one is required
    MissingAnyOf { fields: Vec<&'static str> },

    /// Field is empty when it shouldn't be
    Empty { field: &'static str },

    /// String doesn't match the required format
    InvalidFormat {
        field: &'static str,
        reason: &'static str,
    },

    /// Sort field outside the allow-list
    InvalidSort { value: String },

    /// Sort direction other than asc/desc
    InvalidDirection { value: String },

    /// Numeric query parameter that doesn't parse
    InvalidNumber { field: &'static str, value: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { fields } => {
                write!(f, "missing required fields: {}", fields.join(", "))
            }
            Self::MissingAnyOf { fields } => {
                write!(f, "at least one of these fields is required: {}", fields.join(", "))
            }
            Self::Empty { field } => write!(f, "invalid {}: cannot be empty", field),
            Self::InvalidFormat { field, reason } => write!(f, "invalid {}: {}", field, reason),
            Self::InvalidSort { value } => write!(
                f,
                "invalid sort field '{}': use id, tax_id, legal_name, trade_name, activity_code, created_at or updated_at",
                value
            ),
            Self::InvalidDirection { value } => {
                write!(f, "invalid sort direction '{}': use asc or desc", value)
            }
            Self::InvalidNumber { field, value } => {
                write!(f, "invalid {} '{}': expected a non-negative integer", field, value)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_lists_every_field() {
        let err = ValidationError::Missing {
            fields: vec!["tax_id", "activity_code"],
        };
        assert_eq!(
            err.to_string(),
            "missing required fields: tax_id, activity_code"
        );
    }

    #[test]
    fn format_errors_name_the_field() {
        let err = ValidationError::InvalidFormat {
            field: "tax id",
            reason: "unrecognised format",
        };
        assert!(err.to_string().starts_with("invalid tax id"));

        let err = ValidationError::Empty { field: "trade name" };
        assert!(err.to_string().starts_with("invalid trade name"));
    }
}
