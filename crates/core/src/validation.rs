//! Input validation
//!
//! A fluent validator that collects every problem instead of stopping at the
//! first one, so a bad build descriptor reports all its issues at once.
//!
//! # Example
//!
//! ```rust
//! use petfyco_core::validation::Validator;
//!
//! let result = Validator::new()
//!     .required("nombre", "Rex")
//!     .java_package("application_id", "com.example.petfyco")
//!     .range("min_sdk", 21, 16, 35)
//!     .validate();
//!
//! assert!(result.is_valid());
//! ```

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Dotted Java package with at least two segments
static JAVA_PACKAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9_]*(\.[a-zA-Z][a-zA-Z0-9_]*)+$").unwrap());

/// Validation error
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationError {
    /// Field that failed validation
    pub field: String,
    /// Error message
    pub message: String,
    /// Error code
    pub code: String,
    /// Expected value (if applicable)
    pub expected: Option<String>,
    /// Actual value (if applicable)
    pub actual: Option<String>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validation result
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    errors: Vec<ValidationError>,
}

impl ValidationResult {
    /// Create a new empty result
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if validation passed
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get all errors
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Add an error
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Convert to Result type
    pub fn to_result(self) -> Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            let messages: Vec<String> = self.errors.iter().map(ToString::to_string).collect();
            Err(Error::validation(format!(
                "Validation failed: {}",
                messages.join("; ")
            )))
        }
    }
}

/// Fluent validator builder
#[derive(Default)]
pub struct Validator {
    result: ValidationResult,
}

impl Validator {
    /// Create a new validator
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate that a field is not blank
    #[must_use]
    pub fn required(mut self, field: &str, value: &str) -> Self {
        if value.trim().is_empty() {
            self.result.add_error(ValidationError {
                field: field.to_string(),
                message: "Field is required".to_string(),
                code: "REQUIRED".to_string(),
                expected: Some("non-empty value".to_string()),
                actual: Some("empty".to_string()),
            });
        }
        self
    }

    /// Validate that a value is a dotted Java package name
    #[must_use]
    pub fn java_package(mut self, field: &str, value: &str) -> Self {
        if !JAVA_PACKAGE.is_match(value) {
            self.result.add_error(ValidationError {
                field: field.to_string(),
                message: "Must be a dotted package name like com.example.app".to_string(),
                code: "PATTERN".to_string(),
                expected: Some("java package".to_string()),
                actual: Some(value.to_string()),
            });
        }
        self
    }

    /// Validate a numeric range (inclusive)
    #[must_use]
    pub fn range<T: PartialOrd + std::fmt::Display>(
        mut self,
        field: &str,
        value: T,
        min: T,
        max: T,
    ) -> Self {
        if value < min || value > max {
            self.result.add_error(ValidationError {
                field: field.to_string(),
                message: format!("Must be between {min} and {max}"),
                code: "RANGE".to_string(),
                expected: Some(format!("{min} - {max}")),
                actual: Some(value.to_string()),
            });
        }
        self
    }

    /// Validate that `lower <= upper`, e.g. `min_sdk <= target_sdk`
    #[must_use]
    pub fn ordered<T: PartialOrd + std::fmt::Display>(
        mut self,
        lower_field: &str,
        lower: T,
        upper_field: &str,
        upper: T,
    ) -> Self {
        if lower > upper {
            self.result.add_error(ValidationError {
                field: lower_field.to_string(),
                message: format!("Must not exceed {upper_field} ({upper})"),
                code: "ORDER".to_string(),
                expected: Some(format!("<= {upper}")),
                actual: Some(lower.to_string()),
            });
        }
        self
    }

    /// Add a custom check
    #[must_use]
    pub fn check(mut self, field: &str, ok: bool, message: &str) -> Self {
        if !ok {
            self.result.add_error(ValidationError {
                field: field.to_string(),
                message: message.to_string(),
                code: "CUSTOM".to_string(),
                expected: None,
                actual: None,
            });
        }
        self
    }

    /// Finish and return the collected result
    #[must_use]
    pub fn validate(self) -> ValidationResult {
        self.result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_required() {
        assert!(Validator::new().required("nombre", "Rex").validate().is_valid());
        assert!(!Validator::new().required("nombre", "   ").validate().is_valid());
    }

    #[test]
    fn test_java_package() {
        let ok = ["com.example.petfyco", "app.petfyco_v2", "a.b"];
        for value in ok {
            assert!(
                Validator::new().java_package("id", value).validate().is_valid(),
                "{value} should be valid"
            );
        }

        let bad = ["petfyco", "com..example", "1com.example", "com.example.", "com-example.app"];
        for value in bad {
            assert!(
                !Validator::new().java_package("id", value).validate().is_valid(),
                "{value} should be invalid"
            );
        }
    }

    #[test]
    fn test_ordered_and_range() {
        let result = Validator::new()
            .range("java_version", 7u8, 8, 21)
            .ordered("min_sdk", 30, "target_sdk", 28)
            .validate();

        assert_eq!(result.errors().len(), 2);
        assert_eq!(result.errors()[1].code, "ORDER");
    }

    #[test]
    fn test_collects_all_errors_into_result() {
        let err = Validator::new()
            .required("a", "")
            .check("b", false, "broken")
            .validate()
            .to_result()
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.message.contains("a: Field is required"));
        assert!(err.message.contains("b: broken"));
    }
}
