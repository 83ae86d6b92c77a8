//! Client-side field validation
//!
//! Everything here runs before a request is built; a failed report blocks
//! submission and never reaches the collaborator API.

use std::sync::LazyLock;

use regex::Regex;

use backoffice_core::{ConsoleError, ConsoleResult};

// Literal patterns; compiling them cannot fail.
static PINCODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[1-9][0-9]{5}$").expect("pincode pattern"));

static GST_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{2}[A-Z]{5}[0-9]{4}[A-Z][1-9A-Z]Z[0-9A-Z]$").expect("gst pattern")
});

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"));

// ============================================================================
// Validators
// ============================================================================

/// Six digits, not starting with zero
pub fn is_valid_pincode(value: &str) -> bool {
    PINCODE.is_match(value)
}

/// Fifteen-character GST identification number (uppercase only)
pub fn is_valid_gst(value: &str) -> bool {
    GST_NUMBER.is_match(value)
}

/// `local@domain.tld`
pub fn is_valid_email(value: &str) -> bool {
    EMAIL.is_match(value)
}

/// Whole number at least `min`
pub fn parse_at_least(value: &str, min: i64) -> Option<i64> {
    value.trim().parse::<i64>().ok().filter(|n| *n >= min)
}

/// Numeric foreign-key id
pub fn parse_id(value: &str) -> Option<i64> {
    value.trim().parse::<i64>().ok()
}

// ============================================================================
// FieldError
// ============================================================================

/// A message attached to one form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Form key (`pincode`, `roleId`, ...)
    pub field: String,

    /// Human-readable message shown under the field
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

// ============================================================================
// ValidationReport
// ============================================================================

/// Outcome of validating a whole form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Field errors in form order (empty if valid)
    pub errors: Vec<FieldError>,
}

impl ValidationReport {
    /// Create a passing report
    pub fn ok() -> Self {
        Self::default()
    }

    /// Record an error for `field`
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    /// Merge another report into this one
    pub fn merge(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// First message recorded for `field`
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// Convert to a result (fails if any errors)
    pub fn to_result(self) -> ConsoleResult<()> {
        match self.errors.as_slice() {
            [] => Ok(()),
            [only] => Err(ConsoleError::field(&only.field, &only.message)),
            _ => {
                let msg = self
                    .errors
                    .iter()
                    .map(|e| e.message.clone())
                    .collect::<Vec<_>>()
                    .join("; ");
                Err(ConsoleError::validation(msg))
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pincode() {
        assert!(is_valid_pincode("123456"));
        assert!(is_valid_pincode("560001"));
        assert!(!is_valid_pincode("12345"));
        assert!(!is_valid_pincode("012345"));
        assert!(!is_valid_pincode("1234567"));
        assert!(!is_valid_pincode("12a456"));
        assert!(!is_valid_pincode(""));
    }

    #[test]
    fn test_gst_number() {
        assert!(is_valid_gst("22AAAAA0000A1Z5"));
        assert!(is_valid_gst("29ABCDE1234F2ZX"));
        assert!(!is_valid_gst("22aaaaa0000a1z5"));
        assert!(!is_valid_gst("22AAAAA0000A0Z5"));
        assert!(!is_valid_gst("22AAAAA0000A1Y5"));
        assert!(!is_valid_gst("22AAAAA0000A1Z"));
    }

    #[test]
    fn test_email() {
        assert!(is_valid_email("ops@acme.com"));
        assert!(!is_valid_email("ops@acme"));
        assert!(!is_valid_email("ops acme.com"));
        assert!(!is_valid_email("@acme.com"));
    }

    #[test]
    fn test_numbers() {
        assert_eq!(parse_at_least("3", 1), Some(3));
        assert_eq!(parse_at_least(" 1 ", 1), Some(1));
        assert_eq!(parse_at_least("0", 1), None);
        assert_eq!(parse_at_least("two", 1), None);
        assert_eq!(parse_id("42"), Some(42));
        assert_eq!(parse_id(""), None);
    }

    #[test]
    fn test_report() {
        let mut report = ValidationReport::ok();
        assert!(report.is_valid());

        report.add("pincode", "Pincode must be 6 digits");
        let mut other = ValidationReport::ok();
        other.add("gstNumber", "Invalid GST Number format");
        report.merge(other);

        assert!(!report.is_valid());
        assert_eq!(report.message_for("gstNumber"), Some("Invalid GST Number format"));
        assert_eq!(report.message_for("name"), None);

        let err = report.to_result().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation error: Pincode must be 6 digits; Invalid GST Number format"
        );
    }

    #[test]
    fn test_single_error_result() {
        let mut report = ValidationReport::ok();
        report.add("maxOccupancy", "Occupancy must be at least 1");
        assert!(matches!(
            report.to_result(),
            Err(ConsoleError::FieldValidation { ref field, .. }) if field == "maxOccupancy"
        ));
    }
}
