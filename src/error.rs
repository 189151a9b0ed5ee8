//! Error types for the flexconf library.
//!
//! All failures are reported through a single [`Error`] enum, using
//! `thiserror` for ergonomic error handling. Display strings embed the
//! offending name plus, for validation failures, the value's hint and a
//! working example, because the typical reader is a human fixing an
//! override file rather than a programmer.

use thiserror::Error;

use crate::value::Value;

/// Result type alias for operations that may fail with a flexconf error.
///
/// # Examples
///
/// ```
/// use flexconf::{Result, Value};
///
/// fn example_operation() -> Result<Value> {
///     Ok(Value::Int(1))
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the flexconf library.
#[derive(Debug, Error)]
pub enum Error {
    /// A value failed its validation predicate after preprocessing.
    ///
    /// The prior value (or, at construction time, the whole object) is
    /// left untouched.
    #[error("validation failed for '{name}'\nHint: {hint}\nExample: {example}")]
    Validation {
        /// Name of the configuration value that rejected the input.
        name: String,
        /// The value's human-readable hint.
        hint: String,
        /// A raw default known to pass validation.
        example: Value,
    },

    /// A write was attempted on a value that has already been locked.
    #[error("'{name}' is locked from updates")]
    Locked {
        /// Name of the locked configuration value.
        name: String,
    },

    /// An operation referenced a key absent from its group.
    #[error("unknown key '{key}'")]
    UnknownKey {
        /// The key that could not be found.
        key: String,
    },

    /// An override source referenced a section absent from the index.
    #[error("unexpected section '{section}'")]
    UnknownSection {
        /// The section name that could not be found.
        section: String,
    },

    /// Two sibling entities share a name.
    ///
    /// Raised at container construction time, and when an override source
    /// repeats a section header or a key within one section.
    #[error("duplicate key '{key}'")]
    DuplicateKey {
        /// The name that occurred more than once.
        key: String,
    },

    /// An override source line could not be parsed.
    #[error("parse error at line {line}: {reason}")]
    Parse {
        /// One-based line number within the override source.
        line: usize,
        /// A description of what was expected.
        reason: String,
    },

    /// An I/O error occurred while reading an override file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Check if the error indicates a write to a locked value.
    ///
    /// # Examples
    ///
    /// ```
    /// use flexconf::Error;
    ///
    /// let err = Error::Locked { name: "num_apples".into() };
    /// assert!(err.is_locked());
    /// ```
    #[must_use]
    pub fn is_locked(&self) -> bool {
        matches!(self, Self::Locked { .. })
    }

    /// Check if the error indicates a failed validation predicate.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Check if the error references a name absent from its container.
    ///
    /// Covers both unknown keys and unknown sections.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::UnknownKey { .. } | Self::UnknownSection { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_embeds_hint_and_example() {
        let err = Error::Validation {
            name: "num_apples".to_string(),
            hint: "number of apples".to_string(),
            example: Value::Int(0),
        };
        let display = format!("{err}");
        assert!(display.contains("validation failed for 'num_apples'"));
        assert!(display.contains("Hint: number of apples"));
        assert!(display.contains("Example: 0"));
    }

    #[test]
    fn test_locked_error_names_value() {
        let err = Error::Locked {
            name: "num_apples".to_string(),
        };
        assert_eq!(format!("{err}"), "'num_apples' is locked from updates");
        assert!(err.is_locked());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_unknown_section_error() {
        let err = Error::UnknownSection {
            section: "statz".to_string(),
        };
        assert_eq!(format!("{err}"), "unexpected section 'statz'");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_unknown_key_error() {
        let err = Error::UnknownKey {
            key: "num_oranges".to_string(),
        };
        assert!(format!("{err}").contains("num_oranges"));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_duplicate_key_error() {
        let err = Error::DuplicateKey {
            key: "stats".to_string(),
        };
        assert_eq!(format!("{err}"), "duplicate key 'stats'");
    }

    #[test]
    fn test_parse_error_reports_line() {
        let err = Error::Parse {
            line: 3,
            reason: "expected 'key = value'".to_string(),
        };
        let display = format!("{err}");
        assert!(display.contains("line 3"));
        assert!(display.contains("expected 'key = value'"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(format!("{err}").contains("I/O error"));
    }
}
