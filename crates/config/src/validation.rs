//! Validation system for configuration values
//!
//! Each config section implements [`ConfigSection`], which checks its own
//! fields; [`Validator`] holds the shared field checks.

pub use crate::error::ValidationError;

/// One `[table]` of the config file
pub trait ConfigSection: Default {
    /// Validates the section, returning every problem found
    fn validate(&self) -> Result<(), Vec<ValidationError>>;
}

/// Common validators for config values
pub struct Validator;

impl Validator {
    /// Validates that a numeric value is within a range
    pub fn in_range<T>(value: T, min: T, max: T, field: &str) -> Result<(), ValidationError>
    where
        T: PartialOrd + std::fmt::Display + Copy,
    {
        if value < min || value > max {
            Err(ValidationError::new(field, format!("must be between {} and {}", min, max)).got(value))
        } else {
            Ok(())
        }
    }

    /// Validates that a string is not empty
    pub fn not_empty(value: &str, field: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            Err(ValidationError::new(field, "must not be empty"))
        } else {
            Ok(())
        }
    }

    /// Validates that a string is an http:// or https:// URL with a host
    pub fn http_url(value: &str, field: &str) -> Result<(), ValidationError> {
        let rest = value
            .strip_prefix("http://")
            .or_else(|| value.strip_prefix("https://"));

        match rest {
            Some(rest) if !rest.is_empty() && !rest.starts_with('/') => Ok(()),
            _ => Err(ValidationError::new(field, "must be an http(s) URL").got(value)),
        }
    }

    /// Collects multiple validation results into a single result
    pub fn collect_errors(
        results: Vec<Result<(), ValidationError>>,
    ) -> Result<(), Vec<ValidationError>> {
        let errors: Vec<ValidationError> = results.into_iter().filter_map(|r| r.err()).collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_range_valid() {
        assert!(Validator::in_range(50, 0, 100, "test").is_ok());
        assert!(Validator::in_range(0, 0, 100, "test").is_ok());
        assert!(Validator::in_range(100, 0, 100, "test").is_ok());
    }

    #[test]
    fn test_in_range_invalid() {
        assert!(Validator::in_range(-1, 0, 100, "test").is_err());
        assert!(Validator::in_range(101, 0, 100, "test").is_err());
    }

    #[test]
    fn test_not_empty() {
        assert!(Validator::not_empty("  hello  ", "test").is_ok());
        assert!(Validator::not_empty("", "test").is_err());
        assert!(Validator::not_empty("   ", "test").is_err());
    }

    #[test]
    fn test_http_url() {
        assert!(Validator::http_url("http://localhost:3001", "test").is_ok());
        assert!(Validator::http_url("https://www.googleapis.com/books/v1", "test").is_ok());
        assert!(Validator::http_url("ftp://example.com", "test").is_err());
        assert!(Validator::http_url("http://", "test").is_err());
        assert!(Validator::http_url("localhost:3001", "test").is_err());
    }

    #[test]
    fn test_collect_errors_some_err() {
        let results = vec![
            Ok(()),
            Err(ValidationError::new("field1", "error1")),
            Ok(()),
            Err(ValidationError::new("field2", "error2")),
        ];
        let result = Validator::collect_errors(results);
        assert_eq!(result.unwrap_err().len(), 2);
    }

    #[test]
    fn test_collect_errors_all_ok() {
        assert!(Validator::collect_errors(vec![Ok(()), Ok(())]).is_ok());
    }
}
