//! Per-domain validation

use crate::error::{ConfigError, ConfigResult};

/// Implemented by every configuration domain.
///
/// The provided checks tag their errors with [`Validatable::domain_name`].
pub trait Validatable {
    fn validate(&self) -> ConfigResult<()>;

    fn domain_name(&self) -> &'static str;

    fn invalid(&self, message: impl Into<String>) -> ConfigError {
        ConfigError::Invalid {
            domain: self.domain_name(),
            message: message.into(),
        }
    }

    /// Reject blank strings
    fn require(&self, field: &str, value: &str) -> ConfigResult<()> {
        if value.trim().is_empty() {
            return Err(self.invalid(format!("{} cannot be empty", field)));
        }
        Ok(())
    }

    fn require_positive<T>(&self, field: &str, value: T) -> ConfigResult<()>
    where
        T: PartialOrd + Default + std::fmt::Display,
    {
        if value <= T::default() {
            return Err(self.invalid(format!("{} must be greater than 0, got {}", field, value)));
        }
        Ok(())
    }

    /// Require an absolute http(s) URL
    fn require_http_url(&self, field: &str, value: &str) -> ConfigResult<()> {
        self.require(field, value)?;
        let parsed = url::Url::parse(value).map_err(|e| self.invalid(format!("{} is not a valid URL: {}", field, e)))?;
        match parsed.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(self.invalid(format!("{} must use http or https, got '{}'", field, scheme))),
        }
    }

    fn check_port(&self, field: &str, port: u16) -> ConfigResult<()> {
        if port == 0 {
            return Err(self.invalid(format!("{} cannot be 0", field)));
        }
        if port < 1024 {
            log::warn!("{} {} is a privileged port", field, port);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Sample;

    impl Validatable for Sample {
        fn validate(&self) -> ConfigResult<()> {
            Ok(())
        }

        fn domain_name(&self) -> &'static str {
            "sample"
        }
    }

    #[test]
    fn test_require_rejects_blank() {
        assert!(Sample.require("field", "value").is_ok());
        let err = Sample.require("field", "   ").unwrap_err();
        assert_eq!(err.to_string(), "Invalid sample configuration: field cannot be empty");
    }

    #[test]
    fn test_require_http_url() {
        assert!(Sample.require_http_url("base_url", "https://maps.googleapis.com").is_ok());
        assert!(Sample.require_http_url("base_url", "ftp://example.com").is_err());
        assert!(Sample.require_http_url("base_url", "not a url").is_err());
    }

    #[test]
    fn test_require_positive() {
        assert!(Sample.require_positive("radius", 3.0).is_ok());
        assert!(Sample.require_positive("count", 0u32).is_err());
        assert!(Sample.check_port("port", 0).is_err());
    }
}
