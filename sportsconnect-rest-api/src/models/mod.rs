//! Request and response models for the REST API

pub mod coaches;
pub mod common;
pub mod maps;
pub mod players;
pub mod tournaments;
pub mod users;
pub mod venues;

pub use coaches::*;
pub use common::*;
pub use maps::*;
pub use players::*;
pub use tournaments::*;
pub use users::*;
pub use venues::*;

/// Trimmed value of a required text field; blank counts as missing
pub fn required(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Partial updates ignore blank strings and keep the stored value
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Emails are matched case-insensitively
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_fields_are_missing() {
        assert_eq!(required(&Some("  Asha ".to_string())), Some("Asha"));
        assert_eq!(required(&Some("   ".to_string())), None);
        assert_eq!(required(&None), None);
        assert_eq!(non_blank(Some(String::new())), None);
    }

    #[test]
    fn test_email_normalization() {
        assert_eq!(normalize_email(" Asha@Example.COM "), "asha@example.com");
    }
}
