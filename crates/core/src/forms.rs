//! Form payloads and field-level validation.
//!
//! Validation produces a [`FormErrors`] map keyed by form field name so a
//! page can be re-rendered with a message next to each offending input.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

const BLANK_MESSAGE: &str = "This field cannot be blank";

/// Field-name to messages map. Empty means the form is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl FormErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.fields
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// First message recorded for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .get(field)
            .and_then(|messages| messages.first())
            .map(String::as_str)
    }

    pub fn has(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Add a blank-field error for each named value that is empty or whitespace.
    fn require(&mut self, values: &[(&str, &str)]) {
        for (field, value) in values {
            if value.trim().is_empty() {
                self.add(field, BLANK_MESSAGE);
            }
        }
    }

    /// Merge derive-based validation errors, skipping fields already reported blank.
    fn merge(&mut self, errors: ValidationErrors) {
        for (field, errs) in errors.field_errors() {
            let field = field.to_string();
            if self.has(&field) {
                continue;
            }
            for err in errs {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for {field}"));
                self.add(&field, message);
            }
        }
    }
}

/// Guest identity fields posted by the reservation form and the admin edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct GuestDetails {
    #[validate(length(min = 3, message = "This field must be at least 3 characters long"))]
    pub first_name: String,
    pub last_name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    pub phone: String,
}

impl GuestDetails {
    /// Required: first name, last name, email. First name at least three
    /// characters; email well formed.
    pub fn check(&self) -> FormErrors {
        let mut errors = FormErrors::default();
        errors.require(&[
            ("first_name", self.first_name.as_str()),
            ("last_name", self.last_name.as_str()),
            ("email", self.email.as_str()),
        ]);
        if let Err(e) = self.validate() {
            errors.merge(e);
        }
        errors
    }
}

/// Credentials posted by the login form.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct Credentials {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn check(&self) -> FormErrors {
        let mut errors = FormErrors::default();
        errors.require(&[
            ("email", self.email.as_str()),
            ("password", self.password.as_str()),
        ]);
        if let Err(e) = self.validate() {
            errors.merge(e);
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guest(first_name: &str, email: &str) -> GuestDetails {
        GuestDetails {
            first_name: first_name.to_string(),
            last_name: "Smith".to_string(),
            email: email.to_string(),
            phone: String::new(),
        }
    }

    #[test]
    fn first_name_of_two_chars_is_invalid() {
        let errors = guest("Sa", "sam@smith.com").check();
        assert!(errors.has("first_name"));
        assert!(errors.get("first_name").unwrap().contains("at least 3"));
    }

    #[test]
    fn first_name_of_three_chars_is_valid() {
        assert!(guest("Sam", "sam@smith.com").check().is_empty());
    }

    #[test]
    fn malformed_email_is_invalid() {
        let errors = guest("Sam", "invalid").check();
        assert_eq!(errors.get("email"), Some("Invalid email address"));
    }

    #[test]
    fn short_email_is_valid() {
        assert!(guest("Sam", "a@b.com").check().is_empty());
    }

    #[test]
    fn blank_required_fields_report_blank_once() {
        let details = GuestDetails::default();
        let errors = details.check();
        assert_eq!(errors.get("first_name"), Some(BLANK_MESSAGE));
        assert_eq!(errors.get("last_name"), Some(BLANK_MESSAGE));
        assert_eq!(errors.get("email"), Some(BLANK_MESSAGE));
        assert!(!errors.has("phone"));
    }

    #[test]
    fn credentials_require_both_fields() {
        let errors = Credentials::default().check();
        assert!(errors.has("email"));
        assert!(errors.has("password"));

        let ok = Credentials {
            email: "admin@admin.com".to_string(),
            password: "password".to_string(),
        };
        assert!(ok.check().is_empty());
    }
}
