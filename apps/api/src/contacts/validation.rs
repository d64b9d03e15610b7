use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;

use crate::errors::AppError;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

/// Deliberately loose: something@something.tld, no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"))
        .is_match(email)
}

#[derive(Debug, Default, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

/// A contact submission that passed validation; fields are trimmed.
#[derive(Debug, PartialEq, Eq)]
pub struct ValidContact {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    pub fn validate(self) -> Result<ValidContact, AppError> {
        let name = self.name.trim();
        let email = self.email.trim();
        let message = self.message.trim();

        if name.is_empty() || email.is_empty() || message.is_empty() {
            return Err(AppError::Validation("All fields are required".to_string()));
        }
        if !is_valid_email(email) {
            return Err(AppError::Validation(
                "Please enter a valid email address".to_string(),
            ));
        }

        Ok(ValidContact {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        })
    }
}
