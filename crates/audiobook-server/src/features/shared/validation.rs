//! Shared validation utilities
//!
//! Field rules reused by the commands of several features.
//!
//! # Examples
//!
//! ```rust,ignore
//! use audiobook_server::features::shared::validation::{validate_required, validate_username};
//!
//! validate_username(&command.username)?;
//! validate_required(&command.fullname, "Full name", 255)?;
//! ```

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

pub const USERNAME_MIN_LENGTH: usize = 3;
pub const USERNAME_MAX_LENGTH: usize = 50;
pub const PASSWORD_MIN_LENGTH: usize = 6;
pub const PASSWORD_MAX_LENGTH: usize = 128;
pub const EMAIL_MAX_LENGTH: usize = 255;
pub const PHONE_MAX_LENGTH: usize = 20;

static USERNAME_RE: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.]+$"));

static EMAIL_RE: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$"));

static PHONE_RE: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^[0-9+\- ]+$"));

fn is_match(pattern: &LazyLock<Result<Regex, regex::Error>>, value: &str) -> bool {
    pattern.as_ref().is_ok_and(|re| re.is_match(value))
}

/// Errors raised by the shared field rules
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FieldValidationError {
    #[error("{field} is required and cannot be empty")]
    Required { field: &'static str },

    #[error("{field} must be at most {max_length} characters")]
    TooLong {
        field: &'static str,
        max_length: usize,
    },

    #[error("{field} must be between {min_length} and {max_length} characters")]
    Length {
        field: &'static str,
        min_length: usize,
        max_length: usize,
    },

    #[error("Username can only contain letters, numbers, underscores and dots")]
    UsernameFormat,

    #[error("Email address is invalid")]
    EmailFormat,

    #[error("Phone number can only contain digits, spaces, '+' and '-'")]
    PhoneFormat,

    #[error("Rating must be between 1 and 5")]
    RatingRange,

    #[error("{field} must be a positive id")]
    InvalidId { field: &'static str },
}

/// Validate a required text field
///
/// Rejects blank values and values longer than `max_length` characters.
pub fn validate_required(
    value: &str,
    field: &'static str,
    max_length: usize,
) -> Result<(), FieldValidationError> {
    if value.trim().is_empty() {
        return Err(FieldValidationError::Required { field });
    }

    if value.chars().count() > max_length {
        return Err(FieldValidationError::TooLong { field, max_length });
    }

    Ok(())
}

/// Validate an optional text field that, when present, follows the required rules
pub fn validate_optional(
    value: Option<&str>,
    field: &'static str,
    max_length: usize,
) -> Result<(), FieldValidationError> {
    match value {
        Some(value) => validate_required(value, field, max_length),
        None => Ok(()),
    }
}

pub fn validate_username(username: &str) -> Result<(), FieldValidationError> {
    if username.is_empty() {
        return Err(FieldValidationError::Required { field: "Username" });
    }

    let length = username.chars().count();
    if !(USERNAME_MIN_LENGTH..=USERNAME_MAX_LENGTH).contains(&length) {
        return Err(FieldValidationError::Length {
            field: "Username",
            min_length: USERNAME_MIN_LENGTH,
            max_length: USERNAME_MAX_LENGTH,
        });
    }

    if !is_match(&USERNAME_RE, username) {
        return Err(FieldValidationError::UsernameFormat);
    }

    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), FieldValidationError> {
    if password.is_empty() {
        return Err(FieldValidationError::Required { field: "Password" });
    }

    let length = password.chars().count();
    if !(PASSWORD_MIN_LENGTH..=PASSWORD_MAX_LENGTH).contains(&length) {
        return Err(FieldValidationError::Length {
            field: "Password",
            min_length: PASSWORD_MIN_LENGTH,
            max_length: PASSWORD_MAX_LENGTH,
        });
    }

    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), FieldValidationError> {
    validate_required(email, "Email", EMAIL_MAX_LENGTH)?;

    if !is_match(&EMAIL_RE, email) {
        return Err(FieldValidationError::EmailFormat);
    }

    Ok(())
}

/// Phone numbers are optional; an empty string counts as absent
pub fn validate_phone(phone: Option<&str>) -> Result<(), FieldValidationError> {
    let Some(phone) = phone.filter(|p| !p.is_empty()) else {
        return Ok(());
    };

    if phone.chars().count() > PHONE_MAX_LENGTH {
        return Err(FieldValidationError::TooLong {
            field: "Phone number",
            max_length: PHONE_MAX_LENGTH,
        });
    }

    if !is_match(&PHONE_RE, phone) {
        return Err(FieldValidationError::PhoneFormat);
    }

    Ok(())
}

pub fn validate_rating(rating: i32) -> Result<(), FieldValidationError> {
    if !(1..=5).contains(&rating) {
        return Err(FieldValidationError::RatingRange);
    }
    Ok(())
}

pub fn validate_id(id: i64, field: &'static str) -> Result<(), FieldValidationError> {
    if id < 1 {
        return Err(FieldValidationError::InvalidId { field });
    }
    Ok(())
}
