//! Pure field validators shared by signup, login, and posting.
//!
//! Each validator returns `Some(ValidationError)` on failure so callers can
//! collect every failing field for a form instead of stopping at the first.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Field, ValidationError};

pub const MIN_NAME_LEN: usize = 2;
pub const MIN_PASSWORD_LEN: usize = 6;
pub const MIN_TITLE_LEN: usize = 10;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// Standard address-syntax check: something@something.something, no spaces.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

pub fn name(value: &str) -> Option<ValidationError> {
    if value.chars().count() < MIN_NAME_LEN {
        return Some(ValidationError::new(
            Field::Name,
            "Name must be at least 2 characters",
        ));
    }
    None
}

pub fn email(value: &str) -> Option<ValidationError> {
    if !is_valid_email(value) {
        return Some(ValidationError::new(
            Field::Email,
            "Please enter a valid email address",
        ));
    }
    None
}

pub fn password(value: &str) -> Option<ValidationError> {
    if value.chars().count() < MIN_PASSWORD_LEN {
        return Some(ValidationError::new(
            Field::Password,
            "Password must be at least 6 characters",
        ));
    }
    None
}

pub fn confirm_password(password: &str, confirm: &str) -> Option<ValidationError> {
    if password != confirm {
        return Some(ValidationError::new(
            Field::ConfirmPassword,
            "Passwords do not match",
        ));
    }
    None
}

pub fn title(value: &str) -> Option<ValidationError> {
    if value.chars().count() < MIN_TITLE_LEN {
        return Some(ValidationError::new(
            Field::Title,
            "Title must be at least 10 characters",
        ));
    }
    None
}
