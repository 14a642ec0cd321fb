//! Input checks for signup and contact fields.

use crate::error::{Error, Result};
use regex::Regex;
use std::sync::LazyLock;

/// Shortest password accepted at signup, in characters.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Digits a phone number must carry, ignoring separators.
pub const MIN_PHONE_DIGITS: usize = 10;

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid"));

static PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9\s\-()]+$").expect("phone regex is valid"));

/// `local@domain.tld` shape: one `@`, no whitespace, and a dot inside the
/// domain with something on both sides of it.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Optional leading `+`, then only digits, whitespace, `-`, `(` and `)`, with
/// at least [`MIN_PHONE_DIGITS`] digits in total.
#[must_use]
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_REGEX.is_match(phone) && phone.chars().filter(char::is_ascii_digit).count() >= MIN_PHONE_DIGITS
}

/// Reject a plain-text password shorter than [`MIN_PASSWORD_LEN`]. Run this
/// before hashing; the hash always passes.
pub fn check_password(password: &str) -> Result<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(Error::Validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}
