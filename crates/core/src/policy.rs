//! Input policies for user-supplied fields.
//!
//! Each checker has the `validator` custom-rule signature so request DTOs
//! can reference it with `#[validate(custom(function = "..."))]`.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use validator::ValidationError;

/// Minimum phone length, counting separators and the leading `+`.
pub const MIN_PHONE_LENGTH: usize = 11;

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Special characters accepted (and one of which is required) in passwords.
pub const PASSWORD_SPECIALS: &str = "@$!%*?&";

static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\+?\d{1,4}?[-.\s]?\(?\d{1,3}?\)?[-.\s]?\d{1,4}[-.\s]?\d{1,4}[-.\s]?\d{1,9}$")
        .expect("phone pattern is valid")
});

/// Accepts international and local formats such as `+7 (999) 123-45-67`.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if phone.chars().count() < MIN_PHONE_LENGTH || !PHONE_RE.is_match(phone) {
        return Err(ValidationError::new("phone").with_message(Cow::Borrowed(
            "Invalid phone number format. Example: +7 (999) 123-45-67",
        )));
    }
    Ok(())
}

/// Latin letters in both cases, at least one digit and one of `@$!%*?&`,
/// nothing else, minimum eight characters.
pub fn validate_password_policy(password: &str) -> Result<(), ValidationError> {
    let allowed = password
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || PASSWORD_SPECIALS.contains(c));
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_special = password.chars().any(|c| PASSWORD_SPECIALS.contains(c));

    if password.len() < MIN_PASSWORD_LENGTH
        || !allowed
        || !has_lower
        || !has_upper
        || !has_digit
        || !has_special
    {
        return Err(ValidationError::new("password").with_message(Cow::Owned(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters of Latin letters \
             (upper and lower case), digits and at least one of {PASSWORD_SPECIALS}"
        ))));
    }
    Ok(())
}
