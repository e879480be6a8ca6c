//! Client-side pre-dispatch validation for auth forms.
//!
//! Required-field presence and email shape are checked before a request is
//! built, so round-trips guaranteed to fail with a 400 are avoided. Errors
//! carry the offending field name so surfaces can annotate the exact field,
//! the same way server-side 400s are rendered.

use crate::error::{CropmateError, Result};
use regex::Regex;
use std::sync::OnceLock;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
    })
}

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CropmateError::invalid_input(field, "is required"));
    }
    Ok(())
}

fn require_email(email: &str) -> Result<()> {
    require("email", email)?;
    if !email_regex().is_match(email.trim()) {
        return Err(CropmateError::invalid_input(
            "email",
            "is not a valid email address",
        ));
    }
    Ok(())
}

/// Validates a login form before dispatch.
pub fn validate_login_input(email: &str, password: &str) -> Result<()> {
    require_email(email)?;
    require("password", password)?;
    Ok(())
}

/// Validates a registration form before dispatch.
pub fn validate_register_input(name: &str, email: &str, password: &str) -> Result<()> {
    require("name", name)?;
    require_email(email)?;
    require("password", password)?;
    Ok(())
}
