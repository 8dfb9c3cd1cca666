//! Input validation for API requests.
//!
//! Validators return the trimmed value on success so handlers never
//! persist surrounding whitespace.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for a plausible email address (local@domain.tld)
    static ref EMAIL_REGEX: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
}

/// Validate a required free-text field: non-empty after trimming, within
/// a length cap.
pub fn validate_required_text(label: &str, value: &str, max_len: usize) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(format!("{} is required.", label));
    }
    if trimmed.len() > max_len {
        return Err(format!("{} is too long (max {} characters).", label, max_len));
    }
    Ok(trimmed.to_string())
}

/// Validate an optional free-text field; absent or blank becomes an
/// empty string.
pub fn validate_optional_text(label: &str, value: &str, max_len: usize) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.len() > max_len {
        return Err(format!("{} is too long (max {} characters).", label, max_len));
    }
    Ok(trimmed.to_string())
}

/// Validate an email address
pub fn validate_email(email: &str) -> Result<String, String> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Err("Email is required.".to_string());
    }
    if trimmed.len() > 254 {
        return Err("Email is too long (max 254 characters).".to_string());
    }
    if !EMAIL_REGEX.is_match(trimmed) {
        return Err("Invalid email address.".to_string());
    }
    Ok(trimmed.to_string())
}

/// Validate a meditation duration in minutes
pub fn validate_duration_minutes(minutes: i64) -> Result<i64, String> {
    if minutes <= 0 {
        return Err("Duration must be a positive number of minutes.".to_string());
    }
    if minutes > 24 * 60 {
        return Err("Duration cannot exceed 24 hours.".to_string());
    }
    Ok(minutes)
}
