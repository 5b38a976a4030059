// Input validation for the values typed at the prompts.

use crate::error::{ApiError, Result};

/// A user id must be made of ASCII digits only. Returns the trimmed text so
/// it can go straight into a URL.
pub fn user_id(input: &str) -> Result<String> {
    let id = input.trim();
    if id.is_empty() || !id.chars().all(|c| c.is_ascii_digit()) {
        return Err(ApiError::invalid_input("Please enter a valid number."));
    }
    Ok(id.to_string())
}

/// Todo completion status: `true` or `false`, any case.
pub fn completed_status(input: &str) -> Result<bool> {
    match input.trim().to_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ApiError::invalid_input("Invalid input.")),
    }
}

pub fn non_empty(input: &str, message: &str) -> Result<String> {
    let value = input.trim();
    if value.is_empty() {
        return Err(ApiError::invalid_input(message));
    }
    Ok(value.to_string())
}

/// Split a comma separated list, trimming entries and dropping empty ones.
pub fn coin_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect()
}
