use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidationError;

use crate::constants::{MAX_LABEL_LENGTH, MIN_LABEL_LENGTH};

static USER_ID_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[1-5][0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$")
        .expect("user id pattern is valid")
});

/// Checks a recipe label and returns it trimmed. Length is counted in characters, not bytes,
/// so a 50 character Chinese dish name is accepted.
pub fn validate_label(label: &str) -> Result<&str, ValidationError> {
    let trimmed = label.trim();
    let length = trimmed.chars().count();
    if length < MIN_LABEL_LENGTH || length > MAX_LABEL_LENGTH {
        return Err(ValidationError::new("invalid_label_length"));
    }
    Ok(trimmed)
}

pub fn validate_user_id(user_id: &str) -> Result<(), ValidationError> {
    if !is_valid_user_id(user_id) {
        return Err(ValidationError::new("invalid_user_id"));
    }
    Ok(())
}

pub fn is_valid_user_id(user_id: &str) -> bool {
    USER_ID_PATTERN.is_match(user_id)
}
