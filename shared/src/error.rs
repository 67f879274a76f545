use std::fmt;
use validator::ValidationError;

use crate::constants::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WheelError {
    EmptyWheel,
}

impl fmt::Display for WheelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyWheel => write!(f, "{}", EMPTY_WHEEL_ERROR),
        }
    }
}

impl std::error::Error for WheelError {}

/// Failures reported by a `RecipeStore`. Everything except `Unavailable` is a rejected
/// precondition and leaves the collection untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreError {
    Duplicate,
    Capacity,
    Validation(ValidationError),
    NotFound,
    Unavailable(String),
}

impl StoreError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Duplicate => DUPLICATE_ITEM_ERROR,
            Self::Capacity => WHEEL_FULL_ERROR,
            Self::Validation(_) => INVALID_LABEL_ERROR,
            Self::NotFound => ITEM_NOT_FOUND_ERROR,
            Self::Unavailable(_) => STORE_UNAVAILABLE_ERROR,
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(e) => write!(f, "Validation error: {}", e.code),
            Self::Unavailable(e) => write!(f, "Store unavailable: {}", e),
            other => write!(f, "{}", other.user_message()),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<ValidationError> for StoreError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}
