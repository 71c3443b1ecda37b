//! Name validation for usernames and quest names.
//!
//! The tracker stores users in a plain JSON document keyed by username, so the
//! rules here are deliberately light: non-empty, bounded length, no control
//! characters. Callers are expected to trim surrounding whitespace before
//! validation; a whitespace-only name is still rejected here.

use thiserror::Error;

/// Maximum accepted username length in characters.
pub const MAX_USERNAME_LEN: usize = 30;

/// Maximum accepted quest name length in characters.
pub const MAX_QUEST_NAME_LEN: usize = 80;

/// Validation errors with helpful messages.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("name cannot be empty or whitespace-only")]
    Empty,

    #[error("name is too long (maximum {max} characters)")]
    TooLong { max: usize },

    #[error("name contains control characters")]
    ControlCharacters,
}

fn validate_name(name: &str, max_len: usize) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::Empty);
    }
    if name.chars().count() > max_len {
        return Err(ValidationError::TooLong { max: max_len });
    }
    if name.chars().any(|c| c.is_control()) {
        return Err(ValidationError::ControlCharacters);
    }
    Ok(())
}

/// Validate a username before it becomes a key in the user map.
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    validate_name(username, MAX_USERNAME_LEN)
}

/// Validate a quest name before it is appended to a user's quest list.
pub fn validate_quest_name(name: &str) -> Result<(), ValidationError> {
    validate_name(name, MAX_QUEST_NAME_LEN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_and_whitespace_only() {
        assert_eq!(validate_username(""), Err(ValidationError::Empty));
        assert_eq!(validate_username("   "), Err(ValidationError::Empty));
        assert_eq!(validate_quest_name("\t"), Err(ValidationError::Empty));
    }

    #[test]
    fn rejects_over_long_names() {
        let long = "x".repeat(MAX_USERNAME_LEN + 1);
        assert_eq!(
            validate_username(&long),
            Err(ValidationError::TooLong {
                max: MAX_USERNAME_LEN
            })
        );
        // Quest names get a larger budget
        assert!(validate_quest_name(&long).is_ok());
    }

    #[test]
    fn rejects_control_characters() {
        assert_eq!(
            validate_quest_name("read\x07more"),
            Err(ValidationError::ControlCharacters)
        );
    }

    #[test]
    fn accepts_ordinary_names() {
        assert!(validate_username("alice").is_ok());
        assert!(validate_quest_name("improve sleep - Quick Win").is_ok());
    }
}
