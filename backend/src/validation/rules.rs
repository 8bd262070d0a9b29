//! Common validation rules shared across request inputs.

use validator::ValidationError;

pub const MAX_USER_ID_LENGTH: usize = 64;

/// Validates user id format.
///
/// Requirements:
/// - 1-64 characters in length
/// - Only alphanumeric characters and `_`, `-`, `.`, `@`
pub fn validate_user_id(user_id: &str) -> Result<(), ValidationError> {
    if user_id.is_empty() || user_id.chars().count() > MAX_USER_ID_LENGTH {
        return Err(ValidationError::new("user_id_invalid_length"));
    }

    if !user_id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '@'))
    {
        return Err(ValidationError::new("user_id_invalid_characters"));
    }

    Ok(())
}

/// Validates a history page size against the configured ceiling.
pub fn validate_history_limit(limit: u32, max_limit: u32) -> Result<(), ValidationError> {
    if limit == 0 || limit > max_limit {
        return Err(ValidationError::new("limit_out_of_range"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_rejects_empty() {
        assert!(validate_user_id("").is_err());
    }

    #[test]
    fn user_id_rejects_special_chars() {
        assert!(validate_user_id("user name").is_err());
        assert!(validate_user_id("user/name").is_err());
    }

    #[test]
    fn user_id_rejects_too_long() {
        let long = "a".repeat(MAX_USER_ID_LENGTH + 1);
        assert!(validate_user_id(&long).is_err());
    }

    #[test]
    fn user_id_accepts_valid() {
        assert!(validate_user_id("mock-user").is_ok());
        assert!(validate_user_id("jane.doe@example.com").is_ok());
        assert!(validate_user_id("emp_1042").is_ok());
    }

    #[test]
    fn history_limit_bounds() {
        assert!(validate_history_limit(0, 100).is_err());
        assert!(validate_history_limit(1, 100).is_ok());
        assert!(validate_history_limit(100, 100).is_ok());
        assert!(validate_history_limit(101, 100).is_err());
    }
}
