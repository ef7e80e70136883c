//! Credential policy: the two input checks every account operation relies on.
//!
//! The email check is deliberately naive. It only requires an `@` and a `.`
//! somewhere in the string, in any order.

use crate::config::MIN_PASSWORD_LENGTH;
use crate::errors::ValidationError;

/// Check that an email contains both `@` and `.`.
pub fn validate_email_shape(email: &str) -> Result<(), ValidationError> {
    if email.contains('@') && email.contains('.') {
        Ok(())
    } else {
        Err(ValidationError::EmailFormat)
    }
}

/// Check password length, then that the confirmation matches exactly.
///
/// Length is counted in bytes of the UTF-8 encoding. The length check always runs first, so a
/// short password reports `PasswordTooShort` even when the confirmation
/// differs.
pub fn validate_password_rule(password: &str, confirmation: &str) -> Result<(), ValidationError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooShort);
    }
    if password != confirmation {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_requires_at_and_dot() {
        assert_eq!(validate_email_shape("kale"), Err(ValidationError::EmailFormat));
        assert_eq!(validate_email_shape("kale@gmailcom"), Err(ValidationError::EmailFormat));
        assert_eq!(validate_email_shape("kalegmail.com"), Err(ValidationError::EmailFormat));
        assert_eq!(validate_email_shape(""), Err(ValidationError::EmailFormat));
        assert!(validate_email_shape("kale@gmail.com").is_ok());
    }

    #[test]
    fn test_email_check_is_order_independent() {
        assert!(validate_email_shape("first.last@host").is_ok());
        assert!(validate_email_shape(".@").is_ok());
    }

    #[test]
    fn test_short_password_rejected_even_when_confirmed() {
        assert_eq!(
            validate_password_rule("1234", "1234"),
            Err(ValidationError::PasswordTooShort)
        );
        assert_eq!(
            validate_password_rule("1234567", "1234567"),
            Err(ValidationError::PasswordTooShort)
        );
    }

    #[test]
    fn test_length_checked_before_match() {
        assert_eq!(
            validate_password_rule("short", "different-and-long"),
            Err(ValidationError::PasswordTooShort)
        );
    }

    #[test]
    fn test_mismatch_rejected() {
        assert_eq!(
            validate_password_rule("123456789", "1234987655"),
            Err(ValidationError::PasswordMismatch)
        );
        assert_eq!(
            validate_password_rule("password12", "password123"),
            Err(ValidationError::PasswordMismatch)
        );
    }

    #[test]
    fn test_minimum_length_accepted() {
        assert!(validate_password_rule("12345678", "12345678").is_ok());
    }

    #[test]
    fn test_length_counts_bytes() {
        // 4 characters, 8 bytes
        assert!(validate_password_rule("éééé", "éééé").is_ok());
        // 7 bytes
        assert_eq!(
            validate_password_rule("abcdefg", "abcdefg"),
            Err(ValidationError::PasswordTooShort)
        );
        // 3 characters, 7 bytes
        assert_eq!(
            validate_password_rule("ééa1", "ééa1"),
            Err(ValidationError::PasswordTooShort)
        );
    }
}
