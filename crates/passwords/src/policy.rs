//! Password composition rule checked before a password is stored

use crate::error::{PasswordError, Result};
use regex::Regex;

/// Human-readable form of the rule, shown when a password is rejected
pub const REQUIREMENTS: &str = "Please ensure it contains at least one uppercase letter, \
one lowercase letter, one special character (@#$%^&+=), one number, \
and is at least 8 characters long.";

/// Minimum password length, in characters
pub const MIN_LENGTH: usize = 8;

/// Character-class checks applied to every new password
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    lowercase: Regex,
    uppercase: Regex,
    digit: Regex,
    special: Regex,
    min_length: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordPolicy {
    pub fn new() -> Self {
        Self {
            lowercase: Regex::new(r"[a-z]").unwrap(),
            uppercase: Regex::new(r"[A-Z]").unwrap(),
            digit: Regex::new(r"\d").unwrap(),
            special: Regex::new(r"[@#$%^&+=]").unwrap(),
            min_length: MIN_LENGTH,
        }
    }

    /// True if the password satisfies every rule
    pub fn is_valid(&self, password: &str) -> bool {
        password.chars().count() >= self.min_length
            && self.lowercase.is_match(password)
            && self.uppercase.is_match(password)
            && self.digit.is_match(password)
            && self.special.is_match(password)
    }

    /// Like [`PasswordPolicy::is_valid`], but returns the rule text on failure
    pub fn check(&self, password: &str) -> Result<()> {
        if self.is_valid(password) {
            Ok(())
        } else {
            Err(PasswordError::ValidationFailure(REQUIREMENTS.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_cases() {
        let policy = PasswordPolicy::new();

        // No special character
        assert!(!policy.is_valid("Abc12345"));
        // No uppercase
        assert!(!policy.is_valid("abc123$%"));
        // Too short
        assert!(!policy.is_valid("Ab1$56"));

        assert!(policy.is_valid("Abcdef1$"));
    }

    #[test]
    fn test_each_class_required() {
        let policy = PasswordPolicy::new();

        assert!(!policy.is_valid("ABCDEF1$"));
        assert!(!policy.is_valid("abcdef1$"));
        assert!(!policy.is_valid("Abcdefg$"));
        assert!(!policy.is_valid("Abcdefg1"));
        assert!(!policy.is_valid(""));
    }

    #[test]
    fn test_special_set() {
        let policy = PasswordPolicy::new();

        for c in ['@', '#', '$', '%', '^', '&', '+', '='] {
            assert!(policy.is_valid(&format!("Abcdef1{}", c)), "{} should count", c);
        }
        for c in ['!', '*', '-', '_', '?', ' '] {
            assert!(!policy.is_valid(&format!("Abcdef1{}", c)), "{} should not count", c);
        }
    }

    #[test]
    fn test_length_boundary() {
        let policy = PasswordPolicy::new();

        assert!(!policy.is_valid("Abcde1$"));
        assert!(policy.is_valid("Abcde1$x"));
        assert!(policy.is_valid("Abcdefghijklmnop1$"));
    }

    #[test]
    fn test_check_reports_rule() {
        let policy = PasswordPolicy::new();

        assert!(policy.check("Abcdef1$").is_ok());
        match policy.check("weak") {
            Err(PasswordError::ValidationFailure(rule)) => assert_eq!(rule, REQUIREMENTS),
            other => panic!("Expected ValidationFailure, got {:?}", other),
        }
    }
}
