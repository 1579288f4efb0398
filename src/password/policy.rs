//! Password strength judgment.
//!
//! Checks run in a fixed order and the first failure wins:
//! length, weak-password list, repetition, character classes (optional),
//! and finally Shannon entropy. The verdict never blocks anything on its
//! own; callers decide whether to warn, retry, or accept an override.

use std::collections::HashMap;

use serde::Serialize;

/// Default minimum password length (characters).
pub const DEFAULT_MIN_LENGTH: usize = 12;

/// Smallest minimum length a user may configure.
pub const MIN_LENGTH_FLOOR: usize = 6;

/// Largest minimum length a user may configure.
pub const MIN_LENGTH_CEILING: usize = 32;

/// Minimum entropy for acceptance (bits per character).
pub const MIN_ENTROPY: f64 = 3.0;

/// Entropy above which an accepted password is rated strong.
pub const STRONG_ENTROPY_THRESHOLD: f64 = 4.0;

/// A run of this many identical characters is rejected.
pub const REPEAT_THRESHOLD: usize = 4;

const COMMON_PASSWORDS: [&str; 16] = [
    "password",
    "Password1",
    "123456",
    "12345678",
    "qwerty",
    "abc123",
    "password123",
    "admin",
    "letmein",
    "welcome",
    "monkey",
    "1234567890",
    "iloveyou",
    "princess",
    "football",
    "starwars",
];

const SYMBOLS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strength {
    Weak,
    Good,
    Strong,
}

impl std::fmt::Display for Strength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Weak => "weak",
            Self::Good => "good",
            Self::Strong => "strong",
        })
    }
}

/// Outcome of `validate_password`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PasswordVerdict {
    pub valid: bool,
    pub strength: Strength,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl PasswordVerdict {
    fn reject(message: String, suggestion: &str) -> Self {
        Self {
            valid: false,
            strength: Strength::Weak,
            message,
            suggestion: Some(suggestion.to_string()),
        }
    }
}

/// Configured policy thresholds, usually built from `Settings`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordPolicy {
    pub min_length: usize,
    pub require_complexity: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: DEFAULT_MIN_LENGTH,
            require_complexity: true,
        }
    }
}

impl PasswordPolicy {
    pub fn validate(&self, password: &str) -> PasswordVerdict {
        validate_password(password, self.min_length, self.require_complexity)
    }
}

/// Judge `password` against the policy.
pub fn validate_password(
    password: &str,
    min_length: usize,
    require_complexity: bool,
) -> PasswordVerdict {
    if password.chars().count() < min_length {
        return PasswordVerdict::reject(
            format!("Password must be at least {min_length} characters long"),
            "Use a longer passphrase with mixed characters",
        );
    }

    if is_common_password(password) {
        return PasswordVerdict::reject(
            "This password is too common and easily guessed".into(),
            "Use a unique passphrase or password manager",
        );
    }

    if has_repeated_chars(password, REPEAT_THRESHOLD) {
        return PasswordVerdict::reject(
            "Password contains too many repeated characters".into(),
            "Avoid repetition for better security",
        );
    }

    if require_complexity && character_classes(password) < 3 {
        return PasswordVerdict::reject(
            "Password must contain mixed character types (uppercase, lowercase, numbers, symbols)"
                .into(),
            "Add uppercase letters, numbers, or symbols",
        );
    }

    let entropy = shannon_entropy(password);
    if entropy < MIN_ENTROPY {
        return PasswordVerdict::reject(
            "Password lacks complexity (repeated characters or simple patterns)".into(),
            "Mix letters, numbers, and symbols",
        );
    }

    PasswordVerdict {
        valid: true,
        strength: if entropy > STRONG_ENTROPY_THRESHOLD {
            Strength::Strong
        } else {
            Strength::Good
        },
        message: "Password strength is acceptable".into(),
        suggestion: None,
    }
}

/// Shannon entropy of the character distribution, in bits per character.
pub fn shannon_entropy(password: &str) -> f64 {
    let mut counts: HashMap<char, usize> = HashMap::new();
    let mut total = 0usize;
    for c in password.chars() {
        *counts.entry(c).or_default() += 1;
        total += 1;
    }
    if total == 0 {
        return 0.0;
    }

    counts
        .values()
        .map(|&n| {
            let p = n as f64 / total as f64;
            -p * p.log2()
        })
        .sum()
}

fn is_common_password(password: &str) -> bool {
    let lower = password.to_lowercase();
    COMMON_PASSWORDS
        .iter()
        .any(|common| lower.contains(&common.to_lowercase()))
}

fn has_repeated_chars(password: &str, threshold: usize) -> bool {
    let mut run = 0usize;
    let mut prev = None;
    for c in password.chars() {
        if Some(c) == prev {
            run += 1;
            if run >= threshold {
                return true;
            }
        } else {
            run = 1;
            prev = Some(c);
        }
    }
    false
}

fn character_classes(password: &str) -> usize {
    let lower = password.chars().any(|c| c.is_ascii_lowercase());
    let upper = password.chars().any(|c| c.is_ascii_uppercase());
    let digit = password.chars().any(|c| c.is_ascii_digit());
    let symbol = password.chars().any(|c| SYMBOLS.contains(c));
    [lower, upper, digit, symbol].into_iter().filter(|&b| b).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_password_fails_length() {
        let v = validate_password("short", DEFAULT_MIN_LENGTH, true);
        assert!(!v.valid);
        assert_eq!(v.strength, Strength::Weak);
        assert_eq!(v.message, "Password must be at least 12 characters long");
    }

    #[test]
    fn repeated_run_fails_before_complexity() {
        let v = validate_password("aaaaaaaaaaaa", 12, true);
        assert!(!v.valid);
        assert_eq!(v.message, "Password contains too many repeated characters");
    }

    #[test]
    fn three_in_a_row_is_fine() {
        assert!(!has_repeated_chars("aaab", 4));
        assert!(has_repeated_chars("xaaaab", 4));
    }

    #[test]
    fn lowercase_only_fails_complexity_when_required() {
        let v = validate_password("correcthorsebatterystaple", 12, true);
        assert!(!v.valid);
        assert!(v.message.starts_with("Password must contain mixed character types"));

        let relaxed = validate_password("correcthorsebatterystaple", 12, false);
        assert!(relaxed.valid, "{relaxed:?}");
    }

    #[test]
    fn dictionary_substring_is_case_insensitive() {
        let v = validate_password("MyPASSWORDisLong!9", 12, true);
        assert!(!v.valid);
        assert_eq!(v.message, "This password is too common and easily guessed");
    }

    #[test]
    fn mixed_class_password_is_accepted_and_rated() {
        // Sixteen distinct characters: exactly 4.0 bits, not above the threshold.
        let v = validate_password("Tr7!kq#Vz2@Lm9$x", 12, true);
        assert!(v.valid, "{v:?}");
        assert_eq!(v.strength, Strength::Good);
        assert!(v.suggestion.is_none());

        let v = validate_password("Tr7!kq#Vz2@Lm9$xW", 12, true);
        assert_eq!(v.strength, Strength::Strong);
    }

    #[test]
    fn low_entropy_is_rejected_last() {
        // Twelve chars, three classes, but only four distinct symbols.
        let v = validate_password("aB1!aB1!aB1!", 12, true);
        assert!(!v.valid);
        assert_eq!(
            v.message,
            "Password lacks complexity (repeated characters or simple patterns)"
        );
    }

    #[test]
    fn entropy_of_uniform_distribution() {
        assert!((shannon_entropy("abcd") - 2.0).abs() < 1e-9);
        assert_eq!(shannon_entropy("aaaa"), 0.0);
        assert_eq!(shannon_entropy(""), 0.0);
    }

    #[test]
    fn verdict_serializes_lowercase_strength() {
        let v = validate_password("short", 12, true);
        let json = serde_json::to_string(&v).unwrap();
        assert!(json.contains("\"strength\":\"weak\""), "{json}");
    }
}
