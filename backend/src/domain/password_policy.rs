//! Password composition policy applied at registration.
//!
//! The policy is a pure function over the candidate string. Each rule is an
//! independent character-class counter so a rejection can report every unmet
//! rule at once instead of only the first.

use std::fmt;

use serde::Serialize;

/// Minimum number of characters in an acceptable password.
pub const MIN_LENGTH: usize = 6;
/// Minimum number of ASCII uppercase letters.
pub const MIN_UPPERCASE: usize = 2;
/// Minimum number of ASCII digits.
pub const MIN_DIGITS: usize = 2;
/// Characters that satisfy the symbol rule.
pub const SYMBOLS: &str = "!@#$%^&*()_+-=[]{};':\"\\|,.<>/?";

/// A single composition rule a password can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PasswordRule {
    /// Fewer than [`MIN_LENGTH`] characters.
    TooShort,
    /// Fewer than [`MIN_UPPERCASE`] uppercase letters.
    TooFewUppercase,
    /// Fewer than [`MIN_DIGITS`] digits.
    TooFewDigits,
    /// No character from [`SYMBOLS`].
    MissingSymbol,
}

impl fmt::Display for PasswordRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort => write!(f, "at least {MIN_LENGTH} characters"),
            Self::TooFewUppercase => write!(f, "at least {MIN_UPPERCASE} uppercase letters"),
            Self::TooFewDigits => write!(f, "at least {MIN_DIGITS} digits"),
            Self::MissingSymbol => write!(f, "at least one symbol"),
        }
    }
}

/// Rejection listing every rule the candidate failed, in rule order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordPolicyViolation {
    unmet: Vec<PasswordRule>,
}

impl PasswordPolicyViolation {
    /// Rules the candidate did not satisfy.
    pub fn unmet(&self) -> &[PasswordRule] {
        &self.unmet
    }
}

impl fmt::Display for PasswordPolicyViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "password needs ")?;
        for (index, rule) in self.unmet.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{rule}")?;
        }
        Ok(())
    }
}

impl std::error::Error for PasswordPolicyViolation {}

#[derive(Default)]
struct Counts {
    chars: usize,
    uppercase: usize,
    digits: usize,
    symbols: usize,
}

impl Counts {
    fn of(candidate: &str) -> Self {
        candidate.chars().fold(Self::default(), |mut counts, ch| {
            counts.chars += 1;
            if ch.is_ascii_uppercase() {
                counts.uppercase += 1;
            } else if ch.is_ascii_digit() {
                counts.digits += 1;
            } else if SYMBOLS.contains(ch) {
                counts.symbols += 1;
            }
            counts
        })
    }
}

/// Check `candidate` against the composition rules.
///
/// There is no maximum length.
///
/// # Examples
/// ```
/// use dashboard::domain::password_policy::{validate_password, PasswordRule};
///
/// assert!(validate_password("AB12!@").is_ok());
/// let err = validate_password("ab12!@").unwrap_err();
/// assert_eq!(err.unmet(), &[PasswordRule::TooFewUppercase]);
/// ```
pub fn validate_password(candidate: &str) -> Result<(), PasswordPolicyViolation> {
    let counts = Counts::of(candidate);
    let checks = [
        (counts.chars >= MIN_LENGTH, PasswordRule::TooShort),
        (counts.uppercase >= MIN_UPPERCASE, PasswordRule::TooFewUppercase),
        (counts.digits >= MIN_DIGITS, PasswordRule::TooFewDigits),
        (counts.symbols >= 1, PasswordRule::MissingSymbol),
    ];
    let unmet: Vec<PasswordRule> = checks
        .into_iter()
        .filter_map(|(ok, rule)| (!ok).then_some(rule))
        .collect();

    if unmet.is_empty() {
        Ok(())
    } else {
        Err(PasswordPolicyViolation { unmet })
    }
}
