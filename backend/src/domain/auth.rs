//! Authentication primitives: login credentials and the authenticated
//! identity carried by a session.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

/// Photo reference used when a user never uploaded a profile photo.
pub const DEFAULT_PROFILE_PHOTO: &str = "default.png";

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `username` is trimmed and must not be empty after trimming.
/// - `password` must be non-empty but keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use dashboard::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" ada ", "AB12!@").unwrap();
/// assert_eq!(creds.username(), "ada");
/// assert_eq!(creds.password(), "AB12!@");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username string suitable for user lookups.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Identity established by a successful login and stored in the session.
///
/// The photo reference is copied at login time and is not refreshed while
/// the session lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedUser {
    username: String,
    profile_photo: String,
}

impl AuthenticatedUser {
    /// Build an identity, substituting the default avatar when no photo is set.
    pub fn new(username: impl Into<String>, profile_photo: Option<String>) -> Self {
        Self {
            username: username.into(),
            profile_photo: profile_photo.unwrap_or_else(|| DEFAULT_PROFILE_PHOTO.to_owned()),
        }
    }

    /// Authenticated username.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Stored photo file name, or [`DEFAULT_PROFILE_PHOTO`].
    pub fn profile_photo(&self) -> &str {
        self.profile_photo.as_str()
    }
}
