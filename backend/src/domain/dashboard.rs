//! Dashboard view model rendered for both anonymous and signed-in visitors.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::AuthenticatedUser;

/// Message shown when an anonymous visitor reaches a gated page.
pub const LOGIN_REQUIRED_MESSAGE: &str = "Please log in to get access.";
/// Message shown when the login form is submitted with a blank field.
pub const MISSING_CREDENTIALS_MESSAGE: &str = "Provide username and password.";
/// Message shown for any failed credential check.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid username or password.";

/// JSON rendering of the dashboard page.
///
/// `show_login` tells the client to present the login form; `login_error`
/// explains why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "ada")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "1700000000_ada.png")]
    pub profile_photo: Option<String>,
    pub show_login: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login_error: Option<String>,
}

impl DashboardView {
    /// View for a signed-in user.
    pub fn for_user(user: &AuthenticatedUser) -> Self {
        Self {
            username: Some(user.username().to_owned()),
            profile_photo: Some(user.profile_photo().to_owned()),
            show_login: false,
            login_error: None,
        }
    }

    /// Anonymous view prompting for login with the given message.
    pub fn anonymous(login_error: impl Into<String>) -> Self {
        Self {
            username: None,
            profile_photo: None,
            show_login: true,
            login_error: Some(login_error.into()),
        }
    }

    /// Anonymous view returned by the access gate.
    pub fn login_required() -> Self {
        Self::anonymous(LOGIN_REQUIRED_MESSAGE)
    }
}
