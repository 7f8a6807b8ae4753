//! Driving port for the registration use-case.

use async_trait::async_trait;

use crate::domain::{Error, RegistrationRequest, Username};

/// Domain use-case port for creating accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Store the photo (if any), hash the password, and insert the user.
    ///
    /// Returns the registered username. Does not sign the user in.
    async fn register(&self, request: RegistrationRequest) -> Result<Username, Error>;
}
