//! Port abstraction for the credential store and its errors.
//!
//! Stores enforce username uniqueness atomically: a second insert with the
//! same username fails with [`CredentialStoreError::DuplicateUsername`] and
//! leaves the first record untouched.

use async_trait::async_trait;

use crate::domain::{NewUser, User, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by credential store adapters.
    pub enum CredentialStoreError {
        /// Store connection could not be established or timed out.
        Connection { message: String } => "credential store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "credential store query failed: {message}",
        /// A user with this username already exists.
        DuplicateUsername { username: String } => "username already registered: {username}",
    }
}

/// Durable record of registered users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Look up a user by exact username. Absence is not an error.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, CredentialStoreError>;

    /// Insert a new user, failing rather than overwriting an existing one.
    async fn insert(&self, user: NewUser) -> Result<User, CredentialStoreError>;
}
