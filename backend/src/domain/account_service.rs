//! Account use-cases: credential checks at login and user creation at
//! registration.
//!
//! [`AccountService`] implements both the [`LoginService`] and
//! [`RegistrationService`] driving ports on top of the credential store,
//! password hasher, and photo store driven ports.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::OnceCell;
use tracing::{error, info, warn};

use super::dashboard::INVALID_CREDENTIALS_MESSAGE;
use super::ports::{
    CredentialStore, CredentialStoreError, LoginService, PasswordHasher, PasswordHasherError,
    PhotoStore, RegistrationService,
};
use super::{
    AuthenticatedUser, Error, LoginCredentials, NewUser, PasswordHash, RegistrationRequest,
    Username,
};

/// Password hashed once to give unknown-username logins a real hash to
/// verify against.
const DUMMY_PASSWORD: &str = "dashboard-timing-equaliser";

/// Login and registration backed by driven ports.
pub struct AccountService {
    store: Arc<dyn CredentialStore>,
    hasher: Arc<dyn PasswordHasher>,
    photos: Arc<dyn PhotoStore>,
    dummy_hash: OnceCell<PasswordHash>,
}

impl AccountService {
    /// Create a service over the given adapters.
    pub fn new(
        store: Arc<dyn CredentialStore>,
        hasher: Arc<dyn PasswordHasher>,
        photos: Arc<dyn PhotoStore>,
    ) -> Self {
        Self {
            store,
            hasher,
            photos,
            dummy_hash: OnceCell::new(),
        }
    }

    /// Spend one verification on a throwaway hash so an unknown username
    /// costs about as much as a wrong password.
    async fn equalise_timing(&self, password: &str) {
        let dummy = self
            .dummy_hash
            .get_or_try_init(|| self.hasher.hash(DUMMY_PASSWORD))
            .await;
        match dummy {
            Ok(hash) => {
                if let Err(err) = self.hasher.verify(password, hash).await {
                    warn!(error = %err, "dummy password verification failed");
                }
            }
            Err(err) => warn!(error = %err, "failed to prepare dummy password hash"),
        }
    }

    async fn create_user(
        &self,
        request: &RegistrationRequest,
        profile_photo: Option<String>,
    ) -> Result<Username, Error> {
        let password_hash = self
            .hasher
            .hash(request.password())
            .await
            .map_err(map_hasher_error)?;
        let user = self
            .store
            .insert(NewUser {
                username: request.username().clone(),
                password_hash,
                profile_photo,
                profile: request.profile().clone(),
            })
            .await
            .map_err(map_store_error)?;
        Ok(user.username)
    }
}

fn invalid_credentials() -> Error {
    Error::unauthorized(INVALID_CREDENTIALS_MESSAGE)
}

fn map_store_error(err: CredentialStoreError) -> Error {
    match err {
        CredentialStoreError::DuplicateUsername { .. } => {
            Error::conflict("username is already taken").with_details(json!({
                "field": "username",
                "code": "duplicate_username",
            }))
        }
        CredentialStoreError::Connection { message } | CredentialStoreError::Query { message } => {
            error!(error = %message, "credential store failure");
            Error::service_unavailable("credential store unavailable")
        }
    }
}

fn map_hasher_error(err: PasswordHasherError) -> Error {
    error!(error = %err, "password hasher failure");
    Error::internal("password hashing failed")
}

#[async_trait]
impl LoginService for AccountService {
    async fn authenticate(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<AuthenticatedUser, Error> {
        let username = Username::new(credentials.username()).map_err(|_| invalid_credentials())?;
        let Some(user) = self
            .store
            .find_by_username(&username)
            .await
            .map_err(map_store_error)?
        else {
            self.equalise_timing(credentials.password()).await;
            return Err(invalid_credentials());
        };

        match self
            .hasher
            .verify(credentials.password(), &user.password_hash)
            .await
        {
            Ok(true) => {
                info!(username = %user.username, "user logged in");
                Ok(AuthenticatedUser::new(
                    String::from(user.username),
                    user.profile_photo,
                ))
            }
            Ok(false) => Err(invalid_credentials()),
            Err(PasswordHasherError::MalformedHash { message }) => {
                error!(error = %message, "stored password hash is unusable");
                Err(invalid_credentials())
            }
            Err(err) => Err(map_hasher_error(err)),
        }
    }
}

#[async_trait]
impl RegistrationService for AccountService {
    async fn register(&self, request: RegistrationRequest) -> Result<Username, Error> {
        let stored_photo = match request.photo() {
            Some(photo) => Some(self.photos.save(photo).await.map_err(|err| {
                error!(error = %err, "failed to store profile photo");
                Error::internal("failed to store profile photo")
            })?),
            None => None,
        };

        let result = self.create_user(&request, stored_photo.clone()).await;
        match (&result, stored_photo) {
            (Ok(username), _) => info!(%username, "user registered"),
            (Err(_), Some(name)) => {
                if let Err(err) = self.photos.remove(&name).await {
                    warn!(error = %err, photo = %name, "failed to remove orphaned profile photo");
                }
            }
            (Err(_), None) => {}
        }
        result
    }
}
