//! PostgreSQL-backed `CredentialStore` implementation using Diesel ORM.
//!
//! Username uniqueness is enforced by the `users_username_key` unique index;
//! a collision surfaces as [`CredentialStoreError::DuplicateUsername`]. Every
//! database round-trip, including pool checkout, runs under the configured
//! timeout and expiry maps to a connection error.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{CredentialStore, CredentialStoreError};
use crate::domain::{NewUser, PasswordHash, User, UserId, UserProfile, Username};

use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `CredentialStore` port.
#[derive(Clone)]
pub struct DieselCredentialStore {
    pool: DbPool,
    timeout: Duration,
}

impl DieselCredentialStore {
    /// Create a store over `pool`, bounding each call by `timeout`.
    pub fn new(pool: DbPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }
}

/// Run `operation`, turning an overrun of `limit` into a connection error.
async fn bounded<T, F>(limit: Duration, operation: F) -> Result<T, CredentialStoreError>
where
    F: Future<Output = Result<T, CredentialStoreError>>,
{
    tokio::time::timeout(limit, operation)
        .await
        .map_err(|_| {
            CredentialStoreError::connection(format!(
                "database call exceeded {}ms",
                limit.as_millis()
            ))
        })?
}

fn map_pool_error(error: PoolError) -> CredentialStoreError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            CredentialStoreError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error, username: &str) -> CredentialStoreError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            CredentialStoreError::duplicate_username(username)
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            CredentialStoreError::connection("database connection error")
        }
        DieselError::QueryBuilderError(_) => CredentialStoreError::query("database query error"),
        _ => CredentialStoreError::query("database error"),
    }
}

fn row_to_user(row: UserRow) -> Result<User, CredentialStoreError> {
    let username = Username::new(&row.username).map_err(|err| {
        CredentialStoreError::query(format!("invalid username in database: {err}"))
    })?;
    let password_hash = PasswordHash::new(row.password_hash).map_err(|err| {
        CredentialStoreError::query(format!("invalid password hash in database: {err}"))
    })?;

    Ok(User {
        id: UserId::from_uuid(row.id),
        username,
        password_hash,
        profile_photo: row.profile_photo,
        profile: UserProfile {
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone: row.phone,
        },
    })
}

#[async_trait]
impl CredentialStore for DieselCredentialStore {
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, CredentialStoreError> {
        let row = bounded(self.timeout, async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            users::table
                .filter(users::username.eq(username.as_str()))
                .select(UserRow::as_select())
                .first(&mut conn)
                .await
                .optional()
                .map_err(|err| map_diesel_error(err, username.as_str()))
        })
        .await?;

        row.map(row_to_user).transpose()
    }

    async fn insert(&self, user: NewUser) -> Result<User, CredentialStoreError> {
        let id = UserId::random();
        bounded(self.timeout, async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let row = NewUserRow {
                id: *id.as_uuid(),
                username: user.username.as_str(),
                first_name: &user.profile.first_name,
                last_name: &user.profile.last_name,
                email: &user.profile.email,
                phone: user.profile.phone.as_deref(),
                password_hash: user.password_hash.as_str(),
                profile_photo: user.profile_photo.as_deref(),
            };
            diesel::insert_into(users::table)
                .values(&row)
                .execute(&mut conn)
                .await
                .map_err(|err| map_diesel_error(err, user.username.as_str()))
        })
        .await?;

        Ok(User::from_new(id, user))
    }
}
