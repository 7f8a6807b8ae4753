//! Domain primitives, use-cases, and ports.
//!
//! Purpose: define the strongly typed model of the dashboard (users,
//! credentials, sessions' identity, list entries, feed read models) and the
//! services that orchestrate them through the ports in [`ports`]. Nothing in
//! this module knows about HTTP, Diesel, or the filesystem.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - LoginCredentials / AuthenticatedUser: login input and session identity.
//! - RegistrationRequest: validated registration form.
//! - AccountService: login and registration use-cases.
//! - ReminderSweep: periodic calendar reminder task.

pub mod account_service;
pub mod auth;
pub mod dashboard;
pub mod error;
pub mod feeds;
pub mod lists;
pub mod password_policy;
pub mod ports;
pub mod registration;
pub mod reminders;
pub mod trace_id;
pub mod user;

pub use self::account_service::AccountService;
pub use self::auth::{
    AuthenticatedUser, DEFAULT_PROFILE_PHOTO, LoginCredentials, LoginValidationError,
};
pub use self::dashboard::{
    DashboardView, INVALID_CREDENTIALS_MESSAGE, LOGIN_REQUIRED_MESSAGE, MISSING_CREDENTIALS_MESSAGE,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::registration::{
    PhotoUpload, RegistrationField, RegistrationParts, RegistrationRequest,
    RegistrationValidationError,
};
pub use self::reminders::{ReminderDigest, ReminderSweep};
pub use self::trace_id::TraceId;
pub use self::user::{
    NewUser, PasswordHash, User, UserId, UserProfile, UserValidationError, Username,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use dashboard::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::unauthorized("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
