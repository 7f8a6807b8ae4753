//! Registration request validation and profile photo naming.
//!
//! Handlers collect raw form fields into [`RegistrationParts`]; the domain
//! turns them into a validated [`RegistrationRequest`] or a
//! [`RegistrationValidationError`] naming the offending field.

use std::fmt;

use zeroize::Zeroizing;

use super::password_policy::{PasswordPolicyViolation, validate_password};
use super::user::{UserProfile, Username};

/// File extensions accepted for profile photos, compared case-insensitively.
pub const ALLOWED_PHOTO_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "gif"];

/// Longest accepted values, in characters, matching the `users` columns.
pub const MAX_USERNAME_LEN: usize = 64;
pub const MAX_NAME_LEN: usize = 100;
pub const MAX_EMAIL_LEN: usize = 255;
pub const MAX_PHONE_LEN: usize = 32;
/// Leaves room for the timestamp prefix inside the 255-character column.
pub const MAX_PHOTO_NAME_LEN: usize = 200;

/// Form fields that registration validates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationField {
    FirstName,
    LastName,
    Email,
    Phone,
    Username,
    Password,
    ProfilePhoto,
}

impl RegistrationField {
    /// Wire name of the field in the registration form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Username => "username",
            Self::Password => "password",
            Self::ProfilePhoto => "profilePhoto",
        }
    }
}

/// Reasons a registration form is rejected before touching storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationValidationError {
    /// A required field was absent or blank.
    MissingField(RegistrationField),
    /// A field exceeds its stored length.
    TooLong { field: RegistrationField, max: usize },
    /// The password failed the composition policy.
    WeakPassword(PasswordPolicyViolation),
    /// The uploaded photo's name has no allow-listed extension.
    UnsupportedPhoto,
}

impl RegistrationValidationError {
    /// Field the error refers to.
    pub fn field(&self) -> RegistrationField {
        match self {
            Self::MissingField(field) | Self::TooLong { field, .. } => *field,
            Self::WeakPassword(_) => RegistrationField::Password,
            Self::UnsupportedPhoto => RegistrationField::ProfilePhoto,
        }
    }

    /// Stable machine-readable code for API clients.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingField(_) => "missing_field",
            Self::TooLong { .. } => "too_long",
            Self::WeakPassword(_) => "weak_password",
            Self::UnsupportedPhoto => "unsupported_file_type",
        }
    }
}

impl fmt::Display for RegistrationValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "{} must not be empty", field.as_str()),
            Self::TooLong { field, max } => {
                write!(f, "{} must be at most {max} characters", field.as_str())
            }
            Self::WeakPassword(violation) => write!(f, "{violation}"),
            Self::UnsupportedPhoto => write!(
                f,
                "profile photo must be one of: {}",
                ALLOWED_PHOTO_EXTENSIONS.join(", ")
            ),
        }
    }
}

impl std::error::Error for RegistrationValidationError {}

/// An uploaded profile photo with a sanitised file name.
#[derive(Clone, PartialEq, Eq)]
pub struct PhotoUpload {
    file_name: String,
    bytes: Vec<u8>,
}

impl PhotoUpload {
    /// Validate a client-supplied file name and keep the payload.
    ///
    /// Returns `Ok(None)` when the client sent a blank file name, which means
    /// no photo was chosen.
    pub fn try_new(
        client_name: &str,
        bytes: Vec<u8>,
    ) -> Result<Option<Self>, RegistrationValidationError> {
        if client_name.trim().is_empty() {
            return Ok(None);
        }
        let file_name = sanitise_file_name(client_name);
        if !has_allowed_extension(&file_name) {
            return Err(RegistrationValidationError::UnsupportedPhoto);
        }
        bounded(&file_name, RegistrationField::ProfilePhoto, MAX_PHOTO_NAME_LEN)?;
        Ok(Some(Self { file_name, bytes }))
    }

    /// Sanitised file name, without any directory components.
    pub fn file_name(&self) -> &str {
        self.file_name.as_str()
    }

    /// Raw image bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Name under which the photo is stored: `<unix-seconds>_<file-name>`.
    ///
    /// A non-zero `attempt` inserts a counter, `<unix-seconds>_<attempt>_<file-name>`,
    /// for when the plain name is already taken.
    pub fn stored_name(&self, unix_seconds: i64, attempt: u32) -> String {
        match attempt {
            0 => format!("{unix_seconds}_{}", self.file_name),
            n => format!("{unix_seconds}_{n}_{}", self.file_name),
        }
    }
}

impl fmt::Debug for PhotoUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhotoUpload")
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

fn has_allowed_extension(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .is_some_and(|ext| ALLOWED_PHOTO_EXTENSIONS.contains(&ext.as_str()))
}

/// Reduce a client-supplied file name to a safe single path component.
///
/// Directory components are discarded, whitespace becomes `_`, and anything
/// outside `[A-Za-z0-9._-]` is dropped. Leading dots and underscores are
/// stripped so the result can never name a hidden or parent entry.
pub fn sanitise_file_name(client_name: &str) -> String {
    let base = client_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();
    let cleaned: String = base
        .chars()
        .filter_map(|ch| match ch {
            c if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') => Some(c),
            c if c.is_whitespace() => Some('_'),
            _ => None,
        })
        .collect();
    cleaned.trim_start_matches(['.', '_']).to_owned()
}

/// Raw registration form fields as received by an inbound adapter.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegistrationParts<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub username: &'a str,
    pub password: &'a str,
}

/// Validated registration request.
///
/// ## Invariants
/// - Every required field is non-empty after trimming.
/// - The password satisfies the composition policy.
#[derive(Debug, Clone)]
pub struct RegistrationRequest {
    username: Username,
    password: Zeroizing<String>,
    profile: UserProfile,
    photo: Option<PhotoUpload>,
}

fn bounded(
    value: &str,
    field: RegistrationField,
    max: usize,
) -> Result<(), RegistrationValidationError> {
    if value.chars().count() > max {
        return Err(RegistrationValidationError::TooLong { field, max });
    }
    Ok(())
}

fn required(
    value: &str,
    field: RegistrationField,
    max: usize,
) -> Result<String, RegistrationValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RegistrationValidationError::MissingField(field));
    }
    bounded(trimmed, field, max)?;
    Ok(trimmed.to_owned())
}

impl RegistrationRequest {
    /// Validate raw fields in form order, then the password policy.
    ///
    /// # Examples
    /// ```
    /// use dashboard::domain::{RegistrationParts, RegistrationRequest};
    ///
    /// let parts = RegistrationParts {
    ///     first_name: "Ada",
    ///     last_name: "Lovelace",
    ///     email: "ada@example.com",
    ///     phone: "",
    ///     username: "ada",
    ///     password: "AB12!@",
    /// };
    /// let request = RegistrationRequest::try_from_parts(parts, None).unwrap();
    /// assert_eq!(request.username().as_str(), "ada");
    /// assert!(request.profile().phone.is_none());
    /// ```
    pub fn try_from_parts(
        parts: RegistrationParts<'_>,
        photo: Option<PhotoUpload>,
    ) -> Result<Self, RegistrationValidationError> {
        let first_name = required(parts.first_name, RegistrationField::FirstName, MAX_NAME_LEN)?;
        let last_name = required(parts.last_name, RegistrationField::LastName, MAX_NAME_LEN)?;
        let email = required(parts.email, RegistrationField::Email, MAX_EMAIL_LEN)?;
        let username = Username::new(parts.username)
            .map_err(|_| RegistrationValidationError::MissingField(RegistrationField::Username))?;
        bounded(username.as_str(), RegistrationField::Username, MAX_USERNAME_LEN)?;
        if parts.password.is_empty() {
            return Err(RegistrationValidationError::MissingField(
                RegistrationField::Password,
            ));
        }
        validate_password(parts.password).map_err(RegistrationValidationError::WeakPassword)?;

        let phone = parts.phone.trim();
        bounded(phone, RegistrationField::Phone, MAX_PHONE_LEN)?;
        Ok(Self {
            username,
            password: Zeroizing::new(parts.password.to_owned()),
            profile: UserProfile {
                first_name,
                last_name,
                email,
                phone: (!phone.is_empty()).then(|| phone.to_owned()),
            },
            photo,
        })
    }

    /// Requested username.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Cleartext password awaiting hashing.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Contact details.
    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Optional profile photo.
    pub fn photo(&self) -> Option<&PhotoUpload> {
        self.photo.as_ref()
    }

    /// Attach a photo validated after the text fields.
    #[must_use]
    pub fn with_photo(mut self, photo: PhotoUpload) -> Self {
        self.photo = Some(photo);
        self
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::password_policy::PasswordRule;
    use rstest::{fixture, rstest};

    #[fixture]
    fn parts() -> RegistrationParts<'static> {
        RegistrationParts {
            first_name: " Ada ",
            last_name: "Lovelace",
            email: "ada@example.com",
            phone: " 555-0100 ",
            username: "  ada ",
            password: "AB12!@",
        }
    }

    #[rstest]
    fn valid_parts_are_trimmed(parts: RegistrationParts<'static>) {
        let request = RegistrationRequest::try_from_parts(parts, None).expect("valid form");
        assert_eq!(request.username().as_str(), "ada");
        assert_eq!(request.profile().first_name, "Ada");
        assert_eq!(request.profile().phone.as_deref(), Some("555-0100"));
        assert_eq!(request.password(), "AB12!@");
        assert!(request.photo().is_none());
    }

    #[rstest]
    #[case(RegistrationField::FirstName)]
    #[case(RegistrationField::LastName)]
    #[case(RegistrationField::Email)]
    #[case(RegistrationField::Username)]
    #[case(RegistrationField::Password)]
    fn blank_required_fields_are_reported(
        parts: RegistrationParts<'static>,
        #[case] field: RegistrationField,
    ) {
        let mut parts = parts;
        match field {
            RegistrationField::FirstName => parts.first_name = "  ",
            RegistrationField::LastName => parts.last_name = "",
            RegistrationField::Email => parts.email = " ",
            RegistrationField::Username => parts.username = "",
            RegistrationField::Password => parts.password = "",
            RegistrationField::Phone | RegistrationField::ProfilePhoto => {
                unreachable!("optional field")
            }
        }
        let err = RegistrationRequest::try_from_parts(parts, None).expect_err("blank field");
        assert_eq!(err, RegistrationValidationError::MissingField(field));
        assert_eq!(err.field(), field);
        assert_eq!(err.code(), "missing_field");
    }

    #[rstest]
    fn weak_password_lists_unmet_rules(parts: RegistrationParts<'static>) {
        let mut parts = parts;
        parts.password = "Ab12!@";
        let err = RegistrationRequest::try_from_parts(parts, None).expect_err("weak password");
        match err {
            RegistrationValidationError::WeakPassword(violation) => {
                assert_eq!(violation.unmet(), &[PasswordRule::TooFewUppercase]);
            }
            other => panic!("expected weak password, got {other:?}"),
        }
    }

    #[rstest]
    #[case("me.png", "me.png")]
    #[case("../../etc/passwd.JPG", "passwd.JPG")]
    #[case("C:\\Users\\ada\\my photo.jpeg", "my_photo.jpeg")]
    #[case(".hidden.gif", "hidden.gif")]
    #[case("naïve café.png", "nave_caf.png")]
    fn file_names_are_sanitised(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(sanitise_file_name(raw), expected);
    }

    #[rstest]
    #[case("avatar.PNG")]
    #[case("avatar.jpg")]
    #[case("avatar.Jpeg")]
    #[case("avatar.gif")]
    fn allowed_extensions_are_accepted(#[case] name: &str) {
        let upload = PhotoUpload::try_new(name, vec![1, 2, 3])
            .expect("allowed extension")
            .expect("photo present");
        assert_eq!(upload.stored_name(1_700_000_000, 0), format!("1700000000_{name}"));
        assert_eq!(upload.stored_name(1_700_000_000, 2), format!("1700000000_2_{name}"));
    }

    #[rstest]
    #[case(RegistrationField::FirstName, MAX_NAME_LEN)]
    #[case(RegistrationField::LastName, MAX_NAME_LEN)]
    #[case(RegistrationField::Email, MAX_EMAIL_LEN)]
    #[case(RegistrationField::Phone, MAX_PHONE_LEN)]
    #[case(RegistrationField::Username, MAX_USERNAME_LEN)]
    fn overlong_fields_are_reported(
        parts: RegistrationParts<'static>,
        #[case] field: RegistrationField,
        #[case] max: usize,
    ) {
        let at_limit = "x".repeat(max);
        let over_limit = "x".repeat(max + 1);
        for (value, accepted) in [(at_limit.as_str(), true), (over_limit.as_str(), false)] {
            let mut parts = parts;
            match field {
                RegistrationField::FirstName => parts.first_name = value,
                RegistrationField::LastName => parts.last_name = value,
                RegistrationField::Email => parts.email = value,
                RegistrationField::Phone => parts.phone = value,
                RegistrationField::Username => parts.username = value,
                RegistrationField::Password | RegistrationField::ProfilePhoto => {
                    unreachable!("no length limit")
                }
            }
            let result = RegistrationRequest::try_from_parts(parts, None);
            if accepted {
                assert!(result.is_ok(), "{} at its limit is accepted", field.as_str());
            } else {
                let err = result.expect_err("overlong field");
                assert_eq!(err, RegistrationValidationError::TooLong { field, max });
                assert_eq!(err.code(), "too_long");
            }
        }
    }

    #[rstest]
    fn length_counts_characters_not_bytes(parts: RegistrationParts<'static>) {
        let mut parts = parts;
        let username = "é".repeat(MAX_USERNAME_LEN);
        parts.username = &username;
        let request = RegistrationRequest::try_from_parts(parts, None).expect("64 characters");
        assert_eq!(request.username().as_str().chars().count(), MAX_USERNAME_LEN);
    }

    #[rstest]
    fn overlong_photo_names_are_rejected() {
        let name = format!("{}.png", "a".repeat(MAX_PHOTO_NAME_LEN));
        let err = PhotoUpload::try_new(&name, vec![1]).expect_err("name too long");
        assert_eq!(
            err,
            RegistrationValidationError::TooLong {
                field: RegistrationField::ProfilePhoto,
                max: MAX_PHOTO_NAME_LEN,
            }
        );
    }

    #[rstest]
    #[case("avatar.svg")]
    #[case("avatar")]
    #[case("png")]
    #[case("../.png")]
    fn disallowed_extensions_are_rejected(#[case] name: &str) {
        let err = PhotoUpload::try_new(name, Vec::new()).expect_err("rejected extension");
        assert_eq!(err, RegistrationValidationError::UnsupportedPhoto);
    }

    #[rstest]
    fn blank_file_name_means_no_photo() {
        let upload = PhotoUpload::try_new("  ", vec![0]).expect("blank name is accepted");
        assert!(upload.is_none());
    }
}
