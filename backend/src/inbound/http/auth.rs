//! Login, registration and logout handlers.
//!
//! ```text
//! POST /login   username=ada&password=AB12!@
//! POST /signup  multipart/form-data
//! GET  /logout
//! ```
//!
//! Successful login and registration redirect to `/dashboard`. Login
//! failures answer with the anonymous dashboard view so the client can show
//! the login form again; registration failures use the error envelope.

use actix_multipart::form::MultipartForm;
use actix_multipart::form::bytes::Bytes;
use actix_multipart::form::text::Text;
use actix_web::error::InternalError;
use actix_web::http::StatusCode;
use actix_web::http::header::LOCATION;
use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use tracing::debug;
use utoipa::ToSchema;

use super::state::HttpState;
use super::validation::registration_error;
use crate::domain::{
    ApiResult, DashboardView, Error, ErrorCode, INVALID_CREDENTIALS_MESSAGE, LoginCredentials,
    MISSING_CREDENTIALS_MESSAGE, PhotoUpload, RegistrationParts, RegistrationRequest,
};
use crate::inbound::http::session::SessionContext;

pub(crate) const DASHBOARD_PATH: &str = "/dashboard";

pub(crate) fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((LOCATION, location))
        .finish()
}

fn anonymous_view(status: StatusCode, message: &str) -> HttpResponse {
    HttpResponse::build(status).json(DashboardView::anonymous(message))
}

/// Login form body for `POST /login`.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Form settings for `POST /login`: an unreadable body gets the same
/// anonymous view as blank credentials.
pub fn login_form_config() -> web::FormConfig {
    web::FormConfig::default().error_handler(|err, _req| {
        debug!(error = %err, "rejecting unreadable login form");
        let response = HttpResponse::BadRequest()
            .json(DashboardView::anonymous(MISSING_CREDENTIALS_MESSAGE));
        InternalError::from_response(err, response).into()
    })
}

/// Authenticate and establish a session.
#[utoipa::path(
    post,
    path = "/login",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Signed in; redirect to the dashboard",
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Blank username or password", body = DashboardView),
        (status = 401, description = "Invalid credentials", body = DashboardView),
        (status = 503, description = "Credential store unavailable", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<LoginForm>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner();
    let Ok(credentials) = LoginCredentials::try_from_parts(&form.username, &form.password) else {
        return Ok(anonymous_view(
            StatusCode::BAD_REQUEST,
            MISSING_CREDENTIALS_MESSAGE,
        ));
    };

    match state.login.authenticate(&credentials).await {
        Ok(user) => {
            session.establish(&user)?;
            Ok(see_other(DASHBOARD_PATH))
        }
        Err(err) if err.code() == ErrorCode::Unauthorized => Ok(anonymous_view(
            StatusCode::UNAUTHORIZED,
            INVALID_CREDENTIALS_MESSAGE,
        )),
        Err(err) => Err(err),
    }
}

/// Registration form for `POST /signup`.
#[derive(Debug, MultipartForm)]
pub struct SignupForm {
    #[multipart(rename = "firstName")]
    pub first_name: Option<Text<String>>,
    #[multipart(rename = "lastName")]
    pub last_name: Option<Text<String>>,
    pub email: Option<Text<String>>,
    pub phone: Option<Text<String>>,
    pub username: Option<Text<String>>,
    pub password: Option<Text<String>>,
    #[multipart(rename = "profilePhoto", limit = "5MiB")]
    pub profile_photo: Option<Bytes>,
}

/// OpenAPI rendering of [`SignupForm`].
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
#[expect(dead_code, reason = "documentation-only schema")]
struct SignupFormSchema {
    first_name: String,
    last_name: String,
    email: String,
    phone: Option<String>,
    username: String,
    password: String,
    #[schema(value_type = Option<String>, format = Binary)]
    profile_photo: Option<Vec<u8>>,
}

fn text(field: Option<&Text<String>>) -> &str {
    field.map_or("", |value| value.as_str())
}

fn photo_from(upload: Option<Bytes>) -> Result<Option<PhotoUpload>, Error> {
    let Some(upload) = upload else {
        return Ok(None);
    };
    let name = upload.file_name.unwrap_or_default();
    PhotoUpload::try_new(&name, upload.data.to_vec()).map_err(|err| registration_error(&err))
}

/// Register a new account. Does not sign the user in.
#[utoipa::path(
    post,
    path = "/signup",
    request_body(content = SignupFormSchema, content_type = "multipart/form-data"),
    responses(
        (status = 303, description = "Registered; redirect to the dashboard"),
        (status = 400, description = "Missing field, weak password or unsupported photo", body = Error),
        (status = 409, description = "Username already taken", body = Error),
        (status = 503, description = "Credential store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "signup",
    security([])
)]
#[post("/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    MultipartForm(form): MultipartForm<SignupForm>,
) -> ApiResult<HttpResponse> {
    let parts = RegistrationParts {
        first_name: text(form.first_name.as_ref()),
        last_name: text(form.last_name.as_ref()),
        email: text(form.email.as_ref()),
        phone: text(form.phone.as_ref()),
        username: text(form.username.as_ref()),
        password: text(form.password.as_ref()),
    };
    let request = RegistrationRequest::try_from_parts(parts, None)
        .map_err(|err| registration_error(&err))?;
    let photo = photo_from(form.profile_photo)?;
    let request = match photo {
        Some(photo) => request.with_photo(photo),
        None => request,
    };

    state.registration.register(request).await?;
    Ok(see_other(DASHBOARD_PATH))
}

/// End the session.
#[utoipa::path(
    get,
    path = "/logout",
    responses((status = 303, description = "Signed out; redirect to the dashboard")),
    tags = ["auth"],
    operation_id = "logout",
    security([])
)]
#[get("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    see_other(DASHBOARD_PATH)
}
