//! Readers for the dashboard's `SESSION_*` toggles.
//!
//! A missing or unreadable value is a startup error in release builds. Debug
//! builds log a warning and carry on with the development fallback, so the
//! login page works straight from a checkout.

use actix_web::cookie::SameSite;
use mockable::Env;
use tracing::warn;

use super::{ALLOW_EPHEMERAL_ENV, BuildMode, COOKIE_SECURE_ENV, SAMESITE_ENV, SessionConfigError};

const FLAG_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const SAMESITE_EXPECTED: &str = "Strict|Lax|None";

/// An on/off session toggle and the value debug builds assume for it.
pub(super) struct Toggle {
    name: &'static str,
    fallback: bool,
}

impl Toggle {
    /// Whether the session cookie carries the `Secure` attribute.
    pub(super) const COOKIE_SECURE: Self = Self {
        name: COOKIE_SECURE_ENV,
        fallback: true,
    };
    /// Whether a missing key file may be replaced by a per-process key.
    pub(super) const ALLOW_EPHEMERAL: Self = Self {
        name: ALLOW_EPHEMERAL_ENV,
        fallback: false,
    };

    pub(super) fn read<E: Env>(&self, env: &E, mode: BuildMode) -> Result<bool, SessionConfigError> {
        let Some(raw) = env.string(self.name) else {
            return tolerate_in_debug(
                mode,
                self.fallback,
                SessionConfigError::MissingEnv { name: self.name },
                || warn!(fallback = self.fallback, "{} not set", self.name),
            );
        };
        match flag_value(&raw) {
            Some(flag) => Ok(flag),
            None => tolerate_in_debug(
                mode,
                self.fallback,
                SessionConfigError::InvalidEnv {
                    name: self.name,
                    value: raw.clone(),
                    expected: FLAG_EXPECTED,
                },
                || warn!(value = %raw, fallback = self.fallback, "unreadable {}", self.name),
            ),
        }
    }
}

/// Use `fallback` in debug builds after running `warn`; fail otherwise.
pub(super) fn tolerate_in_debug<T>(
    mode: BuildMode,
    fallback: T,
    error: SessionConfigError,
    warn: impl FnOnce(),
) -> Result<T, SessionConfigError> {
    if mode.is_debug() {
        warn();
        Ok(fallback)
    } else {
        Err(error)
    }
}

/// Parse a `SESSION_SAMESITE` value, case-insensitively.
///
/// `None` needs a secure cookie: browsers drop insecure cross-site cookies,
/// which would silently log every user out.
pub(super) fn same_site_from(
    raw: &str,
    mode: BuildMode,
    cookie_secure: bool,
    fallback: SameSite,
) -> Result<SameSite, SessionConfigError> {
    if raw.eq_ignore_ascii_case("lax") {
        return Ok(SameSite::Lax);
    }
    if raw.eq_ignore_ascii_case("strict") {
        return Ok(SameSite::Strict);
    }
    if raw.eq_ignore_ascii_case("none") {
        if !cookie_secure {
            tolerate_in_debug(mode, (), SessionConfigError::InsecureSameSiteNone, || {
                warn!("SESSION_SAMESITE=None without a secure cookie; browsers may drop it");
            })?;
        }
        return Ok(SameSite::None);
    }
    tolerate_in_debug(
        mode,
        fallback,
        SessionConfigError::InvalidEnv {
            name: SAMESITE_ENV,
            value: raw.to_owned(),
            expected: SAMESITE_EXPECTED,
        },
        || warn!(value = %raw, "unreadable SESSION_SAMESITE; using default"),
    )
}

fn flag_value(raw: &str) -> Option<bool> {
    let raw = raw.trim();
    ["1", "true", "yes", "y"]
        .iter()
        .any(|on| raw.eq_ignore_ascii_case(on))
        .then_some(true)
        .or_else(|| {
            ["0", "false", "no", "n"]
                .iter()
                .any(|off| raw.eq_ignore_ascii_case(off))
                .then_some(false)
        })
}
