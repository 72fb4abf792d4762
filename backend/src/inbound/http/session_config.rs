//! Environment-driven session settings.
//!
//! Cookie security, `SameSite` policy, and the signing key all arrive through
//! `SESSION_*` variables. Parsing lives here so the rules stay testable
//! without booting a server: debug builds substitute defaults with a warning,
//! release builds fail closed on anything missing or invalid.

use actix_web::cookie::{Key, SameSite};
use mockable::Env;
use sha2::{Digest, Sha256};
use std::path::PathBuf;
use tracing::warn;
use zeroize::Zeroize;

const SESSION_KEY_DEFAULT_PATH: &str = "/var/run/secrets/session_key";
const SESSION_KEY_MIN_LEN: usize = 64;
const COOKIE_SECURE_ENV: &str = "SESSION_COOKIE_SECURE";
const SAMESITE_ENV: &str = "SESSION_SAMESITE";
const ALLOW_EPHEMERAL_ENV: &str = "SESSION_ALLOW_EPHEMERAL";
const KEY_FILE_ENV: &str = "SESSION_KEY_FILE";
const FLAG_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const SAMESITE_EXPECTED: &str = "Strict|Lax|None";

/// Length of the key fingerprint in bytes before hex encoding.
const FINGERPRINT_BYTES: usize = 8;

/// Strictness the session toggles are validated under.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Substitute defaults for missing or invalid toggles, with a warning.
    Debug,
    /// Demand explicit, valid toggles and a persistent signing key.
    Release,
}

impl BuildMode {
    /// Pick the mode that matches how this binary was compiled.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tribune_backend::inbound::http::session_config::BuildMode;
    ///
    /// let expected = if cfg!(debug_assertions) {
    ///     BuildMode::Debug
    /// } else {
    ///     BuildMode::Release
    /// };
    /// assert_eq!(BuildMode::from_debug_assertions(), expected);
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Validated cookie-session settings, ready to hand to the middleware.
pub struct SessionSettings {
    /// Key the session cookies are signed with.
    pub key: Key,
    /// Whether cookies carry the `Secure` attribute.
    pub cookie_secure: bool,
    /// `SameSite` policy applied to session cookies.
    pub same_site: SameSite,
}

/// Ways session configuration can be rejected.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    /// A toggle release builds require was never set.
    #[error("required environment variable {name} is not set")]
    MissingEnv { name: &'static str },
    /// A toggle was set to something unparseable.
    #[error("{name}='{value}' is invalid; expected one of {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    /// The signing key file could not be read.
    #[error("could not read session key file {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The signing key file holds too little material for release use.
    #[error("session key file {path} holds {length} bytes; release builds need at least {min_len}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    /// `SameSite=None` cookies without `Secure` are rejected by browsers.
    #[error("SESSION_SAMESITE=None is only allowed with SESSION_COOKIE_SECURE=1")]
    InsecureSameSiteNone,
    /// Throwaway signing keys are a debug-only convenience.
    #[error("SESSION_ALLOW_EPHEMERAL must be disabled in release builds")]
    EphemeralNotAllowed,
}

/// Read and validate the full set of session toggles.
///
/// # Examples
///
/// ```rust
/// use std::collections::HashMap;
///
/// use mockable::MockEnv;
/// use tribune_backend::inbound::http::session_config::{
///     BuildMode, session_settings_from_env,
/// };
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let key_path = std::env::temp_dir().join("tribune-session-key-doc");
/// std::fs::write(&key_path, [b'k'; 64])?;
///
/// let vars = HashMap::from([
///     ("SESSION_KEY_FILE".to_owned(), key_path.display().to_string()),
///     ("SESSION_COOKIE_SECURE".to_owned(), "1".to_owned()),
///     ("SESSION_SAMESITE".to_owned(), "Lax".to_owned()),
///     ("SESSION_ALLOW_EPHEMERAL".to_owned(), "0".to_owned()),
/// ]);
/// let mut env = MockEnv::new();
/// env.expect_string().returning(move |name| vars.get(name).cloned());
///
/// let settings = session_settings_from_env(&env, BuildMode::Release)?;
/// assert_eq!(settings.same_site, actix_web::cookie::SameSite::Lax);
///
/// std::fs::remove_file(&key_path)?;
/// # Ok(())
/// # }
/// ```
pub fn session_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let cookie_secure = toggle_from_env(env, mode, COOKIE_SECURE_ENV, FLAG_EXPECTED, true, |raw| {
        parse_flag(raw)
    })?;

    let default_same_site = if mode.is_debug() {
        SameSite::Lax
    } else {
        SameSite::Strict
    };
    let same_site = toggle_from_env(
        env,
        mode,
        SAMESITE_ENV,
        SAMESITE_EXPECTED,
        default_same_site,
        parse_same_site,
    )?;
    if same_site == SameSite::None && !cookie_secure {
        if mode.is_debug() {
            warn!(
                "SESSION_SAMESITE=None with SESSION_COOKIE_SECURE=0; browsers may reject \
                 third-party cookies"
            );
        } else {
            return Err(SessionConfigError::InsecureSameSiteNone);
        }
    }

    let allow_ephemeral =
        toggle_from_env(env, mode, ALLOW_EPHEMERAL_ENV, FLAG_EXPECTED, false, |raw| {
            parse_flag(raw)
        })?;
    if allow_ephemeral && !mode.is_debug() {
        return Err(SessionConfigError::EphemeralNotAllowed);
    }

    let key = load_signing_key(env, mode, allow_ephemeral)?;

    Ok(SessionSettings {
        key,
        cookie_secure,
        same_site,
    })
}

/// Shared debug-lenient / release-strict parse of one environment toggle.
fn toggle_from_env<E: Env, T>(
    env: &E,
    mode: BuildMode,
    name: &'static str,
    expected: &'static str,
    debug_default: T,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<T, SessionConfigError> {
    match env.string(name) {
        None if mode.is_debug() => {
            warn!(toggle = name, "session toggle not set; using debug default");
            Ok(debug_default)
        }
        None => Err(SessionConfigError::MissingEnv { name }),
        Some(value) => match parse(&value) {
            Some(parsed) => Ok(parsed),
            None if mode.is_debug() => {
                warn!(
                    toggle = name,
                    value = %value,
                    "invalid session toggle; using debug default"
                );
                Ok(debug_default)
            }
            None => Err(SessionConfigError::InvalidEnv {
                name,
                value,
                expected,
            }),
        },
    }
}

fn load_signing_key<E: Env>(
    env: &E,
    mode: BuildMode,
    allow_ephemeral: bool,
) -> Result<Key, SessionConfigError> {
    let path = PathBuf::from(
        env.string(KEY_FILE_ENV)
            .unwrap_or_else(|| SESSION_KEY_DEFAULT_PATH.to_string()),
    );

    let mut bytes = match std::fs::read(&path) {
        Ok(bytes) => bytes,
        Err(source) if mode.is_debug() || allow_ephemeral => {
            warn!(
                path = %path.display(),
                error = %source,
                "session key unreadable; generating a throwaway key (dev only)"
            );
            return Ok(Key::generate());
        }
        Err(source) => return Err(SessionConfigError::KeyRead { path, source }),
    };

    if mode == BuildMode::Release && bytes.len() < SESSION_KEY_MIN_LEN {
        let length = bytes.len();
        bytes.zeroize();
        return Err(SessionConfigError::KeyTooShort {
            path,
            length,
            min_len: SESSION_KEY_MIN_LEN,
        });
    }

    let key = Key::derive_from(&bytes);
    bytes.zeroize();
    Ok(key)
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}

fn parse_same_site(raw: &str) -> Option<SameSite> {
    match raw.to_ascii_lowercase().as_str() {
        "lax" => Some(SameSite::Lax),
        "strict" => Some(SameSite::Strict),
        "none" => Some(SameSite::None),
        _ => None,
    }
}

/// Truncated SHA-256 fingerprint of the key's signing material.
///
/// The first 8 bytes of the digest, hex encoded: enough for operators to
/// tell keys apart in logs without exposing key material.
///
/// # Examples
///
/// ```rust
/// use actix_web::cookie::Key;
/// use tribune_backend::inbound::http::session_config::key_fingerprint;
///
/// let fp = key_fingerprint(&Key::generate());
/// assert_eq!(fp.len(), 16);
/// assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
/// ```
#[must_use]
pub fn key_fingerprint(key: &Key) -> String {
    let mut hasher = Sha256::new();
    hasher.update(key.signing());
    let digest = hasher.finalize();
    hex::encode(&digest[..FINGERPRINT_BYTES])
}
