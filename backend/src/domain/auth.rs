//! Login credential types.
//!
//! Handlers parse raw payloads into [`LoginCredentials`] before anything
//! touches a port, so authentication code only ever sees a validated
//! username and a non-empty password. The password is wrapped in
//! [`Zeroizing`] and omitted from `Debug` output to keep it out of logs.

use std::fmt;

use zeroize::Zeroizing;

use super::user::Username;

/// Why a login payload failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// The username was blank once trimmed.
    EmptyUsername,
    /// The password was empty.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::EmptyUsername => "login username must not be blank",
            Self::EmptyPassword => "login password must not be empty",
        };
        f.write_str(reason)
    }
}

impl std::error::Error for LoginValidationError {}

/// A validated username/password pair.
///
/// The username is trimmed before validation; the password keeps its
/// whitespace untouched so credential comparison matches what the user
/// actually typed.
///
/// # Examples
/// ```
/// use tribune_backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" admin ", "password").unwrap();
/// assert_eq!(creds.username().as_ref(), "admin");
/// assert_eq!(creds.password(), "password");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: Username,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Validate raw payload strings into credentials.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let username =
            Username::new(username.trim()).map_err(|_| LoginValidationError::EmptyUsername)?;
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            username,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// The trimmed username to look the account up by.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// The password exactly as supplied.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
