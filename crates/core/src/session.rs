//! Session record stored by the login page.
//!
//! The record is a JSON object with `name`, `email` and `role`, kept under
//! [`keys::SESSION`] in one of the two [`Scope`]s.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::types::Role;

/// Storage keys shared with the storefront pages.
pub mod keys {
    /// Key for the logged-in viewer's session record.
    pub const SESSION: &str = "userSession";

    /// Key for the page to open once the viewer has logged in.
    pub const PENDING_REDIRECT: &str = "redirectAfterLogin";
}

/// Browser storage scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// Survives browser restarts ("remember me").
    Persistent,
    /// Cleared when the browsing context ends.
    Ephemeral,
}

impl Scope {
    /// Both scopes in lookup order. Persistent wins when both hold a record.
    pub const ALL: [Self; 2] = [Self::Persistent, Self::Ephemeral];

    /// Returns the other scope.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Persistent => Self::Ephemeral,
            Self::Ephemeral => Self::Persistent,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Persistent => f.write_str("persistent"),
            Self::Ephemeral => f.write_str("ephemeral"),
        }
    }
}

/// A stored session record could not be decoded.
#[derive(thiserror::Error, Debug)]
pub enum DecodeError {
    /// The raw value is not a JSON object with the expected fields.
    #[error("malformed session record: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Identity of the logged-in viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Display name.
    pub name: String,
    /// Email address, as entered at login.
    pub email: String,
    /// Viewer role. A record without one is an ordinary user.
    #[serde(default)]
    pub role: Role,
}

impl Session {
    /// Create a session record.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            role,
        }
    }

    /// Returns `true` if the session carries the admin role.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.role.is_elevated()
    }

    /// Encode the record the way it is kept in storage.
    #[must_use]
    pub fn encode(&self) -> String {
        serde_json::json!({
            "name": self.name,
            "email": self.email,
            "role": self.role.as_str(),
        })
        .to_string()
    }

    /// Decode a stored record.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::Malformed`] if the value is not a JSON object with
    /// string `name` and `email` fields (and a string `role`, if present).
    pub fn decode(raw: &str) -> Result<Self, DecodeError> {
        Ok(serde_json::from_str(raw)?)
    }
}
