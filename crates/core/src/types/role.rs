//! Viewer roles.

use core::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Error returned when parsing a [`Role`] from user input.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid role: {0} (expected `user` or `admin`)")]
pub struct RoleError(pub String);

/// Role carried by an authenticated session.
///
/// A guest has no session at all, so there is no `Guest` variant.
///
/// ## Decoding
///
/// Stored records are decoded leniently: only the exact string `admin` grants
/// [`Role::Admin`]. Every other value (`user`, `usuario`, anything unknown)
/// decodes to [`Role::User`]. [`str::parse`] is strict and is meant for input
/// typed by an operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Role {
    /// Ordinary shopper.
    #[default]
    User,
    /// Elevated role with access to inventory management.
    Admin,
}

impl Role {
    /// Returns the stored representation of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }

    /// Returns `true` for the elevated role.
    #[must_use]
    pub const fn is_elevated(self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Label shown in the user menu.
    #[must_use]
    pub const fn display_label(self) -> &'static str {
        match self {
            Self::User => "Usuario",
            Self::Admin => "Administrador",
        }
    }

    /// Maps a stored role string to a role, never failing.
    #[must_use]
    pub fn from_stored(s: &str) -> Self {
        if s == "admin" { Self::Admin } else { Self::User }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" | "usuario" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            _ => Err(RoleError(s.to_owned())),
        }
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from_stored(&raw))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_only_exact_admin_is_elevated() {
        assert_eq!(Role::from_stored("admin"), Role::Admin);
        assert_eq!(Role::from_stored("Admin"), Role::User);
        assert_eq!(Role::from_stored("usuario"), Role::User);
        assert_eq!(Role::from_stored("root"), Role::User);
        assert_eq!(Role::from_stored(""), Role::User);
    }

    #[test]
    fn test_parse_is_strict() {
        assert_eq!("user".parse::<Role>().unwrap(), Role::User);
        assert_eq!("usuario".parse::<Role>().unwrap(), Role::User);
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!(
            "superuser".parse::<Role>(),
            Err(RoleError("superuser".to_owned()))
        );
    }

    #[test]
    fn test_deserialize_lenient() {
        let role: Role = serde_json::from_str("\"usuario\"").unwrap();
        assert_eq!(role, Role::User);
        let role: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(role, Role::Admin);
    }

    #[test]
    fn test_deserialize_rejects_non_string() {
        assert!(serde_json::from_str::<Role>("1").is_err());
        assert!(serde_json::from_str::<Role>("null").is_err());
    }

    #[test]
    fn test_serialize() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
    }

    #[test]
    fn test_labels() {
        assert_eq!(Role::Admin.display_label(), "Administrador");
        assert_eq!(Role::User.display_label(), "Usuario");
        assert_eq!(Role::Admin.to_string(), "admin");
    }
}
