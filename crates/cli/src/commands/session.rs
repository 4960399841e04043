//! Session lifecycle commands.
//!
//! # Usage
//!
//! ```bash
//! # Log in until the browser closes
//! sg-cli login -e luis@example.com -n "Luis"
//!
//! # Log in and stay logged in across restarts
//! sg-cli login -e ana@example.com -n "Ana" -r admin --remember
//!
//! sg-cli whoami
//! sg-cli logout
//! ```

use storegate_core::{MemoryStore, Role, Scope, Session, SessionPolicy};
use tracing::info;

use crate::state::CliError;

/// Store a session for the given identity.
pub fn login(
    policy: &SessionPolicy<MemoryStore>,
    email: &str,
    name: &str,
    role: &str,
    remember: bool,
) -> Result<(), CliError> {
    let role: Role = role.parse()?;
    let scope = if remember {
        Scope::Persistent
    } else {
        Scope::Ephemeral
    };

    policy.establish(&Session::new(name, email, role), scope);
    info!("Logged in as {name} <{email}> ({role}, {scope})");
    Ok(())
}

pub fn logout(policy: &SessionPolicy<MemoryStore>) {
    policy.logout();
    info!("Logged out. Continue to {}", policy.pages().login);
}

pub fn whoami(policy: &SessionPolicy<MemoryStore>) {
    match policy.current_session() {
        Some(session) => info!(
            name = %session.name,
            email = %session.email,
            role = %session.role,
            "Logged in"
        ),
        None => info!("Not logged in"),
    }
}

/// Simulate closing the browser.
pub fn end_browsing(policy: &SessionPolicy<MemoryStore>) {
    policy.store().clear_scope(Scope::Ephemeral);
    info!("Ephemeral storage cleared");
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_login_scope_follows_remember() {
        let policy = SessionPolicy::new(MemoryStore::new());
        login(&policy, "a@x.com", "Ana", "admin", true).unwrap();
        end_browsing(&policy);
        assert!(policy.has_elevated_role());

        login(&policy, "l@x.com", "Luis", "usuario", false).unwrap();
        assert_eq!(policy.current_session().unwrap().name, "Luis");
        end_browsing(&policy);
        assert!(!policy.is_authenticated());
    }

    #[test]
    fn test_login_rejects_unknown_role() {
        let policy = SessionPolicy::new(MemoryStore::new());
        let err = login(&policy, "a@x.com", "Ana", "owner", false).unwrap_err();
        assert!(matches!(err, CliError::InvalidRole(_)));
        assert!(!policy.is_authenticated());
    }

    #[test]
    fn test_logout() {
        let policy = SessionPolicy::new(MemoryStore::new());
        login(&policy, "a@x.com", "Ana", "user", true).unwrap();
        logout(&policy);
        assert!(!policy.is_authenticated());
    }
}
