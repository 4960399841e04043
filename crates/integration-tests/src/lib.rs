//! Integration tests for Storegate.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p storegate-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `access_policy` - Access table and role checks across scopes
//! - `purchase_flow` - Pending redirect through login and page loads
//! - `concurrency` - Shared store under several threads
//!
//! This crate holds shared fixtures for those tests.

use storegate_core::{MemoryStore, Role, Scope, Session, SessionPolicy, SessionStore, keys};

/// Policy over an empty in-memory store.
#[must_use]
pub fn anonymous_policy() -> SessionPolicy<MemoryStore> {
    SessionPolicy::new(MemoryStore::new())
}

/// Policy with a session already stored in `scope`.
#[must_use]
pub fn policy_with(role: Role, scope: Scope) -> SessionPolicy<MemoryStore> {
    let policy = anonymous_policy();
    policy.establish(&sample_session(role), scope);
    policy
}

/// The session the examples use for `role`.
#[must_use]
pub fn sample_session(role: Role) -> Session {
    match role {
        Role::Admin => Session::new("Ana", "a@x.com", Role::Admin),
        Role::User => Session::new("Luis", "l@x.com", Role::User),
    }
}

/// Write a raw value under the session key, bypassing encoding.
pub fn store_raw_session(policy: &SessionPolicy<MemoryStore>, scope: Scope, raw: &str) {
    policy.store().set(scope, keys::SESSION, raw);
}

/// Current raw pending redirect, without consuming it.
#[must_use]
pub fn peek_pending(policy: &SessionPolicy<MemoryStore>) -> Option<String> {
    policy.store().get(Scope::Ephemeral, keys::PENDING_REDIRECT)
}
