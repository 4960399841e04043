//! Command implementations.
//!
//! - `session` - login, logout, whoami, end-browsing
//! - `access` - gated action checks, page visits, navigation model

pub mod access;
pub mod session;
