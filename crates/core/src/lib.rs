//! Storegate Core - Session-gated access policy for the storefront.
//!
//! This crate decides what a viewer may see based on the session record the
//! login page left in browser-scoped storage:
//! - whether the viewer is authenticated
//! - whether the viewer holds the admin role
//! - whether a gated page or purchase is permitted, and where to redirect if not
//!
//! # Architecture
//!
//! Storage is injected through the [`SessionStore`] trait, so the policy never
//! touches a real browser. The policy never navigates either: it returns
//! [`Decision`] values and page intents, and the caller performs the redirect.
//!
//! # Modules
//!
//! - [`types`] - Roles and logical pages
//! - [`session`] - The stored session record and its storage keys
//! - [`store`] - Storage abstraction with an in-memory implementation
//! - [`config`] - Page path configuration
//! - [`policy`] - The session policy evaluator
//! - [`nav`] - Data-only navigation bar model

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod nav;
pub mod policy;
pub mod session;
pub mod store;
pub mod types;

pub use config::{ConfigError, PageMap};
pub use nav::{NavView, UserMenu};
pub use policy::{Decision, GatedAction, Notice, SessionPolicy};
pub use session::{DecodeError, Scope, Session, keys};
pub use store::{MemoryStore, SessionStore, StoreSnapshot};
pub use types::*;
