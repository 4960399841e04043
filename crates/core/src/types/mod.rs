//! Core types for Storegate.
//!
//! This module provides type-safe wrappers for viewer roles and storefront pages.

pub mod page;
pub mod role;

pub use page::{Page, PageError};
pub use role::{Role, RoleError};
