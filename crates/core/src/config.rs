//! Page path configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `STOREGATE_LOGIN_PAGE` - Login form path (default: login.html)
//! - `STOREGATE_HOME_PAGE` - Landing page path (default: index.html)
//! - `STOREGATE_PURCHASE_PAGE` - Checkout path (default: pago.html)
//! - `STOREGATE_INVENTORY_PAGE` - Inventory management path (default: inventario.html)

use thiserror::Error;

use crate::types::Page;

const LOGIN_PAGE_VAR: &str = "STOREGATE_LOGIN_PAGE";
const HOME_PAGE_VAR: &str = "STOREGATE_HOME_PAGE";
const PURCHASE_PAGE_VAR: &str = "STOREGATE_PURCHASE_PAGE";
const INVENTORY_PAGE_VAR: &str = "STOREGATE_INVENTORY_PAGE";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Page {0} has an empty path")]
    EmptyPath(Page),
    #[error("Pages {0} and {1} share the path {2:?}")]
    DuplicatePath(Page, Page, String),
}

/// Paths served for each logical [`Page`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMap {
    /// Login form
    pub login: String,
    /// Storefront landing page
    pub home: String,
    /// Checkout page
    pub purchase: String,
    /// Inventory management page
    pub inventory: String,
}

impl Default for PageMap {
    fn default() -> Self {
        Self {
            login: "login.html".to_owned(),
            home: "index.html".to_owned(),
            purchase: "pago.html".to_owned(),
            inventory: "inventario.html".to_owned(),
        }
    }
}

impl PageMap {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a path is empty or two pages share a path.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a path is empty or two pages share a path.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let read = |key: &str, default: String| -> Result<String, ConfigError> {
            match lookup(key) {
                None => Ok(default),
                Some(value) if value.trim().is_empty() => Err(ConfigError::InvalidEnvVar(
                    key.to_owned(),
                    "path cannot be empty".to_owned(),
                )),
                Some(value) => Ok(value.trim().to_owned()),
            }
        };

        let pages = Self {
            login: read(LOGIN_PAGE_VAR, defaults.login)?,
            home: read(HOME_PAGE_VAR, defaults.home)?,
            purchase: read(PURCHASE_PAGE_VAR, defaults.purchase)?,
            inventory: read(INVENTORY_PAGE_VAR, defaults.inventory)?,
        };
        pages.validate()?;
        Ok(pages)
    }

    /// Check that every page has its own non-empty path.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::EmptyPath` for the first page with a blank path,
    /// or `ConfigError::DuplicatePath` for the first pair of pages that share
    /// a path.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(page) = Page::ALL
            .into_iter()
            .find(|page| self.path(*page).trim().is_empty())
        {
            return Err(ConfigError::EmptyPath(page));
        }
        for (i, a) in Page::ALL.iter().enumerate() {
            for b in Page::ALL.iter().skip(i + 1) {
                if self.path(*a) == self.path(*b) {
                    return Err(ConfigError::DuplicatePath(
                        *a,
                        *b,
                        self.path(*a).to_owned(),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Returns the path served for a page.
    #[must_use]
    pub fn path(&self, page: Page) -> &str {
        match page {
            Page::Login => &self.login,
            Page::Home => &self.home,
            Page::Purchase => &self.purchase,
            Page::Inventory => &self.inventory,
        }
    }

    /// Returns `true` if `location` is on `page`.
    ///
    /// Matching is by substring, so `/shop/login.html?next=1` is on the login page.
    #[must_use]
    pub fn is_on(&self, location: &str, page: Page) -> bool {
        location.contains(self.path(page))
    }

    /// Returns the page `location` is on, if any.
    ///
    /// When several paths match, the longest one wins.
    #[must_use]
    pub fn locate(&self, location: &str) -> Option<Page> {
        Page::ALL
            .into_iter()
            .filter(|page| self.is_on(location, *page))
            .max_by_key(|page| self.path(*page).len())
    }

    /// Returns the page served at exactly `path`.
    #[must_use]
    pub fn page_for_path(&self, path: &str) -> Option<Page> {
        Page::ALL.into_iter().find(|page| self.path(*page) == path)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let pages = PageMap::from_lookup(lookup(&[])).unwrap();
        assert_eq!(pages, PageMap::default());
        assert_eq!(pages.path(Page::Purchase), "pago.html");
    }

    #[test]
    fn test_overrides() {
        let pages = PageMap::from_lookup(lookup(&[
            ("STOREGATE_LOGIN_PAGE", " /auth/login "),
            ("STOREGATE_INVENTORY_PAGE", "/admin/stock"),
        ]))
        .unwrap();
        assert_eq!(pages.login, "/auth/login");
        assert_eq!(pages.inventory, "/admin/stock");
        assert_eq!(pages.home, "index.html");
    }

    #[test]
    fn test_empty_path_rejected() {
        let err = PageMap::from_lookup(lookup(&[("STOREGATE_HOME_PAGE", "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "STOREGATE_HOME_PAGE"));
    }

    #[test]
    fn test_duplicate_path_rejected() {
        let err =
            PageMap::from_lookup(lookup(&[("STOREGATE_PURCHASE_PAGE", "index.html")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::DuplicatePath(Page::Home, Page::Purchase, "index.html".to_owned())
        );
    }

    #[test]
    fn test_validate_rejects_hand_built_empty_path() {
        let pages = PageMap {
            login: String::new(),
            ..PageMap::default()
        };
        assert_eq!(pages.validate(), Err(ConfigError::EmptyPath(Page::Login)));
    }

    #[test]
    fn test_locate() {
        let pages = PageMap::default();
        assert_eq!(pages.locate("/tienda/login.html"), Some(Page::Login));
        assert_eq!(pages.locate("/tienda/inventario.html#top"), Some(Page::Inventory));
        assert_eq!(pages.locate("/tienda/productos.html"), None);
    }

    #[test]
    fn test_locate_prefers_longest_match() {
        let pages = PageMap {
            home: "/".to_owned(),
            ..PageMap::default()
        };
        assert_eq!(pages.locate("/pago.html"), Some(Page::Purchase));
        assert_eq!(pages.locate("/"), Some(Page::Home));
    }

    #[test]
    fn test_page_for_path_is_exact() {
        let pages = PageMap::default();
        assert_eq!(pages.page_for_path("pago.html"), Some(Page::Purchase));
        assert_eq!(pages.page_for_path("/pago.html"), None);
    }
}
