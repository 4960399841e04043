//! Logical storefront pages.
//!
//! Pages are identified logically here; [`crate::PageMap`] resolves them to
//! the paths the site actually serves.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing a [`Page`] name.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown page: {0}")]
pub struct PageError(pub String);

/// A page the policy can gate or redirect to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    /// Login form.
    Login,
    /// Storefront landing page.
    Home,
    /// Checkout page.
    Purchase,
    /// Inventory management (admins only).
    Inventory,
}

impl Page {
    /// Every page, in a fixed order.
    pub const ALL: [Self; 4] = [Self::Login, Self::Home, Self::Purchase, Self::Inventory];

    /// Returns the page name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Home => "home",
            Self::Purchase => "purchase",
            Self::Inventory => "inventory",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Page {
    type Err = PageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|page| page.as_str() == s)
            .ok_or_else(|| PageError(s.to_owned()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        for page in Page::ALL {
            assert_eq!(page.as_str().parse::<Page>().unwrap(), page);
        }
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            "checkout".parse::<Page>(),
            Err(PageError("checkout".to_owned()))
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Page::Inventory), "inventory");
    }
}
