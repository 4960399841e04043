//! Session policy evaluator.
//!
//! [`SessionPolicy`] reads the session through an injected [`SessionStore`]
//! and answers access questions. It never navigates: denied checks come back
//! as [`Decision::DenyRedirect`] and page-load checks as an optional target
//! page, and the caller performs the redirect.
//!
//! # Example
//!
//! ```
//! use storegate_core::{Decision, GatedAction, MemoryStore, Role, Scope, Session, SessionPolicy};
//!
//! let policy = SessionPolicy::new(MemoryStore::new());
//! assert!(!policy.is_authenticated());
//!
//! policy.establish(&Session::new("Ana", "a@x.com", Role::Admin), Scope::Persistent);
//! assert!(policy.has_elevated_role());
//! assert_eq!(policy.can_access(GatedAction::ViewAdminPage), Decision::Allow);
//! ```

use core::fmt;

use tracing::{debug, info, warn};

use crate::config::{ConfigError, PageMap};
use crate::nav::NavView;
use crate::session::{Scope, Session, keys};
use crate::store::SessionStore;
use crate::types::Page;

/// Something the viewer is trying to see or do that requires a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatedAction {
    /// Any page that requires a logged-in viewer.
    ViewProtectedPage,
    /// Inventory management pages.
    ViewAdminPage,
    /// Starting checkout.
    PerformPurchase,
}

/// Advisory message shown alongside a redirect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Notice {
    /// Viewer must log in to see the page.
    MustLogIn,
    /// Page is reserved for administrators.
    AdminsOnly,
    /// Viewer must log in before buying.
    MustLogInToPurchase,
}

impl Notice {
    /// Returns the message text.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::MustLogIn => "You must log in to access this page",
            Self::AdminsOnly => "You do not have permission to access this page. Admins only.",
            Self::MustLogInToPurchase => "You must log in to make a purchase",
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Outcome of an access check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Proceed.
    Allow,
    /// Send the viewer to `target`, optionally showing `notice` first.
    DenyRedirect {
        /// Page to redirect to.
        target: Page,
        /// Message to show before redirecting.
        notice: Option<Notice>,
    },
}

impl Decision {
    /// Returns `true` for [`Decision::Allow`].
    #[must_use]
    pub const fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }

    /// Returns the redirect target of a denial.
    #[must_use]
    pub const fn redirect_target(&self) -> Option<Page> {
        match self {
            Self::Allow => None,
            Self::DenyRedirect { target, .. } => Some(*target),
        }
    }

    const fn deny(target: Page, notice: Option<Notice>) -> Self {
        Self::DenyRedirect { target, notice }
    }
}

/// Access policy over the session held in a [`SessionStore`].
#[derive(Debug)]
pub struct SessionPolicy<S> {
    store: S,
    pages: PageMap,
}

impl<S: SessionStore> SessionPolicy<S> {
    /// Create a policy with the default page paths.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self {
            store,
            pages: PageMap::default(),
        }
    }

    /// Create a policy with custom page paths.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a path is empty or two pages share a path.
    pub fn with_pages(store: S, pages: PageMap) -> Result<Self, ConfigError> {
        pages.validate()?;
        Ok(Self { store, pages })
    }

    /// Returns the underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Returns the page paths in use.
    pub const fn pages(&self) -> &PageMap {
        &self.pages
    }

    /// Returns the active session, if any.
    ///
    /// The persistent scope is checked first. An empty value counts as no
    /// record. A record that fails to decode makes the viewer anonymous.
    pub fn current_session(&self) -> Option<Session> {
        for scope in Scope::ALL {
            let Some(raw) = self.store.get(scope, keys::SESSION) else {
                continue;
            };
            if raw.is_empty() {
                continue;
            }
            return match Session::decode(&raw) {
                Ok(session) => Some(session),
                Err(e) => {
                    warn!(%scope, error = %e, "Ignoring unreadable session record");
                    None
                }
            };
        }
        None
    }

    /// Returns `true` if a session is present.
    pub fn is_authenticated(&self) -> bool {
        self.current_session().is_some()
    }

    /// Returns `true` if a session is present and carries the admin role.
    pub fn has_elevated_role(&self) -> bool {
        self.current_session().is_some_and(|s| s.is_admin())
    }

    /// Check whether the viewer may perform `action`.
    ///
    /// A denied purchase also records the purchase page as the pending
    /// redirect, so the viewer lands there after logging in.
    pub fn can_access(&self, action: GatedAction) -> Decision {
        let session = self.current_session();

        let decision = match (action, &session) {
            (GatedAction::ViewProtectedPage, None) => Decision::deny(Page::Login, None),
            (GatedAction::ViewAdminPage, None) => {
                Decision::deny(Page::Login, Some(Notice::MustLogIn))
            }
            (GatedAction::ViewAdminPage, Some(s)) if !s.is_admin() => {
                Decision::deny(Page::Home, Some(Notice::AdminsOnly))
            }
            (GatedAction::PerformPurchase, None) => {
                let target = self.pages.path(Page::Purchase);
                self.store
                    .set(Scope::Ephemeral, keys::PENDING_REDIRECT, target);
                debug!(path = target, "Recorded pending redirect");
                Decision::deny(Page::Login, Some(Notice::MustLogInToPurchase))
            }
            _ => Decision::Allow,
        };

        debug!(?action, ?decision, "Access checked");
        decision
    }

    /// Evaluate the check that guards the page at `location`.
    ///
    /// The inventory page requires the admin role and the purchase page
    /// requires a session. Every other page is public.
    pub fn guard_page(&self, location: &str) -> Decision {
        match self.pages.locate(location) {
            Some(Page::Inventory) => self.can_access(GatedAction::ViewAdminPage),
            Some(Page::Purchase) => self.can_access(GatedAction::ViewProtectedPage),
            Some(Page::Login | Page::Home) | None => Decision::Allow,
        }
    }

    /// Store `session` as the active session.
    ///
    /// The record goes into `scope` only; any record in the other scope is
    /// removed so a single session is ever active.
    pub fn establish(&self, session: &Session, scope: Scope) {
        self.store.set(scope, keys::SESSION, &session.encode());
        self.store.remove(scope.other(), keys::SESSION);
        info!(%scope, role = %session.role, "Session established");
    }

    /// Clear the session from both scopes.
    ///
    /// Callers are expected to navigate to the login page afterwards.
    pub fn logout(&self) {
        for scope in Scope::ALL {
            self.store.remove(scope, keys::SESSION);
        }
        info!("Session cleared");
    }

    /// Take the pending redirect, if the viewer may follow it now.
    ///
    /// Nothing is returned (and the slot is left alone) while the viewer is
    /// anonymous or still on the login page. A stored path that matches no
    /// known page is dropped.
    pub fn consume_pending_redirect(&self, location: &str) -> Option<Page> {
        if self.pages.locate(location) == Some(Page::Login) || !self.is_authenticated() {
            return None;
        }

        let path = self.store.take(Scope::Ephemeral, keys::PENDING_REDIRECT)?;
        let page = self.pages.page_for_path(&path);
        if page.is_none() {
            warn!(%path, "Dropping pending redirect to unknown page");
        }
        page
    }

    /// Run the checks every page performs when it loads.
    ///
    /// Returns the page to navigate to, if any:
    /// - a logged-in viewer on the login page goes home
    /// - a pending redirect is consumed and followed from the home page; one
    ///   consumed on any other page is discarded
    pub fn on_page_load(&self, location: &str) -> Option<Page> {
        let current = self.pages.locate(location);
        if current == Some(Page::Login) && self.is_authenticated() {
            return Some(Page::Home);
        }

        let pending = self.consume_pending_redirect(location)?;
        if current == Some(Page::Home) {
            Some(pending)
        } else {
            debug!(location, %pending, "Discarded pending redirect away from home");
            None
        }
    }

    /// Build the navigation bar model for the current viewer.
    pub fn nav_view(&self) -> NavView {
        NavView::for_viewer(self.current_session().as_ref())
    }
}
