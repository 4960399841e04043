//! Navigation bar model.
//!
//! Describes which affordances the navigation bar shows for a viewer. Turning
//! this into markup is left to the page.

use serde::Serialize;

use crate::session::Session;

/// What the navigation bar shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavView {
    /// Show the inventory link.
    pub inventory_link: bool,
    /// Show the login button.
    pub login_button: bool,
    /// User menu, for logged-in viewers.
    pub user_menu: Option<UserMenu>,
}

/// Drop-down menu for a logged-in viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserMenu {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// `Administrador` or `Usuario`.
    pub role_label: &'static str,
    /// Show the "manage inventory" entry.
    pub manage_inventory: bool,
}

impl NavView {
    /// Build the view for a viewer, or for a guest when `session` is `None`.
    #[must_use]
    pub fn for_viewer(session: Option<&Session>) -> Self {
        let Some(session) = session else {
            return Self {
                inventory_link: false,
                login_button: true,
                user_menu: None,
            };
        };

        let admin = session.is_admin();
        Self {
            inventory_link: admin,
            login_button: false,
            user_menu: Some(UserMenu {
                name: session.name.clone(),
                email: session.email.clone(),
                role_label: session.role.display_label(),
                manage_inventory: admin,
            }),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::Role;

    #[test]
    fn test_guest() {
        let view = NavView::for_viewer(None);
        assert!(view.login_button);
        assert!(!view.inventory_link);
        assert!(view.user_menu.is_none());
    }

    #[test]
    fn test_user() {
        let session = Session::new("Luis", "l@x.com", Role::User);
        let view = NavView::for_viewer(Some(&session));
        assert!(!view.login_button);
        assert!(!view.inventory_link);

        let menu = view.user_menu.unwrap();
        assert_eq!(menu.name, "Luis");
        assert_eq!(menu.role_label, "Usuario");
        assert!(!menu.manage_inventory);
    }

    #[test]
    fn test_admin() {
        let session = Session::new("Ana", "a@x.com", Role::Admin);
        let view = NavView::for_viewer(Some(&session));
        assert!(view.inventory_link);

        let menu = view.user_menu.unwrap();
        assert_eq!(menu.email, "a@x.com");
        assert_eq!(menu.role_label, "Administrador");
        assert!(menu.manage_inventory);
    }

    #[test]
    fn test_serializes_for_templates() {
        let json = serde_json::to_value(NavView::for_viewer(None)).unwrap();
        assert_eq!(json["login_button"], true);
        assert!(json["user_menu"].is_null());
    }
}
