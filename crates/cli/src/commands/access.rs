//! Access checks and page visits.

use storegate_core::{Decision, GatedAction, MemoryStore, Page, SessionPolicy};
use tracing::{info, warn};

use crate::state::CliError;

/// Evaluate a gated action and report the outcome.
pub fn check(policy: &SessionPolicy<MemoryStore>, action: GatedAction) -> Decision {
    let decision = policy.can_access(action);
    report(policy, &decision);
    decision
}

/// Load a page: its guard runs first, then the page-load redirects.
///
/// Returns the page the viewer ends up being sent to, if any.
pub fn visit(policy: &SessionPolicy<MemoryStore>, location: &str) -> Option<Page> {
    let decision = policy.guard_page(location);
    if let Decision::DenyRedirect { target, .. } = decision {
        report(policy, &decision);
        return Some(target);
    }

    let next = policy.on_page_load(location);
    match next {
        Some(page) => info!("Redirecting to {}", policy.pages().path(page)),
        None => info!("Showing {location}"),
    }
    next
}

/// Print the navigation bar model as JSON.
pub fn nav(policy: &SessionPolicy<MemoryStore>) -> Result<(), CliError> {
    let view = serde_json::to_string_pretty(&policy.nav_view())?;
    info!("Navigation:\n{view}");
    Ok(())
}

fn report(policy: &SessionPolicy<MemoryStore>, decision: &Decision) {
    match decision {
        Decision::Allow => info!("Allowed"),
        Decision::DenyRedirect { target, notice } => {
            if let Some(notice) = notice {
                warn!("{notice}");
            }
            info!("Denied, redirecting to {}", policy.pages().path(*target));
        }
    }
}
