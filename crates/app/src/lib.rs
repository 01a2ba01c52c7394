pub mod auth;
pub mod components;
pub mod error;
pub mod session;

use tracing::{debug, warn};

use components::navbar;
use session::BrowserSession;

/// Pages shown before authentication; they carry no user navigation bar.
const EXCLUDED_PATHS: &[&str] = &["/login", "/register"];

/// Whether the widget should self-activate on the given page path.
pub fn page_has_user_nav(path: &str) -> bool {
    !EXCLUDED_PATHS.contains(&path)
}

/// Renders the nav user widget for the current page.
///
/// Invoked once by the frontend after page-load completion. A missing
/// document or storage facility is logged and skipped, never an error.
pub fn activate() {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let Some(store) = BrowserSession::new() else {
        debug!("local storage unavailable, skipping nav user widget");
        return;
    };
    if let Err(e) = navbar::render(&document, navbar::MENU_SELECTOR, &store) {
        warn!("failed to render nav user widget: {e}");
    }
}
