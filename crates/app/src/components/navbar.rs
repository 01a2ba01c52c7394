use tracing::debug;
use wasm_bindgen_futures::spawn_local;
use web_sys::wasm_bindgen::JsCast;
use web_sys::wasm_bindgen::closure::Closure;
use web_sys::{Document, Element, Event};

use crate::auth;
use crate::error::WidgetError;
use crate::session::{BrowserSession, SessionStore, display_name};

/// Reserved id of the widget node; at most one element carries it.
pub const WIDGET_ID: &str = "navUserInfo";
/// Selector for the navigation menu the widget is appended to.
pub const MENU_SELECTOR: &str = ".navbar-menu";

const NAME_CLASS: &str = "nav-username";
const CONFIRM_PROMPT: &str = "Log out of your account?";

/// Renders the user widget into the container matching `selector`.
///
/// A page without a matching container is silently skipped. On repeat
/// calls only the name label is updated; the logout control is left
/// untouched.
pub fn render(
    document: &Document,
    selector: &str,
    store: &impl SessionStore,
) -> Result<(), WidgetError> {
    let Some(menu) = document.query_selector(selector)? else {
        debug!("page has no navigation menu, skipping user widget");
        return Ok(());
    };

    let widget = ensure_widget(document, &menu)?;
    if let Some(name) = widget.query_selector(&format!(".{NAME_CLASS}"))? {
        name.set_text_content(Some(&display_name(store)));
    }
    Ok(())
}

/// Idempotent lookup-or-create of the widget node.
///
/// Returns the existing node when the reserved id is already present;
/// otherwise builds the label and logout control, wires the
/// confirmation-gated click handler, and appends the node to `menu`.
pub fn ensure_widget(document: &Document, menu: &Element) -> Result<Element, WidgetError> {
    if let Some(existing) = document.get_element_by_id(WIDGET_ID) {
        return Ok(existing);
    }

    let widget = document.create_element("div")?;
    widget.set_id(WIDGET_ID);
    widget.set_attribute("style", "display: flex; gap: 8px; align-items: center;")?;

    let label = document.create_element("span")?;
    label.set_class_name("navbar-item");
    label.set_attribute("style", "cursor: default;")?;

    let person = document.create_element("span")?;
    person.set_class_name("icon");
    person.set_text_content(Some("👤"));
    label.append_child(&person)?;

    let name = document.create_element("span")?;
    name.set_class_name(NAME_CLASS);
    label.append_child(&name)?;

    let logout_link = document.create_element("a")?;
    logout_link.set_class_name("navbar-item");
    logout_link.set_attribute("href", "#")?;

    let door = document.create_element("span")?;
    door.set_class_name("icon");
    door.set_text_content(Some("🚪"));
    logout_link.append_child(&door)?;
    logout_link.append_child(&document.create_text_node("Logout"))?;

    let on_click = Closure::<dyn FnMut(Event)>::new(move |ev: Event| {
        ev.prevent_default();
        handle_logout_click(confirm_logout(), || {
            spawn_local(async {
                match BrowserSession::new() {
                    Some(store) => auth::logout(&store).await,
                    // Nothing to clear without a storage facility; the
                    // logout still ends at the login page.
                    None => auth::notify_and_redirect().await,
                }
            });
        });
    });
    logout_link.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    // The widget lives until the page unloads; the handler goes with it.
    on_click.forget();

    widget.append_child(&label)?;
    widget.append_child(&logout_link)?;
    menu.append_child(&widget)?;

    Ok(widget)
}

/// Applies the confirmation-gate outcome for the logout control.
///
/// A declined prompt changes nothing; a confirmed one runs the logout
/// action exactly once. The click handler supplies the ambient
/// `window.confirm` answer as `confirmed`.
pub fn handle_logout_click(confirmed: bool, logout: impl FnOnce()) {
    if confirmed {
        logout();
    }
}

fn confirm_logout() -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(CONFIRM_PROMPT).ok())
        .unwrap_or(false)
}

#[cfg(test)]
mod gate_tests {
    use std::cell::Cell;

    use super::*;
    use crate::session::{AUTH_TOKEN_KEY, MemorySession, USERNAME_KEY, clear_session};

    #[test]
    fn declined_confirmation_changes_nothing() {
        let store = MemorySession::new();
        store.set(AUTH_TOKEN_KEY, "token-123");
        store.set(USERNAME_KEY, "alice");
        let calls = Cell::new(0);

        handle_logout_click(false, || calls.set(calls.get() + 1));

        assert_eq!(calls.get(), 0);
        assert_eq!(store.get(AUTH_TOKEN_KEY), Some("token-123".to_string()));
        assert_eq!(store.get(USERNAME_KEY), Some("alice".to_string()));
    }

    #[test]
    fn confirmed_logout_runs_exactly_once() {
        let store = MemorySession::new();
        store.set(AUTH_TOKEN_KEY, "token-123");
        store.set(USERNAME_KEY, "alice");
        let calls = Cell::new(0);

        handle_logout_click(true, || {
            calls.set(calls.get() + 1);
            clear_session(&store);
        });

        assert_eq!(calls.get(), 1);
        assert_eq!(store.get(AUTH_TOKEN_KEY), None);
        assert_eq!(store.get(USERNAME_KEY), None);
    }
}
