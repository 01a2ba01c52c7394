use tracing::{debug, warn};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, RequestRedirect};

use crate::error::WidgetError;
use crate::session::{SessionStore, clear_session};

pub const LOGOUT_ENDPOINT: &str = "/logout";
pub const LOGIN_PAGE: &str = "/login";

/// Logs the client out.
///
/// The session markers are removed before any network activity starts, so
/// the client considers itself logged out no matter what the server says.
/// The `/logout` request is best-effort; once it settles, the browser is
/// sent to the login page whether the request succeeded or not.
pub async fn logout(store: &impl SessionStore) {
    clear_session(store);
    notify_and_redirect().await;
}

/// Best-effort server notification followed by the login-page redirect.
///
/// The request's outcome never blocks the navigation; this also serves a
/// confirmed logout on a page without a storage facility, where there are
/// no markers to clear.
pub async fn notify_and_redirect() {
    match notify_server().await {
        Ok(()) => debug!("server session cleared"),
        Err(e) => warn!("logout request failed: {e}"),
    }

    redirect_to_login();
}

async fn notify_server() -> Result<(), WidgetError> {
    let window = web_sys::window()
        .ok_or_else(|| WidgetError::LogoutError("no window".to_string()))?;

    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::SameOrigin);
    opts.set_redirect(RequestRedirect::Follow);

    let request = Request::new_with_str_and_init(LOGOUT_ENDPOINT, &opts)
        .map_err(|e| WidgetError::LogoutError(format!("{e:?}")))?;

    // The response body and status are deliberately not inspected.
    JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| WidgetError::LogoutError(format!("{e:?}")))?;

    Ok(())
}

fn redirect_to_login() {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Err(e) = window.location().set_href(LOGIN_PAGE) {
        warn!("failed to redirect to login page: {e:?}");
    }
}
