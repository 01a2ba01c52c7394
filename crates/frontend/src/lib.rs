use tracing::Level;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber_wasm::MakeConsoleWriter;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::wasm_bindgen;

#[wasm_bindgen(start)]
pub fn start() {
    tracing::subscriber::set_global_default(
        fmt::Subscriber::builder()
            .with_env_filter("app=debug")
            .with_max_level(Level::DEBUG)
            .without_time()
            .with_ansi(false)
            .finish()
            .with(
                fmt::Layer::default()
                    .with_writer(MakeConsoleWriter::default())
                    .with_ansi(false)
                    .without_time(),
            ),
    )
    .expect("Unable to configure tracing");
    console_error_panic_hook::set_once();

    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };

    let path = window.location().pathname().unwrap_or_default();
    if !app::page_has_user_nav(&path) {
        return;
    }

    // The module may be loaded before the page has finished parsing.
    if document.ready_state() == "loading" {
        let on_ready = Closure::<dyn FnMut(web_sys::Event)>::new(move |_| app::activate());
        let added = document
            .add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref());
        if added.is_ok() {
            on_ready.forget();
        }
    } else {
        app::activate();
    }
}
