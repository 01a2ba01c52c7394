use thiserror::Error;
use web_sys::wasm_bindgen::JsValue;

#[derive(Error, Clone, Debug)]
pub enum WidgetError {
    #[error("DOM failure: {0}")]
    DomError(String),

    #[error("Logout failure: {0}")]
    LogoutError(String),
}

impl From<JsValue> for WidgetError {
    fn from(value: JsValue) -> Self {
        Self::DomError(format!("{value:?}"))
    }
}
