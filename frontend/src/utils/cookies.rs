use leavedesk_access::{AccessError, CookieWriter};
use wasm_bindgen::JsCast;
use web_sys::HtmlDocument;

use super::storage::window;

/// Writes cookies through `document.cookie` so the edge server sees the
/// credential on the next page navigation.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentCookies;

impl CookieWriter for DocumentCookies {
    fn write_cookie(&self, cookie: &str) -> Result<(), AccessError> {
        let document = window()
            .map_err(AccessError::Storage)?
            .document()
            .ok_or_else(|| AccessError::Storage("No document".into()))?
            .dyn_into::<HtmlDocument>()
            .map_err(|_| AccessError::Storage("Document is not an HTML document".into()))?;
        document
            .set_cookie(cookie)
            .map_err(|_| AccessError::Storage("Failed to write cookie".into()))
    }
}
