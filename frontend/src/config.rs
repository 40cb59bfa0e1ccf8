use std::sync::OnceLock;

static API_BASE_URL: OnceLock<String> = OnceLock::new();

const FALLBACK_API_BASE_URL: &str = "http://localhost:3000/api";

fn get_from_env_js() -> Option<String> {
    // Optional global object: window.__LEAVEDESK_ENV = { API_BASE_URL: "..." }
    let w = web_sys::window()?;
    let any = js_sys::Reflect::get(&w, &"__LEAVEDESK_ENV".into()).ok()?;
    if any.is_undefined() || any.is_null() {
        return None;
    }
    let obj = js_sys::Object::from(any);
    let val = js_sys::Reflect::get(&obj, &"API_BASE_URL".into())
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
        .or_else(|| js_sys::Reflect::get(&obj, &"api_base_url".into()).ok());
    val.and_then(|v| v.as_string())
}

fn same_origin() -> Option<String> {
    web_sys::window()?.location().origin().ok()
}

/// Explicit override wins, then `<origin>/api`, then a local default.
pub fn resolve_api_base_url(override_url: Option<String>, origin: Option<String>) -> String {
    let base = override_url
        .filter(|url| !url.trim().is_empty())
        .or_else(|| origin.map(|origin| format!("{}/api", origin.trim_end_matches('/'))))
        .unwrap_or_else(|| FALLBACK_API_BASE_URL.to_string());
    base.trim().trim_end_matches('/').to_string()
}

pub fn api_base_url() -> String {
    API_BASE_URL
        .get_or_init(|| {
            let url = resolve_api_base_url(get_from_env_js(), same_origin());
            log::debug!("API base URL resolved to {}", url);
            url
        })
        .clone()
}
