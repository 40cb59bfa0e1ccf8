pub mod cookies;
pub mod storage;

pub fn navigate_to(target: &str) {
    if let Some(window) = web_sys::window() {
        if let Err(err) = window.location().set_href(target) {
            log::error!("navigation to {} failed: {:?}", target, err);
        }
    }
}
