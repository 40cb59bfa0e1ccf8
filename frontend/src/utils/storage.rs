use leavedesk_access::{
    session::{TOKEN_STORAGE_KEY, USER_STORAGE_KEY},
    AccessError, SessionStorage,
};
use web_sys::{Storage, Window};

pub fn window() -> Result<Window, String> {
    web_sys::window().ok_or_else(|| "No window object".to_string())
}

pub fn session_storage() -> Result<Storage, String> {
    window()?
        .session_storage()
        .map_err(|_| "No sessionStorage".to_string())?
        .ok_or_else(|| "No sessionStorage".to_string())
}

/// Tab-scoped storage backed by `window.sessionStorage`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserSessionStorage;

impl SessionStorage for BrowserSessionStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, AccessError> {
        session_storage()
            .map_err(AccessError::Storage)?
            .get_item(key)
            .map_err(|_| AccessError::Storage(format!("failed to read {}", key)))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), AccessError> {
        session_storage()
            .map_err(AccessError::Storage)?
            .set_item(key, value)
            .map_err(|_| AccessError::Storage(format!("failed to write {}", key)))
    }

    fn clear(&self) {
        match session_storage() {
            Ok(storage) => {
                remove_session_keys(|key| storage.remove_item(key));
            }
            Err(err) => log::warn!("session not cleared: {}", err),
        }
    }
}

/// Removes every session key, logging each failure. Returns how many failed.
fn remove_session_keys<E: std::fmt::Debug>(
    mut remove: impl FnMut(&str) -> Result<(), E>,
) -> usize {
    let mut failed = 0;
    for key in [TOKEN_STORAGE_KEY, USER_STORAGE_KEY] {
        if let Err(err) = remove(key) {
            log::warn!("failed to remove {} from sessionStorage: {:?}", key, err);
            failed += 1;
        }
    }
    failed
}
