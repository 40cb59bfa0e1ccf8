pub const ACCESS_COOKIE_NAME: &str = "access_token";
pub const ACCESS_COOKIE_PATH: &str = "/";

/// Cookie mirrored from tab storage so the edge gate sees the credential on
/// the next navigation. No expiry is set here; the token carries its own.
pub fn build_access_cookie(token: &str) -> String {
    format!(
        "{}={}; Path={}",
        ACCESS_COOKIE_NAME, token, ACCESS_COOKIE_PATH
    )
}

pub fn build_clear_cookie() -> String {
    format!(
        "{}=; Max-Age=0; Path={}",
        ACCESS_COOKIE_NAME, ACCESS_COOKIE_PATH
    )
}

pub fn extract_cookie_value(header: &str, name: &str) -> Option<String> {
    header.split(';').map(str::trim).find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        if key.trim() == name {
            Some(value.trim().to_string()).filter(|v| !v.is_empty())
        } else {
            None
        }
    })
}
