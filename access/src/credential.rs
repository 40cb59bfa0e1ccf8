use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde_json::{Map, Value};

use crate::{error::AccessError, role::Role};

/// Decoded payload of an access credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claims {
    pub subject: String,
    /// Recognised role tags in issue order; duplicates are kept.
    pub roles: Vec<Role>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub expires_at: Option<i64>,
}

/// Structural decode of a bearer credential. No signature is checked here:
/// trust comes from the backend that issued the token and from the cookie
/// transport.
pub fn decode_credential(token: Option<&str>) -> Result<Claims, AccessError> {
    let token = token
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or(AccessError::MissingCredential)?;
    let payload = decode_payload(token)?;
    claims_from_payload(&payload)
}

fn decode_payload(token: &str) -> Result<Map<String, Value>, AccessError> {
    let mut parts = token.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(AccessError::MalformedCredential(
            "expected three dot-separated segments".into(),
        ));
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| AccessError::MalformedCredential(format!("payload is not base64url: {}", e)))?;
    let value: Value = serde_json::from_slice(&bytes)
        .map_err(|e| AccessError::MalformedCredential(format!("payload is not JSON: {}", e)))?;

    match value {
        Value::Object(map) => Ok(map),
        _ => Err(AccessError::MalformedCredential(
            "payload is not a JSON object".into(),
        )),
    }
}

fn claims_from_payload(payload: &Map<String, Value>) -> Result<Claims, AccessError> {
    let subject = match payload.get("sub") {
        Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => return Err(AccessError::IncompleteClaims("sub".into())),
    };

    let tags = match payload.get("roles") {
        Some(Value::Array(items)) if !items.is_empty() => items,
        Some(Value::Array(_)) => {
            return Err(AccessError::IncompleteClaims("roles is empty".into()))
        }
        Some(_) => return Err(AccessError::IncompleteClaims("roles is not a list".into())),
        None => return Err(AccessError::IncompleteClaims("roles".into())),
    };

    let mut roles = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag
            .as_str()
            .ok_or_else(|| AccessError::IncompleteClaims("roles must be strings".into()))?;
        match tag.parse::<Role>() {
            Ok(role) => roles.push(role),
            Err(()) => log::debug!("ignoring unrecognised role tag {}", tag),
        }
    }
    if roles.is_empty() {
        return Err(AccessError::IncompleteClaims(
            "no recognised role tags".into(),
        ));
    }

    Ok(Claims {
        subject,
        roles,
        full_name: optional_string(payload, "full_name"),
        email: optional_string(payload, "email"),
        expires_at: payload.get("exp").and_then(Value::as_i64),
    })
}

fn optional_string(payload: &Map<String, Value>, key: &str) -> Option<String> {
    payload
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Helpers for building unsigned credentials in tests.
#[cfg(any(test, feature = "test-utils"))]
pub mod testing {
    use super::*;

    pub fn unsigned_token(payload: &Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload.to_string());
        format!("{}.{}.signature", header, body)
    }

    pub fn token_with_roles(subject: &str, roles: &[&str]) -> String {
        unsigned_token(&serde_json::json!({ "sub": subject, "roles": roles }))
    }
}
