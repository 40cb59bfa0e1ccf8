use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use leavedesk_access::{
    cookie::{extract_cookie_value, ACCESS_COOKIE_NAME},
    decode_credential,
    zone::is_gated_path,
    AccessError, RouteZone, LOGIN_PATH, UNAUTHORIZED_PATH,
};

use crate::{state::AppState, utils::jwt};

/// Terminal state reached by one edge evaluation.
///
/// A request starts `Unauthenticated`; a credential that decodes becomes
/// authenticated-but-unclassified only until its path is classified, so that
/// intermediate state never escapes [`evaluate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdgeVerdict {
    /// Public-zone path, allowed without looking at the credential.
    Public,
    Unauthenticated(AccessError),
    Authorized { zone: RouteZone, subject: String },
    Forbidden { zone: RouteZone, subject: String },
}

impl EdgeVerdict {
    /// `None` means the request proceeds unchanged.
    pub fn redirect_target(&self) -> Option<&'static str> {
        match self {
            EdgeVerdict::Public | EdgeVerdict::Authorized { .. } => None,
            EdgeVerdict::Unauthenticated(_) => Some(LOGIN_PATH),
            EdgeVerdict::Forbidden { .. } => Some(UNAUTHORIZED_PATH),
        }
    }
}

pub fn evaluate(path: &str, credential: Option<&str>, jwt_secret: Option<&str>) -> EdgeVerdict {
    if RouteZone::classify(path) == RouteZone::Public {
        return EdgeVerdict::Public;
    }

    let Some(token) = credential.filter(|t| !t.trim().is_empty()) else {
        return EdgeVerdict::Unauthenticated(AccessError::MissingCredential);
    };

    if let Some(secret) = jwt_secret {
        if let Err(err) = jwt::verify_signature(token, secret) {
            return EdgeVerdict::Unauthenticated(AccessError::MalformedCredential(format!(
                "signature check failed: {}",
                err
            )));
        }
    }

    let claims = match decode_credential(Some(token)) {
        Ok(claims) => claims,
        Err(err) => return EdgeVerdict::Unauthenticated(err),
    };

    let zone = RouteZone::classify(path);
    if leavedesk_access::is_permitted(&claims.roles, path) {
        EdgeVerdict::Authorized {
            zone,
            subject: claims.subject,
        }
    } else {
        EdgeVerdict::Forbidden {
            zone,
            subject: claims.subject,
        }
    }
}

/// Edge gate for page navigations. Paths outside the protected matchers
/// are passed through without inspection.
pub async fn edge_gate(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();
    if !is_gated_path(&path) {
        return next.run(request).await;
    }

    let credential = request
        .headers()
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|raw| extract_cookie_value(raw, ACCESS_COOKIE_NAME));

    let verdict = evaluate(&path, credential.as_deref(), state.config.jwt_secret.as_deref());
    match &verdict {
        EdgeVerdict::Unauthenticated(AccessError::MissingCredential) => {
            tracing::debug!(path = %path, "No access cookie, redirecting to login");
        }
        EdgeVerdict::Unauthenticated(reason) => {
            tracing::warn!(path = %path, reason = %reason, "Token validation error");
        }
        EdgeVerdict::Forbidden { zone, subject } => {
            tracing::info!(
                path = %path,
                zone = zone.as_str(),
                subject = %subject,
                "Role does not grant zone, redirecting to unauthorized"
            );
        }
        EdgeVerdict::Public | EdgeVerdict::Authorized { .. } => {}
    }

    match verdict.redirect_target() {
        Some(target) => Redirect::temporary(target).into_response(),
        None => next.run(request).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leavedesk_access::credential::testing::{token_with_roles, unsigned_token};
    use serde_json::json;

    #[test]
    fn no_cookie_redirects_to_login() {
        let verdict = evaluate("/dashboard/employee", None, None);
        assert_eq!(
            verdict,
            EdgeVerdict::Unauthenticated(AccessError::MissingCredential)
        );
        assert_eq!(verdict.redirect_target(), Some("/auth/login"));
    }

    #[test]
    fn employee_on_hr_zone_is_forbidden() {
        let token = token_with_roles("5", &["EMPLOYEE"]);
        let verdict = evaluate("/dashboard/hr", Some(&token), None);
        assert_eq!(
            verdict,
            EdgeVerdict::Forbidden {
                zone: RouteZone::Hr,
                subject: "5".into()
            }
        );
        assert_eq!(verdict.redirect_target(), Some("/unauthorized"));
    }

    #[test]
    fn admin_and_multi_role_users_proceed() {
        let admin = token_with_roles("1", &["ADMIN"]);
        assert_eq!(evaluate("/dashboard/hr", Some(&admin), None).redirect_target(), None);

        let hr_employee = token_with_roles("2", &["HR", "EMPLOYEE"]);
        assert_eq!(
            evaluate("/dashboard/employee", Some(&hr_employee), None).redirect_target(),
            None
        );
    }

    #[test]
    fn roleless_payload_redirects_to_login_except_public() {
        let token = unsigned_token(&json!({ "sub": "3" }));
        for path in ["/dashboard/admin", "/dashboard/profile", "/auth/other"] {
            let verdict = evaluate(path, Some(&token), None);
            assert!(matches!(
                verdict,
                EdgeVerdict::Unauthenticated(AccessError::IncompleteClaims(_))
            ));
            assert_eq!(verdict.redirect_target(), Some("/auth/login"));
        }
        assert_eq!(evaluate("/auth/login", Some(&token), None), EdgeVerdict::Public);
    }

    #[test]
    fn malformed_tokens_always_redirect_to_login() {
        for token in ["garbage", "a.b", "x.!!!.y", "a.b.c.d.e"] {
            for path in ["/dashboard", "/dashboard/hr", "/dashboard/employee"] {
                assert_eq!(
                    evaluate(path, Some(token), None).redirect_target(),
                    Some("/auth/login"),
                    "{} on {}",
                    token,
                    path
                );
            }
        }
    }

    #[test]
    fn signature_is_checked_when_secret_configured() {
        let claims = json!({ "sub": "1", "roles": ["HR"], "exp": 4_102_444_800i64 });
        let signed = jwt::sign_for_test(&claims, "edge-secret");
        assert_eq!(
            evaluate("/dashboard/hr", Some(&signed), Some("edge-secret")).redirect_target(),
            None
        );

        let unsigned = unsigned_token(&claims);
        let verdict = evaluate("/dashboard/hr", Some(&unsigned), Some("edge-secret"));
        assert!(matches!(
            verdict,
            EdgeVerdict::Unauthenticated(AccessError::MalformedCredential(_))
        ));
    }
}
