#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod ssr;

#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod helpers {
    use crate::state::auth::{provide_test_auth, AuthContext, AuthState};
    use leavedesk_access::{Role, SessionIdentity};

    pub fn identity(roles: &[Role]) -> SessionIdentity {
        SessionIdentity {
            subject: "42".into(),
            roles: roles.to_vec(),
            full_name: Some("Dana Reyes".into()),
            email: Some("dana@example.com".into()),
        }
    }

    pub fn provide_auth(identity: Option<SessionIdentity>) -> AuthContext {
        provide_test_auth(match identity {
            Some(identity) => AuthState::signed_in(identity),
            None => AuthState::signed_out(),
        })
    }
}
