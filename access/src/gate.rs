use crate::{
    error::AccessError,
    session::SessionIdentity,
    zone::{is_permitted, UNAUTHORIZED_PATH},
};

/// Outcome of re-validating the active page inside the rendered application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientDecision {
    /// No identity loaded yet; nothing is rendered and nothing is decided.
    Defer,
    Render,
    Redirect(&'static str),
}

/// Client-side gate. Decisions are a pure function of identity and path;
/// the gate only remembers which redirect it already issued so repeated
/// evaluation with unchanged inputs never navigates twice.
#[derive(Debug, Default)]
pub struct ClientAccessGate {
    issued: Option<(String, String)>,
}

impl ClientAccessGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn decide(identity: Option<&SessionIdentity>, path: &str) -> ClientDecision {
        let Some(identity) = identity else {
            return ClientDecision::Defer;
        };
        match check(identity, path) {
            Ok(()) => ClientDecision::Render,
            Err(err) => {
                if err != AccessError::ForbiddenZone {
                    log::error!("route protection error on {}: {}", path, err);
                }
                ClientDecision::Redirect(UNAUTHORIZED_PATH)
            }
        }
    }

    /// Returns the navigation target the caller must perform, at most once
    /// per (path, identity) pair.
    pub fn observe(&mut self, identity: Option<&SessionIdentity>, path: &str) -> Option<&'static str> {
        match Self::decide(identity, path) {
            ClientDecision::Redirect(target) => {
                let key = (path.to_string(), fingerprint(identity));
                if self.issued.as_ref() == Some(&key) {
                    return None;
                }
                self.issued = Some(key);
                Some(target)
            }
            ClientDecision::Render | ClientDecision::Defer => {
                self.issued = None;
                None
            }
        }
    }
}

fn check(identity: &SessionIdentity, path: &str) -> Result<(), AccessError> {
    let roles = identity.role_set()?;
    if is_permitted(roles, path) {
        Ok(())
    } else {
        Err(AccessError::ForbiddenZone)
    }
}

fn fingerprint(identity: Option<&SessionIdentity>) -> String {
    identity
        .map(|id| {
            let roles: Vec<&str> = id.roles.iter().map(|r| r.as_str()).collect();
            format!("{}:{}", id.subject, roles.join(","))
        })
        .unwrap_or_default()
}
