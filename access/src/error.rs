use thiserror::Error;

/// Failures produced while decoding credentials, evaluating route access or
/// running the login/logout session transitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    #[error("no access credential present")]
    MissingCredential,
    #[error("access credential is malformed: {0}")]
    MalformedCredential(String),
    #[error("access credential is missing required claims: {0}")]
    IncompleteClaims(String),
    #[error("role set does not grant access to this zone")]
    ForbiddenZone,
    #[error("Invalid response from server")]
    InvalidLoginResponse,
    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),
    #[error("{message}")]
    LoginRejected { status: u16, message: String },
    #[error("session storage unavailable: {0}")]
    Storage(String),
}

impl AccessError {
    /// Decode and validation failures send the caller back to the login page;
    /// everything else that reaches a gate is a forbidden outcome.
    pub fn is_credential_failure(&self) -> bool {
        matches!(
            self,
            AccessError::MissingCredential
                | AccessError::MalformedCredential(_)
                | AccessError::IncompleteClaims(_)
        )
    }

    /// Text suitable for the login form. Only login-time failures carry
    /// user-actionable detail.
    pub fn user_message(&self) -> String {
        match self {
            AccessError::InvalidLoginResponse
            | AccessError::BackendUnavailable(_)
            | AccessError::LoginRejected { .. } => self.to_string(),
            _ => "Login failed. Please try again.".to_string(),
        }
    }
}
