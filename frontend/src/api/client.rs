use async_trait::async_trait;
use leavedesk_access::{AccessError, AuthBackend, LoginRequest, LoginResponse};
use reqwest::Client;
use serde::Deserialize;

use crate::config;

const LOGIN_FAILED_MESSAGE: &str = "Login failed";

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Option<String>,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: None,
        }
    }

    pub fn new_with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: Some(base_url.into()),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        let base = self
            .base_url
            .clone()
            .unwrap_or_else(config::api_base_url);
        format!(
            "{}/{}",
            base.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[async_trait(?Send)]
impl AuthBackend for ApiClient {
    async fn authenticate(&self, request: &LoginRequest) -> Result<LoginResponse, AccessError> {
        let response = self
            .client
            .post(self.endpoint("/auth/login"))
            .json(request)
            .send()
            .await
            .map_err(|e| AccessError::BackendUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .unwrap_or_default()
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| LOGIN_FAILED_MESSAGE.to_string());
            log::warn!("login rejected with status {}", status.as_u16());
            return Err(AccessError::LoginRejected {
                status: status.as_u16(),
                message,
            });
        }

        response.json::<LoginResponse>().await.map_err(|e| {
            log::error!("login response is not valid JSON: {}", e);
            AccessError::InvalidLoginResponse
        })
    }
}
