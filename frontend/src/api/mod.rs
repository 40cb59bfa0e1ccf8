mod client;

pub use client::ApiClient;
pub use leavedesk_access::{LoginRequest, LoginResponse};
