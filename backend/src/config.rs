use anyhow::{anyhow, Context};
use std::{env, net::SocketAddr, path::PathBuf};
use url::Url;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub backend_api_url: Url,
    pub static_dir: PathBuf,
    /// When set, credentials are also checked for a valid HS256 signature
    /// and expiry before their claims are trusted for routing.
    pub jwt_secret: Option<String>,
    pub proxy_timeout_secs: u64,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let bind_addr = lookup("EDGE_BIND_ADDR")
            .unwrap_or_else(|| "0.0.0.0:3000".to_string())
            .parse()
            .context("Invalid EDGE_BIND_ADDR value")?;

        let backend_api_url =
            lookup("BACKEND_API_URL").unwrap_or_else(|| "http://127.0.0.1:5000".to_string());
        let backend_api_url = parse_backend_url(&backend_api_url)?;

        let static_dir = lookup("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("frontend/dist"));

        let jwt_secret = lookup("EDGE_JWT_SECRET").filter(|s| !s.trim().is_empty());

        let proxy_timeout_secs = lookup("PROXY_TIMEOUT_SECS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        Ok(Config {
            bind_addr,
            backend_api_url,
            static_dir,
            jwt_secret,
            proxy_timeout_secs,
        })
    }
}

// Only absolute http(s) URLs are accepted so a bad value cannot turn the
// proxy into a request forwarder for arbitrary schemes.
fn parse_backend_url(raw: &str) -> anyhow::Result<Url> {
    let url = Url::parse(raw).map_err(|e| anyhow!("Invalid BACKEND_API_URL value {}: {}", raw, e))?;
    match url.scheme() {
        "http" | "https" if url.has_host() => Ok(url),
        _ => Err(anyhow!("Invalid BACKEND_API_URL value: {}", raw)),
    }
}

pub fn mask_secret(s: &str) -> String {
    if s.is_empty() {
        return "<empty>".into();
    }
    let prefix = s.chars().take(4).collect::<String>();
    format!("{}*** (len={})", prefix, s.len())
}
