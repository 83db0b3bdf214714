// 🌐 Remote Fetcher - read whole files from a WebHDFS endpoint
//
// One blocking GET per file: {base}/webhdfs/v1{path}?op=OPEN

use crate::config::Config;
use crate::error::{MergeError, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::blocking::Client;
use reqwest::header::AUTHORIZATION;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info, warn};

// ============================================================================
// REMOTE STORE
// ============================================================================

/// RemoteStore - anything that can hand back the full text of a remote file
///
/// The orchestrator only talks to this trait, so the HTTP client can be
/// swapped for an in-memory store in tests.
pub trait RemoteStore {
    fn fetch(&self, path: &str) -> Result<String>;
}

// ============================================================================
// WEBHDFS CLIENT
// ============================================================================

pub struct WebHdfsClient {
    client: Client,
    base_address: String,
    username: String,
    token: Option<SecretString>,
}

impl WebHdfsClient {
    pub fn new(config: &Config) -> Result<Self> {
        // None also lifts reqwest's built-in 30s default for blocking clients
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| MergeError::Config(format!("failed to build HTTP client: {e}")))?;

        if config.token.is_none() {
            warn!(
                username = %config.username,
                "no token configured, sending username-only Authorization header"
            );
        }

        Ok(WebHdfsClient {
            client,
            base_address: config.base_address.clone(),
            username: config.username.clone(),
            token: config.token.clone(),
        })
    }

    pub fn open_url(&self, path: &str) -> String {
        open_url(&self.base_address, path)
    }
}

impl RemoteStore for WebHdfsClient {
    fn fetch(&self, path: &str) -> Result<String> {
        let url = self.open_url(path);
        debug!(%url, "requesting remote file");

        let response = self
            .client
            .get(&url)
            .header(
                AUTHORIZATION,
                authorization_header(&self.username, self.token.as_ref()),
            )
            .send()
            .map_err(|source| MergeError::Connectivity {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(MergeError::Fetch {
                path: path.to_string(),
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let bytes = response
            .bytes()
            .map_err(|source| MergeError::Connectivity {
                url: url.clone(),
                source,
            })?;

        let text = String::from_utf8(bytes.to_vec())
            .map_err(|e| MergeError::parse(path, None, format!("response is not valid UTF-8: {e}")))?;

        info!(path, bytes = text.len(), "fetched remote file");
        Ok(text)
    }
}

// ============================================================================
// HELPERS
// ============================================================================

/// Build the WebHDFS OPEN URL for `path` under `base_address`
pub fn open_url(base_address: &str, path: &str) -> String {
    let base = base_address.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{base}/webhdfs/v1/{path}?op=OPEN")
}

/// Value for the Authorization header.
///
/// With a token: standard Basic `user:token`. Without one: Basic over the
/// bare username, which is what existing deployments expect.
pub fn authorization_header(username: &str, token: Option<&SecretString>) -> String {
    let credential = match token {
        Some(token) => format!("{username}:{}", token.expose_secret()),
        None => username.to_string(),
    };
    format!("Basic {}", STANDARD.encode(credential))
}
