// API client module: a small blocking HTTP layer that talks to the archive's
// admin API. Every call is a single synchronous request carrying the
// operator's bearer token.

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::config::Config;
use crate::error::ApiError;

/// The capability to send one authenticated request and get the response
/// body back. Non-2xx statuses are errors.
pub trait Transport {
    fn send(
        &self,
        method: Method,
        url: &Url,
        token: &str,
        body: Option<Vec<u8>>,
    ) -> std::result::Result<Vec<u8>, ApiError>;
}

/// `Transport` backed by a reqwest blocking client.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("sda-admin/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(HttpTransport { client })
    }
}

impl Transport for HttpTransport {
    fn send(
        &self,
        method: Method,
        url: &Url,
        token: &str,
        body: Option<Vec<u8>>,
    ) -> std::result::Result<Vec<u8>, ApiError> {
        let mut req = self
            .client
            .request(method.clone(), url.clone())
            .bearer_auth(token);
        if let Some(body) = body {
            req = req.header(CONTENT_TYPE, "application/json").body(body);
        }

        let res = req
            .send()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = res.status();
        tracing::debug!(%method, %url, %status, "response received");

        if !status.is_success() {
            let txt = res.text().unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: txt,
            });
        }
        let bytes = res
            .bytes()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

/// Holds the transport together with the resolved base URI and token. The
/// resource operations live in `users`, `files` and `datasets`.
pub struct ApiClient<'a> {
    transport: &'a dyn Transport,
    base_url: Url,
    token: String,
}

impl<'a> ApiClient<'a> {
    pub fn new(transport: &'a dyn Transport, config: &Config) -> Self {
        ApiClient {
            transport,
            base_url: config.api_uri.clone(),
            token: config.token.clone(),
        }
    }

    /// Join path segments onto the base URI. Segments are percent-encoded,
    /// and a trailing slash on the base does not produce an empty segment.
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Config::resolve rejects cannot-be-a-base URIs, so this always succeeds.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub(crate) fn get<T: DeserializeOwned>(&self, url: &Url) -> std::result::Result<T, ApiError> {
        tracing::debug!(%url, "GET");
        let body = self.transport.send(Method::GET, url, &self.token, None)?;
        serde_json::from_slice(&body).map_err(ApiError::Decode)
    }

    pub(crate) fn post<B: Serialize>(
        &self,
        url: &Url,
        body: Option<&B>,
    ) -> std::result::Result<(), ApiError> {
        tracing::debug!(%url, "POST");
        let body = body
            .map(serde_json::to_vec)
            .transpose()
            .map_err(ApiError::Encode)?;
        self.transport.send(Method::POST, url, &self.token, body)?;
        Ok(())
    }
}
