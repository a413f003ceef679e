//! Fetcher HTTP de artifacts.
//!
//! - `GET <url>` sin headers extra, sin auth, sin reintentos.
//! - Estado fuera de 2xx → `FetchError::Status`.
//! - El cuerpo se decodifica como UTF-8 y se devuelve tal cual.
//! - Timeouts: los del cliente, salvo que se configure uno explícito.

use std::time::Duration;

use log::debug;
use parity_core::{ArtifactSource, FetchError, TokenizerArtifact};
use reqwest::blocking::Client;
use url::Url;

pub struct HttpArtifactFetcher {
    client: Client,
}

impl HttpArtifactFetcher {
    /// Cliente bloqueante; `timeout = None` conserva el default de `reqwest`.
    pub fn new(timeout: Option<Duration>) -> Result<Self, FetchError> {
        let mut builder = Client::builder();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        let client = builder.build().map_err(|e| FetchError::Transport(format!("http client: {e}")))?;
        Ok(Self { client })
    }
}

impl ArtifactSource for HttpArtifactFetcher {
    fn fetch(&self, url: &str) -> Result<TokenizerArtifact, FetchError> {
        let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl(format!("{url}: {e}")))?;
        debug!("GET {parsed}");
        let response = self.client
                           .get(parsed)
                           .send()
                           .map_err(|e| FetchError::Transport(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { status: status.as_u16() });
        }
        let body = response.bytes().map_err(|e| FetchError::Transport(format!("reading body: {e}")))?;
        debug!("GET {url} -> {status} ({} bytes)", body.len());
        TokenizerArtifact::from_bytes(url, body.to_vec())
    }
}
