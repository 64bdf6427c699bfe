use crate::{RelayResponse, Result};
use relay_bundle::{SignedRequest, SIGNATURE_HEADER};
use relay_types::RelayConfig;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, instrument, warn};

/// Private relay client.
/// Posts signed bundle requests to a relay URL.
#[derive(Debug, Clone)]
pub struct RelayClient {
    /// The URL of the relay.
    url: reqwest::Url,
    /// The reqwest client used to send requests.
    client: reqwest::Client,
}

impl RelayClient {
    /// Create a new relay client with the given URL and client.
    pub const fn new_with_client(url: reqwest::Url, client: reqwest::Client) -> Self {
        Self { url, client }
    }

    /// Instantiate a new relay client with the given URL and a new reqwest
    /// client.
    pub fn new(url: reqwest::Url) -> Self {
        Self { url, client: reqwest::Client::new() }
    }

    /// Create a new relay client given a string URL.
    pub fn new_from_string(url: &str) -> Result<Self> {
        let url = reqwest::Url::parse(url)?;
        Ok(Self::new(url))
    }

    /// Create a new relay client for the relay in the configuration.
    pub fn from_config(config: &RelayConfig) -> Self {
        Self::new(config.relay_url().clone())
    }

    /// Get the relay URL.
    pub const fn url(&self) -> &reqwest::Url {
        &self.url
    }

    /// Get the client used to send requests
    pub const fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// Submit a signed request to the relay.
    ///
    /// The payload is posted exactly as it was signed. Exactly one attempt is
    /// made.
    #[instrument(skip_all, fields(
        method = %request.body().method(),
        block = request.body().block_number(),
    ))]
    pub async fn submit(&self, request: &SignedRequest) -> Result<RelayResponse> {
        let response = self
            .client
            .post(self.url.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(SIGNATURE_HEADER, request.header_value())
            .body(request.payload().to_vec())
            .send()
            .await
            .inspect_err(|e| warn!(%e, "Failed to reach relay"))?
            .error_for_status()
            .inspect_err(|e| warn!(%e, "Relay answered with an error status"))?;

        let body = response.bytes().await?;

        let response = RelayResponse::from_slice(&body, request.body().id())
            .inspect_err(|e| warn!(%e, "Failed to parse response from relay"))?;

        debug!(success = response.is_success(), "relay responded");
        Ok(response)
    }
}
