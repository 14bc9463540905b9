//! HTTP gateway to the Vultr v2 instance API.
//!
//! [`VultrClient`] issues exactly one request per [`crate::api::InstanceApi`]
//! call. Successful bodies are decoded into the types in [`crate::api`];
//! failed ones become [`VultrError::Api`] carrying the provider's message.

mod envelopes;
mod error;
mod instances;

use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::VultrConfig;

pub use error::VultrError;

/// Client for the Vultr instance API.
#[derive(Clone, Debug)]
pub struct VultrClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
}

impl VultrClient {
    /// Constructs a client from validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`VultrError::Config`] when the configuration fails validation
    /// or the API URL cannot carry a path, and [`VultrError::Transport`] when
    /// the HTTP client cannot be built.
    pub fn new(config: &VultrConfig) -> Result<Self, VultrError> {
        config.validate()?;
        let base_url = Url::parse(config.api_url.trim())
            .map_err(|err| VultrError::Config(format!("invalid API URL: {err}")))?;
        if base_url.cannot_be_a_base() {
            return Err(VultrError::Config(format!(
                "invalid API URL: {base_url} cannot carry a path"
            )));
        }
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .user_agent(concat!("vultr-cli/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url,
            api_key: config.api_key()?.to_owned(),
        })
    }

    /// Each segment is percent-encoded, so ids and addresses never add path
    /// components of their own.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, VultrError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| VultrError::Config(format!("invalid API URL: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder, VultrError> {
        let url = self.endpoint(segments)?;
        debug!(%method, %url, "sending API request");
        Ok(self.http.request(method, url).bearer_auth(&self.api_key))
    }

    async fn execute(builder: RequestBuilder) -> Result<Vec<u8>, VultrError> {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        debug!(status = status.as_u16(), bytes = body.len(), "received API response");

        if status.is_success() {
            return Ok(body.to_vec());
        }
        Err(VultrError::from_response(status, &body))
    }

    async fn execute_empty(builder: RequestBuilder) -> Result<(), VultrError> {
        Self::execute(builder).await.map(|_| ())
    }

    async fn execute_json<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, VultrError> {
        let body = Self::execute(builder).await?;
        serde_json::from_slice(&body).map_err(|err| VultrError::Decode {
            message: err.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn client(api_url: &str) -> VultrClient {
        let config = VultrConfig {
            api_key: Some(String::from("key")),
            api_url: String::from(api_url),
            request_timeout_secs: 5,
        };
        VultrClient::new(&config).unwrap_or_else(|err| panic!("client should build: {err}"))
    }

    #[rstest]
    #[case::plain("http://127.0.0.1:9/v2", &["instances", "abc123", "start"], "http://127.0.0.1:9/v2/instances/abc123/start")]
    #[case::trailing_slash("http://127.0.0.1:9/v2/", &["instances"], "http://127.0.0.1:9/v2/instances")]
    #[case::bare_host("http://127.0.0.1:9", &["instances"], "http://127.0.0.1:9/instances")]
    #[case::traversal_id(
        "http://127.0.0.1:9/v2",
        &["instances", "abc/../../x"],
        "http://127.0.0.1:9/v2/instances/abc%2F..%2F..%2Fx"
    )]
    #[case::ipv6_address(
        "http://127.0.0.1:9/v2",
        &["instances", "abc123", "ipv6", "reverse", "2001:db8::1"],
        "http://127.0.0.1:9/v2/instances/abc123/ipv6/reverse/2001:db8::1"
    )]
    fn endpoints_encode_each_segment(
        #[case] api_url: &str,
        #[case] segments: &[&str],
        #[case] expected: &str,
    ) {
        let url = client(api_url)
            .endpoint(segments)
            .unwrap_or_else(|err| panic!("endpoint: {err}"));
        assert_eq!(url.as_str(), expected);
    }

    #[rstest]
    #[case::not_a_url("api.vultr.com")]
    #[case::cannot_be_a_base("mailto:ops@example.com")]
    fn unusable_api_urls_are_rejected(#[case] api_url: &str) {
        let config = VultrConfig {
            api_key: Some(String::from("key")),
            api_url: String::from(api_url),
            request_timeout_secs: 5,
        };

        let err = VultrClient::new(&config).expect_err("url should be rejected");

        assert!(matches!(err, VultrError::Config(_)), "unexpected: {err:?}");
    }
}
