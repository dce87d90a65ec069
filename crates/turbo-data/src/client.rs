//! Storefront fetch client with per-dependency timeout and retry.

use std::collections::HashMap;
use std::time::Instant;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::dependency::DependencyTag;
use crate::retry::RetryPolicy;
use crate::timeout::TimeoutConfig;
use crate::FetchError;

/// Fetch policy combining timeout and retry configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchPolicy {
    /// Timeout configuration.
    pub timeout: TimeoutConfig,
    /// Retry policy.
    pub retry: RetryPolicy,
}

impl FetchPolicy {
    /// Create a new fetch policy.
    pub fn new(timeout: TimeoutConfig, retry: RetryPolicy) -> Self {
        Self { timeout, retry }
    }

    /// Create from a dependency tag's defaults.
    pub fn from_tag(tag: DependencyTag) -> Self {
        Self {
            timeout: TimeoutConfig::from_total(tag.default_timeout()),
            retry: RetryPolicy::new(tag.default_max_retries()),
        }
    }
}

/// JSON-over-HTTP client for the storefront API.
///
/// Paths are resolved against a base URL. Each request gets the timeout and
/// retry policy of its [`DependencyTag`], unless overridden.
#[derive(Debug, Clone)]
pub struct FetchClient {
    http: reqwest::Client,
    base_url: String,
    default_policy: Option<FetchPolicy>,
    overrides: HashMap<DependencyTag, FetchPolicy>,
}

impl FetchClient {
    /// Create a new client for `base_url`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, FetchError> {
        let base_url = base_url.into();
        reqwest::Url::parse(&base_url).map_err(|e| FetchError::InvalidUrl(format!("{base_url}: {e}")))?;

        Ok(Self {
            http: build_http(TimeoutConfig::default())?,
            base_url,
            default_policy: None,
            overrides: HashMap::new(),
        })
    }

    /// Set default policy for all fetches, replacing the per-tag defaults.
    ///
    /// The policy's connect timeout becomes the client-wide connect timeout.
    pub fn with_default_policy(mut self, policy: FetchPolicy) -> Result<Self, FetchError> {
        self.http = build_http(policy.timeout)?;
        self.default_policy = Some(policy);
        Ok(self)
    }

    /// Override the policy for a single dependency.
    ///
    /// Only the total timeout and retries apply per dependency. reqwest sets
    /// the connect timeout on the client, so it stays at the client-wide
    /// value; the per-request total still bounds the connect phase.
    pub fn with_policy(mut self, tag: DependencyTag, policy: FetchPolicy) -> Self {
        self.overrides.insert(tag, policy);
        self
    }

    /// Base URL requests are resolved against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Policy that applies to `tag`.
    pub fn policy_for(&self, tag: DependencyTag) -> FetchPolicy {
        self.overrides
            .get(&tag)
            .or(self.default_policy.as_ref())
            .cloned()
            .unwrap_or_else(|| FetchPolicy::from_tag(tag))
    }

    /// GET `path` and decode the JSON body, retrying transient failures.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        tag: DependencyTag,
    ) -> Result<T, FetchError> {
        let url = self.url(path);
        let policy = self.policy_for(tag);
        let mut attempt = 0;

        loop {
            let started = Instant::now();
            match self.get_once(&url, &policy).await {
                Ok(value) => {
                    debug!(
                        dependency = %tag,
                        url = %url,
                        attempt,
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "fetch succeeded"
                    );
                    return Ok(value);
                }
                Err(e) if policy.retry.should_retry(&e, attempt) => {
                    let delay = policy.retry.backoff.delay_for_attempt(attempt);
                    warn!(
                        dependency = %tag,
                        url = %url,
                        attempt,
                        error = %e,
                        delay_ms = delay.as_millis() as u64,
                        "fetch failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    warn!(dependency = %tag, url = %url, attempt, error = %e, "fetch failed");
                    return Err(e);
                }
            }
        }
    }

    async fn get_once<T: DeserializeOwned>(
        &self,
        url: &str,
        policy: &FetchPolicy,
    ) -> Result<T, FetchError> {
        let resp = self
            .http
            .get(url)
            .timeout(policy.timeout.total)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(FetchError::HttpError {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = resp.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

fn build_http(timeout: TimeoutConfig) -> Result<reqwest::Client, FetchError> {
    reqwest::Client::builder()
        .connect_timeout(timeout.connect)
        .build()
        .map_err(|e| FetchError::RequestError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_rejects_invalid_base_url() {
        assert!(matches!(
            FetchClient::new("not a url"),
            Err(FetchError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_url_joining() {
        let client = FetchClient::new("http://localhost:3333/").unwrap();
        assert_eq!(client.url("/stock/7"), "http://localhost:3333/stock/7");
        assert_eq!(client.url("products/7"), "http://localhost:3333/products/7");
    }

    #[test]
    fn test_policy_resolution() {
        let custom = FetchPolicy::new(
            TimeoutConfig::from_total(Duration::from_millis(100)),
            RetryPolicy::none(),
        );
        let client = FetchClient::new("http://localhost:3333").unwrap();
        assert_eq!(
            client.policy_for(DependencyTag::Inventory),
            FetchPolicy::from_tag(DependencyTag::Inventory)
        );

        let client = client
            .with_default_policy(custom.clone())
            .unwrap()
            .with_policy(DependencyTag::Catalog, FetchPolicy::default());
        assert_eq!(client.policy_for(DependencyTag::Inventory), custom);
        assert_eq!(client.policy_for(DependencyTag::Catalog), FetchPolicy::default());
    }
}
