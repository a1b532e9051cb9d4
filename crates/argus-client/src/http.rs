use std::time::Duration;

use argus_core::error::AppError;
use argus_core::profile::IdentityProfile;
use argus_core::traits::HttpClient;
use reqwest::Client;
use reqwest::header::{ACCEPT, ACCEPT_ENCODING, ACCEPT_LANGUAGE, USER_AGENT};
use url::Url;

/// Default per-attempt timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Cap on a single backoff pause.
const MAX_BACKOFF: Duration = Duration::from_secs(120);

/// Statuses worth retrying: rate limiting and transient server failures.
const RETRYABLE_STATUSES: [u16; 5] = [429, 500, 502, 503, 504];

/// Retry schedule applied to each URL + identity pair.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Extra attempts after the first request.
    pub max_retries: u32,
    /// Seed for exponential backoff, in seconds.
    pub backoff_factor: f64,
}

impl RetryPolicy {
    /// Whether a response status should be retried.
    pub fn is_retryable(status: u16) -> bool {
        RETRYABLE_STATUSES.contains(&status)
    }

    /// Pause before retry number `retry` (1-based):
    /// `backoff_factor * 2^(retry - 1)`, capped at [`MAX_BACKOFF`].
    pub fn backoff_delay(&self, retry: u32) -> Duration {
        let exp = retry.saturating_sub(1).min(30);
        let secs = (self.backoff_factor * 2f64.powi(exp as i32)).max(0.0);
        Duration::from_secs_f64(secs).min(MAX_BACKOFF)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            backoff_factor: 0.5,
        }
    }
}

/// HTTP client that retries transient failures with exponential backoff.
///
/// One [`get`](HttpClient::get) makes up to `1 + max_retries` requests, all
/// under the same browser identity. Retryable statuses and connection-level
/// failures consume retry budget; any other non-success status is surfaced
/// immediately.
#[derive(Clone)]
pub struct RetryingClient {
    client: Client,
    policy: RetryPolicy,
    timeout_secs: u64,
}

impl RetryingClient {
    pub fn new() -> Result<Self, AppError> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::HttpError(e.to_string()))?;

        Ok(Self {
            client,
            policy: RetryPolicy::default(),
            timeout_secs: timeout.as_secs(),
        })
    }

    /// Replace the default retry schedule.
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }
}

impl HttpClient for RetryingClient {
    async fn get(&self, url: &str, profile: &IdentityProfile) -> Result<String, AppError> {
        validate_scheme(url)?;

        let mut retry = 0u32;
        loop {
            let attempt = self
                .client
                .get(url)
                .header(USER_AGENT, profile.user_agent)
                .header(ACCEPT, profile.accept)
                .header(ACCEPT_LANGUAGE, profile.accept_language)
                .header(ACCEPT_ENCODING, profile.accept_encoding)
                .send()
                .await;

            match attempt {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return response.text().await.map_err(|e| {
                            AppError::HttpError(format!("Failed to read response body: {e}"))
                        });
                    }

                    if !RetryPolicy::is_retryable(status.as_u16())
                        || retry >= self.policy.max_retries
                    {
                        return Err(AppError::HttpError(format!(
                            "HTTP {} for {}",
                            status.as_u16(),
                            url
                        )));
                    }

                    tracing::debug!(
                        "HTTP {} for {}, retry {} of {}",
                        status.as_u16(),
                        url,
                        retry + 1,
                        self.policy.max_retries
                    );
                }
                Err(e) => {
                    let transient = e.is_timeout() || e.is_connect();
                    if !transient || retry >= self.policy.max_retries {
                        return Err(map_transport_error(e, self.timeout_secs));
                    }

                    tracing::debug!(
                        "{} for {}, retry {} of {}",
                        e,
                        url,
                        retry + 1,
                        self.policy.max_retries
                    );
                }
            }

            retry += 1;
            tokio::time::sleep(self.policy.backoff_delay(retry)).await;
        }
    }
}

fn map_transport_error(e: reqwest::Error, timeout_secs: u64) -> AppError {
    if e.is_timeout() {
        AppError::Timeout(timeout_secs)
    } else if e.is_connect() {
        AppError::NetworkError(format!("Connection failed: {e}"))
    } else {
        AppError::HttpError(e.to_string())
    }
}

/// Only `http` and `https` URLs are fetched.
fn validate_scheme(url: &str) -> Result<(), AppError> {
    let parsed = Url::parse(url).map_err(|e| AppError::HttpError(format!("Invalid URL: {e}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(AppError::HttpError(format!(
            "URL scheme '{scheme}' is not allowed (only http/https)"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_schedule_doubles_from_factor() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.backoff_delay(1), Duration::from_millis(500));
        assert_eq!(policy.backoff_delay(2), Duration::from_secs(1));
        assert_eq!(policy.backoff_delay(3), Duration::from_secs(2));
    }

    #[test]
    fn backoff_never_decreases() {
        let policy = RetryPolicy::default();
        let mut last = Duration::ZERO;
        for retry in 1..=40 {
            let delay = policy.backoff_delay(retry);
            assert!(delay >= last);
            last = delay;
        }
    }

    #[test]
    fn backoff_is_capped() {
        let policy = RetryPolicy {
            max_retries: 64,
            backoff_factor: 0.5,
        };
        assert_eq!(policy.backoff_delay(64), MAX_BACKOFF);
    }

    #[test]
    fn retryable_statuses_cover_rate_limits_and_server_errors() {
        for status in RETRYABLE_STATUSES {
            assert!(RetryPolicy::is_retryable(status));
        }
        for status in [200, 301, 400, 403, 404] {
            assert!(!RetryPolicy::is_retryable(status));
        }
    }

    #[test]
    fn default_policy_is_three_retries_seeded_at_half_a_second() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_retries, 3);
        assert!((policy.backoff_factor - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn scheme_validation_rejects_non_http() {
        assert!(validate_scheme("https://example.com").is_ok());
        assert!(validate_scheme("http://example.com").is_ok());

        let err = validate_scheme("file:///etc/passwd").unwrap_err();
        assert!(err.to_string().contains("not allowed"));

        assert!(validate_scheme("not a url").is_err());
    }
}
