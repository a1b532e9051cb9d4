//! Identity-rotating fetch strategy.

use crate::error::AppError;
use crate::profile::{BROWSER_PROFILES, IdentityProfile};
use crate::traits::{Fetcher, HttpClient};

/// Tries each browser identity profile in order until one yields a page.
///
/// Wraps any [`HttpClient`]. The client owns transport-level retries for a
/// single identity; this type moves on to the next identity once a client
/// call fails outright, and gives up only when the whole pool is exhausted.
#[derive(Debug, Clone)]
pub struct RotatingFetcher<C: HttpClient> {
    client: C,
    profiles: &'static [IdentityProfile],
}

impl<C: HttpClient> RotatingFetcher<C> {
    /// Creates a fetcher rotating through the full browser profile pool.
    pub fn new(client: C) -> Self {
        Self {
            client,
            profiles: &BROWSER_PROFILES,
        }
    }

    /// Creates a fetcher restricted to the given profiles, tried in order.
    pub fn with_profiles(client: C, profiles: &'static [IdentityProfile]) -> Self {
        Self { client, profiles }
    }
}

impl<C: HttpClient> Fetcher for RotatingFetcher<C> {
    async fn fetch(&self, url: &str) -> Result<String, AppError> {
        for (attempt, profile) in self.profiles.iter().enumerate() {
            match self.client.get(url, profile).await {
                Ok(body) => {
                    tracing::debug!("Fetched {} with profile {}", url, attempt);
                    return Ok(body);
                }
                Err(e) => {
                    tracing::warn!("Profile {} failed for {}: {}", attempt, url, e);
                }
            }
        }

        Err(AppError::FetchExhausted)
    }
}
