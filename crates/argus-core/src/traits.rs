use std::future::Future;

use crate::error::AppError;
use crate::profile::IdentityProfile;
use crate::verdict::DecisionRecord;

/// Performs one HTTP GET under a specific browser identity.
pub trait HttpClient: Send + Sync + Clone {
    /// Fetches the body at `url`, presenting the headers of `profile`.
    fn get(
        &self,
        url: &str,
        profile: &IdentityProfile,
    ) -> impl Future<Output = Result<String, AppError>> + Send;
}

/// Fetches raw HTML content from a URL.
pub trait Fetcher: Send + Sync + Clone {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, AppError>> + Send;
}

/// Reduces raw HTML to its visible text.
pub trait Cleaner: Send + Sync + Clone {
    fn clean(&self, html: &str) -> Result<String, AppError>;
}

/// Asks a generative model whether page content describes an eligible agency.
pub trait Classifier: Send + Sync + Clone {
    /// Sends the page content to the model and returns its free-text reply.
    fn classify(&self, content: &str) -> impl Future<Output = Result<String, AppError>> + Send;
}

/// Appends finished screenings to durable storage.
pub trait DecisionLog: Send + Sync + Clone {
    fn append(&self, record: &DecisionRecord)
    -> impl Future<Output = Result<(), AppError>> + Send;
}

/// Delivers outcome emails to applicants.
pub trait Notifier: Send + Sync + Clone {
    fn notify(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> impl Future<Output = Result<(), AppError>> + Send;
}

/// A no-op DecisionLog for use when persistence is not needed.
#[derive(Debug, Clone)]
pub struct NullLog;

impl DecisionLog for NullLog {
    async fn append(&self, _record: &DecisionRecord) -> Result<(), AppError> {
        Ok(())
    }
}
