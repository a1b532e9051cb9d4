//! Test utilities: mock implementations of all core traits.
//!
//! Handwritten mocks for dependency injection in unit tests.
//! All mocks use `Arc<Mutex<_>>` for interior mutability, allowing
//! test assertions on recorded calls.

use std::sync::{Arc, Mutex};

use crate::error::AppError;
use crate::profile::IdentityProfile;
use crate::traits::{Classifier, Cleaner, DecisionLog, Fetcher, HttpClient, Notifier};
use crate::verdict::DecisionRecord;

// ---------------------------------------------------------------------------
// MockHttpClient
// ---------------------------------------------------------------------------

/// Mock HTTP client recording which URL and identity each call used.
#[derive(Clone)]
pub struct MockHttpClient {
    /// Queue of responses. Each call pops the first element.
    responses: Arc<Mutex<Vec<Result<String, AppError>>>>,
    /// When set, every call fails regardless of the queue.
    fail_all: bool,
    /// Recorded calls as (url, user_agent) pairs.
    pub calls: Arc<Mutex<Vec<(String, &'static str)>>>,
}

impl MockHttpClient {
    pub fn with_responses(responses: Vec<Result<String, AppError>>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses)),
            fail_all: false,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A client where every request fails with an HTTP error.
    pub fn always_failing() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            fail_all: true,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> Vec<(String, &'static str)> {
        self.calls.lock().unwrap().clone()
    }
}

impl HttpClient for MockHttpClient {
    async fn get(&self, url: &str, profile: &IdentityProfile) -> Result<String, AppError> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), profile.user_agent));

        if self.fail_all {
            return Err(AppError::HttpError(format!("HTTP 500 for {url}")));
        }

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok("<html><body>default</body></html>".to_string())
        } else {
            responses.remove(0)
        }
    }
}

// ---------------------------------------------------------------------------
// MockFetcher
// ---------------------------------------------------------------------------

/// Mock fetcher that returns a configurable response.
#[derive(Clone)]
pub struct MockFetcher {
    /// Queue of responses. Each call pops the first element.
    /// If empty, returns a default HTML string.
    responses: Arc<Mutex<Vec<Result<String, AppError>>>>,
}

impl MockFetcher {
    pub fn new(html: &str) -> Self {
        Self {
            responses: Arc::new(Mutex::new(vec![Ok(html.to_string())])),
        }
    }

    pub fn with_error(error: AppError) -> Self {
        Self {
            responses: Arc::new(Mutex::new(vec![Err(error)])),
        }
    }
}

impl Fetcher for MockFetcher {
    async fn fetch(&self, _url: &str) -> Result<String, AppError> {
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok("<html><body>default</body></html>".to_string())
        } else {
            responses.remove(0)
        }
    }
}

// ---------------------------------------------------------------------------
// MockCleaner
// ---------------------------------------------------------------------------

/// Mock cleaner with passthrough, fixed-output, and failing modes.
#[derive(Clone)]
pub struct MockCleaner {
    fixed: Arc<Mutex<Option<String>>>,
    error: Arc<Mutex<Option<AppError>>>,
}

impl MockCleaner {
    /// Creates a cleaner that returns the input unchanged.
    pub fn passthrough() -> Self {
        Self {
            fixed: Arc::new(Mutex::new(None)),
            error: Arc::new(Mutex::new(None)),
        }
    }

    /// Creates a cleaner that returns `text` for any input.
    pub fn fixed(text: &str) -> Self {
        Self {
            fixed: Arc::new(Mutex::new(Some(text.to_string()))),
            error: Arc::new(Mutex::new(None)),
        }
    }

    /// Creates a cleaner that returns an error.
    pub fn with_error(error: AppError) -> Self {
        Self {
            fixed: Arc::new(Mutex::new(None)),
            error: Arc::new(Mutex::new(Some(error))),
        }
    }
}

impl Cleaner for MockCleaner {
    fn clean(&self, html: &str) -> Result<String, AppError> {
        let mut err = self.error.lock().unwrap();
        if let Some(e) = err.take() {
            return Err(e);
        }
        match self.fixed.lock().unwrap().as_ref() {
            Some(text) => Ok(text.clone()),
            None => Ok(html.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// MockClassifier
// ---------------------------------------------------------------------------

/// Mock classifier that replies with a configurable model output and
/// records the content it was asked about.
#[derive(Clone)]
pub struct MockClassifier {
    responses: Arc<Mutex<Vec<Result<String, AppError>>>>,
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl MockClassifier {
    pub fn new(reply: &str) -> Self {
        Self {
            responses: Arc::new(Mutex::new(vec![Ok(reply.to_string())])),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_error(error: AppError) -> Self {
        Self {
            responses: Arc::new(Mutex::new(vec![Err(error)])),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Classifier for MockClassifier {
    async fn classify(&self, content: &str) -> Result<String, AppError> {
        self.calls.lock().unwrap().push(content.to_string());

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok("Uncertain".to_string())
        } else {
            responses.remove(0)
        }
    }
}

// ---------------------------------------------------------------------------
// MockDecisionLog
// ---------------------------------------------------------------------------

/// Mock decision log that records appends in memory.
#[derive(Clone)]
pub struct MockDecisionLog {
    pub records: Arc<Mutex<Vec<DecisionRecord>>>,
    append_error: Arc<Mutex<Option<AppError>>>,
}

impl MockDecisionLog {
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
            append_error: Arc::new(Mutex::new(None)),
        }
    }

    /// Log that returns an error on append.
    pub fn with_append_error(error: AppError) -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
            append_error: Arc::new(Mutex::new(Some(error))),
        }
    }

    pub fn records(&self) -> Vec<DecisionRecord> {
        self.records.lock().unwrap().clone()
    }
}

impl Default for MockDecisionLog {
    fn default() -> Self {
        Self::new()
    }
}

impl DecisionLog for MockDecisionLog {
    async fn append(&self, record: &DecisionRecord) -> Result<(), AppError> {
        let mut err = self.append_error.lock().unwrap();
        if let Some(e) = err.take() {
            return Err(e);
        }
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// MockNotifier
// ---------------------------------------------------------------------------

/// Mock notifier that records every email as (to, subject, body).
#[derive(Clone)]
pub struct MockNotifier {
    pub sent: Arc<Mutex<Vec<(String, String, String)>>>,
    error: Arc<Mutex<Option<AppError>>>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            error: Arc::new(Mutex::new(None)),
        }
    }

    /// Notifier that fails to deliver.
    pub fn with_error(error: AppError) -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            error: Arc::new(Mutex::new(Some(error))),
        }
    }

    pub fn sent(&self) -> Vec<(String, String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

impl Default for MockNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for MockNotifier {
    async fn notify(&self, to: &str, subject: &str, body: &str) -> Result<(), AppError> {
        let mut err = self.error.lock().unwrap();
        if let Some(e) = err.take() {
            return Err(e);
        }
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), subject.to_string(), body.to_string()));
        Ok(())
    }
}
