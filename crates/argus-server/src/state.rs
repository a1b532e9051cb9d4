use std::path::PathBuf;

use argus_client::classifier::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use argus_client::{
    GeminiClassifier, LettreMailer, MailerConfig, RetryingClient, VisibleTextCleaner,
};
use argus_core::error::AppError;
use argus_core::fetch::RotatingFetcher;
use argus_core::screen::ScreenService;
use argus_store::{CsvDecisionLog, DEFAULT_DECISIONS_PATH};

/// The concrete screening pipeline the server runs.
pub type Pipeline =
    ScreenService<RotatingFetcher<RetryingClient>, VisibleTextCleaner, GeminiClassifier, CsvDecisionLog>;

/// Server configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub decisions_csv: PathBuf,
    pub mailer: Option<MailerConfig>,
}

impl ServerConfig {
    /// Read configuration from environment variables.
    ///
    /// - `ARGUS_API_KEY` (required)
    /// - `ARGUS_MODEL` (optional, defaults to `gemini-2.5-flash`)
    /// - `ARGUS_BASE_URL` (optional, defaults to the Gemini compatibility endpoint)
    /// - `ARGUS_DECISIONS_CSV` (optional, defaults to `agency_decisions.csv`)
    /// - mail relay settings per [`MailerConfig::from_env`]
    pub fn from_env() -> Result<Self, AppError> {
        let api_key = std::env::var("ARGUS_API_KEY").map_err(|_| {
            AppError::ConfigError("ARGUS_API_KEY not set. Required for classification.".into())
        })?;

        let model = std::env::var("ARGUS_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let base_url =
            std::env::var("ARGUS_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let decisions_csv = std::env::var("ARGUS_DECISIONS_CSV")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DECISIONS_PATH));
        let mailer = MailerConfig::from_env()?;

        Ok(Self {
            api_key,
            model,
            base_url,
            decisions_csv,
            mailer,
        })
    }
}

/// Shared application state, available to all route handlers via `State<Arc<AppState>>`.
///
/// Every pipeline component is built here, once; handlers never read the
/// environment.
pub struct AppState {
    pub pipeline: Pipeline,
    pub mailer: Option<LettreMailer>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Result<Self, AppError> {
        let fetcher = RotatingFetcher::new(RetryingClient::new()?);
        let cleaner = VisibleTextCleaner::new();
        let classifier =
            GeminiClassifier::with_base_url(&config.api_key, &config.model, &config.base_url)?;
        let log = CsvDecisionLog::new(&config.decisions_csv);

        let mailer = match config.mailer {
            Some(mail_config) => Some(LettreMailer::new(mail_config)?),
            None => None,
        };

        Ok(Self {
            pipeline: ScreenService::with_log(fetcher, cleaner, classifier, log),
            mailer,
        })
    }
}
