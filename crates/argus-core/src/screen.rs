use crate::error::AppError;
use crate::traits::{Classifier, Cleaner, DecisionLog, Fetcher, Notifier};
use crate::verdict::{DecisionRecord, Screening};

/// Orchestrates the full screening pipeline: fetch → clean → classify → parse → log.
///
/// Generic over all external dependencies via traits, enabling dependency injection
/// and testability without real HTTP, LLM, or filesystem work.
pub struct ScreenService<F, C, K, L>
where
    F: Fetcher,
    C: Cleaner,
    K: Classifier,
    L: DecisionLog,
{
    fetcher: F,
    cleaner: C,
    classifier: K,
    log: Option<L>,
}

impl<F, C, K, L> ScreenService<F, C, K, L>
where
    F: Fetcher,
    C: Cleaner,
    K: Classifier,
    L: DecisionLog,
{
    /// Create a new ScreenService without a decision log.
    pub fn new(fetcher: F, cleaner: C, classifier: K) -> Self {
        Self {
            fetcher,
            cleaner,
            classifier,
            log: None,
        }
    }

    /// Create a new ScreenService that appends every decision to `log`.
    pub fn with_log(fetcher: F, cleaner: C, classifier: K, log: L) -> Self {
        Self {
            fetcher,
            cleaner,
            classifier,
            log: Some(log),
        }
    }

    /// Run the full screening pipeline for a URL.
    ///
    /// 1. Fetch HTML, rotating browser identities until one works
    /// 2. Reduce the HTML to visible text
    /// 3. Ask the model for an eligibility ruling
    /// 4. Parse the reply into a verdict + rationale
    /// 5. Append the decision to the log (if one is configured)
    ///
    /// Fetch and clean failures abort the run: without page content there is
    /// nothing to rule on, so no record is written. A classifier failure is
    /// not terminal; it degrades to an Uncertain decision carrying the error
    /// text as rationale, and that decision is logged like any other.
    pub async fn screen(&self, url: &str) -> Result<Screening, AppError> {
        // 1. Fetch
        tracing::info!("Fetching {}", url);
        let html = self.fetcher.fetch(url).await?;
        tracing::info!("Fetched {} bytes of HTML", html.len());

        // 2. Clean
        let content = self.cleaner.clean(&html)?;
        tracing::info!("Reduced to {} bytes of visible text", content.len());

        // 3 & 4. Classify + parse
        let screening = match self.classifier.classify(&content).await {
            Ok(reply) => Screening::from_model_output(&reply),
            Err(e) => {
                tracing::warn!("Classifier failed for {}: {}", url, e);
                Screening::uncertain(e.to_string())
            }
        };
        tracing::info!("Decision for {}: {}", url, screening.verdict);

        // 5. Log
        if let Some(log) = &self.log {
            log.append(&DecisionRecord::new(url, &screening)).await?;
        }

        Ok(screening)
    }
}

/// Deliver the outcome email for a finished screening.
///
/// Returns the dispatch status line shown to the operator. A failed send is
/// reported in that line instead of failing the screening it belongs to.
pub async fn notify_applicant<N: Notifier>(
    notifier: &N,
    to: &str,
    screening: &Screening,
) -> String {
    let (subject, body) = screening.notification();
    match notifier.notify(to, subject, &body).await {
        Ok(()) => "Email sent successfully!".to_string(),
        Err(e) => format!("Error sending email: {e}"),
    }
}
