pub mod error;
pub mod fetch;
pub mod profile;
pub mod screen;
pub mod traits;
pub mod verdict;

#[cfg(test)]
pub mod testutil;

pub use error::AppError;
pub use fetch::RotatingFetcher;
pub use profile::{BROWSER_PROFILES, IdentityProfile};
pub use screen::{ScreenService, notify_applicant};
pub use traits::{Classifier, Cleaner, DecisionLog, Fetcher, HttpClient, Notifier, NullLog};
pub use verdict::{DecisionRecord, Screening, Verdict};
