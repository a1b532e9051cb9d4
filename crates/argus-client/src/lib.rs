pub mod classifier;
pub mod cleaner;
pub mod http;
pub mod mail;

pub use classifier::GeminiClassifier;
pub use cleaner::VisibleTextCleaner;
pub use http::{RetryPolicy, RetryingClient};
pub use mail::{LettreMailer, MailerConfig};
