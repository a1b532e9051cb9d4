pub mod log;

pub use log::{CsvDecisionLog, DEFAULT_DECISIONS_PATH};
