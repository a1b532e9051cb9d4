use serde::{Deserialize, Serialize};

use argus_core::verdict::Screening;

// ---------------------------------------------------------------------------
// Screen
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct ScreenRequest {
    /// Website to screen
    pub url: String,
    /// Recipient for the outcome email (omit to skip notification)
    pub notify_email: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ScreenResponse {
    pub url: String,
    /// `Eligible`, `Not Eligible`, or `Uncertain`
    pub decision: String,
    pub rationale: String,
    /// Outcome of the email dispatch, present only when one was requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_status: Option<String>,
}

impl ScreenResponse {
    pub fn new(url: String, screening: Screening, email_status: Option<String>) -> Self {
        Self {
            url,
            decision: screening.verdict.to_string(),
            rationale: screening.rationale,
            email_status,
        }
    }
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub mailer: &'static str,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
