//! Decision parsing for model replies.
//!
//! The model answers in free text. The first line carries the verdict, the
//! remaining lines carry the rationale shown to applicants and reviewers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Eligibility decision for one screened website.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Eligible,
    #[serde(rename = "Not Eligible")]
    NotEligible,
    Uncertain,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Eligible => "Eligible",
            Verdict::NotEligible => "Not Eligible",
            Verdict::Uncertain => "Uncertain",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of screening one website: the verdict plus the model's rationale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screening {
    pub verdict: Verdict,
    pub rationale: String,
}

impl Screening {
    /// Derives a screening from the model's free-text reply.
    ///
    /// Only the first line is inspected for the verdict, case-insensitively.
    /// Any "not" on that line reads as a rejection, even in hedged phrasings
    /// like "Not sure, but eligible"; a line mentioning "eligible" without
    /// "not" reads as an approval (so "INELIGIBLE" approves too). Anything
    /// else is Uncertain. The remaining lines, trimmed and joined with
    /// spaces, become the rationale.
    pub fn from_model_output(output: &str) -> Self {
        let mut lines = output.lines();
        let Some(first) = lines.next() else {
            return Self {
                verdict: Verdict::Uncertain,
                rationale: String::new(),
            };
        };

        let heading = first.trim().to_lowercase();
        let verdict = if heading.contains("not") {
            Verdict::NotEligible
        } else if heading.contains("eligible") {
            Verdict::Eligible
        } else {
            Verdict::Uncertain
        };

        let rationale = lines
            .map(str::trim)
            .collect::<Vec<_>>()
            .join(" ")
            .trim()
            .to_string();

        Self { verdict, rationale }
    }

    /// A screening recording that no decision could be obtained.
    pub fn uncertain(rationale: impl Into<String>) -> Self {
        Self {
            verdict: Verdict::Uncertain,
            rationale: rationale.into(),
        }
    }

    /// Subject and body of the outcome email for this screening.
    ///
    /// Approvals get the welcome message; everything else, Uncertain
    /// included, gets the rejection notice.
    pub fn notification(&self) -> (&'static str, String) {
        match self.verdict {
            Verdict::Eligible => (
                "Welcome to Our Platform!",
                format!(
                    "Congratulations! Your agency has been approved. {}",
                    self.rationale
                ),
            ),
            Verdict::NotEligible | Verdict::Uncertain => {
                ("Application Rejected", self.rationale.clone())
            }
        }
    }
}

/// One row of the append-only decision log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionRecord {
    pub url: String,
    pub decision: Verdict,
    pub reasoning: String,
}

impl DecisionRecord {
    pub fn new(url: impl Into<String>, screening: &Screening) -> Self {
        Self {
            url: url.into(),
            decision: screening.verdict,
            reasoning: screening.rationale.clone(),
        }
    }
}
