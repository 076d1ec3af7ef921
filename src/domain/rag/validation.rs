//! Interpretation of the safety validator's reply

use serde::{Deserialize, Serialize};

const APPROVAL_MARKER: &str = "APPROVED";
const REJECTION_MARKER: &str = "REJECTED";

/// Outcome of the safety check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationDecision {
    Approved,
    Rejected,
}

impl ValidationDecision {
    /// Classify a raw model reply.
    ///
    /// Matching is case-insensitive. A rejection marker wins over an approval
    /// marker; a reply with neither (including an empty reply) is a rejection.
    pub fn from_reply(reply: &str) -> Self {
        let normalized = reply.to_uppercase();

        if normalized.contains(REJECTION_MARKER) {
            Self::Rejected
        } else if normalized.contains(APPROVAL_MARKER) {
            Self::Approved
        } else {
            Self::Rejected
        }
    }

    pub fn is_approved(&self) -> bool {
        matches!(self, Self::Approved)
    }
}
