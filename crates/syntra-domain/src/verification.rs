//! Verification status domain type.

use serde::{Deserialize, Serialize};

/// Identity-verification state of a user or a verification request.
///
/// Wire format: SCREAMING_SNAKE_CASE string, identical in the session token
/// and in the `users.verification_status` / `verification_requests.status`
/// columns.
///
/// User lifecycle: `Unverified` → `Pending` → {`Approved`, `Rejected`};
/// a `Rejected` user returns to `Pending` only through a new submission.
/// Request lifecycle: `Pending` → {`Approved`, `Rejected`}, terminal
/// (`Unverified` never appears on a request row).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationStatus {
    Unverified,
    Pending,
    Approved,
    Rejected,
}

impl VerificationStatus {
    /// Parse from the stored string value. Returns `None` for unknown values.
    pub fn from_str_value(v: &str) -> Option<Self> {
        match v {
            "UNVERIFIED" => Some(Self::Unverified),
            "PENDING" => Some(Self::Pending),
            "APPROVED" => Some(Self::Approved),
            "REJECTED" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Stored string value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unverified => "UNVERIFIED",
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
        }
    }

    /// Terminal states admit no further workflow-driven transition for the
    /// same request row.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}
