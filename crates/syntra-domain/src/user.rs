//! User domain types.

use serde::{Deserialize, Serialize};

/// User permission level.
///
/// Wire format: SCREAMING_SNAKE_CASE string (`"USER"` / `"ADMIN"`), both in the
/// session token and in the `users.role` column. Independent of the
/// verification axis; the verification workflow never writes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    User,
    Admin,
}

impl UserRole {
    /// Parse from the stored string value. Returns `None` for unknown values.
    pub fn from_str_value(v: &str) -> Option<Self> {
        match v {
            "USER" => Some(Self::User),
            "ADMIN" => Some(Self::Admin),
            _ => None,
        }
    }

    /// Stored string value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Admin => "ADMIN",
        }
    }
}
