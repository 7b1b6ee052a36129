use chrono::{DateTime, Utc};
use uuid::Uuid;

use syntra_domain::user::UserRole;
use syntra_domain::verification::VerificationStatus;

/// User account row. `verification_status` is the single source of truth for
/// authorization; only the verification workflow writes it.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: String,
    /// Argon2id PHC string. Absent for OAuth-only accounts.
    pub hashed_password: Option<String>,
    pub image: Option<String>,
    pub whatsapp: Option<String>,
    pub role: UserRole,
    pub verification_status: VerificationStatus,
    pub email_verified_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One identity-verification submission. Immutable after creation except for
/// `status` and `rejection_note`.
#[derive(Debug, Clone)]
pub struct VerificationRequest {
    pub id: Uuid,
    pub user_id: Uuid,
    pub full_name: String,
    pub institution: String,
    pub matric_or_nysc: String,
    pub whatsapp: String,
    pub id_image_url: String,
    pub status: VerificationStatus,
    pub rejection_note: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A pending request joined with its submitter, for the admin review queue.
#[derive(Debug, Clone)]
pub struct PendingReview {
    pub request: VerificationRequest,
    pub submitter_name: Option<String>,
    pub submitter_email: String,
}

/// One-time email verification code.
#[derive(Debug, Clone)]
pub struct OtpCode {
    pub id: Uuid,
    pub user_id: Uuid,
    pub email: String,
    pub code: String,
    pub expires_at: DateTime<Utc>,
    pub used_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl OtpCode {
    pub fn is_valid(&self) -> bool {
        self.used_at.is_none() && self.expires_at > Utc::now()
    }
}

/// Federated identity returned by the OAuth collaborator after a successful
/// authorization-code exchange.
#[derive(Debug, Clone)]
pub struct FederatedIdentity {
    pub email: String,
    pub name: Option<String>,
    pub image: Option<String>,
}

/// OTP code length in digits.
pub const OTP_LEN: usize = 6;

/// OTP time-to-live in seconds.
pub const OTP_TTL_SECS: i64 = 600;

/// Object-storage folder hint for verification evidence images.
pub const EVIDENCE_FOLDER: &str = "syntra-verification-ids";
