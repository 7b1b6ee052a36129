#![allow(async_fn_in_trait)]

use uuid::Uuid;

use syntra_domain::verification::VerificationStatus;

use crate::domain::types::{FederatedIdentity, OtpCode, PendingReview, User, VerificationRequest};
use crate::error::SyntraServiceError;

/// Repository for user accounts (the identity store).
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, SyntraServiceError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, SyntraServiceError>;

    /// Insert a new user (federated sign-in path, no OTP round trip).
    async fn create(&self, user: &User) -> Result<(), SyntraServiceError>;

    /// Insert a new user and their email OTP atomically (same transaction).
    async fn create_with_otp(
        &self,
        user: &User,
        otp: &OtpCode,
    ) -> Result<(), SyntraServiceError>;

    /// Stamp `email_verified_at` after a successful OTP check.
    async fn mark_email_verified(&self, id: Uuid) -> Result<(), SyntraServiceError>;
}

/// Repository for verification requests and their coupled user-status updates.
///
/// The two-row writes are the workflow's atomicity contract: the request row
/// and the owning user's `verification_status` change together or not at all.
pub trait VerificationRepository: Send + Sync {
    /// True if the user has a request with status PENDING or APPROVED.
    /// REJECTED rows do not count — they are the resubmission path.
    async fn has_open_or_approved(&self, user_id: Uuid) -> Result<bool, SyntraServiceError>;

    /// Atomically insert a PENDING request and set the owning user's
    /// `verification_status` to PENDING.
    async fn create_pending(
        &self,
        request: &VerificationRequest,
    ) -> Result<(), SyntraServiceError>;

    /// Atomically transition a request to `verdict` (storing `note` on
    /// reject) and mirror the value onto the owning user — only if the
    /// request is still PENDING.
    ///
    /// Errors: `RequestNotFound` for an unknown id, `RequestAlreadyDecided`
    /// if the request reached a terminal state first.
    async fn decide(
        &self,
        request_id: Uuid,
        verdict: VerificationStatus,
        note: Option<String>,
    ) -> Result<(VerificationRequest, User), SyntraServiceError>;

    /// Pending requests with submitter name/email, oldest first.
    async fn list_pending(&self) -> Result<Vec<PendingReview>, SyntraServiceError>;
}

/// Repository for one-time email verification codes.
pub trait OtpRepository: Send + Sync {
    /// Find a valid (unused, unexpired) code by email + code string.
    async fn find_valid(
        &self,
        email: &str,
        code: &str,
    ) -> Result<Option<OtpCode>, SyntraServiceError>;

    /// Mark a code as used (sets used_at = now).
    async fn mark_used(&self, id: Uuid) -> Result<(), SyntraServiceError>;
}

/// Port for the hosted object-storage collaborator.
pub trait ObjectStoragePort: Send + Sync {
    /// Upload an image blob, returning a durable HTTPS URL.
    async fn upload_image(
        &self,
        bytes: &[u8],
        folder: &str,
    ) -> Result<String, SyntraServiceError>;
}

/// Port for the transactional email collaborator.
pub trait MailerPort: Send + Sync {
    async fn send_otp_email(&self, to: &str, code: &str) -> Result<(), SyntraServiceError>;
}

/// Port for the OAuth identity provider collaborator.
pub trait OAuthPort: Send + Sync {
    /// Exchange an authorization code for the federated identity behind it.
    async fn exchange_code(&self, code: &str)
    -> Result<FederatedIdentity, SyntraServiceError>;
}
