//! The verification workflow engine.
//!
//! Submit and Decide are the only writers of `users.verification_status`.
//! Both delegate their two-row updates to the repository's transactional
//! methods so the request row and the user row can never disagree.

use chrono::Utc;
use uuid::Uuid;

use syntra_domain::verification::VerificationStatus;

use crate::domain::repository::{ObjectStoragePort, VerificationRepository};
use crate::domain::types::{EVIDENCE_FOLDER, User, VerificationRequest};
use crate::error::SyntraServiceError;

// ── Submit ───────────────────────────────────────────────────────────────────

pub struct SubmitVerificationInput {
    pub full_name: String,
    pub institution: String,
    pub matric_or_nysc: String,
    pub whatsapp: String,
    pub id_image: Vec<u8>,
}

pub struct SubmitVerificationUseCase<R, S>
where
    R: VerificationRepository,
    S: ObjectStoragePort,
{
    pub requests: R,
    pub storage: S,
}

impl<R, S> SubmitVerificationUseCase<R, S>
where
    R: VerificationRepository,
    S: ObjectStoragePort,
{
    pub async fn execute(
        &self,
        user_id: Uuid,
        input: SubmitVerificationInput,
    ) -> Result<(), SyntraServiceError> {
        // 1. All claim fields present, evidence image non-empty.
        let blank = |s: &str| s.trim().is_empty();
        if blank(&input.full_name)
            || blank(&input.institution)
            || blank(&input.matric_or_nysc)
            || blank(&input.whatsapp)
            || input.id_image.is_empty()
        {
            return Err(SyntraServiceError::InvalidSubmission);
        }

        // 2. One open request per user. A REJECTED history does not block —
        // resubmission after rejection creates a new row.
        if self.requests.has_open_or_approved(user_id).await? {
            return Err(SyntraServiceError::DuplicateRequest);
        }

        // 3. Upload evidence before touching the store. A storage failure
        // aborts here with no partial record.
        let id_image_url = self
            .storage
            .upload_image(&input.id_image, EVIDENCE_FOLDER)
            .await?;

        // 4. Request row + user status flip, atomically.
        let request = VerificationRequest {
            id: Uuid::new_v4(),
            user_id,
            full_name: input.full_name,
            institution: input.institution,
            matric_or_nysc: input.matric_or_nysc,
            whatsapp: input.whatsapp,
            id_image_url,
            status: VerificationStatus::Pending,
            rejection_note: None,
            created_at: Utc::now(),
        };
        self.requests.create_pending(&request).await
    }
}

// ── Decide ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Reject,
}

#[derive(Debug)]
pub struct DecideVerificationOutput {
    pub request: VerificationRequest,
    pub user: User,
}

pub struct DecideVerificationUseCase<R: VerificationRepository> {
    pub requests: R,
}

impl<R: VerificationRepository> DecideVerificationUseCase<R> {
    pub async fn execute(
        &self,
        request_id: Uuid,
        decision: Decision,
        note: Option<String>,
    ) -> Result<DecideVerificationOutput, SyntraServiceError> {
        let (verdict, note) = match decision {
            Decision::Approve => (VerificationStatus::Approved, None),
            Decision::Reject => {
                let note = note
                    .filter(|n| !n.trim().is_empty())
                    .ok_or(SyntraServiceError::MissingRejectionReason)?;
                (VerificationStatus::Rejected, Some(note))
            }
        };

        let (request, user) = self.requests.decide(request_id, verdict, note).await?;
        Ok(DecideVerificationOutput { request, user })
    }
}
