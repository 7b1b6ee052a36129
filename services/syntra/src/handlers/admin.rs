use axum::{
    Json,
    extract::{Path, State},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use syntra_domain::user::UserRole;
use syntra_domain::verification::VerificationStatus;
use syntra_session_types::identity::Identity;

use crate::domain::repository::VerificationRepository;
use crate::error::SyntraServiceError;
use crate::state::AppState;
use crate::usecase::verification::{DecideVerificationUseCase, Decision};

fn require_admin(identity: &Identity) -> Result<(), SyntraServiceError> {
    if identity.role != UserRole::Admin {
        return Err(SyntraServiceError::Forbidden);
    }
    Ok(())
}

// ── GET /admin/verify ────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct PendingReviewResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub full_name: String,
    pub institution: String,
    pub matric_or_nysc: String,
    pub whatsapp: String,
    pub id_image_url: String,
    pub status: VerificationStatus,
    #[serde(serialize_with = "syntra_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    pub submitter_name: Option<String>,
    pub submitter_email: String,
}

pub async fn list_pending(
    State(state): State<AppState>,
    identity: Identity,
) -> Result<Json<Vec<PendingReviewResponse>>, SyntraServiceError> {
    require_admin(&identity)?;

    let reviews = state.verification_repo().list_pending().await?;

    let body = reviews
        .into_iter()
        .map(|r| PendingReviewResponse {
            id: r.request.id,
            user_id: r.request.user_id,
            full_name: r.request.full_name,
            institution: r.request.institution,
            matric_or_nysc: r.request.matric_or_nysc,
            whatsapp: r.request.whatsapp,
            id_image_url: r.request.id_image_url,
            status: r.request.status,
            created_at: r.request.created_at,
            submitter_name: r.submitter_name,
            submitter_email: r.submitter_email,
        })
        .collect();
    Ok(Json(body))
}

// ── POST /admin/verify/{id}/approve and /reject ──────────────────────────────

#[derive(Serialize)]
pub struct DecisionResponse {
    pub message: &'static str,
    pub request_id: Uuid,
    pub request_status: VerificationStatus,
    pub user_id: Uuid,
    pub user_verification_status: VerificationStatus,
}

pub async fn approve_request(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<Uuid>,
) -> Result<Json<DecisionResponse>, SyntraServiceError> {
    require_admin(&identity)?;

    let usecase = DecideVerificationUseCase {
        requests: state.verification_repo(),
    };
    let out = usecase.execute(id, Decision::Approve, None).await?;

    Ok(Json(DecisionResponse {
        message: "user approved successfully",
        request_id: out.request.id,
        request_status: out.request.status,
        user_id: out.user.id,
        user_verification_status: out.user.verification_status,
    }))
}

#[derive(Deserialize)]
pub struct RejectRequestBody {
    #[serde(rename = "rejectionNote")]
    pub rejection_note: Option<String>,
}

pub async fn reject_request(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<Uuid>,
    Json(body): Json<RejectRequestBody>,
) -> Result<Json<DecisionResponse>, SyntraServiceError> {
    require_admin(&identity)?;

    let usecase = DecideVerificationUseCase {
        requests: state.verification_repo(),
    };
    let out = usecase
        .execute(id, Decision::Reject, body.rejection_note)
        .await?;

    Ok(Json(DecisionResponse {
        message: "user rejected successfully",
        request_id: out.request.id,
        request_status: out.request.status,
        user_id: out.user.id,
        user_verification_status: out.user.verification_status,
    }))
}
