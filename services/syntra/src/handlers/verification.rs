use axum::{
    Json,
    extract::{Multipart, State},
};
use serde::Serialize;

use syntra_session_types::identity::Identity;

use crate::error::SyntraServiceError;
use crate::state::AppState;
use crate::usecase::verification::{SubmitVerificationInput, SubmitVerificationUseCase};

// ── POST /api/verification/submit ────────────────────────────────────────────

#[derive(Serialize)]
pub struct SubmitVerificationResponse {
    pub success: bool,
    pub message: &'static str,
}

/// Multipart form: fullName, institution, matricOrNysc, whatsapp, idImage.
/// Field-level validation (blank claims, empty image) happens in the use
/// case; this handler only collects the parts.
pub async fn submit_verification(
    State(state): State<AppState>,
    identity: Identity,
    mut multipart: Multipart,
) -> Result<Json<SubmitVerificationResponse>, SyntraServiceError> {
    let mut input = SubmitVerificationInput {
        full_name: String::new(),
        institution: String::new(),
        matric_or_nysc: String::new(),
        whatsapp: String::new(),
        id_image: Vec::new(),
    };

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| SyntraServiceError::InvalidSubmission)?
    {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };
        match name.as_str() {
            "fullName" => {
                input.full_name = field
                    .text()
                    .await
                    .map_err(|_| SyntraServiceError::InvalidSubmission)?;
            }
            "institution" => {
                input.institution = field
                    .text()
                    .await
                    .map_err(|_| SyntraServiceError::InvalidSubmission)?;
            }
            "matricOrNysc" => {
                input.matric_or_nysc = field
                    .text()
                    .await
                    .map_err(|_| SyntraServiceError::InvalidSubmission)?;
            }
            "whatsapp" => {
                input.whatsapp = field
                    .text()
                    .await
                    .map_err(|_| SyntraServiceError::InvalidSubmission)?;
            }
            "idImage" => {
                input.id_image = field
                    .bytes()
                    .await
                    .map_err(|_| SyntraServiceError::InvalidSubmission)?
                    .to_vec();
            }
            _ => {}
        }
    }

    let usecase = SubmitVerificationUseCase {
        requests: state.verification_repo(),
        storage: state.storage.clone(),
    };
    usecase.execute(identity.user_id, input).await?;

    Ok(Json(SubmitVerificationResponse {
        success: true,
        message: "Verification submitted. We'll review your ID shortly.",
    }))
}
