use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::error::SyntraServiceError;
use crate::state::AppState;
use crate::usecase::register::{RegisterInput, RegisterUseCase, VerifyOtpInput, VerifyOtpUseCase};

// ── POST /api/register ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Serialize)]
pub struct RegisterResponse {
    pub message: &'static str,
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<impl axum::response::IntoResponse, SyntraServiceError> {
    let usecase = RegisterUseCase {
        users: state.user_repo(),
        otps: state.otp_repo(),
        mailer: state.mailer.clone(),
    };
    usecase
        .execute(RegisterInput {
            email: body.email,
            password: body.password,
            name: body.name,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "otp sent",
        }),
    ))
}

// ── POST /api/verify-otp ─────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct VerifyOtpRequest {
    pub email: String,
    pub code: String,
}

#[derive(Serialize)]
pub struct VerifyOtpResponse {
    pub message: &'static str,
}

pub async fn verify_otp(
    State(state): State<AppState>,
    Json(body): Json<VerifyOtpRequest>,
) -> Result<Json<VerifyOtpResponse>, SyntraServiceError> {
    let usecase = VerifyOtpUseCase {
        users: state.user_repo(),
        otps: state.otp_repo(),
    };
    usecase
        .execute(VerifyOtpInput {
            email: body.email,
            code: body.code,
        })
        .await?;
    Ok(Json(VerifyOtpResponse {
        message: "email verified",
    }))
}
