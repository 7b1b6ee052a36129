use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect},
};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use syntra_domain::user::UserRole;
use syntra_domain::verification::VerificationStatus;
use syntra_session_types::{
    cookie::{SYNTRA_SESSION_TOKEN, clear_session_cookie, set_session_cookie},
    identity::Identity,
};

use crate::error::SyntraServiceError;
use crate::state::AppState;
use crate::usecase::session::{
    FederatedLoginUseCase, PasswordLoginInput, PasswordLoginUseCase, RefreshSessionUseCase,
    SessionOutput,
};

#[derive(Serialize)]
pub struct SessionResponse {
    pub user_id: Uuid,
    pub role: UserRole,
    pub verification_status: VerificationStatus,
    pub whatsapp: Option<String>,
    pub session_exp: u64,
}

impl SessionResponse {
    fn from_output(out: &SessionOutput) -> Self {
        Self {
            user_id: out.user.id,
            role: out.user.role,
            verification_status: out.user.verification_status,
            whatsapp: out.user.whatsapp.clone(),
            session_exp: out.session_exp,
        }
    }
}

// ── POST /api/session ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateSessionRequest {
    pub email: String,
    pub password: String,
}

pub async fn create_session(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<CreateSessionRequest>,
) -> Result<impl IntoResponse, SyntraServiceError> {
    let usecase = PasswordLoginUseCase {
        users: state.user_repo(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let out = usecase
        .execute(PasswordLoginInput {
            email: body.email,
            password: body.password,
        })
        .await?;

    let response = SessionResponse::from_output(&out);
    let jar = set_session_cookie(jar, out.session_token, state.cookie_domain.clone());
    Ok((StatusCode::CREATED, jar, Json(response)))
}

// ── GET /api/session ─────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct CheckSessionResponse {
    pub user_id: Uuid,
    pub role: UserRole,
    pub verification_status: VerificationStatus,
    pub whatsapp: Option<String>,
}

/// Read the claim as the gate injected it — deliberately the snapshot, not
/// the store, so the dashboard sees exactly what the gate enforces.
pub async fn check_session(identity: Identity) -> Json<CheckSessionResponse> {
    Json(CheckSessionResponse {
        user_id: identity.user_id,
        role: identity.role,
        verification_status: identity.verification_status,
        whatsapp: identity.whatsapp,
    })
}

// ── PATCH /api/session ───────────────────────────────────────────────────────

/// Explicit refresh after a Submit/Decide round trip. Re-reads the store and
/// re-mints the snapshot; the cookie value is the only caller input.
pub async fn refresh_session(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, SyntraServiceError> {
    let token_value = jar
        .get(SYNTRA_SESSION_TOKEN)
        .map(|c| c.value().to_owned())
        .ok_or(SyntraServiceError::Unauthorized)?;

    let usecase = RefreshSessionUseCase {
        users: state.user_repo(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let out = usecase.execute(&token_value).await?;

    let response = SessionResponse::from_output(&out);
    let jar = set_session_cookie(jar, out.session_token, state.cookie_domain.clone());
    Ok((StatusCode::CREATED, jar, Json(response)))
}

// ── DELETE /api/session ──────────────────────────────────────────────────────

pub async fn delete_session(
    State(state): State<AppState>,
    _identity: Identity,
    jar: CookieJar,
) -> Result<impl IntoResponse, SyntraServiceError> {
    let jar = clear_session_cookie(jar, state.cookie_domain.clone());
    Ok((StatusCode::NO_CONTENT, jar))
}

// ── GET /api/auth/callback/google ────────────────────────────────────────────

#[derive(Deserialize)]
pub struct OAuthCallbackQuery {
    pub code: String,
}

pub async fn oauth_callback(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<OAuthCallbackQuery>,
) -> Result<impl IntoResponse, SyntraServiceError> {
    let usecase = FederatedLoginUseCase {
        users: state.user_repo(),
        oauth: state.oauth.clone(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let out = usecase.execute(&query.code).await?;

    let jar = set_session_cookie(jar, out.session_token, state.cookie_domain.clone());
    Ok((jar, Redirect::temporary("/dashboard")))
}
