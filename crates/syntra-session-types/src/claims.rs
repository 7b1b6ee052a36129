//! Session-token claims and validation.

use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use syntra_domain::user::UserRole;
use syntra_domain::verification::VerificationStatus;

/// Identity snapshot extracted from a validated session token.
///
/// The claim is a point-in-time cache of the user row, minted at login or
/// explicit refresh. It can lag the store for up to the token lifetime;
/// consumers authorize against the claim, never the store.
#[derive(Debug, Clone)]
pub struct SessionInfo {
    pub user_id: Uuid,
    pub role: UserRole,
    pub verification_status: VerificationStatus,
    pub whatsapp: Option<String>,
    pub session_exp: u64,
}

/// Errors returned by [`validate_session_token`].
#[derive(Debug, thiserror::Error)]
pub enum SessionTokenError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
}

/// JWT claims payload shared by token minting (session use cases) and
/// validation (access gate, handlers).
///
/// | Field | JWT claim | Meaning |
/// |-------|-----------|---------|
/// | `sub` | `sub` | user ID (UUID string) |
/// | `role` | custom | `"USER"` / `"ADMIN"` |
/// | `verification_status` | custom | `"UNVERIFIED"` / `"PENDING"` / `"APPROVED"` / `"REJECTED"` |
/// | `whatsapp` | custom, optional | contact number snapshot |
/// | `exp` | `exp` | expiration, seconds since epoch |
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub role: UserRole,
    pub verification_status: VerificationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whatsapp: Option<String>,
    pub exp: u64,
}

/// Decode and validate a session JWT, returning raw claims.
///
/// Validation: HS256, exp checked, required claims: `exp` + `sub`.
/// Default leeway = 60s tolerates clock skew across instances.
fn decode_session_jwt(token: &str, secret: &str) -> Result<SessionClaims, SessionTokenError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => SessionTokenError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature
        | jsonwebtoken::errors::ErrorKind::InvalidEcdsaKey
        | jsonwebtoken::errors::ErrorKind::InvalidRsaKey(_) => SessionTokenError::InvalidSignature,
        _ => SessionTokenError::Malformed,
    })?;

    Ok(data.claims)
}

/// Validate a session-cookie value, returning the parsed identity snapshot.
///
/// The access gate calls this on every request to extract the claim from the
/// session cookie; the session refresh flow calls it before re-reading the
/// user row.
pub fn validate_session_token(
    cookie_value: &str,
    secret: &str,
) -> Result<SessionInfo, SessionTokenError> {
    let claims = decode_session_jwt(cookie_value, secret)?;
    let user_id = claims
        .sub
        .parse::<Uuid>()
        .map_err(|_| SessionTokenError::Malformed)?;
    Ok(SessionInfo {
        user_id,
        role: claims.role,
        verification_status: claims.verification_status,
        whatsapp: claims.whatsapp,
        session_exp: claims.exp,
    })
}
