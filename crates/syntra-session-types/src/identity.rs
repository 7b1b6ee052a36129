//! Gate-injected identity extractor.

use axum::extract::FromRequestParts;
use http::StatusCode;
use http::request::Parts;
use uuid::Uuid;

use syntra_domain::user::UserRole;
use syntra_domain::verification::VerificationStatus;

/// Validated session claim injected into request extensions by the access
/// gate before any handler runs.
///
/// Extraction returns 401 if the gate found no valid session token for the
/// request. Role enforcement (403) is done by handlers after extraction.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: Uuid,
    pub role: UserRole,
    pub verification_status: VerificationStatus,
    pub whatsapp: Option<String>,
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    // axum-core 0.5 defines this as `fn -> impl Future + Send` (not `async fn`).
    // In Rust 1.82+ precise capturing, `async fn` captures lifetimes differently,
    // causing E0195. Fix: extract values synchronously, return a 'static async move block.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let identity = parts.extensions.get::<Identity>().cloned();
        async move { identity.ok_or(StatusCode::UNAUTHORIZED) }
    }
}
