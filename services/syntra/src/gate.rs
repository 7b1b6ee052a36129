//! The access gate: per-request authorization, evaluated before any handler.
//!
//! Page routes are classified PUBLIC / AUTH-PAGE / PRIVATE / RESTRICTED and
//! redirected accordingly; API and probe routes pass through and enforce
//! 401/403 in their handlers. The decision reads the session claim, never
//! the store — a stale claim keeps its access rights until refresh.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::CookieJar;

use syntra_domain::verification::VerificationStatus;
use syntra_session_types::claims::validate_session_token;
use syntra_session_types::cookie::SYNTRA_SESSION_TOKEN;
use syntra_session_types::identity::Identity;

/// State for the gate middleware, independent of the router state.
#[derive(Clone)]
pub struct GateConfig {
    pub jwt_secret: String,
}

/// Anyone can see these.
const PUBLIC_PREFIXES: &[&str] = &[
    "/api/auth",
    "/register",
    "/verify-email",
    "/signin",
    "/marketplace",
    "/explore",
];

/// Require `verification_status == APPROVED` in addition to a session.
const RESTRICTED_PREFIXES: &[&str] = &[
    "/admin",
    "/founders/create",
    "/marketplace/create",
    "/agent/upload",
];

pub fn is_public(path: &str) -> bool {
    path == "/" || PUBLIC_PREFIXES.iter().any(|p| path.starts_with(p))
}

pub fn is_restricted(path: &str) -> bool {
    RESTRICTED_PREFIXES.iter().any(|p| path.starts_with(p))
}

/// The whole signin family, including `/signin/email`.
pub fn is_auth_page(path: &str) -> bool {
    path.starts_with("/signin")
}

/// Redirect classification applies to page routes only. API handlers reply
/// 401/403 to their callers; probe endpoints answer anything.
pub fn is_page_route(path: &str) -> bool {
    !path.starts_with("/api/") && path != "/healthz" && path != "/readyz"
}

pub async fn access_gate(
    State(gate): State<GateConfig>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    let path = req.uri().path().to_owned();

    let claim = match jar.get(SYNTRA_SESSION_TOKEN) {
        None => None,
        Some(cookie) => match validate_session_token(cookie.value(), &gate.jwt_secret) {
            Ok(info) => Some(info),
            Err(err) => {
                // Fail OPEN on claim-extraction errors: a malformed or expired
                // token must not take the whole site down. Documented policy
                // choice — availability over strictness.
                tracing::warn!(error = %err, path = %path, "session claim invalid, failing open");
                return next.run(req).await;
            }
        },
    };

    if let Some(info) = &claim {
        req.extensions_mut().insert(Identity {
            user_id: info.user_id,
            role: info.role,
            verification_status: info.verification_status,
            whatsapp: info.whatsapp.clone(),
        });
    }

    if !is_page_route(&path) {
        return next.run(req).await;
    }

    // Ordering: the signin family is checked before the generic private gate,
    // and the verification lock applies only to authenticated callers.
    if is_auth_page(&path) {
        if claim.is_some() {
            return Redirect::temporary("/dashboard").into_response();
        }
        return next.run(req).await;
    }

    match &claim {
        None if !is_public(&path) => {
            let target = format!("/signin?callbackUrl={path}");
            Redirect::temporary(&target).into_response()
        }
        Some(info)
            if is_restricted(&path)
                && info.verification_status != VerificationStatus::Approved =>
        {
            Redirect::temporary("/verify").into_response()
        }
        _ => next.run(req).await,
    }
}
