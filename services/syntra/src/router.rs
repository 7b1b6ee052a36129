use axum::{
    Router, middleware,
    routing::{delete, get, patch, post},
};
use tower_http::trace::TraceLayer;

use syntra_core::health::{healthz, readyz};
use syntra_core::middleware::request_id_layer;

use crate::gate::{GateConfig, access_gate};
use crate::handlers::{
    admin::{approve_request, list_pending, reject_request},
    register::{register, verify_otp},
    session::{check_session, create_session, delete_session, oauth_callback, refresh_session},
    verification::submit_verification,
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let gate = GateConfig {
        jwt_secret: state.jwt_secret.clone(),
    };
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Registration + email OTP
        .route("/api/register", post(register))
        .route("/api/verify-otp", post(verify_otp))
        // Session
        .route("/api/session", get(check_session))
        .route("/api/session", post(create_session))
        .route("/api/session", patch(refresh_session))
        .route("/api/session", delete(delete_session))
        .route("/api/auth/callback/google", get(oauth_callback))
        // Verification workflow
        .route("/api/verification/submit", post(submit_verification))
        .route("/admin/verify", get(list_pending))
        .route("/admin/verify/{id}/approve", post(approve_request))
        .route("/admin/verify/{id}/reject", post(reject_request))
        // The gate runs before every handler; trace and request-id wrap it.
        .layer(middleware::from_fn_with_state(gate, access_gate))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
