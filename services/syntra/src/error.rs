use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Syntra service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum SyntraServiceError {
    #[error("all fields are required, including a valid id image")]
    InvalidSubmission,
    #[error("a verification request is already pending or approved")]
    DuplicateRequest,
    #[error("id image upload failed, check your connection and try again")]
    StorageFailure,
    #[error("a rejection reason is required")]
    MissingRejectionReason,
    #[error("verification request not found")]
    RequestNotFound,
    #[error("verification request already decided")]
    RequestAlreadyDecided,
    #[error("no account found for this email")]
    NoSuchUser,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("user already exists")]
    UserAlreadyExists,
    #[error("invalid or expired otp")]
    InvalidOtp,
    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl SyntraServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidSubmission => "INVALID_SUBMISSION",
            Self::DuplicateRequest => "DUPLICATE_REQUEST",
            Self::StorageFailure => "STORAGE_FAILURE",
            Self::MissingRejectionReason => "MISSING_REJECTION_REASON",
            Self::RequestNotFound => "REQUEST_NOT_FOUND",
            Self::RequestAlreadyDecided => "REQUEST_ALREADY_DECIDED",
            Self::NoSuchUser => "NO_SUCH_USER",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::UserAlreadyExists => "USER_ALREADY_EXISTS",
            Self::InvalidOtp => "INVALID_OTP",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for SyntraServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidSubmission | Self::MissingRejectionReason | Self::InvalidOtp => {
                StatusCode::BAD_REQUEST
            }
            Self::NoSuchUser | Self::InvalidCredentials | Self::Unauthorized => {
                StatusCode::UNAUTHORIZED
            }
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::RequestNotFound => StatusCode::NOT_FOUND,
            Self::DuplicateRequest | Self::RequestAlreadyDecided | Self::UserAlreadyExists => {
                StatusCode::CONFLICT
            }
            Self::StorageFailure => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 500s only — tower-http TraceLayer already records method/uri/status for all
        // requests. 4xx are expected client errors; logging them here would be noise.
        // Internal errors need the anyhow chain logged so the root cause is traceable.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
