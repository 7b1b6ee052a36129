use sea_orm::DatabaseConnection;

use crate::infra::db::{DbOtpRepository, DbUserRepository, DbVerificationRepository};
use crate::infra::mailer::SmtpMailer;
use crate::infra::oauth::GoogleOAuth;
use crate::infra::storage::HttpObjectStorage;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub jwt_secret: String,
    pub cookie_domain: String,
    pub storage: HttpObjectStorage,
    pub mailer: SmtpMailer,
    pub oauth: GoogleOAuth,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn verification_repo(&self) -> DbVerificationRepository {
        DbVerificationRepository {
            db: self.db.clone(),
        }
    }

    pub fn otp_repo(&self) -> DbOtpRepository {
        DbOtpRepository {
            db: self.db.clone(),
        }
    }
}
