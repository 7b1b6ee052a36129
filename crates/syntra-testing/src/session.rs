//! Mock session helpers for integration tests.
//!
//! The access gate validates the session JWT from the `syntra_session_token`
//! cookie on every request. `MockSession` mints real tokens with a test
//! secret so gate and handler tests need no login round trip.

use http::{HeaderName, HeaderValue};
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use syntra_domain::user::UserRole;
use syntra_domain::verification::VerificationStatus;
use syntra_session_types::claims::SessionClaims;
use syntra_session_types::cookie::SYNTRA_SESSION_TOKEN;

/// JWT secret shared by tests that mint and validate session tokens.
pub const TEST_JWT_SECRET: &str = "syntra-test-jwt-secret";

/// Configurable identity minted into a test session token.
pub struct MockSession {
    pub user_id: Uuid,
    pub role: UserRole,
    pub verification_status: VerificationStatus,
    pub whatsapp: Option<String>,
}

impl MockSession {
    pub fn new(role: UserRole, verification_status: VerificationStatus) -> Self {
        Self {
            user_id: Uuid::new_v4(),
            role,
            verification_status,
            whatsapp: None,
        }
    }

    /// Encode the identity as a session JWT signed with [`TEST_JWT_SECRET`],
    /// expiring one hour from now.
    pub fn token(&self) -> String {
        let exp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("system clock before UNIX epoch")
            .as_secs()
            + 3600;
        let claims = SessionClaims {
            sub: self.user_id.to_string(),
            role: self.role,
            verification_status: self.verification_status,
            whatsapp: self.whatsapp.clone(),
            exp,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
        )
        .expect("encode test session token")
    }

    /// `Cookie` header carrying the session token, as a browser would send it.
    pub fn cookie_header(&self) -> (HeaderName, HeaderValue) {
        let value = format!("{}={}", SYNTRA_SESSION_TOKEN, self.token());
        (
            http::header::COOKIE,
            HeaderValue::from_str(&value).expect("cookie header value"),
        )
    }
}
