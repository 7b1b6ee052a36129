//! Session/claims propagation.
//!
//! Minting snapshots `{id, role, verification_status, whatsapp}` from the
//! user row into a signed token. The snapshot is deliberately a stale cache:
//! after a Submit or Decide, an existing token keeps its old claim until
//! re-login or an explicit refresh, and the access gate keeps enforcing the
//! old claim for up to the token lifetime.

use jsonwebtoken::{EncodingKey, Header, encode};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use syntra_domain::user::UserRole;
use syntra_domain::verification::VerificationStatus;
use syntra_session_types::claims::{SessionClaims, validate_session_token};
use syntra_session_types::cookie::SESSION_TOKEN_EXP;

use crate::domain::repository::{OAuthPort, UserRepository};
use crate::domain::types::User;
use crate::error::SyntraServiceError;
use crate::usecase::password::verify_password;

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before UNIX epoch")
        .as_secs()
}

/// Mint a session token from the user's current store row.
pub fn issue_session_token(
    user: &User,
    secret: &str,
) -> Result<(String, u64), SyntraServiceError> {
    let exp = now_secs() + SESSION_TOKEN_EXP;
    let claims = SessionClaims {
        sub: user.id.to_string(),
        role: user.role,
        verification_status: user.verification_status,
        whatsapp: user.whatsapp.clone(),
        exp,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| SyntraServiceError::Internal(e.into()))?;
    Ok((token, exp))
}

// ── PasswordLogin ────────────────────────────────────────────────────────────

pub struct PasswordLoginInput {
    pub email: String,
    pub password: String,
}

#[derive(Debug)]
pub struct SessionOutput {
    pub user: User,
    pub session_token: String,
    pub session_exp: u64,
}

pub struct PasswordLoginUseCase<U: UserRepository> {
    pub users: U,
    pub jwt_secret: String,
}

impl<U: UserRepository> PasswordLoginUseCase<U> {
    pub async fn execute(
        &self,
        input: PasswordLoginInput,
    ) -> Result<SessionOutput, SyntraServiceError> {
        let user = self
            .users
            .find_by_email(&input.email)
            .await?
            .ok_or(SyntraServiceError::NoSuchUser)?;

        // OAuth-only accounts carry no password credential; the credential
        // path treats them as unregistered.
        let stored = user
            .hashed_password
            .as_deref()
            .ok_or(SyntraServiceError::NoSuchUser)?;

        if !verify_password(&input.password, stored)? {
            return Err(SyntraServiceError::InvalidCredentials);
        }

        let (session_token, session_exp) = issue_session_token(&user, &self.jwt_secret)?;
        Ok(SessionOutput {
            user,
            session_token,
            session_exp,
        })
    }
}

// ── FederatedLogin ───────────────────────────────────────────────────────────

pub struct FederatedLoginUseCase<U: UserRepository, O: OAuthPort> {
    pub users: U,
    pub oauth: O,
    pub jwt_secret: String,
}

impl<U: UserRepository, O: OAuthPort> FederatedLoginUseCase<U, O> {
    /// Exchange the authorization code, then match-or-create the user by
    /// email. New federated accounts start UNVERIFIED with role USER and no
    /// password credential.
    pub async fn execute(&self, code: &str) -> Result<SessionOutput, SyntraServiceError> {
        let identity = self.oauth.exchange_code(code).await?;

        let user = match self.users.find_by_email(&identity.email).await? {
            Some(user) => user,
            None => {
                let now = chrono::Utc::now();
                let user = User {
                    id: Uuid::new_v4(),
                    name: identity.name,
                    email: identity.email,
                    hashed_password: None,
                    image: identity.image,
                    whatsapp: None,
                    role: UserRole::User,
                    verification_status: VerificationStatus::Unverified,
                    email_verified_at: Some(now),
                    created_at: now,
                    updated_at: now,
                };
                self.users.create(&user).await?;
                user
            }
        };

        let (session_token, session_exp) = issue_session_token(&user, &self.jwt_secret)?;
        Ok(SessionOutput {
            user,
            session_token,
            session_exp,
        })
    }
}

// ── RefreshSession ───────────────────────────────────────────────────────────

pub struct RefreshSessionUseCase<U: UserRepository> {
    pub users: U,
    pub jwt_secret: String,
}

impl<U: UserRepository> RefreshSessionUseCase<U> {
    /// Validate the presented token, then re-read the user row and mint a
    /// fresh snapshot. The store is authoritative here — caller-supplied
    /// claim fields are never trusted.
    pub async fn execute(&self, token_value: &str) -> Result<SessionOutput, SyntraServiceError> {
        let info = validate_session_token(token_value, &self.jwt_secret)
            .map_err(|_| SyntraServiceError::Unauthorized)?;

        let user = self
            .users
            .find_by_id(info.user_id)
            .await?
            .ok_or(SyntraServiceError::Unauthorized)?;

        let (session_token, session_exp) = issue_session_token(&user, &self.jwt_secret)?;
        Ok(SessionOutput {
            user,
            session_token,
            session_exp,
        })
    }
}
