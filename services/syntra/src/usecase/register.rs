//! Registration and email-OTP verification.

use chrono::{Duration, Utc};
use rand::RngExt;
use uuid::Uuid;

use syntra_domain::user::UserRole;
use syntra_domain::verification::VerificationStatus;

use crate::domain::repository::{MailerPort, OtpRepository, UserRepository};
use crate::domain::types::{OTP_LEN, OTP_TTL_SECS, OtpCode, User};
use crate::error::SyntraServiceError;
use crate::usecase::password::hash_password;

/// Charset for generating OTP codes (digits only, typed from an email).
const CHARSET: &[u8] = b"0123456789";

fn generate_otp_code() -> String {
    let mut rng = rand::rng();
    (0..OTP_LEN)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}

// ── Register ─────────────────────────────────────────────────────────────────

pub struct RegisterInput {
    pub email: String,
    pub password: String,
    pub name: String,
}

pub struct RegisterUseCase<U, O, M>
where
    U: UserRepository,
    O: OtpRepository,
    M: MailerPort,
{
    pub users: U,
    pub otps: O,
    pub mailer: M,
}

impl<U, O, M> RegisterUseCase<U, O, M>
where
    U: UserRepository,
    O: OtpRepository,
    M: MailerPort,
{
    pub async fn execute(&self, input: RegisterInput) -> Result<(), SyntraServiceError> {
        if self.users.find_by_email(&input.email).await?.is_some() {
            return Err(SyntraServiceError::UserAlreadyExists);
        }

        let hashed = hash_password(&input.password)?;
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: Some(input.name),
            email: input.email.clone(),
            hashed_password: Some(hashed),
            image: None,
            whatsapp: None,
            role: UserRole::User,
            verification_status: VerificationStatus::Unverified,
            email_verified_at: None,
            created_at: now,
            updated_at: now,
        };

        let code = generate_otp_code();
        let otp = OtpCode {
            id: Uuid::new_v4(),
            user_id: user.id,
            email: input.email.clone(),
            code: code.clone(),
            expires_at: now + Duration::seconds(OTP_TTL_SECS),
            used_at: None,
            created_at: now,
        };

        // User + OTP in the same transaction.
        self.users.create_with_otp(&user, &otp).await?;

        // Awaited inline; there is no outbox, so a mailer failure fails the
        // whole registration request.
        self.mailer.send_otp_email(&input.email, &code).await?;
        Ok(())
    }
}

// ── VerifyOtp ────────────────────────────────────────────────────────────────

pub struct VerifyOtpInput {
    pub email: String,
    pub code: String,
}

pub struct VerifyOtpUseCase<U, O>
where
    U: UserRepository,
    O: OtpRepository,
{
    pub users: U,
    pub otps: O,
}

impl<U, O> VerifyOtpUseCase<U, O>
where
    U: UserRepository,
    O: OtpRepository,
{
    pub async fn execute(&self, input: VerifyOtpInput) -> Result<(), SyntraServiceError> {
        let otp = self
            .otps
            .find_valid(&input.email, &input.code)
            .await?
            .ok_or(SyntraServiceError::InvalidOtp)?;

        self.otps.mark_used(otp.id).await?;
        self.users.mark_email_verified(otp.user_id).await?;
        Ok(())
    }
}
