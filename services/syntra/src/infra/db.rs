use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use uuid::Uuid;

use syntra_domain::user::UserRole;
use syntra_domain::verification::VerificationStatus;
use syntra_schema::{otp_codes, users, verification_requests};

use crate::domain::repository::{OtpRepository, UserRepository, VerificationRepository};
use crate::domain::types::{OtpCode, PendingReview, User, VerificationRequest};
use crate::error::SyntraServiceError;

// ── User repository ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, SyntraServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        model.map(user_from_model).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, SyntraServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        model.map(user_from_model).transpose()
    }

    async fn create(&self, user: &User) -> Result<(), SyntraServiceError> {
        user_to_active_model(user)
            .insert(&self.db)
            .await
            .context("create user")?;
        Ok(())
    }

    async fn create_with_otp(
        &self,
        user: &User,
        otp: &OtpCode,
    ) -> Result<(), SyntraServiceError> {
        self.db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                let user = user.clone();
                let otp = otp.clone();
                Box::pin(async move {
                    user_to_active_model(&user).insert(txn).await?;
                    insert_otp_code(txn, &otp).await?;
                    Ok(())
                })
            })
            .await
            .context("create user with otp")?;
        Ok(())
    }

    async fn mark_email_verified(&self, id: Uuid) -> Result<(), SyntraServiceError> {
        let now = Utc::now();
        users::ActiveModel {
            id: Set(id),
            email_verified_at: Set(Some(now)),
            updated_at: Set(now),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("mark email verified")?;
        Ok(())
    }
}

// ── Verification repository ───────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbVerificationRepository {
    pub db: DatabaseConnection,
}

impl VerificationRepository for DbVerificationRepository {
    async fn has_open_or_approved(&self, user_id: Uuid) -> Result<bool, SyntraServiceError> {
        let count = verification_requests::Entity::find()
            .filter(verification_requests::Column::UserId.eq(user_id))
            .filter(verification_requests::Column::Status.is_in([
                VerificationStatus::Pending.as_str(),
                VerificationStatus::Approved.as_str(),
            ]))
            .count(&self.db)
            .await
            .context("count open verification requests")?;
        Ok(count > 0)
    }

    async fn create_pending(
        &self,
        request: &VerificationRequest,
    ) -> Result<(), SyntraServiceError> {
        self.db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                let request = request.clone();
                Box::pin(async move {
                    insert_verification_request(txn, &request).await?;
                    set_user_verification_status(txn, request.user_id, request.status).await?;
                    Ok(())
                })
            })
            .await
            .context("create pending verification request")?;
        Ok(())
    }

    async fn decide(
        &self,
        request_id: Uuid,
        verdict: VerificationStatus,
        note: Option<String>,
    ) -> Result<(VerificationRequest, User), SyntraServiceError> {
        let txn = self.db.begin().await.context("begin decide transaction")?;

        // Early returns drop the transaction, which rolls it back.
        let model = verification_requests::Entity::find_by_id(request_id)
            .one(&txn)
            .await
            .context("find verification request")?
            .ok_or(SyntraServiceError::RequestNotFound)?;

        // Status guard inside the transaction: a terminal request never
        // transitions again, even with two admins racing.
        if model.status != VerificationStatus::Pending.as_str() {
            return Err(SyntraServiceError::RequestAlreadyDecided);
        }

        let user_id = model.user_id;
        let mut request_active: verification_requests::ActiveModel = model.into();
        request_active.status = Set(verdict.as_str().to_owned());
        if note.is_some() {
            request_active.rejection_note = Set(note);
        }
        let request_model = request_active
            .update(&txn)
            .await
            .context("update verification request status")?;

        let user_model = users::ActiveModel {
            id: Set(user_id),
            verification_status: Set(verdict.as_str().to_owned()),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&txn)
        .await
        .context("update user verification status")?;

        txn.commit().await.context("commit decide transaction")?;
        Ok((request_from_model(request_model)?, user_from_model(user_model)?))
    }

    async fn list_pending(&self) -> Result<Vec<PendingReview>, SyntraServiceError> {
        let rows = verification_requests::Entity::find()
            .filter(
                verification_requests::Column::Status.eq(VerificationStatus::Pending.as_str()),
            )
            .find_also_related(users::Entity)
            .order_by_asc(verification_requests::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list pending verification requests")?;

        rows.into_iter()
            .map(|(request, user)| {
                let user = user.ok_or_else(|| {
                    SyntraServiceError::Internal(anyhow::anyhow!(
                        "verification request {} has no owning user",
                        request.id
                    ))
                })?;
                Ok(PendingReview {
                    request: request_from_model(request)?,
                    submitter_name: user.name,
                    submitter_email: user.email,
                })
            })
            .collect()
    }
}

// ── OTP repository ────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbOtpRepository {
    pub db: DatabaseConnection,
}

impl OtpRepository for DbOtpRepository {
    async fn find_valid(
        &self,
        email: &str,
        code: &str,
    ) -> Result<Option<OtpCode>, SyntraServiceError> {
        let now = Utc::now();
        let model = otp_codes::Entity::find()
            .filter(otp_codes::Column::Email.eq(email))
            .filter(otp_codes::Column::Code.eq(code))
            .filter(otp_codes::Column::UsedAt.is_null())
            .filter(otp_codes::Column::ExpiresAt.gt(now))
            .one(&self.db)
            .await
            .context("find valid otp")?;
        Ok(model.map(otp_from_model))
    }

    async fn mark_used(&self, id: Uuid) -> Result<(), SyntraServiceError> {
        let now = Utc::now();
        otp_codes::ActiveModel {
            id: Set(id),
            used_at: Set(Some(now)),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("mark otp used")?;
        Ok(())
    }
}

// ── Insert helpers (shared by transactional writes) ──────────────────────────

async fn insert_verification_request(
    txn: &DatabaseTransaction,
    request: &VerificationRequest,
) -> Result<(), sea_orm::DbErr> {
    verification_requests::ActiveModel {
        id: Set(request.id),
        user_id: Set(request.user_id),
        full_name: Set(request.full_name.clone()),
        institution: Set(request.institution.clone()),
        matric_or_nysc: Set(request.matric_or_nysc.clone()),
        whatsapp: Set(request.whatsapp.clone()),
        id_image_url: Set(request.id_image_url.clone()),
        status: Set(request.status.as_str().to_owned()),
        rejection_note: Set(request.rejection_note.clone()),
        created_at: Set(request.created_at),
    }
    .insert(txn)
    .await?;
    Ok(())
}

async fn set_user_verification_status(
    txn: &DatabaseTransaction,
    user_id: Uuid,
    status: VerificationStatus,
) -> Result<(), sea_orm::DbErr> {
    users::ActiveModel {
        id: Set(user_id),
        verification_status: Set(status.as_str().to_owned()),
        updated_at: Set(Utc::now()),
        ..Default::default()
    }
    .update(txn)
    .await?;
    Ok(())
}

async fn insert_otp_code(txn: &DatabaseTransaction, otp: &OtpCode) -> Result<(), sea_orm::DbErr> {
    otp_codes::ActiveModel {
        id: Set(otp.id),
        user_id: Set(otp.user_id),
        email: Set(otp.email.clone()),
        code: Set(otp.code.clone()),
        expires_at: Set(otp.expires_at),
        used_at: Set(None),
        created_at: Set(otp.created_at),
    }
    .insert(txn)
    .await?;
    Ok(())
}

// ── Model mapping ─────────────────────────────────────────────────────────────

fn user_to_active_model(user: &User) -> users::ActiveModel {
    users::ActiveModel {
        id: Set(user.id),
        name: Set(user.name.clone()),
        email: Set(user.email.clone()),
        hashed_password: Set(user.hashed_password.clone()),
        image: Set(user.image.clone()),
        whatsapp: Set(user.whatsapp.clone()),
        role: Set(user.role.as_str().to_owned()),
        verification_status: Set(user.verification_status.as_str().to_owned()),
        email_verified_at: Set(user.email_verified_at),
        created_at: Set(user.created_at),
        updated_at: Set(user.updated_at),
    }
}

fn user_from_model(model: users::Model) -> Result<User, SyntraServiceError> {
    let role = UserRole::from_str_value(&model.role).ok_or_else(|| {
        SyntraServiceError::Internal(anyhow::anyhow!("unknown role value: {}", model.role))
    })?;
    let verification_status = VerificationStatus::from_str_value(&model.verification_status)
        .ok_or_else(|| {
            SyntraServiceError::Internal(anyhow::anyhow!(
                "unknown verification status value: {}",
                model.verification_status
            ))
        })?;
    Ok(User {
        id: model.id,
        name: model.name,
        email: model.email,
        hashed_password: model.hashed_password,
        image: model.image,
        whatsapp: model.whatsapp,
        role,
        verification_status,
        email_verified_at: model.email_verified_at,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

fn request_from_model(
    model: verification_requests::Model,
) -> Result<VerificationRequest, SyntraServiceError> {
    let status = VerificationStatus::from_str_value(&model.status).ok_or_else(|| {
        SyntraServiceError::Internal(anyhow::anyhow!(
            "unknown verification status value: {}",
            model.status
        ))
    })?;
    Ok(VerificationRequest {
        id: model.id,
        user_id: model.user_id,
        full_name: model.full_name,
        institution: model.institution,
        matric_or_nysc: model.matric_or_nysc,
        whatsapp: model.whatsapp,
        id_image_url: model.id_image_url,
        status,
        rejection_note: model.rejection_note,
        created_at: model.created_at,
    })
}

fn otp_from_model(model: otp_codes::Model) -> OtpCode {
    OtpCode {
        id: model.id,
        user_id: model.user_id,
        email: model.email,
        code: model.code,
        expires_at: model.expires_at,
        used_at: model.used_at,
        created_at: model.created_at,
    }
}
