use sea_orm::entity::prelude::*;

/// User account. `role` and `verification_status` are stored as their
/// SCREAMING_SNAKE_CASE string values and mapped to domain enums in `infra`.
/// `verification_status` is written only by the verification workflow.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: Option<String>,
    #[sea_orm(unique)]
    pub email: String,
    /// Argon2id PHC string. Absent for OAuth-only accounts.
    pub hashed_password: Option<String>,
    pub image: Option<String>,
    pub whatsapp: Option<String>,
    pub role: String,
    pub verification_status: String,
    pub email_verified_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::verification_requests::Entity")]
    VerificationRequests,
    #[sea_orm(has_many = "super::otp_codes::Entity")]
    OtpCodes,
}

impl Related<super::verification_requests::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VerificationRequests.def()
    }
}

impl Related<super::otp_codes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OtpCodes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
