use sea_orm::entity::prelude::*;

/// Identity-verification submission. Immutable once created except `status`
/// and `rejection_note`; a resubmission after rejection is a new row, never a
/// mutation of the old one.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "verification_requests")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub full_name: String,
    pub institution: String,
    pub matric_or_nysc: String,
    pub whatsapp: String,
    /// Durable HTTPS URL of the uploaded evidence image.
    pub id_image_url: String,
    pub status: String,
    pub rejection_note: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
