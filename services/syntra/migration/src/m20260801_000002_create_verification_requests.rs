use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(VerificationRequests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(VerificationRequests::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(VerificationRequests::UserId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(VerificationRequests::FullName)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(VerificationRequests::Institution)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(VerificationRequests::MatricOrNysc)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(VerificationRequests::Whatsapp)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(VerificationRequests::IdImageUrl)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(VerificationRequests::Status)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(VerificationRequests::RejectionNote).string())
                    .col(
                        ColumnDef::new(VerificationRequests::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(VerificationRequests::Table, VerificationRequests::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(VerificationRequests::Table)
                    .col(VerificationRequests::UserId)
                    .name("idx_verification_requests_user_id")
                    .to_owned(),
            )
            .await?;

        // The duplicate-submission guard filters on (user_id, status).
        manager
            .create_index(
                Index::create()
                    .table(VerificationRequests::Table)
                    .col(VerificationRequests::Status)
                    .name("idx_verification_requests_status")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(VerificationRequests::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum VerificationRequests {
    Table,
    Id,
    UserId,
    FullName,
    Institution,
    MatricOrNysc,
    Whatsapp,
    IdImageUrl,
    Status,
    RejectionNote,
    CreatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
