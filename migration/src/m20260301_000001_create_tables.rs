use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 用户表
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    .col(ColumnDef::new(Users::Status).string().not_null())
                    .col(ColumnDef::new(Users::DisplayName).string().null())
                    .col(ColumnDef::new(Users::AvatarUrl).string().null())
                    .col(ColumnDef::new(Users::LastLogin).big_integer().null())
                    .col(ColumnDef::new(Users::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 上传文件表（口语/演讲录音录像）
        manager
            .create_table(
                Table::create()
                    .table(Files::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Files::DownloadToken)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Files::StoredName).string().not_null())
                    .col(ColumnDef::new(Files::OriginalName).string().not_null())
                    .col(ColumnDef::new(Files::FileSize).big_integer().not_null())
                    .col(ColumnDef::new(Files::FileType).string().not_null())
                    .col(ColumnDef::new(Files::UserId).big_integer().not_null())
                    .col(ColumnDef::new(Files::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Files::Table, Files::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 演讲题库
        manager
            .create_table(
                Table::create()
                    .table(PresentationQuestions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PresentationQuestions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PresentationQuestions::Topic)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PresentationQuestions::Prompt)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PresentationQuestions::Difficulty)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PresentationQuestions::CreatedBy)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PresentationQuestions::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PresentationQuestions::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(PresentationQuestions::Table, PresentationQuestions::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 测评记录表（所有测评类型共用）
        manager
            .create_table(
                Table::create()
                    .table(Assessments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Assessments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Assessments::UserId).big_integer().not_null())
                    .col(ColumnDef::new(Assessments::Kind).string().not_null())
                    .col(ColumnDef::new(Assessments::Level).string().null())
                    .col(ColumnDef::new(Assessments::Language).string().null())
                    .col(ColumnDef::new(Assessments::Status).string().not_null())
                    .col(ColumnDef::new(Assessments::Score).double().null())
                    .col(ColumnDef::new(Assessments::MaxScore).double().not_null())
                    .col(ColumnDef::new(Assessments::Details).text().not_null())
                    .col(ColumnDef::new(Assessments::MediaToken).string().null())
                    .col(ColumnDef::new(Assessments::QuestionId).big_integer().null())
                    .col(ColumnDef::new(Assessments::Feedback).text().null())
                    .col(ColumnDef::new(Assessments::ReviewerId).big_integer().null())
                    .col(
                        ColumnDef::new(Assessments::CompletedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Assessments::ReviewedAt).big_integer().null())
                    .col(
                        ColumnDef::new(Assessments::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Assessments::Table, Assessments::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Assessments::Table, Assessments::ReviewerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 冷却期查询：(user, kind, level, language) 最近一次完成时间
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_assessments_cooldown")
                    .table(Assessments::Table)
                    .col(Assessments::UserId)
                    .col(Assessments::Kind)
                    .col(Assessments::Level)
                    .col(Assessments::Language)
                    .col(Assessments::CompletedAt)
                    .to_owned(),
            )
            .await?;

        // 待评审队列
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_assessments_status")
                    .table(Assessments::Table)
                    .col(Assessments::Status)
                    .col(Assessments::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_files_user_id")
                    .table(Files::Table)
                    .col(Files::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(Assessments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PresentationQuestions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Files::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    #[sea_orm(iden = "users")]
    Table,
    Id,
    Username,
    Email,
    PasswordHash,
    Role,
    Status,
    DisplayName,
    AvatarUrl,
    LastLogin,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Files {
    #[sea_orm(iden = "files")]
    Table,
    DownloadToken,
    StoredName,
    OriginalName,
    FileSize,
    FileType,
    UserId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum PresentationQuestions {
    #[sea_orm(iden = "presentation_questions")]
    Table,
    Id,
    Topic,
    Prompt,
    Difficulty,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Assessments {
    #[sea_orm(iden = "assessments")]
    Table,
    Id,
    UserId,
    Kind,
    Level,
    Language,
    Status,
    Score,
    MaxScore,
    Details,
    MediaToken,
    QuestionId,
    Feedback,
    ReviewerId,
    CompletedAt,
    ReviewedAt,
    CreatedAt,
}
