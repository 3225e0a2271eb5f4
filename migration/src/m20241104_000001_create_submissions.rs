use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建提交表
        manager
            .create_table(
                Table::create()
                    .table(Submissions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Submissions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Submissions::UserEmail).string().not_null())
                    .col(ColumnDef::new(Submissions::FileName).string().not_null())
                    // 文件内容直接存入数据库
                    .col(ColumnDef::new(Submissions::FileData).blob().not_null())
                    .col(ColumnDef::new(Submissions::Grading).string().null())
                    .col(
                        ColumnDef::new(Submissions::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Submissions::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 按提交者邮箱查询的索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_submissions_user_email")
                    .table(Submissions::Table)
                    .col(Submissions::UserEmail)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Submissions::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Submissions {
    #[sea_orm(iden = "submissions")]
    Table,
    Id,
    UserEmail,
    FileName,
    FileData,
    Grading,
    CreatedAt,
    UpdatedAt,
}
