use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 联系表单提交表
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
                    .col(ColumnDef::new(Submissions::Name).text().not_null())
                    .col(ColumnDef::new(Submissions::Email).text().not_null())
                    .col(ColumnDef::new(Submissions::About).text().null())
                    .col(ColumnDef::new(Submissions::Prompt).text().not_null())
                    .col(
                        ColumnDef::new(Submissions::SubmissionDate)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // 列表按提交时间倒序
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_submissions_submission_date")
                    .table(Submissions::Table)
                    .col(Submissions::SubmissionDate)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Submissions::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Submissions {
    #[sea_orm(iden = "submissions")]
    Table,
    Id,
    Name,
    Email,
    About,
    Prompt,
    SubmissionDate,
}
