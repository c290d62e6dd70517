use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Report::Table)
                    .if_not_exists()
                    .col(pk_auto(Report::Id))
                    .col(date(Report::ReportDate))
                    .col(integer(Report::TotalClients).default(0))
                    .col(decimal_len(Report::TotalIncome, 10, 2).default(0))
                    .col(
                        timestamp_with_time_zone(Report::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_report_report_date")
                    .table(Report::Table)
                    .col(Report::ReportDate)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Report::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Report {
    #[sea_orm(iden = "reports")]
    Table,
    Id,
    ReportDate,
    TotalClients,
    TotalIncome,
    CreatedAt,
}
