use sea_orm_migration::{prelude::*, schema::*};

use super::m20260110_000001_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Master::Table)
                    .if_not_exists()
                    .col(pk_auto(Master::Id))
                    .col(string_len(Master::Name, 100))
                    .col(string_len_null(Master::Specialization, 100))
                    .col(integer(Master::Experience).default(0))
                    .col(decimal_len(Master::Rating, 3, 2).default(0))
                    .col(integer_null(Master::UserId))
                    .col(
                        timestamp_with_time_zone(Master::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_master_user_id")
                            .from(Master::Table, Master::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Master::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Master {
    #[sea_orm(iden = "masters")]
    Table,
    Id,
    Name,
    Specialization,
    Experience,
    Rating,
    UserId,
    CreatedAt,
}
