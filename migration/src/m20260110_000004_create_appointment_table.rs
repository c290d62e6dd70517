use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260110_000001_create_user_table::User, m20260110_000002_create_master_table::Master,
};

/// Appointments reference their client and master through restricting foreign keys, so
/// people with booking history cannot be deleted. `service_id` is a plain indexed column:
/// a removed catalog entry leaves its appointments in place.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Appointment::Table)
                    .if_not_exists()
                    .col(pk_auto(Appointment::Id))
                    .col(integer(Appointment::ClientId))
                    .col(integer(Appointment::MasterId))
                    .col(integer(Appointment::ServiceId))
                    .col(date(Appointment::Date))
                    .col(time(Appointment::Time))
                    .col(string_len(Appointment::Status, 20))
                    .col(
                        timestamp_with_time_zone(Appointment::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(Appointment::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_appointment_client_id")
                            .from(Appointment::Table, Appointment::ClientId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_appointment_master_id")
                            .from(Appointment::Table, Appointment::MasterId)
                            .to(Master::Table, Master::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_appointment_master_date")
                    .table(Appointment::Table)
                    .col(Appointment::MasterId)
                    .col(Appointment::Date)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_appointment_service_id")
                    .table(Appointment::Table)
                    .col(Appointment::ServiceId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Appointment::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Appointment {
    #[sea_orm(iden = "appointments")]
    Table,
    Id,
    ClientId,
    MasterId,
    ServiceId,
    Date,
    Time,
    Status,
    CreatedAt,
    UpdatedAt,
}
