use sea_orm_migration::prelude::*;

/// Partial unique index over the active bookings of a master's time slot.
///
/// Also run by the test schema builder, since entity-derived schemas carry no partial indexes.
pub const ACTIVE_SLOT_INDEX_SQL: &str =
    "CREATE UNIQUE INDEX IF NOT EXISTS idx_appointment_active_slot \
     ON appointments (master_id, date, time) \
     WHERE status <> 'cancelled'";

/// Rejects a second non-cancelled booking for the same master, date and time at the
/// store level, so concurrent bookings cannot both pass the service-level check.
///
/// Partial indexes are not expressible through the index builder, so the statement is
/// written by hand. The syntax is shared by SQLite and PostgreSQL.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(ACTIVE_SLOT_INDEX_SQL)
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP INDEX IF EXISTS idx_appointment_active_slot")
            .await?;

        Ok(())
    }
}
