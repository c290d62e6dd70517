pub use sea_orm_migration::prelude::*;

mod m20260110_000001_create_user_table;
mod m20260110_000002_create_master_table;
mod m20260110_000003_create_service_table;
mod m20260110_000004_create_appointment_table;
mod m20260110_000005_create_report_table;
mod m20260114_000006_create_appointment_active_slot_index;

pub use m20260114_000006_create_appointment_active_slot_index::ACTIVE_SLOT_INDEX_SQL;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260110_000001_create_user_table::Migration),
            Box::new(m20260110_000002_create_master_table::Migration),
            Box::new(m20260110_000003_create_service_table::Migration),
            Box::new(m20260110_000004_create_appointment_table::Migration),
            Box::new(m20260110_000005_create_report_table::Migration),
            Box::new(m20260114_000006_create_appointment_active_slot_index::Migration),
        ]
    }
}
