//! Report factory for creating stored daily reports.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Inserts a report row with the given figures.
pub async fn create_report(
    db: &DatabaseConnection,
    report_date: NaiveDate,
    total_clients: i32,
    total_income: Decimal,
) -> Result<entity::report::Model, DbErr> {
    entity::report::ActiveModel {
        report_date: ActiveValue::Set(report_date),
        total_clients: ActiveValue::Set(total_clients),
        total_income: ActiveValue::Set(total_income),
        created_at: ActiveValue::Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}
