use chrono::{NaiveDate, Utc};
use sea_orm::DatabaseConnection;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{error::AppError, service::report::ReportService};

/// Starts the daily report scheduler.
///
/// On every tick of `cron` (six fields, evaluated in UTC) the report for the previous UTC
/// day is generated and stored. A failed run is logged and retried only on the next tick.
///
/// # Arguments
/// - `db`: Database connection
/// - `cron`: Cron expression, `0 5 0 * * *` by default
pub async fn start_scheduler(db: DatabaseConnection, cron: &str) -> Result<(), AppError> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_async(cron, move |_uuid, _lock| {
        let db = db.clone();

        Box::pin(async move {
            let Some(date) = previous_day(Utc::now().date_naive()) else {
                return;
            };

            if let Err(e) = ReportService::new(&db).generate_for_date(date).await {
                tracing::error!("Failed to generate daily report for {}: {}", date, e);
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Daily report scheduler started with schedule '{}'", cron);

    Ok(())
}

fn previous_day(today: NaiveDate) -> Option<NaiveDate> {
    today.pred_opt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn previous_day_crosses_month_and_year() {
        let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();

        assert_eq!(previous_day(date(2024, 3, 1)), Some(date(2024, 2, 29)));
        assert_eq!(previous_day(date(2025, 1, 1)), Some(date(2024, 12, 31)));
    }

    #[tokio::test]
    async fn rejects_malformed_cron() {
        let db = sea_orm::Database::connect("sqlite::memory:").await.unwrap();

        let result = start_scheduler(db, "every night").await;

        assert!(matches!(result, Err(AppError::SchedulerErr(_))));
    }
}
