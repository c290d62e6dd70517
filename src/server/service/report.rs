//! Daily report generation and report management.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::{appointment::AppointmentRepository, report::ReportRepository, service::ServiceRepository},
    error::AppError,
    model::report::{CreateReportParam, Report, UpdateReportParam},
};

/// Service generating daily reports and managing stored ones.
pub struct ReportService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ReportService<'a> {
    /// Creates a new ReportService instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `ReportService` - New service instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Aggregates the completed appointments of a date into a new stored report.
    ///
    /// Clients are counted once however many appointments they completed. Income is the sum
    /// of the performed services' prices; an appointment whose service no longer exists is
    /// logged and left out of the income.
    ///
    /// # Arguments
    /// - `date` - Day whose completed appointments are aggregated
    ///
    /// # Returns
    /// - `Ok(Report)` - The persisted report, zero totals when nothing was completed
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn generate_for_date(&self, date: NaiveDate) -> Result<Report, AppError> {
        let completed = AppointmentRepository::new(self.db)
            .get_completed_on(date)
            .await?;

        let service_repo = ServiceRepository::new(self.db);
        let mut prices: HashMap<i32, Option<Decimal>> = HashMap::new();
        let mut clients = HashSet::new();
        let mut total_income = Decimal::ZERO;

        for appointment in &completed {
            clients.insert(appointment.client_id);

            let price = match prices.get(&appointment.service_id) {
                Some(price) => *price,
                None => {
                    let price = service_repo
                        .find_by_id(appointment.service_id)
                        .await?
                        .map(|service| service.price);
                    prices.insert(appointment.service_id, price);
                    price
                }
            };

            match price {
                Some(price) => total_income += price,
                None => tracing::warn!(
                    "Appointment {} references missing service {}, leaving it out of the {} report",
                    appointment.id,
                    appointment.service_id,
                    date
                ),
            }
        }

        let report = ReportRepository::new(self.db)
            .create(CreateReportParam {
                report_date: date,
                total_clients: clients.len() as i32,
                total_income,
            })
            .await?;

        tracing::info!(
            "Generated report {} for {}: {} clients, {} income",
            report.id,
            date,
            report.total_clients,
            report.total_income
        );

        Ok(report)
    }

    /// Stores a report with caller-supplied totals.
    ///
    /// # Arguments
    /// - `param` - Report date, client count and income
    ///
    /// # Returns
    /// - `Ok(Report)` - The created report
    /// - `Err(AppError::Validation)` - Negative client count or income
    pub async fn create(&self, param: CreateReportParam) -> Result<Report, AppError> {
        validate_totals(Some(param.total_clients), Some(param.total_income))?;

        Ok(ReportRepository::new(self.db).create(param).await?)
    }

    /// Applies a partial update; omitted fields keep their value.
    ///
    /// # Arguments
    /// - `id` - Report ID
    /// - `param` - Fields to change
    ///
    /// # Returns
    /// - `Ok(Report)` - The updated report
    /// - `Err(AppError::Validation)` - Negative client count or income
    /// - `Err(AppError::NotFound)` - No report with this ID
    pub async fn update(&self, id: i32, param: UpdateReportParam) -> Result<Report, AppError> {
        validate_totals(param.total_clients, param.total_income)?;

        ReportRepository::new(self.db)
            .update(id, param)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Deletes a stored report.
    ///
    /// # Arguments
    /// - `id` - Report ID
    ///
    /// # Returns
    /// - `Ok(())` - The report was deleted
    /// - `Err(AppError::NotFound)` - No report with this ID
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        if !ReportRepository::new(self.db).delete(id).await? {
            return Err(not_found(id));
        }

        Ok(())
    }

    /// Lists every stored report.
    ///
    /// # Returns
    /// - `Ok(Vec<Report>)` - All reports
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn get_all(&self) -> Result<Vec<Report>, AppError> {
        Ok(ReportRepository::new(self.db).get_all().await?)
    }

    /// Gets one report.
    ///
    /// # Arguments
    /// - `id` - Report ID
    ///
    /// # Returns
    /// - `Ok(Report)` - The report
    /// - `Err(AppError::NotFound)` - No report with this ID
    pub async fn get_by_id(&self, id: i32) -> Result<Report, AppError> {
        ReportRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Lists reports dated within `start..=end`, oldest first.
    ///
    /// # Arguments
    /// - `start` - First day, inclusive
    /// - `end` - Last day, inclusive
    ///
    /// # Returns
    /// - `Ok(Vec<Report>)` - Reports in the range
    /// - `Err(AppError::Validation)` - `start` is after `end`
    pub async fn get_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Report>, AppError> {
        if start > end {
            return Err(AppError::Validation(
                "start_date must not be after end_date".to_string(),
            ));
        }

        Ok(ReportRepository::new(self.db)
            .get_by_date_range(start, end)
            .await?)
    }
}

fn validate_totals(clients: Option<i32>, income: Option<Decimal>) -> Result<(), AppError> {
    if clients.is_some_and(|c| c < 0) {
        return Err(AppError::Validation(
            "total_clients must not be negative".to_string(),
        ));
    }
    if income.is_some_and(|i| i < Decimal::ZERO) {
        return Err(AppError::Validation(
            "total_income must not be negative".to_string(),
        ));
    }

    Ok(())
}

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Report {} not found", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::service::catalog::CatalogService;
    use entity::sea_orm_active_enums::AppointmentStatus as StatusEntity;
    use test_utils::{
        builder::TestBuilder,
        factory::{self, appointment::AppointmentFactory},
    };

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    async fn completed(
        db: &DatabaseConnection,
        client_id: i32,
        master_id: i32,
        service_id: i32,
        hour: u32,
    ) -> Result<(), AppError> {
        AppointmentFactory::new(db, client_id, master_id, service_id)
            .date(day())
            .time(chrono::NaiveTime::from_hms_opt(hour, 0, 0).unwrap())
            .status(StatusEntity::Completed)
            .build()
            .await?;

        Ok(())
    }

    #[tokio::test]
    async fn empty_day_yields_zero_report() -> Result<(), AppError> {
        let test = TestBuilder::new().with_salon_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let report = ReportService::new(db).generate_for_date(day()).await?;

        assert_eq!(report.report_date, day());
        assert_eq!(report.total_clients, 0);
        assert_eq!(report.total_income, Decimal::ZERO);

        Ok(())
    }

    /// Tests that one client with two completed appointments counts once but pays twice.
    #[tokio::test]
    async fn repeat_client_counts_once() -> Result<(), AppError> {
        let test = TestBuilder::new().with_salon_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let (client, master, service) = factory::helpers::create_booking_parties(db).await?;

        completed(db, client.id, master.id, service.id, 10).await?;
        completed(db, client.id, master.id, service.id, 12).await?;

        let report = ReportService::new(db).generate_for_date(day()).await?;

        assert_eq!(report.total_clients, 1);
        assert_eq!(report.total_income, service.price * Decimal::from(2));

        Ok(())
    }

    /// Two clients, services priced 500 and 300, three completed appointments.
    ///
    /// Expected: 2 clients and 1300 income, scheduled and cancelled ones ignored
    #[tokio::test]
    async fn aggregates_completed_appointments_only() -> Result<(), AppError> {
        let test = TestBuilder::new().with_salon_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let first = factory::create_user(db).await?;
        let second = factory::create_user(db).await?;
        let master = factory::create_master(db).await?;
        let a = factory::service::create_service_with_price(db, Decimal::from(500)).await?;
        let b = factory::service::create_service_with_price(db, Decimal::from(300)).await?;

        completed(db, first.id, master.id, a.id, 10).await?;
        completed(db, first.id, master.id, b.id, 11).await?;
        completed(db, second.id, master.id, a.id, 12).await?;

        AppointmentFactory::new(db, second.id, master.id, b.id)
            .date(day())
            .time(chrono::NaiveTime::from_hms_opt(13, 0, 0).unwrap())
            .build()
            .await?;
        AppointmentFactory::new(db, second.id, master.id, b.id)
            .date(day())
            .time(chrono::NaiveTime::from_hms_opt(14, 0, 0).unwrap())
            .status(StatusEntity::Cancelled)
            .build()
            .await?;

        let report = ReportService::new(db).generate_for_date(day()).await?;

        assert_eq!(report.total_clients, 2);
        assert_eq!(report.total_income, Decimal::from(1300));

        Ok(())
    }

    #[tokio::test]
    async fn rejects_negative_totals() -> Result<(), AppError> {
        let test = TestBuilder::new().with_salon_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let reports = ReportService::new(db);

        let result = reports
            .create(CreateReportParam {
                report_date: day(),
                total_clients: -1,
                total_income: Decimal::ZERO,
            })
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));

        let result = reports
            .update(
                1,
                UpdateReportParam {
                    total_income: Some(Decimal::from(-5)),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));

        Ok(())
    }

    #[tokio::test]
    async fn range_is_inclusive_and_ordered() -> Result<(), AppError> {
        let test = TestBuilder::new().with_salon_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let date = |d| NaiveDate::from_ymd_opt(2024, 5, d).unwrap();

        factory::create_report(db, date(3), 1, Decimal::from(100)).await?;
        factory::create_report(db, date(1), 2, Decimal::from(200)).await?;
        factory::create_report(db, date(5), 3, Decimal::from(300)).await?;

        let reports = ReportService::new(db);
        let found = reports.get_by_date_range(date(1), date(3)).await?;

        assert_eq!(
            found.iter().map(|r| r.report_date).collect::<Vec<_>>(),
            vec![date(1), date(3)]
        );
        assert!(matches!(
            reports.get_by_date_range(date(3), date(1)).await,
            Err(AppError::Validation(_))
        ));

        Ok(())
    }

    #[tokio::test]
    async fn missing_report_is_not_found() -> Result<(), AppError> {
        let test = TestBuilder::new().with_salon_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let reports = ReportService::new(db);

        assert!(matches!(reports.get_by_id(7).await, Err(AppError::NotFound(_))));
        assert!(matches!(reports.delete(7).await, Err(AppError::NotFound(_))));

        Ok(())
    }

    /// Tests that removing a catalog entry keeps its appointments in the report.
    ///
    /// Two clients, services priced 500 and 300, service A removed before generating.
    ///
    /// Expected: both clients counted, only the remaining 300 in income
    #[tokio::test]
    async fn removed_service_keeps_clients_and_contributes_zero() -> Result<(), AppError> {
        let test = TestBuilder::new().with_salon_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let first = factory::create_user(db).await?;
        let second = factory::create_user(db).await?;
        let master = factory::create_master(db).await?;
        let a = factory::service::create_service_with_price(db, Decimal::from(500)).await?;
        let b = factory::service::create_service_with_price(db, Decimal::from(300)).await?;

        completed(db, first.id, master.id, a.id, 10).await?;
        completed(db, first.id, master.id, b.id, 11).await?;
        completed(db, second.id, master.id, a.id, 12).await?;

        CatalogService::new(db).delete(a.id).await?;

        let report = ReportService::new(db).generate_for_date(day()).await?;

        assert_eq!(report.total_clients, 2);
        assert_eq!(report.total_income, Decimal::from(300));

        Ok(())
    }
}
