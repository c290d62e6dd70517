//! Appointment factory for creating test bookings.

use chrono::{Days, NaiveDate, NaiveTime, Utc};
use entity::sea_orm_active_enums::AppointmentStatus;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test appointments with customizable fields.
///
/// Inserts directly, so no availability check runs. The store's active slot index still
/// applies when the context was built with `with_salon_tables()`.
///
/// # Example
///
/// ```rust,ignore
/// let booking = AppointmentFactory::new(&db, client.id, master.id, service.id)
///     .date(NaiveDate::from_ymd_opt(2026, 3, 10).unwrap())
///     .time(NaiveTime::from_hms_opt(14, 0, 0).unwrap())
///     .status(AppointmentStatus::Completed)
///     .build()
///     .await?;
/// ```
pub struct AppointmentFactory<'a> {
    db: &'a DatabaseConnection,
    client_id: i32,
    master_id: i32,
    service_id: i32,
    date: NaiveDate,
    time: NaiveTime,
    status: AppointmentStatus,
}

impl<'a> AppointmentFactory<'a> {
    /// Creates a new AppointmentFactory with default values.
    ///
    /// Defaults:
    /// - date: tomorrow
    /// - time: `10:00`
    /// - status: `Scheduled`
    pub fn new(db: &'a DatabaseConnection, client_id: i32, master_id: i32, service_id: i32) -> Self {
        let today = Utc::now().date_naive();
        Self {
            db,
            client_id,
            master_id,
            service_id,
            date: today.checked_add_days(Days::new(1)).unwrap_or(today),
            time: NaiveTime::from_hms_opt(10, 0, 0).unwrap_or(NaiveTime::MIN),
            status: AppointmentStatus::Scheduled,
        }
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    pub fn time(mut self, time: NaiveTime) -> Self {
        self.time = time;
        self
    }

    pub fn status(mut self, status: AppointmentStatus) -> Self {
        self.status = status;
        self
    }

    /// Builds and inserts the appointment entity into the database.
    pub async fn build(self) -> Result<entity::appointment::Model, DbErr> {
        let now = Utc::now();
        entity::appointment::ActiveModel {
            client_id: ActiveValue::Set(self.client_id),
            master_id: ActiveValue::Set(self.master_id),
            service_id: ActiveValue::Set(self.service_id),
            date: ActiveValue::Set(self.date),
            time: ActiveValue::Set(self.time),
            status: ActiveValue::Set(self.status),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a scheduled appointment for tomorrow at 10:00.
pub async fn create_appointment(
    db: &DatabaseConnection,
    client_id: i32,
    master_id: i32,
    service_id: i32,
) -> Result<entity::appointment::Model, DbErr> {
    AppointmentFactory::new(db, client_id, master_id, service_id)
        .build()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{builder::TestBuilder, factory::helpers::create_booking_parties};

    #[tokio::test]
    async fn creates_scheduled_appointment() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_salon_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let (client, master, service) = create_booking_parties(db).await?;
        let appointment = create_appointment(db, client.id, master.id, service.id).await?;

        assert_eq!(appointment.status, AppointmentStatus::Scheduled);
        assert_eq!(appointment.client_id, client.id);
        assert_eq!(appointment.time, NaiveTime::from_hms_opt(10, 0, 0).unwrap());

        Ok(())
    }

    #[tokio::test]
    async fn active_slot_index_rejects_second_booking() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_salon_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let (client, master, service) = create_booking_parties(db).await?;
        create_appointment(db, client.id, master.id, service.id).await?;

        let result = create_appointment(db, client.id, master.id, service.id).await;

        assert!(result.is_err());

        Ok(())
    }

    #[tokio::test]
    async fn active_slot_index_ignores_cancelled_bookings() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_salon_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let (client, master, service) = create_booking_parties(db).await?;
        AppointmentFactory::new(db, client.id, master.id, service.id)
            .status(AppointmentStatus::Cancelled)
            .build()
            .await?;

        let rebooked = create_appointment(db, client.id, master.id, service.id).await?;

        assert_eq!(rebooked.status, AppointmentStatus::Scheduled);

        Ok(())
    }
}
