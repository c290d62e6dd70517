//! Appointment service for booking and status management.
//!
//! This module provides the `AppointmentService`, which books appointments while keeping a
//! master's time slot free of overlapping active bookings, and moves appointments through
//! their status transitions.

use chrono::NaiveDate;
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    data::{appointment::AppointmentRepository, service::ServiceRepository},
    error::AppError,
    model::appointment::{
        Appointment, AppointmentStatus, CreateAppointmentParam, UpdateAppointmentParam,
    },
};

const SLOT_TAKEN: &str = "Master already has an appointment at this time";

/// Service providing booking logic for appointments.
pub struct AppointmentService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AppointmentService<'a> {
    /// Creates a new AppointmentService instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `AppointmentService` - New service instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Books an appointment if the master's slot is free.
    ///
    /// The slot is taken when a non-cancelled appointment exists for the same master, date
    /// and time. The check and the insert share one transaction and the active slot index
    /// backs the check against concurrent bookings.
    ///
    /// # Arguments
    /// - `param` - Client, master, service, date, time and an optional initial status
    ///
    /// # Returns
    /// - `Ok(Appointment)` - The persisted appointment, `Scheduled` unless a status was given
    /// - `Err(AppError::Conflict)` - The slot is already taken
    /// - `Err(AppError::Validation)` - Unknown client, master or service
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn create(&self, param: CreateAppointmentParam) -> Result<Appointment, AppError> {
        self.ensure_service_exists(param.service_id).await?;

        let txn = self.db.begin().await?;
        let repo = AppointmentRepository::new(&txn);

        let taken = repo
            .get_by_master_and_date(param.master_id, param.date)
            .await?
            .into_iter()
            .any(|existing| existing.status.occupies_slot() && existing.time == param.time);

        if taken {
            return Err(AppError::Conflict(SLOT_TAKEN.to_string()));
        }

        let appointment = repo
            .create(param)
            .await
            .map_err(|e| AppError::from_write_err(e, SLOT_TAKEN))?;

        txn.commit().await?;

        tracing::debug!(
            "Booked appointment {} for master {} on {} at {}",
            appointment.id,
            appointment.master_id,
            appointment.date,
            appointment.time
        );

        Ok(appointment)
    }

    /// Applies a partial update without re-running the availability check.
    ///
    /// Moving onto an occupied slot is still refused by the active slot index.
    ///
    /// # Arguments
    /// - `id` - Appointment ID
    /// - `param` - Fields to overwrite; `None` fields keep their value
    ///
    /// # Returns
    /// - `Ok(Appointment)` - The updated appointment with a refreshed `updated_at`
    /// - `Err(AppError::NotFound)` - No appointment with that ID
    /// - `Err(AppError::Conflict)` - The new slot is occupied
    /// - `Err(AppError::Validation)` - Unknown client, master or service
    pub async fn update(
        &self,
        id: i32,
        param: UpdateAppointmentParam,
    ) -> Result<Appointment, AppError> {
        if let Some(service_id) = param.service_id {
            self.ensure_service_exists(service_id).await?;
        }

        AppointmentRepository::new(self.db)
            .update(id, param)
            .await
            .map_err(|e| AppError::from_write_err(e, SLOT_TAKEN))?
            .ok_or_else(|| not_found(id))
    }

    /// Cancels an appointment, freeing its slot.
    ///
    /// # Arguments
    /// - `id` - Appointment ID
    ///
    /// # Returns
    /// - `Ok(Appointment)` - The appointment in `Cancelled` status
    /// - `Err(AppError::NotFound)` - No appointment with that ID
    pub async fn cancel(&self, id: i32) -> Result<Appointment, AppError> {
        self.set_status(id, AppointmentStatus::Cancelled).await
    }

    /// Marks an appointment as performed, making it count in daily reports.
    ///
    /// # Arguments
    /// - `id` - Appointment ID
    ///
    /// # Returns
    /// - `Ok(Appointment)` - The appointment in `Completed` status
    /// - `Err(AppError::NotFound)` - No appointment with that ID
    /// - `Err(AppError::Conflict)` - Reviving a cancelled appointment whose slot was rebooked
    pub async fn complete(&self, id: i32) -> Result<Appointment, AppError> {
        self.set_status(id, AppointmentStatus::Completed).await
    }

    async fn set_status(
        &self,
        id: i32,
        status: AppointmentStatus,
    ) -> Result<Appointment, AppError> {
        AppointmentRepository::new(self.db)
            .set_status(id, status)
            .await
            .map_err(|e| AppError::from_write_err(e, SLOT_TAKEN))?
            .ok_or_else(|| not_found(id))
    }

    /// Deletes an appointment.
    ///
    /// # Arguments
    /// - `id` - Appointment ID
    ///
    /// # Returns
    /// - `Ok(())` - Appointment deleted
    /// - `Err(AppError::NotFound)` - No appointment with that ID
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        if !AppointmentRepository::new(self.db).delete(id).await? {
            return Err(not_found(id));
        }

        Ok(())
    }

    /// Retrieves every appointment, newest date and time first.
    ///
    /// # Returns
    /// - `Ok(Vec<Appointment>)` - All appointments
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn get_all(&self) -> Result<Vec<Appointment>, AppError> {
        Ok(AppointmentRepository::new(self.db).get_all().await?)
    }

    /// Retrieves an appointment by ID.
    ///
    /// # Returns
    /// - `Ok(Appointment)` - The appointment
    /// - `Err(AppError::NotFound)` - No appointment with that ID
    pub async fn get_by_id(&self, id: i32) -> Result<Appointment, AppError> {
        AppointmentRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Retrieves a client's appointments, newest first.
    ///
    /// # Arguments
    /// - `client_id` - User ID of the client
    ///
    /// # Returns
    /// - `Ok(Vec<Appointment>)` - The client's appointments (empty for unknown clients)
    pub async fn get_by_client(&self, client_id: i32) -> Result<Vec<Appointment>, AppError> {
        Ok(AppointmentRepository::new(self.db)
            .get_by_client(client_id)
            .await?)
    }

    /// Retrieves a master's appointments, newest first.
    ///
    /// # Arguments
    /// - `master_id` - Master ID
    ///
    /// # Returns
    /// - `Ok(Vec<Appointment>)` - The master's appointments (empty for unknown masters)
    pub async fn get_by_master(&self, master_id: i32) -> Result<Vec<Appointment>, AppError> {
        Ok(AppointmentRepository::new(self.db)
            .get_by_master(master_id)
            .await?)
    }

    /// Retrieves a master's schedule for one day, in every status.
    ///
    /// # Arguments
    /// - `master_id` - Master ID
    /// - `date` - Day to look up
    ///
    /// # Returns
    /// - `Ok(Vec<Appointment>)` - Appointments of the master on that date
    pub async fn get_by_master_and_date(
        &self,
        master_id: i32,
        date: NaiveDate,
    ) -> Result<Vec<Appointment>, AppError> {
        Ok(AppointmentRepository::new(self.db)
            .get_by_master_and_date(master_id, date)
            .await?)
    }

    /// Retrieves appointments in a status, newest first.
    ///
    /// # Arguments
    /// - `status` - Status to filter by
    ///
    /// # Returns
    /// - `Ok(Vec<Appointment>)` - Appointments in that status
    pub async fn get_by_status(
        &self,
        status: AppointmentStatus,
    ) -> Result<Vec<Appointment>, AppError> {
        Ok(AppointmentRepository::new(self.db)
            .get_by_status(status)
            .await?)
    }

    /// Searches by numeric id, matching the client id or the master id.
    ///
    /// A query that is not a number returns every appointment.
    ///
    /// # Arguments
    /// - `query` - Search text, surrounding whitespace ignored
    ///
    /// # Returns
    /// - `Ok(Vec<Appointment>)` - Matching appointments, newest first
    pub async fn search(&self, query: &str) -> Result<Vec<Appointment>, AppError> {
        let repo = AppointmentRepository::new(self.db);

        match query.trim().parse::<i32>() {
            Ok(id) => Ok(repo.get_by_client_or_master(id).await?),
            Err(_) => Ok(repo.get_all().await?),
        }
    }

    /// `service_id` carries no foreign key, so its existence is checked here.
    async fn ensure_service_exists(&self, service_id: i32) -> Result<(), AppError> {
        if ServiceRepository::new(self.db)
            .find_by_id(service_id)
            .await?
            .is_none()
        {
            return Err(AppError::Validation(format!(
                "Service {} does not exist",
                service_id
            )));
        }

        Ok(())
    }
}

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Appointment {} not found", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use test_utils::{builder::TestBuilder, factory};

    fn slot(master_id: i32, client_id: i32, service_id: i32) -> CreateAppointmentParam {
        CreateAppointmentParam {
            client_id,
            master_id,
            service_id,
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            status: None,
        }
    }

    /// Tests that a second booking of the same slot is refused for every non-cancelled status.
    ///
    /// Expected: Err(AppError::Conflict)
    #[tokio::test]
    async fn rejects_double_booking() -> Result<(), AppError> {
        let test = TestBuilder::new().with_salon_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let (client, master, service) = factory::helpers::create_booking_parties(db).await?;
        let appointments = AppointmentService::new(db);

        let first = appointments
            .create(slot(master.id, client.id, service.id))
            .await?;
        assert_eq!(first.status, AppointmentStatus::Scheduled);

        for status in [None, Some(AppointmentStatus::Completed)] {
            let second = appointments
                .create(CreateAppointmentParam {
                    status,
                    ..slot(master.id, client.id, service.id)
                })
                .await;

            assert!(matches!(second, Err(AppError::Conflict(msg)) if msg == SLOT_TAKEN));
        }

        Ok(())
    }

    /// Tests that cancelling frees the slot for a new booking.
    #[tokio::test]
    async fn cancelled_slot_can_be_rebooked() -> Result<(), AppError> {
        let test = TestBuilder::new().with_salon_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let (client, master, service) = factory::helpers::create_booking_parties(db).await?;
        let appointments = AppointmentService::new(db);

        let first = appointments
            .create(slot(master.id, client.id, service.id))
            .await?;
        appointments.cancel(first.id).await?;

        let rebooked = appointments
            .create(slot(master.id, client.id, service.id))
            .await?;

        assert_ne!(rebooked.id, first.id);
        assert_eq!(rebooked.status, AppointmentStatus::Scheduled);

        Ok(())
    }

    #[tokio::test]
    async fn other_master_or_time_is_free() -> Result<(), AppError> {
        let test = TestBuilder::new().with_salon_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let (client, master, service) = factory::helpers::create_booking_parties(db).await?;
        let other = factory::create_master(db).await?;
        let appointments = AppointmentService::new(db);

        appointments
            .create(slot(master.id, client.id, service.id))
            .await?;

        let other_master = appointments.create(slot(other.id, client.id, service.id)).await;
        let other_time = appointments
            .create(CreateAppointmentParam {
                time: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
                ..slot(master.id, client.id, service.id)
            })
            .await;

        assert!(other_master.is_ok());
        assert!(other_time.is_ok());

        Ok(())
    }

    /// Expected: Err(AppError::Validation) for a master or service that does not exist
    #[tokio::test]
    async fn rejects_unknown_references() -> Result<(), AppError> {
        let test = TestBuilder::new().with_salon_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let (client, master, service) = factory::helpers::create_booking_parties(db).await?;
        let appointments = AppointmentService::new(db);

        let unknown_master = appointments.create(slot(999, client.id, service.id)).await;
        let unknown_service = appointments.create(slot(master.id, client.id, 999)).await;

        assert!(matches!(unknown_master, Err(AppError::Validation(_))));
        assert!(matches!(unknown_service, Err(AppError::Validation(_))));

        let booked = appointments
            .create(slot(master.id, client.id, service.id))
            .await?;
        let moved_to_unknown_service = appointments
            .update(
                booked.id,
                UpdateAppointmentParam {
                    service_id: Some(999),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(
            moved_to_unknown_service,
            Err(AppError::Validation(_))
        ));

        Ok(())
    }

    /// Tests that terminal statuses can be re-applied and swapped.
    #[tokio::test]
    async fn status_transitions_are_never_rejected() -> Result<(), AppError> {
        let test = TestBuilder::new().with_salon_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let (_, _, _, appointment) =
            factory::helpers::create_appointment_with_dependencies(db).await?;
        let appointments = AppointmentService::new(db);

        let completed = appointments.complete(appointment.id).await?;
        let completed_again = appointments.complete(appointment.id).await?;
        let cancelled = appointments.cancel(appointment.id).await?;

        assert_eq!(completed.status, AppointmentStatus::Completed);
        assert_eq!(completed_again.status, AppointmentStatus::Completed);
        assert!(completed_again.updated_at >= completed.updated_at);
        assert_eq!(cancelled.status, AppointmentStatus::Cancelled);

        Ok(())
    }

    #[tokio::test]
    async fn update_patches_only_given_fields() -> Result<(), AppError> {
        let test = TestBuilder::new().with_salon_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let (_, _, _, appointment) =
            factory::helpers::create_appointment_with_dependencies(db).await?;

        let new_time = NaiveTime::from_hms_opt(16, 30, 0).unwrap();
        let updated = AppointmentService::new(db)
            .update(
                appointment.id,
                UpdateAppointmentParam {
                    time: Some(new_time),
                    ..Default::default()
                },
            )
            .await?;

        assert_eq!(updated.time, new_time);
        assert_eq!(updated.date, appointment.date);
        assert_eq!(updated.master_id, appointment.master_id);
        assert_eq!(updated.status, AppointmentStatus::Scheduled);

        Ok(())
    }

    /// Tests that an update moving onto an occupied slot is refused by the store.
    ///
    /// Expected: Err(AppError::Conflict)
    #[tokio::test]
    async fn update_onto_taken_slot_conflicts() -> Result<(), AppError> {
        let test = TestBuilder::new().with_salon_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let (client, master, service) = factory::helpers::create_booking_parties(db).await?;
        let appointments = AppointmentService::new(db);

        appointments
            .create(slot(master.id, client.id, service.id))
            .await?;
        let later = appointments
            .create(CreateAppointmentParam {
                time: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
                ..slot(master.id, client.id, service.id)
            })
            .await?;

        let result = appointments
            .update(
                later.id,
                UpdateAppointmentParam {
                    time: Some(NaiveTime::from_hms_opt(10, 0, 0).unwrap()),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));

        Ok(())
    }

    #[tokio::test]
    async fn missing_appointment_is_not_found() -> Result<(), AppError> {
        let test = TestBuilder::new().with_salon_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let appointments = AppointmentService::new(db);

        assert!(matches!(appointments.cancel(1).await, Err(AppError::NotFound(_))));
        assert!(matches!(appointments.complete(1).await, Err(AppError::NotFound(_))));
        assert!(matches!(appointments.delete(1).await, Err(AppError::NotFound(_))));
        assert!(matches!(
            appointments.update(1, UpdateAppointmentParam::default()).await,
            Err(AppError::NotFound(_))
        ));

        Ok(())
    }

    #[tokio::test]
    async fn non_numeric_search_returns_everything() -> Result<(), AppError> {
        let test = TestBuilder::new().with_salon_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let (client, master, service) = factory::helpers::create_booking_parties(db).await?;
        let other_client = factory::create_user(db).await?;
        let appointments = AppointmentService::new(db);

        appointments
            .create(slot(master.id, client.id, service.id))
            .await?;
        appointments
            .create(CreateAppointmentParam {
                time: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
                ..slot(master.id, other_client.id, service.id)
            })
            .await?;

        assert_eq!(appointments.search("anna").await?.len(), 2);
        assert_eq!(
            appointments
                .search(&other_client.id.to_string())
                .await?
                .iter()
                .filter(|a| a.client_id == other_client.id)
                .count(),
            1
        );

        Ok(())
    }
}
