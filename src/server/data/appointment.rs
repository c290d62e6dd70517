//! Appointment data repository for database operations.
//!
//! Unlike the other repositories this one is generic over the connection so the booking
//! check and insert can share a transaction.

use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection,
    DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::appointment::{
    Appointment, AppointmentStatus, CreateAppointmentParam, UpdateAppointmentParam,
};

/// Repository providing database operations for appointments.
///
/// Works with a plain `DatabaseConnection` or a `DatabaseTransaction`.
pub struct AppointmentRepository<'a, C: ConnectionTrait = DatabaseConnection> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AppointmentRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts an appointment with both timestamps set to now.
    ///
    /// A missing status is stored as `Scheduled`.
    pub async fn create(&self, param: CreateAppointmentParam) -> Result<Appointment, DbErr> {
        let now = Utc::now();
        let status = param.status.unwrap_or(AppointmentStatus::Scheduled);

        let entity = entity::appointment::ActiveModel {
            client_id: ActiveValue::Set(param.client_id),
            master_id: ActiveValue::Set(param.master_id),
            service_id: ActiveValue::Set(param.service_id),
            date: ActiveValue::Set(param.date),
            time: ActiveValue::Set(param.time),
            status: ActiveValue::Set(status.into_entity()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Appointment::from_entity(entity))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Appointment>, DbErr> {
        let entity = entity::prelude::Appointment::find_by_id(id)
            .one(self.db)
            .await?;

        Ok(entity.map(Appointment::from_entity))
    }

    /// Gets all appointments, newest date and time first.
    pub async fn get_all(&self) -> Result<Vec<Appointment>, DbErr> {
        self.fetch(Condition::all()).await
    }

    pub async fn get_by_client(&self, client_id: i32) -> Result<Vec<Appointment>, DbErr> {
        self.fetch(Condition::all().add(entity::appointment::Column::ClientId.eq(client_id)))
            .await
    }

    pub async fn get_by_master(&self, master_id: i32) -> Result<Vec<Appointment>, DbErr> {
        self.fetch(Condition::all().add(entity::appointment::Column::MasterId.eq(master_id)))
            .await
    }

    /// Gets every appointment, any status, a master has on a date.
    pub async fn get_by_master_and_date(
        &self,
        master_id: i32,
        date: NaiveDate,
    ) -> Result<Vec<Appointment>, DbErr> {
        self.fetch(
            Condition::all()
                .add(entity::appointment::Column::MasterId.eq(master_id))
                .add(entity::appointment::Column::Date.eq(date)),
        )
        .await
    }

    pub async fn get_by_status(
        &self,
        status: AppointmentStatus,
    ) -> Result<Vec<Appointment>, DbErr> {
        self.fetch(
            Condition::all().add(entity::appointment::Column::Status.eq(status.into_entity())),
        )
        .await
    }

    /// Gets appointments where either the client id or the master id equals `id`.
    pub async fn get_by_client_or_master(&self, id: i32) -> Result<Vec<Appointment>, DbErr> {
        self.fetch(
            Condition::any()
                .add(entity::appointment::Column::ClientId.eq(id))
                .add(entity::appointment::Column::MasterId.eq(id)),
        )
        .await
    }

    /// Gets completed appointments on a date, the input of daily reports.
    pub async fn get_completed_on(&self, date: NaiveDate) -> Result<Vec<Appointment>, DbErr> {
        self.fetch(
            Condition::all()
                .add(entity::appointment::Column::Date.eq(date))
                .add(
                    entity::appointment::Column::Status
                        .eq(AppointmentStatus::Completed.into_entity()),
                ),
        )
        .await
    }

    /// Applies a partial update and refreshes `updated_at`.
    ///
    /// # Returns
    /// - `Ok(Some(Appointment))` - The updated appointment
    /// - `Ok(None)` - No appointment with that id
    /// - `Err(DbErr)` - Database error, including an active slot collision
    pub async fn update(
        &self,
        id: i32,
        param: UpdateAppointmentParam,
    ) -> Result<Option<Appointment>, DbErr> {
        let Some(entity) = entity::prelude::Appointment::find_by_id(id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::appointment::ActiveModel = entity.into();

        if let Some(client_id) = param.client_id {
            active.client_id = ActiveValue::Set(client_id);
        }
        if let Some(master_id) = param.master_id {
            active.master_id = ActiveValue::Set(master_id);
        }
        if let Some(service_id) = param.service_id {
            active.service_id = ActiveValue::Set(service_id);
        }
        if let Some(date) = param.date {
            active.date = ActiveValue::Set(date);
        }
        if let Some(time) = param.time {
            active.time = ActiveValue::Set(time);
        }
        if let Some(status) = param.status {
            active.status = ActiveValue::Set(status.into_entity());
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        let entity = active.update(self.db).await?;

        Ok(Some(Appointment::from_entity(entity)))
    }

    /// Sets the status and refreshes `updated_at`.
    pub async fn set_status(
        &self,
        id: i32,
        status: AppointmentStatus,
    ) -> Result<Option<Appointment>, DbErr> {
        self.update(
            id,
            UpdateAppointmentParam {
                status: Some(status),
                ..Default::default()
            },
        )
        .await
    }

    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Appointment::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count(&self) -> Result<u64, DbErr> {
        entity::prelude::Appointment::find().count(self.db).await
    }

    pub async fn count_by_status(&self, status: AppointmentStatus) -> Result<u64, DbErr> {
        entity::prelude::Appointment::find()
            .filter(entity::appointment::Column::Status.eq(status.into_entity()))
            .count(self.db)
            .await
    }

    async fn fetch(&self, condition: Condition) -> Result<Vec<Appointment>, DbErr> {
        let entities = entity::prelude::Appointment::find()
            .filter(condition)
            .order_by_desc(entity::appointment::Column::Date)
            .order_by_desc(entity::appointment::Column::Time)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Appointment::from_entity).collect())
    }
}
