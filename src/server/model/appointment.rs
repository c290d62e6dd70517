//! Appointment domain models and parameters.
//!
//! Appointments move through a small state machine: they start `Scheduled` and may be moved
//! to `Completed` or `Cancelled` from any state. No transition is rejected, re-applying a
//! terminal status simply refreshes `updated_at`.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use entity::sea_orm_active_enums::AppointmentStatus as StatusEntity;

use crate::model::appointment::{
    AppointmentDto, CreateAppointmentDto, StatusDto, UpdateAppointmentDto,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn from_entity(status: StatusEntity) -> Self {
        match status {
            StatusEntity::Scheduled => Self::Scheduled,
            StatusEntity::Completed => Self::Completed,
            StatusEntity::Cancelled => Self::Cancelled,
        }
    }

    pub fn into_entity(self) -> StatusEntity {
        match self {
            Self::Scheduled => StatusEntity::Scheduled,
            Self::Completed => StatusEntity::Completed,
            Self::Cancelled => StatusEntity::Cancelled,
        }
    }

    pub fn from_dto(status: StatusDto) -> Self {
        match status {
            StatusDto::Scheduled => Self::Scheduled,
            StatusDto::Completed => Self::Completed,
            StatusDto::Cancelled => Self::Cancelled,
        }
    }

    pub fn into_dto(self) -> StatusDto {
        match self {
            Self::Scheduled => StatusDto::Scheduled,
            Self::Completed => StatusDto::Completed,
            Self::Cancelled => StatusDto::Cancelled,
        }
    }

    /// Whether an appointment in this status holds its master's time slot.
    pub fn occupies_slot(self) -> bool {
        self != Self::Cancelled
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Appointment {
    pub id: i32,
    pub client_id: i32,
    pub master_id: i32,
    pub service_id: i32,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Appointment {
    pub fn into_dto(self) -> AppointmentDto {
        let status = self.status.into_dto();
        AppointmentDto {
            id: self.id,
            client_id: self.client_id,
            master_id: self.master_id,
            service_id: self.service_id,
            date: self.date,
            time: self.time,
            status,
            status_display: status.display_name().to_string(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    pub fn from_entity(entity: entity::appointment::Model) -> Self {
        Self {
            id: entity.id,
            client_id: entity.client_id,
            master_id: entity.master_id,
            service_id: entity.service_id,
            date: entity.date,
            time: entity.time,
            status: AppointmentStatus::from_entity(entity.status),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateAppointmentParam {
    pub client_id: i32,
    pub master_id: i32,
    pub service_id: i32,
    pub date: NaiveDate,
    pub time: NaiveTime,
    /// `None` means `Scheduled`.
    pub status: Option<AppointmentStatus>,
}

impl CreateAppointmentParam {
    /// Builds the parameters for the given client, ignoring any client id in the payload.
    ///
    /// The controller decides which client the booking belongs to since that depends on
    /// the caller's role.
    pub fn from_dto(client_id: i32, dto: CreateAppointmentDto) -> Self {
        Self {
            client_id,
            master_id: dto.master_id,
            service_id: dto.service_id,
            date: dto.date,
            time: dto.time,
            status: dto.status.map(AppointmentStatus::from_dto),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateAppointmentParam {
    pub client_id: Option<i32>,
    pub master_id: Option<i32>,
    pub service_id: Option<i32>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub status: Option<AppointmentStatus>,
}

impl UpdateAppointmentParam {
    pub fn from_dto(dto: UpdateAppointmentDto) -> Self {
        Self {
            client_id: dto.client_id,
            master_id: dto.master_id,
            service_id: dto.service_id,
            date: dto.date,
            time: dto.time,
            status: dto.status.map(AppointmentStatus::from_dto),
        }
    }
}
