use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Appointment status as exchanged over the API.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StatusDto {
    #[serde(alias = "Запланирована", alias = "SCHEDULED")]
    Scheduled,
    #[serde(alias = "Выполнена", alias = "COMPLETED")]
    Completed,
    #[serde(alias = "Отменена", alias = "CANCELLED")]
    Cancelled,
}

impl StatusDto {
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Scheduled => "Запланирована",
            Self::Completed => "Выполнена",
            Self::Cancelled => "Отменена",
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct AppointmentDto {
    pub id: i32,
    pub client_id: i32,
    pub master_id: i32,
    pub service_id: i32,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub status: StatusDto,
    pub status_display: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct CreateAppointmentDto {
    /// Required for staff. Clients always book for themselves.
    pub client_id: Option<i32>,
    pub master_id: i32,
    pub service_id: i32,
    pub date: NaiveDate,
    pub time: NaiveTime,
    /// Defaults to `scheduled`.
    pub status: Option<StatusDto>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, Default)]
pub struct UpdateAppointmentDto {
    pub client_id: Option<i32>,
    pub master_id: Option<i32>,
    pub service_id: Option<i32>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub status: Option<StatusDto>,
}

#[derive(Deserialize, IntoParams, Debug, Default)]
#[into_params(parameter_in = Query)]
pub struct AppointmentQueryDto {
    /// Numeric id matched against the client id or the master id.
    pub search: Option<String>,
}
