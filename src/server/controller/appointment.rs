use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        appointment::{
            AppointmentDto, AppointmentQueryDto, CreateAppointmentDto, StatusDto,
            UpdateAppointmentDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::appointment::{
            Appointment, AppointmentStatus, CreateAppointmentParam, UpdateAppointmentParam,
        },
        service::appointment::AppointmentService,
        state::AppState,
    },
};

/// Tag for grouping appointment endpoints in OpenAPI documentation
pub static APPOINTMENT_TAG: &str = "appointment";

fn into_dtos(appointments: Vec<Appointment>) -> Vec<AppointmentDto> {
    appointments.into_iter().map(Appointment::into_dto).collect()
}

/// List appointments, newest first.
///
/// Staff see every appointment, clients only their own. A numeric `search` narrows the list
/// to appointments whose client id or master id equals it.
///
/// # Access Control
/// - `Authenticated` - Results are limited to the caller's own appointments for clients
#[utoipa::path(
    get,
    path = "/api/appointments",
    tag = APPOINTMENT_TAG,
    params(AppointmentQueryDto),
    responses(
        (status = 200, description = "Visible appointments", body = Vec<AppointmentDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_appointments(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<AppointmentQueryDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Authenticated])
        .await?;

    let service = AppointmentService::new(&state.db);
    let search = query.search.as_deref().filter(|q| !q.trim().is_empty());

    let mut appointments = match search {
        Some(q) => service.search(q).await?,
        None if user.role.is_staff() => service.get_all().await?,
        None => service.get_by_client(user.id).await?,
    };

    if !user.role.is_staff() {
        appointments.retain(|a| a.client_id == user.id);
    }

    Ok((StatusCode::OK, Json(into_dtos(appointments))))
}

/// Get one appointment.
///
/// # Access Control
/// - `Authenticated` - Clients may only read their own appointments
#[utoipa::path(
    get,
    path = "/api/appointments/{id}",
    tag = APPOINTMENT_TAG,
    params(("id" = i32, Path, description = "Appointment ID")),
    responses(
        (status = 200, description = "The appointment", body = AppointmentDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Appointment belongs to another client", body = ErrorDto),
        (status = 404, description = "Appointment not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_appointment_by_id(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Authenticated])
        .await?;

    let appointment = AppointmentService::new(&state.db).get_by_id(id).await?;
    AuthGuard::require_owner_or_staff(&user, appointment.client_id)?;

    Ok((StatusCode::OK, Json(appointment.into_dto())))
}

/// Book an appointment.
///
/// Clients always book for themselves and their bookings start out scheduled; a `client_id`
/// or `status` they send is ignored. Staff may name the client and the initial status, and
/// book for the caller when `client_id` is omitted.
///
/// # Returns
/// - `201 Created` - The booking
/// - `400 Bad Request` - Unknown client, master or service
/// - `409 Conflict` - The master already has an active appointment at that date and time
#[utoipa::path(
    post,
    path = "/api/appointments",
    tag = APPOINTMENT_TAG,
    request_body = CreateAppointmentDto,
    responses(
        (status = 201, description = "Appointment booked", body = AppointmentDto),
        (status = 400, description = "Unknown client, master or service", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 409, description = "Time slot already taken", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_appointment(
    State(state): State<AppState>,
    session: Session,
    Json(mut payload): Json<CreateAppointmentDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Authenticated])
        .await?;

    let client_id = if user.role.is_staff() {
        payload.client_id.unwrap_or(user.id)
    } else {
        payload.status = None;
        user.id
    };

    let appointment = AppointmentService::new(&state.db)
        .create(CreateAppointmentParam::from_dto(client_id, payload))
        .await?;

    Ok((StatusCode::CREATED, Json(appointment.into_dto())))
}

/// Update an appointment. Omitted fields keep their value.
///
/// # Access Control
/// - `Staff` - Administrators and masters
#[utoipa::path(
    put,
    path = "/api/appointments/{id}",
    tag = APPOINTMENT_TAG,
    params(("id" = i32, Path, description = "Appointment ID")),
    request_body = UpdateAppointmentDto,
    responses(
        (status = 200, description = "Appointment updated", body = AppointmentDto),
        (status = 400, description = "Unknown client, master or service", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not staff", body = ErrorDto),
        (status = 404, description = "Appointment not found", body = ErrorDto),
        (status = 409, description = "Time slot already taken", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_appointment(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateAppointmentDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Staff])
        .await?;

    let appointment = AppointmentService::new(&state.db)
        .update(id, UpdateAppointmentParam::from_dto(payload))
        .await?;

    Ok((StatusCode::OK, Json(appointment.into_dto())))
}

#[utoipa::path(
    delete,
    path = "/api/appointments/{id}",
    tag = APPOINTMENT_TAG,
    params(("id" = i32, Path, description = "Appointment ID")),
    responses(
        (status = 204, description = "Appointment deleted"),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not staff", body = ErrorDto),
        (status = 404, description = "Appointment not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_appointment(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Staff])
        .await?;

    AppointmentService::new(&state.db).delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Cancel an appointment, freeing the master's time slot.
///
/// # Access Control
/// - `Authenticated` - Clients may only cancel their own appointments
#[utoipa::path(
    put,
    path = "/api/appointments/{id}/cancel",
    tag = APPOINTMENT_TAG,
    params(("id" = i32, Path, description = "Appointment ID")),
    responses(
        (status = 200, description = "Appointment cancelled", body = AppointmentDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Appointment belongs to another client", body = ErrorDto),
        (status = 404, description = "Appointment not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn cancel_appointment(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Authenticated])
        .await?;

    let service = AppointmentService::new(&state.db);
    let appointment = service.get_by_id(id).await?;
    AuthGuard::require_owner_or_staff(&user, appointment.client_id)?;

    let appointment = service.cancel(id).await?;

    Ok((StatusCode::OK, Json(appointment.into_dto())))
}

#[utoipa::path(
    put,
    path = "/api/appointments/{id}/complete",
    tag = APPOINTMENT_TAG,
    params(("id" = i32, Path, description = "Appointment ID")),
    responses(
        (status = 200, description = "Appointment completed", body = AppointmentDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not staff", body = ErrorDto),
        (status = 404, description = "Appointment not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn complete_appointment(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Staff])
        .await?;

    let appointment = AppointmentService::new(&state.db).complete(id).await?;

    Ok((StatusCode::OK, Json(appointment.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/appointments/client/{client_id}",
    tag = APPOINTMENT_TAG,
    params(("client_id" = i32, Path, description = "Client user ID")),
    responses(
        (status = 200, description = "The client's appointments", body = Vec<AppointmentDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Another client's appointments", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_appointments_by_client(
    State(state): State<AppState>,
    session: Session,
    Path(client_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Authenticated])
        .await?;
    AuthGuard::require_owner_or_staff(&user, client_id)?;

    let appointments = AppointmentService::new(&state.db)
        .get_by_client(client_id)
        .await?;

    Ok((StatusCode::OK, Json(into_dtos(appointments))))
}

#[utoipa::path(
    get,
    path = "/api/appointments/master/{master_id}",
    tag = APPOINTMENT_TAG,
    params(("master_id" = i32, Path, description = "Master ID")),
    responses(
        (status = 200, description = "The master's appointments", body = Vec<AppointmentDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not staff", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_appointments_by_master(
    State(state): State<AppState>,
    session: Session,
    Path(master_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Staff])
        .await?;

    let appointments = AppointmentService::new(&state.db)
        .get_by_master(master_id)
        .await?;

    Ok((StatusCode::OK, Json(into_dtos(appointments))))
}

/// A master's schedule for one day, in every status.
#[utoipa::path(
    get,
    path = "/api/appointments/master/{master_id}/date/{date}",
    tag = APPOINTMENT_TAG,
    params(
        ("master_id" = i32, Path, description = "Master ID"),
        ("date" = NaiveDate, Path, description = "Day, YYYY-MM-DD")
    ),
    responses(
        (status = 200, description = "The master's appointments that day", body = Vec<AppointmentDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not staff", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_appointments_by_master_and_date(
    State(state): State<AppState>,
    session: Session,
    Path((master_id, date)): Path<(i32, NaiveDate)>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Staff])
        .await?;

    let appointments = AppointmentService::new(&state.db)
        .get_by_master_and_date(master_id, date)
        .await?;

    Ok((StatusCode::OK, Json(into_dtos(appointments))))
}

#[utoipa::path(
    get,
    path = "/api/appointments/status/{status}",
    tag = APPOINTMENT_TAG,
    params(("status" = StatusDto, Path, description = "Status tag")),
    responses(
        (status = 200, description = "Appointments in the status", body = Vec<AppointmentDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not staff", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_appointments_by_status(
    State(state): State<AppState>,
    session: Session,
    Path(status): Path<StatusDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Staff])
        .await?;

    let appointments = AppointmentService::new(&state.db)
        .get_by_status(AppointmentStatus::from_dto(status))
        .await?;

    Ok((StatusCode::OK, Json(into_dtos(appointments))))
}
