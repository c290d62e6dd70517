use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{NaiveDate, NaiveTime, Utc};
use entity::sea_orm_active_enums::{AppointmentStatus, UserRole};
use sea_orm::EntityTrait;
use test_utils::factory::{self, appointment::AppointmentFactory};

use super::{json_body, HandlerTest};
use crate::{
    model::appointment::{
        AppointmentDto, AppointmentQueryDto, CreateAppointmentDto, StatusDto,
        UpdateAppointmentDto,
    },
    server::{
        controller::appointment::{
            cancel_appointment, complete_appointment, create_appointment, delete_appointment,
            get_appointment_by_id, get_appointments, get_appointments_by_client,
            update_appointment,
        },
        error::{auth::AuthError, AppError},
    },
};

fn tomorrow() -> NaiveDate {
    Utc::now().date_naive().succ_opt().unwrap()
}

fn eleven() -> NaiveTime {
    NaiveTime::from_hms_opt(11, 0, 0).unwrap()
}

async fn stored_status(test: &HandlerTest, id: i32) -> Result<AppointmentStatus, AppError> {
    let stored = entity::appointment::Entity::find_by_id(id)
        .one(&test.db)
        .await?
        .unwrap();

    Ok(stored.status)
}

/// Tests that a client booking ignores the status and client id sent in the request.
///
/// Expected: 201 with the caller as client and the booking scheduled
#[tokio::test]
async fn client_booking_is_scheduled_for_the_caller() -> Result<(), AppError> {
    let test = HandlerTest::new().await;
    let (other, master, service) = factory::helpers::create_booking_parties(&test.db).await?;
    let client = test.login_as(UserRole::Client).await?;

    let payload = CreateAppointmentDto {
        client_id: Some(other.id),
        master_id: master.id,
        service_id: service.id,
        date: tomorrow(),
        time: eleven(),
        status: Some(StatusDto::Completed),
    };
    let result = create_appointment(State(test.state.clone()), test.session.clone(), Json(payload))
        .await?;
    let (status, dto): (_, AppointmentDto) = json_body(result).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(dto.client_id, client.id);
    assert_eq!(dto.status, StatusDto::Scheduled);
    assert_eq!(stored_status(&test, dto.id).await?, AppointmentStatus::Scheduled);

    Ok(())
}

/// Tests that staff may book for another client with an explicit status.
#[tokio::test]
async fn staff_booking_keeps_client_and_status() -> Result<(), AppError> {
    let test = HandlerTest::new().await;
    let (client, master, service) = factory::helpers::create_booking_parties(&test.db).await?;
    test.login_as(UserRole::Master).await?;

    let payload = CreateAppointmentDto {
        client_id: Some(client.id),
        master_id: master.id,
        service_id: service.id,
        date: tomorrow(),
        time: eleven(),
        status: Some(StatusDto::Completed),
    };
    let result = create_appointment(State(test.state.clone()), test.session.clone(), Json(payload))
        .await?;
    let (status, dto): (_, AppointmentDto) = json_body(result).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(dto.client_id, client.id);
    assert_eq!(dto.status, StatusDto::Completed);

    Ok(())
}

/// Tests that a client cannot cancel another client's booking.
///
/// Expected: Err(AuthError::AccessDenied) and the booking stays scheduled
#[tokio::test]
async fn client_cannot_cancel_another_clients_booking() -> Result<(), AppError> {
    let test = HandlerTest::new().await;
    let (_, _, _, booking) =
        factory::helpers::create_appointment_with_dependencies(&test.db).await?;
    let client = test.login_as(UserRole::Client).await?;

    let result =
        cancel_appointment(State(test.state.clone()), test.session.clone(), Path(booking.id))
            .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccessDenied(id, _))) if id == client.id
    ));
    assert_eq!(stored_status(&test, booking.id).await?, AppointmentStatus::Scheduled);

    Ok(())
}

#[tokio::test]
async fn client_cancels_own_booking() -> Result<(), AppError> {
    let test = HandlerTest::new().await;
    let (_, master, service) = factory::helpers::create_booking_parties(&test.db).await?;
    let client = test.login_as(UserRole::Client).await?;
    let booking = AppointmentFactory::new(&test.db, client.id, master.id, service.id)
        .build()
        .await?;

    let result =
        cancel_appointment(State(test.state.clone()), test.session.clone(), Path(booking.id))
            .await?;
    let (status, dto): (_, AppointmentDto) = json_body(result).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(dto.status, StatusDto::Cancelled);

    Ok(())
}

/// Tests that completing, editing and deleting are closed to clients, even for their own
/// bookings.
///
/// Expected: Err(AuthError::AccessDenied) for each and the booking unchanged
#[tokio::test]
async fn client_cannot_complete_update_or_delete() -> Result<(), AppError> {
    let test = HandlerTest::new().await;
    let (_, master, service) = factory::helpers::create_booking_parties(&test.db).await?;
    let client = test.login_as(UserRole::Client).await?;
    let booking = AppointmentFactory::new(&test.db, client.id, master.id, service.id)
        .build()
        .await?;

    let completed =
        complete_appointment(State(test.state.clone()), test.session.clone(), Path(booking.id))
            .await;
    assert!(matches!(
        completed,
        Err(AppError::AuthErr(AuthError::AccessDenied(..)))
    ));

    let update = UpdateAppointmentDto {
        status: Some(StatusDto::Completed),
        ..Default::default()
    };
    let updated = update_appointment(
        State(test.state.clone()),
        test.session.clone(),
        Path(booking.id),
        Json(update),
    )
    .await;
    assert!(matches!(
        updated,
        Err(AppError::AuthErr(AuthError::AccessDenied(..)))
    ));

    let deleted =
        delete_appointment(State(test.state.clone()), test.session.clone(), Path(booking.id))
            .await;
    assert!(matches!(
        deleted,
        Err(AppError::AuthErr(AuthError::AccessDenied(..)))
    ));

    assert_eq!(stored_status(&test, booking.id).await?, AppointmentStatus::Scheduled);

    Ok(())
}

#[tokio::test]
async fn master_completes_booking() -> Result<(), AppError> {
    let test = HandlerTest::new().await;
    let (_, _, _, booking) =
        factory::helpers::create_appointment_with_dependencies(&test.db).await?;
    test.login_as(UserRole::Master).await?;

    let result =
        complete_appointment(State(test.state.clone()), test.session.clone(), Path(booking.id))
            .await?;
    let (status, dto): (_, AppointmentDto) = json_body(result).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(dto.status, StatusDto::Completed);

    Ok(())
}

/// Tests that clients only ever see their own bookings, whether listing, searching or
/// reading by id.
#[tokio::test]
async fn client_sees_only_own_bookings() -> Result<(), AppError> {
    let test = HandlerTest::new().await;
    let (other, master, service, foreign) =
        factory::helpers::create_appointment_with_dependencies(&test.db).await?;
    let client = test.login_as(UserRole::Client).await?;
    let own = AppointmentFactory::new(&test.db, client.id, master.id, service.id)
        .time(eleven())
        .build()
        .await?;

    let result = get_appointments(
        State(test.state.clone()),
        test.session.clone(),
        Query(AppointmentQueryDto::default()),
    )
    .await?;
    let (_, listed): (_, Vec<AppointmentDto>) = json_body(result).await;
    let ids: Vec<i32> = listed.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![own.id]);

    let search = AppointmentQueryDto {
        search: Some(other.id.to_string()),
    };
    let result =
        get_appointments(State(test.state.clone()), test.session.clone(), Query(search)).await?;
    let (_, searched): (_, Vec<AppointmentDto>) = json_body(result).await;
    assert!(searched.iter().all(|a| a.client_id == client.id));

    let by_id =
        get_appointment_by_id(State(test.state.clone()), test.session.clone(), Path(foreign.id))
            .await;
    assert!(matches!(
        by_id,
        Err(AppError::AuthErr(AuthError::AccessDenied(..)))
    ));

    let by_client = get_appointments_by_client(
        State(test.state.clone()),
        test.session.clone(),
        Path(other.id),
    )
    .await;
    assert!(matches!(
        by_client,
        Err(AppError::AuthErr(AuthError::AccessDenied(..)))
    ));

    let result =
        get_appointment_by_id(State(test.state.clone()), test.session.clone(), Path(own.id))
            .await?;
    let (status, dto): (_, AppointmentDto) = json_body(result).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(dto.client_id, client.id);

    Ok(())
}
