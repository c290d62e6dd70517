use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        master::{CreateMasterDto, MasterDto, UpdateMasterDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::master::{CreateMasterParam, Master, UpdateMasterParam},
        service::master::MasterService,
        state::AppState,
    },
};

pub static MASTER_TAG: &str = "master";

/// List all masters ordered by name.
///
/// # Access Control
/// - `Authenticated` - Clients need the list to pick a master when booking
#[utoipa::path(
    get,
    path = "/api/masters",
    tag = MASTER_TAG,
    responses(
        (status = 200, description = "All masters", body = Vec<MasterDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_masters(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Authenticated])
        .await?;

    let masters = MasterService::new(&state.db).get_all().await?;
    let dtos: Vec<MasterDto> = masters.into_iter().map(Master::into_dto).collect();

    Ok((StatusCode::OK, Json(dtos)))
}

#[utoipa::path(
    get,
    path = "/api/masters/{id}",
    tag = MASTER_TAG,
    params(("id" = i32, Path, description = "Master ID")),
    responses(
        (status = 200, description = "The master", body = MasterDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not an administrator", body = ErrorDto),
        (status = 404, description = "Master not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_master_by_id(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let master = MasterService::new(&state.db).get_by_id(id).await?;

    Ok((StatusCode::OK, Json(master.into_dto())))
}

/// Get the master profile linked to a login account.
#[utoipa::path(
    get,
    path = "/api/masters/user/{user_id}",
    tag = MASTER_TAG,
    params(("user_id" = i32, Path, description = "Linked user ID")),
    responses(
        (status = 200, description = "The master", body = MasterDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not an administrator", body = ErrorDto),
        (status = 404, description = "No master linked to the user", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_master_by_user_id(
    State(state): State<AppState>,
    session: Session,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let master = MasterService::new(&state.db)
        .get_by_user_id(user_id)
        .await?;

    Ok((StatusCode::OK, Json(master.into_dto())))
}

/// Create a master. Experience and rating default to 0.
#[utoipa::path(
    post,
    path = "/api/masters",
    tag = MASTER_TAG,
    request_body = CreateMasterDto,
    responses(
        (status = 201, description = "Master created", body = MasterDto),
        (status = 400, description = "Invalid master data", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not an administrator", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_master(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateMasterDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let master = MasterService::new(&state.db)
        .create(CreateMasterParam::from_dto(payload))
        .await?;

    Ok((StatusCode::CREATED, Json(master.into_dto())))
}

#[utoipa::path(
    put,
    path = "/api/masters/{id}",
    tag = MASTER_TAG,
    params(("id" = i32, Path, description = "Master ID")),
    request_body = UpdateMasterDto,
    responses(
        (status = 200, description = "Master updated", body = MasterDto),
        (status = 400, description = "Invalid master data", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not an administrator", body = ErrorDto),
        (status = 404, description = "Master not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_master(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateMasterDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let master = MasterService::new(&state.db)
        .update(id, UpdateMasterParam::from_dto(payload))
        .await?;

    Ok((StatusCode::OK, Json(master.into_dto())))
}

#[utoipa::path(
    delete,
    path = "/api/masters/{id}",
    tag = MASTER_TAG,
    params(("id" = i32, Path, description = "Master ID")),
    responses(
        (status = 204, description = "Master deleted"),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not an administrator", body = ErrorDto),
        (status = 404, description = "Master not found", body = ErrorDto),
        (status = 409, description = "Master has appointments", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_master(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    MasterService::new(&state.db).delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
