use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        service::CreateServiceDto,
        transfer::{CollectionDto, FormatDto, ImportSummaryDto},
        user::CreateUserDto,
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        service::transfer::TransferService,
        state::AppState,
    },
};

pub static TRANSFER_TAG: &str = "export-import";

/// Download a whole collection as a JSON or CSV attachment.
///
/// # Access Control
/// - `Admin` - Only administrators may export
#[utoipa::path(
    get,
    path = "/api/export-import/export/{collection}/{format}",
    tag = TRANSFER_TAG,
    params(
        ("collection" = CollectionDto, Path, description = "Collection to export"),
        ("format" = FormatDto, Path, description = "`json` or `csv`")
    ),
    responses(
        (status = 200, description = "Export file, JSON or CSV depending on the format"),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not an administrator", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn export_collection(
    State(state): State<AppState>,
    session: Session,
    Path((collection, format)): Path<(CollectionDto, FormatDto)>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let file = TransferService::new(&state.db, &state.password_encoder)
        .export(collection, format)
        .await?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, file.content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file.filename),
            ),
        ],
        file.body,
    ))
}

/// Import users from a JSON array.
///
/// Each record is created like a regular account; invalid or duplicate records are skipped
/// and counted as failed.
#[utoipa::path(
    post,
    path = "/api/export-import/import/users/json",
    tag = TRANSFER_TAG,
    request_body = Vec<CreateUserDto>,
    responses(
        (status = 200, description = "Import summary", body = ImportSummaryDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not an administrator", body = ErrorDto)
    ),
)]
pub async fn import_users(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<Vec<CreateUserDto>>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let summary = TransferService::new(&state.db, &state.password_encoder)
        .import_users(payload)
        .await;

    Ok((StatusCode::OK, Json(summary)))
}

#[utoipa::path(
    post,
    path = "/api/export-import/import/services/json",
    tag = TRANSFER_TAG,
    request_body = Vec<CreateServiceDto>,
    responses(
        (status = 200, description = "Import summary", body = ImportSummaryDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not an administrator", body = ErrorDto)
    ),
)]
pub async fn import_services(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<Vec<CreateServiceDto>>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let summary = TransferService::new(&state.db, &state.password_encoder)
        .import_services(payload)
        .await;

    Ok((StatusCode::OK, Json(summary)))
}
