use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        service::{CreateServiceDto, ServiceDto, ServiceQueryDto, UpdateServiceDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::service::{CreateServiceParam, Service, UpdateServiceParam},
        service::catalog::CatalogService,
        state::AppState,
    },
};

/// Tag for grouping salon service (catalog) endpoints in OpenAPI documentation
pub static SERVICE_TAG: &str = "service";

/// List the catalog, optionally filtered.
///
/// `search` matches a substring of the name or description, ignoring case. A blank search
/// lists everything.
///
/// # Access Control
/// - `Authenticated` - Every role may read the catalog
#[utoipa::path(
    get,
    path = "/api/services",
    tag = SERVICE_TAG,
    params(ServiceQueryDto),
    responses(
        (status = 200, description = "Matching services ordered by name", body = Vec<ServiceDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_services(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ServiceQueryDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Authenticated])
        .await?;

    let services = CatalogService::new(&state.db)
        .list(query.search.as_deref())
        .await?;
    let dtos: Vec<ServiceDto> = services.into_iter().map(Service::into_dto).collect();

    Ok((StatusCode::OK, Json(dtos)))
}

#[utoipa::path(
    get,
    path = "/api/services/{id}",
    tag = SERVICE_TAG,
    params(("id" = i32, Path, description = "Service ID")),
    responses(
        (status = 200, description = "The service", body = ServiceDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Service not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_service_by_id(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Authenticated])
        .await?;

    let service = CatalogService::new(&state.db).get_by_id(id).await?;

    Ok((StatusCode::OK, Json(service.into_dto())))
}

/// Add a service to the catalog. Price and duration must be positive.
#[utoipa::path(
    post,
    path = "/api/services",
    tag = SERVICE_TAG,
    request_body = CreateServiceDto,
    responses(
        (status = 201, description = "Service created", body = ServiceDto),
        (status = 400, description = "Invalid service data", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not an administrator", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_service(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateServiceDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let service = CatalogService::new(&state.db)
        .create(CreateServiceParam::from_dto(payload))
        .await?;

    Ok((StatusCode::CREATED, Json(service.into_dto())))
}

#[utoipa::path(
    put,
    path = "/api/services/{id}",
    tag = SERVICE_TAG,
    params(("id" = i32, Path, description = "Service ID")),
    request_body = UpdateServiceDto,
    responses(
        (status = 200, description = "Service updated", body = ServiceDto),
        (status = 400, description = "Invalid service data", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not an administrator", body = ErrorDto),
        (status = 404, description = "Service not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_service(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateServiceDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let service = CatalogService::new(&state.db)
        .update(id, UpdateServiceParam::from_dto(payload))
        .await?;

    Ok((StatusCode::OK, Json(service.into_dto())))
}

#[utoipa::path(
    delete,
    path = "/api/services/{id}",
    tag = SERVICE_TAG,
    params(("id" = i32, Path, description = "Service ID")),
    responses(
        (status = 204, description = "Service deleted"),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not an administrator", body = ErrorDto),
        (status = 404, description = "Service not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_service(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    CatalogService::new(&state.db).delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
