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
        report::{CreateReportDto, ReportDto, ReportRangeDto, UpdateReportDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::report::{CreateReportParam, Report, UpdateReportParam},
        service::report::ReportService,
        state::AppState,
    },
};

/// Tag for grouping report endpoints in OpenAPI documentation
pub static REPORT_TAG: &str = "report";

fn into_dtos(reports: Vec<Report>) -> Vec<ReportDto> {
    reports.into_iter().map(Report::into_dto).collect()
}

/// List all stored reports, newest date first.
///
/// # Access Control
/// - `Staff` - Administrators and masters
#[utoipa::path(
    get,
    path = "/api/reports",
    tag = REPORT_TAG,
    responses(
        (status = 200, description = "All reports", body = Vec<ReportDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not staff", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_reports(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Staff])
        .await?;

    let reports = ReportService::new(&state.db).get_all().await?;

    Ok((StatusCode::OK, Json(into_dtos(reports))))
}

/// List reports whose date falls within the inclusive range, oldest first.
#[utoipa::path(
    get,
    path = "/api/reports/range",
    tag = REPORT_TAG,
    params(ReportRangeDto),
    responses(
        (status = 200, description = "Reports in range", body = Vec<ReportDto>),
        (status = 400, description = "Start date after end date", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not staff", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_reports_by_range(
    State(state): State<AppState>,
    session: Session,
    Query(range): Query<ReportRangeDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Staff])
        .await?;

    let reports = ReportService::new(&state.db)
        .get_by_date_range(range.start_date, range.end_date)
        .await?;

    Ok((StatusCode::OK, Json(into_dtos(reports))))
}

#[utoipa::path(
    get,
    path = "/api/reports/{id}",
    tag = REPORT_TAG,
    params(("id" = i32, Path, description = "Report ID")),
    responses(
        (status = 200, description = "The report", body = ReportDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not staff", body = ErrorDto),
        (status = 404, description = "Report not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_report_by_id(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Staff])
        .await?;

    let report = ReportService::new(&state.db).get_by_id(id).await?;

    Ok((StatusCode::OK, Json(report.into_dto())))
}

/// Generate and store the report for a date from its completed appointments.
///
/// Generating the same date twice stores two reports.
#[utoipa::path(
    post,
    path = "/api/reports/generate/{date}",
    tag = REPORT_TAG,
    params(("date" = NaiveDate, Path, description = "Report date, YYYY-MM-DD")),
    responses(
        (status = 201, description = "Report generated", body = ReportDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not staff", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn generate_report(
    State(state): State<AppState>,
    session: Session,
    Path(date): Path<NaiveDate>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Staff])
        .await?;

    let report = ReportService::new(&state.db)
        .generate_for_date(date)
        .await?;

    Ok((StatusCode::CREATED, Json(report.into_dto())))
}

/// Store a manually compiled report.
#[utoipa::path(
    post,
    path = "/api/reports",
    tag = REPORT_TAG,
    request_body = CreateReportDto,
    responses(
        (status = 201, description = "Report created", body = ReportDto),
        (status = 400, description = "Negative totals", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not staff", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_report(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateReportDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Staff])
        .await?;

    let report = ReportService::new(&state.db)
        .create(CreateReportParam::from_dto(payload))
        .await?;

    Ok((StatusCode::CREATED, Json(report.into_dto())))
}

#[utoipa::path(
    put,
    path = "/api/reports/{id}",
    tag = REPORT_TAG,
    params(("id" = i32, Path, description = "Report ID")),
    request_body = UpdateReportDto,
    responses(
        (status = 200, description = "Report updated", body = ReportDto),
        (status = 400, description = "Negative totals", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not staff", body = ErrorDto),
        (status = 404, description = "Report not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_report(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateReportDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Staff])
        .await?;

    let report = ReportService::new(&state.db)
        .update(id, UpdateReportParam::from_dto(payload))
        .await?;

    Ok((StatusCode::OK, Json(report.into_dto())))
}

#[utoipa::path(
    delete,
    path = "/api/reports/{id}",
    tag = REPORT_TAG,
    params(("id" = i32, Path, description = "Report ID")),
    responses(
        (status = 204, description = "Report deleted"),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not staff", body = ErrorDto),
        (status = 404, description = "Report not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_report(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Staff])
        .await?;

    ReportService::new(&state.db).delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
