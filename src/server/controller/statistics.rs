use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tower_sessions::Session;

use crate::{
    model::{api::ErrorDto, statistics::StatisticsDto},
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        service::statistics::StatisticsService,
        state::AppState,
    },
};

pub static STATISTICS_TAG: &str = "statistics";

/// Dashboard counts of users, masters, services and appointments.
#[utoipa::path(
    get,
    path = "/api/statistics",
    tag = STATISTICS_TAG,
    responses(
        (status = 200, description = "Current counts", body = StatisticsDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not an administrator", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_statistics(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let statistics = StatisticsService::new(&state.db).get().await?;

    Ok((StatusCode::OK, Json(statistics)))
}
