use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        appointment::{
            AppointmentDto, CreateAppointmentDto, StatusDto, UpdateAppointmentDto,
        },
        auth::{LoginDto, RegisterDto},
        master::{CreateMasterDto, MasterDto, UpdateMasterDto},
        report::{CreateReportDto, ReportDto, UpdateReportDto},
        service::{CreateServiceDto, ServiceDto, UpdateServiceDto},
        statistics::StatisticsDto,
        transfer::{CollectionDto, FormatDto, ImportSummaryDto},
        user::{CreateUserDto, RoleDto, UpdateUserDto, UserDto},
    },
    server::{
        config::Config,
        controller::{
            appointment::{self, APPOINTMENT_TAG},
            auth::{self, AUTH_TAG},
            master::{self, MASTER_TAG},
            report::{self, REPORT_TAG},
            service::{self, SERVICE_TAG},
            statistics::{self, STATISTICS_TAG},
            transfer::{self, TRANSFER_TAG},
            user::{self, USER_TAG},
        },
        error::{config::ConfigError, AppError},
        state::AppState,
    },
};

#[derive(OpenApi)]
#[openapi(
    info(title = "Salon administration API"),
    paths(
        auth::register,
        auth::login,
        auth::logout,
        auth::get_user,
        user::get_users,
        user::get_user_by_id,
        user::get_user_by_username,
        user::get_users_by_role,
        user::create_user,
        user::update_user,
        user::delete_user,
        master::get_masters,
        master::get_master_by_id,
        master::get_master_by_user_id,
        master::create_master,
        master::update_master,
        master::delete_master,
        service::get_services,
        service::get_service_by_id,
        service::create_service,
        service::update_service,
        service::delete_service,
        appointment::get_appointments,
        appointment::get_appointment_by_id,
        appointment::create_appointment,
        appointment::update_appointment,
        appointment::delete_appointment,
        appointment::cancel_appointment,
        appointment::complete_appointment,
        appointment::get_appointments_by_client,
        appointment::get_appointments_by_master,
        appointment::get_appointments_by_master_and_date,
        appointment::get_appointments_by_status,
        report::get_reports,
        report::get_reports_by_range,
        report::get_report_by_id,
        report::generate_report,
        report::create_report,
        report::update_report,
        report::delete_report,
        statistics::get_statistics,
        transfer::export_collection,
        transfer::import_users,
        transfer::import_services,
    ),
    components(schemas(
        ErrorDto,
        MessageDto,
        LoginDto,
        RegisterDto,
        RoleDto,
        UserDto,
        CreateUserDto,
        UpdateUserDto,
        MasterDto,
        CreateMasterDto,
        UpdateMasterDto,
        ServiceDto,
        CreateServiceDto,
        UpdateServiceDto,
        StatusDto,
        AppointmentDto,
        CreateAppointmentDto,
        UpdateAppointmentDto,
        ReportDto,
        CreateReportDto,
        UpdateReportDto,
        StatisticsDto,
        CollectionDto,
        FormatDto,
        ImportSummaryDto,
    )),
    tags(
        (name = AUTH_TAG, description = "Login, logout and registration"),
        (name = USER_TAG, description = "User accounts"),
        (name = MASTER_TAG, description = "Salon masters"),
        (name = SERVICE_TAG, description = "Service catalog"),
        (name = APPOINTMENT_TAG, description = "Bookings"),
        (name = REPORT_TAG, description = "Daily reports"),
        (name = STATISTICS_TAG, description = "Dashboard counts"),
        (name = TRANSFER_TAG, description = "Bulk export and import"),
    )
)]
pub struct ApiDoc;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", get(auth::logout))
        .route("/api/auth/user", get(auth::get_user))
        .route("/api/users", get(user::get_users).post(user::create_user))
        .route(
            "/api/users/{id}",
            get(user::get_user_by_id)
                .put(user::update_user)
                .delete(user::delete_user),
        )
        .route(
            "/api/users/username/{username}",
            get(user::get_user_by_username),
        )
        .route("/api/users/role/{role}", get(user::get_users_by_role))
        .route(
            "/api/masters",
            get(master::get_masters).post(master::create_master),
        )
        .route(
            "/api/masters/{id}",
            get(master::get_master_by_id)
                .put(master::update_master)
                .delete(master::delete_master),
        )
        .route(
            "/api/masters/user/{user_id}",
            get(master::get_master_by_user_id),
        )
        .route(
            "/api/services",
            get(service::get_services).post(service::create_service),
        )
        .route(
            "/api/services/{id}",
            get(service::get_service_by_id)
                .put(service::update_service)
                .delete(service::delete_service),
        )
        .route(
            "/api/appointments",
            get(appointment::get_appointments).post(appointment::create_appointment),
        )
        .route(
            "/api/appointments/{id}",
            get(appointment::get_appointment_by_id)
                .put(appointment::update_appointment)
                .delete(appointment::delete_appointment),
        )
        .route(
            "/api/appointments/{id}/cancel",
            put(appointment::cancel_appointment),
        )
        .route(
            "/api/appointments/{id}/complete",
            put(appointment::complete_appointment),
        )
        .route(
            "/api/appointments/client/{client_id}",
            get(appointment::get_appointments_by_client),
        )
        .route(
            "/api/appointments/master/{master_id}",
            get(appointment::get_appointments_by_master),
        )
        .route(
            "/api/appointments/master/{master_id}/date/{date}",
            get(appointment::get_appointments_by_master_and_date),
        )
        .route(
            "/api/appointments/status/{status}",
            get(appointment::get_appointments_by_status),
        )
        .route(
            "/api/reports",
            get(report::get_reports).post(report::create_report),
        )
        .route("/api/reports/range", get(report::get_reports_by_range))
        .route(
            "/api/reports/generate/{date}",
            post(report::generate_report),
        )
        .route(
            "/api/reports/{id}",
            get(report::get_report_by_id)
                .put(report::update_report)
                .delete(report::delete_report),
        )
        .route("/api/statistics", get(statistics::get_statistics))
        .route(
            "/api/export-import/export/{collection}/{format}",
            get(transfer::export_collection),
        )
        .route(
            "/api/export-import/import/users/json",
            post(transfer::import_users),
        )
        .route(
            "/api/export-import/import/services/json",
            post(transfer::import_services),
        )
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
}

/// Builds the CORS layer for the configured origin.
///
/// Without an origin no cross-origin request is allowed. Credentials are allowed so the
/// session cookie reaches the API from the configured frontend.
pub fn cors_layer(config: &Config) -> Result<CorsLayer, AppError> {
    let Some(origin) = &config.cors_origin else {
        return Ok(CorsLayer::new());
    };

    let origin = origin
        .parse::<HeaderValue>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            name: "CORS_ORIGIN".to_string(),
            reason: e.to_string(),
        })?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_every_route_group() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        for expected in [
            "/api/auth/login",
            "/api/users/{id}",
            "/api/masters",
            "/api/services/{id}",
            "/api/appointments/{id}/cancel",
            "/api/appointments/master/{master_id}/date/{date}",
            "/api/reports/range",
            "/api/statistics",
            "/api/export-import/export/{collection}/{format}",
        ] {
            assert!(
                paths.iter().any(|p| p.as_str() == expected),
                "missing {expected}"
            );
        }
    }

    #[test]
    fn malformed_cors_origin_is_config_error() {
        let config = Config::from_lookup(|name| match name {
            "DATABASE_URL" => Some("sqlite::memory:".to_string()),
            "CORS_ORIGIN" => Some("bad\norigin".to_string()),
            _ => None,
        })
        .unwrap();

        assert!(matches!(
            cors_layer(&config),
            Err(AppError::ConfigErr(ConfigError::InvalidEnvVar { .. }))
        ));
    }
}
