//! Error types and HTTP response handling.
//!
//! `AppError` is the top-level error type. It wraps domain-specific errors and implements
//! `IntoResponse`, so handlers can return `Result<_, AppError>` and use `?` throughout.

pub mod auth;
pub mod config;
pub mod internal;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{auth::AuthError, config::ConfigError, internal::InternalError},
};

/// Top-level application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup. Always 500.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Authentication or authorization error, delegated to `AuthError::into_response()`.
    #[error(transparent)]
    AuthErr(#[from] AuthError),

    #[error(transparent)]
    InternalErr(#[from] InternalError),

    /// Database operation error from SeaORM. Logged, 500.
    #[error(transparent)]
    DbErr(#[from] DbErr),

    /// SQLx driver error, raised while preparing the session store.
    #[error(transparent)]
    SqlxErr(#[from] sea_orm::SqlxError),

    #[error(transparent)]
    SessionErr(#[from] tower_sessions::session::Error),

    /// Cron scheduler error.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    #[error(transparent)]
    IoErr(#[from] std::io::Error),

    /// Requested record does not exist. 404.
    #[error("{0}")]
    NotFound(String),

    /// Request would break a uniqueness rule, such as a taken username or a booked slot. 409.
    #[error("{0}")]
    Conflict(String),

    /// Request payload failed validation. 400.
    #[error("{0}")]
    Validation(String),
}

impl AppError {
    /// Classifies a failed write by the constraint it violated.
    ///
    /// Unique violations become `Conflict` with the given message and foreign key violations
    /// become `Validation`, since they mean the payload referenced a record that does not
    /// exist. Anything else stays a database error.
    pub fn from_write_err(err: DbErr, conflict_message: impl Into<String>) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => Self::Conflict(conflict_message.into()),
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                Self::Validation("Referenced record does not exist".to_string())
            }
            _ => Self::DbErr(err),
        }
    }

    /// Classifies a failed delete.
    ///
    /// A foreign key violation means other rows still reference the record, which is
    /// reported as `Conflict` with the given message.
    pub fn from_delete_err(err: DbErr, conflict_message: impl Into<String>) -> Self {
        match err.sql_err() {
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                Self::Conflict(conflict_message.into())
            }
            _ => Self::DbErr(err),
        }
    }
}

/// Converts application errors into HTTP responses.
///
/// # Returns
/// - 400 Bad Request - `Validation`
/// - 404 Not Found - `NotFound`
/// - 409 Conflict - `Conflict`
/// - Variable - `AuthErr`, delegated to `AuthError::into_response()`
/// - 500 Internal Server Error - everything else, with the detail logged
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::AuthErr(err) => err.into_response(),
            Self::NotFound(msg) => {
                (StatusCode::NOT_FOUND, Json(ErrorDto { error: msg })).into_response()
            }
            Self::Conflict(msg) => {
                (StatusCode::CONFLICT, Json(ErrorDto { error: msg })).into_response()
            }
            Self::Validation(msg) => {
                (StatusCode::BAD_REQUEST, Json(ErrorDto { error: msg })).into_response()
            }
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper converting any displayable error into a 500 response with a generic body.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error: "Internal server error".to_string(),
            }),
        )
            .into_response()
    }
}
