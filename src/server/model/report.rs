//! Report domain models and parameters.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::model::report::{CreateReportDto, ReportDto, UpdateReportDto};

/// Daily aggregate of completed appointments.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub id: i32,
    pub report_date: NaiveDate,
    /// Number of distinct clients with a completed appointment on the date.
    pub total_clients: i32,
    /// Sum of the prices of the services performed.
    pub total_income: Decimal,
    pub created_at: DateTime<Utc>,
}

impl Report {
    pub fn into_dto(self) -> ReportDto {
        ReportDto {
            id: self.id,
            report_date: self.report_date,
            total_clients: self.total_clients,
            total_income: self.total_income,
            created_at: self.created_at,
        }
    }

    pub fn from_entity(entity: entity::report::Model) -> Self {
        Self {
            id: entity.id,
            report_date: entity.report_date,
            total_clients: entity.total_clients,
            total_income: entity.total_income,
            created_at: entity.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateReportParam {
    pub report_date: NaiveDate,
    pub total_clients: i32,
    pub total_income: Decimal,
}

impl CreateReportParam {
    pub fn from_dto(dto: CreateReportDto) -> Self {
        Self {
            report_date: dto.report_date,
            total_clients: dto.total_clients,
            total_income: dto.total_income,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateReportParam {
    pub report_date: Option<NaiveDate>,
    pub total_clients: Option<i32>,
    pub total_income: Option<Decimal>,
}

impl UpdateReportParam {
    pub fn from_dto(dto: UpdateReportDto) -> Self {
        Self {
            report_date: dto.report_date,
            total_clients: dto.total_clients,
            total_income: dto.total_income,
        }
    }
}
