use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct ReportDto {
    pub id: i32,
    pub report_date: NaiveDate,
    pub total_clients: i32,
    pub total_income: Decimal,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct CreateReportDto {
    pub report_date: NaiveDate,
    pub total_clients: i32,
    pub total_income: Decimal,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, Default)]
pub struct UpdateReportDto {
    pub report_date: Option<NaiveDate>,
    pub total_clients: Option<i32>,
    pub total_income: Option<Decimal>,
}

/// Inclusive date range for report lookups.
#[derive(Deserialize, IntoParams, Debug)]
#[into_params(parameter_in = Query)]
pub struct ReportRangeDto {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}
