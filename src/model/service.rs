use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// A bookable salon service.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct ServiceDto {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    /// Duration in minutes.
    pub duration: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct CreateServiceDto {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub duration: i32,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, Default)]
pub struct UpdateServiceDto {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub duration: Option<i32>,
}

#[derive(Deserialize, IntoParams, Debug, Default)]
#[into_params(parameter_in = Query)]
pub struct ServiceQueryDto {
    /// Case-insensitive substring of the name or description.
    pub search: Option<String>,
}
