use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct MasterDto {
    pub id: i32,
    pub name: String,
    pub specialization: Option<String>,
    pub experience: i32,
    pub rating: Decimal,
    pub user_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct CreateMasterDto {
    pub name: String,
    pub specialization: Option<String>,
    /// Years of experience, defaults to 0.
    pub experience: Option<i32>,
    /// Rating from 0 to 5, defaults to 0.
    pub rating: Option<Decimal>,
    pub user_id: Option<i32>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, Default)]
pub struct UpdateMasterDto {
    pub name: Option<String>,
    pub specialization: Option<String>,
    pub experience: Option<i32>,
    pub rating: Option<Decimal>,
    pub user_id: Option<i32>,
}
