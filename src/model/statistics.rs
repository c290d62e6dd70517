use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Headline counts for the dashboard.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq, Eq)]
pub struct StatisticsDto {
    pub total_users: u64,
    pub total_masters: u64,
    pub total_services: u64,
    pub total_appointments: u64,
    pub completed_appointments: u64,
    pub scheduled_appointments: u64,
}
