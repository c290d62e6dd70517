use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Account role as exchanged over the API.
///
/// Serialized as the lowercase tag. The localized display names are also accepted on input
/// so that exports produced for people can be imported again.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RoleDto {
    #[serde(alias = "Администратор", alias = "ADMIN")]
    Administrator,
    #[serde(alias = "Мастер", alias = "MASTER")]
    Master,
    #[serde(alias = "Клиент", alias = "CLIENT")]
    Client,
}

impl RoleDto {
    /// Human-readable name shown in dashboards and exports.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Administrator => "Администратор",
            Self::Master => "Мастер",
            Self::Client => "Клиент",
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct UserDto {
    pub id: i32,
    pub username: String,
    pub role: RoleDto,
    pub role_display: String,
    pub email: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct CreateUserDto {
    pub username: String,
    pub password: String,
    /// Defaults to `client` when omitted.
    pub role: Option<RoleDto>,
    pub email: String,
    pub phone: Option<String>,
}

/// Partial update; omitted fields keep their stored value.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, Default)]
pub struct UpdateUserDto {
    pub username: Option<String>,
    /// Re-hashed when present and non-empty.
    pub password: Option<String>,
    pub role: Option<RoleDto>,
    pub email: Option<String>,
    pub phone: Option<String>,
}
