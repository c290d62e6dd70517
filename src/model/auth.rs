use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct LoginDto {
    pub username: String,
    pub password: String,
}

/// Public self-registration. The account is always created as a client.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct RegisterDto {
    pub username: String,
    pub password: String,
    pub email: String,
    pub phone: Option<String>,
}
