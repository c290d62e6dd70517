use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body returned for every failed request.
#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct ErrorDto {
    pub error: String,
}

/// Plain confirmation body.
#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct MessageDto {
    pub message: String,
}
