use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Collection that can be exported.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CollectionDto {
    Users,
    Masters,
    Services,
    Appointments,
    Reports,
}

impl CollectionDto {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Masters => "masters",
            Self::Services => "services",
            Self::Appointments => "appointments",
            Self::Reports => "reports",
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FormatDto {
    Json,
    Csv,
}

impl FormatDto {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Csv => "text/csv; charset=utf-8",
        }
    }
}

/// Outcome of a bulk import.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq, Eq)]
pub struct ImportSummaryDto {
    pub imported: usize,
    pub failed: usize,
}
