//! Salon service (catalog entry) domain models and parameters.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::model::service::{CreateServiceDto, ServiceDto, UpdateServiceDto};

#[derive(Debug, Clone, PartialEq)]
pub struct Service {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    /// Duration in minutes.
    pub duration: i32,
    pub created_at: DateTime<Utc>,
}

impl Service {
    pub fn into_dto(self) -> ServiceDto {
        ServiceDto {
            id: self.id,
            name: self.name,
            description: self.description,
            price: self.price,
            duration: self.duration,
            created_at: self.created_at,
        }
    }

    pub fn from_entity(entity: entity::service::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            price: entity.price,
            duration: entity.duration,
            created_at: entity.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateServiceParam {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub duration: i32,
}

impl CreateServiceParam {
    pub fn from_dto(dto: CreateServiceDto) -> Self {
        Self {
            name: dto.name,
            description: dto.description,
            price: dto.price,
            duration: dto.duration,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateServiceParam {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub duration: Option<i32>,
}

impl UpdateServiceParam {
    pub fn from_dto(dto: UpdateServiceDto) -> Self {
        Self {
            name: dto.name,
            description: dto.description,
            price: dto.price,
            duration: dto.duration,
        }
    }
}
