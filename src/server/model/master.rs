//! Master domain models and parameters.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::model::master::{CreateMasterDto, MasterDto, UpdateMasterDto};

/// Salon staff member who performs services, optionally linked to a login account.
#[derive(Debug, Clone, PartialEq)]
pub struct Master {
    pub id: i32,
    pub name: String,
    pub specialization: Option<String>,
    /// Years of experience.
    pub experience: i32,
    pub rating: Decimal,
    pub user_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl Master {
    pub fn into_dto(self) -> MasterDto {
        MasterDto {
            id: self.id,
            name: self.name,
            specialization: self.specialization,
            experience: self.experience,
            rating: self.rating,
            user_id: self.user_id,
            created_at: self.created_at,
        }
    }

    pub fn from_entity(entity: entity::master::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            specialization: entity.specialization,
            experience: entity.experience,
            rating: entity.rating,
            user_id: entity.user_id,
            created_at: entity.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateMasterParam {
    pub name: String,
    pub specialization: Option<String>,
    pub experience: i32,
    pub rating: Decimal,
    pub user_id: Option<i32>,
}

impl CreateMasterParam {
    /// Fills missing experience and rating with zero.
    pub fn from_dto(dto: CreateMasterDto) -> Self {
        Self {
            name: dto.name,
            specialization: dto.specialization,
            experience: dto.experience.unwrap_or(0),
            rating: dto.rating.unwrap_or(Decimal::ZERO),
            user_id: dto.user_id,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateMasterParam {
    pub name: Option<String>,
    pub specialization: Option<String>,
    pub experience: Option<i32>,
    pub rating: Option<Decimal>,
    pub user_id: Option<i32>,
}

impl UpdateMasterParam {
    pub fn from_dto(dto: UpdateMasterDto) -> Self {
        Self {
            name: dto.name,
            specialization: dto.specialization,
            experience: dto.experience,
            rating: dto.rating,
            user_id: dto.user_id,
        }
    }
}
