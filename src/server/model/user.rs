//! User domain models and parameters.

use chrono::{DateTime, Utc};
use entity::sea_orm_active_enums::UserRole;

use crate::model::user::{CreateUserDto, RoleDto, UpdateUserDto, UserDto};

/// Closed set of account roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Administrator,
    Master,
    Client,
}

impl Role {
    pub fn from_entity(role: UserRole) -> Self {
        match role {
            UserRole::Administrator => Self::Administrator,
            UserRole::Master => Self::Master,
            UserRole::Client => Self::Client,
        }
    }

    pub fn into_entity(self) -> UserRole {
        match self {
            Self::Administrator => UserRole::Administrator,
            Self::Master => UserRole::Master,
            Self::Client => UserRole::Client,
        }
    }

    pub fn from_dto(role: RoleDto) -> Self {
        match role {
            RoleDto::Administrator => Self::Administrator,
            RoleDto::Master => Self::Master,
            RoleDto::Client => Self::Client,
        }
    }

    pub fn into_dto(self) -> RoleDto {
        match self {
            Self::Administrator => RoleDto::Administrator,
            Self::Master => RoleDto::Master,
            Self::Client => RoleDto::Client,
        }
    }

    /// Whether the role belongs to salon staff (administrators and masters).
    pub fn is_staff(self) -> bool {
        matches!(self, Self::Administrator | Self::Master)
    }
}

/// Salon account.
///
/// Carries the password hash so authentication can verify it; the hash never leaves the
/// server since `UserDto` has no field for it.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub password_hash: String,
    pub role: Role,
    pub email: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn into_dto(self) -> UserDto {
        let role = self.role.into_dto();
        UserDto {
            id: self.id,
            username: self.username,
            role,
            role_display: role.display_name().to_string(),
            email: self.email,
            phone: self.phone,
            created_at: self.created_at,
        }
    }

    /// Converts an entity model to a user domain model at the repository boundary.
    pub fn from_entity(entity: entity::user::Model) -> Self {
        Self {
            id: entity.id,
            username: entity.username,
            password_hash: entity.password_hash,
            role: Role::from_entity(entity.role),
            email: entity.email,
            phone: entity.phone,
            created_at: entity.created_at,
        }
    }
}

/// Parameters for creating a user. The password is plaintext until the service hashes it.
#[derive(Debug, Clone)]
pub struct CreateUserParam {
    pub username: String,
    pub password: String,
    pub role: Role,
    pub email: String,
    pub phone: Option<String>,
}

impl CreateUserParam {
    pub fn from_dto(dto: CreateUserDto) -> Self {
        Self {
            username: dto.username,
            password: dto.password,
            role: dto.role.map(Role::from_dto).unwrap_or(Role::Client),
            email: dto.email,
            phone: dto.phone,
        }
    }
}

/// Partial user update. `None` fields keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct UpdateUserParam {
    pub username: Option<String>,
    pub password: Option<String>,
    pub role: Option<Role>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl UpdateUserParam {
    pub fn from_dto(dto: UpdateUserDto) -> Self {
        Self {
            username: dto.username,
            password: dto.password,
            role: dto.role.map(Role::from_dto),
            email: dto.email,
            phone: dto.phone,
        }
    }
}

/// Column values written by the repository once the service has validated and hashed.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub username: Option<String>,
    pub password_hash: Option<String>,
    pub role: Option<Role>,
    pub email: Option<String>,
    pub phone: Option<String>,
}
