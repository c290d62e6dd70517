//! Master (staff) management.

use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::master::MasterRepository,
    error::AppError,
    model::master::{CreateMasterParam, Master, UpdateMasterParam},
};

const HAS_APPOINTMENTS: &str = "Master has appointments and cannot be deleted";

/// Service managing master profiles.
pub struct MasterService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> MasterService<'a> {
    /// Creates a new MasterService instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `MasterService` - New service instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists every master.
    ///
    /// # Returns
    /// - `Ok(Vec<Master>)` - All masters
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn get_all(&self) -> Result<Vec<Master>, AppError> {
        Ok(MasterRepository::new(self.db).get_all().await?)
    }

    /// Gets one master.
    ///
    /// # Arguments
    /// - `id` - Master ID
    ///
    /// # Returns
    /// - `Ok(Master)` - The master
    /// - `Err(AppError::NotFound)` - No master with this ID
    pub async fn get_by_id(&self, id: i32) -> Result<Master, AppError> {
        MasterRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Gets the master profile linked to a user account.
    ///
    /// # Arguments
    /// - `user_id` - ID of the linked account
    ///
    /// # Returns
    /// - `Ok(Master)` - The linked master
    /// - `Err(AppError::NotFound)` - No master is linked to the account
    pub async fn get_by_user_id(&self, user_id: i32) -> Result<Master, AppError> {
        MasterRepository::new(self.db)
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No master linked to user {}", user_id)))
    }

    /// Creates a master. An unknown `user_id` is a validation error.
    ///
    /// # Arguments
    /// - `param` - Name, specialization, experience, rating and optional linked account
    ///
    /// # Returns
    /// - `Ok(Master)` - The created master
    /// - `Err(AppError::Validation)` - Blank name, negative experience, rating outside 0 to 5
    ///   or unknown account
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn create(&self, param: CreateMasterParam) -> Result<Master, AppError> {
        validate_name(&param.name)?;
        validate_experience(param.experience)?;
        validate_rating(param.rating)?;

        MasterRepository::new(self.db)
            .create(param)
            .await
            .map_err(|e| AppError::from_write_err(e, "Master already exists"))
    }

    /// Applies a partial update; omitted fields keep their value.
    ///
    /// # Arguments
    /// - `id` - Master ID
    /// - `param` - Fields to change
    ///
    /// # Returns
    /// - `Ok(Master)` - The updated master
    /// - `Err(AppError::Validation)` - A given field is invalid
    /// - `Err(AppError::NotFound)` - No master with this ID
    pub async fn update(&self, id: i32, param: UpdateMasterParam) -> Result<Master, AppError> {
        if let Some(name) = &param.name {
            validate_name(name)?;
        }
        if let Some(experience) = param.experience {
            validate_experience(experience)?;
        }
        if let Some(rating) = param.rating {
            validate_rating(rating)?;
        }

        MasterRepository::new(self.db)
            .update(id, param)
            .await
            .map_err(|e| AppError::from_write_err(e, "Master already exists"))?
            .ok_or_else(|| not_found(id))
    }

    /// Deletes a master who has no appointments.
    ///
    /// # Arguments
    /// - `id` - Master ID
    ///
    /// # Returns
    /// - `Ok(())` - The master was deleted
    /// - `Err(AppError::Conflict)` - Appointments still reference the master
    /// - `Err(AppError::NotFound)` - No master with this ID
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let deleted = MasterRepository::new(self.db)
            .delete(id)
            .await
            .map_err(|e| AppError::from_delete_err(e, HAS_APPOINTMENTS))?;

        if !deleted {
            return Err(not_found(id));
        }

        Ok(())
    }
}

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Master {} not found", id))
}

fn validate_name(name: &str) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::Validation("Name must not be blank".to_string()));
    }
    Ok(())
}

fn validate_experience(experience: i32) -> Result<(), AppError> {
    if experience < 0 {
        return Err(AppError::Validation(
            "Experience must not be negative".to_string(),
        ));
    }
    Ok(())
}

fn validate_rating(rating: Decimal) -> Result<(), AppError> {
    if rating < Decimal::ZERO || rating > Decimal::from(5) {
        return Err(AppError::Validation(
            "Rating must be between 0 and 5".to_string(),
        ));
    }
    Ok(())
}
