//! Salon service catalog management.

use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::service::ServiceRepository,
    error::AppError,
    model::service::{CreateServiceParam, Service, UpdateServiceParam},
};

/// Service managing the salon's catalog of offered services.
pub struct CatalogService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CatalogService<'a> {
    /// Creates a new CatalogService instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `CatalogService` - New service instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists services by name, narrowed to matches when a non-blank search is given.
    ///
    /// # Arguments
    /// - `search` - Case-insensitive substring of the name or description
    ///
    /// # Returns
    /// - `Ok(Vec<Service>)` - Matching services ordered by name
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn list(&self, search: Option<&str>) -> Result<Vec<Service>, AppError> {
        let repo = ServiceRepository::new(self.db);

        let services = match search.map(str::trim) {
            Some(query) if !query.is_empty() => repo.search(query).await?,
            _ => repo.get_all().await?,
        };

        Ok(services)
    }

    /// Gets one service.
    ///
    /// # Arguments
    /// - `id` - Service ID
    ///
    /// # Returns
    /// - `Ok(Service)` - The service
    /// - `Err(AppError::NotFound)` - No service with this ID
    pub async fn get_by_id(&self, id: i32) -> Result<Service, AppError> {
        ServiceRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Adds a service to the catalog.
    ///
    /// # Arguments
    /// - `param` - Name, optional description, price and duration in minutes
    ///
    /// # Returns
    /// - `Ok(Service)` - The created service
    /// - `Err(AppError::Validation)` - Blank name, non-positive price or duration
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn create(&self, param: CreateServiceParam) -> Result<Service, AppError> {
        validate_name(&param.name)?;
        validate_price(param.price)?;
        validate_duration(param.duration)?;

        Ok(ServiceRepository::new(self.db).create(param).await?)
    }

    /// Applies a partial update; omitted fields keep their value.
    ///
    /// # Arguments
    /// - `id` - Service ID
    /// - `param` - Fields to change
    ///
    /// # Returns
    /// - `Ok(Service)` - The updated service
    /// - `Err(AppError::Validation)` - A given field is invalid
    /// - `Err(AppError::NotFound)` - No service with this ID
    pub async fn update(&self, id: i32, param: UpdateServiceParam) -> Result<Service, AppError> {
        if let Some(name) = &param.name {
            validate_name(name)?;
        }
        if let Some(price) = param.price {
            validate_price(price)?;
        }
        if let Some(duration) = param.duration {
            validate_duration(duration)?;
        }

        ServiceRepository::new(self.db)
            .update(id, param)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Removes a service from the catalog.
    ///
    /// Appointments that booked it are kept and still name its ID; reports leave their price
    /// out of the income.
    ///
    /// # Arguments
    /// - `id` - Service ID
    ///
    /// # Returns
    /// - `Ok(())` - The service was deleted
    /// - `Err(AppError::NotFound)` - No service with this ID
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        if !ServiceRepository::new(self.db).delete(id).await? {
            return Err(not_found(id));
        }

        Ok(())
    }
}

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Service {} not found", id))
}

fn validate_name(name: &str) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::Validation("Name must not be blank".to_string()));
    }
    Ok(())
}

fn validate_price(price: Decimal) -> Result<(), AppError> {
    if price <= Decimal::ZERO {
        return Err(AppError::Validation("Price must be positive".to_string()));
    }
    Ok(())
}

fn validate_duration(duration: i32) -> Result<(), AppError> {
    if duration <= 0 {
        return Err(AppError::Validation("Duration must be positive".to_string()));
    }
    Ok(())
}
