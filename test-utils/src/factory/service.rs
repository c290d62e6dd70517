//! Service factory for creating catalog entries.

use crate::factory::helpers::next_id;
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test services with customizable fields.
pub struct ServiceFactory<'a> {
    db: &'a DatabaseConnection,
    name: String,
    description: Option<String>,
    price: Decimal,
    duration: i32,
}

impl<'a> ServiceFactory<'a> {
    /// Creates a new ServiceFactory with default values.
    ///
    /// Defaults:
    /// - name: `"Service {id}"`
    /// - description: `None`
    /// - price: `1000`
    /// - duration: `60`
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            name: format!("Service {}", id),
            description: None,
            price: Decimal::from(1000),
            duration: 60,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn price(mut self, price: Decimal) -> Self {
        self.price = price;
        self
    }

    pub fn duration(mut self, duration: i32) -> Self {
        self.duration = duration;
        self
    }

    /// Builds and inserts the service entity into the database.
    pub async fn build(self) -> Result<entity::service::Model, DbErr> {
        entity::service::ActiveModel {
            name: ActiveValue::Set(self.name),
            description: ActiveValue::Set(self.description),
            price: ActiveValue::Set(self.price),
            duration: ActiveValue::Set(self.duration),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a service with default values.
pub async fn create_service(db: &DatabaseConnection) -> Result<entity::service::Model, DbErr> {
    ServiceFactory::new(db).build().await
}

/// Creates a service with the given price.
pub async fn create_service_with_price(
    db: &DatabaseConnection,
    price: Decimal,
) -> Result<entity::service::Model, DbErr> {
    ServiceFactory::new(db).price(price).build().await
}
