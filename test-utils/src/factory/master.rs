//! Master factory for creating test masters.

use crate::factory::helpers::next_id;
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test masters with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// let master = MasterFactory::new(&db)
///     .name("Anna")
///     .specialization(Some("Colorist".to_string()))
///     .user_id(Some(account.id))
///     .build()
///     .await?;
/// ```
pub struct MasterFactory<'a> {
    db: &'a DatabaseConnection,
    name: String,
    specialization: Option<String>,
    experience: i32,
    rating: Decimal,
    user_id: Option<i32>,
}

impl<'a> MasterFactory<'a> {
    /// Creates a new MasterFactory with default values.
    ///
    /// Defaults:
    /// - name: `"Master {id}"`
    /// - specialization: `Some("Haircut")`
    /// - experience: `3`
    /// - rating: `4`
    /// - user_id: `None`
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            name: format!("Master {}", id),
            specialization: Some("Haircut".to_string()),
            experience: 3,
            rating: Decimal::from(4),
            user_id: None,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn specialization(mut self, specialization: Option<String>) -> Self {
        self.specialization = specialization;
        self
    }

    pub fn experience(mut self, experience: i32) -> Self {
        self.experience = experience;
        self
    }

    pub fn rating(mut self, rating: Decimal) -> Self {
        self.rating = rating;
        self
    }

    /// Links the master to a user account.
    pub fn user_id(mut self, user_id: Option<i32>) -> Self {
        self.user_id = user_id;
        self
    }

    /// Builds and inserts the master entity into the database.
    pub async fn build(self) -> Result<entity::master::Model, DbErr> {
        entity::master::ActiveModel {
            name: ActiveValue::Set(self.name),
            specialization: ActiveValue::Set(self.specialization),
            experience: ActiveValue::Set(self.experience),
            rating: ActiveValue::Set(self.rating),
            user_id: ActiveValue::Set(self.user_id),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an unlinked master with default values.
pub async fn create_master(db: &DatabaseConnection) -> Result<entity::master::Model, DbErr> {
    MasterFactory::new(db).build().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{builder::TestBuilder, factory::user::create_user};
    use entity::prelude::*;

    #[tokio::test]
    async fn creates_master_with_defaults() -> Result<(), DbErr> {
        let test = TestBuilder::new()
            .with_table(User)
            .with_table(Master)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let master = create_master(db).await?;

        assert!(master.name.starts_with("Master "));
        assert_eq!(master.experience, 3);
        assert!(master.user_id.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn creates_master_linked_to_account() -> Result<(), DbErr> {
        let test = TestBuilder::new()
            .with_table(User)
            .with_table(Master)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let account = create_user(db).await?;
        let master = MasterFactory::new(db)
            .name("Anna")
            .user_id(Some(account.id))
            .build()
            .await?;

        assert_eq!(master.name, "Anna");
        assert_eq!(master.user_id, Some(account.id));

        Ok(())
    }
}
