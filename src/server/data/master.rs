//! Master data repository for database operations.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::master::{CreateMasterParam, Master, UpdateMasterParam};

pub struct MasterRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> MasterRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, param: CreateMasterParam) -> Result<Master, DbErr> {
        let entity = entity::master::ActiveModel {
            name: ActiveValue::Set(param.name),
            specialization: ActiveValue::Set(param.specialization),
            experience: ActiveValue::Set(param.experience),
            rating: ActiveValue::Set(param.rating),
            user_id: ActiveValue::Set(param.user_id),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Master::from_entity(entity))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Master>, DbErr> {
        let entity = entity::prelude::Master::find_by_id(id).one(self.db).await?;

        Ok(entity.map(Master::from_entity))
    }

    /// Finds the master profile linked to a user account.
    pub async fn find_by_user_id(&self, user_id: i32) -> Result<Option<Master>, DbErr> {
        let entity = entity::prelude::Master::find()
            .filter(entity::master::Column::UserId.eq(user_id))
            .one(self.db)
            .await?;

        Ok(entity.map(Master::from_entity))
    }

    /// Gets all masters ordered by name.
    pub async fn get_all(&self) -> Result<Vec<Master>, DbErr> {
        let entities = entity::prelude::Master::find()
            .order_by_asc(entity::master::Column::Name)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Master::from_entity).collect())
    }

    /// Applies a partial update.
    ///
    /// # Returns
    /// - `Ok(Some(Master))` - The updated master
    /// - `Ok(None)` - No master with that id
    pub async fn update(&self, id: i32, param: UpdateMasterParam) -> Result<Option<Master>, DbErr> {
        let Some(entity) = entity::prelude::Master::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active: entity::master::ActiveModel = entity.into();

        if let Some(name) = param.name {
            active.name = ActiveValue::Set(name);
        }
        if let Some(specialization) = param.specialization {
            active.specialization = ActiveValue::Set(Some(specialization));
        }
        if let Some(experience) = param.experience {
            active.experience = ActiveValue::Set(experience);
        }
        if let Some(rating) = param.rating {
            active.rating = ActiveValue::Set(rating);
        }
        if let Some(user_id) = param.user_id {
            active.user_id = ActiveValue::Set(Some(user_id));
        }

        let entity = active.update(self.db).await?;

        Ok(Some(Master::from_entity(entity)))
    }

    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Master::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count(&self) -> Result<u64, DbErr> {
        entity::prelude::Master::find().count(self.db).await
    }
}
