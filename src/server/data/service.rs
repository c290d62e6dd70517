//! Salon service (catalog) data repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryOrder,
};

use crate::server::model::service::{CreateServiceParam, Service, UpdateServiceParam};

pub struct ServiceRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ServiceRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, param: CreateServiceParam) -> Result<Service, DbErr> {
        let entity = entity::service::ActiveModel {
            name: ActiveValue::Set(param.name),
            description: ActiveValue::Set(param.description),
            price: ActiveValue::Set(param.price),
            duration: ActiveValue::Set(param.duration),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Service::from_entity(entity))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Service>, DbErr> {
        let entity = entity::prelude::Service::find_by_id(id).one(self.db).await?;

        Ok(entity.map(Service::from_entity))
    }

    /// Gets all services ordered by name.
    pub async fn get_all(&self) -> Result<Vec<Service>, DbErr> {
        let entities = entity::prelude::Service::find()
            .order_by_asc(entity::service::Column::Name)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Service::from_entity).collect())
    }

    /// Finds services whose name or description contains `query`, ignoring case.
    ///
    /// Matching happens after loading because SQLite's `LIKE` only folds ASCII case and
    /// service names are mostly Cyrillic.
    pub async fn search(&self, query: &str) -> Result<Vec<Service>, DbErr> {
        let needle = query.to_lowercase();

        let services = self
            .get_all()
            .await?
            .into_iter()
            .filter(|service| {
                service.name.to_lowercase().contains(&needle)
                    || service
                        .description
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(&needle))
            })
            .collect();

        Ok(services)
    }

    pub async fn update(
        &self,
        id: i32,
        param: UpdateServiceParam,
    ) -> Result<Option<Service>, DbErr> {
        let Some(entity) = entity::prelude::Service::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active: entity::service::ActiveModel = entity.into();

        if let Some(name) = param.name {
            active.name = ActiveValue::Set(name);
        }
        if let Some(description) = param.description {
            active.description = ActiveValue::Set(Some(description));
        }
        if let Some(price) = param.price {
            active.price = ActiveValue::Set(price);
        }
        if let Some(duration) = param.duration {
            active.duration = ActiveValue::Set(duration);
        }

        let entity = active.update(self.db).await?;

        Ok(Some(Service::from_entity(entity)))
    }

    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Service::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count(&self) -> Result<u64, DbErr> {
        entity::prelude::Service::find().count(self.db).await
    }
}
