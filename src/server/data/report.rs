//! Report data repository for database operations.

use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

use crate::server::model::report::{CreateReportParam, Report, UpdateReportParam};

pub struct ReportRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ReportRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, param: CreateReportParam) -> Result<Report, DbErr> {
        let entity = entity::report::ActiveModel {
            report_date: ActiveValue::Set(param.report_date),
            total_clients: ActiveValue::Set(param.total_clients),
            total_income: ActiveValue::Set(param.total_income),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Report::from_entity(entity))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Report>, DbErr> {
        let entity = entity::prelude::Report::find_by_id(id).one(self.db).await?;

        Ok(entity.map(Report::from_entity))
    }

    /// Gets all reports, most recent report date first.
    pub async fn get_all(&self) -> Result<Vec<Report>, DbErr> {
        let entities = entity::prelude::Report::find()
            .order_by_desc(entity::report::Column::ReportDate)
            .order_by_desc(entity::report::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Report::from_entity).collect())
    }

    /// Gets reports whose date falls within `start..=end`, oldest first.
    pub async fn get_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Report>, DbErr> {
        let entities = entity::prelude::Report::find()
            .filter(entity::report::Column::ReportDate.between(start, end))
            .order_by_asc(entity::report::Column::ReportDate)
            .order_by_asc(entity::report::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Report::from_entity).collect())
    }

    pub async fn update(&self, id: i32, param: UpdateReportParam) -> Result<Option<Report>, DbErr> {
        let Some(entity) = entity::prelude::Report::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active: entity::report::ActiveModel = entity.into();

        if let Some(report_date) = param.report_date {
            active.report_date = ActiveValue::Set(report_date);
        }
        if let Some(total_clients) = param.total_clients {
            active.total_clients = ActiveValue::Set(total_clients);
        }
        if let Some(total_income) = param.total_income {
            active.total_income = ActiveValue::Set(total_income);
        }

        let entity = active.update(self.db).await?;

        Ok(Some(Report::from_entity(entity)))
    }

    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Report::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
