use sea_orm::DatabaseConnection;

use crate::{
    model::statistics::StatisticsDto,
    server::{
        data::{
            appointment::AppointmentRepository, master::MasterRepository,
            service::ServiceRepository, user::UserRepository,
        },
        error::AppError,
        model::appointment::AppointmentStatus,
    },
};

pub struct StatisticsService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> StatisticsService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get(&self) -> Result<StatisticsDto, AppError> {
        let appointments = AppointmentRepository::new(self.db);

        Ok(StatisticsDto {
            total_users: UserRepository::new(self.db).count().await?,
            total_masters: MasterRepository::new(self.db).count().await?,
            total_services: ServiceRepository::new(self.db).count().await?,
            total_appointments: appointments.count().await?,
            completed_appointments: appointments
                .count_by_status(AppointmentStatus::Completed)
                .await?,
            scheduled_appointments: appointments
                .count_by_status(AppointmentStatus::Scheduled)
                .await?,
        })
    }
}
