//! Bulk export of every collection and bulk import of users and services.

use sea_orm::DatabaseConnection;
use serde::Serialize;

use crate::{
    model::{
        service::CreateServiceDto,
        transfer::{CollectionDto, FormatDto, ImportSummaryDto},
        user::CreateUserDto,
    },
    server::{
        data::{
            appointment::AppointmentRepository, master::MasterRepository,
            report::ReportRepository, service::ServiceRepository, user::UserRepository,
        },
        error::{internal::InternalError, AppError},
        model::{service::CreateServiceParam, user::CreateUserParam},
        service::{catalog::CatalogService, user::UserService},
        util::password::PasswordEncoder,
    },
};

/// An encoded export ready to be sent as an attachment.
#[derive(Debug)]
pub struct ExportFile {
    pub filename: String,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

pub struct TransferService<'a> {
    db: &'a DatabaseConnection,
    password_encoder: &'a PasswordEncoder,
}

impl<'a> TransferService<'a> {
    pub fn new(db: &'a DatabaseConnection, password_encoder: &'a PasswordEncoder) -> Self {
        Self {
            db,
            password_encoder,
        }
    }

    /// Encodes a whole collection in the requested format.
    ///
    /// Users are exported through their public representation so password hashes never
    /// leave the server.
    pub async fn export(
        &self,
        collection: CollectionDto,
        format: FormatDto,
    ) -> Result<ExportFile, AppError> {
        let body = match collection {
            CollectionDto::Users => {
                let users = UserRepository::new(self.db).get_all().await?;
                let rows: Vec<_> = users.into_iter().map(|u| u.into_dto()).collect();
                encode(&rows, collection, format)?
            }
            CollectionDto::Masters => {
                let masters = MasterRepository::new(self.db).get_all().await?;
                let rows: Vec<_> = masters.into_iter().map(|m| m.into_dto()).collect();
                encode(&rows, collection, format)?
            }
            CollectionDto::Services => {
                let services = ServiceRepository::new(self.db).get_all().await?;
                let rows: Vec<_> = services.into_iter().map(|s| s.into_dto()).collect();
                encode(&rows, collection, format)?
            }
            CollectionDto::Appointments => {
                let appointments = AppointmentRepository::new(self.db).get_all().await?;
                let rows: Vec<_> = appointments.into_iter().map(|a| a.into_dto()).collect();
                encode(&rows, collection, format)?
            }
            CollectionDto::Reports => {
                let reports = ReportRepository::new(self.db).get_all().await?;
                let rows: Vec<_> = reports.into_iter().map(|r| r.into_dto()).collect();
                encode(&rows, collection, format)?
            }
        };

        tracing::info!(
            "Exported {} as {} ({} bytes)",
            collection.as_str(),
            format.extension(),
            body.len()
        );

        Ok(ExportFile {
            filename: format!("{}.{}", collection.as_str(), format.extension()),
            content_type: format.content_type(),
            body,
        })
    }

    /// Creates each user through the regular account path, counting the rejected ones.
    pub async fn import_users(&self, users: Vec<CreateUserDto>) -> ImportSummaryDto {
        let service = UserService::new(self.db, self.password_encoder);
        let mut summary = ImportSummaryDto {
            imported: 0,
            failed: 0,
        };

        for dto in users {
            let username = dto.username.clone();
            match service.create(CreateUserParam::from_dto(dto)).await {
                Ok(_) => summary.imported += 1,
                Err(e) => {
                    tracing::warn!("Skipping imported user '{}': {}", username, e);
                    summary.failed += 1;
                }
            }
        }

        summary
    }

    pub async fn import_services(&self, services: Vec<CreateServiceDto>) -> ImportSummaryDto {
        let catalog = CatalogService::new(self.db);
        let mut summary = ImportSummaryDto {
            imported: 0,
            failed: 0,
        };

        for dto in services {
            let name = dto.name.clone();
            match catalog.create(CreateServiceParam::from_dto(dto)).await {
                Ok(_) => summary.imported += 1,
                Err(e) => {
                    tracing::warn!("Skipping imported service '{}': {}", name, e);
                    summary.failed += 1;
                }
            }
        }

        summary
    }
}

fn encode<T: Serialize>(
    rows: &[T],
    collection: CollectionDto,
    format: FormatDto,
) -> Result<Vec<u8>, AppError> {
    let encoding_err = |reason: String| {
        AppError::from(InternalError::ExportEncoding {
            collection: collection.as_str().to_string(),
            format: format.extension().to_string(),
            reason,
        })
    };

    match format {
        FormatDto::Json => serde_json::to_vec_pretty(rows).map_err(|e| encoding_err(e.to_string())),
        FormatDto::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            for row in rows {
                writer
                    .serialize(row)
                    .map_err(|e| encoding_err(e.to_string()))?;
            }
            writer
                .into_inner()
                .map_err(|e| encoding_err(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use test_utils::{builder::TestBuilder, factory};

    fn user(username: &str, email: &str) -> CreateUserDto {
        CreateUserDto {
            username: username.to_string(),
            password: "secret".to_string(),
            role: None,
            email: email.to_string(),
            phone: None,
        }
    }

    #[tokio::test]
    async fn exports_services_as_json_and_csv() -> Result<(), AppError> {
        let test = TestBuilder::new().with_salon_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        factory::service::ServiceFactory::new(db)
            .name("Стрижка")
            .price(Decimal::from(500))
            .build()
            .await?;

        let encoder = PasswordEncoder::fast();
        let transfer = TransferService::new(db, &encoder);

        let json = transfer
            .export(CollectionDto::Services, FormatDto::Json)
            .await?;
        assert_eq!(json.filename, "services.json");
        assert_eq!(json.content_type, "application/json");
        let parsed: serde_json::Value = serde_json::from_slice(&json.body).unwrap();
        assert_eq!(parsed[0]["name"], "Стрижка");

        let csv = transfer
            .export(CollectionDto::Services, FormatDto::Csv)
            .await?;
        let text = String::from_utf8(csv.body).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("id,name,description,price,duration,created_at")
        );
        assert!(lines.next().unwrap().contains("Стрижка"));

        Ok(())
    }

    /// Tests that exported users never carry password hashes.
    #[tokio::test]
    async fn user_export_omits_password_hash() -> Result<(), AppError> {
        let test = TestBuilder::new().with_salon_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        factory::create_user(db).await?;

        let encoder = PasswordEncoder::fast();
        let export = TransferService::new(db, &encoder)
            .export(CollectionDto::Users, FormatDto::Json)
            .await?;
        let text = String::from_utf8(export.body).unwrap();

        assert!(!text.contains("password"));
        assert!(!text.contains("not-a-real-hash"));

        Ok(())
    }

    #[tokio::test]
    async fn empty_collection_exports_empty_array() -> Result<(), AppError> {
        let test = TestBuilder::new().with_salon_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let encoder = PasswordEncoder::fast();
        let export = TransferService::new(db, &encoder)
            .export(CollectionDto::Reports, FormatDto::Json)
            .await?;

        assert_eq!(export.body, b"[]");

        Ok(())
    }

    /// Tests that rejected records are counted and the rest still imported.
    ///
    /// Expected: 2 imported, duplicate username and malformed email failed
    #[tokio::test]
    async fn user_import_counts_failures() -> Result<(), AppError> {
        let test = TestBuilder::new().with_salon_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let encoder = PasswordEncoder::fast();
        let summary = TransferService::new(db, &encoder)
            .import_users(vec![
                user("anna", "anna@example.com"),
                user("anna", "other@example.com"),
                user("boris", "not-an-email"),
                user("vera", "vera@example.com"),
            ])
            .await;

        assert_eq!(
            summary,
            ImportSummaryDto {
                imported: 2,
                failed: 2
            }
        );

        Ok(())
    }

    #[tokio::test]
    async fn service_import_validates_each_record() -> Result<(), AppError> {
        let test = TestBuilder::new().with_salon_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let service = |price: i64| CreateServiceDto {
            name: "Маникюр".to_string(),
            description: None,
            price: Decimal::from(price),
            duration: 45,
        };

        let encoder = PasswordEncoder::fast();
        let summary = TransferService::new(db, &encoder)
            .import_services(vec![service(800), service(0)])
            .await;

        assert_eq!(summary.imported, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(ServiceRepository::new(db).count().await?, 1);

        Ok(())
    }
}
