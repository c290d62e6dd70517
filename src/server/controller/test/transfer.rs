use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use entity::sea_orm_active_enums::UserRole;
use sea_orm::{EntityTrait, PaginatorTrait};

use super::HandlerTest;
use crate::{
    model::{
        service::CreateServiceDto,
        transfer::{CollectionDto, FormatDto},
        user::CreateUserDto,
    },
    server::{
        controller::transfer::{export_collection, import_services, import_users},
        error::{auth::AuthError, AppError},
    },
};

/// Tests that export and import are closed to every role but administrators.
///
/// Expected: Err(AuthError::AccessDenied) and nothing imported
#[tokio::test]
async fn transfer_requires_admin() -> Result<(), AppError> {
    let test = HandlerTest::new().await;

    for role in [UserRole::Client, UserRole::Master] {
        test.login_as(role).await?;

        let exported = export_collection(
            State(test.state.clone()),
            test.session.clone(),
            Path((CollectionDto::Users, FormatDto::Json)),
        )
        .await;
        assert!(matches!(
            exported,
            Err(AppError::AuthErr(AuthError::AccessDenied(..)))
        ));

        let users = vec![CreateUserDto {
            username: "imported".to_string(),
            password: "secret123".to_string(),
            role: None,
            email: "imported@example.com".to_string(),
            phone: None,
        }];
        let imported =
            import_users(State(test.state.clone()), test.session.clone(), Json(users)).await;
        assert!(matches!(
            imported,
            Err(AppError::AuthErr(AuthError::AccessDenied(..)))
        ));

        let services = vec![CreateServiceDto {
            name: "Manicure".to_string(),
            description: None,
            price: rust_decimal::Decimal::new(800, 0),
            duration: 30,
        }];
        let imported =
            import_services(State(test.state.clone()), test.session.clone(), Json(services))
                .await;
        assert!(matches!(
            imported,
            Err(AppError::AuthErr(AuthError::AccessDenied(..)))
        ));
    }

    assert_eq!(entity::service::Entity::find().count(&test.db).await?, 0);

    Ok(())
}

#[tokio::test]
async fn admin_downloads_export() -> Result<(), AppError> {
    let test = HandlerTest::new().await;
    test.login_as(UserRole::Administrator).await?;

    let response = export_collection(
        State(test.state.clone()),
        test.session.clone(),
        Path((CollectionDto::Services, FormatDto::Csv)),
    )
    .await?
    .into_response();

    assert_eq!(response.status(), StatusCode::OK);
    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .and_then(|v| v.to_str().ok())
        .unwrap();
    assert!(disposition.starts_with("attachment; filename="));

    Ok(())
}
