use entity::{prelude::User, sea_orm_active_enums::UserRole};
use test_utils::{builder::TestBuilder, factory};

use crate::server::{
    error::{auth::AuthError, AppError},
    middleware::{
        auth::{AuthGuard, Permission},
        session::AuthSession,
    },
    model::user::Role,
};

/// Tests that a request without a logged in user is rejected.
///
/// Expected: Err(AuthError::UserNotInSession)
#[tokio::test]
async fn rejects_anonymous_session() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_table(User).build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let result = AuthGuard::new(db, session)
        .require(&[Permission::Authenticated])
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::UserNotInSession))
    ));

    Ok(())
}

/// Tests that a session pointing at a deleted user is rejected.
///
/// Expected: Err(AuthError::UserNotInDatabase)
#[tokio::test]
async fn rejects_session_of_missing_user() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_table(User).build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    AuthSession::new(session).set_user_id(42).await?;

    let result = AuthGuard::new(db, session)
        .require(&[Permission::Authenticated])
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::UserNotInDatabase(42)))
    ));

    Ok(())
}

#[tokio::test]
async fn grants_admin_everything() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_table(User).build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let admin = factory::create_user_with_role(db, UserRole::Administrator).await?;
    AuthSession::new(session).set_user_id(admin.id).await?;

    let user = AuthGuard::new(db, session)
        .require(&[Permission::Authenticated, Permission::Staff, Permission::Admin])
        .await?;

    assert_eq!(user.id, admin.id);
    assert_eq!(user.role, Role::Administrator);

    Ok(())
}

/// Tests that masters pass staff checks but not admin checks.
#[tokio::test]
async fn master_is_staff_but_not_admin() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_table(User).build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let master = factory::create_user_with_role(db, UserRole::Master).await?;
    AuthSession::new(session).set_user_id(master.id).await?;

    let guard = AuthGuard::new(db, session);

    assert!(guard.require(&[Permission::Staff]).await.is_ok());
    assert!(matches!(
        guard.require(&[Permission::Admin]).await,
        Err(AppError::AuthErr(AuthError::AccessDenied(id, _))) if id == master.id
    ));

    Ok(())
}

#[tokio::test]
async fn client_is_denied_staff_access() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_table(User).build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let client = factory::create_user(db).await?;
    AuthSession::new(session).set_user_id(client.id).await?;

    let guard = AuthGuard::new(db, session);

    assert!(guard.require(&[Permission::Authenticated]).await.is_ok());
    assert!(matches!(
        guard.require(&[Permission::Staff]).await,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    Ok(())
}

/// Tests the ownership rule for appointment access.
#[tokio::test]
async fn clients_only_own_their_appointments() -> Result<(), AppError> {
    let test = TestBuilder::new().with_table(User).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let client = factory::create_user(db).await?;
    let master = factory::create_user_with_role(db, UserRole::Master).await?;

    let client = crate::server::model::user::User::from_entity(client);
    let master = crate::server::model::user::User::from_entity(master);

    assert!(AuthGuard::require_owner_or_staff(&client, client.id).is_ok());
    assert!(AuthGuard::require_owner_or_staff(&client, client.id + 100).is_err());
    assert!(AuthGuard::require_owner_or_staff(&master, client.id).is_ok());

    Ok(())
}

#[tokio::test]
async fn clears_session_on_logout() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_table(User).build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let client = factory::create_user(db).await?;
    let auth_session = AuthSession::new(session);
    auth_session.set_user_id(client.id).await?;
    assert!(auth_session.get_user_id().await?.is_some());

    auth_session.clear().await;

    assert!(auth_session.get_user_id().await?.is_none());

    Ok(())
}
