use sea_orm::DatabaseConnection;
use time::Duration;
use tower_sessions::{cookie::SameSite, Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;

use crate::server::{
    config::Config,
    data::user::UserRepository,
    error::AppError,
    model::user::{CreateUserParam, Role},
    service::user::UserService,
    util::password::PasswordEncoder,
};

/// Connects to the SQLite database and runs pending migrations.
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError::DbErr)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Creates the session layer backed by the application's SQLite pool.
///
/// Sessions expire after a week of inactivity.
pub async fn connect_to_session(
    db: &DatabaseConnection,
    config: &Config,
) -> Result<SessionManagerLayer<SqliteStore>, AppError> {
    let pool = db.get_sqlite_connection_pool();
    let session_store = SqliteStore::new(pool.clone());

    session_store.migrate().await?;

    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(config.session_secure)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(Duration::days(7)));

    Ok(session_layer)
}

/// Creates the configured administrator account when no administrator exists yet.
///
/// Without bootstrap credentials only a warning is logged, since the API is then
/// unusable for management until an administrator is added by hand.
pub async fn ensure_admin(
    db: &DatabaseConnection,
    config: &Config,
    password_encoder: &PasswordEncoder,
) -> Result<(), AppError> {
    if UserRepository::new(db).admin_exists().await? {
        return Ok(());
    }

    let Some(admin) = &config.admin else {
        tracing::warn!(
            "No administrator account exists; set ADMIN_USERNAME, ADMIN_PASSWORD and ADMIN_EMAIL to create one"
        );
        return Ok(());
    };

    let user = UserService::new(db, password_encoder)
        .create(CreateUserParam {
            username: admin.username.clone(),
            password: admin.password.clone(),
            role: Role::Administrator,
            email: admin.email.clone(),
            phone: None,
        })
        .await?;

    tracing::info!("Created administrator account '{}'", user.username);

    Ok(())
}
