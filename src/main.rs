mod model;
mod server;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::server::{
    config::Config, error::AppError, router, scheduler::daily_report, startup, state::AppState,
    util::password::PasswordEncoder,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let session = startup::connect_to_session(&db, &config).await?;
    let password_encoder = PasswordEncoder::default();

    startup::ensure_admin(&db, &config, &password_encoder).await?;

    let scheduler_db = db.clone();
    let report_cron = config.report_cron.clone();
    tokio::spawn(async move {
        if let Err(e) = daily_report::start_scheduler(scheduler_db, &report_cron).await {
            tracing::error!("Daily report scheduler error: {}", e);
        }
    });

    let app = router::router()
        .with_state(AppState::new(db, password_encoder))
        .layer(session)
        .layer(router::cors_layer(&config)?);

    let listener = TcpListener::bind(config.bind_address).await?;
    tracing::info!("Listening on {}", config.bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutting down");
}
