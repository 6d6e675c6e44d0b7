use std::error::Error;
use std::process::ExitCode;

use sqlx::postgres::PgPoolOptions;
use superheroes::{
    app,
    services::{
        credentials::{connect_options_from_env, credential_source_from_env},
        lease::spawn_lease_renewal,
    },
    telemetry::{get_subscriber, init_subscriber},
    utils::{constant::*, secret::{env_or, env_parse_or}},
};
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let subscriber = get_subscriber(env!("CARGO_PKG_NAME"), "info", std::io::stdout);
    if let Err(e) = init_subscriber(subscriber) {
        eprintln!("Failed to install tracing subscriber: {e}");
        return ExitCode::FAILURE;
    }

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Server failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn Error + Send + Sync>> {
    let source = credential_source_from_env()?;
    let mut options = connect_options_from_env()?;
    let mut lease = None;
    if let Some(creds) = source.fetch().await? {
        options = creds.apply(options);
        lease = creds.lease;
    }

    let max_connections = env_parse_or("DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS);
    let db_pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(DB_ACQUIRE_TIMEOUT)
        .connect_with(options)
        .await?;
    info!(max_connections, "Connected to database");

    sqlx::migrate!().run(&db_pool).await?;
    info!("Database migrations applied");

    // Dropping the handle detaches the task; it lives as long as the runtime.
    let _renewal = lease.and_then(|lease| spawn_lease_renewal(source, lease));

    let addr = env_or("APP_ADDR", DEFAULT_APP_ADDR);
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, "Server starting");

    axum::serve(listener, app(db_pool)).await?;
    Ok(())
}
