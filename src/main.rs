use std::net::TcpListener;
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;

use aafl_backend::run;
use aafl_backend::config::settings::get_config;
use aafl_backend::services::CommentaryService;
use aafl_backend::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let config = match get_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to read the config: {}", e);
            std::process::exit(1);
        }
    };

    let subscriber = get_subscriber(
        "aafl-backend".into(),
        config.application.log_level.clone(),
        std::io::stdout
    );
    init_subscriber(subscriber);

    // Only try to establish connection when actually used
    let connection_pool = match PgPoolOptions::new()
        .max_connections(16)
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .connect_lazy(config.database.connection_string().expose_secret())
    {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to create Postgres connection pool: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = sqlx::migrate!("./migrations").run(&connection_pool).await {
        tracing::error!("Failed to run database migrations: {}", e);
        std::process::exit(1);
    }

    let commentary = match CommentaryService::new(&config.commentary) {
        Ok(service) => {
            if service.is_remote() {
                if service.health_check().await {
                    tracing::info!("Commentary generator reachable");
                } else {
                    tracing::warn!("Commentary generator unreachable, matches will be recorded without commentary");
                }
            } else {
                tracing::info!("No commentary generator configured, using template commentary");
            }
            service
        }
        Err(e) => {
            tracing::error!("Failed to create commentary service: {}", e);
            std::process::exit(1);
        }
    };

    let address = format!("{}:{}", config.application.host, config.application.port);
    let listener = TcpListener::bind(&address)?;
    tracing::info!("Listening on {}", address);

    run(listener, connection_pool, commentary)?.await
}
