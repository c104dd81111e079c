use anyhow::Context;
use sqlx::Sqlite;
use sqlx::migrate::MigrateDatabase;
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;
use tracing::info;
use vibe_pages::config::AppConfig;
use vibe_pages::database::sqlite::SqliteRepository;
use vibe_pages::io::local::LocalContentReader;
use vibe_pages::services::seed::SeedService;
use vibe_pages::{AppState, app_router, logging};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // determine environment variables
    dotenv::dotenv().ok();
    logging::init_logging();

    // load centralized config
    let config = Arc::new(AppConfig::from_env()?);

    // verify db exists
    if !Sqlite::database_exists(&config.database_url)
        .await
        .unwrap_or(false)
    {
        info!(url = %config.database_url, "database missing, creating");
        Sqlite::create_database(&config.database_url)
            .await
            .with_context(|| format!("Unable to create database at {}", config.database_url))?;
    }

    // connect to our db
    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await
        .with_context(|| format!("Failed to create pool on {}", config.database_url))?;

    // run migrations
    sqlx::migrate!()
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    let store = Arc::new(SqliteRepository::new(pool));

    if config.seed_on_boot {
        let seeder = SeedService::new(
            store.clone(),
            store.clone(),
            Box::new(LocalContentReader::new(config.content_dir.clone())),
            config.content_dir.clone(),
        );
        let report = seeder.seed_all().await.context("Seeding aborted")?;
        for warning in &report.warnings {
            tracing::warn!("seed warning: {warning}");
        }
    }

    let state = AppState::new(store, config.clone()).context("Failed to load templates")?;
    let app = app_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %config.bind_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
