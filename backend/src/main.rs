//! Server entry point: loads settings, prepares storage and serves the API.

mod server;

use actix_web::web;
use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use expense_reports::domain::{User, UserDraft, UserId, UserValidationError};
use expense_reports::inbound::http::health::HealthState;
use expense_reports::outbound::persistence::{DbPool, run_pending_migrations};
use expense_reports::settings::AppSettings;
use server::{ServerConfig, create_server};

#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(|err| eyre!("failed to load settings: {err}"))?;
    let config = build_server_config(&settings).await?;

    let health_state = web::Data::new(HealthState::new());
    info!(bind_addr = %config.bind_addr(), "starting server");
    let server = create_server(health_state.clone(), config).wrap_err("failed to start server")?;
    let result = server.await;
    health_state.mark_unhealthy();
    result.wrap_err("server terminated with an error")
}

async fn build_server_config(settings: &AppSettings) -> Result<ServerConfig> {
    let config =
        ServerConfig::new(settings.bind_addr()?).with_categories(settings.category_registry()?);

    let Some(database_url) = settings.database_url() else {
        warn!("no database URL configured; expenses and reports are kept in memory only");
        let users = settings
            .memory_users()
            .into_iter()
            .map(placeholder_user)
            .collect::<Result<Vec<_>, _>>()
            .wrap_err("failed to seed in-memory users")?;
        return Ok(config.with_memory_users(users));
    };

    let applied = run_pending_migrations(database_url)
        .await
        .wrap_err("failed to migrate database")?;
    info!(applied, "database schema up to date");

    let pool = DbPool::new(settings.pool_config(database_url))
        .await
        .wrap_err("failed to build database pool")?;
    Ok(config.with_db_pool(pool))
}

/// Directory entry for a user id listed in `memory_users`.
fn placeholder_user(id: UserId) -> Result<User, UserValidationError> {
    User::new(UserDraft {
        id,
        first_name: "User".to_owned(),
        last_name: id.get().to_string(),
        birthday: None,
    })
}
