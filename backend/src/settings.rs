//! Application settings loaded via OrthoConfig.
//!
//! Values come from `EXPENSES_*` environment variables, command-line flags
//! or a configuration file, with the defaults below when absent.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::{Category, CategoryRegistry, CategoryValidationError, UserId};
use crate::outbound::persistence::PoolConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Errors raised while interpreting loaded settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address {value:?}: {message}")]
    BindAddr { value: String, message: String },
    #[error("invalid extra category {value:?}: {source}")]
    Category {
        value: String,
        source: CategoryValidationError,
    },
}

/// Runtime configuration of the server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "EXPENSES")]
pub struct AppSettings {
    /// PostgreSQL connection URL. Without one, data lives in memory only.
    pub database_url: Option<String>,
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// Maximum number of pooled database connections.
    #[ortho_config(default = 10)]
    pub pool_max_size: u32,
    /// Seconds to wait for a pooled connection before failing a request.
    #[ortho_config(default = 30)]
    pub pool_timeout_secs: u64,
    /// Categories accepted in addition to the canonical ones. The
    /// environment form is comma-separated.
    #[serde(default)]
    pub extra_categories: Vec<String>,
    /// User ids registered at startup when running without a database.
    #[serde(default)]
    pub memory_users: Vec<i64>,
}

impl AppSettings {
    /// Configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Listen address, defaulting to `0.0.0.0:8080`.
    ///
    /// # Errors
    ///
    /// [`SettingsError::BindAddr`] when the value is not a socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|err: std::net::AddrParseError| SettingsError::BindAddr {
            value: raw.to_owned(),
            message: err.to_string(),
        })
    }

    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size
    }

    pub fn pool_timeout(&self) -> Duration {
        Duration::from_secs(self.pool_timeout_secs)
    }

    /// Pool settings for `database_url`.
    pub fn pool_config(&self, database_url: &str) -> PoolConfig {
        PoolConfig::new(database_url)
            .with_max_size(self.pool_max_size())
            .with_connection_timeout(self.pool_timeout())
    }

    /// Category registry with the configured extras.
    ///
    /// # Errors
    ///
    /// [`SettingsError::Category`] when an entry is not a valid category
    /// name. Blank entries are skipped.
    pub fn category_registry(&self) -> Result<CategoryRegistry, SettingsError> {
        let extra = self
            .extra_categories
            .iter()
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
            .map(|name| {
                Category::new(name).map_err(|source| SettingsError::Category {
                    value: name.to_owned(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(CategoryRegistry::with_extra(extra))
    }

    /// Users known to the in-memory directory.
    pub fn memory_users(&self) -> Vec<UserId> {
        self.memory_users.iter().copied().map(UserId::new).collect()
    }
}
