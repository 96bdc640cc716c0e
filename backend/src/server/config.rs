//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use expense_reports::domain::{CategoryRegistry, User};
use expense_reports::outbound::persistence::DbPool;

/// Where expenses, users and cached reports live.
pub enum Storage {
    /// PostgreSQL through the shared pool.
    Postgres(DbPool),
    /// Process memory; lost on restart. `users` seed the user directory.
    Memory { users: Vec<User> },
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) storage: Storage,
    pub(crate) categories: CategoryRegistry,
}

impl ServerConfig {
    /// In-memory storage with no users and only canonical categories.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            storage: Storage::Memory { users: Vec::new() },
            categories: CategoryRegistry::canonical_only(),
        }
    }

    /// Persist through PostgreSQL.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.storage = Storage::Postgres(pool);
        self
    }

    /// Keep data in memory, registering `users` up front.
    #[must_use]
    pub fn with_memory_users(mut self, users: Vec<User>) -> Self {
        self.storage = Storage::Memory { users };
        self
    }

    /// Accept the categories of `registry` when recording expenses.
    #[must_use]
    pub fn with_categories(mut self, registry: CategoryRegistry) -> Self {
        self.categories = registry;
        self
    }

    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
