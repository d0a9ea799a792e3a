//! Command implementations

pub mod connection;
pub mod generate;
pub mod tables;

use crate::catalog::PostgresCatalog;
use crate::config::GeneratorConfig;
use anyhow::{Context, Result};
use clap::Args;
use modelgen_schema::RowErrorPolicy;
use std::time::Duration;

/// Connection flags shared by every command
#[derive(Debug, Clone, Default, Args)]
pub struct ConnectionArgs {
    /// Full connection URL (overrides the individual connection flags)
    #[arg(long)]
    pub database_url: Option<String>,

    /// Database host
    #[arg(long)]
    pub host: Option<String>,

    /// Database port
    #[arg(long)]
    pub port: Option<u16>,

    /// Database user
    #[arg(short = 'u', long)]
    pub user: Option<String>,

    /// Database password
    #[arg(short = 'p', long)]
    pub password: Option<String>,

    /// Database name
    #[arg(short = 'd', long)]
    pub database: Option<String>,

    /// SSL mode (disable, prefer, require, ...)
    #[arg(long = "ssl-mode", alias = "ssl")]
    pub ssl_mode: Option<String>,

    /// Schema whose base tables are read
    #[arg(long)]
    pub schema: Option<String>,

    /// Seconds to wait for the database connection
    #[arg(long)]
    pub connect_timeout: Option<u64>,

    /// Abort when more catalog rows than this fail to parse
    #[arg(long)]
    pub max_row_errors: Option<usize>,
}

impl ConnectionArgs {
    /// Layer the flags over the loaded configuration
    pub fn apply(&self, config: &mut GeneratorConfig) {
        let db = &mut config.database;
        if let Some(url) = &self.database_url {
            db.url = Some(url.clone());
        }
        if let Some(host) = &self.host {
            db.host = host.clone();
        }
        if let Some(port) = self.port {
            db.port = port;
        }
        if let Some(user) = &self.user {
            db.user = user.clone();
        }
        if let Some(password) = &self.password {
            db.password = password.clone();
        }
        if let Some(database) = &self.database {
            db.database = database.clone();
        }
        if let Some(ssl_mode) = &self.ssl_mode {
            db.ssl_mode = ssl_mode.clone();
        }
        if let Some(schema) = &self.schema {
            db.schema = schema.clone();
        }
        if let Some(timeout) = self.connect_timeout {
            db.connect_timeout = timeout;
        }
        if let Some(max) = self.max_row_errors {
            config.catalog.max_row_errors = Some(max);
        }
    }
}

/// Open the PostgreSQL catalog described by the configuration
pub fn open_catalog(config: &GeneratorConfig) -> Result<PostgresCatalog> {
    let database_url = config.database.connection_url()?;
    log::info!(
        "Using database {}",
        crate::utils::mask_database_url(&database_url)
    );

    let policy = RowErrorPolicy {
        max_row_errors: config.catalog.max_row_errors,
    };
    PostgresCatalog::new(
        &database_url,
        Duration::from_secs(config.database.connect_timeout),
        policy,
    )
    .context("Failed to prepare database connection")
}
