//! `modelgen test-connection`

use super::{open_catalog, ConnectionArgs};
use crate::catalog::CatalogReader;
use crate::config::GeneratorConfig;
use crate::utils::mask_database_url;
use anyhow::{Context, Result};
use clap::Args;

#[derive(Debug, Args)]
pub struct TestConnectionCommand {
    #[command(flatten)]
    pub connection: ConnectionArgs,
}

/// What a successful connection test found
#[derive(Debug, PartialEq, Eq)]
pub struct ConnectionReport {
    pub database: String,
    pub tables: usize,
    pub columns: usize,
}

impl TestConnectionCommand {
    pub async fn execute(self, mut config: GeneratorConfig) -> Result<()> {
        self.connection.apply(&mut config);

        println!("🔌 Testing database connection...");
        let database_url = config.database.connection_url()?;
        println!("📍 Connecting to: {}", mask_database_url(&database_url));

        let catalog = open_catalog(&config)?;
        let report = check_connection(&catalog, &config.database.schema).await?;

        println!("✅ Connection successful!");
        println!("📊 Database: {}", report.database);
        println!(
            "📋 Base tables in '{}': {} ({} columns)",
            config.database.schema, report.tables, report.columns
        );
        Ok(())
    }
}

/// Connect and count the schema's base tables
pub async fn check_connection(reader: &dyn CatalogReader, schema: &str) -> Result<ConnectionReport> {
    let database = reader
        .database_name()
        .await
        .context("Failed to connect to database")?;
    let (tables, _) = reader
        .fetch_base_table_columns(schema)
        .await
        .context("Failed to read the database catalog")?;

    Ok(ConnectionReport {
        database,
        tables: tables.len(),
        columns: tables.column_count(),
    })
}
