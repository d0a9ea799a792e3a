//! Catalog readers: where raw column metadata comes from

pub mod postgres;

use async_trait::async_trait;
use modelgen_schema::{CatalogReport, Result, TableColumnSet};

pub use postgres::PostgresCatalog;

/// Source of base-table column metadata
#[async_trait]
pub trait CatalogReader: Send + Sync {
    /// Fetch every base-table column of a schema, grouped by table
    async fn fetch_base_table_columns(&self, schema: &str)
        -> Result<(TableColumnSet, CatalogReport)>;

    /// Name of the database the reader is connected to
    async fn database_name(&self) -> Result<String>;
}

#[cfg(test)]
pub mod memory {
    //! In-memory catalog for pipeline tests

    use super::*;
    use modelgen_schema::{catalog, CatalogRow, GenError, RowErrorPolicy};

    pub struct MemoryCatalog {
        pub rows: Vec<CatalogRow>,
        pub available: bool,
    }

    impl MemoryCatalog {
        pub fn new(rows: Vec<CatalogRow>) -> Self {
            Self { rows, available: true }
        }

        pub fn unavailable() -> Self {
            Self { rows: Vec::new(), available: false }
        }
    }

    #[async_trait]
    impl CatalogReader for MemoryCatalog {
        async fn fetch_base_table_columns(
            &self,
            _schema: &str,
        ) -> Result<(TableColumnSet, CatalogReport)> {
            if !self.available {
                return Err(GenError::CatalogUnavailable("connection refused".to_string()));
            }
            catalog::collect(self.rows.clone(), &RowErrorPolicy::default())
        }

        async fn database_name(&self) -> Result<String> {
            Ok("memory".to_string())
        }
    }
}
