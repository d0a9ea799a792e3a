//! modelgen schema - PostgreSQL catalog to go-pg model translation
//!
//! This crate holds the whole translation pipeline between a database
//! catalog and the generated model source, without touching the database
//! or the filesystem itself.
//!
//! # Pipeline
//!
//! - **Catalog rows** are validated and grouped by table ([`catalog`])
//! - **Identifiers** are normalized into Go-style names ([`naming`])
//! - **UDT names** are resolved to target field types ([`mapper`])
//! - **Models** are built in a deterministic order ([`builder`])
//! - **Source** is rendered from handlebars templates ([`codegen`])
//!
//! # Example
//!
//! ```rust
//! use modelgen_schema::{catalog, CatalogRow, ModelBuilder};
//!
//! # fn example() -> modelgen_schema::Result<()> {
//! let rows = vec![
//!     CatalogRow::new("users", "id", 1, "NO", "integer", "int4"),
//!     CatalogRow::new("users", "email", 2, "YES", "character varying", "varchar"),
//! ];
//! let (tables, _report) = catalog::collect(rows, &catalog::RowErrorPolicy::default())?;
//! let models = ModelBuilder::new().build(&tables)?;
//! assert_eq!(models[0].name, "Users");
//!
//! #[cfg(feature = "codegen")]
//! {
//!     use modelgen_schema::codegen::GoModelRenderer;
//!     let source = GoModelRenderer::new()?.render(&models)?;
//!     println!("{}", source);
//! }
//! # Ok(())
//! # }
//! ```

use thiserror::Error;

pub mod builder;
pub mod catalog;
pub mod mapper;
pub mod naming;
pub mod types;

#[cfg(feature = "codegen")]
pub mod codegen;

pub use builder::{ModelBuilder, TableFilter};
pub use catalog::{CatalogReport, RowErrorPolicy};
pub use mapper::TypeMapper;
pub use naming::normalize;
pub use types::*;

/// Generation pipeline errors
#[derive(Error, Debug)]
pub enum GenError {
    #[error("Catalog unavailable: {0}")]
    CatalogUnavailable(String),

    #[error("Malformed catalog row {row}: {reason}")]
    RowParse { row: usize, reason: String },

    #[error("Too many malformed catalog rows: {skipped} of {total} skipped")]
    TooManyRowErrors { skipped: usize, total: usize },

    #[error("No type mapping for {table}.{column} (udt '{udt_name}')")]
    TypeNotFound {
        table: String,
        column: String,
        udt_name: String,
    },

    #[error("Duplicate ordinal position {position} in table '{table}'")]
    DuplicateOrdinal { table: String, position: i32 },

    #[error("Render error: {0}")]
    Render(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, GenError>;

impl GenError {
    /// Whether the error only concerns a single catalog row
    pub fn is_row_level(&self) -> bool {
        matches!(self, GenError::RowParse { .. })
    }
}
