//! Model building from grouped catalog columns

use crate::{
    naming::normalize, Column, Field, FieldType, GenError, ModelDef, Result, TableColumnSet,
    TypeMapper,
};
use std::collections::HashSet;

/// Table selection applied before building
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableFilter {
    /// Only build these tables (all tables when empty)
    pub only: Vec<String>,
    /// Never build these tables
    pub exclude: Vec<String>,
}

impl TableFilter {
    pub fn new(only: Vec<String>, exclude: Vec<String>) -> Self {
        Self { only, exclude }
    }

    /// Whether a table passes the filter
    pub fn accepts(&self, table_name: &str) -> bool {
        let included = self.only.is_empty() || self.only.iter().any(|t| t == table_name);
        included && !self.exclude.iter().any(|t| t == table_name)
    }

    pub fn is_empty(&self) -> bool {
        self.only.is_empty() && self.exclude.is_empty()
    }
}

/// Turns a [`TableColumnSet`] into ordered [`ModelDef`]s
#[derive(Debug, Clone, Default)]
pub struct ModelBuilder {
    mapper: TypeMapper,
    filter: TableFilter,
}

impl ModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(mut self, filter: TableFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Build one model per accepted table, in table-name order
    ///
    /// Fails on the first column whose type cannot be resolved; no partially
    /// typed model is ever returned.
    pub fn build(&self, tables: &TableColumnSet) -> Result<Vec<ModelDef>> {
        for name in &self.filter.only {
            if !tables.contains(name) {
                log::warn!("Requested table '{}' not found in catalog", name);
            }
        }

        let mut models = Vec::with_capacity(tables.len());
        for (table_name, columns) in tables.iter() {
            if !self.filter.accepts(table_name) {
                log::debug!("Skipping filtered table '{}'", table_name);
                continue;
            }
            models.push(self.build_model(table_name, columns)?);
        }

        Ok(models)
    }

    /// Build the model of a single table
    pub fn build_model(&self, table_name: &str, columns: &[Column]) -> Result<ModelDef> {
        let mut ordered: Vec<&Column> = columns.iter().collect();
        ordered.sort_by_key(|c| c.ordinal_position);

        let mut positions = HashSet::with_capacity(ordered.len());
        let mut fields = Vec::with_capacity(ordered.len());
        for column in ordered {
            if !positions.insert(column.ordinal_position) {
                return Err(GenError::DuplicateOrdinal {
                    table: table_name.to_string(),
                    position: column.ordinal_position,
                });
            }
            fields.push(self.build_field(column)?);
        }

        log::debug!("Built model for '{}' with {} field(s)", table_name, fields.len());

        Ok(ModelDef {
            name: normalize(table_name),
            table_name: table_name.to_string(),
            fields,
        })
    }

    fn build_field(&self, column: &Column) -> Result<Field> {
        let target = self
            .mapper
            .resolve(&column.udt_name)
            .map_err(|e| GenError::TypeNotFound {
                table: column.table_name.clone(),
                column: column.column_name.clone(),
                udt_name: e.udt_name,
            })?;

        let field_type = if column.is_nullable {
            FieldType::optional(target)
        } else {
            FieldType::required(target)
        };

        Ok(Field {
            name: normalize(&column.column_name),
            field_type,
            tag: Field::tag_for(&column.column_name, column.is_nullable),
            column_name: column.column_name.clone(),
            ordinal_position: column.ordinal_position,
        })
    }
}
