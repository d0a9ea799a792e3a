//! Catalog and model type definitions

use crate::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Raw catalog row as delivered by the driver, before validation
///
/// Every attribute is optional because the driver hands back whatever the
/// metadata views contain; [`Column::try_from`] decides what is acceptable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogRow {
    pub table_name: Option<String>,
    pub column_name: Option<String>,
    pub ordinal_position: Option<i32>,
    pub column_default: Option<String>,
    /// Nullability indicator as reported by the catalog (`YES`/`NO`)
    pub is_nullable: Option<String>,
    pub data_type: Option<String>,
    pub udt_name: Option<String>,
    pub character_maximum_length: Option<i32>,
    pub character_octet_length: Option<i32>,
    pub numeric_precision: Option<i32>,
}

impl CatalogRow {
    /// Create a row with the attributes every column carries
    pub fn new(
        table_name: &str,
        column_name: &str,
        ordinal_position: i32,
        is_nullable: &str,
        data_type: &str,
        udt_name: &str,
    ) -> Self {
        Self {
            table_name: Some(table_name.to_string()),
            column_name: Some(column_name.to_string()),
            ordinal_position: Some(ordinal_position),
            is_nullable: Some(is_nullable.to_string()),
            data_type: Some(data_type.to_string()),
            udt_name: Some(udt_name.to_string()),
            ..Default::default()
        }
    }

    /// Set the column default expression
    pub fn with_default(mut self, default: &str) -> Self {
        self.column_default = Some(default.to_string());
        self
    }

    /// Set the character length limits
    pub fn with_lengths(mut self, maximum: i32, octets: i32) -> Self {
        self.character_maximum_length = Some(maximum);
        self.character_octet_length = Some(octets);
        self
    }

    /// Set the numeric precision
    pub fn with_precision(mut self, precision: i32) -> Self {
        self.numeric_precision = Some(precision);
        self
    }
}

/// One validated catalog column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub table_name: String,
    pub column_name: String,
    /// 1-based declaration order within the table
    pub ordinal_position: i32,
    pub column_default: Option<String>,
    pub is_nullable: bool,
    /// Declared SQL data type (`character varying`, `integer`, ...)
    pub data_type: String,
    /// Underlying type name, the type-mapping key
    pub udt_name: String,
    pub character_maximum_length: Option<i32>,
    pub character_octet_length: Option<i32>,
    pub numeric_precision: Option<i32>,
}

/// Columns of every base table, keyed by table name
///
/// Lists are kept in arrival order; ordering by ordinal position is the
/// model builder's job. Tables iterate in name order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TableColumnSet {
    tables: BTreeMap<String, Vec<Column>>,
}

impl TableColumnSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column to its table's list, creating the list on first use
    pub fn push(&mut self, column: Column) {
        self.tables
            .entry(column.table_name.clone())
            .or_default()
            .push(column);
    }

    /// Columns of one table, in arrival order
    pub fn get(&self, table_name: &str) -> Option<&[Column]> {
        self.tables.get(table_name).map(Vec::as_slice)
    }

    /// Whether the set contains the table
    pub fn contains(&self, table_name: &str) -> bool {
        self.tables.contains_key(table_name)
    }

    /// Iterate tables in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Column])> {
        self.tables
            .iter()
            .map(|(name, columns)| (name.as_str(), columns.as_slice()))
    }

    /// All table names in order
    pub fn table_names(&self) -> Vec<&str> {
        self.tables.keys().map(|s| s.as_str()).collect()
    }

    /// Number of tables
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Whether no table was collected
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Total number of columns across all tables
    pub fn column_count(&self) -> usize {
        self.tables.values().map(Vec::len).sum()
    }
}

impl FromIterator<Column> for TableColumnSet {
    fn from_iter<I: IntoIterator<Item = Column>>(iter: I) -> Self {
        let mut set = TableColumnSet::new();
        for column in iter {
            set.push(column);
        }
        set
    }
}

/// Target field type in the generated models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TargetType {
    Boolean,
    Text,
    Integer,
    Timestamp,
    Json,
    StringArray,
    IntegerArray,
}

impl TargetType {
    /// Go type expression used in the rendered struct
    pub fn go_type(&self) -> &'static str {
        match self {
            TargetType::Boolean => "bool",
            TargetType::Text => "string",
            TargetType::Integer => "int",
            TargetType::Timestamp => "time.Time",
            TargetType::Json => "interface{}",
            TargetType::StringArray => "[]string",
            TargetType::IntegerArray => "[]int",
        }
    }

    /// Language-neutral label
    pub fn label(&self) -> &'static str {
        match self {
            TargetType::Boolean => "boolean",
            TargetType::Text => "text",
            TargetType::Integer => "integer",
            TargetType::Timestamp => "timestamp",
            TargetType::Json => "json",
            TargetType::StringArray => "string-array",
            TargetType::IntegerArray => "integer-array",
        }
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Resolved field type, possibly marked optional
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldType {
    pub target: TargetType,
    pub optional: bool,
}

impl FieldType {
    pub fn required(target: TargetType) -> Self {
        Self { target, optional: false }
    }

    pub fn optional(target: TargetType) -> Self {
        Self { target, optional: true }
    }

    /// Go type expression; optional types become pointers
    pub fn go_expr(&self) -> String {
        if self.optional {
            format!("*{}", self.target.go_type())
        } else {
            self.target.go_type().to_string()
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.go_expr())
    }
}

/// One model attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Normalized Go field name
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Struct tag body, e.g. `sql:"user_id,notnull"`
    pub tag: String,
    /// Verbatim source column name
    pub column_name: String,
    pub ordinal_position: i32,
}

impl Field {
    /// Build the tag body for a column
    pub fn tag_for(column_name: &str, nullable: bool) -> String {
        if nullable {
            format!("sql:\"{}\"", column_name)
        } else {
            format!("sql:\"{},notnull\"", column_name)
        }
    }

    pub fn is_optional(&self) -> bool {
        self.field_type.optional
    }
}

/// One model declaration, bound to a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDef {
    /// Normalized Go type name
    pub name: String,
    /// Table name as in the catalog, used for the table-binding tag
    pub table_name: String,
    /// Fields in ascending ordinal position
    pub fields: Vec<Field>,
}

impl ModelDef {
    /// Look a field up by its source column name
    pub fn field(&self, column_name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.column_name == column_name)
    }
}

/// Structured dump formats for built models
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Yaml,
}

/// Serialize built models for inspection
pub fn export_models(models: &[ModelDef], format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Json => Ok(serde_json::to_string_pretty(models)?),
        ExportFormat::Yaml => Ok(serde_yaml::to_string(models)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(table: &str, name: &str, position: i32) -> Column {
        Column {
            table_name: table.to_string(),
            column_name: name.to_string(),
            ordinal_position: position,
            column_default: None,
            is_nullable: false,
            data_type: "integer".to_string(),
            udt_name: "int4".to_string(),
            character_maximum_length: None,
            character_octet_length: None,
            numeric_precision: Some(32),
        }
    }

    #[test]
    fn test_table_column_set_groups_by_table() {
        let set: TableColumnSet = vec![
            column("users", "id", 1),
            column("posts", "id", 1),
            column("users", "age", 2),
        ]
        .into_iter()
        .collect();

        assert_eq!(set.len(), 2);
        assert_eq!(set.column_count(), 3);
        assert_eq!(set.table_names(), vec!["posts", "users"]);
        assert_eq!(set.get("users").map(|c| c.len()), Some(2));
        assert!(set.get("missing").is_none());
    }

    #[test]
    fn test_field_type_go_expr() {
        assert_eq!(FieldType::required(TargetType::Integer).go_expr(), "int");
        assert_eq!(FieldType::optional(TargetType::Text).go_expr(), "*string");
        assert_eq!(FieldType::optional(TargetType::Timestamp).to_string(), "*time.Time");
        assert_eq!(FieldType::required(TargetType::Json).go_expr(), "interface{}");
    }

    #[test]
    fn test_tag_for() {
        assert_eq!(Field::tag_for("id", false), "sql:\"id,notnull\"");
        assert_eq!(Field::tag_for("email", true), "sql:\"email\"");
    }

    #[test]
    fn test_export_models_json() {
        let model = ModelDef {
            name: "Users".to_string(),
            table_name: "users".to_string(),
            fields: vec![Field {
                name: "ID".to_string(),
                field_type: FieldType::required(TargetType::Integer),
                tag: Field::tag_for("id", false),
                column_name: "id".to_string(),
                ordinal_position: 1,
            }],
        };

        let json = export_models(&[model], ExportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["table_name"], "users");
        assert_eq!(value[0]["fields"][0]["type"]["target"], "integer");
    }
}
