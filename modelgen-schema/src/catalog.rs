//! Catalog row validation and grouping
//!
//! The driver-specific reader hands raw [`CatalogRow`]s to [`collect`], which
//! turns them into a [`TableColumnSet`]. Malformed rows are skipped with a
//! warning; the scan only fails when the [`RowErrorPolicy`] cutoff is hit.

use crate::{CatalogRow, Column, GenError, Result, TableColumnSet};

/// Metadata query selecting every base-table column of the schema bound to `$1`
pub const BASE_TABLE_COLUMNS_QUERY: &str = r#"
SELECT
    c.table_name, c.column_name,
    c.ordinal_position::int4 AS ordinal_position,
    c.column_default, c.is_nullable, c.data_type, c.udt_name,
    c.character_maximum_length::int4 AS character_maximum_length,
    c.character_octet_length::int4 AS character_octet_length,
    c.numeric_precision::int4 AS numeric_precision
FROM information_schema.columns AS c
JOIN information_schema.tables AS t
    ON t.table_schema = c.table_schema AND t.table_name = c.table_name
WHERE t.table_schema = $1 AND t.table_type = 'BASE TABLE'
ORDER BY c.table_name
"#;

/// Parse a nullability indicator the way PostgreSQL's `bool` input does
pub fn parse_nullability(token: &str) -> Option<bool> {
    match token.trim().to_ascii_lowercase().as_str() {
        "yes" | "y" | "true" | "t" | "on" | "1" => Some(true),
        "no" | "n" | "false" | "f" | "off" | "0" => Some(false),
        _ => None,
    }
}

impl TryFrom<CatalogRow> for Column {
    type Error = String;

    fn try_from(row: CatalogRow) -> std::result::Result<Self, Self::Error> {
        let table_name = required(row.table_name, "table_name")?;
        let column_name = required(row.column_name, "column_name")?;
        let ordinal_position = row
            .ordinal_position
            .ok_or_else(|| format!("{}.{}: missing ordinal_position", table_name, column_name))?;
        if ordinal_position < 1 {
            return Err(format!(
                "{}.{}: ordinal_position {} is not positive",
                table_name, column_name, ordinal_position
            ));
        }

        let token = row
            .is_nullable
            .ok_or_else(|| format!("{}.{}: missing is_nullable", table_name, column_name))?;
        let is_nullable = parse_nullability(&token).ok_or_else(|| {
            format!(
                "{}.{}: cannot parse is_nullable '{}'",
                table_name, column_name, token
            )
        })?;

        let data_type = required(row.data_type, "data_type")?;
        let udt_name = required(row.udt_name, "udt_name")?;

        Ok(Column {
            table_name,
            column_name,
            ordinal_position,
            column_default: row.column_default,
            is_nullable,
            data_type,
            udt_name,
            character_maximum_length: row.character_maximum_length,
            character_octet_length: row.character_octet_length,
            numeric_precision: row.numeric_precision,
        })
    }
}

fn required(value: Option<String>, name: &str) -> std::result::Result<String, String> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(format!("missing {}", name)),
    }
}

/// How many malformed rows a scan tolerates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowErrorPolicy {
    /// Maximum number of skipped rows; `None` means no limit
    pub max_row_errors: Option<usize>,
}

impl RowErrorPolicy {
    pub fn with_limit(max_row_errors: usize) -> Self {
        Self {
            max_row_errors: Some(max_row_errors),
        }
    }
}

/// Outcome of a catalog scan besides the collected columns
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogReport {
    pub total_rows: usize,
    /// Row-level errors for every skipped row, in scan order
    pub skipped: Vec<String>,
}

impl CatalogReport {
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    pub fn accepted_count(&self) -> usize {
        self.total_rows - self.skipped.len()
    }
}

/// Validate rows and group the resulting columns by table
///
/// Fails with [`GenError::TooManyRowErrors`] when the policy limit is
/// exceeded, or when rows were returned and none of them could be parsed.
pub fn collect<I>(rows: I, policy: &RowErrorPolicy) -> Result<(TableColumnSet, CatalogReport)>
where
    I: IntoIterator<Item = CatalogRow>,
{
    let mut tables = TableColumnSet::new();
    let mut report = CatalogReport::default();

    for (index, row) in rows.into_iter().enumerate() {
        report.total_rows += 1;
        match Column::try_from(row) {
            Ok(column) => tables.push(column),
            Err(reason) => {
                let err = GenError::RowParse { row: index + 1, reason };
                log::warn!("Skipping catalog row: {}", err);
                report.skipped.push(err.to_string());
            }
        }
    }

    let skipped = report.skipped_count();
    let over_limit = policy.max_row_errors.is_some_and(|max| skipped > max);
    let all_failed = report.total_rows > 0 && skipped == report.total_rows;
    if over_limit || all_failed {
        return Err(GenError::TooManyRowErrors {
            skipped,
            total: report.total_rows,
        });
    }

    log::debug!(
        "Collected {} column(s) across {} table(s), {} row(s) skipped",
        tables.column_count(),
        tables.len(),
        skipped
    );

    Ok((tables, report))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nullability() {
        for token in ["YES", "yes", "t", "true", " on ", "1", "Y"] {
            assert_eq!(parse_nullability(token), Some(true), "{}", token);
        }
        for token in ["NO", "no", "f", "FALSE", "off", "0", "n"] {
            assert_eq!(parse_nullability(token), Some(false), "{}", token);
        }
        for token in ["", "maybe", "2", "nullable"] {
            assert_eq!(parse_nullability(token), None, "{}", token);
        }
    }

    #[test]
    fn test_column_from_row() {
        let row = CatalogRow::new("users", "email", 2, "YES", "character varying", "varchar")
            .with_lengths(255, 1020)
            .with_default("''::character varying");

        let column = Column::try_from(row).unwrap();
        assert_eq!(column.table_name, "users");
        assert_eq!(column.ordinal_position, 2);
        assert!(column.is_nullable);
        assert_eq!(column.udt_name, "varchar");
        assert_eq!(column.character_maximum_length, Some(255));
        assert_eq!(column.character_octet_length, Some(1020));
        assert_eq!(column.numeric_precision, None);
        assert_eq!(column.column_default.as_deref(), Some("''::character varying"));
    }

    #[test]
    fn test_column_from_row_rejects_malformed() {
        let bad_token = CatalogRow::new("users", "id", 1, "sometimes", "integer", "int4");
        assert!(Column::try_from(bad_token).unwrap_err().contains("is_nullable"));

        let mut no_udt = CatalogRow::new("users", "id", 1, "NO", "integer", "int4");
        no_udt.udt_name = None;
        assert!(Column::try_from(no_udt).unwrap_err().contains("udt_name"));

        let zero_position = CatalogRow::new("users", "id", 0, "NO", "integer", "int4");
        assert!(Column::try_from(zero_position).is_err());
    }

    #[test]
    fn test_collect_skips_bad_rows() {
        let rows = vec![
            CatalogRow::new("users", "id", 1, "NO", "integer", "int4"),
            CatalogRow::new("users", "email", 2, "maybe", "text", "text"),
            CatalogRow::new("posts", "id", 1, "NO", "integer", "int4"),
        ];

        let (tables, report) = collect(rows, &RowErrorPolicy::default()).unwrap();
        assert_eq!(tables.len(), 2);
        assert_eq!(tables.get("users").map(|c| c.len()), Some(1));
        assert_eq!(report.total_rows, 3);
        assert_eq!(report.skipped_count(), 1);
        assert_eq!(report.accepted_count(), 2);
        assert!(report.skipped[0].contains("row 2"));
    }

    #[test]
    fn test_collect_fails_when_every_row_is_bad() {
        let rows = vec![
            CatalogRow::new("users", "id", 1, "?", "integer", "int4"),
            CatalogRow::new("users", "name", 2, "?", "text", "text"),
        ];

        match collect(rows, &RowErrorPolicy::default()) {
            Err(GenError::TooManyRowErrors { skipped, total }) => {
                assert_eq!(skipped, 2);
                assert_eq!(total, 2);
            }
            other => panic!("expected TooManyRowErrors, got {:?}", other),
        }
    }

    #[test]
    fn test_collect_respects_limit() {
        let rows = vec![
            CatalogRow::new("users", "id", 1, "NO", "integer", "int4"),
            CatalogRow::new("users", "a", 2, "?", "text", "text"),
            CatalogRow::new("users", "b", 3, "?", "text", "text"),
        ];

        assert!(collect(rows.clone(), &RowErrorPolicy::with_limit(2)).is_ok());
        assert!(matches!(
            collect(rows, &RowErrorPolicy::with_limit(1)),
            Err(GenError::TooManyRowErrors { skipped: 2, total: 3 })
        ));
    }

    #[test]
    fn test_collect_empty_result() {
        let (tables, report) = collect(Vec::new(), &RowErrorPolicy::default()).unwrap();
        assert!(tables.is_empty());
        assert_eq!(report.total_rows, 0);
    }
}
