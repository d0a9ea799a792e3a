//! Database type to model field type resolution

use crate::TargetType;
use thiserror::Error;

/// Target type to the UDT names mapped onto it. Member sets are disjoint.
static TYPE_TABLE: &[(TargetType, &[&str])] = &[
    (TargetType::Boolean, &["bool"]),
    (TargetType::Text, &["varchar", "text", "uuid"]),
    (TargetType::Integer, &["int2", "int4", "int8"]),
    (TargetType::Timestamp, &["timestamp", "date"]),
    (TargetType::Json, &["jsonb", "json"]),
    (TargetType::StringArray, &["_text", "_varchar", "tsvector"]),
    (TargetType::IntegerArray, &["_int2", "_int4", "_int8"]),
];

/// The UDT name has no entry in the mapping table
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("type not detected: '{udt_name}'")]
pub struct TypeNotFound {
    pub udt_name: String,
}

/// Resolves catalog UDT names against the static mapping table
#[derive(Debug, Clone, Copy)]
pub struct TypeMapper {
    table: &'static [(TargetType, &'static [&'static str])],
}

impl TypeMapper {
    pub fn new() -> Self {
        Self { table: TYPE_TABLE }
    }

    /// Resolve a UDT name; the first entry whose member set contains it wins
    pub fn resolve(&self, udt_name: &str) -> Result<TargetType, TypeNotFound> {
        self.table
            .iter()
            .find(|(_, members)| members.iter().any(|m| *m == udt_name))
            .map(|(target, _)| *target)
            .ok_or_else(|| TypeNotFound {
                udt_name: udt_name.to_string(),
            })
    }

    /// Every (UDT name, target type) pair the mapper knows about
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, TargetType)> + '_ {
        self.table
            .iter()
            .flat_map(|(target, members)| members.iter().map(move |udt| (*udt, *target)))
    }
}

impl Default for TypeMapper {
    fn default() -> Self {
        Self::new()
    }
}
