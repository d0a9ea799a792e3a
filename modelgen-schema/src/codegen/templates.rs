//! Template definitions for code generation
//!
//! This module contains the actual template strings used for rendering
//! go-pg model source.

/// File preamble: package clause and the `time` import every file carries
pub const PREAMBLE_TEMPLATE: &str = include_str!("templates/preamble.hbs");

/// One struct declaration per model
pub const MODEL_TEMPLATE: &str = include_str!("templates/model.hbs");
