//! `modelgen tables`: preview the models a generate run would produce

use super::generate::build_models;
use super::{open_catalog, ConnectionArgs};
use crate::config::GeneratorConfig;
use anyhow::Result;
use clap::{Args, ValueEnum};
use modelgen_schema::{export_models, ExportFormat, ModelDef, TableFilter};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum ListFormat {
    #[default]
    Table,
    Json,
    Yaml,
}

#[derive(Debug, Args)]
pub struct TablesCommand {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = ListFormat::Table)]
    pub format: ListFormat,

    /// Only these tables (comma-separated)
    #[arg(short = 't', long, value_delimiter = ',')]
    pub tables: Vec<String>,

    /// Skip these tables (comma-separated)
    #[arg(short = 'e', long, value_delimiter = ',')]
    pub exclude: Vec<String>,
}

impl TablesCommand {
    pub async fn execute(self, mut config: GeneratorConfig) -> Result<()> {
        self.connection.apply(&mut config);
        let catalog = open_catalog(&config)?;

        let filter = TableFilter::new(self.tables, self.exclude);
        let (models, _) = build_models(&catalog, &config.database.schema, filter).await?;

        print!("{}", format_models(&models, self.format)?);
        Ok(())
    }
}

/// Render the model list in the requested format
pub fn format_models(models: &[ModelDef], format: ListFormat) -> Result<String> {
    match format {
        ListFormat::Json => Ok(format!("{}\n", export_models(models, ExportFormat::Json)?)),
        ListFormat::Yaml => Ok(export_models(models, ExportFormat::Yaml)?),
        ListFormat::Table => Ok(format_table(models)),
    }
}

fn format_table(models: &[ModelDef]) -> String {
    if models.is_empty() {
        return "No base tables found.\n".to_string();
    }

    let mut out = String::new();
    out.push_str(&format!("{:<30} {:<30} {:<10} {:<10}\n", "Table", "Model", "Fields", "Nullable"));
    out.push_str(&format!("{:-<83}\n", ""));
    for model in models {
        let nullable = model.fields.iter().filter(|f| f.is_optional()).count();
        out.push_str(&format!(
            "{:<30} {:<30} {:<10} {:<10}\n",
            model.table_name,
            model.name,
            model.fields.len(),
            nullable
        ));
    }
    out.push_str(&format!("\nTotal: {} model(s)\n", models.len()));
    out
}
