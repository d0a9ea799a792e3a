//! `modelgen generate`: catalog -> models -> rendered files

use super::{open_catalog, ConnectionArgs};
use crate::catalog::CatalogReader;
use crate::config::GeneratorConfig;
use crate::output::OutputWriter;
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use modelgen_schema::codegen::{GoModelRenderer, OutputMode};
use modelgen_schema::{ModelBuilder, ModelDef, TableFilter};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ModeArg {
    /// Every model in one models.go
    SingleFile,
    /// One <table>.go per model
    OneFilePerModel,
}

impl From<ModeArg> for OutputMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::SingleFile => OutputMode::SingleFile,
            ModeArg::OneFilePerModel => OutputMode::OneFilePerModel,
        }
    }
}

#[derive(Debug, Args)]
pub struct GenerateCommand {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Output layout
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Generate a separate file for each model (same as --mode one-file-per-model)
    #[arg(long = "sf")]
    pub separate_files: bool,

    /// Output directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Go package name of the generated files
    #[arg(long)]
    pub package: Option<String>,

    /// Generate only these tables (comma-separated)
    #[arg(short = 't', long, value_delimiter = ',')]
    pub tables: Vec<String>,

    /// Skip these tables (comma-separated)
    #[arg(short = 'e', long, value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Overwrite existing files
    #[arg(long)]
    pub force: bool,

    /// Print the generated source instead of writing files
    #[arg(long)]
    pub stdout: bool,
}

/// Everything a generation run needs besides the catalog
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub schema: String,
    pub filter: TableFilter,
    pub mode: OutputMode,
    pub package: String,
    pub output_dir: PathBuf,
    pub force: bool,
    pub stdout: bool,
}

#[derive(Debug, Default)]
pub struct GenerateSummary {
    pub models: usize,
    pub skipped_rows: usize,
    pub written: Vec<PathBuf>,
}

impl GenerateCommand {
    pub async fn execute(self, mut config: GeneratorConfig) -> Result<()> {
        let options = self.options(&mut config);
        let catalog = open_catalog(&config)?;

        if !options.stdout {
            println!("🚀 Generating go-pg models from schema '{}'...", options.schema);
        }
        let summary = run(&catalog, &options).await?;

        if !options.stdout {
            for path in &summary.written {
                println!("✅ Generated: {}", path.display());
            }
            if summary.skipped_rows > 0 {
                println!("⚠️  Skipped {} malformed catalog row(s)", summary.skipped_rows);
            }
            println!("🎉 Generated {} model(s)", summary.models);
        }
        Ok(())
    }

    /// Merge flags into the configuration and derive the run options
    fn options(&self, config: &mut GeneratorConfig) -> GenerateOptions {
        self.connection.apply(config);

        if let Some(mode) = self.mode {
            config.output.mode = mode.into();
        }
        if self.separate_files {
            config.output.mode = OutputMode::OneFilePerModel;
        }
        if let Some(output) = &self.output {
            config.output.path = output.clone();
        }
        if let Some(package) = &self.package {
            config.output.package = package.clone();
        }

        GenerateOptions {
            schema: config.database.schema.clone(),
            filter: TableFilter::new(self.tables.clone(), self.exclude.clone()),
            mode: config.output.mode,
            package: config.output.package.clone(),
            output_dir: config.output.path.clone(),
            force: self.force,
            stdout: self.stdout,
        }
    }
}

/// Fetch the catalog and build the models, without rendering
pub async fn build_models(
    reader: &dyn CatalogReader,
    schema: &str,
    filter: TableFilter,
) -> Result<(Vec<ModelDef>, usize)> {
    let (tables, report) = reader
        .fetch_base_table_columns(schema)
        .await
        .context("Failed to read the database catalog")?;

    let models = ModelBuilder::new()
        .with_filter(filter)
        .build(&tables)
        .context("Failed to build models")?;

    log::info!("Built {} model(s) from {} table(s)", models.len(), tables.len());
    Ok((models, report.skipped_count()))
}

/// Run the whole pipeline; nothing is written unless every step succeeded
pub async fn run(reader: &dyn CatalogReader, options: &GenerateOptions) -> Result<GenerateSummary> {
    let (models, skipped_rows) = build_models(reader, &options.schema, options.filter.clone()).await?;

    let renderer = GoModelRenderer::new()?.with_package(&options.package);

    if options.stdout {
        let source = renderer.render(&models).context("Failed to render models")?;
        print!("{}", source);
        return Ok(GenerateSummary {
            models: models.len(),
            skipped_rows,
            written: Vec::new(),
        });
    }

    let files = renderer
        .render_files(&models, options.mode)
        .context("Failed to render models")?;
    let written = OutputWriter::new(&options.output_dir, options.force).write_all(&files)?;

    Ok(GenerateSummary {
        models: models.len(),
        skipped_rows,
        written,
    })
}
