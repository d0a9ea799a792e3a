//! go-pg model renderer
//!
//! Produces one `type X struct { ... }` block per model, with a `tableName`
//! binding field first and one tagged field per column. Field lines are
//! aligned the way `gofmt` aligns a struct block, so a formatting pass leaves
//! the output unchanged.

use crate::codegen::{templates, TemplateGenerator};
use crate::{GenError, ModelDef, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default Go package of generated files
pub const DEFAULT_PACKAGE: &str = "models";

/// File name used in single-file mode
pub const SINGLE_FILE_NAME: &str = "models.go";

/// Suffix appended to file stems the Go toolchain would otherwise skip
const MODEL_FILE_SUFFIX: &str = "_model";

/// `GOOS` values recognized in `_<os>.go` file name constraints
const KNOWN_OS: &[&str] = &[
    "aix", "android", "darwin", "dragonfly", "freebsd", "hurd", "illumos", "ios", "js", "linux",
    "nacl", "netbsd", "openbsd", "plan9", "solaris", "wasip1", "windows", "zos",
];

/// `GOARCH` values recognized in `_<arch>.go` file name constraints
const KNOWN_ARCH: &[&str] = &[
    "386", "amd64", "amd64p32", "arm", "armbe", "arm64", "arm64be", "loong64", "mips", "mipsle",
    "mips64", "mips64le", "mips64p32", "mips64p32le", "ppc", "ppc64", "ppc64le", "riscv",
    "riscv64", "s390", "s390x", "sparc", "sparc64", "wasm",
];

/// How rendered models are laid out on disk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputMode {
    /// Every model in one `models.go`
    #[default]
    SingleFile,
    /// One `<table>.go` per model, see [`model_file_name`]
    OneFilePerModel,
}

/// A rendered source file, not yet persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    pub file_name: String,
    pub contents: String,
}

#[derive(Serialize)]
struct PreambleContext<'a> {
    package: &'a str,
}

#[derive(Serialize)]
struct ModelContext<'a> {
    name: &'a str,
    lines: Vec<String>,
}

/// Renders models as go-pg structs
pub struct GoModelRenderer {
    template_generator: TemplateGenerator,
    package: String,
}

impl GoModelRenderer {
    /// Create a renderer for the default package
    pub fn new() -> Result<Self> {
        let mut template_generator = TemplateGenerator::new();
        template_generator.register_template("preamble", templates::PREAMBLE_TEMPLATE)?;
        template_generator.register_template("model", templates::MODEL_TEMPLATE)?;

        Ok(Self {
            template_generator,
            package: DEFAULT_PACKAGE.to_string(),
        })
    }

    /// Set the Go package name written in every preamble
    pub fn with_package(mut self, package: &str) -> Self {
        self.package = package.to_string();
        self
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    /// Render every model into one source text, in input order
    pub fn render(&self, models: &[ModelDef]) -> Result<String> {
        let mut out = self.render_preamble()?;
        for model in models {
            out.push('\n');
            out.push_str(&self.render_model(model)?);
        }
        Ok(out)
    }

    /// Render one file per model, named after its table
    ///
    /// Fails when two tables end up with the same file name.
    pub fn render_each(&self, models: &[ModelDef]) -> Result<Vec<RenderedFile>> {
        let mut owners: HashMap<String, &str> = HashMap::with_capacity(models.len());
        let mut files = Vec::with_capacity(models.len());

        for model in models {
            let file_name = model_file_name(&model.table_name);
            if let Some(other) = owners.insert(file_name.clone(), &model.table_name) {
                return Err(GenError::Render(format!(
                    "tables '{}' and '{}' both map to file '{}'",
                    other, model.table_name, file_name
                )));
            }
            files.push(RenderedFile {
                file_name,
                contents: self.render(std::slice::from_ref(model))?,
            });
        }

        Ok(files)
    }

    /// Render models according to an output mode
    pub fn render_files(&self, models: &[ModelDef], mode: OutputMode) -> Result<Vec<RenderedFile>> {
        match mode {
            OutputMode::SingleFile => Ok(vec![RenderedFile {
                file_name: SINGLE_FILE_NAME.to_string(),
                contents: self.render(models)?,
            }]),
            OutputMode::OneFilePerModel => self.render_each(models),
        }
    }

    /// Render the file preamble
    pub fn render_preamble(&self) -> Result<String> {
        self.template_generator.render(
            "preamble",
            &PreambleContext {
                package: &self.package,
            },
        )
    }

    /// Render a single struct declaration
    pub fn render_model(&self, model: &ModelDef) -> Result<String> {
        let context = ModelContext {
            name: &model.name,
            lines: struct_lines(model),
        };
        self.template_generator.render("model", &context)
    }
}

/// File name of a model in one-file-per-model mode
///
/// The table name is lower-cased and every character outside `[a-z0-9_]`
/// becomes `_`, so the name is always a single path component. Leading
/// underscores are dropped since Go ignores `_*.go` files, and stems Go reads
/// as test files or `GOOS`/`GOARCH` constraints get a `_model` suffix.
pub fn model_file_name(table_name: &str) -> String {
    let sanitized: String = table_name
        .chars()
        .map(|ch| match ch.to_ascii_lowercase() {
            c @ ('a'..='z' | '0'..='9' | '_') => c,
            _ => '_',
        })
        .collect();

    let mut stem = sanitized.trim_start_matches('_').to_string();
    if stem.is_empty() || is_constrained_stem(&stem) {
        stem.push_str(MODEL_FILE_SUFFIX);
        stem = stem.trim_start_matches('_').to_string();
    }

    format!("{}.go", stem)
}

/// Whether `go build` would skip or restrict a file with this stem
fn is_constrained_stem(stem: &str) -> bool {
    let mut parts: Vec<&str> = stem.split('_').collect();
    if parts.len() < 2 {
        return false;
    }
    if parts.last() == Some(&"test") {
        return true;
    }
    // Everything before the first underscore never counts
    parts.remove(0);
    match parts.as_slice() {
        [.., os, arch] if KNOWN_OS.contains(os) && KNOWN_ARCH.contains(arch) => true,
        [.., last] => KNOWN_OS.contains(last) || KNOWN_ARCH.contains(last),
        [] => false,
    }
}

/// Field lines of a struct block, columns padded to a common width
fn struct_lines(model: &ModelDef) -> Vec<String> {
    let mut rows = Vec::with_capacity(model.fields.len() + 1);
    rows.push((
        "tableName".to_string(),
        "struct{}".to_string(),
        format!("sql:\"{}\"", model.table_name),
    ));
    for field in &model.fields {
        rows.push((field.name.clone(), field.field_type.go_expr(), field.tag.clone()));
    }

    let name_width = rows.iter().map(|(n, _, _)| n.chars().count()).max().unwrap_or(0);
    let type_width = rows.iter().map(|(_, t, _)| t.chars().count()).max().unwrap_or(0);

    rows.into_iter()
        .map(|(name, ty, tag)| {
            format!(
                "{:<name_width$} {:<type_width$} `{}`",
                name,
                ty,
                tag,
                name_width = name_width,
                type_width = type_width
            )
        })
        .collect()
}
